use crate::agent::{AgentLoop, PersonaContext, ToolRegistry};
use crate::config::Config;
use crate::notify::create_notifier;
use crate::providers::create_provider;
use crate::tools::default_tools;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Wires a ready-to-serve agent from configuration. Persona sources are
/// resolved relative to `base_dir`.
///
/// Only a missing or unknown provider is fatal; absent persona files and
/// notifier credentials degrade with a warning.
pub fn build_agent(config: &Config, base_dir: &Path) -> Result<AgentLoop> {
    let provider = create_provider(config)?;
    let persona = PersonaContext::load(&config.persona, base_dir);
    let notifier = create_notifier(&config.notify);
    let registry = ToolRegistry::new(default_tools(notifier))?;

    info!(
        persona = persona.name(),
        provider = %config.provider,
        model = %config.model,
        tools = ?registry.names(),
        max_turns = config.max_turns,
        "agent initialized"
    );

    Ok(AgentLoop::new(provider, Arc::new(persona), Arc::new(registry))
        .with_max_turns(config.max_turns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builds_without_persona_files_or_notifier() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config {
            api_key: "k".into(),
            ..Config::default()
        };
        config.persona.name = "Ada".into();

        let agent = build_agent(&config, tmp.path()).unwrap();

        assert_eq!(agent.persona().name(), "Ada");
        assert!(agent.persona().sections().iter().all(|s| !s.loaded));
    }

    #[test]
    fn missing_api_key_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(build_agent(&Config::default(), tmp.path()).is_err());
    }
}
