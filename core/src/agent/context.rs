use crate::config::PersonaConfig;
use std::path::Path;
use tracing::{debug, warn};

pub const MISSING_SOURCE_PLACEHOLDER: &str = "(No information available.)";

const DEFAULT_POLICY: &str = "If you don't know the answer to any question, use your record_unknown_question tool to record the question that you couldn't answer, even if it's about something trivial or unrelated to career. \
If the user is engaging in discussion, answer their question first, then delicately try to steer them towards getting in touch via email; ask for their email and record it using your record_user_details tool. \
Politely decline requests that have nothing to do with representing {name}, such as writing code or essays for the user.";

const DEFAULT_STYLE: &str = "Keep your answers concise and punchy for a web chat interface.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSection {
    pub title: String,
    pub content: String,
    pub loaded: bool,
}

/// The fixed identity an agent speaks as. Built once at startup and
/// rendered into the system instruction for every request.
#[derive(Debug, Clone)]
pub struct PersonaContext {
    name: String,
    sections: Vec<ProfileSection>,
    policy: String,
    style: String,
}

impl PersonaContext {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            policy: DEFAULT_POLICY.replace("{name}", &name),
            style: DEFAULT_STYLE.to_string(),
            name,
            sections: vec![],
        }
    }

    /// Reads every configured source relative to `base_dir`. A source that
    /// cannot be read is replaced by a placeholder and logged; loading
    /// itself never fails.
    pub fn load(config: &PersonaConfig, base_dir: &Path) -> Self {
        let mut persona = Self::new(config.name.clone());

        if let Some(policy) = &config.policy {
            persona.policy = policy.replace("{name}", &config.name);
        }
        if let Some(style) = &config.style {
            persona.style = style.clone();
        }

        for source in &config.sources {
            let path = base_dir.join(&source.path);
            let section = match std::fs::read_to_string(&path) {
                Ok(content) => {
                    debug!(path = %path.display(), "loaded persona source");
                    ProfileSection {
                        title: source.title.clone(),
                        content: truncate(content.trim(), config.max_source_chars),
                        loaded: true,
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "persona source unavailable, using placeholder");
                    ProfileSection {
                        title: source.title.clone(),
                        content: MISSING_SOURCE_PLACEHOLDER.to_string(),
                        loaded: false,
                    }
                }
            };
            persona.sections.push(section);
        }

        persona
    }

    pub fn with_section(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.sections.push(ProfileSection {
            title: title.into(),
            content: content.into(),
            loaded: true,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[ProfileSection] {
        &self.sections
    }

    pub fn system_prompt(&self) -> String {
        let name = &self.name;
        let mut prompt = format!(
            "You are acting as {name}. You are answering questions on {name}'s website, \
particularly questions related to {name}'s career, background, skills and experience. \
Your responsibility is to represent {name} for interactions on the website as faithfully as possible. \
You are given a profile of {name}'s background which you can use to answer questions. \
Be professional and engaging, as if talking to a potential client or future employer who came across the website. "
        );
        prompt.push_str(&self.policy);

        for section in &self.sections {
            prompt.push_str(&format!("\n\n## {}:\n{}", section.title, section.content));
        }

        prompt.push_str(&format!(
            "\n\nWith this context, please chat with the user, always staying in character as {name}. {}",
            self.style
        ));
        prompt
    }

    /// Finds profile text that talks about the persona in the third person,
    /// which reads wrong once the model speaks as them.
    pub fn third_person_violations(&self) -> Vec<(String, String)> {
        let mut triggers = vec![];
        if let Some(first) = self.name.split_whitespace().next() {
            triggers.push(format!("{first} has"));
            triggers.push(format!("{first} is"));
        }
        triggers.extend(["His ", "He has", "He is", "He can"].map(String::from));

        let mut violations = vec![];
        for section in self.sections.iter().filter(|s| s.loaded) {
            for trigger in &triggers {
                if section.content.contains(trigger.as_str()) {
                    violations.push((section.title.clone(), trigger.clone()));
                }
            }
        }
        violations
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}\n\n[... truncated at {} chars]", truncated, max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersonaSource;
    use tempfile::TempDir;

    fn config(name: &str, sources: Vec<PersonaSource>) -> PersonaConfig {
        PersonaConfig {
            name: name.into(),
            sources,
            ..PersonaConfig::default()
        }
    }

    #[test]
    fn sources_render_in_order() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("summary.txt"), "I build compilers.\n").unwrap();
        std::fs::write(tmp.path().join("cv.txt"), "2019-2024: Staff engineer").unwrap();

        let persona = PersonaContext::load(
            &config(
                "Ada Lovelace",
                vec![
                    PersonaSource::new("Summary", "summary.txt"),
                    PersonaSource::new("CV", "cv.txt"),
                ],
            ),
            tmp.path(),
        );
        let prompt = persona.system_prompt();

        assert!(prompt.starts_with("You are acting as Ada Lovelace."));
        assert!(prompt.contains("record_unknown_question"));
        assert!(prompt.contains("record_user_details"));
        let summary = prompt.find("## Summary:\nI build compilers.").unwrap();
        let cv = prompt.find("## CV:\n2019-2024: Staff engineer").unwrap();
        assert!(summary < cv);
        assert!(prompt.ends_with(DEFAULT_STYLE));
    }

    #[test]
    fn missing_source_degrades_to_placeholder() {
        let tmp = TempDir::new().unwrap();
        let persona = PersonaContext::load(
            &config("Ada", vec![PersonaSource::new("Summary", "nope.txt")]),
            tmp.path(),
        );

        assert_eq!(persona.sections().len(), 1);
        assert!(!persona.sections()[0].loaded);
        assert!(persona
            .system_prompt()
            .contains(&format!("## Summary:\n{MISSING_SOURCE_PLACEHOLDER}")));
    }

    #[test]
    fn policy_and_style_overrides() {
        let mut cfg = config("Grace", vec![]);
        cfg.policy = Some("Only discuss {name}'s naval career.".into());
        cfg.style = Some("Answer in one sentence.".into());

        let prompt = PersonaContext::load(&cfg, Path::new(".")).system_prompt();

        assert!(prompt.contains("Only discuss Grace's naval career."));
        assert!(!prompt.contains("record_unknown_question"));
        assert!(prompt.ends_with("Answer in one sentence."));
    }

    #[test]
    fn long_sources_are_truncated() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("big.txt"), "x".repeat(50)).unwrap();
        let mut cfg = config("Ada", vec![PersonaSource::new("Big", "big.txt")]);
        cfg.max_source_chars = 10;

        let persona = PersonaContext::load(&cfg, tmp.path());

        assert!(persona.sections()[0]
            .content
            .starts_with("xxxxxxxxxx\n\n[... truncated at 10 chars]"));
    }

    #[test]
    fn third_person_phrasing_is_flagged() {
        let persona = PersonaContext::new("Sam Smith")
            .with_section("Summary", "Sam has ten years of experience. I like Rust.")
            .with_section("Projects", "He can ship. His portfolio is online.");

        let violations = persona.third_person_violations();

        assert_eq!(
            violations,
            vec![
                ("Summary".to_string(), "Sam has".to_string()),
                ("Projects".to_string(), "His ".to_string()),
                ("Projects".to_string(), "He can".to_string()),
            ]
        );
    }

    #[test]
    fn unnamed_persona_only_uses_pronoun_triggers() {
        let persona = PersonaContext::new("  ")
            .with_section("Summary", "I build things. This is my work and my team has grown.");
        assert!(persona.third_person_violations().is_empty());

        let persona = PersonaContext::new("").with_section("Summary", "He is an engineer.");
        assert_eq!(
            persona.third_person_violations(),
            vec![("Summary".to_string(), "He is".to_string())]
        );
    }

    #[test]
    fn placeholders_are_not_checked() {
        let tmp = TempDir::new().unwrap();
        let persona = PersonaContext::load(
            &config("He", vec![PersonaSource::new("Summary", "missing.txt")]),
            tmp.path(),
        );
        assert!(persona.third_person_violations().is_empty());
    }
}
