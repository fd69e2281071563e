use alter_core::config::{Config, NotifyConfig, PersonaConfig, PersonaSource};
use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

const BANNER: &str = r"
    -------------------------------

      __ _  | |_|_  ___  _ __
     / _` | | __| |/ _ \| '__|
    | (_| | | |_| |  __/| |
     \__,_| |_|\__|_\___||_|

    -------------------------------
";

const PROVIDERS: &[(&str, &[&str])] = &[
    ("gemini", &["gemini-1.5-flash", "gemini-2.0-flash", "gemini-1.5-pro"]),
    ("openai", &["gpt-4o-mini", "gpt-4o"]),
];

pub const SUMMARY_TEMPLATE: &str = "I am [your name]. Write this summary in the first person: \
what you do, what you have built, and what kind of work you are looking for.\n";

fn print_step(step: usize, total: usize, title: &str) {
    println!();
    println!(
        "{}",
        style(format!("[{}/{}] {}", step, total, title))
            .cyan()
            .bold()
    );
    println!();
}

fn ensure_file(path: &Path, content: &str) -> Result<bool> {
    if !path.exists() {
        std::fs::write(path, content)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Sources for a profile directory laid out as `summary.txt` plus an
/// optional `linkedin.txt`.
pub fn persona_sources(profile_dir: &Path) -> Vec<PersonaSource> {
    vec![
        PersonaSource::new("Summary", profile_dir.join("summary.txt")),
        PersonaSource::new("LinkedIn Profile", profile_dir.join("linkedin.txt")),
    ]
}

pub fn create_profile_dir(profile_dir: &Path) -> Result<bool> {
    std::fs::create_dir_all(profile_dir)
        .with_context(|| format!("Failed to create {}", profile_dir.display()))?;
    ensure_file(&profile_dir.join("summary.txt"), SUMMARY_TEMPLATE)
}

fn setup_provider() -> Result<(String, String)> {
    let names: Vec<&str> = PROVIDERS.iter().map(|(name, _)| *name).collect();
    let selection = Select::new()
        .with_prompt("Select your completion provider")
        .items(&names)
        .default(0)
        .interact()
        .context("Failed to select provider")?;

    let (provider, models) = PROVIDERS[selection];
    let model = Select::new()
        .with_prompt("Select your model")
        .items(models)
        .default(0)
        .interact()
        .context("Failed to select model")?;

    Ok((provider.to_string(), models[model].to_string()))
}

fn setup_api_key(provider: &str) -> Result<String> {
    let api_key: String = Input::new()
        .with_prompt(format!("Enter your {} API key", provider))
        .interact_text()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        return Err(anyhow::anyhow!("API key cannot be empty"));
    }

    Ok(api_key.trim().to_string())
}

fn setup_persona() -> Result<PersonaConfig> {
    let name: String = Input::new()
        .with_prompt("Whose voice should the agent speak in? (full name)")
        .interact_text()
        .context("Failed to read persona name")?;

    let profile_dir: String = Input::new()
        .with_prompt("Directory holding the profile text files")
        .default("me".to_string())
        .interact_text()
        .context("Failed to read profile directory")?;

    Ok(PersonaConfig {
        name: name.trim().to_string(),
        sources: persona_sources(&PathBuf::from(profile_dir.trim())),
        ..PersonaConfig::default()
    })
}

fn setup_notify() -> Result<NotifyConfig> {
    let wants_push = Confirm::new()
        .with_prompt("Send Pushover notifications when visitors leave details?")
        .default(false)
        .interact()
        .context("Failed to read answer")?;

    if !wants_push {
        return Ok(NotifyConfig::default());
    }

    let token: String = Input::new()
        .with_prompt("Pushover application token")
        .interact_text()
        .context("Failed to read Pushover token")?;
    let user: String = Input::new()
        .with_prompt("Pushover user key")
        .interact_text()
        .context("Failed to read Pushover user key")?;

    Ok(NotifyConfig {
        pushover_token: Some(token.trim().to_string()),
        pushover_user: Some(user.trim().to_string()),
        webhook_url: None,
    })
}

pub fn run_onboard(config_path: &Path) -> Result<Config> {
    println!("{}", style(BANNER).cyan().bold());

    println!("  {}", style("Welcome to alter!").white().bold());
    println!(
        "  {}",
        style("This wizard sets up the agent that answers in your voice.").dim()
    );
    println!();

    print_step(1, 4, "Provider Setup");
    let (provider, model) = setup_provider()?;
    let api_key = setup_api_key(&provider)?;

    print_step(2, 4, "Persona");
    let persona = setup_persona()?;

    print_step(3, 4, "Notifications");
    let notify = setup_notify()?;

    print_step(4, 4, "Profile Files");
    if let Some(profile_dir) = persona.sources.first().and_then(|s| s.path.parent()) {
        match create_profile_dir(profile_dir) {
            Ok(true) => println!(
                "  {} Created {} - replace the template with your own summary",
                style("✓").green(),
                style(profile_dir.join("summary.txt").display()).cyan()
            ),
            Ok(false) => println!(
                "  {} Using existing profile in {}",
                style("✓").green(),
                style(profile_dir.display()).cyan()
            ),
            Err(e) => eprintln!(
                "  {} Warning: Could not create profile directory: {}",
                style("!").yellow(),
                e
            ),
        }
    }

    let config = Config {
        provider,
        api_key,
        model,
        persona,
        notify,
        ..Default::default()
    };

    println!();
    println!("  {} Configuration complete!", style("✓").green().bold());
    println!(
        "  {} Config saved to {}",
        style("→").green(),
        style(config_path.display()).cyan()
    );
    println!();
    println!(
        "  {} You can now run: {}",
        style("→").green(),
        style("alter chat").cyan().bold()
    );
    println!();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn profile_dir_gets_template_once() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("me");

        assert!(create_profile_dir(&dir).unwrap());
        std::fs::write(dir.join("summary.txt"), "I am Ada.").unwrap();
        assert!(!create_profile_dir(&dir).unwrap());

        let summary = std::fs::read_to_string(dir.join("summary.txt")).unwrap();
        assert_eq!(summary, "I am Ada.");
    }

    #[test]
    fn sources_point_into_profile_dir() {
        let sources = persona_sources(Path::new("profile"));
        assert_eq!(sources[0].path, PathBuf::from("profile/summary.txt"));
        assert_eq!(sources[1].title, "LinkedIn Profile");
    }
}
