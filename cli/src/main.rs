use alter_core::agent::{AgentLoop, ChatInput, ErrorReply, HistoryEntry, PersonaContext};
use alter_core::config::{self, Config};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
mod onboard;

#[derive(Parser)]
#[command(name = "alter")]
#[command(about = "alter - answers questions in your voice", long_about = None)]
struct Cli {
    /// Path to the config file (default: ~/.alter/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive setup that writes the config file
    Onboard,
    /// Ask the agent a question, or start an interactive session
    Chat {
        #[arg(short, long)]
        message: Option<String>,
        /// JSON array of prior {role, content} turns
        #[arg(long)]
        history: Option<PathBuf>,
        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the rendered system instruction
    Persona {
        /// Flag profile text written in the third person
        #[arg(long)]
        check: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(config::get_config_path);

    let command = cli.command.unwrap_or_else(|| {
        if !config_path.exists() {
            Commands::Onboard
        } else {
            Commands::Chat {
                message: None,
                history: None,
                json: false,
            }
        }
    });

    match command {
        Commands::Onboard => {
            let onboard_config = onboard::run_onboard(&config_path).map_err(|e| {
                eprintln!("❌ Onboarding failed: {}", e);
                anyhow::anyhow!("Onboarding failed: {}", e)
            })?;
            config::save_config(&onboard_config, &config_path)?;
        }
        Commands::Persona { check } => {
            let config = Config::load_or_default(&config_path)?;
            let persona = PersonaContext::load(&config.persona, &std::env::current_dir()?);

            if !check {
                println!("{}", persona.system_prompt());
                return Ok(());
            }

            let violations = persona.third_person_violations();
            if violations.is_empty() {
                println!("✅ No third-person phrasing found");
            } else {
                for (source, phrase) in &violations {
                    println!("❌ {}: '{}'", source, phrase);
                }
                anyhow::bail!("{} third-person violations", violations.len());
            }
        }
        Commands::Chat {
            message,
            history,
            json,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let agent = alter_core::build_agent(&config, &std::env::current_dir()?)?;

            match message {
                Some(message) => {
                    let history = match history {
                        Some(path) => read_history(&path)?,
                        None => vec![],
                    };
                    one_shot(&agent, ChatInput { message, history }, json).await?;
                }
                None => interactive(&agent).await,
            }
        }
    }

    Ok(())
}

fn read_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history from {}", path.display()))
}

async fn one_shot(agent: &AgentLoop, input: ChatInput, json: bool) -> Result<()> {
    let result = agent.respond(input).await;

    if json {
        let out = match &result {
            Ok(reply) => serde_json::to_string(reply)?,
            Err(e) => serde_json::to_string(&ErrorReply::from(e))?,
        };
        println!("{}", out);
    }

    match result {
        Ok(reply) => {
            if !json {
                println!("{}", reply.reply);
            }
            Ok(())
        }
        Err(e) => {
            if !json {
                eprintln!("❌ Error: {:#}", e);
            }
            anyhow::bail!("Agent processing failed: {}", e)
        }
    }
}

async fn interactive(agent: &AgentLoop) {
    println!("💬 {}", agent.persona().name());
    println!("Type your message (Ctrl+D to exit):\n");
    use std::io::{self, BufRead};
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut history: Vec<HistoryEntry> = vec![];

    loop {
        print!("> ");
        let _ = stdout.lock().flush();

        let mut input = String::new();
        let read = stdin.lock().read_line(&mut input);
        match read {
            Ok(0) | Err(_) => {
                println!("\n👋 Goodbye!");
                break;
            }
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }

                match agent.process_with_history(input, &history).await {
                    Ok(response) => {
                        println!("\n{}\n", response);
                        history.push(HistoryEntry::new("user", input));
                        history.push(HistoryEntry::new("assistant", response));
                    }
                    Err(e) => {
                        eprintln!("❌ Error: {:#}\n", e);
                    }
                }
            }
        }
    }
}
