//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `relay generate <PROMPT>` | Route one request and print the JSON result |
//! | `relay providers` | Print the configured chain in priority order |

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use relay_domain::{ChatMessage, GenerationRequest};
use relay_infrastructure::config::AppConfig;
use relay_infrastructure::logging::init_logging;
use relay_infrastructure::{ConfigLoader, build_router};
use tracing::debug;

/// Exit code for a rejected request
pub const EXIT_INVALID_REQUEST: u8 = 2;

/// Exit code when no provider could answer
pub const EXIT_UNAVAILABLE: u8 = 3;

/// Command line interface for Relay
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Relay - Multi-provider LLM router with failover")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Route one prompt through the provider chain
    Generate {
        /// Prompt text
        prompt: String,

        /// System context injected ahead of the conversation
        #[arg(long, default_value = "")]
        context: String,

        /// JSON file holding prior messages (`[{"role":"user","content":"..."}]`)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print router statistics after the result
        #[arg(long)]
        stats: bool,
    },

    /// List the configured providers in priority order
    Providers,
}

/// Run a parsed command, returning the process exit code
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(config.logging.clone()).context("Failed to initialize logging")?;

    match cli.command {
        Command::Generate {
            prompt,
            context,
            history,
            stats,
        } => generate(&config, prompt, context, history.as_deref(), stats).await,
        Command::Providers => {
            print!("{}", render_providers(&config));
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn generate(
    config: &AppConfig,
    prompt: String,
    context: String,
    history: Option<&Path>,
    stats: bool,
) -> anyhow::Result<ExitCode> {
    let history = match history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };
    debug!(messages = history.len(), "Prepared conversation history");

    let router = build_router(config)?;
    let request = GenerationRequest::new(prompt)
        .with_system_context(context)
        .with_history(history);

    let code = match router.generate(&request).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_validation() => {
            eprintln!("{}", e.caller_message());
            ExitCode::from(EXIT_INVALID_REQUEST)
        }
        Err(e) if e.is_unavailable() => {
            debug!(error = %e, "Routing failed");
            eprintln!("{}", e.caller_message());
            ExitCode::from(EXIT_UNAVAILABLE)
        }
        Err(e) => return Err(e.into()),
    };

    if stats {
        println!("{}", serde_json::to_string_pretty(&router.router_stats())?);
    }
    Ok(code)
}

/// Read a conversation history file
pub fn load_history(path: &Path) -> relay_domain::Result<Vec<ChatMessage>> {
    // Scoped here: `anyhow::Context` also provides `context` on domain results
    use relay_infrastructure::error_ext::ErrorContext;

    let raw = std::fs::read_to_string(path)
        .io_context(format!("Failed to read history file {}", path.display()))?;
    Ok(serde_json::from_str(&raw)?)
}

/// One line per provider, in priority order
pub fn render_providers(config: &AppConfig) -> String {
    let mut providers: Vec<_> = config.providers.iter().collect();
    providers.sort_by_key(|p| p.priority);

    providers
        .into_iter()
        .map(|p| {
            let credential = p.api_key_env.as_deref().unwrap_or("-");
            format!(
                "{:>3}  {:<12} {:<18} {:<18} {} [{}]\n",
                p.priority,
                p.name,
                p.display_name,
                p.kind.as_str(),
                p.model,
                credential
            )
        })
        .collect()
}
