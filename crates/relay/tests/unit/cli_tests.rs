//! Unit tests for command line parsing and helpers

use std::io::Write;

use clap::Parser;
use relay::cli::{Cli, Command, load_history, render_providers};
use relay::domain::ChatRole;
use relay::infrastructure::config::AppConfig;

/// Test that generate parses its prompt and flags
#[test]
fn test_parse_generate() {
    let cli = Cli::try_parse_from([
        "relay",
        "--config",
        "relay.toml",
        "generate",
        "Explain borrowing",
        "--context",
        "You are a Rust tutor.",
        "--stats",
    ])
    .unwrap();

    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("relay.toml")));
    assert_eq!(
        cli.command,
        Command::Generate {
            prompt: "Explain borrowing".to_string(),
            context: "You are a Rust tutor.".to_string(),
            history: None,
            stats: true,
        }
    );
}

/// Test that generate requires a prompt
#[test]
fn test_generate_requires_prompt() {
    assert!(Cli::try_parse_from(["relay", "generate"]).is_err());
}

/// Test that a history file is read in order
#[test]
fn test_load_history() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"role":"user","content":"Hi"}},{{"role":"assistant","content":"Hello!"}}]"#
    )
    .unwrap();

    let history = load_history(file.path()).unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[1].content, "Hello!");
}

/// Test that a missing history file is an I/O error
#[test]
fn test_missing_history_file() {
    let err = load_history(std::path::Path::new("/nonexistent/history.json")).unwrap_err();
    assert!(matches!(err, relay::Error::Io { .. }));
}

/// Test that the provider listing follows priority order
#[test]
fn test_render_providers() {
    let listing = render_providers(&AppConfig::default());
    let lines: Vec<_> = listing.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("groq"));
    assert!(lines[4].contains("openrouter"));
    assert!(lines[1].contains("GEMINI_API_KEY"));
}
