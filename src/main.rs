// src/main.rs
//
// Command-line host for the submission workflow.
// Stands in for the desktop window: collects input, runs
// initialize -> submit -> shutdown and prints the final status.

use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catnote::domain::{Severity, SubmissionStatus};
use catnote::events::{create_event_bus, StatusChanged};
use catnote::integrations::{CatNoteClient, NoteTransport};
use catnote::repositories::{JsonSettingsRepository, SettingsRepository};
use catnote::{AppConfig, SubmissionController};

/// Send a quick note to CatNote
#[derive(Debug, Parser)]
#[command(name = "catnote", version, about)]
struct Cli {
    /// Note text; words are joined with spaces. Read from stdin when omitted.
    content: Vec<String>,

    /// Read the note text from a file
    #[arg(short, long, conflicts_with = "content")]
    file: Option<PathBuf>,

    /// API secret, or a full/partial API address containing it
    #[arg(short, long)]
    secret: Option<String>,

    /// Do not keep the secret in the settings file
    #[arg(long, conflicts_with = "remember_secret")]
    forget_secret: bool,

    /// Keep the secret in the settings file
    #[arg(long)]
    remember_secret: bool,

    /// Settings file location (overrides CATNOTE_SETTINGS_PATH)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_content(cli: &Cli) -> anyhow::Result<String> {
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read note from {}", path.display()));
    }

    if !cli.content.is_empty() {
        return Ok(cli.content.join(" "));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No note content given. Pass it as arguments, with --file, or on stdin.");
    }

    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("Failed to read note from stdin")?;
    Ok(content)
}

/// Exit status bits: 1 when the submission ended in an error status,
/// 2 when the settings could not be saved.
fn exit_status(status: SubmissionStatus, settings_saved: bool) -> u8 {
    let mut code = 0;
    if status.severity() == Severity::Error {
        code |= 1;
    }
    if !settings_saved {
        code |= 2;
    }
    code
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    // 1. CONFIGURATION
    let mut config = AppConfig::from_env().context("Invalid configuration")?;
    if let Some(path) = &cli.settings {
        config.settings_path = Some(path.clone());
    }
    let settings_path = config.resolve_settings_path()?;

    // 2. INFRASTRUCTURE
    let event_bus = Arc::new(create_event_bus());
    event_bus.subscribe::<StatusChanged, _>(|event| {
        if event.status == SubmissionStatus::Sending {
            eprintln!("{}", event.message);
        }
    });

    let settings_repo: Arc<dyn SettingsRepository> =
        Arc::new(JsonSettingsRepository::new(settings_path));
    let transport: Arc<dyn NoteTransport> =
        Arc::new(CatNoteClient::with_timeout(config.request_timeout)?);

    // 3. CONTROLLER
    let mut controller =
        SubmissionController::new(settings_repo, transport, Arc::clone(&event_bus), &config)?;
    controller.initialize().await;

    if let Some(secret) = cli.secret.clone() {
        controller.set_secret_input(secret);
    }
    if cli.forget_secret {
        controller.set_remember_secret(false);
    } else if cli.remember_secret {
        controller.set_remember_secret(true);
    }
    controller.set_content(read_content(&cli)?);

    log::info!("Note length: {}", controller.content_length_display());

    // 4. SUBMIT
    // A failed save still leaves the network outcome in `status()`.
    let saved = match controller.submit().await {
        Ok(_) => controller.shutdown().await,
        Err(e) => Err(e),
    };

    let status = controller.status();
    println!("{}", status);

    if let Err(e) = &saved {
        eprintln!("Failed to save settings: {}", e);
    }

    Ok(ExitCode::from(exit_status(status, saved.is_ok())))
}
