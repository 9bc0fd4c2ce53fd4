//! Tally application binary - composition root.
//!
//! Ties the Tally crates together into a terminal front end:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Wire the dictation session to console speech adapters and the form
//! 4. Run the guided dialogue over stdin lines (one line = one utterance)
//! 5. Print the completed contribution entry as JSON

mod cli;
mod form;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use tally_core::config::TallyConfig;
use tally_dialogue::{DialogueState, DictationSession};
use tally_speech::console::{ConsoleRecognizer, ConsoleSynthesizer};

use cli::CliArgs;
use form::{ConsoleNotifier, EntryForm};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let config = TallyConfig::load_or_default(&config_file);

    let log_level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Tally v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        locale = %config.dictation.locale,
        restart_delay_ms = config.dictation.restart_delay_ms,
        "Dictation configured"
    );

    let screen = args.resolve_screen()?;

    let form = Arc::new(EntryForm::new(chrono::Local::now().date_naive()));
    let recognizer = Arc::new(ConsoleRecognizer::new());
    let session = DictationSession::with_restart_delay(
        recognizer.clone(),
        Arc::new(ConsoleSynthesizer::new()),
        form.clone(),
        Arc::new(ConsoleNotifier::new()),
        Duration::from_millis(config.dictation.restart_delay_ms),
    );

    session.activate(screen)?;

    // Each stdin line stands in for one finalized recognition result: the
    // utterance is delivered, then the pass ends and the session decides
    // whether to re-arm.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut completed = false;
    while let Some(line) = lines.next_line().await? {
        if recognizer.is_armed() {
            session.on_utterance(&line);
            session.on_recognizer_ended();
        }
        if session.state() == DialogueState::Idle {
            completed = true;
            break;
        }
    }

    if !completed {
        tracing::warn!("Input ended before the dialogue completed");
        session.deactivate();
        return Ok(());
    }

    let entry = form.to_entry()?;
    tracing::info!(entry_id = %entry.id, "Contribution entry assembled");
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}
