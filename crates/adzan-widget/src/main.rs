//! Adzan learning widget entry point.

use std::sync::Arc;

use adzan_core::clock::SystemClock;
use adzan_core::rng::SystemRng;
use adzan_widget::audio::ConsoleAudioOutput;
use adzan_widget::config::WidgetConfig;
use adzan_widget::error::AppError;
use adzan_widget::preferences::JsonFilePreferenceStore;
use adzan_widget::runtime::{self, RuntimeEvent};
use adzan_widget::state::App;
use adzan_widget::terminal::parse_command;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Logs go to stderr; stdout is the widget itself.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Adzan widget");

    let config = WidgetConfig::from_env()?;
    let preferences = JsonFilePreferenceStore::from_env();
    tracing::info!(path = %preferences.path().display(), "using preference file");

    let (sender, events) = unbounded_channel();
    let app = App::new(
        config,
        Box::new(SystemClock),
        Box::new(SystemRng::from_os()),
        Arc::new(ConsoleAudioOutput::new()),
        Arc::new(preferences),
        sender.clone(),
        std::io::stdout(),
    )?;

    tokio::spawn(read_stdin(sender.clone()));
    tokio::spawn(watch_ctrl_c(sender));

    runtime::run(app, events).await;

    Ok(())
}

async fn read_stdin(sender: UnboundedSender<RuntimeEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => match parse_command(&line) {
                Ok(input) => RuntimeEvent::Input(input),
                Err(message) => RuntimeEvent::Invalid(message),
            },
            Ok(None) => RuntimeEvent::Shutdown,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                RuntimeEvent::Shutdown
            }
        };
        let last = event == RuntimeEvent::Shutdown;
        if sender.send(event).is_err() || last {
            break;
        }
    }
}

async fn watch_ctrl_c(sender: UnboundedSender<RuntimeEvent>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        let _ = sender.send(RuntimeEvent::Shutdown);
    }
}
