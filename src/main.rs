mod session;


use std::path::{Path, PathBuf};
use std::sync::Arc;

use bridge::{BridgeConfig, BridgeError, HttpInterpreter, SubmitError, Submitter};
use canvas::CanvasError;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use session::{Replay, Session};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid session file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),
    #[error("bridge error: {0}")]
    Bridge(#[from] BridgeError),
    #[error("submit rejected: {0}")]
    Submit(#[from] SubmitError),
}

#[derive(Parser, Debug)]
#[command(name = "sketchpad", about = "Replay drawing sessions and submit them for interpretation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a session and write the final canvas as a PNG.
    Render {
        #[arg(long)]
        session: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Also print the `data:image/png;base64,...` URI to stdout.
        #[arg(long)]
        data_uri: bool,
    },
    /// Replay a session and submit its snapshots to the endpoint.
    Submit {
        #[arg(long)]
        session: PathBuf,
        /// Endpoint URL. Defaults to `SKETCHPAD_ENDPOINT_URL`, then the local API route.
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render { session, out, data_uri } => run_render(&session, &out, data_uri),
        Command::Submit { session, endpoint } => run_submit(&session, endpoint.as_deref()).await,
    }
}

fn run_render(session: &Path, out: &Path, print_data_uri: bool) -> Result<(), CliError> {
    let replay = Session::load(session)?.replay()?;
    if let Some(e) = replay.halted {
        return Err(e.into());
    }
    let snapshot = replay.engine.export()?;
    std::fs::write(out, snapshot.png_bytes()?)?;
    info!(path = %out.display(), side = snapshot.width(), renders = replay.renders, "canvas written");
    if print_data_uri {
        println!("{}", snapshot.as_data_uri());
    }
    Ok(())
}

/// `--endpoint` wins; otherwise `SKETCHPAD_ENDPOINT_URL` or the default.
fn endpoint_config(flag: Option<&str>) -> Result<BridgeConfig, BridgeError> {
    flag.map_or_else(BridgeConfig::from_env, BridgeConfig::new)
}

/// Submits every snapshot the session's `submit` events produced, or the
/// final canvas when there were none. Submissions run one after another.
/// If replay halted on a bad event, the snapshots taken before it are still
/// submitted and the event's error is returned afterwards.
async fn run_submit(session: &Path, endpoint: Option<&str>) -> Result<(), CliError> {
    let Replay { engine, submitted, halted, .. } = Session::load(session)?.replay()?;
    let snapshots = if submitted.is_empty() && halted.is_none() { vec![engine.export()?] } else { submitted };

    let interpreter = HttpInterpreter::new(endpoint_config(endpoint)?)?;
    info!(endpoint = interpreter.endpoint(), count = snapshots.len(), "submitting snapshots");
    let submitter = Submitter::new(Arc::new(interpreter));

    let mut observer = submitter.subscribe();
    let watcher = tokio::spawn(async move {
        while observer.changed().await.is_ok() {
            let status = observer.borrow_and_update().clone();
            info!(status = %status, "status changed");
        }
    });

    for snapshot in snapshots {
        let status = submitter.submit(snapshot).await?;
        println!("{status}");
    }

    drop(submitter);
    if let Err(e) = watcher.await {
        tracing::warn!(error = %e, "status watcher ended abnormally");
    }
    match halted {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
