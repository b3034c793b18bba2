use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use whisper_bridge::{capture, Config, RecordingCoordinator};

#[derive(Debug, Parser)]
#[command(
    name = "whisper-bridge",
    about = "Record audio and collect transcripts from a watched directory"
)]
struct Args {
    /// Config file (TOML), without extension
    #[arg(short, long, default_value = "config/whisper-bridge")]
    config: String,

    /// Override the recording output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(dir) = args.output_dir {
        cfg.capture.output_dir = dir;
    }

    info!("{} starting", cfg.service.name);
    info!("Output directory: {}", cfg.capture.output_dir.display());

    if !capture::is_available(&cfg.capture).await {
        warn!(
            "Capture tool '{}' was not found; recording will fail",
            cfg.capture.program
        );
    }

    let mut coordinator = RecordingCoordinator::new(cfg)?;

    // Ctrl-C aborts an in-flight result wait instead of running out the
    // full timeout.
    let cancel = coordinator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested, cancelling");
            cancel.cancel();
        }
    });

    let session_id = coordinator.start_recording().await?;
    info!("Recording session {} - press Enter to stop", session_id);
    wait_for_enter().await?;

    coordinator.stop_recording().await?;
    let transcription = coordinator.transcribe().await?;

    println!("{}", transcription.text.trim());
    info!(
        "Transcribed {} segment(s), language '{}'",
        transcription.segments.len(),
        transcription.language
    );

    Ok(())
}

async fn wait_for_enter() -> Result<()> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(())
}
