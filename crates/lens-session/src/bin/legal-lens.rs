//! legal-lens: analyse a privacy policy or terms document from the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lens_core::{QaAnswer, SupportedMime, UploadedFile};
use lens_inference::LensConfig;
use lens_session::{SessionCoordinator, SessionSnapshot};

/// Declared type for files whose extension is not recognised; validation
/// rejects it with an unsupported-type error.
const UNKNOWN_MIME: &str = "application/octet-stream";

#[derive(Parser)]
#[command(name = "legal-lens")]
#[command(author, version, about = "Plain-language analysis of privacy policies and terms")]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: ~/.config/legal-lens/config.toml, then LENS_* env vars)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the session snapshot as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a document file or pasted text
    Analyze {
        /// PDF or plain-text file to analyse
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Text to analyse when no file is given
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Ask one or more free-form questions (sent concurrently)
    Ask {
        /// Questions to ask
        #[arg(required = true, num_args = 1..)]
        questions: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Tracing setup.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors
///   RUST_LOG    - standard env filter
///
/// Console output goes to stderr so stdout carries only results.
fn init_tracing() -> Option<WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "legal_lens=info,lens_session=info,lens_inference=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = Path::new(path).parent().unwrap_or(Path::new("."));
        let file_name = Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("legal-lens.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LensConfig> {
    let config = match path {
        Some(path) => LensConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => LensConfig::load().context("Failed to load config")?,
    };
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let coordinator = SessionCoordinator::from_config(&config)?;

    match cli.command {
        Commands::Analyze { file, text } => {
            if let Some(path) = file {
                let file = read_upload(&path)?;
                coordinator
                    .upload_file(file)
                    .await
                    .with_context(|| format!("Failed to ingest {}", path.display()))?;
            }
            if let Some(text) = text {
                coordinator.set_pasted_text(text);
            }

            if coordinator.submit_analysis().await?.is_none() {
                anyhow::bail!("Nothing to analyse: pass --file or --text");
            }
        }

        Commands::Ask { questions } => {
            let asks = questions.iter().map(|q| coordinator.submit_question(q));
            futures::future::join_all(asks).await;
        }
    }

    print_snapshot(&coordinator.snapshot(), cli.json)
}

fn read_upload(path: &Path) -> anyhow::Result<UploadedFile> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("document")
        .to_string();
    let declared_mime = SupportedMime::from_filename(&filename)
        .map(|mime| mime.as_str())
        .unwrap_or(UNKNOWN_MIME);

    Ok(UploadedFile::new(filename, declared_mime, data))
}

fn print_snapshot(snapshot: &SessionSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    if let Some(doc) = &snapshot.document {
        println!("Document: {} ({} characters)", doc.filename, doc.char_count);
    }

    if let (Some(analysis), Some(display)) = (&snapshot.analysis, &snapshot.display_text) {
        println!("{}", display);
        println!();
        println!("Privacy Score:          {}/100", analysis.metrics.privacy_score);
        println!("Data Usage Risk:        {}", analysis.metrics.data_usage_risk);
        println!("Overall Security Level: {}", analysis.metrics.security_level);
    }

    for entry in &snapshot.history {
        println!("Q: {}", entry.question);
        match &entry.answer {
            QaAnswer::Pending => println!("A: (pending)"),
            QaAnswer::Answered(text) | QaAnswer::Failed(text) => println!("A: {}", text),
        }
        println!();
    }

    Ok(())
}
