//! `netr` — coded speech detection and narrative chaos analysis.
//!
//! Two independent flows: `scan` runs the local zero-shot classifier plus
//! keyword risk scoring; `analyze` sends a templated prompt to the hosted
//! chat-completion endpoint and prints the reply verbatim.

mod display;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use netr_ai::EmbeddingClassifier;
use netr_core::{ContextCategory, ScanError, run_scan};
use netr_remote::{
    AnalysisClient, AnalysisError, CREDENTIAL_NAME, DEFAULT_ENDPOINT, DEFAULT_MODEL, credential,
    run_analysis,
};

#[derive(Parser)]
#[command(name = "netr", version, about = "Detects and deciphers suspicious or coded language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a message with the local classifier and keyword risk scorer.
    Scan {
        /// Message text to analyze.
        text: String,
        /// Directory containing `model.onnx` and `tokenizer.json`.
        #[arg(long, env = "NETR_MODEL_DIR", default_value = "models/all-MiniLM-L6-v2")]
        model_dir: PathBuf,
    },
    /// Send a message to the hosted model for chaos analysis.
    Analyze {
        /// Message text to analyze.
        text: String,
        /// Context category for the analysis.
        #[arg(long, value_enum)]
        context: Option<ContextArg>,
        /// Chat-completions endpoint URL.
        #[arg(long, env = "NETR_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
        /// Hosted model identifier.
        #[arg(long, env = "NETR_HOSTED_MODEL", default_value = DEFAULT_MODEL)]
        model: String,
        /// Secrets file consulted when GROQ_API_KEY is not set in the environment.
        #[arg(long)]
        secrets: Option<PathBuf>,
    },
}

/// Clap-facing mirror of [`ContextCategory`], kept here so netr-core stays
/// free of CLI dependencies.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContextArg {
    Political,
    Extremist,
    OrganizedCrime,
}

impl From<ContextArg> for ContextCategory {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Political => ContextCategory::Political,
            ContextArg::Extremist => ContextCategory::Extremist,
            ContextArg::OrganizedCrime => ContextCategory::OrganizedCrime,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("netr v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { text, model_dir } => {
            // Model load failure is fatal: no request can be served without it.
            let mut classifier = EmbeddingClassifier::load(&model_dir)
                .context("loading classification model")?;

            match run_scan(&text, &mut classifier) {
                Ok(report) => print!("{}", display::render_scan_report(&report)),
                Err(ScanError::Rejected(reason)) => println!("{reason}"),
                Err(err) => return Err(err.into()),
            }
        }
        Command::Analyze {
            text,
            context,
            endpoint,
            model,
            secrets,
        } => {
            let secrets_path = secrets.unwrap_or_else(credential::default_secrets_path);
            let api_key = credential::lookup(CREDENTIAL_NAME, &secrets_path);

            // The gatekeeper rejects a missing credential before any call,
            // so an empty placeholder key is never sent anywhere.
            let client = AnalysisClient::new(
                endpoint,
                model,
                api_key.clone().unwrap_or_default(),
            )?;

            match run_analysis(
                &text,
                context.map(Into::into),
                api_key.as_deref(),
                &client,
            )
            .await
            {
                Ok(content) => print!("{}", display::render_analysis(&content)),
                Err(AnalysisError::Rejected(reason)) => println!("{reason}"),
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
