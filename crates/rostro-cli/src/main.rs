use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rostro", about = "Rostro facial-analysis client")]
struct Cli {
    /// Base URL of a running rostrod instance
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze age, gender, emotion and race attributes in one image
    Analyze {
        /// Path to the image file
        image: PathBuf,
    },
    /// Check whether two images show the same person
    Verify {
        image1: PathBuf,
        image2: PathBuf,
        /// Embedding model name
        #[arg(short, long)]
        model: Option<String>,
        /// Distance threshold for a positive match
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Query daemon liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let http = reqwest::Client::new();

    let response = match &cli.command {
        Commands::Analyze { image } => {
            let body = json!({ "imagen": encode_file(image)? });
            http.post(format!("{}/analyze", cli.server))
                .json(&body)
                .send()
                .await?
        }
        Commands::Verify {
            image1,
            image2,
            model,
            threshold,
        } => {
            let mut body = json!({
                "image1": encode_file(image1)?,
                "image2": encode_file(image2)?,
            });
            if let Some(model) = model {
                body["model"] = json!(model);
            }
            if let Some(threshold) = threshold {
                body["threshold"] = json!(threshold);
            }
            http.post(format!("{}/verifymetodo", cli.server))
                .json(&body)
                .send()
                .await?
        }
        Commands::Health => http.get(format!("{}/health", cli.server)).send().await?,
    };

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .context("server reply was not JSON")?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        bail!("server replied with status {status}");
    }
    Ok(())
}

/// Read an image file and Base64-encode its raw bytes.
fn encode_file(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}
