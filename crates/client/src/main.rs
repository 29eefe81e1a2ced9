//! Physio upload tool
//!
//! Uploads files to clinic storage through the same presigned-URL flow the
//! forms use, and removes stored files by URL.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use physio_client::api::StorageApi;
use physio_client::{
    ApiClient, ClientConfig, LocalFile, UploadConstraints, UploadFolder, UploadManager,
};

#[derive(Debug, Parser)]
#[command(name = "physio-upload", version, about = "Upload files to clinic storage")]
struct Cli {
    /// Backend base URL (overrides PHYSIO_API_URL).
    #[arg(long, env = "PHYSIO_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate and upload a file, printing its public URL.
    Upload {
        /// Storage folder (doctors, services, blog, branches, testimonials, onboarding, ...).
        #[arg(long, default_value = "doctors")]
        folder: UploadFolder,

        /// Accept PDFs as well as images, with the document size limit.
        #[arg(long)]
        documents: bool,

        path: PathBuf,
    },
    /// Delete a stored file by its public URL.
    Delete { file_url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let client = ApiClient::from_config(&config).context("failed to create API client")?;
    info!(api_url = %config.api_url, "client configured");

    match cli.command {
        Command::Upload {
            folder,
            documents,
            path,
        } => {
            let constraints = if documents {
                UploadConstraints::documents()
            } else {
                config.image_constraints()
            };

            let file = LocalFile::from_path(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;

            let mut uploads = UploadManager::new(Arc::new(client), folder, constraints);
            match uploads.select_file(file).await {
                Ok(file_url) => println!("{file_url}"),
                Err(e) => {
                    let message = e.user_message();
                    bail!("{message}");
                }
            }
        }
        Command::Delete { file_url } => {
            client
                .delete_object(&file_url)
                .await
                .with_context(|| format!("failed to delete {file_url}"))?;
            info!(file_url = %file_url, "file deleted");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
