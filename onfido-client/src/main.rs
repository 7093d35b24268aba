use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use client_core::observability::init_tracing;
use onfido_client::{Client, DocumentRequest, DocumentSide, DocumentType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "onfido")]
#[command(about = "Manage applicant documents through the Onfido API", long_about = None)]
struct Cli {
    /// OTLP collector endpoint to export traces to
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", global = true)]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document file for an applicant
    Upload {
        applicant_id: String,
        path: PathBuf,
        #[arg(long = "type")]
        document_type: DocumentType,
        #[arg(long)]
        side: Option<DocumentSide>,
    },

    /// Print a document's metadata
    Get { id: String },

    /// Print every document of an applicant, one JSON object per line
    List { applicant_id: String },

    /// Download a document's file, or print it as base64 when no output path is given
    Download {
        id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(
        "onfido-client",
        "warn,onfido_client=info",
        cli.otlp_endpoint.as_deref(),
    ) {
        eprintln!("Failed to initialize tracing: {}", e);
    }

    let client = Client::from_env().context("Failed to create Onfido client")?;

    match cli.command {
        Commands::Upload {
            applicant_id,
            path,
            document_type,
            side,
        } => {
            let file = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let mut request = DocumentRequest::new(applicant_id, file, document_type);
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                request = request.file_name(name);
            }
            if let Some(side) = side {
                request = request.side(side);
            }

            let document = client.upload_document(request).await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::Get { id } => {
            let document = client.get_document(&id).await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::List { applicant_id } => {
            let mut iter = client.list_documents(&applicant_id);
            while iter.next().await {
                if let Some(document) = iter.document() {
                    println!("{}", serde_json::to_string(document)?);
                }
            }
            if let Some(err) = iter.err() {
                bail!("Failed to list documents: {}", err);
            }
        }
        Commands::Download { id, out } => {
            let download = client.download_document(&id).await?;
            match out {
                Some(path) => {
                    tokio::fs::write(&path, download.decode()?)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Document saved");
                }
                None => println!("{}", download.data),
            }
        }
    }

    Ok(())
}
