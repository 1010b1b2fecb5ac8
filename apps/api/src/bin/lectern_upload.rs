//! Command-line front-end for the two gateways: uploads PDFs one by one,
//! then asks for a resume of everything that was extracted.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lectern::intake::client::GatewayClient;
use lectern::intake::schema::Language;
use lectern::intake::session::{UploadSession, UploadStatus, UploadedFile};

#[derive(Parser)]
#[command(name = "lectern-upload")]
#[command(about = "Extract text from PDF lecture notes and generate a resume")]
struct Cli {
    /// Base URL of the lectern server
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,

    /// Subject to focus on (repeatable)
    #[arg(short, long = "subject")]
    subjects: Vec<String>,

    /// Language the notes are written in
    #[arg(long = "from", default_value_t = Language::English)]
    source_language: Language,

    /// Language to write the resume in
    #[arg(long = "to", default_value_t = Language::English)]
    target_language: Language,

    /// Only extract; print the extracted text instead of summarizing
    #[arg(long)]
    extract_only: bool,

    /// PDF files to upload
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lectern=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut session = UploadSession::new();
    for subject in &cli.subjects {
        session.config.add_subject(subject);
    }
    session.config.set_source_language(cli.source_language);
    session.config.set_target_language(cli.target_language);

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let file = UploadedFile::from_path(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.push(file);
    }
    session.accept(files)?;

    let client = GatewayClient::new(cli.server.clone())?;
    session.extract_pending(&client).await;

    for (_, name, status) in session.files() {
        match status {
            UploadStatus::Succeeded => eprintln!("  ok      {name}"),
            UploadStatus::Failed(message) => eprintln!("  failed  {name}: {message}"),
            UploadStatus::Idle | UploadStatus::Uploading => eprintln!("  pending {name}"),
        }
    }

    if cli.extract_only {
        for doc in session.documents() {
            println!("##### {}\n{}", doc.filename, doc.text);
        }
        return Ok(());
    }

    if !session.can_summarize() {
        let reason = session
            .summary_request()
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        bail!("cannot summarize: {reason}");
    }

    let request = session.summary_request()?;
    eprintln!(
        "Summarizing {} document(s) ({} -> {})...",
        request.texts.len(),
        request.source_language,
        request.target_language
    );
    let resume = client.summarize(&request).await?;
    println!("{resume}");

    Ok(())
}
