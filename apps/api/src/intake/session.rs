//! Per-session upload view model.
//!
//! Files are accepted (PDF only), extracted one at a time, and the
//! successful results accumulate alongside the summary config. Results are
//! keyed by `FileId`, never by position, so a caller that extracts files
//! concurrently can still feed them back through `record`.

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::intake::client::ExtractionApi;
use crate::intake::schema::SummaryRequestConfig;
use crate::models::document::ExtractedDocument;
use crate::models::summary::ProcessRequest;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please upload PDF files only")]
    NoPdfFiles,

    #[error("No extracted documents to summarize")]
    NoDocuments,

    #[error("Add at least one subject before summarizing")]
    NoSubjects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

/// A user-selected file before it is sent anywhere.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, inferring its media type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, media_type_for(path), bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }
}

pub fn media_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => FALLBACK_MEDIA_TYPE,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Succeeded,
    Failed(String),
}

#[derive(Debug)]
struct Entry {
    id: FileId,
    file: UploadedFile,
    status: UploadStatus,
}

#[derive(Debug, Default)]
pub struct UploadSession {
    next_id: u64,
    entries: Vec<Entry>,
    documents: Vec<(FileId, ExtractedDocument)>,
    pub config: SummaryRequestConfig,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the PDFs from `files` and queues them as `Idle`.
    /// Fails without queuing anything when no PDF is present.
    pub fn accept(&mut self, files: Vec<UploadedFile>) -> Result<Vec<FileId>, IntakeError> {
        let total = files.len();
        let pdfs: Vec<_> = files.into_iter().filter(UploadedFile::is_pdf).collect();
        if pdfs.is_empty() {
            return Err(IntakeError::NoPdfFiles);
        }
        if pdfs.len() < total {
            warn!(skipped = total - pdfs.len(), "Ignoring non-PDF files");
        }

        let ids = pdfs
            .into_iter()
            .map(|file| {
                let id = FileId(self.next_id);
                self.next_id += 1;
                self.entries.push(Entry {
                    id,
                    file,
                    status: UploadStatus::Idle,
                });
                id
            })
            .collect();
        Ok(ids)
    }

    pub fn status(&self, id: FileId) -> Option<&UploadStatus> {
        self.entry(id).map(|e| &e.status)
    }

    /// All queued files in selection order.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &str, &UploadStatus)> {
        self.entries
            .iter()
            .map(|e| (e.id, e.file.name.as_str(), &e.status))
    }

    /// Extracted documents in the order their extraction finished.
    pub fn documents(&self) -> impl Iterator<Item = &ExtractedDocument> {
        self.documents.iter().map(|(_, doc)| doc)
    }

    /// Sends every `Idle` file to the gateway, one at a time, each awaited
    /// before the next begins. Returns the ids processed, in order.
    pub async fn extract_pending<A>(&mut self, api: &A) -> Vec<FileId>
    where
        A: ExtractionApi + ?Sized,
    {
        let pending: Vec<(FileId, UploadedFile)> = self
            .entries
            .iter()
            .filter(|e| e.status == UploadStatus::Idle)
            .map(|e| (e.id, e.file.clone()))
            .collect();

        let mut processed = Vec::with_capacity(pending.len());
        for (id, file) in pending {
            self.set_status(id, UploadStatus::Uploading);
            info!(filename = %file.name, "Processing file");
            let result = api.extract(&file).await.map_err(|e| e.to_string());
            self.record(id, result);
            processed.push(id);
        }
        processed
    }

    /// Stores the outcome of one extraction. Only successes join the
    /// document collection.
    pub fn record(&mut self, id: FileId, result: Result<ExtractedDocument, String>) {
        match result {
            Ok(doc) => {
                info!(filename = %doc.filename, chars = doc.text.len(), "Text extracted successfully");
                self.set_status(id, UploadStatus::Succeeded);
                self.documents.push((id, doc));
            }
            Err(message) => {
                warn!(?id, "Error processing file: {message}");
                self.set_status(id, UploadStatus::Failed(message));
            }
        }
    }

    pub fn can_summarize(&self) -> bool {
        !self.documents.is_empty() && !self.config.subjects.is_empty()
    }

    /// The `/api/process` body for the current documents and config.
    pub fn summary_request(&self) -> Result<ProcessRequest, IntakeError> {
        if self.documents.is_empty() {
            return Err(IntakeError::NoDocuments);
        }
        if self.config.subjects.is_empty() {
            return Err(IntakeError::NoSubjects);
        }
        Ok(ProcessRequest {
            texts: self.documents().map(|d| d.text.clone()).collect(),
            subjects: self.config.subjects.clone(),
            source_language: self.config.source_language.to_string(),
            target_language: self.config.target_language.to_string(),
        })
    }

    fn entry(&self, id: FileId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn set_status(&mut self, id: FileId, status: UploadStatus) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.status = status;
        }
    }
}
