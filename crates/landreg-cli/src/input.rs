//! Reading command inputs: JSON records and `--doc type=path` attachments.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use landreg_client::DocumentUpload;
use serde::de::DeserializeOwned;

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A `--doc type=path` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocArg {
    pub doc_type: String,
    pub path: PathBuf,
}

/// clap value parser for `--doc`.
pub fn parse_doc_arg(s: &str) -> Result<DocArg, String> {
    let (doc_type, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=PATH, got '{s}'"))?;
    let doc_type = doc_type.trim();
    if doc_type.is_empty() || path.is_empty() {
        return Err(format!("expected TYPE=PATH, got '{s}'"));
    }
    Ok(DocArg {
        doc_type: doc_type.to_string(),
        path: PathBuf::from(path),
    })
}

impl DocArg {
    /// Read the file into an upload, guessing the content type from its
    /// extension.
    pub fn load(&self) -> Result<DocumentUpload> {
        let bytes = std::fs::read(&self.path).with_context(|| format!("reading document {}", self.path.display()))?;
        Ok(DocumentUpload::new(
            self.doc_type.clone(),
            content_type_for(&self.path),
            bytes,
        ))
    }
}

pub fn load_documents(docs: &[DocArg]) -> Result<Vec<DocumentUpload>> {
    docs.iter().map(DocArg::load).collect()
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("tif" | "tiff") => "image/tiff",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
