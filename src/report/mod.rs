// Report generation for a processed batch
pub mod json;
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use tempfile::NamedTempFile;

use crate::models::{BatchItem, DocumentType};
use crate::utils::VerifierError;

pub use json::JsonReport;
pub use pdf::PdfReport;

// Random characters appended to report file names
const SUFFIX_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => ".pdf",
            ReportFormat::Json => ".json",
        }
    }
}

/// Writes the report into `dir` and returns the path of the new file.
pub fn write_report(
    format: ReportFormat,
    kind: DocumentType,
    items: &[BatchItem],
    dir: &Path,
) -> Result<PathBuf, VerifierError> {
    let generated_at = Local::now();
    let mut file = create_report_file(dir, kind, format)?;
    match format {
        ReportFormat::Pdf => PdfReport::new(kind, generated_at).write(items, file.as_file_mut())?,
        ReportFormat::Json => JsonReport::new(kind, generated_at).write(items, file.as_file_mut())?,
    }
    let path = persist(file)?;
    info!("Wrote {} report for {} document(s) to {}", kind, items.len(), path.display());
    Ok(path)
}

/// The lines each document contributes, in report order.
pub fn document_lines(index: usize, item: &BatchItem) -> Vec<String> {
    let mut lines = vec![format!("Document {}", index + 1)];
    match item {
        BatchItem::Processed(record) => {
            let verdict = if record.verified() { "Yes" } else { "No" };
            lines.push(format!("Verified: {}", verdict));
            for (label, value) in record.result.field_lines() {
                lines.push(format!("{}: {}", label, value));
            }
        }
        BatchItem::Failed { source, error } => {
            lines.push(format!("Source: {}", source));
            lines.push(format!("Error: {}", error));
        }
    }
    lines
}

pub(crate) fn timestamp(generated_at: &DateTime<Local>) -> String {
    generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
}

// Random-suffix name so concurrent reports never collide
fn create_report_file(
    dir: &Path,
    kind: DocumentType,
    format: ReportFormat,
) -> Result<NamedTempFile, VerifierError> {
    fs::create_dir_all(dir)?;
    let file = tempfile::Builder::new()
        .prefix(kind.report_prefix())
        .suffix(format.extension())
        .rand_bytes(SUFFIX_LEN)
        .tempfile_in(dir)?;
    Ok(file)
}

fn persist(file: NamedTempFile) -> Result<PathBuf, VerifierError> {
    let (_, path) = file
        .keep()
        .map_err(|e| VerifierError::Report(format!("Failed to keep report file: {}", e)))?;
    make_world_readable(&path)?;
    Ok(path)
}

#[cfg(unix)]
fn make_world_readable(path: &Path) -> Result<(), VerifierError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_world_readable(_path: &Path) -> Result<(), VerifierError> {
    Ok(())
}
