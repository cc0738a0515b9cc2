use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single Markdown to PDF conversion.
///
/// Rendering itself cannot fail; every variant comes from the file system
/// or from the PDF backend.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source path does not exist. Checked before anything is read or created.
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The intermediate HTML file could not be created or written.
    #[error("Failed to prepare intermediate HTML file: {0}")]
    TransientFile(#[source] std::io::Error),

    /// The backend reported failure. No PDF is guaranteed to exist.
    #[error("PDF conversion with {backend} failed: {reason}")]
    ConversionFailed {
        backend: &'static str,
        reason: String,
    },
}
