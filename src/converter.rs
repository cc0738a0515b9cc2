use colored::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};
use tokio::fs;
use tracing::{debug, info};

use crate::{render, BackendKind, ConvertError, PdfBackend};

/// Drives one Markdown file through rendering and a [`PdfBackend`].
pub struct Converter {
    backend: Box<dyn PdfBackend>,
    temp_dir: Option<PathBuf>,
}

impl Converter {
    pub fn new(backend: Box<dyn PdfBackend>) -> Self {
        Self {
            backend,
            temp_dir: None,
        }
    }

    /// Create intermediate HTML files in `dir` instead of the system temp dir.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Convert `source` to a PDF at `destination` and return the path written.
    ///
    /// The intermediate HTML file is removed whether or not the backend
    /// succeeds; a failure to remove it is logged and otherwise ignored.
    pub async fn convert(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<PathBuf, ConvertError> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        if !source.exists() {
            return Err(ConvertError::InputNotFound {
                path: source.to_path_buf(),
            });
        }

        info!("Rendering \"{}\"", source.display().to_string().green());

        let markdown = fs::read_to_string(source)
            .await
            .map_err(|e| ConvertError::ReadInput {
                path: source.to_path_buf(),
                source: e,
            })?;

        let html = render(&markdown);
        debug!("Rendered {} bytes of Markdown into {} bytes of HTML", markdown.len(), html.len());

        let html_path = self.write_transient(&html)?;
        debug!("Intermediate HTML at {}", html_path.display());

        info!(
            "Converting to \"{}\" with {}",
            destination.display().to_string().blue(),
            self.backend.name()
        );

        let result = self.backend.html_file_to_pdf(&html_path, destination).await;

        let transient = html_path.to_path_buf();
        if let Err(e) = html_path.close() {
            debug!("Could not remove {}: {}", transient.display(), e);
        }

        result.map_err(|e| ConvertError::ConversionFailed {
            backend: self.backend.name(),
            reason: format!("{:#}", e),
        })?;

        Ok(destination.to_path_buf())
    }

    /// Write `html` to a uniquely named file that is deleted when the
    /// returned path is closed or dropped.
    fn write_transient(&self, html: &str) -> Result<TempPath, ConvertError> {
        let mut builder = Builder::new();
        builder.prefix("md2pdf-").suffix(".html");

        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ConvertError::TransientFile)?;

        file.write_all(html.as_bytes())
            .and_then(|_| file.flush())
            .map_err(ConvertError::TransientFile)?;

        Ok(file.into_temp_path())
    }
}

/// Convert with the platform's default backend.
pub async fn convert(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<PathBuf, ConvertError> {
    Converter::new(BackendKind::platform_default().build())
        .convert(source, destination)
        .await
}
