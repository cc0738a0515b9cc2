use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::PdfBackend;

/// Converts through the `textutil` command that ships with macOS.
#[derive(Debug, Clone)]
pub struct TextutilBackend {
    program: String,
}

impl TextutilBackend {
    pub fn new() -> Self {
        Self::with_program("textutil")
    }

    /// Use a different executable with the same command-line contract.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, html_path: &Path, pdf_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-convert")
            .arg("pdf")
            .arg(html_path)
            .arg("-output")
            .arg(pdf_path);
        cmd
    }
}

impl Default for TextutilBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PdfBackend for TextutilBackend {
    fn name(&self) -> &'static str {
        "textutil"
    }

    async fn html_file_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<()> {
        debug!("Running {} on {}", self.program, html_path.display());

        let status = self
            .command(html_path, pdf_path)
            .status()
            .await
            .map_err(|e| anyhow!("Failed to run {}: {}", self.program, e))?;

        if !status.success() {
            return Err(anyhow!("{} exited with {}", self.program, status));
        }

        Ok(())
    }
}
