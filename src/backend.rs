use anyhow::Result;
use async_trait::async_trait;
use clap::ValueEnum;
use std::path::Path;

use crate::{ChromiumBackend, PdfOptions, TextutilBackend};

/// Something that can turn an HTML file on disk into a PDF file.
///
/// Implementations either write a complete PDF to `pdf_path` and return
/// `Ok(())`, or return an error with no guarantee about `pdf_path`.
#[async_trait]
pub trait PdfBackend: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    async fn html_file_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// macOS `textutil`
    Textutil,
    /// Headless Chromium through the DevTools protocol
    Chromium,
}

impl BackendKind {
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            BackendKind::Textutil
        } else {
            BackendKind::Chromium
        }
    }

    pub fn build(self) -> Box<dyn PdfBackend> {
        match self {
            BackendKind::Textutil => Box::new(TextutilBackend::new()),
            BackendKind::Chromium => Box::new(ChromiumBackend::new(PdfOptions::default())),
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::platform_default()
    }
}
