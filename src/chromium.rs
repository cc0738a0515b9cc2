use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures_util::StreamExt;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info};
use url::Url;

use crate::PdfBackend;

/// Page setup used when Chromium prints the document.
///
/// Margins are in inches. The HTML already carries its own body margins,
/// so the printer margins default to zero.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub scale: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub print_background: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            print_background: true,
        }
    }
}

impl PdfOptions {
    fn print_params(&self) -> PrintToPdfParams {
        PrintToPdfParams {
            scale: Some(self.scale),
            margin_top: Some(self.margin_top),
            margin_right: Some(self.margin_right),
            margin_bottom: Some(self.margin_bottom),
            margin_left: Some(self.margin_left),
            print_background: Some(self.print_background),
            ..Default::default()
        }
    }
}

/// Prints the HTML file to PDF with a headless Chromium instance.
pub struct ChromiumBackend {
    pdf_options: PdfOptions,
}

impl ChromiumBackend {
    pub fn new(pdf_options: PdfOptions) -> Self {
        Self { pdf_options }
    }

    async fn print(&self, browser: &Browser, html_path: &Path, pdf_path: &Path) -> Result<()> {
        let url = file_url(html_path)?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| anyhow!("Failed to create new page: {}", e))?;

        page.goto(url.as_str())
            .await
            .map_err(|e| anyhow!("Failed to load {}: {}", url, e))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| anyhow!("Failed to wait for navigation: {}", e))?;

        let pdf_data = page
            .pdf(self.pdf_options.print_params())
            .await
            .map_err(|e| anyhow!("Failed to generate PDF: {}", e))?;

        debug!("Chromium produced {} bytes of PDF", pdf_data.len());

        fs::write(pdf_path, pdf_data)
            .await
            .map_err(|e| anyhow!("Failed to write PDF to {}: {}", pdf_path.display(), e))?;

        Ok(())
    }
}

impl Default for ChromiumBackend {
    fn default() -> Self {
        Self::new(PdfOptions::default())
    }
}

#[async_trait]
impl PdfBackend for ChromiumBackend {
    fn name(&self) -> &'static str {
        "chromium"
    }

    async fn html_file_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<()> {
        info!("Launching headless Chromium");

        let config = BrowserConfig::builder()
            .build()
            .map_err(|e| anyhow!("Failed to create browser config: {}", e))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| anyhow!("Failed to launch browser: {}", e))?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if let Err(err) = h {
                    // Chromium emits protocol messages chromiumoxide cannot decode; they are harmless.
                    let err_str = err.to_string();
                    if !err_str.contains("data did not match any variant")
                        && !err_str.contains("untagged enum Message")
                    {
                        error!("Browser handler error: {}", err);
                    } else {
                        debug!("Chrome protocol message ignored: {}", err);
                    }
                }
            }
        });

        let result = self.print(&browser, html_path, pdf_path).await;

        if let Err(e) = browser.close().await {
            debug!("Failed to close browser: {}", e);
        }
        handle.abort();

        result
    }
}

/// Absolute `file://` URL for a local path.
fn file_url(path: &Path) -> Result<Url> {
    let absolute = std::path::absolute(path)
        .map_err(|e| anyhow!("Failed to resolve {}: {}", path.display(), e))?;
    Url::from_file_path(&absolute)
        .map_err(|_| anyhow!("Cannot express {} as a file URL", absolute.display()))
}
