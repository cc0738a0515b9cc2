//! # md2pdf
//!
//! A CLI utility to turn lightweight Markdown notes into styled PDF files.
//!
//! ## Current Features
//!
//! - Headings (`#`, `##`, `###`), bullet and numbered lists, paragraphs
//! - Blank lines kept as visible spacing
//! - PDF output through macOS `textutil` or headless Chromium
//!
//! ## Usage
//!
//! ```bash
//! md2pdf notes.md notes.pdf --backend chromium
//! ```

mod backend;
mod chromium;
mod converter;
mod error;
mod renderer;
mod textutil;

pub use backend::{BackendKind, PdfBackend};
pub use chromium::{ChromiumBackend, PdfOptions};
pub use converter::{convert, Converter};
pub use error::ConvertError;
pub use renderer::{classify, render, Line, MAX_HEADING_LEVEL};
pub use textutil::TextutilBackend;
