//! Integration tests for the conversion pipeline.
//!
//! A fake backend stands in for the PDF renderer so these run anywhere;
//! it records the HTML it was handed and either writes a stub PDF or fails.

use anyhow::anyhow;
use async_trait::async_trait;
use md2pdf::{ConvertError, Converter, PdfBackend};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Calls {
    html_paths: Vec<PathBuf>,
    html: Vec<String>,
}

struct FakeBackend {
    succeed: bool,
    calls: Arc<Mutex<Calls>>,
}

#[async_trait]
impl PdfBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn html_file_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> anyhow::Result<()> {
        let html = std::fs::read_to_string(html_path)?;
        {
            let mut calls = self.calls.lock().unwrap();
            calls.html_paths.push(html_path.to_path_buf());
            calls.html.push(html);
        }
        if self.succeed {
            std::fs::write(pdf_path, b"%PDF-1.4\n%fake\n")?;
            Ok(())
        } else {
            Err(anyhow!("renderer exited with status 1"))
        }
    }
}

struct Fixture {
    dir: TempDir,
    scratch: PathBuf,
    calls: Arc<Mutex<Calls>>,
    converter: Converter,
}

fn fixture(succeed: bool) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let scratch = dir.path().join("scratch");
    std::fs::create_dir(&scratch).unwrap();
    let calls = Arc::new(Mutex::new(Calls::default()));
    let backend = FakeBackend {
        succeed,
        calls: calls.clone(),
    };
    let converter = Converter::new(Box::new(backend)).with_temp_dir(&scratch);
    Fixture {
        dir,
        scratch,
        calls,
        converter,
    }
}

fn scratch_is_empty(f: &Fixture) -> bool {
    std::fs::read_dir(&f.scratch).unwrap().next().is_none()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn converts_and_reports_destination() {
    let f = fixture(true);
    let source = f.dir.path().join("notes.md");
    let destination = f.dir.path().join("notes.pdf");
    std::fs::write(&source, "# Title\n\nHello world.\n").unwrap();

    let written = f.converter.convert(&source, &destination).await.unwrap();

    assert_eq!(written, destination);
    assert!(std::fs::read(&destination).unwrap().starts_with(b"%PDF"));

    let calls = f.calls.lock().unwrap();
    assert_eq!(calls.html.len(), 1);
    let html = &calls.html[0];
    assert!(html.contains(">Title</h1>"), "{html}");
    assert!(html.contains("<p>&nbsp;</p>"), "{html}");
    assert!(html.contains("<p>Hello world.</p>"), "{html}");

    let transient = &calls.html_paths[0];
    assert!(transient.starts_with(&f.scratch));
    assert!(!transient.exists(), "intermediate HTML left behind");
    assert!(scratch_is_empty(&f));
}

#[tokio::test]
async fn missing_source_does_not_touch_backend() {
    let f = fixture(true);
    let source = f.dir.path().join("missing.md");
    let destination = f.dir.path().join("out.pdf");

    let err = f.converter.convert(&source, &destination).await.unwrap_err();

    match err {
        ConvertError::InputNotFound { path } => assert_eq!(path, source),
        other => panic!("expected InputNotFound, got {other:?}"),
    }
    assert!(f.calls.lock().unwrap().html.is_empty());
    assert!(scratch_is_empty(&f));
    assert!(!destination.exists());
}

#[tokio::test]
async fn backend_failure_is_reported_and_cleaned_up() {
    let f = fixture(false);
    let source = f.dir.path().join("list.md");
    let destination = f.dir.path().join("list.pdf");
    std::fs::write(&source, "- a\n- b\n1. c\n").unwrap();

    let err = f.converter.convert(&source, &destination).await.unwrap_err();

    match &err {
        ConvertError::ConversionFailed { backend, reason } => {
            assert_eq!(*backend, "fake");
            assert!(reason.contains("status 1"), "got: {reason}");
        }
        other => panic!("expected ConversionFailed, got {other:?}"),
    }

    let calls = f.calls.lock().unwrap();
    assert_eq!(calls.html_paths.len(), 1);
    assert!(!calls.html_paths[0].exists(), "intermediate HTML left behind");
    assert!(scratch_is_empty(&f));
    assert!(calls.html[0].contains("</ul>\n<ol>\n<li>c</li>\n</ol>"));
}

#[tokio::test]
async fn unwritable_temp_dir_is_a_transient_file_error() {
    let f = fixture(true);
    let source = f.dir.path().join("notes.md");
    std::fs::write(&source, "text").unwrap();

    let converter = Converter::new(Box::new(FakeBackend {
        succeed: true,
        calls: f.calls.clone(),
    }))
    .with_temp_dir(f.dir.path().join("no-such-dir"));

    let err = converter
        .convert(&source, f.dir.path().join("out.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::TransientFile(_)), "got: {err:?}");
    assert!(f.calls.lock().unwrap().html.is_empty());
}

#[tokio::test]
async fn non_utf8_source_is_a_read_error() {
    let f = fixture(true);
    let source = f.dir.path().join("binary.md");
    std::fs::write(&source, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let err = f
        .converter
        .convert(&source, f.dir.path().join("out.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::ReadInput { .. }), "got: {err:?}");
    assert!(scratch_is_empty(&f));
}
