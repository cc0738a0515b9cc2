//! Line-oriented Markdown to HTML rendering.
//!
//! Only a small subset of Markdown is understood: `#` headings (clamped to
//! three levels), `- ` bullet items, `1. ` numbered items, paragraphs and
//! blank lines. Every input line maps to exactly one fragment, plus the
//! list open/close tags emitted when the list context changes.

use html_escape::encode_quoted_attribute;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)").unwrap());

static RE_LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]").unwrap()
});

const DOCUMENT_HEAD: &[&str] = &[
    "<!DOCTYPE html>",
    "<html>",
    "<head>",
    "<meta charset=\"utf-8\">",
    "<style>",
    "body { font-family: -apple-system, BlinkMacSystemFont, 'Helvetica Neue', Helvetica, Arial, sans-serif; \
     font-size: 12pt; margin: 48px 60px; line-height: 1.5; color: #131313; }",
    "h1, h2, h3 { font-weight: 600; }",
    "p { margin: 10px 0; }",
    "ul, ol { margin: 8px 0 8px 24px; }",
    "li { margin: 4px 0; }",
    "strong { font-weight: 600; }",
    "</style>",
    "</head>",
    "<body>",
];

const DOCUMENT_TAIL: &[&str] = &["</body>", "</html>"];

/// Rendered in place of every blank input line so spacing survives.
const BLANK_PLACEHOLDER: &str = "<p>&nbsp;</p>";

/// Deepest heading level emitted; deeper `#` runs are clamped to it.
pub const MAX_HEADING_LEVEL: u8 = 3;

fn heading_style(level: u8) -> &'static str {
    match level {
        1 => "font-size: 22px; margin-top: 28px; margin-bottom: 12px;",
        2 => "font-size: 18px; margin-top: 24px; margin-bottom: 10px;",
        _ => "font-size: 16px; margin-top: 20px; margin-bottom: 8px;",
    }
}

/// Classification of a single source line.
///
/// Text slices borrow from the source and are not yet escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    OrderedItem(&'a str),
    UnorderedItem(&'a str),
    Paragraph(&'a str),
}

/// Classify one raw line. Leading indentation carries no meaning.
pub fn classify(raw_line: &str) -> Line<'_> {
    let stripped = raw_line.trim();

    if stripped.is_empty() {
        return Line::Blank;
    }

    if stripped.starts_with('#') {
        let after_hashes = stripped.trim_start_matches('#');
        let hashes = stripped.len() - after_hashes.len();
        let level = hashes.clamp(1, MAX_HEADING_LEVEL as usize) as u8;
        return Line::Heading {
            level,
            text: after_hashes.trim(),
        };
    }

    if let Some(caps) = RE_ORDERED_ITEM.captures(stripped) {
        let text = caps.get(1).map_or("", |m| m.as_str());
        return Line::OrderedItem(text);
    }

    if let Some(rest) = stripped.strip_prefix("- ") {
        return Line::UnorderedItem(rest.trim());
    }

    Line::Paragraph(stripped)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// Per-call render state. `open_list` is `None` when no list is open, so
/// two list kinds can never be open at once.
struct HtmlWriter {
    fragments: Vec<String>,
    open_list: Option<ListKind>,
}

impl HtmlWriter {
    fn new() -> Self {
        Self {
            fragments: DOCUMENT_HEAD.iter().map(|s| s.to_string()).collect(),
            open_list: None,
        }
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.open_list.take() {
            self.fragments.push(kind.close_tag().to_string());
        }
    }

    fn ensure_list(&mut self, kind: ListKind) {
        if self.open_list == Some(kind) {
            return;
        }
        self.close_list();
        self.fragments.push(kind.open_tag().to_string());
        self.open_list = Some(kind);
    }

    fn push_line(&mut self, line: Line<'_>) {
        match line {
            Line::Blank => {
                self.close_list();
                self.fragments.push(BLANK_PLACEHOLDER.to_string());
            }
            Line::Heading { level, text } => {
                self.close_list();
                self.fragments.push(format!(
                    "<h{level} style=\"{}\">{}</h{level}>",
                    heading_style(level),
                    encode_quoted_attribute(text)
                ));
            }
            Line::OrderedItem(text) => {
                self.ensure_list(ListKind::Ordered);
                self.fragments
                    .push(format!("<li>{}</li>", encode_quoted_attribute(text)));
            }
            Line::UnorderedItem(text) => {
                self.ensure_list(ListKind::Unordered);
                self.fragments
                    .push(format!("<li>{}</li>", encode_quoted_attribute(text)));
            }
            Line::Paragraph(text) => {
                self.close_list();
                self.fragments
                    .push(format!("<p>{}</p>", encode_quoted_attribute(text)));
            }
        }
    }

    fn finish(mut self) -> String {
        self.close_list();
        self.fragments
            .extend(DOCUMENT_TAIL.iter().map(|s| s.to_string()));
        self.fragments.join("\n")
    }
}

/// Split on every line boundary: `\n`, `\r\n`, a lone `\r`, the vertical
/// tab and form feed, the `\x1c`..`\x1e` separators, NEL and the Unicode
/// line and paragraph separators. A final line break does not start an
/// extra empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = RE_LINE_BREAK.split(text).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Render a Markdown document into a standalone, styled HTML page.
///
/// Never fails: any text produces a well-formed document, and all user
/// text is escaped before it is embedded.
pub fn render(markdown: &str) -> String {
    let mut writer = HtmlWriter::new();
    for raw_line in split_lines(markdown) {
        writer.push_line(classify(raw_line));
    }
    writer.finish()
}
