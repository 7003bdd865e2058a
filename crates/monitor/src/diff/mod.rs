//! Diff computation between normalized snapshots.
//!
//! Produces a line-oriented unified diff (context 3) between the stored
//! snapshot and the freshly normalized response, with an optional
//! best-effort script reformatting pass to cut noise from minified code.

pub mod reformat;

use similar::TextDiff;

/// Rendering format for a computed diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffFormat {
    /// Plain unified diff text.
    Text,
    /// Unified diff wrapped in a minimal styled HTML page.
    Html,
}

impl DiffFormat {
    /// File extension for diffs written to a directory.
    pub fn extension(self) -> &'static str {
        match self {
            DiffFormat::Text => "diff",
            DiffFormat::Html => "html",
        }
    }
}

/// A computed diff ready for rendering.
#[derive(Debug, Clone)]
pub struct RenderedDiff {
    /// The diff body in the requested format.
    pub body: String,
    /// Absolute difference between old and new snapshot lengths, in bytes.
    pub byte_delta: usize,
    /// Format the body was rendered in.
    pub format: DiffFormat,
}

/// Diff two normalized snapshots.
///
/// `byte_delta` is computed on the raw bytes before any reformatting.
/// When `reformat` is set, both sides go through the script reformatter
/// first; the caller enables it only for script content-types.
pub fn diff_snapshots(old: &[u8], new: &[u8], reformat: bool, format: DiffFormat) -> RenderedDiff {
    let byte_delta = old.len().abs_diff(new.len());

    let mut old_text = String::from_utf8_lossy(old).into_owned();
    let mut new_text = String::from_utf8_lossy(new).into_owned();

    if reformat {
        old_text = reformat::reformat_response(&old_text);
        new_text = reformat::reformat_response(&new_text);
    }

    let diff = TextDiff::from_lines(old_text.as_str(), new_text.as_str());
    let unified = diff
        .unified_diff()
        .context_radius(3)
        .header("Original", "Current")
        .to_string();

    let body = match format {
        DiffFormat::Text => unified,
        DiffFormat::Html => html_fragment(&unified),
    };

    RenderedDiff { body, byte_delta, format }
}

/// Wrap a unified diff in a `<pre>` block with insert/delete highlighting.
fn html_fragment(unified: &str) -> String {
    let mut out = String::with_capacity(unified.len() * 2);
    out.push_str("<pre class=\"diff\">\n");

    for line in unified.lines() {
        let escaped = escape(line);
        if line.starts_with("+++") || line.starts_with("---") || line.starts_with("@@") {
            out.push_str(&format!("<span class=\"meta\">{escaped}</span>\n"));
        } else if line.starts_with('+') {
            out.push_str(&format!("<span class=\"ins\">{escaped}</span>\n"));
        } else if line.starts_with('-') {
            out.push_str(&format!("<span class=\"del\">{escaped}</span>\n"));
        } else {
            out.push_str(&escaped);
            out.push('\n');
        }
    }

    out.push_str("</pre>\n");
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_delta() {
        let old = vec![b'a'; 100];
        let new = vec![b'b'; 130];
        let diff = diff_snapshots(&old, &new, false, DiffFormat::Text);
        assert_eq!(diff.byte_delta, 30);

        let reversed = diff_snapshots(&new, &old, false, DiffFormat::Text);
        assert_eq!(reversed.byte_delta, 30);
    }

    #[test]
    fn test_unified_diff_headers_and_hunks() {
        let old = b"HTTP/1.1 200 OK\nServer: nginx\n\nhello\n";
        let new = b"HTTP/1.1 200 OK\nServer: apache\n\nhello\n";
        let diff = diff_snapshots(old, new, false, DiffFormat::Text);

        assert!(diff.body.contains("--- Original"));
        assert!(diff.body.contains("+++ Current"));
        assert!(diff.body.contains("-Server: nginx"));
        assert!(diff.body.contains("+Server: apache"));
    }

    #[test]
    fn test_unchanged_context_preserved() {
        let old = b"a\nb\nc\nd\nchanged\ne\nf\ng\n";
        let new = b"a\nb\nc\nd\nreplaced\ne\nf\ng\n";
        let diff = diff_snapshots(old, new, false, DiffFormat::Text);

        // three lines of context on each side of the hunk
        assert!(diff.body.contains(" b\n"));
        assert!(diff.body.contains(" d\n"));
        assert!(diff.body.contains(" g\n"));
    }

    #[test]
    fn test_identical_inputs_empty_diff() {
        let same = b"HTTP/1.1 200 OK\n\nbody\n";
        let diff = diff_snapshots(same, same, false, DiffFormat::Text);
        assert_eq!(diff.byte_delta, 0);
        assert!(!diff.body.contains("@@"));
    }

    #[test]
    fn test_html_format_escapes_and_highlights() {
        let old = b"HTTP/1.1 200 OK\n\n<p>old</p>\n";
        let new = b"HTTP/1.1 200 OK\n\n<p>new</p>\n";
        let diff = diff_snapshots(old, new, false, DiffFormat::Html);

        assert_eq!(diff.format, DiffFormat::Html);
        assert!(diff.body.contains("&lt;p&gt;"));
        assert!(!diff.body.contains("<p>old</p>"));
        assert!(diff.body.contains("class=\"ins\""));
        assert!(diff.body.contains("class=\"del\""));
    }

    #[test]
    fn test_extension() {
        assert_eq!(DiffFormat::Text.extension(), "diff");
        assert_eq!(DiffFormat::Html.extension(), "html");
    }

    #[test]
    fn test_reformat_applies_to_body_only() {
        let old = b"HTTP/1.1 200 OK\nContent-Type: application/javascript\n\nvar a=1;var b=2;";
        let new = b"HTTP/1.1 200 OK\nContent-Type: application/javascript\n\nvar a=1;var c=3;";
        let diff = diff_snapshots(old, new, true, DiffFormat::Text);

        // headers stay opaque: the content-type line is context, not split up
        assert!(diff.body.contains("Content-Type: application/javascript"));
        // statements were split onto their own lines, so the shared one is context
        assert!(diff.body.contains(" var a=1;"));
        assert!(diff.body.contains("-var b=2;"));
        assert!(diff.body.contains("+var c=3;"));
    }
}
