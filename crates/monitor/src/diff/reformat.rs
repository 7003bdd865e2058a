//! Best-effort script reformatting.
//!
//! Minified scripts diff as one enormous line; splitting statements back
//! out turns a one-character change into a one-line hunk. This is a
//! line-breaking pass, not a parser: it tracks string literals so it never
//! breaks inside them, and on anything it does not understand it leaves
//! the input alone. It never fails.

/// Reformat the body portion of a normalized response.
///
/// The text is split at its first blank-line boundary; everything before
/// it (status + headers) is opaque and only the portion after it is
/// reformatted. Without a blank line the input is returned unchanged.
pub fn reformat_response(text: &str) -> String {
    match text.split_once("\n\n") {
        Some((head, body)) => format!("{head}\n\n{}", reformat_script(body)),
        None => text.to_string(),
    }
}

/// Break script source into one statement per line with brace indentation.
pub fn reformat_script(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + src.len() / 4);
    let mut depth: usize = 0;
    let mut in_string: Option<char> = None;
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(quote) = in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == quote {
                in_string = None;
            }
            continue;
        }

        match c {
            '"' | '\'' | '`' => {
                in_string = Some(c);
                out.push(c);
            }
            '{' => {
                out.push(c);
                depth += 1;
                break_line(&mut out, depth, &mut chars);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                while out.ends_with(' ') {
                    out.pop();
                }
                if !out.ends_with('\n') && !out.is_empty() {
                    out.push('\n');
                }
                for _ in 0..depth {
                    out.push_str("  ");
                }
                out.push(c);
                break_line(&mut out, depth, &mut chars);
            }
            ';' => {
                out.push(c);
                break_line(&mut out, depth, &mut chars);
            }
            _ => out.push(c),
        }
    }

    out
}

/// Start a new line at the given indent, unless one already follows.
fn break_line(out: &mut String, depth: usize, chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while matches!(chars.peek(), Some(' ') | Some('\t') | Some('\n')) {
        chars.next();
    }
    if chars.peek().is_some() {
        out.push('\n');
        for _ in 0..depth {
            out.push_str("  ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_blank_line_unchanged() {
        let text = "HTTP/1.1 200 OK\nServer: nginx\n";
        assert_eq!(reformat_response(text), text);
    }

    #[test]
    fn test_response_headers_left_opaque() {
        let text = "HTTP/1.1 200 OK\nContent-Type: application/javascript\n\nvar a=1;var b=2;";
        let out = reformat_response(text);
        assert!(out.starts_with("HTTP/1.1 200 OK\nContent-Type: application/javascript\n\n"));
        assert!(out.ends_with("var a=1;\nvar b=2;"));
    }

    #[test]
    fn test_statements_split() {
        assert_eq!(reformat_script("a=1;b=2;c=3;"), "a=1;\nb=2;\nc=3;");
    }

    #[test]
    fn test_braces_indent() {
        let out = reformat_script("function f(){return 1;}g();");
        assert_eq!(out, "function f(){\n  return 1;\n}\ng();");
    }

    #[test]
    fn test_string_literals_untouched() {
        let out = reformat_script("var s=\"a;b{c}\";t();");
        assert_eq!(out, "var s=\"a;b{c}\";\nt();");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let out = reformat_script(r#"var s="a\";b";x();"#);
        assert_eq!(out, "var s=\"a\\\";b\";\nx();");
    }

    #[test]
    fn test_unbalanced_braces_no_panic() {
        let out = reformat_script("}}}{{{");
        assert!(!out.is_empty());
    }

    #[test]
    fn test_unterminated_string_no_panic() {
        let out = reformat_script("var s=\"never closed;a=1;");
        assert!(out.contains("never closed"));
    }
}
