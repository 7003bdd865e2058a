//! Diff rendering to the console or to timestamped files.
//!
//! File names follow `{timestamp}_{slugified-url}.{ext}` so a directory of
//! diffs sorts chronologically and stays filesystem-safe regardless of the
//! URL. Console rendering has no failure mode; file writes can fail and
//! the engine logs that without failing the endpoint.

use std::path::PathBuf;

use chrono::Local;

use crate::diff::{DiffFormat, RenderedDiff};
use driftwatch_core::Error;

/// Where a rendered diff goes.
#[derive(Debug, Clone)]
pub enum Destination {
    /// Print an identifying line plus the diff body to stdout.
    Console,
    /// Write a timestamped file into this directory.
    Directory(PathBuf),
}

/// Render a diff for an endpoint to the given destination.
pub fn render(url: &str, diff: &RenderedDiff, destination: &Destination) -> Result<(), Error> {
    match destination {
        Destination::Console => {
            println!("[{url}] {}b diff:", diff.byte_delta);
            print!("{}", diff.body);
            Ok(())
        }
        Destination::Directory(dir) => {
            let filename = format!(
                "{}_{}.{}",
                Local::now().format("%Y%m%d-%H%M%S"),
                slug::slugify(url),
                diff.format.extension()
            );
            let path = dir.join(filename);

            let contents = match diff.format {
                DiffFormat::Text => format!("[{url}] {}b diff:\n{}", diff.byte_delta, diff.body),
                DiffFormat::Html => html_document(url, diff),
            };

            std::fs::write(&path, contents).map_err(|e| Error::Render(format!("{}: {e}", path.display())))
        }
    }
}

/// Wrap an HTML diff fragment in a minimal standalone page.
fn html_document(url: &str, diff: &RenderedDiff) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{url}</title>\n\
         <style>\n\
         .diff {{ font-family: monospace; white-space: pre; }}\n\
         .ins {{ background: #e6ffec; }}\n\
         .del {{ background: #ffebe9; }}\n\
         .meta {{ color: #656d76; }}\n\
         </style>\n</head>\n<body>\n<p>[{url}] {delta}b diff:</p>\n{body}</body>\n</html>\n",
        delta = diff.byte_delta,
        body = diff.body,
    )
}
