//! Error adapter for converting CrawlmapError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use crawlmap::{CrawlmapError, GraphError};

/// Adapter that renders a [`CrawlmapError`] through miette.
///
/// Each variant gets a stable diagnostic code and, where the fix is
/// obvious, a help line.
pub struct ErrorAdapter<'a>(pub &'a CrawlmapError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CrawlmapError::Io(_) => "crawlmap::io",
            CrawlmapError::Json(_) => "crawlmap::json",
            CrawlmapError::Graph(_) => "crawlmap::graph",
            CrawlmapError::Config(_) => "crawlmap::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CrawlmapError::Io(_) => return None,
            CrawlmapError::Json(err) => format!(
                "expected an object with `nodes` and `edges` arrays (line {}, column {})",
                err.line(),
                err.column()
            ),
            CrawlmapError::Graph(GraphError::DuplicateNode(_)) => {
                "every page must have a distinct primary key".to_string()
            }
            CrawlmapError::Graph(GraphError::UnknownNode { .. }) => {
                "links may only reference pages listed under `nodes`".to_string()
            }
            CrawlmapError::Config(_) => {
                "layout parameters must be positive and the viewport non-negative".to_string()
            }
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`CrawlmapError`] into a reportable error.
pub fn to_reportable(err: &CrawlmapError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
