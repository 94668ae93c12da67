use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures a sweep can produce.
///
/// The variants are the sweep's distinct error channels: `Pattern` and
/// `Age` surface from option compilation before any I/O happens, `Fatal`
/// terminates the stream, and `Skipped` is the per-entry channel that
/// traversal logs and drops without ever surfacing it to the caller.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A single-string `files`/`dirs` pattern did not compile under
    /// `regex: true`.
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// `age_seconds` must be a finite, non-negative number.
    #[error("invalid age_seconds {value}: must be a finite, non-negative number")]
    Age { value: f64 },

    /// Listing or inspecting a directory failed for a reason other than
    /// plain absence.
    #[error("cannot traverse {}: {source}", path.display())]
    Fatal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A child entry vanished or could not be inspected between listing
    /// and stat; traversal skips it.
    #[error("skipped {}: {source}", path.display())]
    Skipped {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
