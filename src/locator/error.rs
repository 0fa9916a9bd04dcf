//! Locator-specific error type.
//!
//! Mirrors the shape of [`crate::error::Error`] (a single `thiserror`-derived enum
//! plus a `Result<T>` alias) but names the three failure kinds the locator's own
//! contract distinguishes, rather than reusing the engine's general-purpose error
//! verbatim.

/// Result type alias for locator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating evidence in a PDF.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The PDF could not be opened or parsed while building the line index.
    /// Propagated to the caller verbatim; never recovered locally.
    #[error("failed to build the PDF line index: {0}")]
    IndexBuildFailure(#[from] crate::error::Error),

    /// The PDF engine's text search failed during highlight resolution.
    ///
    /// Never returned by [`crate::locator::locate_evidence`] — absorbed at the
    /// call site (logged at `warn`, mapped to the winning line's own rectangle).
    /// Named here so the resolver's internal plumbing can talk about the failure
    /// without reaching back into the engine's error type.
    #[error("highlight search failed: {0}")]
    HighlightSearchFailure(crate::error::Error),

    /// The PDF's line index is empty; no text was extractable.
    ///
    /// Never returned as an `Err` by `locate_evidence` either — it resolves to a
    /// `LocatorResult` with `status = unresolved` instead. Declared for
    /// completeness of the error-kind contract, matching `MatchMethod::Manual`'s
    /// "reserved, never constructed" treatment.
    #[error("PDF has no extractable text")]
    NoIndex,
}
