use std::path::PathBuf;

use thiserror::Error;

/// Error taxonomy for the analytics core.
///
/// Binaries wrap these in `anyhow` for reporting; the core never panics on
/// bad data and never emits NaN in place of a failed computation.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The snapshot could not be opened at all. Fatal before any analysis.
    #[error("cannot open database at {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    /// A query failed (missing table/column, malformed statement). Fatal to
    /// the run; there is no per-analysis isolation.
    #[error("{what}: {source}")]
    Query {
        what: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    /// An analysis cannot produce a meaningful value from the data it was
    /// given, e.g. outcome percentages over zero decided games.
    #[error("{what}: {reason}")]
    Computation { what: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Wraps a rusqlite error with a short description of the failed step.
    pub(crate) fn query(what: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Query { what, source }
    }
}
