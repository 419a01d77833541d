use std::path::PathBuf;
use thiserror::Error;

use super::model::QuestionScope;

#[derive(Debug, Error)]
/// Errors returned by repository implementations.
pub enum StoreError {
    /// The backing schema cannot answer queries for this scope.
    #[error("question scope not supported by this store: {scope}")]
    UnsupportedScope { scope: QuestionScope },

    /// The backend could not be reached or failed mid-query.
    #[error("store query failed: {message}")]
    QueryFailed { message: String },

    /// A snapshot file could not be read.
    #[error("failed to read snapshot '{path}': {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file was not valid JSON for the expected schema.
    #[error("failed to parse snapshot '{path}': {source}")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
