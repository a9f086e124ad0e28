use thiserror::Error;

/// Errors produced by index construction, loading, and querying.
///
/// See the crate-level documentation for the error taxonomy this type
/// implements: malformed input, corrupt persisted files, build-time
/// resource exhaustion, and invalid queries.
#[derive(Debug, Error)]
pub enum FmIndexError {
    /// The text passed to construction contains a byte outside of
    /// `{A,C,G,T}` (case-insensitive), or is otherwise not usable as input.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The query passed to a search primitive contains a byte outside of
    /// `{A,C,G,T}`, or exceeds a configured maximum length.
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// A persisted index file is inconsistent, truncated, or otherwise
    /// fails the structural checks applied on load.
    #[error("corrupt persisted file: {0}")]
    CorruptFile(String),

    /// Construction could not proceed, e.g. due to allocation failure
    /// while building a component.
    #[error("index build failed in {component}: {reason}")]
    Build {
        component: &'static str,
        reason: String,
    },

    /// An I/O error while reading or writing persisted artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
