use std::path::PathBuf;

/// Convenience result type used across framereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the animation pipeline.
///
/// Every variant is fatal to the run it came from; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided options or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Two datasets declaring the animation dimension disagree on its extent.
    #[error(
        "dimension mismatch: dataset {dataset} has {found} entries along '{dim}', expected {expected}"
    )]
    DimensionMismatch {
        /// Animation dimension name.
        dim: String,
        /// Extent taken from the first dataset declaring `dim`.
        expected: usize,
        /// Extent of the offending dataset.
        found: usize,
        /// Position of the offending dataset in the input sequence.
        dataset: usize,
    },

    /// A selection index fell outside a dimension's extent.
    #[error("index out of range: index {index} along '{dim}' (len {len})")]
    IndexOutOfRange {
        /// Dimension being indexed.
        dim: String,
        /// Requested index.
        index: usize,
        /// Extent of the dimension.
        len: usize,
    },

    /// The frame function broke its contract (wrong arity, or a frame that cannot be rasterized).
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// The transient frame directory could not be created.
    #[error("failed to create frame directory '{}': {source}", path.display())]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A rendered frame could not be written into the transient store.
    #[error("persist error: {0}")]
    Persist(String),

    /// Frame decoding, animation encoding, or committing the artifact failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The frame function returned an error for a keyframe.
    #[error("render error at keyframe {keyframe}: {source}")]
    Render {
        /// Keyframe being rendered when the frame function failed.
        keyframe: usize,
        /// Error reported by the frame function.
        #[source]
        source: anyhow::Error,
    },

    /// The transient frame directory could not be removed.
    ///
    /// `primary` carries the run's own failure when cleanup ran on the error path.
    #[error("{}", cleanup_message(dir, source, primary.as_deref()))]
    Cleanup {
        /// Directory left behind on disk.
        dir: PathBuf,
        /// IO error reported while removing `dir`.
        #[source]
        source: std::io::Error,
        /// Error that ended the run before cleanup, if any.
        primary: Option<Box<ReelError>>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn cleanup_message(
    dir: &std::path::Path,
    source: &std::io::Error,
    primary: Option<&ReelError>,
) -> String {
    match primary {
        Some(primary) => format!(
            "cleanup error: frame directory '{}' was left behind ({source}) after run failed: {primary}",
            dir.display()
        ),
        None => format!(
            "cleanup error: frame directory '{}' was left behind: {source}",
            dir.display()
        ),
    }
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::ContractViolation`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    /// Build a [`ReelError::Persist`] value.
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::Persist(msg.into())
    }

    /// Build a [`ReelError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Whether this error means temporary files were left on disk.
    pub fn leaked_temp_state(&self) -> bool {
        matches!(self, Self::Cleanup { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
