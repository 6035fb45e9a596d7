//! # Error Types

/// Errors from seqprep operations.
#[derive(Debug, thiserror::Error)]
pub enum SeqprepError {
    /// Incompatible configuration.
    ///
    /// Covers out-of-vocabulary lookups against a vocabulary with no
    /// reserved unknown token, unsupported raw file formats, and
    /// mismatched aligned-stream lengths.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed persisted vocabulary or dataset JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Detokenization index outside the vocabulary range.
    #[error("index {index} out of range for vocabulary of size {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,

        /// The vocabulary size.
        len: usize,
    },

    /// A dataset build was requested before the named vocabulary was fit.
    #[error("vocabulary not built: {0}")]
    VocabularyNotBuilt(&'static str),

    /// Unrecognized task tag in the loading facade.
    #[error("unknown task kind: {0:?}")]
    UnknownTaskKind(String),
}

/// Result type for seqprep operations.
pub type Result<T> = core::result::Result<T, SeqprepError>;
