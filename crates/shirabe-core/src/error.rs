use thiserror::Error;

/// Errors that can occur while configuring or running episode resolution.
///
/// Note that "this path is not an episode" is never an error: the resolver
/// reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ShirabeError {
    /// The caller passed an argument that can never be resolved (e.g. an empty path).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configured expression failed to compile.
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The naming options are structurally valid JSON but semantically unusable.
    #[error("invalid naming options: {0}")]
    InvalidOptions(String),

    /// The naming options could not be deserialized.
    #[error("failed to parse naming options: {0}")]
    Config(#[from] serde_json::Error),

    /// The naming options file could not be read.
    #[error("failed to read naming options: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Shirabe operations.
pub type Result<T> = std::result::Result<T, ShirabeError>;
