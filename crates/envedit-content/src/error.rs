//! Error types for envedit-content

/// Result type for envedit-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in envedit-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to decode env content at byte {offset}: {message}")]
    ParseError { offset: usize, message: String },

    #[error("Invalid key {key:?}: keys must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidKey { key: String },
}

impl Error {
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            offset,
            message: message.into(),
        }
    }
}
