//! Error types for envedit-core

use std::path::PathBuf;

/// Result type for envedit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in envedit-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: envedit_content::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: envedit_fs::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: envedit_fs::Error,
    },

    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Invalid key {key:?}: keys must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidKey { key: String },

    #[error("Backup not found: {id}")]
    BackupNotFound { id: String },

    #[error("No backups available in {dir}")]
    NoBackups { dir: PathBuf },

    #[error("No env file is loaded")]
    NotLoaded,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to load configuration: {0}")]
    Config(#[source] envedit_fs::Error),
}

impl Error {
    /// Map a read failure, reporting a missing file as [`Error::FileNotFound`].
    pub fn read(path: impl Into<PathBuf>, source: envedit_fs::Error) -> Self {
        let path = path.into();
        if source.is_not_found() {
            Self::FileNotFound { path }
        } else {
            Self::Read { path, source }
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: envedit_fs::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    fn from_content(path: PathBuf, source: envedit_content::Error) -> Self {
        match source {
            envedit_content::Error::InvalidKey { key } => Self::InvalidKey { key },
            source => Self::Parse { path, source },
        }
    }
}

/// Attach the file a content error came from.
pub(crate) trait ContentResultExt<T> {
    fn in_file(self, path: &envedit_fs::NormalizedPath) -> Result<T>;
}

impl<T> ContentResultExt<T> for envedit_content::Result<T> {
    fn in_file(self, path: &envedit_fs::NormalizedPath) -> Result<T> {
        self.map_err(|e| Error::from_content(path.to_native(), e))
    }
}
