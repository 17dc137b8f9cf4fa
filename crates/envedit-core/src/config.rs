//! Editor configuration

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write as _;
use envedit_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Default prefix of backup file names
pub const DEFAULT_BACKUP_PREFIX: &str = ".env.backup_";

/// Default chrono format of the timestamp part of backup identifiers
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// Where the live env file and its backups are, and how backups are named.
///
/// Deserializable so it can be read from a TOML, JSON or YAML file with
/// [`EditorConfig::load`]; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Path to the live env file
    pub env_file: PathBuf,
    /// Directory holding one file per backup
    pub backup_dir: PathBuf,
    /// File name prefix put in front of every backup identifier
    pub backup_prefix: String,
    /// chrono strftime format for the timestamp part of identifiers (UTC)
    pub timestamp_format: String,
    /// Back up the on-disk file before every save
    pub auto_backup: bool,
    /// Create the backup directory when it does not exist yet
    pub create_backup_dir: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(".env"),
            backup_dir: PathBuf::from("storage/dotenv-editor/backups"),
            backup_prefix: DEFAULT_BACKUP_PREFIX.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            auto_backup: false,
            create_backup_dir: true,
        }
    }
}

impl EditorConfig {
    pub fn new(env_file: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            env_file: env_file.into(),
            backup_dir: backup_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_backup_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.backup_prefix = prefix.into();
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn with_auto_backup(mut self, enabled: bool) -> Self {
        self.auto_backup = enabled;
        self
    }

    pub fn with_create_backup_dir(mut self, enabled: bool) -> Self {
        self.create_backup_dir = enabled;
        self
    }

    /// Read a config file; the format follows the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = NormalizedPath::new(path);
        let config: Self = ConfigStore::new().load(&path).map_err(Error::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn env_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.env_file)
    }

    pub fn backup_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.backup_dir)
    }

    /// Check that backups can be named and listed back.
    pub fn validate(&self) -> Result<()> {
        if self.env_file.as_os_str().is_empty() {
            return Err(Error::invalid_config("env_file must not be empty"));
        }
        if self.backup_prefix.contains(['/', '\\']) {
            return Err(Error::invalid_config(format!(
                "backup_prefix {:?} must not contain path separators",
                self.backup_prefix
            )));
        }
        validate_timestamp_format(&self.timestamp_format)
    }
}

/// A timestamp format is usable when it resolves to the second and formats
/// into a single path component.
pub fn validate_timestamp_format(format: &str) -> Result<()> {
    if format.is_empty() {
        return Err(Error::invalid_config("timestamp_format must not be empty"));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::invalid_config(format!(
            "timestamp_format {format:?} is not a valid strftime format"
        )));
    }

    let sample = NaiveDate::from_ymd_opt(2001, 2, 3)
        .and_then(|d| d.and_hms_opt(4, 5, 6))
        .ok_or_else(|| Error::invalid_config("sample timestamp out of range"))?;
    // Zone specifiers parse as valid items but fail to render without an offset
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(format)).is_err() {
        return Err(Error::invalid_config(format!(
            "timestamp_format {format:?} cannot be rendered for a UTC timestamp without zone"
        )));
    }

    if rendered.contains(['/', '\\']) {
        return Err(Error::invalid_config(format!(
            "timestamp_format {format:?} produces path separators"
        )));
    }
    match chrono::NaiveDateTime::parse_from_str(&rendered, format) {
        Ok(parsed) if parsed == sample => Ok(()),
        _ => Err(Error::invalid_config(format!(
            "timestamp_format {format:?} must encode date and time down to the second"
        ))),
    }
}
