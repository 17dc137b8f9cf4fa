//! Backup directory management

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use envedit_fs::{NormalizedPath, io};
use serde::Serialize;
use std::cmp::Reverse;

use crate::config::{EditorConfig, validate_timestamp_format};
use crate::{Error, Result};

/// Separator between the timestamp and the same-second sequence number
const SEQUENCE_SEPARATOR: char = '-';

/// One backup file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupInfo {
    /// Identifier passed to restore and delete
    pub id: String,
    /// Creation time, parsed from the identifier
    pub created: DateTime<Utc>,
    /// Size of the backup file in bytes
    pub size: u64,
    /// Full path of the backup file
    #[serde(serialize_with = "serialize_path")]
    pub path: NormalizedPath,
    #[serde(skip)]
    sequence: u32,
}

fn serialize_path<S: serde::Serializer>(
    path: &NormalizedPath,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(path.as_str())
}

/// Outcome of [`BackupStore::delete_all`]
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Identifiers that were removed
    pub deleted: Vec<String>,
    /// Identifiers that could not be removed, with the reason
    pub failed: Vec<(String, Error)>,
}

impl DeleteReport {
    /// Whether every backup was removed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Creates, lists, reads and deletes backups in one directory.
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: NormalizedPath,
    prefix: String,
    timestamp_format: String,
    create_dir: bool,
}

impl BackupStore {
    /// Build a store from the backup settings of `config`.
    pub fn from_config(config: &EditorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dir: config.backup_path(),
            prefix: config.backup_prefix.clone(),
            timestamp_format: config.timestamp_format.clone(),
            create_dir: config.create_backup_dir,
        })
    }

    pub fn new(
        dir: impl Into<NormalizedPath>,
        prefix: impl Into<String>,
        timestamp_format: impl Into<String>,
    ) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.contains(['/', '\\']) {
            return Err(Error::invalid_config(format!(
                "backup prefix {prefix:?} must not contain path separators"
            )));
        }
        let timestamp_format = timestamp_format.into();
        validate_timestamp_format(&timestamp_format)?;
        Ok(Self {
            dir: dir.into(),
            prefix,
            timestamp_format,
            create_dir: true,
        })
    }

    pub fn dir(&self) -> &NormalizedPath {
        &self.dir
    }

    /// Snapshot `content` under an identifier derived from the current time.
    pub fn create(&self, content: &[u8]) -> Result<BackupInfo> {
        self.create_at(content, Utc::now())
    }

    /// Snapshot `content` as if taken at `now`.
    pub fn create_at(&self, content: &[u8], now: DateTime<Utc>) -> Result<BackupInfo> {
        if self.create_dir {
            io::ensure_dir(&self.dir).map_err(|e| Error::write(self.dir.to_native(), e))?;
        } else if !self.dir.is_dir() {
            return Err(Error::write(
                self.dir.to_native(),
                envedit_fs::Error::NotFound {
                    path: self.dir.to_native(),
                },
            ));
        }

        // Identifiers keep whole seconds only
        let timestamp = now.naive_utc().with_nanosecond(0).unwrap_or(now.naive_utc());
        let stamp = timestamp.format(&self.timestamp_format).to_string();

        let taken = self
            .scan()?
            .into_iter()
            .filter(|b| b.created.naive_utc() == timestamp)
            .map(|b| b.sequence)
            .max();
        let (id, sequence) = match taken {
            None => (stamp, 0),
            Some(last) => (format!("{stamp}{SEQUENCE_SEPARATOR}{}", last + 1), last + 1),
        };

        let path = self.path_for(&id);
        io::write_atomic(&path, content).map_err(|e| Error::write(path.to_native(), e))?;
        tracing::info!(%id, path = %path, "Created backup");

        Ok(BackupInfo {
            id,
            created: timestamp.and_utc(),
            size: content.len() as u64,
            path,
            sequence,
        })
    }

    /// All backups, most recent first.
    pub fn list(&self) -> Result<Vec<BackupInfo>> {
        let mut backups = self.scan()?;
        backups.sort_by_key(|b| Reverse((b.created, b.sequence)));
        Ok(backups)
    }

    /// The most recent backup, if any.
    pub fn latest(&self) -> Result<Option<BackupInfo>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Look up one backup by identifier.
    pub fn get(&self, id: &str) -> Result<BackupInfo> {
        let not_found = || Error::BackupNotFound { id: id.to_string() };
        let (created, sequence) = self.parse_id(id).ok_or_else(not_found)?;
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(not_found());
        }
        let size = io::file_size(&path).map_err(|e| Error::read(path.to_native(), e))?;
        Ok(BackupInfo {
            id: id.to_string(),
            created: created.and_utc(),
            size,
            path,
            sequence,
        })
    }

    /// Content of a backup.
    pub fn read(&self, id: &str) -> Result<Vec<u8>> {
        let backup = self.get(id)?;
        io::read_bytes(&backup.path).map_err(|e| match e {
            e if e.is_not_found() => Error::BackupNotFound { id: id.to_string() },
            e => Error::read(backup.path.to_native(), e),
        })
    }

    /// Remove one backup.
    pub fn delete(&self, id: &str) -> Result<()> {
        let backup = self.get(id)?;
        io::remove_file(&backup.path).map_err(|e| match e {
            e if e.is_not_found() => Error::BackupNotFound { id: id.to_string() },
            e => Error::write(backup.path.to_native(), e),
        })?;
        tracing::info!(%id, "Deleted backup");
        Ok(())
    }

    /// Remove every backup, continuing past individual failures.
    pub fn delete_all(&self) -> Result<DeleteReport> {
        Ok(Self::remove_each(self.list()?))
    }

    fn remove_each(backups: Vec<BackupInfo>) -> DeleteReport {
        let mut report = DeleteReport::default();
        for backup in backups {
            match io::remove_file(&backup.path) {
                Ok(()) => report.deleted.push(backup.id),
                Err(e) => {
                    tracing::warn!(id = %backup.id, error = %e, "Failed to delete backup");
                    report
                        .failed
                        .push((backup.id, Error::write(backup.path.to_native(), e)));
                }
            }
        }
        tracing::info!(
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "Deleted all backups"
        );
        report
    }

    fn path_for(&self, id: &str) -> NormalizedPath {
        self.dir.join(&format!("{}{}", self.prefix, id))
    }

    /// Every file in the directory that carries a well-formed identifier.
    fn scan(&self) -> Result<Vec<BackupInfo>> {
        let names =
            io::list_file_names(&self.dir).map_err(|e| Error::read(self.dir.to_native(), e))?;

        let mut backups = Vec::new();
        for name in names {
            let Some(id) = name.strip_prefix(self.prefix.as_str()) else {
                continue;
            };
            let Some((created, sequence)) = self.parse_id(id) else {
                continue;
            };
            let path = self.dir.join(&name);
            let size = io::file_size(&path).map_err(|e| Error::read(path.to_native(), e))?;
            backups.push(BackupInfo {
                id: id.to_string(),
                created: created.and_utc(),
                size,
                path,
                sequence,
            });
        }
        Ok(backups)
    }

    /// Split an identifier into its timestamp and sequence number.
    ///
    /// Only canonical identifiers are accepted: the timestamp part must
    /// format back to exactly the same text.
    fn parse_id(&self, id: &str) -> Option<(NaiveDateTime, u32)> {
        if id.is_empty() || id.contains(['/', '\\']) {
            return None;
        }
        if let Some(timestamp) = self.parse_stamp(id) {
            return Some((timestamp, 0));
        }

        let (stamp, sequence) = id.rsplit_once(SEQUENCE_SEPARATOR)?;
        if sequence.is_empty() || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let sequence: u32 = sequence.parse().ok()?;
        if sequence == 0 || sequence.to_string().len() != id.len() - stamp.len() - 1 {
            return None;
        }
        Some((self.parse_stamp(stamp)?, sequence))
    }

    fn parse_stamp(&self, stamp: &str) -> Option<NaiveDateTime> {
        let timestamp = NaiveDateTime::parse_from_str(stamp, &self.timestamp_format).ok()?;
        (timestamp.format(&self.timestamp_format).to_string() == stamp).then_some(timestamp)
    }
}
