//! The env file editor
//!
//! An [`Editor`] starts unloaded, loads one file into a [`Document`], applies
//! edits in memory and writes them back on [`Editor::save`]. Backups always
//! snapshot what is on disk, never unsaved edits.
//!
//! The editor holds no lock: callers sharing one instance serialize access
//! themselves, and a concurrent external writer of the same file can be
//! overwritten by `save` (last writer wins).

use envedit_content::{Document, Entry, Keys, SetOutcome, TypedValue, is_valid_key};
use envedit_fs::{NormalizedPath, io};

use crate::backup::{BackupInfo, BackupStore, DeleteReport};
use crate::config::EditorConfig;
use crate::error::ContentResultExt;
use crate::{Error, Result};

/// Key-level editor for one env file.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    path: NormalizedPath,
    backups: BackupStore,
    document: Option<Document>,
}

impl Editor {
    /// Create an unloaded editor for the files named in `config`.
    pub fn new(config: EditorConfig) -> Result<Self> {
        let backups = BackupStore::from_config(&config)?;
        Ok(Self {
            path: config.env_path(),
            config,
            backups,
            document: None,
        })
    }

    /// Create an editor and load the configured env file.
    pub fn open(config: EditorConfig) -> Result<Self> {
        let mut editor = Self::new(config)?;
        editor.reload()?;
        Ok(editor)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Path of the live env file.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Whether the loaded document has unsaved edits.
    pub fn is_modified(&self) -> bool {
        self.document.as_ref().is_some_and(Document::is_modified)
    }

    /// Load `path`, making it the live file for later saves and restores.
    pub fn load(&mut self, path: impl Into<NormalizedPath>) -> Result<&Document> {
        let path = path.into();
        let document = read_document(&path)?;
        tracing::debug!(path = %path, lines = document.len(), "Loaded env file");
        self.path = path;
        Ok(self.document.insert(document))
    }

    /// Re-read the live file, discarding unsaved edits.
    pub fn reload(&mut self) -> Result<&Document> {
        let path = self.path.clone();
        self.load(path)
    }

    /// The loaded document.
    pub fn document(&self) -> Result<&Document> {
        self.document.as_ref().ok_or(Error::NotLoaded)
    }

    fn document_mut(&mut self) -> Result<&mut Document> {
        self.document.as_mut().ok_or(Error::NotLoaded)
    }

    /// `(key, value)` pairs in file order, first occurrence per key.
    ///
    /// The iterator borrows the in-memory document; call again to restart.
    pub fn get_keys(&self) -> Result<Keys<'_>> {
        Ok(self.document()?.keys())
    }

    pub fn get_entry(&self, key: &str) -> Result<&Entry> {
        self.document()?.get(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Raw string value of `key`.
    pub fn get_value(&self, key: &str) -> Result<&str> {
        Ok(self.get_entry(key)?.value.as_str())
    }

    /// Value of `key` with `true`/`false`/`null` cast to native values.
    pub fn get_typed(&self, key: &str) -> Result<TypedValue> {
        Ok(TypedValue::from_raw(self.get_value(key)?))
    }

    pub fn key_exists(&self, key: &str) -> Result<bool> {
        Ok(self.document()?.contains_key(key))
    }

    /// Set `key`, in place if it exists, appended otherwise. Nothing is
    /// written until [`Editor::save`].
    pub fn set_key(&mut self, key: &str, value: &str, comment: Option<&str>) -> Result<SetOutcome> {
        let path = self.path.clone();
        let outcome = self.document_mut()?.set(key, value, comment).in_file(&path)?;
        tracing::debug!(key, ?outcome, "Set key");
        Ok(outcome)
    }

    /// Set several keys. Every key is validated before any is applied.
    pub fn set_keys<'a, I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<_> = pairs.into_iter().collect();
        if let Some((key, _)) = pairs.iter().find(|(key, _)| !is_valid_key(key)) {
            return Err(Error::InvalidKey {
                key: key.to_string(),
            });
        }
        for (key, value) in pairs {
            self.set_key(key, value, None)?;
        }
        Ok(())
    }

    /// Remove `key` from the document.
    pub fn delete_key(&mut self, key: &str) -> Result<()> {
        let removed = self.document_mut()?.remove(key);
        if removed == 0 {
            return Err(Error::KeyNotFound {
                key: key.to_string(),
            });
        }
        tracing::debug!(key, removed, "Deleted key");
        Ok(())
    }

    /// Remove several keys. Fails without removing anything if one is absent.
    pub fn delete_keys(&mut self, keys: &[&str]) -> Result<()> {
        let document = self.document()?;
        if let Some(missing) = keys.iter().find(|key| !document.contains_key(key)) {
            return Err(Error::KeyNotFound {
                key: missing.to_string(),
            });
        }
        for key in keys {
            self.document_mut()?.remove(key);
        }
        Ok(())
    }

    pub fn add_comment(&mut self, text: &str) -> Result<()> {
        self.document_mut()?.add_comment(text);
        Ok(())
    }

    pub fn add_blank(&mut self) -> Result<()> {
        self.document_mut()?.add_blank();
        Ok(())
    }

    /// Write the document over the live file.
    ///
    /// With `auto_backup` enabled the current on-disk content is backed up
    /// first. After saving, the document reflects the written text.
    pub fn save(&mut self) -> Result<()> {
        let content = self.document()?.render();

        if self.config.auto_backup && self.path.is_file() {
            self.backup()?;
        }

        io::write_text(&self.path, &content).map_err(|e| Error::write(self.path.to_native(), e))?;
        tracing::debug!(path = %self.path, bytes = content.len(), "Saved env file");

        self.document = Some(Document::parse(&content));
        Ok(())
    }

    /// Snapshot the saved live file, returning the backup identifier.
    pub fn backup(&self) -> Result<String> {
        let content =
            io::read_bytes(&self.path).map_err(|e| Error::read(self.path.to_native(), e))?;
        Ok(self.backups.create(&content)?.id)
    }

    /// `(identifier, timestamp, size)` of every backup, most recent first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        self.backups.list()
    }

    pub fn latest_backup(&self) -> Result<Option<BackupInfo>> {
        self.backups.latest()
    }

    /// Copy a backup over the live file and reload it. The backup is kept.
    pub fn restore(&mut self, id: &str) -> Result<&Document> {
        let content = self.backups.read(id)?;
        io::write_atomic(&self.path, &content)
            .map_err(|e| Error::write(self.path.to_native(), e))?;
        tracing::info!(%id, path = %self.path, "Restored backup");
        self.reload()
    }

    /// Restore the most recent backup, returning its identifier.
    pub fn restore_latest(&mut self) -> Result<String> {
        let latest = self.backups.latest()?.ok_or_else(|| Error::NoBackups {
            dir: self.backups.dir().to_native(),
        })?;
        self.restore(&latest.id)?;
        Ok(latest.id)
    }

    pub fn delete_backup(&self, id: &str) -> Result<()> {
        self.backups.delete(id)
    }

    /// Delete every backup; failures are collected in the report.
    pub fn delete_all_backups(&self) -> Result<DeleteReport> {
        self.backups.delete_all()
    }
}

fn read_document(path: &NormalizedPath) -> Result<Document> {
    let bytes = io::read_bytes(path).map_err(|e| Error::read(path.to_native(), e))?;
    Document::from_bytes(&bytes).in_file(path)
}
