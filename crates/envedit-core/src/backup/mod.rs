//! Timestamped backups of the live env file
//!
//! Each backup is one file in the backup directory named
//! `{prefix}{identifier}`. The identifier is the UTC creation time rendered
//! with the configured chrono format, plus a `-N` suffix when several backups
//! are taken within the same second. Listing parses the timestamp back out of
//! the identifier, so no metadata file is kept next to the backups.

mod store;

pub use store::{BackupInfo, BackupStore, DeleteReport};
