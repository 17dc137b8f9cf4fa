//! Command implementations for envedit-cli

pub mod backup;
pub mod keys;

pub use backup::{
    run_backup, run_delete_backup, run_delete_backups, run_get_backups, run_restore,
};
pub use keys::{run_delete_key, run_get, run_get_keys, run_set_key};
