//! Editor configuration resolution
//!
//! Settings come from an optional config file, then command-line flags and
//! environment variables override the file locations.

use envedit_core::EditorConfig;

use crate::cli::FileArgs;
use crate::error::Result;

/// Build the editor configuration for this invocation.
pub fn resolve_config(files: &FileArgs) -> Result<EditorConfig> {
    let mut config = match &files.config {
        Some(path) => {
            tracing::debug!(?path, "Loading editor config");
            EditorConfig::load(path)?
        }
        None => EditorConfig::default(),
    };

    if let Some(env_file) = &files.env_file {
        config.env_file = env_file.clone();
    }
    if let Some(backup_dir) = &files.backup_dir {
        config.backup_dir = backup_dir.clone();
    }

    config.validate()?;
    Ok(config)
}
