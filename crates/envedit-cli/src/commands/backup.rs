//! Backup commands: backup, get-backups, restore, delete-backup, delete-backups

use colored::Colorize;
use envedit_core::{BackupInfo, Editor, EditorConfig};

use crate::error::{CliError, Result};

/// Back up the env file as it is on disk.
pub fn run_backup(config: EditorConfig) -> Result<()> {
    let editor = Editor::new(config)?;
    let id = editor.backup()?;
    println!("{} Created backup {}", "OK".green().bold(), id.yellow());
    Ok(())
}

/// List backups, most recent first.
pub fn run_get_backups(config: EditorConfig, latest: bool, json: bool) -> Result<()> {
    let editor = Editor::new(config)?;
    let backups: Vec<BackupInfo> = if latest {
        editor.latest_backup()?.into_iter().collect()
    } else {
        editor.list_backups()?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&backups)?);
        return Ok(());
    }

    if backups.is_empty() {
        println!("{}", "No backups found.".dimmed());
        return Ok(());
    }
    for backup in &backups {
        println!(
            "{}  {}  {} bytes",
            backup.id.yellow(),
            backup.created.format("%Y-%m-%d %H:%M:%S UTC"),
            backup.size
        );
    }
    Ok(())
}

/// Restore `id`, or the most recent backup when no id is given.
pub fn run_restore(config: EditorConfig, id: Option<&str>) -> Result<()> {
    let mut editor = Editor::new(config)?;
    let restored = match id {
        Some(id) => {
            editor.restore(id)?;
            id.to_string()
        }
        None => editor.restore_latest()?,
    };
    println!(
        "{} Restored {} from backup {}",
        "OK".green().bold(),
        editor.path().as_str().cyan(),
        restored.yellow()
    );
    Ok(())
}

pub fn run_delete_backup(config: EditorConfig, id: &str) -> Result<()> {
    let editor = Editor::new(config)?;
    editor.delete_backup(id)?;
    println!("{} Deleted backup {}", "OK".green().bold(), id.yellow());
    Ok(())
}

/// Delete every backup, failing if any file could not be removed.
pub fn run_delete_backups(config: EditorConfig) -> Result<()> {
    let editor = Editor::new(config)?;
    let report = editor.delete_all_backups()?;

    for (id, err) in &report.failed {
        eprintln!("{} {}: {}", "FAILED".red().bold(), id.yellow(), err);
    }
    if !report.is_complete() {
        return Err(CliError::user(format!(
            "{} of {} backups could not be deleted",
            report.failed.len(),
            report.failed.len() + report.deleted.len()
        )));
    }

    println!(
        "{} Deleted {} backup(s)",
        "OK".green().bold(),
        report.deleted.len()
    );
    Ok(())
}
