//! Key commands: get-keys, get, set-key, delete-key

use colored::Colorize;
use envedit_core::{Editor, EditorConfig, SetOutcome, TypedValue};
use serde_json::{Map, Value};

use crate::error::Result;

/// Print keys and values in file order, optionally filtered to `only`.
pub fn run_get_keys(config: EditorConfig, only: &[String], json: bool, typed: bool) -> Result<()> {
    let editor = Editor::open(config)?;
    let pairs: Vec<(&str, &str)> = editor
        .get_keys()?
        .filter(|(key, _)| only.is_empty() || only.iter().any(|k| k == key))
        .collect();

    if json {
        let mut object = Map::new();
        for (key, value) in &pairs {
            let value = if typed {
                serde_json::to_value(TypedValue::from_raw(value))?
            } else {
                Value::String(value.to_string())
            };
            object.insert(key.to_string(), value);
        }
        println!("{}", serde_json::to_string_pretty(&Value::Object(object))?);
        return Ok(());
    }

    if pairs.is_empty() {
        println!("{}", "No keys found.".dimmed());
        return Ok(());
    }
    for (key, value) in pairs {
        println!("{}={}", key.cyan(), value);
    }
    Ok(())
}

/// Print the raw value of `key`.
pub fn run_get(config: EditorConfig, key: &str) -> Result<()> {
    let editor = Editor::open(config)?;
    println!("{}", editor.get_value(key)?);
    Ok(())
}

/// Set `key` and save.
pub fn run_set_key(
    config: EditorConfig,
    key: &str,
    value: &str,
    comment: Option<&str>,
    backup: bool,
) -> Result<()> {
    let mut editor = Editor::open(config)?;
    backup_before_save(&editor, backup)?;

    let outcome = editor.set_key(key, value, comment)?;
    editor.save()?;

    let verb = match outcome {
        SetOutcome::Updated => "Updated",
        SetOutcome::Inserted => "Added",
    };
    let shown = match editor.get_typed(key)? {
        TypedValue::String(value) => format!("{value:?}"),
        typed => typed.to_string(),
    };
    println!("{} {} {} = {}", "OK".green().bold(), verb, key.cyan(), shown);
    Ok(())
}

/// Delete `key` and save.
pub fn run_delete_key(config: EditorConfig, key: &str, backup: bool) -> Result<()> {
    let mut editor = Editor::open(config)?;
    backup_before_save(&editor, backup)?;
    editor.delete_key(key)?;
    editor.save()?;

    println!("{} Deleted {}", "OK".green().bold(), key.cyan());
    Ok(())
}

/// Take the backup asked for with `--backup`, unless `save` will already
/// take one because `auto_backup` is on.
fn backup_before_save(editor: &Editor, requested: bool) -> Result<()> {
    if !requested {
        return Ok(());
    }
    if editor.config().auto_backup {
        tracing::debug!("auto_backup is enabled, save takes the backup");
        return Ok(());
    }
    let id = editor.backup()?;
    println!("{} Backed up as {}", "=>".blue().bold(), id.yellow());
    Ok(())
}
