//! Scenario tests over the sample env file
//!
//! Each test drives the editor through the public API and checks the bytes
//! that end up on disk.

use envedit_core::{Editor, EditorConfig, Error};
use envedit_test_utils::{EnvFixture, SAMPLE_ENV};
use pretty_assertions::assert_eq;

fn open(fixture: &EnvFixture) -> Editor {
    Editor::open(EditorConfig::new(fixture.env_path(), fixture.backup_dir())).unwrap()
}

#[test]
fn test_sample_keys_in_file_order() {
    let fixture = EnvFixture::sample();
    let editor = open(&fixture);

    let keys: Vec<_> = editor.get_keys().unwrap().collect();
    assert_eq!(keys, vec![("FOO", "bar"), ("BAZ", "hello world")]);
}

#[test]
fn test_set_key_keeps_position_and_comment() {
    let fixture = EnvFixture::sample();
    let mut editor = open(&fixture);

    editor.set_key("FOO", "baz", None).unwrap();
    editor.save().unwrap();
    editor.reload().unwrap();

    assert_eq!(editor.get_value("FOO").unwrap(), "baz");
    fixture.assert_env("FOO=baz\n# comment\nBAZ=\"hello world\"\n");
}

#[test]
fn test_delete_key_leaves_other_lines() {
    let fixture = EnvFixture::sample();
    let mut editor = open(&fixture);

    editor.delete_key("BAZ").unwrap();
    editor.save().unwrap();

    fixture.assert_env("FOO=bar\n# comment\n");
    assert!(matches!(
        editor.get_value("BAZ"),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_backup_then_delete_all() {
    let fixture = EnvFixture::sample();
    let editor = open(&fixture);

    editor.backup().unwrap();
    assert_eq!(fixture.backup_files().len(), 1);

    let report = editor.delete_all_backups().unwrap();
    assert!(report.is_complete());
    assert_eq!(report.deleted.len(), 1);
    assert!(editor.list_backups().unwrap().is_empty());
    assert!(fixture.backup_files().is_empty());
}

#[test]
fn test_backup_mutate_restore() {
    let fixture = EnvFixture::sample();
    let mut editor = open(&fixture);

    let id = editor.backup().unwrap();
    editor.set_key("FOO", "changed", None).unwrap();
    editor.delete_key("BAZ").unwrap();
    editor.set_key("NEW", "1", None).unwrap();
    editor.save().unwrap();

    editor.restore(&id).unwrap();

    let keys: Vec<_> = editor.get_keys().unwrap().collect();
    assert_eq!(keys, vec![("FOO", "bar"), ("BAZ", "hello world")]);
    fixture.assert_env(SAMPLE_ENV);
}

#[test]
fn test_unsaved_edits_are_not_backed_up() {
    let fixture = EnvFixture::sample();
    let mut editor = open(&fixture);

    editor.set_key("FOO", "unsaved", None).unwrap();
    let id = editor.backup().unwrap();

    let stored = editor.backups().read(&id).unwrap();
    assert_eq!(String::from_utf8(stored).unwrap(), SAMPLE_ENV);
    assert!(editor.is_modified());
}
