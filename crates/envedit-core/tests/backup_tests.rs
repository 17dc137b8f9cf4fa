//! Backup, listing, restore and deletion

use envedit_core::{Editor, EditorConfig, Error};
use envedit_test_utils::{EnvFixture, SAMPLE_ENV};
use pretty_assertions::assert_eq;

fn open(fixture: &EnvFixture) -> Editor {
    Editor::open(EditorConfig::new(fixture.env_path(), fixture.backup_dir())).unwrap()
}

#[test]
fn test_backup_creates_one_file() {
    let fixture = EnvFixture::sample();
    let editor = open(&fixture);

    let id = editor.backup().unwrap();

    assert_eq!(fixture.backup_files(), vec![format!(".env.backup_{id}")]);
    let content =
        std::fs::read_to_string(fixture.backup_dir().join(format!(".env.backup_{id}"))).unwrap();
    assert_eq!(content, SAMPLE_ENV);
}

#[test]
fn test_backup_snapshots_disk_not_memory() {
    let fixture = EnvFixture::sample();
    let mut editor = open(&fixture);

    editor.set_key("FOO", "unsaved", None).unwrap();
    let id = editor.backup().unwrap();

    let backups = editor.list_backups().unwrap();
    assert_eq!(backups[0].id, id);
    assert_eq!(backups[0].size, SAMPLE_ENV.len() as u64);
}

#[test]
fn test_backup_mutate_restore_round_trip() {
    let fixture = EnvFixture::sample();
    let mut editor = open(&fixture);
    let before: Vec<(String, String)> = editor
        .get_keys()
        .unwrap()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let id = editor.backup().unwrap();
    editor.set_key("FOO", "changed", None).unwrap();
    editor.delete_key("BAZ").unwrap();
    editor.set_key("NEW", "1", None).unwrap();
    editor.save().unwrap();

    editor.restore(&id).unwrap();

    let after: Vec<(String, String)> = editor
        .get_keys()
        .unwrap()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(after, before);
    fixture.assert_env(SAMPLE_ENV);
    // The backup is kept
    assert_eq!(editor.list_backups().unwrap().len(), 1);
}

#[test]
fn test_list_backups_is_strictly_descending() {
    let fixture = EnvFixture::sample();
    let editor = open(&fixture);

    let ids: Vec<String> = (0..4).map(|_| editor.backup().unwrap()).collect();

    let listed = editor.list_backups().unwrap();
    let listed_ids: Vec<String> = listed.iter().map(|b| b.id.clone()).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(listed_ids, expected);

    for pair in listed.windows(2) {
        assert!(pair[0].created >= pair[1].created);
    }
    assert_eq!(editor.latest_backup().unwrap().unwrap().id, ids[3]);
}

#[test]
fn test_restore_unknown_backup() {
    let fixture = EnvFixture::sample();
    let mut editor = open(&fixture);

    assert!(matches!(
        editor.restore("2000_01_01_000000"),
        Err(Error::BackupNotFound { .. })
    ));
    assert!(matches!(
        editor.delete_backup("nope"),
        Err(Error::BackupNotFound { .. })
    ));
    assert!(matches!(
        editor.restore_latest(),
        Err(Error::NoBackups { .. })
    ));
}

#[test]
fn test_restore_latest() {
    let fixture = EnvFixture::sample();
    let mut editor = open(&fixture);

    editor.backup().unwrap();
    editor.set_key("FOO", "second", None).unwrap();
    editor.save().unwrap();
    let second = editor.backup().unwrap();
    editor.set_key("FOO", "third", None).unwrap();
    editor.save().unwrap();

    assert_eq!(editor.restore_latest().unwrap(), second);
    assert_eq!(editor.get_value("FOO").unwrap(), "second");
}

#[test]
fn test_delete_single_backup() {
    let fixture = EnvFixture::sample();
    let editor = open(&fixture);

    let first = editor.backup().unwrap();
    let second = editor.backup().unwrap();
    editor.delete_backup(&first).unwrap();

    let ids: Vec<_> = editor
        .list_backups()
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec![second]);
}

#[test]
fn test_delete_all_backups() {
    let fixture = EnvFixture::sample();
    let editor = open(&fixture);

    let id = editor.backup().unwrap();
    let report = editor.delete_all_backups().unwrap();

    assert!(report.is_complete());
    assert_eq!(report.deleted, vec![id]);
    assert!(editor.list_backups().unwrap().is_empty());
    assert!(fixture.backup_files().is_empty());
}

#[test]
fn test_delete_all_with_no_backups() {
    let fixture = EnvFixture::sample();
    let report = open(&fixture).delete_all_backups().unwrap();
    assert!(report.deleted.is_empty());
    assert!(report.is_complete());
}

#[test]
fn test_auto_backup_on_save() {
    let fixture = EnvFixture::sample();
    let config =
        EditorConfig::new(fixture.env_path(), fixture.backup_dir()).with_auto_backup(true);
    let mut editor = Editor::open(config).unwrap();

    editor.set_key("FOO", "new", None).unwrap();
    editor.save().unwrap();

    let backups = editor.list_backups().unwrap();
    assert_eq!(backups.len(), 1);
    let saved = std::fs::read_to_string(backups[0].path.to_native()).unwrap();
    assert_eq!(saved, SAMPLE_ENV);
}

#[test]
fn test_backup_of_missing_file() {
    let fixture = EnvFixture::sample();
    let editor = open(&fixture);
    std::fs::remove_file(fixture.env_path()).unwrap();

    assert!(matches!(
        editor.backup(),
        Err(Error::FileNotFound { .. })
    ));
}

#[test]
fn test_custom_prefix_and_format() {
    let fixture = EnvFixture::sample();
    let config = EditorConfig::new(fixture.env_path(), fixture.backup_dir())
        .with_backup_prefix("snapshot-")
        .with_timestamp_format("%d.%m.%Y-%H.%M.%S");
    let editor = Editor::open(config).unwrap();

    let first = editor.backup().unwrap();
    let second = editor.backup().unwrap();

    let files = fixture.backup_files();
    assert!(files.iter().all(|f| f.starts_with("snapshot-")));
    let ids: Vec<_> = editor
        .list_backups()
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[cfg(unix)]
#[test]
fn test_backup_into_read_only_dir_is_write_error() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = EnvFixture::sample();
    std::fs::create_dir_all(fixture.backup_dir()).unwrap();
    std::fs::set_permissions(fixture.backup_dir(), std::fs::Permissions::from_mode(0o555))
        .unwrap();

    // Root ignores directory permissions
    let canary = fixture.backup_dir().join("canary");
    if std::fs::write(&canary, "x").is_ok() {
        std::fs::remove_file(canary).unwrap();
        return;
    }

    let editor = open(&fixture);
    assert!(matches!(editor.backup(), Err(Error::Write { .. })));

    std::fs::set_permissions(fixture.backup_dir(), std::fs::Permissions::from_mode(0o755))
        .unwrap();
}

#[cfg(unix)]
#[test]
fn test_delete_all_in_read_only_dir_reports_failures() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = EnvFixture::sample();
    let editor = open(&fixture);
    let first = editor.backup().unwrap();
    let second = editor.backup().unwrap();

    std::fs::set_permissions(fixture.backup_dir(), std::fs::Permissions::from_mode(0o555))
        .unwrap();
    let canary = fixture.backup_dir().join("canary");
    if std::fs::write(&canary, "x").is_ok() {
        std::fs::remove_file(canary).unwrap();
        return;
    }

    let report = editor.delete_all_backups().unwrap();

    std::fs::set_permissions(fixture.backup_dir(), std::fs::Permissions::from_mode(0o755))
        .unwrap();

    assert!(!report.is_complete());
    assert!(report.deleted.is_empty());
    let failed: Vec<_> = report.failed.iter().map(|(id, _)| id.clone()).collect();
    assert_eq!(failed, vec![second, first]);
    assert!(report
        .failed
        .iter()
        .all(|(_, e)| matches!(e, Error::Write { .. })));
    assert_eq!(fixture.backup_files().len(), 2);
}
