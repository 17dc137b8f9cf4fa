//! Cross-crate workflows: config files, backup naming and restores

use envedit_content::Document;
use envedit_core::{Editor, EditorConfig};
use envedit_fs::{NormalizedPath, io};
use envedit_test_utils::{EnvFixture, SAMPLE_ENV};
use pretty_assertions::assert_eq;

fn write_config(fixture: &EnvFixture, name: &str, content: &str) -> std::path::PathBuf {
    let path = fixture.root().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_toml_config_drives_backup_naming() {
    let fixture = EnvFixture::sample();
    let config_path = write_config(
        &fixture,
        "envedit.toml",
        &format!(
            "env_file = {:?}\nbackup_dir = {:?}\nbackup_prefix = \"app.env.\"\ntimestamp_format = \"%Y%m%dT%H%M%S\"\n",
            fixture.env_path(),
            fixture.backup_dir()
        ),
    );

    let config = EditorConfig::load(&config_path).unwrap();
    let editor = Editor::open(config).unwrap();
    let id = editor.backup().unwrap();

    assert_eq!(id.len(), "20010203T040506".len());
    assert_eq!(fixture.backup_files(), vec![format!("app.env.{id}")]);
}

#[test]
fn test_json_config_enables_auto_backup() {
    let fixture = EnvFixture::sample();
    let config_path = write_config(
        &fixture,
        "envedit.json",
        &serde_json::json!({
            "env_file": fixture.env_path(),
            "backup_dir": fixture.backup_dir(),
            "auto_backup": true,
        })
        .to_string(),
    );

    let mut editor = Editor::open(EditorConfig::load(&config_path).unwrap()).unwrap();
    editor.set_key("FOO", "saved", None).unwrap();
    editor.save().unwrap();
    editor.set_key("FOO", "saved again", None).unwrap();
    editor.save().unwrap();

    let backups = editor.list_backups().unwrap();
    assert_eq!(backups.len(), 2);
    assert!(backups[0].created >= backups[1].created);

    // The oldest snapshot is the file before the first save
    let oldest = editor.backups().read(&backups[1].id).unwrap();
    assert_eq!(String::from_utf8(oldest).unwrap(), SAMPLE_ENV);
    fixture.assert_env("FOO=\"saved again\"\n# comment\nBAZ=\"hello world\"\n");
}

#[test]
fn test_backups_list_newest_first_within_one_second() {
    let fixture = EnvFixture::sample();
    let editor = Editor::open(EditorConfig::new(fixture.env_path(), fixture.backup_dir())).unwrap();

    let ids: Vec<String> = (0..3).map(|_| editor.backup().unwrap()).collect();
    let listed: Vec<String> = editor.list_backups().unwrap().into_iter().map(|b| b.id).collect();

    let mut expected = ids;
    expected.reverse();
    assert_eq!(listed, expected);
}

#[test]
fn test_foreign_files_in_backup_dir_are_ignored() {
    let fixture = EnvFixture::sample();
    let editor = Editor::open(EditorConfig::new(fixture.env_path(), fixture.backup_dir())).unwrap();
    editor.backup().unwrap();

    let dir = NormalizedPath::new(fixture.backup_dir());
    io::write_text(&dir.join("notes.txt"), "keep").unwrap();
    io::write_text(&dir.join(".env.backup_not-a-timestamp"), "x").unwrap();

    assert_eq!(editor.list_backups().unwrap().len(), 1);
    assert_eq!(editor.delete_all_backups().unwrap().deleted.len(), 1);
    assert_eq!(fixture.backup_files().len(), 2);
}

#[test]
fn test_restored_file_round_trips_through_document() {
    let source = "\u{feff}# Database\r\nexport DB_HOST=localhost # primary\r\nnot a valid line\r\n\r\nDB_PASS='s3cr#t'";
    let fixture = EnvFixture::with_env(source);
    let mut editor = Editor::open(EditorConfig::new(fixture.env_path(), fixture.backup_dir())).unwrap();

    let id = editor.backup().unwrap();
    fixture.write_env("");
    editor.restore(&id).unwrap();

    assert_eq!(fixture.read_env(), source);
    assert_eq!(editor.document().unwrap().render(), source);
    assert_eq!(Document::parse(source).render(), source);
    assert_eq!(editor.get_value("DB_PASS").unwrap(), "s3cr#t");
    assert_eq!(editor.get_value("DB_HOST").unwrap(), "localhost");
}
