//! [`EnvFixture`] for editor and CLI test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The three-line file used across the scenario tests
pub const SAMPLE_ENV: &str = "FOO=bar\n# comment\nBAZ=\"hello world\"\n";

/// Name of the env file inside the fixture
pub const ENV_FILE: &str = ".env";

/// Name of the backup directory inside the fixture
pub const BACKUP_DIR: &str = "backups";

/// A temporary directory with an env file and a backup directory path.
///
/// # Example
///
/// ```rust,no_run
/// use envedit_test_utils::EnvFixture;
///
/// let fixture = EnvFixture::with_env("FOO=bar\n");
/// fixture.assert_env("FOO=bar\n");
/// assert!(fixture.backup_files().is_empty());
/// ```
pub struct EnvFixture {
    temp_dir: TempDir,
}

impl Default for EnvFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvFixture {
    /// An empty directory: no env file, no backup directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A directory whose env file holds `content`.
    pub fn with_env(content: &str) -> Self {
        let fixture = Self::new();
        fixture.write_env(content);
        fixture
    }

    /// A directory holding [`SAMPLE_ENV`].
    pub fn sample() -> Self {
        Self::with_env(SAMPLE_ENV)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn env_path(&self) -> PathBuf {
        self.root().join(ENV_FILE)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.root().join(BACKUP_DIR)
    }

    pub fn write_env(&self, content: &str) {
        fs::write(self.env_path(), content).unwrap();
    }

    pub fn read_env(&self) -> String {
        fs::read_to_string(self.env_path())
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", self.env_path().display()))
    }

    /// Names of the files in the backup directory, sorted.
    pub fn backup_files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.backup_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Assert that the env file holds exactly `expected`.
    ///
    /// # Panics
    /// Panics with both texts if they differ.
    pub fn assert_env(&self, expected: &str) {
        let actual = self.read_env();
        assert!(
            actual == expected,
            "Env file content differs.\nExpected: {expected:?}\nActual:   {actual:?}"
        );
    }
}
