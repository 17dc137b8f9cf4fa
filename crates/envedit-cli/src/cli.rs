//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// envedit - Edit .env files while keeping their layout, with backups
#[derive(Parser, Debug)]
#[command(name = "envedit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub files: FileArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the env file and its backups live
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FileArgs {
    /// Config file (.toml, .json, .yaml) with editor settings
    #[arg(short, long, global = true, env = "ENVEDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Env file to edit (overrides the config file)
    #[arg(short = 'f', long, global = true, env = "ENVEDIT_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Backup directory (overrides the config file)
    #[arg(short = 'b', long, global = true, env = "ENVEDIT_BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List keys and values in file order
    ///
    /// Examples:
    ///   envedit get-keys                 # All keys
    ///   envedit get-keys APP_KEY APP_ENV # Only these keys
    ///   envedit get-keys --json --typed  # JSON with true/false/null cast
    GetKeys {
        /// Only show these keys
        keys: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Cast true/false/null to native values in JSON output
        #[arg(long, requires = "json")]
        typed: bool,
    },

    /// Print the value of one key
    Get {
        /// Key to read
        key: String,
    },

    /// Set a key, appending it if it does not exist yet
    ///
    /// Examples:
    ///   envedit set-key APP_DEBUG false
    ///   envedit set-key APP_NAME "My App" --comment "shown in the title"
    ///   envedit set-key MAIL_PASSWORD secret --backup
    SetKey {
        /// Key to set
        key: String,

        /// New value (empty when omitted)
        #[arg(default_value = "")]
        value: String,

        /// Inline comment; an empty string removes the existing one
        #[arg(long)]
        comment: Option<String>,

        /// Back up the file before writing
        #[arg(long)]
        backup: bool,
    },

    /// Delete a key
    DeleteKey {
        /// Key to delete
        key: String,

        /// Back up the file before writing
        #[arg(long)]
        backup: bool,
    },

    /// Back up the env file
    Backup,

    /// List backups, most recent first
    GetBackups {
        /// Only show the most recent backup
        #[arg(long)]
        latest: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Restore a backup over the env file (the most recent when no id given)
    Restore {
        /// Backup identifier as shown by get-backups
        id: Option<String>,
    },

    /// Delete one backup
    DeleteBackup {
        /// Backup identifier as shown by get-backups
        id: String,
    },

    /// Delete every backup
    DeleteBackups,

    /// Generate shell completions
    ///
    /// Examples:
    ///   envedit completions bash > ~/.local/share/bash-completion/completions/envedit
    ///   envedit completions zsh > ~/.zfunc/_envedit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_set_key_with_comment() {
        let cli = Cli::parse_from([
            "envedit",
            "set-key",
            "APP_NAME",
            "My App",
            "--comment",
            "title",
            "-f",
            "app/.env",
        ]);
        assert_eq!(cli.files.env_file, Some(PathBuf::from("app/.env")));
        assert_eq!(
            cli.command,
            Some(Commands::SetKey {
                key: "APP_NAME".into(),
                value: "My App".into(),
                comment: Some("title".into()),
                backup: false,
            })
        );
    }

    #[test]
    fn parse_restore_without_id() {
        let cli = Cli::parse_from(["envedit", "restore"]);
        assert_eq!(cli.command, Some(Commands::Restore { id: None }));
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["envedit", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }

    #[test]
    fn typed_requires_json() {
        assert!(Cli::try_parse_from(["envedit", "get-keys", "--typed"]).is_err());
    }
}
