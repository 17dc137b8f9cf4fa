//! envedit CLI
//!
//! Command-line interface for editing a `.env` file and managing its backups.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow(), e);
    }
    tracing::debug!(files = ?cli.files, "Starting envedit");

    let Some(cmd) = cli.command else {
        println!("{} .env editor", "envedit".green().bold());
        println!();
        println!("Run {} for available commands.", "envedit --help".cyan());
        return Ok(());
    };

    if let Commands::Completions { shell } = cmd {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "envedit", &mut std::io::stdout());
        return Ok(());
    }

    let config = context::resolve_config(&cli.files)?;
    execute_command(cmd, config)
}

fn execute_command(cmd: Commands, config: envedit_core::EditorConfig) -> Result<()> {
    match cmd {
        Commands::GetKeys { keys, json, typed } => {
            commands::run_get_keys(config, &keys, json, typed)
        }
        Commands::Get { key } => commands::run_get(config, &key),
        Commands::SetKey {
            key,
            value,
            comment,
            backup,
        } => commands::run_set_key(config, &key, &value, comment.as_deref(), backup),
        Commands::DeleteKey { key, backup } => commands::run_delete_key(config, &key, backup),
        Commands::Backup => commands::run_backup(config),
        Commands::GetBackups { latest, json } => commands::run_get_backups(config, latest, json),
        Commands::Restore { id } => commands::run_restore(config, id.as_deref()),
        Commands::DeleteBackup { id } => commands::run_delete_backup(config, &id),
        Commands::DeleteBackups => commands::run_delete_backups(config),
        Commands::Completions { .. } => Ok(()),
    }
}
