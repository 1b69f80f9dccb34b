//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use userstore_core::UserId;

/// Inspect and populate a userstore SQLite database.
#[derive(Parser, Debug)]
#[command(name = "userstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file; created and migrated on first use.
    #[arg(
        long,
        global = true,
        default_value = "userstore.sqlite3",
        env = "USERSTORE_DB"
    )]
    pub db: String,

    /// Log level: trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, global = true, env = "USERSTORE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "USERSTORE_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert a user with a caller-chosen id
    Create(CreateArgs),
    /// Print one user as JSON
    Get(GetArgs),
    /// Print the core library version
    Version,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub id: UserId,

    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub id: UserId,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_with_global_db_flag() {
        let cli = Cli::try_parse_from([
            "userstore",
            "create",
            "--id",
            "1",
            "--name",
            "John Doe",
            "--db",
            "/tmp/u.db",
        ])
        .unwrap();
        assert_eq!(cli.db, "/tmp/u.db");
        match cli.command {
            Command::Create(args) => {
                assert_eq!(args.id, 1);
                assert_eq!(args.name, "John Doe");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn get_accepts_negative_ids() {
        let cli = Cli::try_parse_from(["userstore", "get", "--id", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::Get(args) if args.id == -3));
    }
}
