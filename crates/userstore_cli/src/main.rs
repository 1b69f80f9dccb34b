//! `userstore` entry point.
//!
//! # Responsibility
//! - Own the store connection for the duration of one command.
//! - Wire the user repository over that borrowed connection.

mod args;

use anyhow::Context;
use args::{Cli, Command};
use clap::Parser;
use log::info;
use rusqlite::Connection;
use std::io::{self, Write};
use std::process::ExitCode;
use userstore_core::db::open_db;
use userstore_core::{
    core_version, default_log_level, init_logging, SqlUserRepository, User, UserRepository,
};

const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let code = execute(cli, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}

/// Runs one command and returns the process exit status.
///
/// Failures print the whole error chain to `err` and map to exit status 1.
fn execute(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match run(cli, out) {
        Ok(()) => 0,
        Err(error) => {
            // Nothing left to report to if stderr itself is gone.
            let _ = writeln!(err, "error: {error:#}");
            EXIT_FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    match cli.command {
        Command::Version => writeln!(out, "userstore_core version={}", core_version())?,
        Command::Create(args) => {
            let conn = open_store(&cli.db)?;
            let repo = SqlUserRepository::new(&conn);
            repo.create_user(&User::new(args.id, args.name))
                .with_context(|| format!("failed to create user id={}", args.id))?;
            info!("event=cli_create module=cli status=ok id={}", args.id);
            writeln!(out, "created user id={}", args.id)?;
        }
        Command::Get(args) => {
            let conn = open_store(&cli.db)?;
            let user = SqlUserRepository::new(&conn)
                .get_user_by_id(args.id)
                .with_context(|| format!("failed to load user id={}", args.id))?;
            writeln!(out, "{}", serde_json::to_string(&user)?)?;
        }
    }

    Ok(())
}

fn open_store(path: &str) -> anyhow::Result<Connection> {
    open_db(path).with_context(|| format!("failed to open `{path}`"))
}
