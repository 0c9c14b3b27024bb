//! Command implementations for the roster CLI
//!
//! This module contains the command dispatch for the CLI interface. Each
//! group of commands is implemented in its own module:
//! - `students`: listing, record edits, attendance and notes
//! - `transfer`: CSV import and export
//! - `notify`: notification history and preferences

pub mod notify;
pub mod shared;
pub mod students;
pub mod transfer;

use anyhow::Result;

use crate::cli::args::{Args, Commands};
use shared::{Session, load_configuration, setup_logging};

/// Main command runner for the roster
///
/// Sets up logging, loads the layered configuration, opens the persisted data and dispatches
/// to the subcommand handler.
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args.global)?;
    args.global.validate()?;
    let config = load_configuration(&args.global)?;
    let session = Session::open(config).await?;

    match args.get_command()? {
        Commands::List(list) => students::run_list(&session, list).await,
        Commands::Show(show) => students::run_show(&session, show).await,
        Commands::Add(add) => students::run_add(&session, add).await,
        Commands::Update(update) => students::run_update(&session, update).await,
        Commands::Remove(remove) => students::run_remove(&session, remove).await,
        Commands::Attend(attend) => students::run_attend(&session, attend).await,
        Commands::Note(note) => students::run_note(&session, note).await,
        Commands::Import(import) => transfer::run_import(&session, &args.global, import).await,
        Commands::Export(export) => transfer::run_export(&session, export).await,
        Commands::Notify(notify) => notify::run_notify(&session, notify).await,
    }
}
