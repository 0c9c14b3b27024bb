//! CSV import and export commands

use crate::Error;
use crate::app::services::roster::ImportPlan;
use crate::cli::args::{ExportArgs, GlobalArgs, ImportArgs};
use crate::constants::PROGRESS_BAR_THRESHOLD;
use anyhow::{Context, Result, bail};
use colored::*;
use std::path::PathBuf;
use tracing::info;

use super::shared::{Session, create_progress_bar};

/// Import a CSV file: validate, report row errors, then merge or replace
pub async fn run_import(session: &Session, global: &GlobalArgs, args: &ImportArgs) -> Result<()> {
    args.validate()?;

    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read import file {}", args.file.display()))?;
    let plan = session
        .roster
        .prepare_import(&text)
        .await
        .with_context(|| format!("Failed to read CSV from {}", args.file.display()))?;

    print_plan(&plan);

    if args.dry_run {
        println!("{}", "Dry run: no changes made.".bright_black());
        return Ok(());
    }
    if plan.is_empty() {
        bail!("No valid rows to import from {}", args.file.display());
    }

    let incoming = plan.incoming().len();
    let progress = (global.show_progress() && incoming > PROGRESS_BAR_THRESHOLD)
        .then(|| create_progress_bar(incoming as u64, "Importing students"));

    match session
        .roster
        .commit_import(plan, args.mode, progress.clone())
        .await
    {
        Ok(report) => {
            if let Some(pb) = progress {
                pb.finish_and_clear();
            }
            println!("{}", report.summary().bright_green().bold());
            Ok(())
        }
        Err(Error::ImportModeRequired { existing, incoming }) => {
            if let Some(pb) = progress {
                pb.abandon();
            }
            println!(
                "The roster already has {} students and the file has {} valid rows.",
                existing.to_string().bright_yellow().bold(),
                incoming.to_string().bright_yellow().bold()
            );
            println!(
                "Re-run with {} to add them or {} to replace the current students.",
                "--mode merge".bright_cyan(),
                "--mode replace".bright_cyan()
            );
            Err(Error::ImportModeRequired { existing, incoming }.into())
        }
        Err(e) => Err(e).context("Import failed"),
    }
}

fn print_plan(plan: &ImportPlan) {
    let stats = &plan.decode_stats;
    if stats.ragged_rows() > 0 {
        println!(
            "{}",
            format!(
                "{} rows had the wrong number of fields and were repaired",
                stats.ragged_rows()
            )
            .yellow()
        );
    }

    for error in &plan.validation.errors {
        println!("  {}", error.to_string().red());
    }
    println!(
        "{} valid rows, {} rejected",
        plan.incoming().len().to_string().bright_green().bold(),
        plan.validation.errors.len().to_string().red().bold()
    );
}

/// Export every student to a dated CSV file (or stdout)
pub async fn run_export(session: &Session, args: &ExportArgs) -> Result<()> {
    let export = session.roster.export_csv().await?;

    if args.stdout {
        print!("{}", export.text);
        return Ok(());
    }

    let target = resolve_export_path(
        args.output.as_ref(),
        &session.config.export_dir,
        &export.file_name,
    );
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create export directory {}", parent.display()))?;
    }
    tokio::fs::write(&target, &export.text)
        .await
        .with_context(|| format!("Failed to write export file {}", target.display()))?;

    info!("Exported {} students to {}", export.rows, target.display());
    println!(
        "{} {} students to {}",
        "Exported".bright_green().bold(),
        export.rows,
        target.display().to_string().bright_cyan()
    );
    Ok(())
}

/// Output file for an export
///
/// An existing directory (or the configured export directory when no path
/// is given) receives the dated file name; anything else is used as is.
pub fn resolve_export_path(
    output: Option<&PathBuf>,
    export_dir: &std::path::Path,
    file_name: &str,
) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.clone(),
        None => export_dir.join(file_name),
    }
}
