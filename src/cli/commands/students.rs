//! Student record commands: list, show, add, update, remove, attend, note

use crate::app::adapters::student_api::StudentApi;
use crate::app::models::{NewNote, NotePatch};
use crate::app::services::csv_codec::encode;
use crate::app::services::import_reconciler::export_rows;
use crate::cli::args::{
    AddArgs, AttendArgs, ListArgs, NoteAction, NoteArgs, OutputFormat, RemoveArgs, ShowArgs,
    UpdateArgs,
};
use anyhow::{Context, Result};
use colored::*;
use tracing::info;

use super::shared::{Session, print_student_detail, print_student_table};

/// List students through the filter-sort engine
pub async fn run_list(session: &Session, args: &ListArgs) -> Result<()> {
    args.validate()?;

    if args.courses {
        let courses = session.roster.courses().await?;
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&courses)?),
            _ => courses.iter().for_each(|course| println!("{}", course)),
        }
        return Ok(());
    }

    let spec = args.to_filter_spec();
    let mut students = session.roster.query(&spec).await?;
    if args.at_risk {
        let threshold = session.config.low_attendance_threshold;
        students.retain(|s| s.performance.as_ref().is_some_and(|p| p.attendance < threshold));
    }
    info!("Listing {} students", students.len());

    match args.format {
        OutputFormat::Human => print_student_table(&students),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&students)?),
        OutputFormat::Csv => print!("{}", encode(&export_rows(&students))?),
    }
    Ok(())
}

pub async fn run_show(session: &Session, args: &ShowArgs) -> Result<()> {
    let student = session.roster.api().get(args.id).await?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&student)?),
        OutputFormat::Csv => {
            print!("{}", encode(&export_rows(std::slice::from_ref(&student)))?)
        }
        OutputFormat::Human => print_student_detail(&student),
    }
    Ok(())
}

pub async fn run_add(session: &Session, args: &AddArgs) -> Result<()> {
    args.validate()?;
    let student = session
        .roster
        .api()
        .create(args.to_new_student())
        .await
        .context("Failed to add student")?;
    println!(
        "{} {} with id {}",
        "Added".bright_green().bold(),
        student.name.bright_cyan(),
        student.id.to_string().bright_yellow()
    );
    Ok(())
}

pub async fn run_update(session: &Session, args: &UpdateArgs) -> Result<()> {
    args.validate()?;
    let student = session
        .roster
        .api()
        .update(args.id, args.to_patch())
        .await
        .with_context(|| format!("Failed to update student {}", args.id))?;
    println!(
        "{} {}",
        "Updated".bright_green().bold(),
        student.name.bright_cyan()
    );
    Ok(())
}

pub async fn run_remove(session: &Session, args: &RemoveArgs) -> Result<()> {
    let student = session
        .roster
        .api()
        .delete(args.id)
        .await
        .with_context(|| format!("Failed to remove student {}", args.id))?;
    println!(
        "{} {} ({})",
        "Removed".bright_green().bold(),
        student.name.bright_cyan(),
        student.email
    );
    Ok(())
}

pub async fn run_attend(session: &Session, args: &AttendArgs) -> Result<()> {
    let student = session
        .roster
        .api()
        .mark_attendance(args.id, args.date, args.status)
        .await?;
    let attendance = student.attendance();
    let line = format!(
        "{} marked {:?} on {}: attendance now {}%",
        student.name, args.status, args.date, attendance
    );
    if attendance < session.config.low_attendance_threshold {
        println!("{}", line.yellow());
    } else {
        println!("{}", line);
    }
    Ok(())
}

pub async fn run_note(session: &Session, args: &NoteArgs) -> Result<()> {
    args.action.validate()?;
    let api = session.roster.api();

    match &args.action {
        NoteAction::Add {
            id,
            content,
            category,
            important,
        } => {
            let mut note = NewNote::new(content.trim()).with_category(*category);
            if *important {
                note = note.important();
            }
            let note = api.add_note(*id, note).await?;
            println!("{} note {}", "Added".bright_green().bold(), note.id.bright_black());
        }
        NoteAction::Edit {
            id,
            note_id,
            content,
            category,
            important,
        } => {
            let patch = NotePatch {
                content: content.clone(),
                category: *category,
                important: *important,
            };
            let note = api.update_note(*id, note_id, patch).await?;
            println!("{} note {}", "Updated".bright_green().bold(), note.id.bright_black());
        }
        NoteAction::Delete { id, note_id } => {
            api.delete_note(*id, note_id).await?;
            println!("{} note {}", "Deleted".bright_green().bold(), note_id.bright_black());
        }
        NoteAction::List { id } => {
            let student = api.get(*id).await?;
            if student.notes().is_empty() {
                println!("{}", format!("No notes for {}", student.name).yellow());
            }
            for note in student.notes() {
                let flag = if note.important { " (important)" } else { "" };
                println!(
                    "{} [{}]{} {}",
                    note.id.bright_black(),
                    note.category,
                    flag.red(),
                    note.content
                );
                println!(
                    "    created {}{}",
                    note.created_at.format("%Y-%m-%d %H:%M"),
                    note.updated_at
                        .map(|t| format!(", edited {}", t.format("%Y-%m-%d %H:%M")))
                        .unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}
