//! Command-line argument definitions for the roster CLI
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Global flags (verbosity, config file, data directory) are accepted before
//! or after the subcommand.

use crate::app::models::notification::NotificationType;
use crate::app::models::{
    AttendanceStatus, Grade, NewStudent, NoteCategory, StudentId, StudentPatch,
};
use crate::app::services::filter_sort::{FilterSpec, SortSpec};
use crate::app::services::import_reconciler::ImportMode;
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the student roster
///
/// Manages a persisted student collection: filtered listings, record edits,
/// attendance and notes, CSV import/export and notification history.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "roster",
    version,
    about = "Manage a student roster: filter, edit, import and export student records",
    long_about = "A student-records tool backed by a local key-value store. Lists students with \
                  search, filter and sort options, edits records, marks attendance, keeps notes, \
                  imports and exports CSV (merge or replace) and manages notification history \
                  and per-user notification preferences."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags shared by every command
#[derive(Debug, Clone, Default, Parser)]
pub struct GlobalArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/roster/config.json
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Directory holding the persisted student collection and notifications
    #[arg(
        long = "data-dir",
        global = true,
        value_name = "DIR",
        help = "Directory for persisted roster data"
    )]
    pub data_dir: Option<PathBuf>,

    /// Start from an empty collection instead of the sample students
    #[arg(long = "no-seed", global = true, help = "Do not seed sample students")]
    pub no_seed: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List students with optional search, filters and sorting
    List(ListArgs),
    /// Show one student in detail
    Show(ShowArgs),
    /// Add a student
    Add(AddArgs),
    /// Update fields of a student
    Update(UpdateArgs),
    /// Remove a student
    Remove(RemoveArgs),
    /// Import students from a CSV file
    Import(ImportArgs),
    /// Export all students to a CSV file
    Export(ExportArgs),
    /// Mark attendance for a student on a day
    Attend(AttendArgs),
    /// Manage notes attached to a student
    Note(NoteArgs),
    /// Manage notification history and preferences
    Notify(NotifyArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
    /// CSV in the export layout
    Csv,
}

/// Arguments for the list command
#[derive(Debug, Clone, Default, Parser)]
pub struct ListArgs {
    /// Case-insensitive search over name or email
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Name contains (case-insensitive)
    #[arg(long = "name", value_name = "TEXT")]
    pub name: Option<String>,

    /// Email contains (case-insensitive)
    #[arg(long = "email", value_name = "TEXT")]
    pub email: Option<String>,

    /// Exact course name
    #[arg(long = "course", value_name = "COURSE")]
    pub course: Option<String>,

    /// Exact grade
    #[arg(long = "grade", value_name = "GRADE")]
    pub grade: Option<String>,

    /// Enrolled on or after this date (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    pub enrolled_from: Option<NaiveDate>,

    /// Enrolled on or before this date (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    pub enrolled_to: Option<NaiveDate>,

    /// Minimum attendance percentage
    #[arg(long = "min-attendance", value_name = "PCT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_attendance: Option<u8>,

    /// Maximum attendance percentage
    #[arg(long = "max-attendance", value_name = "PCT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub max_attendance: Option<u8>,

    /// Sort option such as name_asc, grade_desc or enrollmentDate_asc
    #[arg(long = "sort", value_name = "KEY_DIR")]
    pub sort: Option<SortSpec>,

    /// Only students whose attendance is under the configured threshold
    #[arg(long = "at-risk")]
    pub at_risk: bool,

    /// Print the distinct course names instead of students
    #[arg(long = "courses", conflicts_with = "at_risk")]
    pub courses: bool,

    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for the show command
#[derive(Debug, Clone, Parser)]
pub struct ShowArgs {
    pub id: StudentId,

    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for the add command
#[derive(Debug, Clone, Parser)]
pub struct AddArgs {
    pub name: String,
    pub email: String,
    pub course: String,

    #[arg(long = "grade", value_name = "GRADE")]
    pub grade: Option<String>,

    /// Enrollment date (YYYY-MM-DD); defaults to today
    #[arg(long = "enrolled", value_name = "DATE")]
    pub enrolled: Option<NaiveDate>,

    /// Avatar URL; defaults to a generated placeholder
    #[arg(long = "avatar", value_name = "URL")]
    pub avatar: Option<String>,
}

/// Arguments for the update command
#[derive(Debug, Clone, Parser)]
pub struct UpdateArgs {
    pub id: StudentId,

    #[arg(long = "name")]
    pub name: Option<String>,

    #[arg(long = "email")]
    pub email: Option<String>,

    #[arg(long = "course")]
    pub course: Option<String>,

    #[arg(long = "grade")]
    pub grade: Option<String>,

    #[arg(long = "enrolled", value_name = "DATE")]
    pub enrolled: Option<NaiveDate>,

    #[arg(long = "avatar", value_name = "URL")]
    pub avatar: Option<String>,
}

/// Arguments for the remove command
#[derive(Debug, Clone, Parser)]
pub struct RemoveArgs {
    pub id: StudentId,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// CSV file with a header row
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// How to combine with existing students (merge or replace)
    ///
    /// Required when the collection is not empty.
    #[arg(short = 'm', long = "mode", value_name = "MODE")]
    pub mode: Option<ImportMode>,

    /// Validate and report without changing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Arguments for the export command
#[derive(Debug, Clone, Default, Parser)]
pub struct ExportArgs {
    /// Output file or directory
    ///
    /// A directory (or no value) receives student_data_<date>.csv; the
    /// configured export directory is used when omitted.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the CSV to stdout instead of a file
    #[arg(long = "stdout", conflicts_with = "output")]
    pub stdout: bool,
}

/// Arguments for the attend command
#[derive(Debug, Clone, Parser)]
pub struct AttendArgs {
    pub id: StudentId,

    /// Day to mark (YYYY-MM-DD)
    pub date: NaiveDate,

    /// present or absent
    pub status: AttendanceStatus,
}

/// Arguments for the note command
#[derive(Debug, Clone, Parser)]
pub struct NoteArgs {
    #[command(subcommand)]
    pub action: NoteAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum NoteAction {
    /// Attach a note to a student
    Add {
        id: StudentId,
        content: String,
        #[arg(long = "category", default_value = "general")]
        category: NoteCategory,
        #[arg(long = "important")]
        important: bool,
    },
    /// Edit an existing note
    Edit {
        id: StudentId,
        note_id: String,
        #[arg(long = "content")]
        content: Option<String>,
        #[arg(long = "category")]
        category: Option<NoteCategory>,
        #[arg(long = "important", value_name = "BOOL")]
        important: Option<bool>,
    },
    /// Delete a note
    Delete { id: StudentId, note_id: String },
    /// List a student's notes
    List { id: StudentId },
}

/// Arguments for the notify command
#[derive(Debug, Clone, Parser)]
pub struct NotifyArgs {
    #[command(subcommand)]
    pub action: NotifyAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum NotifyAction {
    /// Show the notification history, newest first
    List {
        #[arg(long = "unread")]
        unread: bool,
    },
    /// Add a notification if its type is enabled
    ///
    /// With --student the type's template is rendered for that student and
    /// used for any missing title or message.
    Add {
        kind: NotificationType,
        #[arg(long = "title")]
        title: Option<String>,
        #[arg(long = "message")]
        message: Option<String>,
        #[arg(long = "student", value_name = "ID")]
        student: Option<StudentId>,
    },
    /// Mark one notification as read
    Read { id: String },
    /// Mark every notification as read
    ReadAll,
    /// Delete one notification
    Delete { id: String },
    /// Delete every notification
    Clear,
    /// Show or change notification preferences for the active user
    Prefs {
        #[arg(long = "enable", value_name = "TYPE")]
        enable: Vec<NotificationType>,
        #[arg(long = "disable", value_name = "TYPE")]
        disable: Vec<NotificationType>,
    },
    /// Raise attendance alerts for students under the threshold
    Alerts {
        #[arg(long = "threshold", value_name = "PCT", value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,
    },
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Result<&Commands> {
        self.command
            .as_ref()
            .ok_or_else(|| Error::configuration("No command given"))
    }
}

impl GlobalArgs {
    /// Validate global arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        if let Some(data_dir) = &self.data_dir {
            if data_dir.exists() && !data_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Data path is not a directory: {}",
                    data_dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ListArgs {
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.enrolled_from, self.enrolled_to) {
            if from > to {
                return Err(Error::validation(format!(
                    "--from {} is after --to {}",
                    from, to
                )));
            }
        }
        Ok(())
    }

    /// Build the filter/sort criteria from the flags
    ///
    /// A single attendance bound is widened to the full 0-100 range on the
    /// other side.
    pub fn to_filter_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec {
            search: self.search.clone(),
            name_contains: self.name.clone(),
            email_contains: self.email.clone(),
            course: self.course.clone(),
            grade: self.grade.as_deref().map(Grade::new),
            sort: self.sort,
            ..FilterSpec::default()
        };
        spec = spec.with_enrollment_range(self.enrolled_from, self.enrolled_to);
        if self.min_attendance.is_some() || self.max_attendance.is_some() {
            spec = spec.with_performance_range(
                self.min_attendance.unwrap_or(0),
                self.max_attendance.unwrap_or(100),
            );
        }
        spec
    }
}

impl AddArgs {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("course", &self.course),
        ] {
            if value.trim().is_empty() {
                return Err(Error::validation(format!("{} cannot be empty", field)));
            }
        }
        Ok(())
    }

    pub fn to_new_student(&self) -> NewStudent {
        NewStudent {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            course: self.course.trim().to_string(),
            grade: self.grade.as_deref().map(Grade::new),
            enrollment_date: self.enrolled.map(|d| d.format("%Y-%m-%d").to_string()),
            avatar: self.avatar.clone(),
            ..NewStudent::default()
        }
    }
}

impl UpdateArgs {
    pub fn validate(&self) -> Result<()> {
        if self.to_patch().is_empty() {
            return Err(Error::validation(
                "Nothing to update: pass at least one of --name, --email, --course, --grade, --enrolled, --avatar",
            ));
        }
        Ok(())
    }

    pub fn to_patch(&self) -> StudentPatch {
        StudentPatch {
            name: self.name.clone(),
            email: self.email.clone(),
            course: self.course.clone(),
            grade: self.grade.as_deref().map(Grade::new),
            enrollment_date: self.enrolled.map(|d| d.format("%Y-%m-%d").to_string()),
            avatar: self.avatar.clone(),
        }
    }
}

impl ImportArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Import file does not exist: {}",
                self.file.display()
            )));
        }
        Ok(())
    }
}

impl NoteAction {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Add { content, .. } if content.trim().is_empty() => {
                Err(Error::validation("Note content cannot be empty"))
            }
            Self::Edit {
                content,
                category,
                important,
                ..
            } if content.is_none() && category.is_none() && important.is_none() => Err(
                Error::validation("Nothing to edit: pass --content, --category or --important"),
            ),
            _ => Ok(()),
        }
    }
}

impl NotifyAction {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Add {
                title,
                message,
                student,
                ..
            } if student.is_none() && (title.is_none() || message.is_none()) => {
                Err(Error::validation(
                    "Pass --title and --message, or --student to render the template",
                ))
            }
            Self::Prefs { enable, disable } => {
                match enable.iter().find(|kind| disable.contains(kind)) {
                    Some(kind) => Err(Error::validation(format!(
                        "{} cannot be both enabled and disabled",
                        kind
                    ))),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}
