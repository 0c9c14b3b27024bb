//! Shared components for CLI commands
//!
//! This module contains logging setup, configuration loading, the session
//! that wires the file-backed store to the roster and notification services,
//! and the output helpers used across command implementations.

use crate::app::adapters::kv_store::JsonFileStore;
use crate::app::adapters::student_api::{MockApiOptions, MockStudentApi};
use crate::app::models::StudentRecord;
use crate::app::services::collection_store::RecordDefaults;
use crate::app::services::notifications::NotificationCenter;
use crate::app::services::roster::Roster;
use crate::cli::args::GlobalArgs;
use crate::config::Config;
use crate::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, info};

/// Set up structured logging for every command
pub fn setup_logging(args: &GlobalArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roster={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &GlobalArgs) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        debug!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &GlobalArgs) {
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if args.no_seed {
        config.seed_sample_data = false;
    }
}

/// Services opened over the configured data directory
pub struct Session {
    pub config: Config,
    pub roster: Roster<MockStudentApi<JsonFileStore>>,
    pub notifications: NotificationCenter<JsonFileStore>,
}

impl Session {
    /// Open the student API and notification center over one file store
    pub async fn open(config: Config) -> Result<Self> {
        info!("Opening roster data in {}", config.data_dir.display());
        let kv = Arc::new(JsonFileStore::new(&config.data_dir));

        let api = MockStudentApi::open(Arc::clone(&kv), MockApiOptions::from(&config)).await?;
        let roster = Roster::with_defaults(api, RecordDefaults::from(&config));
        let notifications = NotificationCenter::new(kv, config.user_id.clone());

        Ok(Self {
            config,
            roster,
            notifications,
        })
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// One summary line per student
pub fn format_student_line(student: &StudentRecord) -> String {
    format!(
        "{:>4}  {:<24} {:<32} {:<20} {:<4} {}",
        student.id.to_string().bright_yellow(),
        student.name.bright_cyan(),
        student.email,
        student.course,
        student.grade.as_str().bright_white().bold(),
        student.enrollment_date.bright_black()
    )
}

/// Print students as an aligned table with a header
pub fn print_student_table(students: &[StudentRecord]) {
    if students.is_empty() {
        println!("{}", "No students match.".yellow());
        return;
    }

    println!(
        "{}",
        format!(
            "{:>4}  {:<24} {:<32} {:<20} {:<4} {}",
            "ID", "NAME", "EMAIL", "COURSE", "GRD", "ENROLLED"
        )
        .bold()
    );
    for student in students {
        println!("{}", format_student_line(student));
    }
    println!();
    println!("{} students", students.len().to_string().bright_green().bold());
}

/// Print one student with performance and notes
pub fn print_student_detail(student: &StudentRecord) {
    println!("{} {}", student.name.bright_cyan().bold(), format!("#{}", student.id).bright_black());
    println!("  {:<12} {}", "Email:".bold(), student.email);
    println!("  {:<12} {}", "Course:".bold(), student.course);
    println!("  {:<12} {}", "Grade:".bold(), student.grade);
    println!("  {:<12} {}", "Enrolled:".bold(), student.enrollment_date);
    println!("  {:<12} {}", "Avatar:".bold(), student.avatar.bright_black());

    if let Some(performance) = &student.performance {
        let summary = performance.summary();
        println!();
        println!("  {}", "Performance".bright_green().bold());
        println!(
            "    Attendance:  {}% over {} recorded days",
            summary.attendance, summary.days_recorded
        );
        if let Some(avg) = summary.average_assignment {
            println!("    Assignments: {:.1}% average", avg);
        }
        if let Some(avg) = summary.average_exam {
            println!("    Exams:       {:.1}% average", avg);
        }
    }

    let notes = student.notes();
    if !notes.is_empty() {
        println!();
        println!("  {}", "Notes".bright_green().bold());
        for note in notes {
            let marker = if note.important { "!".red().bold() } else { " ".normal() };
            println!(
                "   {} [{}] {} {}",
                marker,
                note.category,
                note.content,
                note.id.bright_black()
            );
        }
    }
}
