//! Notification history and preference commands

use crate::app::adapters::student_api::StudentApi;
use crate::app::models::StudentRecord;
use crate::app::models::notification::{NewNotification, Notification, NotificationType};
use crate::app::services::notifications::TemplateRenderer;
use crate::cli::args::{NotifyAction, NotifyArgs};
use anyhow::{Context, Result};
use colored::*;
use std::collections::BTreeMap;
use tracing::info;

use super::shared::Session;

pub async fn run_notify(session: &Session, args: &NotifyArgs) -> Result<()> {
    args.action.validate()?;
    let center = &session.notifications;

    match &args.action {
        NotifyAction::List { unread } => {
            let history: Vec<Notification> = center
                .history()
                .await?
                .into_iter()
                .filter(|n| !*unread || !n.read)
                .collect();
            if history.is_empty() {
                println!("{}", "No notifications.".yellow());
            }
            for notification in &history {
                print_notification(notification);
            }
            let unread_count = center.unread_count().await?;
            println!("{} unread", unread_count.to_string().bright_yellow().bold());
        }
        NotifyAction::Add {
            kind,
            title,
            message,
            student,
        } => {
            let new = match student {
                Some(id) => {
                    let record = session.roster.api().get(*id).await?;
                    from_template(*kind, &record, title.clone(), message.clone())?
                }
                None => NewNotification::new(
                    *kind,
                    title.clone().unwrap_or_default(),
                    message.clone().unwrap_or_default(),
                ),
            };
            match center.notify(new).await? {
                Some(notification) => println!(
                    "{} {}",
                    "Added".bright_green().bold(),
                    notification.id.bright_black()
                ),
                None => println!(
                    "{}",
                    format!("{} notifications are disabled for {}", kind, center.user_id())
                        .yellow()
                ),
            }
        }
        NotifyAction::Read { id } => {
            center.mark_read(id).await?;
            println!("{} {}", "Marked read".bright_green().bold(), id.bright_black());
        }
        NotifyAction::ReadAll => {
            let changed = center.mark_all_read().await?;
            println!("{} {} notifications", "Marked read".bright_green().bold(), changed);
        }
        NotifyAction::Delete { id } => {
            center.delete(id).await?;
            println!("{} {}", "Deleted".bright_green().bold(), id.bright_black());
        }
        NotifyAction::Clear => {
            let removed = center.clear().await?;
            println!("{} {} notifications", "Cleared".bright_green().bold(), removed);
        }
        NotifyAction::Prefs { enable, disable } => {
            for kind in enable {
                center.set_enabled(*kind, true).await?;
            }
            for kind in disable {
                center.set_enabled(*kind, false).await?;
            }
            println!("Preferences for {}:", center.user_id().bright_cyan());
            for kind in NotificationType::ALL {
                let state = if center.is_enabled(kind).await? {
                    "on".bright_green()
                } else {
                    "off".red()
                };
                println!("  {:<22} {}", kind.as_str(), state);
            }
        }
        NotifyAction::Alerts { threshold } => {
            let threshold = threshold.unwrap_or(session.config.low_attendance_threshold);
            let renderer = TemplateRenderer::new()?;
            let mut raised = 0;
            for record in session.roster.at_risk(threshold).await? {
                let Some(alert) = renderer.low_attendance_alert(&record, threshold) else {
                    continue;
                };
                if center.notify(alert).await?.is_some() {
                    raised += 1;
                }
            }
            info!("Raised {} attendance alerts under {}%", raised, threshold);
            println!(
                "{} attendance alerts raised (threshold {}%)",
                raised.to_string().bright_yellow().bold(),
                threshold
            );
        }
    }
    Ok(())
}

/// Notification text from the type's template filled in for one student
///
/// An explicit title or message wins over the rendered subject or body.
pub fn from_template(
    kind: NotificationType,
    record: &StudentRecord,
    title: Option<String>,
    message: Option<String>,
) -> Result<NewNotification> {
    let renderer = TemplateRenderer::new().context("Failed to prepare message templates")?;

    let mut values = BTreeMap::new();
    values.insert("studentName".to_string(), record.name.clone());
    values.insert("courseName".to_string(), record.course.clone());
    values.insert("grade".to_string(), record.grade.to_string());
    if let Some(average) = record
        .performance
        .as_ref()
        .and_then(|p| p.average_exam_percent().or(p.average_assignment_percent()))
    {
        values.insert("averageGrade".to_string(), format!("{:.1}%", average));
    }

    let rendered = renderer.render(kind, &values);
    Ok(NewNotification::new(
        kind,
        title.unwrap_or(rendered.subject),
        message.unwrap_or(rendered.body),
    ))
}

fn print_notification(notification: &Notification) {
    let title = if notification.read {
        notification.title.normal()
    } else {
        notification.title.bold()
    };
    println!(
        "{} {} {} {}",
        if notification.read { " ".normal() } else { "*".bright_yellow() },
        notification.timestamp.format("%Y-%m-%d %H:%M").to_string().bright_black(),
        format!("[{}]", notification.kind).cyan(),
        title
    );
    println!("    {}", notification.message.replace('\n', "\n    "));
    println!("    {}", notification.id.bright_black());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::adapters::sample_data::sample_students;

    #[test]
    fn test_from_template_fills_student_values() {
        let record = sample_students().remove(1);
        let new = from_template(NotificationType::GradeUpdate, &record, None, None).unwrap();
        assert_eq!(new.title, "Grade Update for Mathematics");
        assert!(new.message.starts_with("Hello Jane Smith,"));
        assert!(new.message.contains("updated to B+."));
    }

    #[test]
    fn test_from_template_keeps_explicit_text() {
        let record = sample_students().remove(0);
        let new = from_template(
            NotificationType::AssignmentReminder,
            &record,
            Some("Essay due".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(new.title, "Essay due");
        // No due date known, so the placeholder stays as written
        assert!(new.message.contains("{dueDate}"));
    }
}
