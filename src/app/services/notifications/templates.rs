//! Message templates with `{placeholder}` substitution

use std::collections::BTreeMap;

use regex::{Captures, Regex};

use crate::app::models::StudentRecord;
use crate::app::models::notification::{NewNotification, NotificationType};
use crate::{Error, Result};

/// Subject and body text for one notification type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    pub subject: &'static str,
    pub body: &'static str,
}

/// A template after substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

const SIGN_OFF: &str = "\n\nBest regards,\nStudent Dashboard Team";

pub fn template_for(kind: NotificationType) -> MessageTemplate {
    match kind {
        NotificationType::GradeUpdate => MessageTemplate {
            subject: "Grade Update for {courseName}",
            body: "Hello {studentName},\n\nYour grade for {courseName} has been updated to {grade}.",
        },
        NotificationType::AttendanceAlert => MessageTemplate {
            subject: "Attendance Alert for {courseName}",
            body: "Hello {studentName},\n\nYour attendance for {courseName} has fallen below {threshold}%. Please improve your attendance.",
        },
        NotificationType::AssignmentReminder => MessageTemplate {
            subject: "Assignment Reminder for {courseName}",
            body: "Hello {studentName},\n\nThis is a reminder that your assignment for {courseName} is due on {dueDate}.",
        },
        NotificationType::GeneralAnnouncement => MessageTemplate {
            subject: "{announcementTitle}",
            body: "Hello {studentName},\n\n{announcementBody}",
        },
        NotificationType::PerformanceUpdate => MessageTemplate {
            subject: "Performance Update",
            body: "Hello {studentName},\n\nYour overall performance has been updated. Your current average is {averageGrade}.",
        },
    }
}

/// Substitutes `{name}` placeholders from a value map
///
/// Placeholders without a value are left exactly as written.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    placeholder: Regex,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let placeholder = Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .map_err(|e| Error::configuration(format!("Invalid placeholder pattern: {}", e)))?;
        Ok(Self { placeholder })
    }

    /// Fill placeholders in `text`
    pub fn fill(&self, text: &str, values: &BTreeMap<String, String>) -> String {
        self.placeholder
            .replace_all(text, |caps: &Captures| {
                values
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Render the template for `kind`, appending the standard sign-off
    pub fn render(&self, kind: NotificationType, values: &BTreeMap<String, String>) -> RenderedMessage {
        let template = template_for(kind);
        RenderedMessage {
            subject: self.fill(template.subject, values),
            body: format!("{}{}", self.fill(template.body, values), SIGN_OFF),
        }
    }

    /// Attendance alert for a student under `threshold` percent, if any
    pub fn low_attendance_alert(
        &self,
        record: &StudentRecord,
        threshold: u8,
    ) -> Option<NewNotification> {
        let performance = record.performance.as_ref()?;
        if performance.attendance >= threshold {
            return None;
        }

        let values: BTreeMap<String, String> = [
            ("studentName", record.name.clone()),
            ("courseName", record.course.clone()),
            ("threshold", threshold.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let rendered = self.render(NotificationType::AttendanceAlert, &values);
        Some(NewNotification::new(
            NotificationType::AttendanceAlert,
            rendered.subject,
            format!(
                "{} is at {}% attendance in {}",
                record.name, performance.attendance, record.course
            ),
        ))
    }
}
