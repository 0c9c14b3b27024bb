//! Notification models
//!
//! Notification history entries and per-user preference maps as they are
//! stored in the key-value boundary.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kinds of notification the dashboard can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    GradeUpdate,
    AttendanceAlert,
    AssignmentReminder,
    GeneralAnnouncement,
    PerformanceUpdate,
}

impl NotificationType {
    pub const ALL: [NotificationType; 5] = [
        Self::GradeUpdate,
        Self::AttendanceAlert,
        Self::AssignmentReminder,
        Self::GeneralAnnouncement,
        Self::PerformanceUpdate,
    ];

    /// Storage key used in preference maps and history entries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GradeUpdate => "grade_update",
            Self::AttendanceAlert => "attendance_alert",
            Self::AssignmentReminder => "assignment_reminder",
            Self::GeneralAnnouncement => "general_announcement",
            Self::PerformanceUpdate => "performance_update",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| Error::validation(format!("Unknown notification type '{}'", s.trim())))
    }
}

/// One entry of the notification history
///
/// `kind` is kept as the raw stored string so entries written by other
/// clients with unfamiliar types still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// The typed notification kind, when it is one this crate knows
    pub fn notification_type(&self) -> Option<NotificationType> {
        self.kind.parse().ok()
    }
}

/// Fields for a new history entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    pub fn new(kind: NotificationType, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Per-user map of notification type key to enabled flag
pub type NotificationPreferences = BTreeMap<String, bool>;

/// Preferences with every known notification type enabled
pub fn default_preferences() -> NotificationPreferences {
    NotificationType::ALL
        .iter()
        .map(|kind| (kind.as_str().to_string(), true))
        .collect()
}
