//! Data models for the student roster
//!
//! This module contains the core data structures for student records and the
//! performance, attendance and note data nested inside them. Field names
//! serialize in camelCase so JSON snapshots match the dashboard's wire shape.

pub mod notification;

use crate::constants::grades;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned student identifier
pub type StudentId = u64;

// =============================================================================
// Grade
// =============================================================================

/// Letter grade as entered by the user (`A+`, `B-`, `N/A`, ...)
///
/// Grades are kept as written so that filters match exactly what was stored;
/// ordering goes through [`Grade::rank`] instead of string comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(String);

impl Grade {
    /// Create a grade from user input, trimming surrounding whitespace
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    /// The `N/A` grade given to rows without one
    pub fn not_assigned() -> Self {
        Self(grades::NOT_ASSIGNED.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position in the fixed rank table (`F` = 0 ... `A+` = 12)
    ///
    /// Lookup ignores ASCII case. Anything outside the table ranks as
    /// [`grades::UNRANKED`].
    pub fn rank(&self) -> u8 {
        grades::RANK_TABLE
            .iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(&self.0))
            .map(|(_, rank)| *rank)
            .unwrap_or(grades::UNRANKED)
    }

    /// True when the grade appears in the rank table
    pub fn is_letter_grade(&self) -> bool {
        grades::RANK_TABLE
            .iter()
            .any(|(symbol, _)| symbol.eq_ignore_ascii_case(&self.0))
    }
}

impl Default for Grade {
    fn default() -> Self {
        Self::not_assigned()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Grade {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// Student Record
// =============================================================================

/// One student's stored data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Unique identifier, assigned by the store and never changed
    pub id: StudentId,

    pub name: String,

    /// Contact email (never empty)
    pub email: String,

    /// Course name (never empty)
    pub course: String,

    #[serde(default)]
    pub grade: Grade,

    /// ISO 8601 date as stored; may be unparseable for imported data
    pub enrollment_date: String,

    /// Avatar URI or data URI
    #[serde(default)]
    pub avatar: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<Performance>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
}

impl StudentRecord {
    /// Attendance percentage, 0 when no performance data exists
    pub fn attendance(&self) -> u8 {
        self.performance
            .as_ref()
            .map(|p| p.attendance)
            .unwrap_or(0)
    }

    /// Enrollment date parsed as a calendar date
    pub fn enrollment_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.enrollment_date)
    }

    /// Notes attached to this student (empty slice when none)
    pub fn notes(&self) -> &[Note] {
        self.notes.as_deref().unwrap_or(&[])
    }

    /// Apply a partial update field by field
    ///
    /// Only fields present in the patch change. The id is not part of a
    /// patch and so can never be rewritten here.
    pub fn apply_patch(&mut self, patch: &StudentPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = &patch.email {
            self.email = email.trim().to_string();
        }
        if let Some(course) = &patch.course {
            self.course = course.trim().to_string();
        }
        if let Some(grade) = &patch.grade {
            self.grade = grade.clone();
        }
        if let Some(enrollment_date) = &patch.enrollment_date {
            self.enrollment_date = enrollment_date.trim().to_string();
        }
        if let Some(avatar) = &patch.avatar {
            self.avatar = avatar.clone();
        }
    }

    /// Check the record-level invariants (non-empty email and course)
    pub fn validate(&self) -> Result<()> {
        validate_required("email", &self.email)?;
        validate_required("course", &self.course)?;
        if let Some(performance) = &self.performance {
            performance.validate()?;
        }
        Ok(())
    }
}

/// Fields supplied when creating a student; the store fills the rest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub course: String,
    pub grade: Option<Grade>,
    pub enrollment_date: Option<String>,
    pub avatar: Option<String>,
    pub performance: Option<Performance>,
    pub notes: Option<Vec<Note>>,
}

impl NewStudent {
    /// Create a new student with the three required fields
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            course: course.into(),
            ..Default::default()
        }
    }

    pub fn with_grade(mut self, grade: impl Into<Grade>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_enrollment_date(mut self, date: impl Into<String>) -> Self {
        self.enrollment_date = Some(date.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_performance(mut self, performance: Performance) -> Self {
        self.performance = Some(performance);
        self
    }
}

/// Partial update for a student; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub grade: Option<Grade>,
    pub enrollment_date: Option<String>,
    pub avatar: Option<String>,
}

impl StudentPatch {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.course.is_none()
            && self.grade.is_none()
            && self.enrollment_date.is_none()
            && self.avatar.is_none()
    }
}

// =============================================================================
// Performance
// =============================================================================

/// Nested performance data for one student
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Performance {
    /// Attendance percentage (0-100)
    pub attendance: u8,
    pub assignments: Vec<ScoredItem>,
    pub exams: Vec<ScoredItem>,
    pub monthly_progress: Vec<MonthlyScore>,
    pub attendance_records: Vec<AttendanceRecord>,
}

/// An assignment or exam result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
}

impl ScoredItem {
    pub fn new(name: impl Into<String>, score: f64, max_score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            max_score,
        }
    }

    /// Score as a percentage of the maximum, `None` when the maximum is zero
    pub fn percent(&self) -> Option<f64> {
        (self.max_score > 0.0).then(|| self.score / self.max_score * 100.0)
    }
}

/// Progress score for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyScore {
    pub month: String,
    pub score: f64,
}

/// Attendance status for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl FromStr for AttendanceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(Error::validation(format!(
                "Unknown attendance status '{}' (expected present or absent)",
                other
            ))),
        }
    }
}

/// Attendance mark for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl Performance {
    /// Reject an attendance percentage outside 0-100
    pub fn validate(&self) -> Result<()> {
        if self.attendance > 100 {
            return Err(Error::validation(format!(
                "attendance must be between 0 and 100, got {}",
                self.attendance
            )));
        }
        Ok(())
    }

    /// Record attendance for a day, replacing any earlier mark for that day
    ///
    /// The attendance percentage is recomputed from the records afterwards.
    pub fn mark_attendance(&mut self, date: NaiveDate, status: AttendanceStatus) {
        self.attendance_records.retain(|record| record.date != date);
        self.attendance_records
            .push(AttendanceRecord { date, status });
        self.attendance = attendance_percentage(&self.attendance_records);
    }

    /// Average assignment score as a percentage
    pub fn average_assignment_percent(&self) -> Option<f64> {
        average_percent(&self.assignments)
    }

    /// Average exam score as a percentage
    pub fn average_exam_percent(&self) -> Option<f64> {
        average_percent(&self.exams)
    }

    /// Summary figures shown on the performance dashboard
    pub fn summary(&self) -> PerformanceSummary {
        PerformanceSummary {
            attendance: self.attendance,
            average_assignment: self.average_assignment_percent(),
            average_exam: self.average_exam_percent(),
            days_recorded: self.attendance_records.len(),
        }
    }
}

/// Headline performance figures for one student
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub attendance: u8,
    pub average_assignment: Option<f64>,
    pub average_exam: Option<f64>,
    pub days_recorded: usize,
}

/// Percentage of `present` marks, rounded to the nearest integer
pub fn attendance_percentage(records: &[AttendanceRecord]) -> u8 {
    if records.is_empty() {
        return 0;
    }
    let present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    ((present as f64 / records.len() as f64) * 100.0).round() as u8
}

fn average_percent(items: &[ScoredItem]) -> Option<f64> {
    let percents: Vec<f64> = items.iter().filter_map(ScoredItem::percent).collect();
    if percents.is_empty() {
        None
    } else {
        Some(percents.iter().sum::<f64>() / percents.len() as f64)
    }
}

// =============================================================================
// Notes
// =============================================================================

/// Category of a student note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    Academic,
    Behavior,
    Attendance,
    Achievement,
    #[default]
    General,
}

impl NoteCategory {
    pub const ALL: [NoteCategory; 5] = [
        Self::Academic,
        Self::Behavior,
        Self::Attendance,
        Self::Achievement,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Behavior => "behavior",
            Self::Attendance => "attendance",
            Self::Achievement => "achievement",
            Self::General => "general",
        }
    }
}

impl fmt::Display for NoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown note category '{}' (expected one of academic, behavior, attendance, achievement, general)",
                    s.trim()
                ))
            })
    }
}

/// A free-text note attached to a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub category: NoteCategory,
    #[serde(default)]
    pub important: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields for a new note
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNote {
    pub content: String,
    pub category: NoteCategory,
    pub important: bool,
}

impl NewNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: NoteCategory) -> Self {
        self.category = category;
        self
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

/// Partial update for a note
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub content: Option<String>,
    pub category: Option<NoteCategory>,
    pub important: Option<bool>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse an ISO 8601 date, accepting a bare date or a full timestamp
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Reject a required text field that is empty after trimming
pub fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}
