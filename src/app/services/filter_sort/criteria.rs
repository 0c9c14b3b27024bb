//! Filter and sort criteria
//!
//! Every field of [`FilterSpec`] is optional; an absent field does not
//! constrain the result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::app::models::Grade;
use crate::{Error, Result};

/// Inclusive attendance range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRange {
    pub min: u8,
    pub max: u8,
}

impl PerformanceRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// True when `value` lies within the range; an inverted range holds nothing
    pub fn contains(&self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Field a view can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Grade,
    EnrollmentDate,
    Performance,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Grade => "grade",
            Self::EnrollmentDate => "enrollmentDate",
            Self::Performance => "performance",
        }
    }

    /// Match a key name, accepting `enrollmentDate`, `enrollment_date` and `date`
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "grade" => Some(Self::Grade),
            "enrollmentdate" | "enrollment_date" | "enrollment-date" | "date" => {
                Some(Self::EnrollmentDate)
            }
            "performance" | "attendance" => Some(Self::Performance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A sort key with its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn asc(key: SortKey) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    pub fn desc(key: SortKey) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    /// Parse a sort option such as `name_asc` or `enrollmentDate_desc`
    ///
    /// Returns `None` for anything unrecognised. Callers treat that as "no
    /// sort", which keeps the input order.
    pub fn parse(option: &str) -> Option<Self> {
        let option = option.trim();
        let (key, direction) = option.rsplit_once(['_', ':'])?;
        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return None,
        };
        SortKey::from_name(key).map(|key| Self::new(key, direction))
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.key.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::validation(format!(
                "Unknown sort option '{}' (expected <name|grade|enrollmentDate|performance>_<asc|desc>)",
                s.trim()
            ))
        })
    }
}

/// Filter and sort criteria for one view of the collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Quick search over name or email
    pub search: Option<String>,
    pub name_contains: Option<String>,
    pub email_contains: Option<String>,
    /// Exact course match
    pub course: Option<String>,
    /// Exact grade match
    pub grade: Option<Grade>,
    pub enrollment_date_from: Option<NaiveDate>,
    pub enrollment_date_to: Option<NaiveDate>,
    pub performance_range: Option<PerformanceRange>,
    pub sort: Option<SortSpec>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    pub fn with_email_contains(mut self, needle: impl Into<String>) -> Self {
        self.email_contains = Some(needle.into());
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    pub fn with_grade(mut self, grade: impl Into<Grade>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_enrollment_range(
        mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        self.enrollment_date_from = from;
        self.enrollment_date_to = to;
        self
    }

    pub fn with_performance_range(mut self, min: u8, max: u8) -> Self {
        self.performance_range = Some(PerformanceRange::new(min, max));
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// True when no filter field is set (sorting aside)
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_none()
            && self.name_contains.is_none()
            && self.email_contains.is_none()
            && self.course.is_none()
            && self.grade.is_none()
            && self.enrollment_date_from.is_none()
            && self.enrollment_date_to.is_none()
            && self.performance_range.is_none()
    }
}
