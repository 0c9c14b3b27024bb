//! Student store implementation
//!
//! Owns the student records and every mutating operation on them.

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::app::models::{
    AttendanceStatus, NewNote, NewStudent, Note, NotePatch, Performance, StudentId, StudentPatch,
    StudentRecord, validate_required,
};
use crate::config::Config;
use crate::constants::{DEFAULT_AVATAR_BACKGROUND, DEFAULT_AVATAR_BASE_URL};
use crate::{Error, Result};

/// Values the store fills in for fields a new record leaves out
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDefaults {
    pub avatar_base_url: String,
    pub avatar_background: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
            avatar_background: DEFAULT_AVATAR_BACKGROUND.to_string(),
        }
    }
}

impl From<&Config> for RecordDefaults {
    fn from(config: &Config) -> Self {
        Self {
            avatar_base_url: config.avatar_base_url.clone(),
            avatar_background: config.avatar_background.clone(),
        }
    }
}

impl RecordDefaults {
    /// Placeholder avatar URI derived from a display name
    pub fn placeholder_avatar(&self, name: &str) -> String {
        format!(
            "{}?name={}&background={}",
            self.avatar_base_url,
            urlencoding::encode(name.trim()),
            self.avatar_background
        )
    }
}

/// Persisted form of a store: the records plus the id high-water mark
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub last_issued_id: StudentId,
    pub students: Vec<StudentRecord>,
}

/// In-memory student collection
///
/// Records are kept in insertion order, which is the identity order the
/// filter-sort engine falls back to. Callers only ever receive copies.
#[derive(Debug, Clone, Default)]
pub struct StudentStore {
    records: Vec<StudentRecord>,
    /// Highest id this store has handed out or accepted
    high_water_id: StudentId,
    defaults: RecordDefaults,
}

impl StudentStore {
    /// Create an empty store with built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given record defaults
    pub fn with_defaults(defaults: RecordDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Create a store from existing records, rejecting duplicate ids
    pub fn from_records(records: Vec<StudentRecord>, defaults: RecordDefaults) -> Result<Self> {
        let mut store = Self::with_defaults(defaults);
        store.replace_all(records)?;
        Ok(store)
    }

    /// Restore a store from a snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot, defaults: RecordDefaults) -> Result<Self> {
        let mut store = Self::from_records(snapshot.students, defaults)?;
        store.high_water_id = store.high_water_id.max(snapshot.last_issued_id);
        Ok(store)
    }

    /// Copy of the records and id high-water mark for persistence
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            last_issued_id: self.high_water_id,
            students: self.records.clone(),
        }
    }

    pub fn defaults(&self) -> &RecordDefaults {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of every record in insertion order
    pub fn list(&self) -> Vec<StudentRecord> {
        self.records.clone()
    }

    /// Borrow the records without copying (read-only)
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Copy of a single record
    pub fn get(&self, id: StudentId) -> Result<StudentRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("Student", id))
    }

    /// Id the next added record will receive
    pub fn next_id(&self) -> StudentId {
        let current_max = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        current_max.max(self.high_water_id) + 1
    }

    /// Add a student, assigning an id and filling defaults
    pub fn add(&mut self, new: NewStudent) -> Result<StudentRecord> {
        self.add_on(new, Local::now().date_naive())
    }

    /// Add a student using `today` as the default enrollment date
    pub fn add_on(&mut self, new: NewStudent, today: NaiveDate) -> Result<StudentRecord> {
        let record = self.build_record(new, today)?;
        self.high_water_id = record.id;
        self.records.push(record.clone());
        debug!("Added student {} ({})", record.id, record.email);
        Ok(record)
    }

    fn build_record(&self, new: NewStudent, today: NaiveDate) -> Result<StudentRecord> {
        validate_required("name", &new.name)?;
        validate_required("email", &new.email)?;
        validate_required("course", &new.course)?;
        if let Some(performance) = &new.performance {
            performance.validate()?;
        }

        let name = new.name.trim().to_string();
        let avatar = new
            .avatar
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| self.defaults.placeholder_avatar(&name));
        let enrollment_date = new
            .enrollment_date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());

        Ok(StudentRecord {
            id: self.next_id(),
            name,
            email: new.email.trim().to_string(),
            course: new.course.trim().to_string(),
            grade: new.grade.unwrap_or_default(),
            enrollment_date,
            avatar,
            performance: new.performance,
            notes: new.notes,
        })
    }

    /// Remove a student and return the removed record
    pub fn remove(&mut self, id: StudentId) -> Result<StudentRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::not_found("Student", id))?;
        let removed = self.records.remove(index);
        debug!("Removed student {}", id);
        Ok(removed)
    }

    /// Merge a partial update into a student
    ///
    /// The merged record is validated before it replaces the stored one, so a
    /// patch that would blank a required field changes nothing.
    pub fn update(&mut self, id: StudentId, patch: &StudentPatch) -> Result<StudentRecord> {
        let record = self.record_mut(id)?;
        let mut merged = record.clone();
        merged.apply_patch(patch);
        merged.validate()?;
        validate_required("name", &merged.name)?;
        *record = merged.clone();
        Ok(merged)
    }

    /// Swap the whole collection for `records`
    ///
    /// Ids must be unique and every record valid; otherwise the current
    /// collection is kept as it was.
    pub fn replace_all(&mut self, records: Vec<StudentRecord>) -> Result<()> {
        let mut seen = std::collections::HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(Error::validation(format!(
                    "Duplicate student id {} in replacement collection",
                    record.id
                )));
            }
            record.validate()?;
        }

        let incoming_max = records.iter().map(|r| r.id).max().unwrap_or(0);
        self.high_water_id = self.high_water_id.max(incoming_max);
        self.records = records;
        debug!("Replaced collection with {} students", self.records.len());
        Ok(())
    }

    /// Remove every record, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    /// Replace a student's performance block
    pub fn set_performance(
        &mut self,
        id: StudentId,
        performance: Performance,
    ) -> Result<StudentRecord> {
        performance.validate()?;
        let record = self.record_mut(id)?;
        record.performance = Some(performance);
        Ok(record.clone())
    }

    /// Mark a student present or absent on a day (last write for a day wins)
    pub fn mark_attendance(
        &mut self,
        id: StudentId,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<StudentRecord> {
        let record = self.record_mut(id)?;
        record
            .performance
            .get_or_insert_with(Performance::default)
            .mark_attendance(date, status);
        debug!("Marked student {} {:?} on {}", id, status, date);
        Ok(record.clone())
    }

    /// Attach a note to a student
    pub fn add_note(&mut self, id: StudentId, new: NewNote) -> Result<Note> {
        validate_required("note content", &new.content)?;
        let record = self.record_mut(id)?;
        let note = Note {
            id: Uuid::new_v4().to_string(),
            content: new.content.trim().to_string(),
            category: new.category,
            important: new.important,
            created_at: Utc::now(),
            updated_at: None,
        };
        record.notes.get_or_insert_with(Vec::new).push(note.clone());
        Ok(note)
    }

    /// Edit a note's content, category or importance
    pub fn update_note(&mut self, id: StudentId, note_id: &str, patch: &NotePatch) -> Result<Note> {
        if let Some(content) = &patch.content {
            validate_required("note content", content)?;
        }
        let note = self.note_mut(id, note_id)?;
        if let Some(content) = &patch.content {
            note.content = content.trim().to_string();
        }
        if let Some(category) = patch.category {
            note.category = category;
        }
        if let Some(important) = patch.important {
            note.important = important;
        }
        note.updated_at = Some(Utc::now());
        Ok(note.clone())
    }

    /// Delete a note and return it
    pub fn delete_note(&mut self, id: StudentId, note_id: &str) -> Result<Note> {
        let record = self.record_mut(id)?;
        let notes = record
            .notes
            .as_mut()
            .ok_or_else(|| Error::not_found("Note", note_id))?;
        let index = notes
            .iter()
            .position(|n| n.id == note_id)
            .ok_or_else(|| Error::not_found("Note", note_id))?;
        Ok(notes.remove(index))
    }

    fn record_mut(&mut self, id: StudentId) -> Result<&mut StudentRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found("Student", id))
    }

    fn note_mut(&mut self, id: StudentId, note_id: &str) -> Result<&mut Note> {
        self.record_mut(id)?
            .notes
            .as_mut()
            .and_then(|notes| notes.iter_mut().find(|n| n.id == note_id))
            .ok_or_else(|| Error::not_found("Note", note_id))
    }
}
