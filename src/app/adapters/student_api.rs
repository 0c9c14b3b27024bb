//! Student API boundary and its mocked implementation
//!
//! The dashboard talks to students through [`StudentApi`]. The mocked
//! implementation keeps the collection in a [`StudentStore`] behind an async
//! lock, persists a snapshot to a [`KeyValueStore`] after every mutation and
//! answers the four HTTP-shaped routes of the student endpoint:
//!
//! | Method   | Path                 | Success | Body                      |
//! |----------|----------------------|---------|---------------------------|
//! | `GET`    | `/api/students`      | 200     | `{students, message}`     |
//! | `GET`    | `/api/students/{id}` | 200     | `{student, message}`      |
//! | `POST`   | `/api/students`      | 201     | `{student, message}`      |
//! | `DELETE` | `/api/students/{id}` | 200     | `{student, message}`      |
//!
//! Unknown ids answer 404 with `{message}`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use indicatif::ProgressBar;
use regex::Regex;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::app::models::{
    AttendanceStatus, NewNote, NewStudent, Note, NotePatch, Performance, StudentId, StudentPatch,
    StudentRecord,
};
use crate::app::services::collection_store::{RecordDefaults, StoreSnapshot, StudentStore};
use crate::app::services::import_reconciler::{ImportMode, ReconcileOutcome, reconcile};
use crate::config::Config;
use crate::constants::{STUDENTS_ROUTE, storage_keys};
use crate::{Error, Result};

use super::kv_store::{KeyValueStore, load_json, save_json};
use super::sample_data::sample_students;

/// Capability interface over the student collection
///
/// Every call returns copies; nothing handed out aliases the collection.
pub trait StudentApi: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<StudentRecord>>> + Send;

    fn get(&self, id: StudentId) -> impl Future<Output = Result<StudentRecord>> + Send;

    fn create(&self, new: NewStudent) -> impl Future<Output = Result<StudentRecord>> + Send;

    fn update(
        &self,
        id: StudentId,
        patch: StudentPatch,
    ) -> impl Future<Output = Result<StudentRecord>> + Send;

    fn delete(&self, id: StudentId) -> impl Future<Output = Result<StudentRecord>> + Send;

    fn update_performance(
        &self,
        id: StudentId,
        performance: Performance,
    ) -> impl Future<Output = Result<StudentRecord>> + Send;

    fn mark_attendance(
        &self,
        id: StudentId,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> impl Future<Output = Result<StudentRecord>> + Send;

    fn add_note(
        &self,
        id: StudentId,
        note: NewNote,
    ) -> impl Future<Output = Result<Note>> + Send;

    fn update_note(
        &self,
        id: StudentId,
        note_id: &str,
        patch: NotePatch,
    ) -> impl Future<Output = Result<Note>> + Send;

    fn delete_note(
        &self,
        id: StudentId,
        note_id: &str,
    ) -> impl Future<Output = Result<Note>> + Send;

    /// Remove every student, returning how many were removed
    fn clear(&self) -> impl Future<Output = Result<usize>> + Send;

    /// Reconcile validated rows into the collection under a single lock
    fn import(
        &self,
        incoming: Vec<NewStudent>,
        mode: Option<ImportMode>,
        progress: Option<ProgressBar>,
    ) -> impl Future<Output = Result<ReconcileOutcome>> + Send;
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Settings for the mocked API
#[derive(Debug, Clone, PartialEq)]
pub struct MockApiOptions {
    /// Delay applied before every call
    pub latency: Duration,
    /// Seed the sample students when no students are stored
    pub seed_sample_data: bool,
    pub defaults: RecordDefaults,
}

impl Default for MockApiOptions {
    fn default() -> Self {
        Self {
            latency: Duration::ZERO,
            seed_sample_data: false,
            defaults: RecordDefaults::default(),
        }
    }
}

impl From<&Config> for MockApiOptions {
    fn from(config: &Config) -> Self {
        Self {
            latency: Duration::from_millis(config.mock_latency_ms),
            seed_sample_data: config.seed_sample_data,
            defaults: RecordDefaults::from(config),
        }
    }
}

/// Response from the HTTP-shaped router
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn message(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": message.into() }))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Mocked student API backed by a key-value store
pub struct MockStudentApi<K: KeyValueStore> {
    store: Mutex<StudentStore>,
    kv: Arc<K>,
    latency: Duration,
    item_route: Regex,
}

impl<K: KeyValueStore> MockStudentApi<K> {
    /// Open the API over `kv`, restoring the persisted snapshot
    ///
    /// When nothing is stored (or the stored collection is empty) and
    /// seeding is enabled, the sample students are loaded and persisted.
    pub async fn open(kv: Arc<K>, options: MockApiOptions) -> Result<Self> {
        let snapshot: Option<StoreSnapshot> =
            load_json(kv.as_ref(), storage_keys::STUDENTS).await?;
        let restored = snapshot.is_some();
        let mut store = match snapshot {
            Some(snapshot) => StudentStore::from_snapshot(snapshot, options.defaults.clone())?,
            None => StudentStore::with_defaults(options.defaults.clone()),
        };

        if options.seed_sample_data && store.is_empty() {
            store.replace_all(sample_students())?;
            save_json(kv.as_ref(), storage_keys::STUDENTS, &store.snapshot()).await?;
            info!("Seeded {} sample students", store.len());
        } else if restored {
            info!("Restored {} students from storage", store.len());
        }

        let item_route = Regex::new(&format!(r"^{}/(\d+)/?$", regex::escape(STUDENTS_ROUTE)))
            .map_err(|e| Error::configuration(format!("Invalid student route pattern: {}", e)))?;

        Ok(Self {
            store: Mutex::new(store),
            kv,
            latency: options.latency,
            item_route,
        })
    }

    /// Open over `kv` with default options (no latency, no sample data)
    pub async fn empty(kv: Arc<K>) -> Result<Self> {
        Self::open(kv, MockApiOptions::default()).await
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn persist(&self, store: &StudentStore) -> Result<()> {
        save_json(self.kv.as_ref(), storage_keys::STUDENTS, &store.snapshot()).await
    }

    /// Run a read against the current collection
    async fn read<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&StudentStore) -> Result<T> + Send,
        T: Send,
    {
        self.simulate_latency().await;
        let store = self.store.lock().await;
        op(&store)
    }

    /// Apply a mutation to a staged copy, persist it, then commit
    ///
    /// A failed mutation or a failed write leaves the collection unchanged.
    async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut StudentStore) -> Result<T> + Send,
        T: Send,
    {
        self.simulate_latency().await;
        let mut store = self.store.lock().await;
        let mut staged = store.clone();
        let value = op(&mut staged)?;
        self.persist(&staged).await?;
        *store = staged;
        Ok(value)
    }

    /// Answer an HTTP-shaped request against the student routes
    pub async fn route(&self, method: &str, path: &str, body: Option<&Value>) -> HttpResponse {
        let path = path.split('?').next().unwrap_or(path);
        let method = method.to_ascii_uppercase();
        debug!("{} {}", method, path);

        let collection = path.trim_end_matches('/') == STUDENTS_ROUTE;
        let item_id = self
            .item_route
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().parse::<StudentId>());

        match (method.as_str(), collection, item_id) {
            ("GET", true, _) => match self.list().await {
                Ok(students) => HttpResponse::new(
                    200,
                    json!({ "students": students, "message": "Students fetched successfully" }),
                ),
                Err(e) => error_response(&e),
            },
            ("POST", true, _) => {
                let new = match body.map(|b| serde_json::from_value::<NewStudent>(b.clone())) {
                    Some(Ok(new)) => new,
                    Some(Err(e)) => {
                        return HttpResponse::message(400, format!("Invalid student body: {}", e));
                    }
                    None => return HttpResponse::message(400, "Request body is required"),
                };
                match self.create(new).await {
                    Ok(student) => HttpResponse::new(
                        201,
                        json!({ "student": student, "message": "Student added successfully" }),
                    ),
                    Err(e) => error_response(&e),
                }
            }
            (_, true, _) => HttpResponse::message(405, "Method not allowed"),
            (_, false, Some(Err(_))) => HttpResponse::message(404, "Student not found"),
            ("GET", false, Some(Ok(id))) => match self.get(id).await {
                Ok(student) => HttpResponse::new(
                    200,
                    json!({ "student": student, "message": "Student fetched successfully" }),
                ),
                Err(e) => error_response(&e),
            },
            ("DELETE", false, Some(Ok(id))) => match self.delete(id).await {
                Ok(student) => HttpResponse::new(
                    200,
                    json!({ "student": student, "message": "Student removed successfully" }),
                ),
                Err(e) => error_response(&e),
            },
            (_, false, Some(Ok(_))) => HttpResponse::message(405, "Method not allowed"),
            (_, false, None) => HttpResponse::message(404, "Not found"),
        }
    }
}

fn error_response(error: &Error) -> HttpResponse {
    match error {
        Error::NotFound { entity, .. } => HttpResponse::message(404, format!("{} not found", entity)),
        Error::Validation { message } => HttpResponse::message(400, message.clone()),
        other => {
            warn!("Student API request failed: {}", other);
            HttpResponse::message(500, other.to_string())
        }
    }
}

impl<K: KeyValueStore> StudentApi for MockStudentApi<K> {
    async fn list(&self) -> Result<Vec<StudentRecord>> {
        self.read(|store| Ok(store.list())).await
    }

    async fn get(&self, id: StudentId) -> Result<StudentRecord> {
        self.read(|store| store.get(id)).await
    }

    async fn create(&self, new: NewStudent) -> Result<StudentRecord> {
        self.mutate(|store| store.add(new)).await
    }

    async fn update(&self, id: StudentId, patch: StudentPatch) -> Result<StudentRecord> {
        self.mutate(|store| store.update(id, &patch)).await
    }

    async fn delete(&self, id: StudentId) -> Result<StudentRecord> {
        self.mutate(|store| store.remove(id)).await
    }

    async fn update_performance(
        &self,
        id: StudentId,
        performance: Performance,
    ) -> Result<StudentRecord> {
        self.mutate(|store| store.set_performance(id, performance))
            .await
    }

    async fn mark_attendance(
        &self,
        id: StudentId,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<StudentRecord> {
        self.mutate(|store| store.mark_attendance(id, date, status))
            .await
    }

    async fn add_note(&self, id: StudentId, note: NewNote) -> Result<Note> {
        self.mutate(|store| store.add_note(id, note)).await
    }

    async fn update_note(&self, id: StudentId, note_id: &str, patch: NotePatch) -> Result<Note> {
        self.mutate(|store| store.update_note(id, note_id, &patch))
            .await
    }

    async fn delete_note(&self, id: StudentId, note_id: &str) -> Result<Note> {
        self.mutate(|store| store.delete_note(id, note_id)).await
    }

    async fn clear(&self) -> Result<usize> {
        self.mutate(|store| Ok(store.clear())).await
    }

    async fn import(
        &self,
        incoming: Vec<NewStudent>,
        mode: Option<ImportMode>,
        progress: Option<ProgressBar>,
    ) -> Result<ReconcileOutcome> {
        self.mutate(|store| reconcile(store, incoming, mode, progress.as_ref()))
            .await
    }
}
