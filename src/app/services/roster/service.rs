//! Roster service implementation

use chrono::{Local, NaiveDate};
use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::app::adapters::student_api::StudentApi;
use crate::app::models::{PerformanceSummary, StudentId, StudentRecord};
use crate::app::services::collection_store::RecordDefaults;
use crate::app::services::csv_codec::{decode, encode};
use crate::app::services::filter_sort::{FilterSpec, apply, distinct_courses};
use crate::app::services::import_reconciler::{
    ImportMode, ImportReport, ReconcileOutcome, export_file_name, export_rows, validate,
};
use crate::{Error, Result};

use super::plan::ImportPlan;

/// A generated CSV download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub text: String,
    pub rows: usize,
}

/// Dashboard flows over a [`StudentApi`]
pub struct Roster<A: StudentApi> {
    api: A,
    defaults: RecordDefaults,
}

impl<A: StudentApi> Roster<A> {
    pub fn new(api: A) -> Self {
        Self::with_defaults(api, RecordDefaults::default())
    }

    /// Use `defaults` when normalising imported rows
    pub fn with_defaults(api: A, defaults: RecordDefaults) -> Self {
        Self { api, defaults }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current students in store order
    pub async fn refresh(&self) -> Result<Vec<StudentRecord>> {
        let students = self.api.list().await?;
        debug!("Fetched {} students", students.len());
        Ok(students)
    }

    /// Filtered and sorted view of the current students
    pub async fn query(&self, spec: &FilterSpec) -> Result<Vec<StudentRecord>> {
        let students = self.refresh().await?;
        Ok(apply(&students, spec))
    }

    /// Course names for the course filter
    pub async fn courses(&self) -> Result<Vec<String>> {
        Ok(distinct_courses(&self.refresh().await?))
    }

    /// Performance summary for one student, `None` without performance data
    pub async fn performance_summary(&self, id: StudentId) -> Result<Option<PerformanceSummary>> {
        let student = self.api.get(id).await?;
        Ok(student.performance.as_ref().map(|p| p.summary()))
    }

    /// Students with performance data whose attendance is below `threshold`
    pub async fn at_risk(&self, threshold: u8) -> Result<Vec<StudentRecord>> {
        Ok(self
            .refresh()
            .await?
            .into_iter()
            .filter(|s| s.performance.as_ref().is_some_and(|p| p.attendance < threshold))
            .collect())
    }

    /// Decode and validate CSV text without changing anything
    pub async fn prepare_import(&self, text: &str) -> Result<ImportPlan> {
        self.prepare_import_on(text, Local::now().date_naive()).await
    }

    /// [`Self::prepare_import`] with an explicit default enrollment date
    pub async fn prepare_import_on(&self, text: &str, today: NaiveDate) -> Result<ImportPlan> {
        let decoded = decode(text)?;
        let validation = validate(&decoded.rows, today, &self.defaults);
        let existing = self.api.list().await?.len();

        let plan = ImportPlan {
            headers: decoded.headers,
            decode_stats: decoded.stats,
            validation,
            existing,
        };
        info!("Prepared import: {}", plan.summary());
        Ok(plan)
    }

    /// Apply a prepared import
    ///
    /// Fails with [`Error::ImportModeRequired`] when the collection is not
    /// empty and no mode is given; nothing changes in that case.
    pub async fn commit_import(
        &self,
        plan: ImportPlan,
        mode: Option<ImportMode>,
        progress: Option<ProgressBar>,
    ) -> Result<ImportReport> {
        let outcome = self
            .api
            .import(plan.validation.normalized, mode, progress)
            .await?;

        match outcome {
            ReconcileOutcome::Applied(report) => Ok(report),
            ReconcileOutcome::NeedsDecision { existing, incoming } => {
                Err(Error::ImportModeRequired { existing, incoming })
            }
        }
    }

    /// CSV export of every student, named for today
    pub async fn export_csv(&self) -> Result<CsvExport> {
        self.export_csv_on(Local::now().date_naive()).await
    }

    /// CSV export named for `date`
    pub async fn export_csv_on(&self, date: NaiveDate) -> Result<CsvExport> {
        let students = self.refresh().await?;
        let text = encode(&export_rows(&students))?;
        Ok(CsvExport {
            file_name: export_file_name(date),
            text,
            rows: students.len(),
        })
    }
}
