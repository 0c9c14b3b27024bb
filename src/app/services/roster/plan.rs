//! Import plans produced before any data changes

use crate::app::models::NewStudent;
use crate::app::services::csv_codec::DecodeStats;
use crate::app::services::import_reconciler::ValidationOutcome;

/// A decoded and validated import waiting for a commit
#[derive(Debug, Clone)]
pub struct ImportPlan {
    /// Column names of the file
    pub headers: Vec<String>,

    /// Diagnostics from decoding (ragged rows, blank lines)
    pub decode_stats: DecodeStats,

    /// Row errors and the normalised rows that will be imported
    pub validation: ValidationOutcome,

    /// Students in the collection when the plan was prepared
    pub existing: usize,
}

impl ImportPlan {
    /// Rows that will be imported
    pub fn incoming(&self) -> &[NewStudent] {
        &self.validation.normalized
    }

    /// True when the collection already has students, so a mode is required
    pub fn needs_decision(&self) -> bool {
        self.existing > 0
    }

    pub fn is_empty(&self) -> bool {
        self.validation.normalized.is_empty()
    }

    /// One-line description for logs and prompts
    pub fn summary(&self) -> String {
        format!(
            "{} rows ready, {} rejected, {} existing students",
            self.validation.normalized.len(),
            self.validation.errors.len(),
            self.existing
        )
    }
}
