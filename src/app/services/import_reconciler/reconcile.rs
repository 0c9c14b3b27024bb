//! Merge and replace of validated rows into the store

use std::fmt;
use std::str::FromStr;

use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::models::NewStudent;
use crate::app::services::collection_store::StudentStore;
use crate::{Error, Result};

use super::stats::ImportReport;

/// How an import treats the existing collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Keep existing records and add the imported ones
    Merge,
    /// Clear the collection, then add the imported ones
    Replace,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "replace" => Ok(Self::Replace),
            other => Err(Error::validation(format!(
                "Unknown import mode '{}' (expected merge or replace)",
                other
            ))),
        }
    }
}

/// Result of a reconcile call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The import ran
    Applied(ImportReport),
    /// The collection is non-empty and no mode was chosen; nothing changed
    NeedsDecision { existing: usize, incoming: usize },
}

/// Apply validated rows to the store
///
/// With `mode == None` an empty store is filled as a merge would, and a
/// non-empty store is left untouched with the counts returned for the caller
/// to decide. Every incoming row is added through the store, so ids are
/// always assigned fresh.
///
/// The rows are checked against the store's required-field rules before
/// anything changes, so a failing row never leaves a half-applied import.
pub fn reconcile(
    store: &mut StudentStore,
    incoming: Vec<NewStudent>,
    mode: Option<ImportMode>,
    progress: Option<&ProgressBar>,
) -> Result<ReconcileOutcome> {
    let existing = store.len();
    let mode = match mode {
        Some(mode) => mode,
        None if existing == 0 => ImportMode::Merge,
        None => {
            info!(
                "Import needs a mode: {} existing, {} incoming",
                existing,
                incoming.len()
            );
            return Ok(ReconcileOutcome::NeedsDecision {
                existing,
                incoming: incoming.len(),
            });
        }
    };

    // Work on a copy so a failure part-way leaves the caller's store as it was
    let mut staged = store.clone();
    let removed = match mode {
        ImportMode::Replace => staged.clear(),
        ImportMode::Merge => 0,
    };

    let mut added = 0;
    for new in incoming {
        staged.add(new)?;
        added += 1;
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    *store = staged;

    let report = ImportReport {
        mode,
        existing_before: existing,
        removed,
        added,
        total_after: store.len(),
    };
    info!("{}", report.summary());
    Ok(ReconcileOutcome::Applied(report))
}
