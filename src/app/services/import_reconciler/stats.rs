//! Import reports

use serde::Serialize;

use super::reconcile::ImportMode;

/// What an applied import did to the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub mode: ImportMode,

    /// Records in the collection before the import
    pub existing_before: usize,

    /// Records removed by a replacing import
    pub removed: usize,

    /// Rows added to the collection
    pub added: usize,

    /// Records in the collection afterwards
    pub total_after: usize,
}

impl ImportReport {
    /// One-line summary for logs and CLI output
    pub fn summary(&self) -> String {
        match self.mode {
            ImportMode::Replace => format!(
                "Replaced {} students with {} imported ({} total)",
                self.removed, self.added, self.total_after
            ),
            ImportMode::Merge => format!(
                "Merged {} imported students into {} existing ({} total)",
                self.added, self.existing_before, self.total_after
            ),
        }
    }
}
