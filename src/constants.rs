//! Application constants for the roster
//!
//! This module contains default values, storage keys and lookup tables
//! used throughout the roster.

// =============================================================================
// Grades
// =============================================================================

/// Letter grades from highest to lowest, with their sort ranks
pub mod grades {
    /// Grade assigned to imported rows that carry no grade
    pub const NOT_ASSIGNED: &str = "N/A";

    /// Rank used for grades outside the table (sorts with `F`)
    pub const UNRANKED: u8 = 0;

    /// Fixed rank table: `F` = 0 up to `A+` = 12
    pub const RANK_TABLE: &[(&str, u8)] = &[
        ("A+", 12),
        ("A", 11),
        ("A-", 10),
        ("B+", 9),
        ("B", 8),
        ("B-", 7),
        ("C+", 6),
        ("C", 5),
        ("C-", 4),
        ("D+", 3),
        ("D", 2),
        ("D-", 1),
        ("F", 0),
    ];
}

// =============================================================================
// Defaults
// =============================================================================

/// Placeholder avatar service; the display name is appended URL-encoded
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

/// Background parameter appended to generated avatar URLs
pub const DEFAULT_AVATAR_BACKGROUND: &str = "random";

/// Attendance below this percentage triggers an attendance alert
pub const DEFAULT_LOW_ATTENDANCE_THRESHOLD: u8 = 75;

/// User id used for notification preferences when none is configured
pub const DEFAULT_USER_ID: &str = "local";

/// Application directory name under the platform config/data dirs
pub const APP_DIR_NAME: &str = "roster";

/// Config file name inside the application config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "ROSTER_";

/// Batches larger than this show a progress bar during import
pub const PROGRESS_BAR_THRESHOLD: usize = 50;

// =============================================================================
// CSV Export
// =============================================================================

/// Export file name prefix; the ISO date and `.csv` are appended
pub const EXPORT_FILE_PREFIX: &str = "student_data_";

/// Columns of the portable export projection, in header order
pub const EXPORT_COLUMNS: &[&str] = &["name", "email", "course", "grade", "enrollmentDate"];

/// Columns every imported row must carry a value for
pub const REQUIRED_IMPORT_COLUMNS: &[&str] = &["name", "email", "course"];

// =============================================================================
// Key-Value Storage Keys
// =============================================================================

/// Storage keys used against the key-value boundary
pub mod storage_keys {
    /// Persisted student collection snapshot
    pub const STUDENTS: &str = "students";

    /// Notification history list
    pub const NOTIFICATION_HISTORY: &str = "notificationHistory";

    /// Per-user preference map prefix; the user id is appended
    pub const NOTIFICATION_PREFERENCES_PREFIX: &str = "notificationPreferences_";
}

// =============================================================================
// Mock HTTP Routes
// =============================================================================

/// Collection route of the mocked student API
pub const STUDENTS_ROUTE: &str = "/api/students";
