//! Tests for notifications

pub mod center_tests;
pub mod templates_tests;

use crate::app::adapters::kv_store::MemoryStore;
use crate::app::models::notification::{NewNotification, NotificationType};
use crate::app::services::notifications::NotificationCenter;
use std::sync::Arc;

pub fn create_center() -> NotificationCenter<MemoryStore> {
    NotificationCenter::new(Arc::new(MemoryStore::new()), "user-1")
}

pub fn create_center_with(entries: &[(&str, &str)]) -> NotificationCenter<MemoryStore> {
    NotificationCenter::new(
        Arc::new(MemoryStore::with_entries(entries.iter().copied())),
        "user-1",
    )
}

pub fn grade_update(title: &str) -> NewNotification {
    NewNotification::new(NotificationType::GradeUpdate, title, "Grade changed")
}
