//! Notification history, preferences and message templates
//!
//! Notifications are stored through the key-value boundary:
//!
//! - `notificationHistory` holds a JSON array of entries, newest first
//! - `notificationPreferences_{user}` holds a JSON object mapping each
//!   notification type to an enabled flag
//!
//! A history blob that cannot be read as JSON is logged and treated as
//! empty, so one bad write never locks the user out of their notifications.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use roster::app::adapters::kv_store::MemoryStore;
//! use roster::app::models::notification::{NewNotification, NotificationType};
//! use roster::app::services::notifications::NotificationCenter;
//!
//! # async fn example() -> roster::Result<()> {
//! let center = NotificationCenter::new(Arc::new(MemoryStore::new()), "user-1");
//! center
//!     .notify(NewNotification::new(
//!         NotificationType::GradeUpdate,
//!         "Grade updated",
//!         "Ann now has an A",
//!     ))
//!     .await?;
//! assert_eq!(center.unread_count().await?, 1);
//! # Ok(())
//! # }
//! ```

pub mod center;
pub mod templates;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use center::NotificationCenter;
pub use templates::{MessageTemplate, RenderedMessage, TemplateRenderer, template_for};
