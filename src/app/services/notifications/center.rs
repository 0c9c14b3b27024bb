//! Notification history and per-user preferences

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::app::adapters::kv_store::{KeyValueStore, save_json};
use crate::app::models::notification::{
    NewNotification, Notification, NotificationPreferences, NotificationType,
    default_preferences,
};
use crate::constants::storage_keys;
use crate::{Error, Result};

/// Notification history and preferences for one user
pub struct NotificationCenter<K: KeyValueStore> {
    kv: Arc<K>,
    user_id: String,
}

impl<K: KeyValueStore> NotificationCenter<K> {
    pub fn new(kv: Arc<K>, user_id: impl Into<String>) -> Self {
        Self {
            kv,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    fn preferences_key(&self) -> String {
        format!(
            "{}{}",
            storage_keys::NOTIFICATION_PREFERENCES_PREFIX,
            self.user_id
        )
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Stored history, newest first
    pub async fn history(&self) -> Result<Vec<Notification>> {
        let Some(text) = self.kv.get(storage_keys::NOTIFICATION_HISTORY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&text) {
            Ok(history) => Ok(history),
            Err(e) => {
                warn!("Ignoring unreadable notification history: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn save_history(&self, history: &[Notification]) -> Result<()> {
        save_json(self.kv.as_ref(), storage_keys::NOTIFICATION_HISTORY, &history).await
    }

    /// Add an unread entry at the front of the history
    pub async fn add(&self, new: NewNotification) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            kind: new.kind.as_str().to_string(),
            title: new.title,
            message: new.message,
            timestamp: Utc::now(),
            read: false,
        };

        let mut history = self.history().await?;
        history.insert(0, notification.clone());
        self.save_history(&history).await?;
        debug!("Added {} notification {}", notification.kind, notification.id);
        Ok(notification)
    }

    /// Add an entry only when the user has its type enabled
    pub async fn notify(&self, new: NewNotification) -> Result<Option<Notification>> {
        if !self.is_enabled(new.kind).await? {
            debug!("Skipping {} notification, disabled for {}", new.kind, self.user_id);
            return Ok(None);
        }
        self.add(new).await.map(Some)
    }

    /// Mark one entry as read
    pub async fn mark_read(&self, id: &str) -> Result<Notification> {
        let mut history = self.history().await?;
        let entry = history
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::not_found("Notification", id))?;
        entry.read = true;
        let updated = entry.clone();
        self.save_history(&history).await?;
        Ok(updated)
    }

    /// Mark every entry as read, returning how many changed
    pub async fn mark_all_read(&self) -> Result<usize> {
        let mut history = self.history().await?;
        let mut changed = 0;
        for entry in history.iter_mut().filter(|n| !n.read) {
            entry.read = true;
            changed += 1;
        }
        if changed > 0 {
            self.save_history(&history).await?;
        }
        Ok(changed)
    }

    /// Delete one entry
    pub async fn delete(&self, id: &str) -> Result<Notification> {
        let mut history = self.history().await?;
        let index = history
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| Error::not_found("Notification", id))?;
        let removed = history.remove(index);
        self.save_history(&history).await?;
        Ok(removed)
    }

    /// Empty the history, returning how many entries were dropped
    pub async fn clear(&self) -> Result<usize> {
        let removed = self.history().await?.len();
        self.save_history(&[]).await?;
        Ok(removed)
    }

    pub async fn unread_count(&self) -> Result<usize> {
        Ok(self.history().await?.iter().filter(|n| !n.read).count())
    }

    // -------------------------------------------------------------------------
    // Preferences
    // -------------------------------------------------------------------------

    /// The user's preferences
    ///
    /// With nothing stored every type is enabled. A stored value that is not
    /// a JSON object is logged and read as an empty map (everything disabled).
    pub async fn preferences(&self) -> Result<NotificationPreferences> {
        let Some(text) = self.kv.get(&self.preferences_key()).await? else {
            return Ok(default_preferences());
        };
        match serde_json::from_str::<Option<NotificationPreferences>>(&text) {
            Ok(Some(preferences)) => Ok(preferences),
            Ok(None) => Ok(default_preferences()),
            Err(e) => {
                warn!(
                    "Ignoring unreadable notification preferences for {}: {}",
                    self.user_id, e
                );
                Ok(NotificationPreferences::new())
            }
        }
    }

    /// Replace the user's preferences
    pub async fn set_preferences(&self, preferences: &NotificationPreferences) -> Result<()> {
        save_json(self.kv.as_ref(), &self.preferences_key(), preferences).await
    }

    /// Enable or disable one notification type
    pub async fn set_enabled(
        &self,
        kind: NotificationType,
        enabled: bool,
    ) -> Result<NotificationPreferences> {
        let mut preferences = self.preferences().await?;
        preferences.insert(kind.as_str().to_string(), enabled);
        self.set_preferences(&preferences).await?;
        Ok(preferences)
    }

    /// True only when the type is explicitly enabled
    pub async fn is_enabled(&self, kind: NotificationType) -> Result<bool> {
        Ok(self.preferences().await?.get(kind.as_str()) == Some(&true))
    }
}
