// src/core/repos/notifications.rs
use anyhow::Result;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::core::models::{Notification, NotificationData, NotificationType};
use crate::core::notifier::{NotificationChange, NotificationHub};
use crate::core::Database;

pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 10;

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, kind, message, read, job_id, application_id, created_at";

/// Store a notification through any executor, a transaction included.
/// Publishing to live streams is left to the caller.
pub(crate) async fn insert<'e, E>(executor: E, notification: &Notification) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, kind, message, read, job_id,
                                   application_id, created_at)
        VALUES (?, ?, ?, ?, FALSE, ?, ?, ?)
        "#,
    )
    .bind(&notification.id)
    .bind(&notification.user_id)
    .bind(notification.kind)
    .bind(&notification.message)
    .bind(&notification.data.job_id)
    .bind(&notification.data.application_id)
    .bind(notification.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Notification storage; every change is also published to live streams
pub struct NotificationRepository<'a> {
    pool: &'a SqlitePool,
    notifier: &'a NotificationHub,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            pool: db.pool(),
            notifier: db.notifier(),
        }
    }

    pub async fn find(&self, id: &str) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {} FROM notifications WHERE id = ?",
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn create(
        &self,
        user_id: &str,
        kind: NotificationType,
        message: &str,
        data: NotificationData,
    ) -> Result<Notification> {
        let notification = Notification::new(user_id, kind, message, data);
        insert(self.pool, &notification).await?;

        debug!("Notified user {}: {}", user_id, message);
        self.notifier.publish(
            user_id,
            NotificationChange::Created {
                notification: notification.clone(),
            },
        );
        Ok(notification)
    }

    /// Newest notifications of a user
    pub async fn list_for_user(&self, user_id: &str, limit: u32) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {} FROM notifications WHERE user_id = ? \
             ORDER BY created_at DESC, rowid DESC LIMIT ?",
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn unread_count(&self, user_id: &str) -> Result<i64> {
        let count = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    pub async fn mark_read(&self, id: &str) -> Result<bool> {
        let owner: Option<String> = sqlx::query_scalar(
            "UPDATE notifications SET read = TRUE WHERE id = ? RETURNING user_id",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(owner) = owner else {
            return Ok(false);
        };
        self.notifier
            .publish(&owner, NotificationChange::Read { id: id.to_string() });
        Ok(true)
    }

    pub async fn mark_all_read(&self, user_id: &str) -> Result<u64> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = ? AND read = FALSE")
                .bind(user_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() > 0 {
            self.notifier.publish(user_id, NotificationChange::AllRead);
        }
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let owner: Option<String> =
            sqlx::query_scalar("DELETE FROM notifications WHERE id = ? RETURNING user_id")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        let Some(owner) = owner else {
            return Ok(false);
        };
        self.notifier
            .publish(&owner, NotificationChange::Deleted { id: id.to_string() });
        Ok(true)
    }

    pub async fn delete_all(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() > 0 {
            self.notifier.publish(user_id, NotificationChange::Cleared);
        }
        Ok(result.rows_affected())
    }
}
