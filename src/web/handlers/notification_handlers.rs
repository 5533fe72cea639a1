// src/web/handlers/notification_handlers.rs
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::{Shutdown, State};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::auth::AuthenticatedUser;
use crate::core::repos::{NotificationRepository, DEFAULT_NOTIFICATION_LIMIT};
use crate::core::Database;
use crate::web::types::{ActionResponse, ApiError, ApiResult, NotificationsData};

const MAX_NOTIFICATION_LIMIT: u32 = 100;

/// Fails unless the notification exists and belongs to the caller
async fn check_owner(
    id: &str,
    auth: &AuthenticatedUser,
    repo: &NotificationRepository<'_>,
) -> ApiResult<()> {
    match repo.find(id).await.map_err(ApiError::database)? {
        Some(notification) if notification.user_id == auth.uid() => Ok(()),
        Some(_) => {
            warn!("User {} tried to touch notification {}", auth.uid(), id);
            Err(ApiError::forbidden(
                "This notification belongs to another user",
                "FORBIDDEN",
            ))
        }
        None => Err(ApiError::not_found(
            "Notification not found",
            "NOTIFICATION_NOT_FOUND",
        )),
    }
}

pub async fn list_notifications_handler(
    limit: Option<u32>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<NotificationsData>> {
    let limit = limit
        .unwrap_or(DEFAULT_NOTIFICATION_LIMIT)
        .clamp(1, MAX_NOTIFICATION_LIMIT);
    let repo = NotificationRepository::new(db);

    let notifications = repo
        .list_for_user(auth.uid(), limit)
        .await
        .map_err(ApiError::database)?;
    let unread_count = repo
        .unread_count(auth.uid())
        .await
        .map_err(ApiError::database)?;

    debug!(
        "{} notifications ({} unread) for {}",
        notifications.len(),
        unread_count,
        auth.uid()
    );
    Ok(Json(NotificationsData {
        notifications,
        unread_count,
    }))
}

/// Server-sent events for the caller: a `snapshot` with the latest
/// notifications, then one `change` per create, read or delete.
pub async fn notification_stream_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
    mut shutdown: Shutdown,
) -> ApiResult<EventStream![]> {
    // Subscribe first so nothing created during the snapshot is lost
    let mut changes = db.notifier().subscribe();
    let repo = NotificationRepository::new(db);
    let snapshot = NotificationsData {
        notifications: repo
            .list_for_user(auth.uid(), DEFAULT_NOTIFICATION_LIMIT)
            .await
            .map_err(ApiError::database)?,
        unread_count: repo
            .unread_count(auth.uid())
            .await
            .map_err(ApiError::database)?,
    };

    let uid = auth.uid().to_string();
    info!("Notification stream opened for {}", uid);

    Ok(EventStream! {
        yield Event::json(&snapshot).event("snapshot");
        loop {
            let event = tokio::select! {
                biased;
                received = changes.recv() => match received {
                    Ok(event) => event,
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Notification stream for {} skipped {} change(s)", uid, skipped);
                        continue;
                    }
                },
                _ = &mut shutdown => break,
            };
            if event.user_id == uid {
                yield Event::json(&event.change).event("change");
            }
        }
        debug!("Notification stream closed for {}", uid);
    })
}

pub async fn mark_read_handler(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    let repo = NotificationRepository::new(db);
    check_owner(id, &auth, &repo).await?;
    repo.mark_read(id).await.map_err(ApiError::database)?;

    Ok(Json(ActionResponse::success(
        "Notification marked as read",
        "notification_read",
    )))
}

pub async fn mark_all_read_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    let updated = NotificationRepository::new(db)
        .mark_all_read(auth.uid())
        .await
        .map_err(ApiError::database)?;

    Ok(Json(ActionResponse::success(
        format!("{} notifications marked as read", updated),
        "notifications_read",
    )))
}

pub async fn delete_notification_handler(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    let repo = NotificationRepository::new(db);
    check_owner(id, &auth, &repo).await?;
    repo.delete(id).await.map_err(ApiError::database)?;

    Ok(Json(ActionResponse::success(
        "Notification deleted",
        "notification_deleted",
    )))
}

pub async fn delete_all_notifications_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    let deleted = NotificationRepository::new(db)
        .delete_all(auth.uid())
        .await
        .map_err(ApiError::database)?;

    Ok(Json(ActionResponse::success(
        format!("{} notifications deleted", deleted),
        "notifications_deleted",
    )))
}
