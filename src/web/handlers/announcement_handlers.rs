// src/web/handlers/announcement_handlers.rs
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use super::profile_handlers::load_caller;
use crate::auth::AuthenticatedUser;
use crate::core::models::{Announcement, AnnouncementInput};
use crate::core::repos::AnnouncementRepository;
use crate::core::Database;
use crate::web::types::{ActionResponse, ApiError, ApiResult};

fn check_required(input: &AnnouncementInput) -> ApiResult<()> {
    let missing = input.missing_fields();
    if missing.is_empty() {
        return Ok(());
    }
    Err(ApiError::bad_request(
        format!("Missing required fields: {}", missing.join(", ")),
        "MISSING_FIELDS",
    ))
}

/// Announcement owned by the caller, or the matching 404/403
async fn owned_announcement(
    id: &str,
    auth: &AuthenticatedUser,
    repo: &AnnouncementRepository<'_>,
) -> ApiResult<Announcement> {
    let announcement = repo
        .find(id)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Announcement not found", "ANNOUNCEMENT_NOT_FOUND"))?;

    if announcement.company_id != auth.uid() {
        warn!(
            "User {} tried to modify announcement {} of {}",
            auth.uid(),
            id,
            announcement.company_id
        );
        return Err(ApiError::forbidden(
            "Only the owning company can modify this announcement",
            "FORBIDDEN",
        ));
    }
    Ok(announcement)
}

pub async fn list_announcements_handler(
    company_id: Option<&str>,
    db: &State<Database>,
) -> ApiResult<Json<Vec<Announcement>>> {
    let repo = AnnouncementRepository::new(db.pool());
    let announcements = match company_id {
        Some(company_id) => repo.list_for_company(company_id).await,
        None => repo.list_approved().await,
    }
    .map_err(ApiError::database)?;

    Ok(Json(announcements))
}

pub async fn create_announcement_handler(
    input: Json<AnnouncementInput>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<status::Custom<Json<Announcement>>> {
    let company = load_caller(&auth, db).await?;
    if !company.is_approved_company() {
        return Err(ApiError::forbidden(
            "Only approved companies can post announcements",
            "COMPANY_NOT_APPROVED",
        )
        .with_suggestion("Wait for an administrator to approve your company"));
    }
    check_required(&input)?;

    let announcement = AnnouncementRepository::new(db.pool())
        .create(&company, &input)
        .await
        .map_err(ApiError::database)?;
    Ok(status::Custom(Status::Created, Json(announcement)))
}

pub async fn update_announcement_handler(
    id: &str,
    input: Json<AnnouncementInput>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<Announcement>> {
    let repo = AnnouncementRepository::new(db.pool());
    owned_announcement(id, &auth, &repo).await?;
    check_required(&input)?;

    let updated = repo
        .update(id, &input)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Announcement not found", "ANNOUNCEMENT_NOT_FOUND"))?;
    info!("Announcement {} updated by {}", id, auth.uid());
    Ok(Json(updated))
}

pub async fn delete_announcement_handler(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    let repo = AnnouncementRepository::new(db.pool());
    owned_announcement(id, &auth, &repo).await?;

    repo.delete(id).await.map_err(ApiError::database)?;
    info!("Announcement {} deleted by {}", id, auth.uid());
    Ok(Json(ActionResponse::success(
        format!("Announcement {} deleted", id),
        "announcement_deleted",
    )))
}
