// src/web/handlers/application_handlers.rs
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use super::profile_handlers::load_caller;
use crate::auth::AuthenticatedUser;
use crate::core::models::{
    Application, ApprovalStatus, NotificationData, NotificationType, UserType,
};
use crate::core::repos::{
    AnnouncementRepository, ApplicationFilter, ApplicationRepository, NotificationRepository,
};
use crate::core::Database;
use crate::web::types::{ApiError, ApiResult, ApplyRequest};

fn announcement_not_found() -> ApiError {
    ApiError::not_found("Announcement not found", "ANNOUNCEMENT_NOT_FOUND")
}

pub async fn apply_handler(
    request: Json<ApplyRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<status::Custom<Json<Application>>> {
    let student = load_caller(&auth, db).await?;
    if student.user_type != UserType::Student {
        return Err(ApiError::forbidden(
            "Only students can apply to announcements",
            "STUDENT_REQUIRED",
        ));
    }

    let announcement = AnnouncementRepository::new(db.pool())
        .find(&request.announcement_id)
        .await
        .map_err(ApiError::database)?
        .filter(|a| a.status == ApprovalStatus::Approved)
        .ok_or_else(announcement_not_found)?;

    let applications = ApplicationRepository::new(db.pool());
    if applications
        .exists(&announcement.id, &student.id)
        .await
        .map_err(ApiError::database)?
    {
        return Err(ApiError::new(
            Status::Conflict,
            "You already applied to this announcement",
            "ALREADY_APPLIED",
        ));
    }

    let application = applications
        .create(&announcement, &student.id, request.message.clone())
        .await
        .map_err(ApiError::database)?;

    NotificationRepository::new(db)
        .create(
            &announcement.company_id,
            NotificationType::Application,
            &format!(
                "{} a aplicat la anunțul \"{}\"",
                student.display_name(),
                announcement.title
            ),
            NotificationData {
                job_id: Some(announcement.id.clone()),
                application_id: Some(application.id.clone()),
            },
        )
        .await
        .map_err(ApiError::database)?;

    Ok(status::Custom(Status::Created, Json(application)))
}

/// Students see their own applications, companies the ones sent to them
pub async fn list_applications_handler(
    student_id: Option<&str>,
    announcement_id: Option<&str>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<Vec<Application>>> {
    let caller = load_caller(&auth, db).await?;

    let filter = match caller.user_type {
        UserType::Student => {
            if student_id.is_some_and(|id| id != caller.id) {
                return Err(ApiError::forbidden(
                    "Students can only list their own applications",
                    "FORBIDDEN",
                ));
            }
            ApplicationFilter {
                student_id: Some(caller.id.as_str()),
                announcement_id,
                company_id: None,
            }
        }
        UserType::Company => ApplicationFilter {
            student_id,
            announcement_id,
            company_id: Some(caller.id.as_str()),
        },
    };

    let applications = ApplicationRepository::new(db.pool())
        .list(&filter)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(applications))
}

pub async fn decide_application_handler(
    id: &str,
    decision: ApprovalStatus,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<Application>> {
    let applications = ApplicationRepository::new(db.pool());
    let application = applications
        .find(id)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Application not found", "APPLICATION_NOT_FOUND"))?;

    if application.company_id != auth.uid() {
        warn!(
            "User {} tried to decide application {} of {}",
            auth.uid(),
            id,
            application.company_id
        );
        return Err(ApiError::forbidden(
            "Only the company that received the application can decide on it",
            "FORBIDDEN",
        ));
    }

    let updated = applications
        .set_status(id, decision)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Application not found", "APPLICATION_NOT_FOUND"))?;

    let title = AnnouncementRepository::new(db.pool())
        .find(&updated.announcement_id)
        .await
        .map_err(ApiError::database)?
        .map(|a| a.title)
        .unwrap_or_else(|| "anunț șters".to_string());

    let (kind, message) = match decision {
        ApprovalStatus::Approved => (
            NotificationType::Approval,
            format!("Aplicația ta pentru \"{}\" a fost aprobată", title),
        ),
        _ => (
            NotificationType::Rejection,
            format!("Aplicația ta pentru \"{}\" a fost respinsă", title),
        ),
    };

    NotificationRepository::new(db)
        .create(
            &updated.student_id,
            kind,
            &message,
            NotificationData {
                job_id: Some(updated.announcement_id.clone()),
                application_id: Some(updated.id.clone()),
            },
        )
        .await
        .map_err(ApiError::database)?;

    info!(
        "Application {} {} by {}",
        id,
        decision.as_str(),
        auth.uid()
    );
    Ok(Json(updated))
}
