// src/web/handlers/admin_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use crate::auth::AdminUser;
use crate::core::approvals;
use crate::core::models::{ApprovalStatus, User};
use crate::core::repos::UserRepository;
use crate::core::Database;
use crate::web::types::{ActionResponse, ApiError, ApiResult};

pub async fn pending_companies_handler(
    admin: AdminUser,
    db: &State<Database>,
) -> ApiResult<Json<Vec<User>>> {
    let pending = UserRepository::new(db.pool())
        .list_pending_companies()
        .await
        .map_err(ApiError::database)?;
    info!(
        "Admin {} listed {} pending companies",
        admin.user.id,
        pending.len()
    );
    Ok(Json(pending))
}

pub async fn review_company_handler(
    id: &str,
    decision: ApprovalStatus,
    admin: AdminUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    let updated = approvals::review_company(db, id, decision)
        .await
        .map_err(ApiError::database)?;
    if !updated {
        return Err(ApiError::not_found("Company not found", "COMPANY_NOT_FOUND"));
    }

    info!("Admin {} set company {} to {}", admin.user.id, id, decision.as_str());
    Ok(Json(ActionResponse::success(
        format!("Company {} is now {}", id, decision.as_str()),
        match decision {
            ApprovalStatus::Approved => "company_approved",
            _ => "company_rejected",
        },
    )))
}
