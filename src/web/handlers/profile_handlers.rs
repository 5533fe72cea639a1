// src/web/handlers/profile_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::core::models::{ApprovalStatus, ProfileInput, User, UserType};
use crate::core::repos::UserRepository;
use crate::core::Database;
use crate::mail::is_valid_email;
use crate::web::types::{ApiError, ApiResult};

/// Stored profile of the authenticated caller
pub(crate) async fn load_caller(auth: &AuthenticatedUser, db: &Database) -> ApiResult<User> {
    UserRepository::new(db.pool())
        .find(auth.uid())
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| {
            ApiError::forbidden("Complete your profile first", "PROFILE_REQUIRED")
                .with_suggestion(format!("PUT /api/users/{}", auth.uid()))
        })
}

pub async fn get_profile_handler(
    id: &str,
    _auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<User>> {
    UserRepository::new(db.pool())
        .find(id)
        .await
        .map_err(ApiError::database)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found", "USER_NOT_FOUND"))
}

pub async fn save_profile_handler(
    id: &str,
    profile: Json<ProfileInput>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<User>> {
    if auth.uid() != id {
        warn!("User {} tried to edit the profile of {}", auth.uid(), id);
        return Err(ApiError::forbidden(
            "You can only edit your own profile",
            "FORBIDDEN",
        ));
    }
    if !is_valid_email(&profile.email) {
        return Err(ApiError::bad_request("Invalid email address", "INVALID_EMAIL"));
    }
    if profile.user_type == UserType::Company
        && profile
            .company_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
    {
        return Err(ApiError::bad_request(
            "Company profiles need a company name",
            "MISSING_FIELDS",
        ));
    }

    let user = UserRepository::new(db.pool())
        .upsert_profile(id, &profile)
        .await
        .map_err(ApiError::database)?;

    if user.status == Some(ApprovalStatus::Pending) {
        info!("Company profile {} is awaiting approval", id);
    }
    Ok(Json(user))
}
