// src/web/handlers/review_handlers.rs
use chrono::Utc;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use crate::core::models::EligibleCompany;
use crate::core::repos::{average_rating, ReviewRepository, UserRepository};
use crate::core::Database;
use crate::web::types::{
    ActionResponse, ApiError, ApiResult, CompanyReviewsData, SubmitReviewRequest,
};

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Companies the student worked at in a finished experience
pub async fn eligible_companies_handler(
    user_id: Option<&str>,
    db: &State<Database>,
) -> ApiResult<Json<Vec<EligibleCompany>>> {
    let user_id = non_blank(user_id).ok_or_else(ApiError::unauthenticated)?;
    let users = UserRepository::new(db.pool());

    let student = users
        .find(user_id)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("User data not found.", "USER_NOT_FOUND"))?;

    let eligible = users
        .eligible_companies(&student, Utc::now())
        .await
        .map_err(ApiError::database)?;
    info!(
        "{} companies eligible for review by {}",
        eligible.len(),
        user_id
    );
    Ok(Json(eligible))
}

pub async fn submit_review_handler(
    request: Json<SubmitReviewRequest>,
    db: &State<Database>,
) -> ApiResult<status::Custom<Json<ActionResponse>>> {
    let student_id = non_blank(request.user_id.as_deref()).ok_or_else(ApiError::unauthenticated)?;

    let (Some(company_id), Some(rating), Some(comment)) = (
        non_blank(request.company_id.as_deref()),
        request.rating,
        non_blank(request.comment.as_deref()),
    ) else {
        return Err(ApiError::bad_request(
            "Company ID, rating, and comment are required.",
            "MISSING_FIELDS",
        ));
    };
    if !(1..=5).contains(&rating) {
        return Err(ApiError::bad_request(
            "Rating must be between 1 and 5.",
            "INVALID_RATING",
        ));
    }

    let student_name = UserRepository::new(db.pool())
        .find(student_id)
        .await
        .map_err(ApiError::database)?
        .map(|user| user.display_name())
        .unwrap_or_else(|| "Anonim".to_string());

    ReviewRepository::new(db.pool())
        .create(company_id, student_id, &student_name, rating, comment)
        .await
        .map_err(ApiError::database)?;

    Ok(status::Custom(
        Status::Created,
        Json(ActionResponse::success(
            "Review submitted successfully!",
            "review_submitted",
        )),
    ))
}

pub async fn company_reviews_handler(
    company_id: &str,
    db: &State<Database>,
) -> ApiResult<Json<CompanyReviewsData>> {
    let reviews = ReviewRepository::new(db.pool())
        .list_for_company(company_id)
        .await
        .map_err(ApiError::database)?;
    let average_rating = average_rating(&reviews);

    Ok(Json(CompanyReviewsData {
        reviews,
        average_rating,
    }))
}
