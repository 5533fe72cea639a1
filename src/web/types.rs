// src/web/types.rs

use rocket::form::FromForm;
use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::Request;
use tracing::error;

use crate::coach::CoachError;
use crate::core::models::{CompanyReview, Notification};
use crate::mail::FieldError;

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Action,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
}

impl ActionResponse {
    pub fn success(message: impl Into<String>, action: &str) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message: message.into(),
            action: action.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}

/// Error body sent with a matching HTTP status
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub error: String,
    pub error_code: &'static str,
    pub suggestions: Vec<String>,
    pub errors: Vec<FieldError>,
}

impl ApiError {
    pub fn new(status: Status, error: impl Into<String>, error_code: &'static str) -> Self {
        Self {
            status,
            error: error.into(),
            error_code,
            suggestions: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn bad_request(error: impl Into<String>, error_code: &'static str) -> Self {
        Self::new(Status::BadRequest, error, error_code)
    }

    pub fn unauthenticated() -> Self {
        Self::new(Status::Unauthorized, "User not authenticated.", "AUTH_REQUIRED")
    }

    pub fn forbidden(error: impl Into<String>, error_code: &'static str) -> Self {
        Self::new(Status::Forbidden, error, error_code)
    }

    pub fn not_found(error: impl Into<String>, error_code: &'static str) -> Self {
        Self::new(Status::NotFound, error, error_code)
    }

    pub fn validation(error: impl Into<String>, errors: Vec<FieldError>) -> Self {
        let mut api_error = Self::bad_request(error, "VALIDATION_ERROR");
        api_error.errors = errors;
        api_error
    }

    /// Storage failure; details go to the log, not to the caller
    pub fn database(err: anyhow::Error) -> Self {
        error!("Database operation failed: {:#}", err);
        Self::new(
            Status::InternalServerError,
            "Database operation failed",
            "DATABASE_ERROR",
        )
        .with_suggestion("Try again in a few moments")
    }
}

impl From<CoachError> for ApiError {
    fn from(err: CoachError) -> Self {
        error!("Interview coach failed: {}", err);
        let suggestion = match err {
            CoachError::DuplicateQuestion(_) => "Request another question",
            _ => "Try again in a few moments",
        };
        Self::new(
            Status::InternalServerError,
            err.public_message(),
            err.error_code(),
        )
            .with_suggestion(suggestion)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let body = StandardErrorResponse::new(
            self.error,
            self.error_code.to_string(),
            self.suggestions,
        )
        .with_errors(self.errors);
        status::Custom(self.status, Json(body)).respond_to(req)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ApplyRequest {
    pub announcement_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct NotificationsData {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CompanyReviewsData {
    pub reviews: Vec<CompanyReview>,
    pub average_rating: Option<f64>,
}

#[derive(FromForm)]
pub struct UserQuery {
    #[field(name = "userId")]
    pub user_id: Option<String>,
}

#[derive(FromForm)]
pub struct AnnouncementQuery {
    #[field(name = "companyId")]
    pub company_id: Option<String>,
}

#[derive(FromForm)]
pub struct ApplicationQuery {
    #[field(name = "studentId")]
    pub student_id: Option<String>,
    #[field(name = "announcementId")]
    pub announcement_id: Option<String>,
}

#[derive(FromForm)]
pub struct NotificationQuery {
    pub limit: Option<u32>,
}
