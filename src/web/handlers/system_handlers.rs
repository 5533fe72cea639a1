// src/web/handlers/system_handlers.rs
use rocket::State;
use tracing::error;

use crate::core::Database;
use crate::web::types::{ApiError, ApiResult};

pub async fn health_handler(db: &State<Database>) -> ApiResult<&'static str> {
    match db.health_check().await {
        Ok(()) => Ok("OK"),
        Err(e) => {
            error!("Health check failed: {:#}", e);
            Err(ApiError::new(
                rocket::http::Status::ServiceUnavailable,
                "Database unavailable",
                "DATABASE_ERROR",
            ))
        }
    }
}
