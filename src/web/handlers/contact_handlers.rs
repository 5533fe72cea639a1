// src/web/handlers/contact_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, warn};

use crate::mail::{ContactRelay, ContactRequest};
use crate::web::types::{ActionResponse, ApiError, ApiResult};

pub async fn contact_handler(
    request: Json<ContactRequest>,
    relay: &State<ContactRelay>,
) -> ApiResult<Json<ActionResponse>> {
    let errors = request.validate();
    if !errors.is_empty() {
        warn!("Rejected contact form with {} errors", errors.len());
        return Err(ApiError::validation("Invalid contact form", errors));
    }

    match relay.relay(&request).await {
        Ok(()) => Ok(Json(ActionResponse::success(
            "Email trimis cu succes",
            "email_sent",
        ))),
        Err(e) => {
            error!("Failed to relay contact message: {:#}", e);
            Err(ApiError::new(
                Status::InternalServerError,
                "Eroare la trimiterea email-ului",
                "EMAIL_SEND_FAILED",
            )
            .with_suggestion("Try again in a few moments"))
        }
    }
}
