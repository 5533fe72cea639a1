// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::auth::{AdminUser, AuthConfig, AuthError, AuthenticatedUser};
use crate::coach::InterviewCoach;
use crate::core::models::{
    Announcement, AnnouncementInput, Application, ApprovalStatus, EligibleCompany, ProfileInput,
    User,
};
use crate::core::{ConfigManager, Database};
use crate::interview::types::{
    AnalyzeAnswerRequest, AnswerAnalysis, FinalFeedback, FinalFeedbackRequest,
    GenerateQuestionRequest, JobDetails, Question,
};
use crate::mail::{ContactRelay, ContactRequest};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::status;
use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{
    catchers, delete, get, options, post, put, routes, Build, Request, Response, Rocket, Shutdown,
    State,
};
use tracing::{error, info, warn};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// Interview

#[get("/get-job-details/<job_id>")]
pub async fn get_job_details(job_id: &str, db: &State<Database>) -> ApiResult<Json<JobDetails>> {
    handlers::get_job_details_handler(job_id, db).await
}

#[post("/generate-question", data = "<request>")]
pub async fn generate_question(
    request: Json<GenerateQuestionRequest>,
    db: &State<Database>,
    coach: &State<InterviewCoach>,
) -> ApiResult<Json<Question>> {
    handlers::generate_question_handler(request, db, coach).await
}

#[post("/analyze-answer", data = "<request>")]
pub async fn analyze_answer(
    request: Json<AnalyzeAnswerRequest>,
    coach: &State<InterviewCoach>,
) -> ApiResult<Json<AnswerAnalysis>> {
    handlers::analyze_answer_handler(request, coach).await
}

#[post("/final-feedback", data = "<request>")]
pub async fn final_feedback(
    request: Json<FinalFeedbackRequest>,
    coach: &State<InterviewCoach>,
) -> ApiResult<Json<FinalFeedback>> {
    handlers::final_feedback_handler(request, coach).await
}

// Reviews

#[get("/eligible-companies?<query..>")]
pub async fn eligible_companies(
    query: UserQuery,
    db: &State<Database>,
) -> ApiResult<Json<Vec<EligibleCompany>>> {
    handlers::eligible_companies_handler(query.user_id.as_deref(), db).await
}

#[post("/submit-review", data = "<request>")]
pub async fn submit_review(
    request: Json<SubmitReviewRequest>,
    db: &State<Database>,
) -> ApiResult<status::Custom<Json<ActionResponse>>> {
    handlers::submit_review_handler(request, db).await
}

#[get("/companies/<id>/reviews")]
pub async fn company_reviews(
    id: &str,
    db: &State<Database>,
) -> ApiResult<Json<CompanyReviewsData>> {
    handlers::company_reviews_handler(id, db).await
}

// Contact

#[post("/contact", data = "<request>")]
pub async fn contact(
    request: Json<ContactRequest>,
    relay: &State<ContactRelay>,
) -> ApiResult<Json<ActionResponse>> {
    handlers::contact_handler(request, relay).await
}

// Profiles

#[get("/users/<id>")]
pub async fn get_profile(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<User>> {
    handlers::get_profile_handler(id, auth, db).await
}

#[put("/users/<id>", data = "<profile>")]
pub async fn save_profile(
    id: &str,
    profile: Json<ProfileInput>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<User>> {
    handlers::save_profile_handler(id, profile, auth, db).await
}

// Announcements

#[get("/announcements?<query..>")]
pub async fn list_announcements(
    query: AnnouncementQuery,
    db: &State<Database>,
) -> ApiResult<Json<Vec<Announcement>>> {
    handlers::list_announcements_handler(query.company_id.as_deref(), db).await
}

#[post("/announcements", data = "<input>")]
pub async fn create_announcement(
    input: Json<AnnouncementInput>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<status::Custom<Json<Announcement>>> {
    handlers::create_announcement_handler(input, auth, db).await
}

#[put("/announcements/<id>", data = "<input>")]
pub async fn update_announcement(
    id: &str,
    input: Json<AnnouncementInput>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<Announcement>> {
    handlers::update_announcement_handler(id, input, auth, db).await
}

#[delete("/announcements/<id>")]
pub async fn delete_announcement(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    handlers::delete_announcement_handler(id, auth, db).await
}

// Applications

#[post("/applications", data = "<request>")]
pub async fn apply(
    request: Json<ApplyRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<status::Custom<Json<Application>>> {
    handlers::apply_handler(request, auth, db).await
}

#[get("/applications?<query..>")]
pub async fn list_applications(
    query: ApplicationQuery,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<Vec<Application>>> {
    handlers::list_applications_handler(
        query.student_id.as_deref(),
        query.announcement_id.as_deref(),
        auth,
        db,
    )
    .await
}

#[post("/applications/<id>/approve")]
pub async fn approve_application(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<Application>> {
    handlers::decide_application_handler(id, ApprovalStatus::Approved, auth, db).await
}

#[post("/applications/<id>/reject")]
pub async fn reject_application(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<Application>> {
    handlers::decide_application_handler(id, ApprovalStatus::Rejected, auth, db).await
}

// Notifications

#[get("/notifications?<query..>")]
pub async fn list_notifications(
    query: NotificationQuery,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<NotificationsData>> {
    handlers::list_notifications_handler(query.limit, auth, db).await
}

#[get("/notifications/stream")]
pub async fn notification_stream(
    auth: AuthenticatedUser,
    db: &State<Database>,
    shutdown: Shutdown,
) -> ApiResult<EventStream![]> {
    handlers::notification_stream_handler(auth, db, shutdown).await
}

#[post("/notifications/<id>/read")]
pub async fn mark_notification_read(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    handlers::mark_read_handler(id, auth, db).await
}

#[post("/notifications/read-all")]
pub async fn mark_all_notifications_read(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    handlers::mark_all_read_handler(auth, db).await
}

#[delete("/notifications/<id>")]
pub async fn delete_notification(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    handlers::delete_notification_handler(id, auth, db).await
}

#[delete("/notifications")]
pub async fn delete_all_notifications(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    handlers::delete_all_notifications_handler(auth, db).await
}

// Admin

#[get("/admin/pending-companies")]
pub async fn pending_companies(
    admin: AdminUser,
    db: &State<Database>,
) -> ApiResult<Json<Vec<User>>> {
    handlers::pending_companies_handler(admin, db).await
}

#[post("/admin/companies/<id>/approve")]
pub async fn approve_company(
    id: &str,
    admin: AdminUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    handlers::review_company_handler(id, ApprovalStatus::Approved, admin, db).await
}

#[post("/admin/companies/<id>/reject")]
pub async fn reject_company(
    id: &str,
    admin: AdminUser,
    db: &State<Database>,
) -> ApiResult<Json<ActionResponse>> {
    handlers::review_company_handler(id, ApprovalStatus::Rejected, admin, db).await
}

// System

#[get("/health")]
pub async fn health(db: &State<Database>) -> ApiResult<&'static str> {
    handlers::health_handler(db).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers

fn error_body(error: &str, error_code: &str, suggestions: &[&str]) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        error.to_string(),
        error_code.to_string(),
        suggestions.iter().map(|s| s.to_string()).collect(),
    ))
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    error_body(
        "Invalid request format",
        "BAD_REQUEST",
        &[
            "Check your request JSON format",
            "Verify all required fields are present",
        ],
    )
}

#[rocket::catch(401)]
pub fn unauthorized(req: &Request) -> Json<StandardErrorResponse> {
    let auth_error = AuthError::cached(req).unwrap_or(AuthError::MissingToken);
    error_body(
        auth_error.message(),
        auth_error.code(),
        &["Send a valid identity token as 'Authorization: Bearer <token>'"],
    )
}

#[rocket::catch(403)]
pub fn forbidden(req: &Request) -> Json<StandardErrorResponse> {
    let auth_error = AuthError::cached(req).unwrap_or(AuthError::NotAdmin);
    error_body(auth_error.message(), auth_error.code(), &[])
}

#[rocket::catch(404)]
pub fn not_found(req: &Request) -> Json<StandardErrorResponse> {
    error_body(
        &format!("No route for {} {}", req.method(), req.uri().path()),
        "NOT_FOUND",
        &[],
    )
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<StandardErrorResponse> {
    error_body(
        "Request body has the wrong shape",
        "INVALID_BODY",
        &["Check field names and value types"],
    )
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    error_body(
        "Internal server error",
        "INTERNAL_ERROR",
        &[
            "Try again in a few moments",
            "Contact support if the problem persists",
        ],
    )
}

/// Server with every route mounted under `/api` and the given state managed
pub fn build_rocket(
    db: Database,
    coach: InterviewCoach,
    relay: ContactRelay,
    auth: AuthConfig,
) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(db)
        .manage(coach)
        .manage(relay)
        .manage(auth)
        .register(
            "/api",
            catchers![
                bad_request,
                unauthorized,
                forbidden,
                not_found,
                unprocessable_entity,
                internal_error
            ],
        )
        .mount(
            "/api",
            routes![
                get_job_details,
                generate_question,
                analyze_answer,
                final_feedback,
                eligible_companies,
                submit_review,
                company_reviews,
                contact,
                get_profile,
                save_profile,
                list_announcements,
                create_announcement,
                update_announcement,
                delete_announcement,
                apply,
                list_applications,
                approve_application,
                reject_application,
                list_notifications,
                notification_stream,
                mark_notification_read,
                mark_all_notifications_read,
                delete_notification,
                delete_all_notifications,
                pending_companies,
                approve_company,
                reject_company,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: &ConfigManager) -> Result<()> {
    config.ensure_directories().await?;

    let db = match Database::new(&config.database_path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e);
        }
    };

    let coach = InterviewCoach::from_config(&config.ai)?;
    let relay = ContactRelay::from_config(&config.mail)?;

    let auth_config = match &config.firebase_project_id {
        Some(project_id) => {
            let mut auth_config = AuthConfig::new(project_id.clone());
            if let Err(e) = auth_config.update_firebase_keys().await {
                warn!(
                    "Failed to fetch Firebase keys, authenticated routes will reject every token: {}",
                    e
                );
            }
            auth_config
        }
        None => {
            warn!("FIREBASE_PROJECT_ID is not set, authenticated routes will reject every token");
            AuthConfig::new(String::new())
        }
    };

    info!("Starting InternStud API server ({})", config.environment);
    info!("Database: {}", config.database_path.display());

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", "0.0.0.0"));

    build_rocket(db, coach, relay, auth_config)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
