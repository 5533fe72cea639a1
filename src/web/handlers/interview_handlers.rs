// src/web/handlers/interview_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use crate::coach::InterviewCoach;
use crate::core::repos::AnnouncementRepository;
use crate::core::Database;
use crate::interview::types::{
    AnalyzeAnswerRequest, AnswerAnalysis, FinalFeedback, FinalFeedbackRequest,
    GenerateQuestionRequest, JobDetails, Question,
};
use crate::web::types::{ApiError, ApiResult};

async fn load_job(db: &Database, job_id: &str) -> ApiResult<Option<JobDetails>> {
    AnnouncementRepository::new(db.pool())
        .find(job_id)
        .await
        .map(|found| found.map(JobDetails::from))
        .map_err(ApiError::database)
}

pub async fn get_job_details_handler(
    job_id: &str,
    db: &State<Database>,
) -> ApiResult<Json<JobDetails>> {
    match load_job(db, job_id).await? {
        Some(job) => Ok(Json(job)),
        None => {
            warn!("Job details requested for unknown job {}", job_id);
            Err(ApiError::not_found("Job details not found.", "JOB_NOT_FOUND"))
        }
    }
}

pub async fn generate_question_handler(
    request: Json<GenerateQuestionRequest>,
    db: &State<Database>,
    coach: &State<InterviewCoach>,
) -> ApiResult<Json<Question>> {
    let request = request.into_inner();
    let role = request
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());

    if role.is_none() && request.job_id.is_none() {
        return Err(ApiError::bad_request(
            "Either role or jobId must be provided.",
            "MISSING_CONTEXT",
        ));
    }
    let Some(kind) = request.interview_type else {
        return Err(ApiError::bad_request(
            "Interview type must be provided (technical or hr).",
            "MISSING_INTERVIEW_TYPE",
        ));
    };

    let job = match request.job_id.as_deref() {
        Some(job_id) => match load_job(db, job_id).await? {
            Some(job) => Some(job),
            None => {
                return Err(ApiError::not_found(
                    "Job details not found for provided jobId.",
                    "JOB_NOT_FOUND",
                ))
            }
        },
        None => None,
    };

    info!(
        "Generating {} question #{} for {}",
        kind,
        request.questions_asked.len() + 1,
        job.as_ref().map(|j| j.title.as_str()).or(role).unwrap_or("general")
    );

    let question = coach
        .generate_question(role, job.as_ref(), kind, &request.questions_asked)
        .await?;
    Ok(Json(question))
}

pub async fn analyze_answer_handler(
    request: Json<AnalyzeAnswerRequest>,
    coach: &State<InterviewCoach>,
) -> ApiResult<Json<AnswerAnalysis>> {
    let analysis = coach.analyze_answer(&request).await?;
    info!("Answer analyzed, score {}", analysis.score);
    Ok(Json(analysis))
}

pub async fn final_feedback_handler(
    request: Json<FinalFeedbackRequest>,
    coach: &State<InterviewCoach>,
) -> ApiResult<Json<FinalFeedback>> {
    let feedback = coach.final_feedback(&request).await?;
    info!(
        "Final feedback for {} answers, overall score {}",
        request.answers.len(),
        feedback.overall_score
    );
    Ok(Json(feedback))
}
