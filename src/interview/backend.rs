// src/interview/backend.rs
use anyhow::Result;
use async_trait::async_trait;

use super::types::{
    AnalyzeAnswerRequest, AnswerAnalysis, FinalFeedback, FinalFeedbackRequest,
    GenerateQuestionRequest, JobDetails, Question,
};
use crate::core::ServiceClient;

const JOB_DETAILS_ENDPOINT: &str = "/api/get-job-details";
const GENERATE_QUESTION_ENDPOINT: &str = "/api/generate-question";
const ANALYZE_ANSWER_ENDPOINT: &str = "/api/analyze-answer";
const FINAL_FEEDBACK_ENDPOINT: &str = "/api/final-feedback";

/// The remote calls an interview depends on
#[async_trait]
pub trait InterviewBackend: Send + Sync {
    async fn job_details(&self, job_id: &str) -> Result<JobDetails>;

    async fn generate_question(&self, request: &GenerateQuestionRequest) -> Result<Question>;

    async fn analyze_answer(&self, request: &AnalyzeAnswerRequest) -> Result<AnswerAnalysis>;

    async fn final_feedback(&self, request: &FinalFeedbackRequest) -> Result<FinalFeedback>;
}

/// Backend talking to a running InternStud server
pub struct HttpInterviewBackend {
    client: ServiceClient,
}

impl HttpInterviewBackend {
    pub fn new(server_url: &str) -> Result<Self> {
        Ok(Self {
            client: ServiceClient::new(server_url)?,
        })
    }
}

#[async_trait]
impl InterviewBackend for HttpInterviewBackend {
    async fn job_details(&self, job_id: &str) -> Result<JobDetails> {
        self.client
            .get(&format!("{}/{}", JOB_DETAILS_ENDPOINT, job_id))
            .await
    }

    async fn generate_question(&self, request: &GenerateQuestionRequest) -> Result<Question> {
        self.client
            .post_json(GENERATE_QUESTION_ENDPOINT, request)
            .await
    }

    async fn analyze_answer(&self, request: &AnalyzeAnswerRequest) -> Result<AnswerAnalysis> {
        self.client.post_json(ANALYZE_ANSWER_ENDPOINT, request).await
    }

    async fn final_feedback(&self, request: &FinalFeedbackRequest) -> Result<FinalFeedback> {
        self.client.post_json(FINAL_FEEDBACK_ENDPOINT, request).await
    }
}
