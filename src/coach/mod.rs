// src/coach/mod.rs
//! Server-side interview coach: builds prompts, calls the text generator and
//! decodes its output into questions and feedback.

pub mod gemini;
pub mod parser;
pub mod prompts;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::config_manager::AiConfig;
use crate::interview::question_bank::{already_asked, GENERAL_ROLE};
use crate::interview::types::{
    AnalyzeAnswerRequest, AnswerAnalysis, FinalFeedback, FinalFeedbackRequest, InterviewType,
    JobDetails, Question,
};
pub use gemini::GeminiClient;
use prompts::QuestionContext;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("AI provider is not configured")]
    NotConfigured,
    #[error("AI provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("AI provider request failed: {0}")]
    Network(String),
    #[error("AI provider returned an empty response")]
    EmptyResponse,
    #[error("Could not find a JSON object in the AI response")]
    NoJsonObject,
    #[error("Malformed AI response: {0}")]
    Malformed(String),
    #[error("Invalid AI response: {0}")]
    Invalid(String),
    #[error("Generated question was already asked: {0}")]
    DuplicateQuestion(String),
    #[error("Failed to encode prompt data: {0}")]
    Encoding(String),
}

impl CoachError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CoachError::NotConfigured | CoachError::Http { .. } | CoachError::Network(_) => {
                "AI_UNAVAILABLE"
            }
            CoachError::EmptyResponse
            | CoachError::NoJsonObject
            | CoachError::Malformed(_)
            | CoachError::Invalid(_) => "AI_INVALID_RESPONSE",
            CoachError::DuplicateQuestion(_) => "DUPLICATE_QUESTION",
            CoachError::Encoding(_) => "AI_REQUEST_ERROR",
        }
    }

    /// Text safe to show to API callers; details stay in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            CoachError::NotConfigured | CoachError::Http { .. } | CoachError::Network(_) => {
                "The AI service is currently unavailable"
            }
            CoachError::EmptyResponse
            | CoachError::NoJsonObject
            | CoachError::Malformed(_)
            | CoachError::Invalid(_) => "The AI service returned an unusable response",
            CoachError::DuplicateQuestion(_) => "The generated question was already asked",
            CoachError::Encoding(_) => "The AI request could not be prepared",
        }
    }
}

impl From<reqwest::Error> for CoachError {
    fn from(err: reqwest::Error) -> Self {
        CoachError::Network(err.without_url().to_string())
    }
}

/// Something that turns a prompt into model text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, CoachError>;
}

/// Stand-in used when no API key is configured
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, CoachError> {
        Err(CoachError::NotConfigured)
    }
}

#[derive(Clone)]
pub struct InterviewCoach {
    generator: Arc<dyn TextGenerator>,
    language: String,
}

impl InterviewCoach {
    pub fn new(generator: Arc<dyn TextGenerator>, language: impl Into<String>) -> Self {
        Self {
            generator,
            language: language.into(),
        }
    }

    pub fn from_config(config: &AiConfig) -> anyhow::Result<Self> {
        let generator: Arc<dyn TextGenerator> = match GeminiClient::from_config(config)? {
            Some(client) => {
                info!("Interview coach using Gemini model {}", client.model());
                Arc::new(client)
            }
            None => {
                warn!("GEMINI_API_KEY is not set, AI endpoints will report unavailable");
                Arc::new(UnconfiguredGenerator)
            }
        };
        Ok(Self::new(generator, config.language.clone()))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Generate one question that is not in `asked`
    pub async fn generate_question(
        &self,
        role: Option<&str>,
        job: Option<&JobDetails>,
        kind: InterviewType,
        asked: &[String],
    ) -> Result<Question, CoachError> {
        let role = role.map(str::trim).filter(|r| !r.is_empty());
        let context = match (job, role) {
            (Some(job), _) => QuestionContext::Job(job),
            (None, Some(role)) => QuestionContext::Role(role),
            (None, None) => {
                warn!("No role or job for question generation, using general prompt");
                QuestionContext::General
            }
        };

        let prompt = prompts::question_prompt(context, kind, asked, &self.language);
        let text = self.generator.generate(&prompt).await?;
        let question: Question = parser::parse(&text).inspect_err(|e| {
            warn!("Rejected generated question: {} (raw: {})", e, text);
        })?;

        if already_asked(asked, &question.question) {
            return Err(CoachError::DuplicateQuestion(question.question));
        }
        Ok(question)
    }

    pub async fn analyze_answer(
        &self,
        request: &AnalyzeAnswerRequest,
    ) -> Result<AnswerAnalysis, CoachError> {
        let prompt = prompts::analysis_prompt(
            &request.question,
            &request.answer,
            role_or_general(request.role.as_deref()),
            &self.language,
        );
        let text = self.generator.generate(&prompt).await?;
        parser::parse(&text).inspect_err(|e| {
            warn!("Rejected answer analysis: {} (raw: {})", e, text);
        })
    }

    pub async fn final_feedback(
        &self,
        request: &FinalFeedbackRequest,
    ) -> Result<FinalFeedback, CoachError> {
        let prompt = prompts::final_feedback_prompt(
            role_or_general(request.role.as_deref()),
            &request.answers,
            &self.language,
        )?;
        let text = self.generator.generate(&prompt).await?;
        parser::parse(&text).inspect_err(|e| {
            warn!("Rejected final feedback: {} (raw: {})", e, text);
        })
    }
}

fn role_or_general(role: Option<&str>) -> &str {
    role.map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(GENERAL_ROLE)
}
