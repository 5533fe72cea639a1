// src/interview/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of questions asked in one interview session
pub const QUESTIONS_PER_INTERVIEW: u32 = 5;

/// Per-question countdown, in seconds
pub const TIME_PER_QUESTION: u32 = 10 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Technical,
    Hr,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Technical => "technical",
            InterviewType::Hr => "hr",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" | "tech" => Ok(InterviewType::Technical),
            "hr" | "behavioral" => Ok(InterviewType::Hr),
            other => Err(format!(
                "Unknown interview type: {}. Use technical or hr",
                other
            )),
        }
    }
}

/// A generated interview question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    #[serde(default)]
    pub expected_keywords: Vec<String>,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerAnalysis {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub score: u32,
    pub detailed_feedback: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalFeedback {
    pub overall_score: u32,
    #[serde(default)]
    pub did_well: Vec<String>,
    #[serde(default)]
    pub future_recommendations: Vec<String>,
}

impl FinalFeedback {
    /// Feedback used when the final feedback call fails
    pub fn fallback() -> Self {
        Self {
            overall_score: 0,
            did_well: Vec::new(),
            future_recommendations: Vec::new(),
        }
    }
}

/// One question of a session together with the candidate's answer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
    pub analysis: Option<AnswerAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Job context an interview can be based on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default)]
    pub interview_type: Option<InterviewType>,
    #[serde(default)]
    pub questions_asked: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeAnswerRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalFeedbackRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub answers: Vec<QaPair>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_type_parsing() {
        assert_eq!("technical".parse(), Ok(InterviewType::Technical));
        assert_eq!(" HR ".parse(), Ok(InterviewType::Hr));
        assert!("sales".parse::<InterviewType>().is_err());
    }

    #[test]
    fn test_question_wire_format() {
        let json = r#"{"question":"Ce este un API?","expectedKeywords":["REST"],"difficulty":"beginner"}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.expected_keywords, vec!["REST".to_string()]);

        let request = GenerateQuestionRequest {
            role: Some("Data Scientist".to_string()),
            interview_type: Some(InterviewType::Hr),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["interviewType"], "hr");
        assert!(value.get("jobId").is_none());
        assert_eq!(value["questionsAsked"], serde_json::json!([]));
    }
}
