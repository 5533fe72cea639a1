// src/coach/parser.rs
//! Decoding of model output into typed interview payloads.
//!
//! The model is asked for a JSON object but often wraps it in prose or code
//! fences. The span from the first `{` to the last `}` is decoded and then
//! validated; anything that does not fit is an error.

use serde::de::DeserializeOwned;

use super::CoachError;
use crate::interview::types::{AnswerAnalysis, FinalFeedback, Question};

const MAX_SCORE: u32 = 100;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for Question {
    fn validate(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question text is empty".to_string());
        }
        Ok(())
    }
}

impl Validate for AnswerAnalysis {
    fn validate(&self) -> Result<(), String> {
        if self.score > MAX_SCORE {
            return Err(format!("score {} is above {}", self.score, MAX_SCORE));
        }
        if self.detailed_feedback.trim().is_empty() {
            return Err("detailedFeedback is empty".to_string());
        }
        Ok(())
    }
}

impl Validate for FinalFeedback {
    fn validate(&self) -> Result<(), String> {
        if self.overall_score > MAX_SCORE {
            return Err(format!(
                "overallScore {} is above {}",
                self.overall_score, MAX_SCORE
            ));
        }
        Ok(())
    }
}

/// Slice from the first `{` to the last `}`
pub fn extract_json_object(text: &str) -> Result<&str, CoachError> {
    if text.trim().is_empty() {
        return Err(CoachError::EmptyResponse);
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(&text[start..=end]),
        _ => Err(CoachError::NoJsonObject),
    }
}

pub fn parse<T>(text: &str) -> Result<T, CoachError>
where
    T: DeserializeOwned + Validate,
{
    let json = extract_json_object(text)?;
    let value: T =
        serde_json::from_str(json).map_err(|e| CoachError::Malformed(e.to_string()))?;
    value.validate().map_err(CoachError::Invalid)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fenced_question() {
        let text = "Iată întrebarea:\n```json\n{\"question\": \"Ce este un index?\", \"expectedKeywords\": [\"B-tree\"], \"difficulty\": \"intermediar\"}\n```";
        let question: Question = parse(text).unwrap();
        assert_eq!(question.question, "Ce este un index?");
        assert_eq!(question.difficulty, "intermediar");
    }

    #[test]
    fn test_missing_object() {
        assert!(matches!(
            parse::<Question>("no json here"),
            Err(CoachError::NoJsonObject)
        ));
        assert!(matches!(
            parse::<Question>("} reversed {"),
            Err(CoachError::NoJsonObject)
        ));
        assert!(matches!(
            parse::<Question>("   "),
            Err(CoachError::EmptyResponse)
        ));
    }

    #[test]
    fn test_malformed_json_is_not_defaulted() {
        let result = parse::<AnswerAnalysis>(r#"{"strengths": ["a"], "score": "high"}"#);
        assert!(matches!(result, Err(CoachError::Malformed(_))));
    }

    #[test]
    fn test_out_of_range_score_is_invalid() {
        let text = r#"{"score": 140, "detailedFeedback": "ok"}"#;
        assert!(matches!(
            parse::<AnswerAnalysis>(text),
            Err(CoachError::Invalid(_))
        ));

        let text = r#"{"overallScore": 101}"#;
        assert!(matches!(
            parse::<FinalFeedback>(text),
            Err(CoachError::Invalid(_))
        ));
    }

    #[test]
    fn test_blank_question_is_invalid() {
        let text = r#"{"question": "  "}"#;
        assert!(matches!(parse::<Question>(text), Err(CoachError::Invalid(_))));
    }

    #[test]
    fn test_final_feedback_lists_default_to_empty() {
        let feedback: FinalFeedback = parse(r#"{"overallScore": 64}"#).unwrap();
        assert_eq!(feedback.overall_score, 64);
        assert!(feedback.did_well.is_empty());
    }
}
