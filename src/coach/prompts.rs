// src/coach/prompts.rs
//! Prompt templates for question generation and answer feedback

use super::CoachError;
use crate::interview::types::{InterviewType, JobDetails, QaPair};

/// What a question should be tailored to
#[derive(Debug, Clone, Copy)]
pub enum QuestionContext<'a> {
    Job(&'a JobDetails),
    Role(&'a str),
    General,
}

fn focus(kind: InterviewType) -> &'static str {
    match kind {
        InterviewType::Technical => "Focus specifically on technical knowledge, problem-solving, algorithms, data structures, or specific technologies",
        InterviewType::Hr => "Focus specifically on teamwork, handling challenges, communication skills, motivation, career goals, or situational scenarios relevant to the workplace. Avoid technical questions",
    }
}

fn difficulty_scale(kind: InterviewType) -> &'static str {
    match kind {
        InterviewType::Technical => "beginner/intermediate/advanced",
        InterviewType::Hr => "easy/medium/hard",
    }
}

fn question_format(language: &str, scale: &str) -> String {
    format!(
        r#"Provide the question and all output in {language}.
Format the response as a JSON object with the following structure:
{{
  "question": "the question text in {language}",
  "expectedKeywords": ["keywords", "in", "{language}"],
  "difficulty": "{scale} in {language}"
}}"#
    )
}

fn exclusion(asked: &[String]) -> String {
    format!(
        "Ensure this question has NOT been asked before in this interview. The previously asked questions are: {}.",
        asked.join("; ")
    )
}

pub fn question_prompt(
    context: QuestionContext<'_>,
    kind: InterviewType,
    asked: &[String],
    language: &str,
) -> String {
    let label = match kind {
        InterviewType::Technical => "technical",
        InterviewType::Hr => "HR or behavioral",
    };
    let format_block = question_format(language, difficulty_scale(kind));

    match context {
        QuestionContext::Job(job) => format!(
            "Generate ONE {label} interview question for a {title} position at {company}. {focus} mentioned in the job description and requirements below. {exclusion}\nJob Description: {description}\nRequirements: {requirements}\n\n{format_block}",
            title = job.title,
            company = job.company_name,
            focus = focus(kind),
            exclusion = exclusion(asked),
            description = job.description,
            requirements = job.requirements,
        ),
        QuestionContext::Role(role) => format!(
            "Generate ONE {label} interview question for a {role} position. {focus} relevant to this role. {exclusion}\n\n{format_block}",
            focus = focus(kind),
            exclusion = exclusion(asked),
        ),
        QuestionContext::General => format!(
            "Generate ONE general interview question. {exclusion}\n\n{}",
            question_format(language, difficulty_scale(InterviewType::Hr)),
            exclusion = exclusion(asked),
        ),
    }
}

pub fn analysis_prompt(question: &str, answer: &str, role: &str, language: &str) -> String {
    format!(
        r#"Analyze this interview answer for a {role} position. Do not address the candidate directly. Start the feedback directly with the analysis.
Question: {question}
Answer: {answer}

Provide the feedback in {language}.
Format the response in the following JSON format:
{{
  "strengths": ["list", "of", "strengths", "in", "{language}"],
  "weaknesses": ["list", "of", "areas", "for", "improvement", "in", "{language}"],
  "score": number between 0 and 100,
  "detailedFeedback": "detailed feedback text in {language}",
  "suggestions": ["list", "of", "suggestions", "for", "improvement", "in", "{language}"]
}}"#
    )
}

pub fn final_feedback_prompt(
    role: &str,
    answers: &[QaPair],
    language: &str,
) -> Result<String, CoachError> {
    let transcript =
        serde_json::to_string_pretty(answers).map_err(|e| CoachError::Encoding(e.to_string()))?;

    Ok(format!(
        r#"Generate final interview feedback for a {role} position based on these answers. Do not address the candidate directly. Start the feedback directly with the analysis.

Based on the provided questions and the candidate's answers, provide:
1. An overall score for the interview out of 100.
2. A list of things the candidate did well during the interview (strengths).
3. A combined list of recommendations for the future, incorporating both specific areas for improvement based on the answers and general advice for future interviews.

Ensure the points for strengths and future recommendations are clear and distinct.
{transcript}

Provide the feedback and all output in {language}.
Format the response in the following JSON format:
{{
  "overallScore": number between 0 and 100,
  "didWell": ["list", "of", "strengths", "in", "{language}"],
  "futureRecommendations": ["combined", "list", "of", "improvements", "and", "recommendations", "in", "{language}"]
}}"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobDetails {
        JobDetails {
            id: "a1".to_string(),
            title: "Backend Intern".to_string(),
            company_name: "Nordic Labs".to_string(),
            description: "APIs in Rust".to_string(),
            requirements: "SQL, HTTP".to_string(),
            location: String::new(),
            job_type: String::new(),
            salary: None,
            is_remote: false,
        }
    }

    #[test]
    fn test_job_prompt_carries_job_context_and_exclusions() {
        let job = job();
        let asked = vec!["Q one".to_string(), "Q two".to_string()];
        let prompt = question_prompt(
            QuestionContext::Job(&job),
            InterviewType::Technical,
            &asked,
            "Romanian",
        );

        assert!(prompt.contains("Backend Intern position at Nordic Labs"));
        assert!(prompt.contains("Requirements: SQL, HTTP"));
        assert!(prompt.contains("Q one; Q two"));
        assert!(prompt.contains("all output in Romanian"));
        assert!(prompt.contains("beginner/intermediate/advanced"));
    }

    #[test]
    fn test_hr_role_prompt_avoids_technical_questions() {
        let prompt = question_prompt(
            QuestionContext::Role("Data Scientist"),
            InterviewType::Hr,
            &[],
            "English",
        );
        assert!(prompt.contains("HR or behavioral interview question for a Data Scientist"));
        assert!(prompt.contains("Avoid technical questions"));
        assert!(prompt.contains("easy/medium/hard in English"));
    }

    #[test]
    fn test_final_prompt_embeds_answers() {
        let answers = vec![QaPair {
            question: "Why us?".to_string(),
            answer: "Because".to_string(),
        }];
        let prompt = final_feedback_prompt("General", &answers, "Romanian").unwrap();
        assert!(prompt.contains("\"question\": \"Why us?\""));
        assert!(prompt.contains("\"overallScore\""));
    }
}
