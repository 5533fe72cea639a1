// src/interview/question_bank.rs
//! Static questions used when the question service is unavailable.

use rand::seq::SliceRandom;
use rand::Rng;

pub const GENERAL_ROLE: &str = "General";

const SOFTWARE_ENGINEER: &[&str] = &[
    "Describe a time you used a specific data structure or algorithm to solve a problem.",
    "Explain the concept of RESTful APIs.",
    "How do you approach debugging?",
    "Talk about a project where you had to work with legacy code.",
    "What is your experience with [a specific technology, e.g., React, Python]?",
    "How do you handle code reviews?",
    "Explain your testing strategy.",
];

const DATA_SCIENTIST: &[&str] = &[
    "Explain the difference between supervised and unsupervised learning.",
    "How do you handle missing data in a dataset?",
    "Describe a time you used statistical analysis to support a recommendation.",
    "What are some common challenges in building machine learning models?",
    "Explain the concept of overfitting and how to prevent it.",
    "How do you evaluate model performance?",
    "Describe your experience with data preprocessing.",
];

const MARKETING_SPECIALIST: &[&str] = &[
    "Describe a successful marketing campaign you worked on.",
    "How do you measure the effectiveness of a marketing campaign?",
    "What is your experience with [a specific marketing channel, e.g., social media, email marketing]?",
    "How do you stay updated on the latest marketing trends?",
    "Describe a time you had to adapt your marketing strategy based on results.",
    "How do you analyze market trends?",
    "What tools do you use for marketing analytics?",
];

const GENERAL: &[&str] = &[
    "Tell me about yourself.",
    "Why are you the best candidate for this position?",
    "What are your salary expectations?",
    "How do you handle conflict in the workplace?",
    "Do you have any questions for me?",
    "What are your career goals?",
    "How do you handle stress and pressure?",
];

const BANK: &[(&str, &[&str])] = &[
    ("Software Engineer", SOFTWARE_ENGINEER),
    ("Data Scientist", DATA_SCIENTIST),
    ("Marketing Specialist", MARKETING_SPECIALIST),
    (GENERAL_ROLE, GENERAL),
];

/// Roles with a dedicated question set
pub fn known_roles() -> impl Iterator<Item = &'static str> {
    BANK.iter().map(|(role, _)| *role)
}

fn lookup(role: &str) -> (&'static str, &'static [&'static str]) {
    let role = role.trim();
    BANK.iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(role))
        .copied()
        .unwrap_or((GENERAL_ROLE, GENERAL))
}

/// Questions for a role, falling back to the general set for unknown roles
pub fn questions_for(role: &str) -> &'static [&'static str] {
    lookup(role).1
}

/// Map a job title onto one of the known roles
pub fn infer_role(job_title: &str) -> &'static str {
    let lower = job_title.to_lowercase();
    if lower.contains("software engineer") {
        "Software Engineer"
    } else if lower.contains("data scientist") {
        "Data Scientist"
    } else {
        GENERAL_ROLE
    }
}

/// Normalized form used to compare question texts
pub fn normalize_question(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn already_asked(asked: &[String], question: &str) -> bool {
    let normalized = normalize_question(question);
    asked.iter().any(|q| normalize_question(q) == normalized)
}

/// Pick a question that has not been asked yet.
///
/// Falls through to the general set once the role set is exhausted and
/// returns `None` rather than repeating a question.
pub fn pick<R: Rng + ?Sized>(role: &str, asked: &[String], rng: &mut R) -> Option<&'static str> {
    let (name, role_questions) = lookup(role);
    let mut pools = vec![role_questions];
    if name != GENERAL_ROLE {
        pools.push(GENERAL);
    }

    pools.into_iter().find_map(|pool| {
        let available: Vec<&'static str> = pool
            .iter()
            .copied()
            .filter(|q| !already_asked(asked, q))
            .collect();
        available.choose(rng).copied()
    })
}

/// Local feedback shown when answer analysis is unavailable
pub fn fallback_feedback(answer: &str) -> String {
    let length = answer.trim().chars().count();
    let mut feedback = String::from("Thank you for your response.");
    if length > 50 {
        feedback.push_str(" You provided a detailed answer.");
    } else if length > 10 {
        feedback.push_str(" Your answer is concise.");
    } else {
        feedback.push_str(" Please try to elaborate more in your response.");
    }
    feedback.push_str(" (Feedback from fallback)");
    feedback
}
