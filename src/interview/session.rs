// src/interview/session.rs
//! Interview session state machine.
//!
//! Every change to a session goes through [`InterviewSession::apply`], which
//! matches exhaustively on the current state and the incoming event. Rejected
//! events leave the session untouched.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::question_bank::{already_asked, infer_role, GENERAL_ROLE};
use super::transcript::TranscriptBuffer;
use super::types::{
    AnalyzeAnswerRequest, AnswerAnalysis, AnsweredQuestion, FinalFeedback, FinalFeedbackRequest,
    GenerateQuestionRequest, InterviewType, JobDetails, QaPair, QUESTIONS_PER_INTERVIEW,
    TIME_PER_QUESTION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InterviewState {
    Idle,
    RoleSelect,
    LoadingQuestion,
    WaitingForAnswer,
    LoadingFeedback,
    ShowingFeedback,
    ReadyForFinalFeedback,
    InterviewEnded,
}

impl InterviewState {
    /// The per-question countdown only runs while a question is being answered
    pub fn timer_active(self) -> bool {
        matches!(
            self,
            InterviewState::WaitingForAnswer
                | InterviewState::LoadingFeedback
                | InterviewState::ShowingFeedback
        )
    }
}

impl fmt::Display for InterviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterviewState::Idle => "idle",
            InterviewState::RoleSelect => "roleSelect",
            InterviewState::LoadingQuestion => "loadingQuestion",
            InterviewState::WaitingForAnswer => "waitingForAnswer",
            InterviewState::LoadingFeedback => "loadingFeedback",
            InterviewState::ShowingFeedback => "showingFeedback",
            InterviewState::ReadyForFinalFeedback => "readyForFinalFeedback",
            InterviewState::InterviewEnded => "interviewEnded",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    Completed,
    TimedOut,
    OutOfQuestions,
}

/// Result of analysing one answer
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Analyzed(AnswerAnalysis),
    /// Analysis unavailable, carries the locally generated feedback text
    Fallback(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Open(Option<JobDetails>),
    SelectRole(String),
    SelectType(InterviewType),
    Start,
    QuestionReady(String),
    QuestionsExhausted,
    EditAnswer(String),
    StartListening,
    StopListening,
    Transcript(String),
    SubmitAnswer,
    AnalysisReady(AnalysisOutcome),
    NextQuestion,
    FinalFeedbackReady(FinalFeedback),
    Tick(u32),
    /// Abandon the interview and go back to role selection
    Reset,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Open(_) => "open",
            SessionEvent::SelectRole(_) => "selectRole",
            SessionEvent::SelectType(_) => "selectType",
            SessionEvent::Start => "start",
            SessionEvent::QuestionReady(_) => "questionReady",
            SessionEvent::QuestionsExhausted => "questionsExhausted",
            SessionEvent::EditAnswer(_) => "editAnswer",
            SessionEvent::StartListening => "startListening",
            SessionEvent::StopListening => "stopListening",
            SessionEvent::Transcript(_) => "transcript",
            SessionEvent::SubmitAnswer => "submitAnswer",
            SessionEvent::AnalysisReady(_) => "analysisReady",
            SessionEvent::NextQuestion => "nextQuestion",
            SessionEvent::FinalFeedbackReady(_) => "finalFeedbackReady",
            SessionEvent::Tick(_) => "tick",
            SessionEvent::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Event '{event}' is not allowed in state '{state}'")]
    Invalid {
        state: InterviewState,
        event: &'static str,
    },
    #[error("Select an interview type before starting")]
    MissingInterviewType,
    #[error("Select a role or a job before starting")]
    MissingRole,
    #[error("Please provide an answer before submitting")]
    EmptyAnswer,
    #[error("Received an empty question")]
    EmptyQuestion,
    #[error("Question was already asked in this interview: {0}")]
    DuplicateQuestion(String),
    #[error("Answer input is locked while speech capture is active")]
    InputLocked,
}

#[derive(Debug, Clone)]
pub struct InterviewSession {
    state: InterviewState,
    job: Option<JobDetails>,
    role: String,
    interview_type: Option<InterviewType>,
    questions_asked: Vec<String>,
    current_question_number: u32,
    current_question: String,
    answer: String,
    transcript: TranscriptBuffer,
    listening: bool,
    feedback: Option<String>,
    time_left: u32,
    answers: Vec<AnsweredQuestion>,
    final_feedback: Option<FinalFeedback>,
    end_reason: Option<EndReason>,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        Self {
            state: InterviewState::Idle,
            job: None,
            role: String::new(),
            interview_type: None,
            questions_asked: Vec::new(),
            current_question_number: 0,
            current_question: String::new(),
            answer: String::new(),
            transcript: TranscriptBuffer::new(),
            listening: false,
            feedback: None,
            time_left: TIME_PER_QUESTION,
            answers: Vec::new(),
            final_feedback: None,
            end_reason: None,
        }
    }

    pub fn state(&self) -> InterviewState {
        self.state
    }

    pub fn job(&self) -> Option<&JobDetails> {
        self.job.as_ref()
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn interview_type(&self) -> Option<InterviewType> {
        self.interview_type
    }

    pub fn questions_asked(&self) -> &[String] {
        &self.questions_asked
    }

    pub fn current_question_number(&self) -> u32 {
        self.current_question_number
    }

    pub fn current_question(&self) -> &str {
        &self.current_question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    pub fn final_feedback(&self) -> Option<&FinalFeedback> {
        self.final_feedback.as_ref()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Role used to pick static questions when the question service fails
    pub fn fallback_role(&self) -> &str {
        match &self.job {
            Some(job) => infer_role(&job.title),
            None if self.role.trim().is_empty() => GENERAL_ROLE,
            None => self.role.trim(),
        }
    }

    pub fn question_request(&self) -> GenerateQuestionRequest {
        GenerateQuestionRequest {
            role: self.job.is_none().then(|| self.role.clone()),
            job_id: self.job.as_ref().map(|job| job.id.clone()),
            interview_type: self.interview_type,
            questions_asked: self.questions_asked.clone(),
        }
    }

    pub fn analysis_request(&self) -> AnalyzeAnswerRequest {
        AnalyzeAnswerRequest {
            question: self.current_question.clone(),
            answer: self.answer.clone(),
            role: Some(self.role.clone()),
        }
    }

    pub fn final_feedback_request(&self) -> FinalFeedbackRequest {
        FinalFeedbackRequest {
            role: Some(self.role.clone()),
            answers: self
                .answers
                .iter()
                .map(|item| QaPair {
                    question: item.question.clone(),
                    answer: item.answer.clone(),
                })
                .collect(),
        }
    }

    /// Apply an event and return the resulting state
    pub fn apply(&mut self, event: SessionEvent) -> Result<InterviewState, TransitionError> {
        use InterviewState as S;
        use SessionEvent as E;

        let state = self.state;
        match (state, event) {
            (_, E::Reset) => {
                *self = Self::new();
                self.state = S::RoleSelect;
            }
            (S::Idle | S::RoleSelect | S::InterviewEnded, E::Open(job)) => {
                *self = Self::new();
                if let Some(job) = job {
                    self.role = job.title.clone();
                    self.job = Some(job);
                }
                self.state = S::RoleSelect;
            }
            (S::RoleSelect, E::SelectRole(role)) => {
                self.role = role.trim().to_string();
            }
            (S::RoleSelect, E::SelectType(kind)) => {
                self.interview_type = Some(kind);
            }
            (S::RoleSelect, E::Start) => {
                if self.interview_type.is_none() {
                    return Err(TransitionError::MissingInterviewType);
                }
                if self.job.is_none() && self.role.is_empty() {
                    return Err(TransitionError::MissingRole);
                }
                self.current_question_number = 1;
                self.questions_asked.clear();
                self.answers.clear();
                self.final_feedback = None;
                self.reset_question_buffers();
                self.state = S::LoadingQuestion;
            }
            (S::LoadingQuestion, E::QuestionReady(text)) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(TransitionError::EmptyQuestion);
                }
                if already_asked(&self.questions_asked, &text) {
                    return Err(TransitionError::DuplicateQuestion(text));
                }
                self.questions_asked.push(text.clone());
                self.answers.push(AnsweredQuestion {
                    question: text.clone(),
                    answer: String::new(),
                    analysis: None,
                });
                self.current_question = text;
                self.state = S::WaitingForAnswer;
            }
            (S::LoadingQuestion, E::QuestionsExhausted) => {
                self.finish(EndReason::OutOfQuestions);
            }
            (S::WaitingForAnswer, E::EditAnswer(text)) => {
                if self.listening {
                    return Err(TransitionError::InputLocked);
                }
                self.answer = text;
            }
            (S::WaitingForAnswer, E::StartListening) => {
                self.listening = true;
                self.transcript.reset();
            }
            (S::WaitingForAnswer, E::StopListening) => {
                self.listening = false;
                self.transcript.reset();
            }
            (S::WaitingForAnswer, E::Transcript(text)) => {
                if self.listening {
                    self.transcript.append_to(&text, &mut self.answer);
                }
            }
            (S::WaitingForAnswer, E::SubmitAnswer) => {
                if self.answer.trim().is_empty() {
                    return Err(TransitionError::EmptyAnswer);
                }
                self.listening = false;
                self.transcript.reset();
                self.state = S::LoadingFeedback;
            }
            (S::LoadingFeedback, E::AnalysisReady(outcome)) => {
                let (analysis, feedback) = match outcome {
                    AnalysisOutcome::Analyzed(analysis) => {
                        let text = analysis.detailed_feedback.clone();
                        (Some(analysis), text)
                    }
                    AnalysisOutcome::Fallback(text) => (None, text),
                };
                let answer = self.answer.clone();
                if let Some(entry) = self
                    .answers
                    .iter_mut()
                    .find(|item| item.question == self.current_question)
                {
                    entry.answer = answer;
                    entry.analysis = analysis;
                }
                self.feedback = Some(feedback);
                self.state = if self.current_question_number >= QUESTIONS_PER_INTERVIEW {
                    S::ReadyForFinalFeedback
                } else {
                    S::ShowingFeedback
                };
            }
            (S::ShowingFeedback, E::NextQuestion) => {
                self.current_question_number += 1;
                self.reset_question_buffers();
                self.state = S::LoadingQuestion;
            }
            (S::ReadyForFinalFeedback, E::FinalFeedbackReady(feedback)) => {
                self.final_feedback = Some(FinalFeedback {
                    overall_score: feedback.overall_score.min(100),
                    ..feedback
                });
                self.finish(EndReason::Completed);
            }
            (current, E::Tick(seconds)) => {
                if current.timer_active() {
                    self.time_left = self.time_left.saturating_sub(seconds);
                    if self.time_left == 0 {
                        self.answer.clear();
                        self.listening = false;
                        self.transcript.reset();
                        self.finish(EndReason::TimedOut);
                    }
                }
            }
            (current, event) => {
                return Err(TransitionError::Invalid {
                    state: current,
                    event: event.name(),
                });
            }
        }

        Ok(self.state)
    }

    fn reset_question_buffers(&mut self) {
        self.current_question.clear();
        self.answer.clear();
        self.feedback = None;
        self.listening = false;
        self.transcript.reset();
        self.time_left = TIME_PER_QUESTION;
    }

    fn finish(&mut self, reason: EndReason) {
        self.end_reason = Some(reason);
        self.state = InterviewState::InterviewEnded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobDetails {
        JobDetails {
            id: "job-1".to_string(),
            title: "Junior Software Engineer".to_string(),
            company_name: "Acme".to_string(),
            description: "Build services".to_string(),
            requirements: "Rust".to_string(),
            location: "Cluj".to_string(),
            job_type: "internship".to_string(),
            salary: None,
            is_remote: false,
        }
    }

    fn analysis(score: u32) -> AnswerAnalysis {
        AnswerAnalysis {
            strengths: vec!["clear".to_string()],
            weaknesses: vec![],
            score,
            detailed_feedback: "Good structure".to_string(),
            suggestions: vec![],
        }
    }

    fn started(role: &str) -> InterviewSession {
        let mut session = InterviewSession::new();
        session.apply(SessionEvent::Open(None)).unwrap();
        session
            .apply(SessionEvent::SelectRole(role.to_string()))
            .unwrap();
        session
            .apply(SessionEvent::SelectType(InterviewType::Technical))
            .unwrap();
        session.apply(SessionEvent::Start).unwrap();
        session
    }

    fn answer_current(session: &mut InterviewSession, question: &str) -> InterviewState {
        session
            .apply(SessionEvent::QuestionReady(question.to_string()))
            .unwrap();
        session
            .apply(SessionEvent::EditAnswer("My answer".to_string()))
            .unwrap();
        session.apply(SessionEvent::SubmitAnswer).unwrap();
        session
            .apply(SessionEvent::AnalysisReady(AnalysisOutcome::Analyzed(
                analysis(70),
            )))
            .unwrap()
    }

    #[test]
    fn test_open_with_job_sets_context() {
        let mut session = InterviewSession::new();
        let state = session.apply(SessionEvent::Open(Some(job()))).unwrap();

        assert_eq!(state, InterviewState::RoleSelect);
        assert_eq!(session.role(), "Junior Software Engineer");
        assert_eq!(session.fallback_role(), "Software Engineer");

        let request = session.question_request();
        assert_eq!(request.job_id.as_deref(), Some("job-1"));
        assert!(request.role.is_none());
    }

    #[test]
    fn test_start_requires_type_and_role() {
        let mut session = InterviewSession::new();
        session.apply(SessionEvent::Open(None)).unwrap();

        assert_eq!(
            session.apply(SessionEvent::Start),
            Err(TransitionError::MissingInterviewType)
        );
        session
            .apply(SessionEvent::SelectType(InterviewType::Hr))
            .unwrap();
        assert_eq!(
            session.apply(SessionEvent::Start),
            Err(TransitionError::MissingRole)
        );
        assert_eq!(session.state(), InterviewState::RoleSelect);
    }

    #[test]
    fn test_full_interview_numbers_increase_to_five() {
        let mut session = started("Data Scientist");
        let mut seen_numbers = Vec::new();

        for n in 1..=QUESTIONS_PER_INTERVIEW {
            seen_numbers.push(session.current_question_number());
            let state = answer_current(&mut session, &format!("Question {}", n));
            if n < QUESTIONS_PER_INTERVIEW {
                assert_eq!(state, InterviewState::ShowingFeedback);
                session.apply(SessionEvent::NextQuestion).unwrap();
            } else {
                assert_eq!(state, InterviewState::ReadyForFinalFeedback);
            }
        }

        assert_eq!(seen_numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(session.answers().len(), 5);
        assert!(session.answers().iter().all(|a| a.answer == "My answer"));

        let end = session
            .apply(SessionEvent::FinalFeedbackReady(FinalFeedback {
                overall_score: 140,
                did_well: vec![],
                future_recommendations: vec![],
            }))
            .unwrap();
        assert_eq!(end, InterviewState::InterviewEnded);
        assert_eq!(session.end_reason(), Some(EndReason::Completed));
        assert_eq!(session.final_feedback().unwrap().overall_score, 100);

        // Ending is terminal for this run
        assert!(session.apply(SessionEvent::NextQuestion).is_err());
        assert!(session
            .apply(SessionEvent::FinalFeedbackReady(FinalFeedback::fallback()))
            .is_err());
    }

    #[test]
    fn test_duplicate_question_is_rejected() {
        let mut session = started("General");
        answer_current(&mut session, "Tell me about yourself.");
        session.apply(SessionEvent::NextQuestion).unwrap();

        let result = session.apply(SessionEvent::QuestionReady(
            "tell me about  yourself.".to_string(),
        ));
        assert!(matches!(result, Err(TransitionError::DuplicateQuestion(_))));
        assert_eq!(session.state(), InterviewState::LoadingQuestion);
        assert_eq!(session.questions_asked().len(), 1);
    }

    #[test]
    fn test_blank_answer_is_rejected_without_transition() {
        let mut session = started("General");
        session
            .apply(SessionEvent::QuestionReady("Why us?".to_string()))
            .unwrap();
        session
            .apply(SessionEvent::EditAnswer("   \n\t".to_string()))
            .unwrap();

        assert_eq!(
            session.apply(SessionEvent::SubmitAnswer),
            Err(TransitionError::EmptyAnswer)
        );
        assert_eq!(session.state(), InterviewState::WaitingForAnswer);
    }

    #[test]
    fn test_timer_expiry_ends_interview_and_discards_answer() {
        for sub_state in [
            InterviewState::WaitingForAnswer,
            InterviewState::LoadingFeedback,
            InterviewState::ShowingFeedback,
        ] {
            let mut session = started("General");
            session
                .apply(SessionEvent::QuestionReady("Why us?".to_string()))
                .unwrap();
            session
                .apply(SessionEvent::EditAnswer("half an answer".to_string()))
                .unwrap();
            if sub_state != InterviewState::WaitingForAnswer {
                session.apply(SessionEvent::SubmitAnswer).unwrap();
            }
            if sub_state == InterviewState::ShowingFeedback {
                session
                    .apply(SessionEvent::AnalysisReady(AnalysisOutcome::Fallback(
                        "fallback".to_string(),
                    )))
                    .unwrap();
            }
            assert_eq!(session.state(), sub_state);

            session.apply(SessionEvent::Tick(TIME_PER_QUESTION - 1)).unwrap();
            assert_eq!(session.state(), sub_state);
            assert_eq!(session.time_left(), 1);

            let state = session.apply(SessionEvent::Tick(5)).unwrap();
            assert_eq!(state, InterviewState::InterviewEnded);
            assert_eq!(session.end_reason(), Some(EndReason::TimedOut));
            assert!(session.answer().is_empty());
            assert!(session.final_feedback().is_none());
        }
    }

    #[test]
    fn test_timer_inactive_outside_answering_states() {
        let mut session = started("General");
        assert_eq!(session.state(), InterviewState::LoadingQuestion);
        session.apply(SessionEvent::Tick(TIME_PER_QUESTION)).unwrap();
        assert_eq!(session.state(), InterviewState::LoadingQuestion);
        assert_eq!(session.time_left(), TIME_PER_QUESTION);
    }

    #[test]
    fn test_next_question_resets_timer() {
        let mut session = started("General");
        session
            .apply(SessionEvent::QuestionReady("Q1".to_string()))
            .unwrap();
        session.apply(SessionEvent::Tick(120)).unwrap();
        session
            .apply(SessionEvent::EditAnswer("answer".to_string()))
            .unwrap();
        session.apply(SessionEvent::SubmitAnswer).unwrap();
        session
            .apply(SessionEvent::AnalysisReady(AnalysisOutcome::Fallback(
                "ok".to_string(),
            )))
            .unwrap();
        assert_eq!(session.time_left(), TIME_PER_QUESTION - 120);

        session.apply(SessionEvent::NextQuestion).unwrap();
        assert_eq!(session.time_left(), TIME_PER_QUESTION);
        assert_eq!(session.current_question_number(), 2);
        assert!(session.feedback().is_none());
    }

    #[test]
    fn test_speech_capture_locks_typing_and_appends_increments() {
        let mut session = started("General");
        session
            .apply(SessionEvent::QuestionReady("Q1".to_string()))
            .unwrap();
        session
            .apply(SessionEvent::EditAnswer("Intro. ".to_string()))
            .unwrap();
        session.apply(SessionEvent::StartListening).unwrap();

        assert_eq!(
            session.apply(SessionEvent::EditAnswer("overwrite".to_string())),
            Err(TransitionError::InputLocked)
        );

        for transcript in ["I led", "I led a team", "I led a team of four"] {
            session
                .apply(SessionEvent::Transcript(transcript.to_string()))
                .unwrap();
        }
        assert_eq!(session.answer(), "Intro. I led a team of four");

        session.apply(SessionEvent::SubmitAnswer).unwrap();
        assert!(!session.is_listening());
    }

    #[test]
    fn test_transcript_ignored_when_not_listening() {
        let mut session = started("General");
        session
            .apply(SessionEvent::QuestionReady("Q1".to_string()))
            .unwrap();
        session
            .apply(SessionEvent::Transcript("stray".to_string()))
            .unwrap();
        assert!(session.answer().is_empty());
    }

    #[test]
    fn test_fallback_analysis_keeps_answer_without_analysis() {
        let mut session = started("General");
        session
            .apply(SessionEvent::QuestionReady("Q1".to_string()))
            .unwrap();
        session
            .apply(SessionEvent::EditAnswer("An answer".to_string()))
            .unwrap();
        session.apply(SessionEvent::SubmitAnswer).unwrap();
        session
            .apply(SessionEvent::AnalysisReady(AnalysisOutcome::Fallback(
                "Thank you".to_string(),
            )))
            .unwrap();

        assert_eq!(session.feedback(), Some("Thank you"));
        assert_eq!(session.current_question_number(), 1);
        let entry = &session.answers()[0];
        assert_eq!(entry.answer, "An answer");
        assert!(entry.analysis.is_none());

        let request = session.final_feedback_request();
        assert_eq!(request.answers.len(), 1);
        assert_eq!(request.answers[0].answer, "An answer");
    }

    #[test]
    fn test_invalid_event_reports_state() {
        let mut session = InterviewSession::new();
        let err = session.apply(SessionEvent::SubmitAnswer).unwrap_err();
        assert_eq!(
            err,
            TransitionError::Invalid {
                state: InterviewState::Idle,
                event: "submitAnswer",
            }
        );
        assert_eq!(
            err.to_string(),
            "Event 'submitAnswer' is not allowed in state 'idle'"
        );
    }

    #[test]
    fn test_reopen_after_end_starts_clean() {
        let mut session = started("General");
        session.apply(SessionEvent::QuestionsExhausted).unwrap();
        assert_eq!(session.end_reason(), Some(EndReason::OutOfQuestions));

        session.apply(SessionEvent::Open(None)).unwrap();
        assert_eq!(session.state(), InterviewState::RoleSelect);
        assert!(session.end_reason().is_none());
        assert!(session.questions_asked().is_empty());
        assert!(session.interview_type().is_none());
    }

    #[test]
    fn test_reset_abandons_running_interview() {
        let mut session = InterviewSession::new();
        session.apply(SessionEvent::Open(Some(job()))).unwrap();
        session
            .apply(SessionEvent::SelectType(InterviewType::Hr))
            .unwrap();
        session.apply(SessionEvent::Start).unwrap();
        session
            .apply(SessionEvent::QuestionReady("Why us?".to_string()))
            .unwrap();
        session
            .apply(SessionEvent::EditAnswer("Half an answer".to_string()))
            .unwrap();
        session.apply(SessionEvent::Tick(90)).unwrap();
        session.apply(SessionEvent::SubmitAnswer).unwrap();
        assert_eq!(session.state(), InterviewState::LoadingFeedback);

        let state = session.apply(SessionEvent::Reset).unwrap();
        assert_eq!(state, InterviewState::RoleSelect);
        assert!(session.job().is_none());
        assert!(session.role().is_empty());
        assert!(session.interview_type().is_none());
        assert!(session.questions_asked().is_empty());
        assert!(session.answers().is_empty());
        assert!(session.answer().is_empty());
        assert_eq!(session.current_question_number(), 0);
        assert_eq!(session.time_left(), TIME_PER_QUESTION);

        assert_eq!(
            InterviewSession::new().apply(SessionEvent::Reset),
            Ok(InterviewState::RoleSelect)
        );
    }
}
