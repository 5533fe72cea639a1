// src/interview/simulator.rs
//! Drives an [`InterviewSession`] against an [`InterviewBackend`], falling back
//! to local questions and feedback whenever a remote call fails.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::backend::InterviewBackend;
use super::question_bank::{fallback_feedback, pick};
use super::session::{
    AnalysisOutcome, InterviewSession, InterviewState, SessionEvent, TransitionError,
};
use super::types::{FinalFeedback, InterviewType};

pub struct InterviewSimulator<B> {
    backend: B,
    session: InterviewSession,
    rng: StdRng,
}

impl<B: InterviewBackend> InterviewSimulator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_rng(backend, StdRng::from_entropy())
    }

    /// Use a fixed random source for the fallback question picks
    pub fn with_rng(backend: B, rng: StdRng) -> Self {
        Self {
            backend,
            session: InterviewSession::new(),
            rng,
        }
    }

    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    pub fn state(&self) -> InterviewState {
        self.session.state()
    }

    /// Open the simulator, optionally for a specific job.
    ///
    /// When the job cannot be loaded the simulator opens for manual role
    /// selection instead.
    pub async fn open(&mut self, job_id: Option<&str>) -> Result<InterviewState, TransitionError> {
        let job = match job_id {
            Some(id) => match self.backend.job_details(id).await {
                Ok(job) => {
                    info!("Loaded job {} ({}) for interview", job.id, job.title);
                    Some(job)
                }
                Err(e) => {
                    warn!("Could not load job {}, using manual selection: {:#}", id, e);
                    None
                }
            },
            None => None,
        };

        self.session.apply(SessionEvent::Open(job))
    }

    pub fn select_role(&mut self, role: &str) -> Result<InterviewState, TransitionError> {
        self.session
            .apply(SessionEvent::SelectRole(role.to_string()))
    }

    pub fn select_type(&mut self, kind: InterviewType) -> Result<InterviewState, TransitionError> {
        self.session.apply(SessionEvent::SelectType(kind))
    }

    pub async fn start(&mut self) -> Result<InterviewState, TransitionError> {
        self.session.apply(SessionEvent::Start)?;
        self.load_question().await
    }

    pub fn edit_answer(&mut self, text: &str) -> Result<InterviewState, TransitionError> {
        self.session
            .apply(SessionEvent::EditAnswer(text.to_string()))
    }

    pub fn start_listening(&mut self) -> Result<InterviewState, TransitionError> {
        self.session.apply(SessionEvent::StartListening)
    }

    pub fn stop_listening(&mut self) -> Result<InterviewState, TransitionError> {
        self.session.apply(SessionEvent::StopListening)
    }

    pub fn transcript(&mut self, text: &str) -> Result<InterviewState, TransitionError> {
        self.session
            .apply(SessionEvent::Transcript(text.to_string()))
    }

    /// Submit the current answer and wait for its analysis
    pub async fn submit_answer(&mut self) -> Result<InterviewState, TransitionError> {
        self.session.apply(SessionEvent::SubmitAnswer)?;

        let request = self.session.analysis_request();
        let started = Instant::now();
        let result = self.backend.analyze_answer(&request).await;
        if self.charge_elapsed(started)? == InterviewState::InterviewEnded {
            return Ok(InterviewState::InterviewEnded);
        }

        let outcome = match result {
            Ok(analysis) => AnalysisOutcome::Analyzed(analysis),
            Err(e) => {
                warn!("Answer analysis unavailable, using local feedback: {:#}", e);
                AnalysisOutcome::Fallback(fallback_feedback(&request.answer))
            }
        };
        self.session.apply(SessionEvent::AnalysisReady(outcome))
    }

    pub async fn next_question(&mut self) -> Result<InterviewState, TransitionError> {
        self.session.apply(SessionEvent::NextQuestion)?;
        self.load_question().await
    }

    /// Request the final feedback once every question has been answered
    pub async fn end_interview(&mut self) -> Result<InterviewState, TransitionError> {
        let state = self.session.state();
        if state != InterviewState::ReadyForFinalFeedback {
            return Err(TransitionError::Invalid {
                state,
                event: "finalFeedbackReady",
            });
        }

        let request = self.session.final_feedback_request();
        let feedback = match self.backend.final_feedback(&request).await {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!("Final feedback unavailable: {:#}", e);
                FinalFeedback::fallback()
            }
        };

        let state = self
            .session
            .apply(SessionEvent::FinalFeedbackReady(feedback))?;
        info!(
            "Interview finished with score {}",
            self.session
                .final_feedback()
                .map(|f| f.overall_score)
                .unwrap_or_default()
        );
        Ok(state)
    }

    /// Drop the current interview and return to role selection
    pub fn reset(&mut self) -> Result<InterviewState, TransitionError> {
        info!(
            "Interview reset after {} question(s)",
            self.session.questions_asked().len()
        );
        self.session.apply(SessionEvent::Reset)
    }

    pub fn tick(&mut self, seconds: u32) -> Result<InterviewState, TransitionError> {
        self.session.apply(SessionEvent::Tick(seconds))
    }

    async fn load_question(&mut self) -> Result<InterviewState, TransitionError> {
        let request = self.session.question_request();
        match self.backend.generate_question(&request).await {
            Ok(question) => {
                match self
                    .session
                    .apply(SessionEvent::QuestionReady(question.question))
                {
                    Ok(state) => return Ok(state),
                    Err(e @ TransitionError::DuplicateQuestion(_))
                    | Err(e @ TransitionError::EmptyQuestion) => {
                        warn!("Discarding generated question: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(e) => warn!("Question service unavailable, using question bank: {:#}", e),
        }

        self.load_fallback_question()
    }

    fn load_fallback_question(&mut self) -> Result<InterviewState, TransitionError> {
        let role = self.session.fallback_role().to_string();
        match pick(&role, self.session.questions_asked(), &mut self.rng) {
            Some(question) => {
                debug!("Using bank question for role {}", role);
                self.session
                    .apply(SessionEvent::QuestionReady(question.to_string()))
            }
            None => {
                warn!("Question bank exhausted for role {}", role);
                self.session.apply(SessionEvent::QuestionsExhausted)
            }
        }
    }

    /// Apply the time spent waiting on the backend to the countdown
    fn charge_elapsed(&mut self, started: Instant) -> Result<InterviewState, TransitionError> {
        let elapsed = u32::try_from(started.elapsed().as_secs()).unwrap_or(u32::MAX);
        if elapsed == 0 {
            return Ok(self.session.state());
        }
        self.session.apply(SessionEvent::Tick(elapsed))
    }
}
