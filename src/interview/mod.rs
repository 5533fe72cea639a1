// src/interview/mod.rs
//! Mock interview workflow: session state machine, local fallbacks and the
//! simulator that ties them to the question service.

pub mod backend;
pub mod question_bank;
pub mod session;
pub mod simulator;
pub mod transcript;
pub mod types;

pub use backend::{HttpInterviewBackend, InterviewBackend};
pub use session::{
    AnalysisOutcome, EndReason, InterviewSession, InterviewState, SessionEvent, TransitionError,
};
pub use simulator::InterviewSimulator;
pub use transcript::TranscriptBuffer;
pub use types::*;
