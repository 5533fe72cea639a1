//! InternStud backend: mock interviews against an AI coach, plus the job
//! board behind them.

pub mod admin_cli;
pub mod auth;
pub mod coach;
pub mod core;
pub mod interview;
pub mod interview_cli;
pub mod logging;
pub mod mail;
pub mod web;

pub use web::{build_rocket, start_web_server};
