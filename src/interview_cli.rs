// src/interview_cli.rs
//! Terminal front end for a practice interview against a running server

use anyhow::{Context, Result};
use clap::Args;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::interview::question_bank::known_roles;
use crate::interview::{
    EndReason, HttpInterviewBackend, InterviewBackend, InterviewSimulator, InterviewState,
    InterviewType,
};

const QUIT_COMMAND: &str = ":quit";

#[derive(Args, Debug)]
pub struct InterviewArgs {
    /// Base URL of the InternStud server
    #[arg(long, env = "INTERNSTUD_SERVER_URL", default_value = "http://localhost:3001")]
    pub server_url: String,

    /// Role to practice for, when no job is given
    #[arg(long)]
    pub role: Option<String>,

    /// Announcement to base the interview on
    #[arg(long)]
    pub job_id: Option<String>,

    /// technical or hr
    #[arg(long = "type", value_parser = parse_interview_type)]
    pub interview_type: Option<InterviewType>,
}

fn parse_interview_type(value: &str) -> Result<InterviewType, String> {
    value.parse()
}

type StdinLines = Lines<BufReader<Stdin>>;

async fn prompt(lines: &mut StdinLines, question: &str) -> Result<String> {
    println!("{}", question);
    let line = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
        .unwrap_or_default();
    Ok(line.trim().to_string())
}

pub async fn run_interview(args: InterviewArgs) -> Result<()> {
    let backend = HttpInterviewBackend::new(&args.server_url)?;
    let mut simulator = InterviewSimulator::new(backend);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    simulator.open(args.job_id.as_deref()).await?;
    match simulator.session().job() {
        Some(job) => println!("Interviu pentru {} la {}", job.title, job.company_name),
        None => {
            let role = match args.role {
                Some(role) => role,
                None => {
                    let roles: Vec<_> = known_roles().collect();
                    prompt(&mut lines, &format!("Rol ({}):", roles.join(", "))).await?
                }
            };
            simulator.select_role(&role)?;
        }
    }

    let kind = match args.interview_type {
        Some(kind) => kind,
        None => loop {
            let answer = prompt(&mut lines, "Tip interviu (technical/hr):").await?;
            match answer.parse::<InterviewType>() {
                Ok(kind) => break kind,
                Err(e) => println!("{}", e),
            }
        },
    };
    simulator.select_type(kind)?;

    println!(
        "Scrie răspunsul pe una sau mai multe linii, apoi o linie goală pentru a-l trimite. {} pentru ieșire.",
        QUIT_COMMAND
    );
    simulator.start().await?;
    drive(&mut simulator, &mut lines).await?;

    report(&simulator);
    Ok(())
}

/// Reads answers and ticks the countdown until the session ends
async fn drive<B: InterviewBackend>(
    simulator: &mut InterviewSimulator<B>,
    lines: &mut StdinLines,
) -> Result<()> {
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut shown_question = 0;

    loop {
        match simulator.state() {
            InterviewState::InterviewEnded => return Ok(()),
            InterviewState::ShowingFeedback => {
                if let Some(feedback) = simulator.session().feedback() {
                    println!("\n{}\n", feedback);
                }
                simulator.next_question().await?;
                continue;
            }
            InterviewState::ReadyForFinalFeedback => {
                if let Some(feedback) = simulator.session().feedback() {
                    println!("\n{}\n", feedback);
                }
                println!("Se generează feedback-ul final...");
                simulator.end_interview().await?;
                continue;
            }
            _ => {}
        }

        let session = simulator.session();
        if session.current_question_number() != shown_question {
            shown_question = session.current_question_number();
            println!(
                "\nÎntrebarea {}: {}",
                shown_question,
                session.current_question()
            );
        }

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    return Ok(());
                };
                if line.trim() == QUIT_COMMAND {
                    return Ok(());
                }
                if line.trim().is_empty() {
                    if simulator.session().answer().trim().is_empty() {
                        println!("Răspunsul nu poate fi gol.");
                        continue;
                    }
                    println!("Se analizează răspunsul...");
                    simulator.submit_answer().await?;
                } else {
                    let mut draft = simulator.session().answer().to_string();
                    if !draft.is_empty() {
                        draft.push('\n');
                    }
                    draft.push_str(&line);
                    simulator.edit_answer(&draft)?;
                }
            }
            _ = ticker.tick() => {
                simulator.tick(1)?;
                let left = simulator.session().time_left();
                if left > 0 && left % 60 == 0 {
                    println!("({} minute rămase)", left / 60);
                }
                debug!("{} seconds left", left);
            }
        }
    }
}

fn report<B: InterviewBackend>(simulator: &InterviewSimulator<B>) {
    let session = simulator.session();
    match session.end_reason() {
        Some(EndReason::TimedOut) => println!("\nTimpul a expirat. Interviul s-a încheiat."),
        Some(EndReason::OutOfQuestions) => {
            println!("\nNu mai sunt întrebări disponibile. Interviul s-a încheiat.")
        }
        Some(EndReason::Completed) => {}
        None => println!("\nInterviu întrerupt."),
    }

    if let Some(feedback) = session.final_feedback() {
        println!("\nScor final: {}/100", feedback.overall_score);
        if !feedback.did_well.is_empty() {
            println!("Ce ai făcut bine:");
            for point in &feedback.did_well {
                println!("  - {}", point);
            }
        }
        if !feedback.future_recommendations.is_empty() {
            println!("Recomandări:");
            for point in &feedback.future_recommendations {
                println!("  - {}", point);
            }
        }
    }
}
