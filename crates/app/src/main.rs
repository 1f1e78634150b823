//! Terminal front-end for the timed quiz.

mod cli;
mod config;
mod input;
mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use services::{AssessmentService, Clock, ServiceError, SessionHandle};
use storage::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::config::QuizConfig;
use crate::input::{HELP, Input, parse_line};
use crate::render::{Redraw, frame, redraw, summary_line};

fn init_tracing(verbose: bool) {
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // stdout belongs to the quiz itself.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_service(config: &QuizConfig) -> anyhow::Result<AssessmentService> {
    let storage = match &config.bank {
        Some(path) => {
            tracing::info!(path = %path.display(), "using question bank file");
            Storage::json_file(path)
        }
        None => Storage::seeded(),
    }
    .with_delay(config.service_delay());

    let settings = config.session_settings()?;
    Ok(AssessmentService::new(Clock::system(), storage.questions).with_settings(settings))
}

async fn play(mut handle: SessionHandle) -> anyhow::Result<()> {
    let mut updates = handle.subscribe();
    let mut shown = handle.snapshot();
    println!("{HELP}");
    print!("{}", frame(&shown));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                let input = parse_line(&line);
                match input {
                    Input::Quit => break,
                    Input::Help => println!("{HELP}"),
                    Input::Unknown => println!("unrecognized input; {HELP}"),
                    _ => {}
                }
                // Commands target the question on screen; the driver drops
                // them once that question is behind it.
                if let Some(command) = input.command(shown.state.current_index()) {
                    match handle.send(command).await {
                        Ok(_) => {}
                        Err(ServiceError::Assessment(err)) => println!("{err}"),
                        Err(err) => return Err(err.into()),
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = updates.borrow_and_update().clone();
                match redraw(&shown, &next) {
                    Redraw::Frame => print!("{}", frame(&next)),
                    Redraw::Countdown(remaining) => println!("  {remaining}s left"),
                    Redraw::Nothing => {}
                }
                shown = next;
            }
        }
    }

    if handle.snapshot().progress.is_complete {
        let done = handle.finish().await?;
        println!("{}", summary_line(&done.summary));
    } else {
        tracing::info!("quit before finishing the quiz");
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = QuizConfig::resolve(&args, |key| std::env::var(key).ok())
        .context("invalid configuration")?;
    tracing::debug!(?config, "configuration resolved");

    let service = build_service(&config)?;
    let handle = service
        .spawn_session()
        .await
        .context("failed to start quiz session")?;
    play(handle).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
