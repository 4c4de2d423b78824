use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use folio_example::{DEFAULT_SESSION, Replay, Session, init_tracing};
use tracing::info;

#[derive(Parser)]
#[command(name = "folio-example")]
#[command(version, about = "Replay scripted input against the portfolio carousel", long_about = None)]
struct Cli {
    /// Session file to replay (defaults to the bundled tour)
    #[arg(short, long)]
    script: Option<PathBuf>,
    /// Override the commit threshold in pixels
    #[arg(long)]
    threshold: Option<f32>,
    /// Override the transition duration in milliseconds
    #[arg(long = "transition-ms")]
    transition_ms: Option<u64>,
    /// Override the drag bound in pixels
    #[arg(long = "max-drag")]
    max_drag: Option<f32>,
    /// Let the carousel own its index instead of the page
    #[arg(long)]
    uncontrolled: bool,
    /// Only print the summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut session = match &cli.script {
        Some(path) => Session::load(path)?,
        None => Session::parse(DEFAULT_SESSION)?,
    };
    if let Some(threshold) = cli.threshold {
        session.carousel.threshold_px = threshold;
    }
    if let Some(transition_ms) = cli.transition_ms {
        session.carousel.transition_ms = transition_ms;
    }
    if let Some(max_drag) = cli.max_drag {
        session.carousel.max_drag_px = max_drag;
    }
    if cli.uncontrolled {
        session.owner.controlled = false;
    }
    session
        .carousel
        .validate()
        .context("invalid command-line overrides")?;

    info!(events = session.events.len(), "replaying session");
    let replay = Replay::new(&session, Instant::now())?;
    let summary = replay.run(&session.events, |frame| {
        if !cli.quiet {
            println!("{frame}");
        }
    });

    println!(
        "{} transitions, {} reported changes, ended on `{}`",
        summary.transitions,
        summary.notifications.len(),
        summary.final_slide
    );
    Ok(())
}
