//! rps_play - hand-gesture Rock-Paper-Scissors frame loop
//!
//! Each frame:
//! 1. Pull detector output from the configured landmark source
//! 2. Classify the first hand (no hand = `None`)
//! 3. Feed the gesture to the match controller
//! 4. Render the snapshot; pause on a match win; stop on the quit gesture
//!
//! Ctrl-C stops the loop and prints the session summary.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rps_gesture::game::{MatchController, RandomMoves};
use rps_gesture::gesture::GestureClassifier;
use rps_gesture::source;
use rps_gesture::ui::{match_over_text, Ui, UiMode, QUIT_TEXT};
use rps_gesture::PlayConfig;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Landmark source: `stub://demo`, `stub://rock*3,paper*3`, or a JSON-lines recording.
    #[arg(long)]
    source: Option<String>,
    /// Points needed to win a match.
    #[arg(long)]
    target_score: Option<u32>,
    /// Seed for the computer's moves.
    #[arg(long)]
    seed: Option<u64>,
    /// Frames per second to pace the loop at.
    #[arg(long)]
    fps: Option<u32>,
    /// Pause after a match win or quit, in milliseconds.
    #[arg(long)]
    pause_ms: Option<u64>,
    /// Output mode: auto, plain, pretty or json.
    #[arg(long)]
    ui: Option<String>,
    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum StopReason {
    QuitGesture,
    EndOfStream,
    Interrupted,
    FrameLimit,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = resolve_config(&args)?;
    let mut ui = Ui::new(UiMode::parse(args.ui.as_deref())?, std::io::stdout().is_terminal());

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .map_err(|e| anyhow!("failed to install Ctrl-C handler: {}", e))?;
    }

    let mut source = source::open(&cfg.source)?;
    source.connect()?;

    let classifier = GestureClassifier::new();
    let mut game =
        MatchController::new(RandomMoves::from_seed(cfg.seed)).with_target_score(cfg.target_score);

    log::info!(
        "rps_play running. source={} target_score={} fps={}",
        cfg.source,
        game.target_score(),
        cfg.target_fps
    );

    let frame_interval = cfg.frame_interval();
    let mut last_health_log = Instant::now();

    let reason = loop {
        if !running.load(Ordering::SeqCst) {
            break StopReason::Interrupted;
        }
        if args
            .max_frames
            .is_some_and(|limit| game.tally().frames >= limit)
        {
            break StopReason::FrameLimit;
        }

        let Some(frame) = source.next_frame()? else {
            break StopReason::EndOfStream;
        };
        let gesture = classifier.classify_frame(frame.primary_hand());
        let report = game.observe(gesture);
        ui.render(&report)?;

        if report.quit_requested() {
            ui.announce(QUIT_TEXT);
            std::thread::sleep(cfg.pause);
            break StopReason::QuitGesture;
        }
        if let Some(winner) = report.match_winner() {
            ui.announce(&match_over_text(winner));
            std::thread::sleep(cfg.pause);
        }

        if last_health_log.elapsed() >= Duration::from_secs(5) {
            let stats = source.stats();
            log::debug!(
                "{} health={} frames={} hands={} location={}",
                source.name(),
                source.is_healthy(),
                stats.frames_read,
                stats.hands_seen,
                stats.location
            );
            last_health_log = Instant::now();
        }

        std::thread::sleep(frame_interval);
    };
    ui.finish();

    let tally = game.tally();
    log::info!("stopped: {:?}", reason);
    println!("session summary:");
    println!("  frames processed: {}", tally.frames);
    println!("  rounds played: {}", tally.rounds);
    println!("  matches won by you: {}", tally.player_matches);
    println!("  matches won by computer: {}", tally.computer_matches);
    println!(
        "  current score: You {} - {} Computer",
        game.state().player_score(),
        game.state().computer_score()
    );
    Ok(())
}

/// Config file + env first, command-line flags last.
fn resolve_config(args: &Args) -> Result<PlayConfig> {
    let mut cfg = PlayConfig::load()?;
    if let Some(source) = &args.source {
        cfg.source = source.clone();
    }
    if let Some(target_score) = args.target_score {
        cfg.target_score = target_score;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(fps) = args.fps {
        cfg.target_fps = fps;
    }
    if let Some(pause_ms) = args.pause_ms {
        cfg.pause = Duration::from_millis(pause_ms);
    }
    cfg.validate()?;
    Ok(cfg)
}
