//! rps_classify - print the gesture read from every frame of a landmark source

use anyhow::Result;
use clap::Parser;

use rps_gesture::gesture::GestureClassifier;
use rps_gesture::source;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON-lines recording or `stub://` script.
    source: String,
    /// Classify every hand in a frame, not just the first.
    #[arg(long)]
    all_hands: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let classifier = GestureClassifier::new();
    let mut source = source::open(&args.source)?;
    source.connect()?;

    let mut frame_no = 0u64;
    while let Some(frame) = source.next_frame()? {
        frame_no += 1;
        if args.all_hands && frame.hands.len() > 1 {
            let labels: Vec<String> = frame
                .hands
                .iter()
                .map(|hand| classifier.classify(hand).to_string())
                .collect();
            println!("{}\t{}", frame_no, labels.join(", "));
        } else {
            println!(
                "{}\t{}",
                frame_no,
                classifier.classify_frame(frame.primary_hand())
            );
        }
    }

    let stats = source.stats();
    eprintln!(
        "classified {} frames ({} hands) from {}",
        stats.frames_read, stats.hands_seen, stats.location
    );
    Ok(())
}
