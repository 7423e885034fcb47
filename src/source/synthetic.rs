//! Synthetic landmark source (`stub://`).
//!
//! Plays a script of poses. A script is a comma-separated list of steps,
//! each a gesture name with an optional hold count, e.g.
//! `stub://rock*3,none*2,paper*3`. Joining names with `+` puts several hands in
//! one frame. `stub://demo` loops a canned session; prefixing a script with
//! `loop/` loops it too.

use anyhow::{anyhow, Result};

use super::{HandFrame, LandmarkSource, SourceStats};
use crate::gesture::Gesture;
use crate::landmarks::{Finger, LandmarkSet, Point, LANDMARK_COUNT, THUMB_TIP, WRIST};

const DEMO_SCRIPT: &str =
    "none*5,rock*8,none*4,paper*8,unknown*3,scissors*8,none*4,rock*8,paper*8,scissors*8";

const KNUCKLE_Y: f32 = 0.6;
const EXTENDED_TIP_Y: f32 = 0.3;
const CURLED_TIP_Y: f32 = 0.75;
const FINGER_X: [f32; 4] = [0.40, 0.48, 0.56, 0.64];

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub hands: Vec<Gesture>,
    pub hold: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticConfig {
    pub steps: Vec<Step>,
    pub repeat: bool,
}

impl SyntheticConfig {
    /// Parse the part of a location after `stub://`.
    pub fn parse(script: &str) -> Result<Self> {
        let script = script.trim();
        let (body, repeat) = match script {
            "demo" => (DEMO_SCRIPT, true),
            _ => match script.strip_prefix("loop/") {
                Some(body) => (body, true),
                None => (script, false),
            },
        };
        let steps = body
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_step)
            .collect::<Result<Vec<_>>>()?;
        if steps.is_empty() {
            return Err(anyhow!("synthetic script '{}' has no steps", script));
        }
        Ok(Self { steps, repeat })
    }
}

fn parse_step(entry: &str) -> Result<Step> {
    let (names, hold) = match entry.split_once('*') {
        Some((names, hold)) => {
            let hold: u32 = hold
                .trim()
                .parse()
                .map_err(|_| anyhow!("invalid hold count in step '{}'", entry))?;
            (names, hold)
        }
        None => (entry, 1),
    };
    if hold == 0 {
        return Err(anyhow!("hold count must be >= 1 in step '{}'", entry));
    }
    let hands = names
        .split('+')
        .map(str::parse::<Gesture>)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .filter(|gesture| *gesture != Gesture::None)
        .collect();
    Ok(Step { hands, hold })
}

/// A hand that the default classifier reads as `gesture`. `Gesture::None` has no hand.
///
/// Victory comes out as the Scissors shape since the two share a predicate.
pub fn pose(gesture: Gesture) -> Option<LandmarkSet> {
    let (extended, thumb_tip_y) = match gesture {
        Gesture::None => return None,
        Gesture::Rock => ([false; 4], 0.65),
        Gesture::Paper => ([true; 4], 0.45),
        Gesture::Scissors | Gesture::Victory => ([true, true, false, false], 0.65),
        Gesture::ILoveYou => ([true, false, false, true], 0.2),
        Gesture::Unknown => ([true, false, false, false], 0.65),
    };
    Some(hand(extended, thumb_tip_y))
}

fn hand(extended: [bool; 4], thumb_tip_y: f32) -> LandmarkSet {
    let mut points = [Point::new(0.0, 0.0); LANDMARK_COUNT];
    points[WRIST] = Point::new(0.5, 0.9);

    // Thumb chain from the base of the palm out to the tip.
    let thumb_base = Point::new(0.42, 0.85);
    let thumb_tip = Point::new(0.28, thumb_tip_y);
    for (joint, idx) in (1..=THUMB_TIP).enumerate() {
        points[idx] = lerp(thumb_base, thumb_tip, (joint as f32 + 1.0) / 4.0);
    }

    for ((finger, x), up) in Finger::ALL.into_iter().zip(FINGER_X).zip(extended) {
        let knuckle = Point::new(x, KNUCKLE_Y);
        let tip = Point::new(x, if up { EXTENDED_TIP_Y } else { CURLED_TIP_Y });
        points[finger.knuckle()] = knuckle;
        for joint in 1..=3 {
            points[finger.knuckle() + joint] = lerp(knuckle, tip, joint as f32 / 3.0);
        }
    }
    LandmarkSet::from_finite(points)
}

fn lerp(a: Point, b: Point, t: f32) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

pub struct SyntheticSource {
    config: SyntheticConfig,
    step: usize,
    held: u32,
    stats: SourceStats,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Self {
        Self {
            config,
            step: 0,
            held: 0,
            stats: SourceStats {
                location: "stub://".to_string(),
                ..SourceStats::default()
            },
        }
    }
}

impl LandmarkSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn connect(&mut self) -> Result<()> {
        log::info!(
            "SyntheticSource: connected ({} steps, repeat={})",
            self.config.steps.len(),
            self.config.repeat
        );
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        if self.step >= self.config.steps.len() {
            if !self.config.repeat {
                return Ok(None);
            }
            self.step = 0;
        }
        let step = &self.config.steps[self.step];
        let frame = HandFrame {
            hands: step.hands.iter().filter_map(|g| pose(*g)).collect(),
        };
        self.held += 1;
        if self.held >= step.hold {
            self.held = 0;
            self.step += 1;
        }
        self.stats.record(&frame);
        Ok(Some(frame))
    }

    fn is_healthy(&self) -> bool {
        true
    }

    fn stats(&self) -> SourceStats {
        self.stats.clone()
    }
}
