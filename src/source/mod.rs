//! Landmark sources.
//!
//! A source stands in for the camera + hand detector pair and yields one
//! `HandFrame` per captured frame:
//! - `FileSource`: a JSON-lines recording of detector output
//! - `SyntheticSource`: scripted poses behind a `stub://` location (demos, tests)
//!
//! Sources only ever hand over landmark coordinates. Only the first hand of a
//! frame is played; extra hands are carried but ignored by the game.

pub mod file;
pub mod synthetic;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::landmarks::LandmarkSet;

pub use file::{FileConfig, FileSource};
pub use synthetic::{SyntheticConfig, SyntheticSource};

/// Detector output for one frame: zero or more hands.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    #[serde(default)]
    pub hands: Vec<LandmarkSet>,
}

impl HandFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(hand: LandmarkSet) -> Self {
        Self { hands: vec![hand] }
    }

    /// The hand the game plays with.
    pub fn primary_hand(&self) -> Option<&LandmarkSet> {
        self.hands.first()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SourceStats {
    pub frames_read: u64,
    pub hands_seen: u64,
    pub location: String,
}

impl SourceStats {
    pub(crate) fn record(&mut self, frame: &HandFrame) {
        self.frames_read += 1;
        self.hands_seen += frame.hands.len() as u64;
    }
}

pub trait LandmarkSource {
    fn name(&self) -> &'static str;

    fn connect(&mut self) -> Result<()>;

    /// Next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<HandFrame>>;

    fn is_healthy(&self) -> bool;

    fn stats(&self) -> SourceStats;
}

/// Select a source by location: `stub://...` is synthetic, a plain path is a recording.
pub fn open(location: &str) -> Result<Box<dyn LandmarkSource>> {
    let location = location.trim();
    if location.is_empty() {
        return Err(anyhow!("landmark source location must not be empty"));
    }
    if let Some(script) = location.strip_prefix("stub://") {
        return Ok(Box::new(SyntheticSource::new(SyntheticConfig::parse(
            script,
        )?)));
    }
    if location.contains("://") {
        return Err(anyhow!(
            "unsupported landmark source '{}' (expected stub:// or a local file)",
            location
        ));
    }
    Ok(Box::new(FileSource::new(FileConfig {
        path: location.into(),
    })?))
}
