use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::game::DEFAULT_TARGET_SCORE;

const DEFAULT_SOURCE: &str = "stub://demo";
const DEFAULT_TARGET_FPS: u32 = 10;
const DEFAULT_PAUSE_MS: u64 = 3000;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PlayConfigFile {
    source: Option<String>,
    target_fps: Option<u32>,
    game: Option<GameConfigFile>,
    presentation: Option<PresentationConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GameConfigFile {
    target_score: Option<u32>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PresentationConfigFile {
    pause_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct PlayConfig {
    /// `stub://...` or a path to a JSON-lines landmark recording.
    pub source: String,
    pub target_fps: u32,
    pub target_score: u32,
    /// Fixed RNG seed for the computer's moves.
    pub seed: Option<u64>,
    /// How long the match-won and goodbye messages stay up.
    pub pause: Duration,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
            target_score: DEFAULT_TARGET_SCORE,
            seed: None,
            pause: Duration::from_millis(DEFAULT_PAUSE_MS),
        }
    }
}

impl PlayConfig {
    /// File named by `RPS_CONFIG` (if any), then `RPS_*` env overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("RPS_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Some(read_config_file(Path::new(path))?),
            _ => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: PlayConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            source: file.source.unwrap_or(defaults.source),
            target_fps: file.target_fps.unwrap_or(defaults.target_fps),
            target_score: file
                .game
                .as_ref()
                .and_then(|game| game.target_score)
                .unwrap_or(defaults.target_score),
            seed: file.game.and_then(|game| game.seed),
            pause: file
                .presentation
                .and_then(|p| p.pause_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.pause),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(source) = std::env::var("RPS_SOURCE") {
            if !source.trim().is_empty() {
                self.source = source;
            }
        }
        if let Ok(fps) = std::env::var("RPS_FPS") {
            self.target_fps = fps
                .trim()
                .parse()
                .map_err(|_| anyhow!("RPS_FPS must be a whole number of frames per second"))?;
        }
        if let Ok(score) = std::env::var("RPS_TARGET_SCORE") {
            self.target_score = score
                .trim()
                .parse()
                .map_err(|_| anyhow!("RPS_TARGET_SCORE must be a positive integer"))?;
        }
        if let Ok(seed) = std::env::var("RPS_SEED") {
            let seed: u64 = seed
                .trim()
                .parse()
                .map_err(|_| anyhow!("RPS_SEED must be an unsigned integer"))?;
            self.seed = Some(seed);
        }
        if let Ok(pause) = std::env::var("RPS_PAUSE_MS") {
            let millis: u64 = pause
                .trim()
                .parse()
                .map_err(|_| anyhow!("RPS_PAUSE_MS must be an integer number of milliseconds"))?;
            self.pause = Duration::from_millis(millis);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(anyhow!("source must not be empty"));
        }
        if self.target_fps == 0 {
            return Err(anyhow!("target_fps must be >= 1"));
        }
        if self.target_score == 0 {
            return Err(anyhow!("target_score must be >= 1"));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.target_fps.max(1)))
    }
}

/// JSON by default; TOML when the file ends in `.toml`.
fn read_config_file(path: &Path) -> Result<PlayConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let cfg: PlayConfigFile = if is_toml {
        toml::from_str(&raw).map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    } else {
        serde_json::from_str(&raw)
            .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    };
    Ok(cfg)
}
