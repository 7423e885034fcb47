//! Recorded landmark source.
//!
//! Reads a JSON-lines file where each non-blank line is one frame:
//!
//! ```text
//! {"hands": [[[0.51, 0.90], [0.44, 0.83], ... 21 points ...]]}
//! {"hands": []}
//! ```
//!
//! Malformed lines (bad JSON, wrong point count) stop the source with the
//! offending line number rather than being skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use super::{HandFrame, LandmarkSource, SourceStats};

#[derive(Clone, Debug)]
pub struct FileConfig {
    pub path: PathBuf,
}

pub struct FileSource {
    config: FileConfig,
    lines: Option<Lines<BufReader<File>>>,
    line_no: usize,
    failed: bool,
    stats: SourceStats,
}

impl FileSource {
    pub fn new(config: FileConfig) -> Result<Self> {
        if config.path.as_os_str().is_empty() {
            return Err(anyhow!("recording path must not be empty"));
        }
        let stats = SourceStats {
            location: config.path.display().to_string(),
            ..SourceStats::default()
        };
        Ok(Self {
            config,
            lines: None,
            line_no: 0,
            failed: false,
            stats,
        })
    }
}

impl LandmarkSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn connect(&mut self) -> Result<()> {
        let file = File::open(&self.config.path)
            .with_context(|| format!("opening recording {}", self.config.path.display()))?;
        self.lines = Some(BufReader::new(file).lines());
        self.line_no = 0;
        log::info!("FileSource: connected to {}", self.config.path.display());
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        let Some(lines) = self.lines.as_mut() else {
            return Err(anyhow!("FileSource: next_frame called before connect"));
        };
        loop {
            let Some(line) = lines.next() else {
                return Ok(None);
            };
            self.line_no += 1;
            let line = line.with_context(|| {
                format!("reading {}:{}", self.config.path.display(), self.line_no)
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: HandFrame = match serde_json::from_str(&line) {
                Ok(frame) => frame,
                Err(e) => {
                    self.failed = true;
                    return Err(anyhow!(
                        "invalid frame at {}:{}: {}",
                        self.config.path.display(),
                        self.line_no,
                        e
                    ));
                }
            };
            self.stats.record(&frame);
            return Ok(Some(frame));
        }
    }

    fn is_healthy(&self) -> bool {
        self.lines.is_some() && !self.failed
    }

    fn stats(&self) -> SourceStats {
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{classify, Gesture};
    use crate::source::synthetic::pose;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn recording(lines: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp recording");
        for line in lines {
            writeln!(file, "{line}").expect("write recording");
        }
        file
    }

    fn frame_line(gesture: Gesture) -> String {
        let frame = match pose(gesture) {
            Some(hand) => HandFrame::single(hand),
            None => HandFrame::empty(),
        };
        serde_json::to_string(&frame).unwrap()
    }

    #[test]
    fn reads_frames_and_skips_blank_lines() {
        let file = recording(&[
            frame_line(Gesture::Rock),
            String::new(),
            frame_line(Gesture::None),
            frame_line(Gesture::Paper),
        ]);
        let mut source = FileSource::new(FileConfig {
            path: file.path().to_path_buf(),
        })
        .unwrap();
        source.connect().unwrap();

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(classify(first.primary_hand().unwrap()), Gesture::Rock);
        assert!(source.next_frame().unwrap().unwrap().hands.is_empty());
        let third = source.next_frame().unwrap().unwrap();
        assert_eq!(classify(third.primary_hand().unwrap()), Gesture::Paper);
        assert!(source.next_frame().unwrap().is_none());

        let stats = source.stats();
        assert_eq!(stats.frames_read, 3);
        assert_eq!(stats.hands_seen, 2);
        assert!(source.is_healthy());
    }

    #[test]
    fn malformed_hand_fails_with_line_number() {
        let short = serde_json::json!({ "hands": [[[0.5, 0.5], [0.5, 0.4]]] }).to_string();
        let file = recording(&[frame_line(Gesture::Rock), short]);
        let mut source = FileSource::new(FileConfig {
            path: file.path().to_path_buf(),
        })
        .unwrap();
        source.connect().unwrap();
        source.next_frame().unwrap();

        let err = source.next_frame().unwrap_err().to_string();
        assert!(err.contains(":2:"), "{err}");
        assert!(err.contains("exactly 21 points"), "{err}");
        assert!(!source.is_healthy());
    }

    #[test]
    fn next_frame_requires_connect() {
        let mut source = FileSource::new(FileConfig {
            path: PathBuf::from("frames.jsonl"),
        })
        .unwrap();
        assert!(source.next_frame().is_err());
    }
}
