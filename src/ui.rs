use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::game::{FrameReport, MatchState, Side};

pub const QUIT_TEXT: &str = "Game Over! I Love You Gesture Detected!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiMode {
    Auto,
    Plain,
    Pretty,
    Json,
}

impl UiMode {
    pub fn parse(flag: Option<&str>) -> Result<Self> {
        match flag {
            None | Some("auto") => Ok(UiMode::Auto),
            Some("plain") => Ok(UiMode::Plain),
            Some("pretty") => Ok(UiMode::Pretty),
            Some("json") => Ok(UiMode::Json),
            Some(other) => Err(anyhow!(
                "unknown ui mode '{}' (expected auto, plain, pretty or json)",
                other
            )),
        }
    }
}

/// The four overlay lines shown over the video feed.
pub fn overlay_lines(state: &MatchState) -> [String; 4] {
    [
        format!("Your Choice: {}", state.last_gesture()),
        format!("Computer: {}", state.computer_move()),
        format!("Result: {}", state.result_text()),
        format!(
            "Score: You {} - {} Computer",
            state.player_score(),
            state.computer_score()
        ),
    ]
}

pub fn match_over_text(winner: Side) -> String {
    format!("Game Over! {} Wins!", winner)
}

/// Render sink for frame reports.
pub struct Ui {
    mode: UiMode,
    status: Option<ProgressBar>,
    last_overlay: Option<[String; 4]>,
}

impl Ui {
    /// `Auto` becomes `Pretty` on a terminal and `Plain` otherwise.
    pub fn new(mode: UiMode, is_tty: bool) -> Self {
        let mode = match mode {
            UiMode::Auto if is_tty => UiMode::Pretty,
            UiMode::Auto => UiMode::Plain,
            other => other,
        };
        let status = (mode == UiMode::Pretty).then(|| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_draw_target(ProgressDrawTarget::stderr());
            spinner.enable_steady_tick(Duration::from_millis(120));
            let style = ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            spinner.set_style(style);
            spinner
        });
        Self {
            mode,
            status,
            last_overlay: None,
        }
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn render(&mut self, report: &FrameReport) -> Result<()> {
        match self.mode {
            UiMode::Json => println!("{}", serde_json::to_string(report)?),
            _ => {
                let lines = overlay_lines(&report.state);
                if self.last_overlay.as_ref() == Some(&lines) {
                    return Ok(());
                }
                match &self.status {
                    Some(spinner) => spinner.set_message(lines.join("  |  ")),
                    None => println!("{}", lines.join("\n")),
                }
                self.last_overlay = Some(lines);
            }
        }
        Ok(())
    }

    /// Full-width message such as a match result or the goodbye text.
    pub fn announce(&self, message: &str) {
        match (&self.status, self.mode) {
            (Some(spinner), _) => spinner.println(message),
            (None, UiMode::Json) => println!("{}", serde_json::json!({ "announce": message })),
            (None, _) => println!("{message}"),
        }
    }

    pub fn finish(&mut self) {
        if let Some(spinner) = self.status.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for Ui {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MatchController, ScriptedMoves};
    use crate::gesture::{Gesture, MoveChoice};

    #[test]
    fn overlay_matches_screen_text() {
        let mut game = MatchController::new(
            ScriptedMoves::new(vec![MoveChoice::Paper, MoveChoice::Scissors]).unwrap(),
        );
        assert_eq!(
            overlay_lines(game.state()),
            [
                "Your Choice: None".to_string(),
                "Computer: Paper".to_string(),
                "Result: Make a gesture!".to_string(),
                "Score: You 0 - 0 Computer".to_string(),
            ]
        );

        let report = game.observe(Gesture::Rock);
        let lines = overlay_lines(&report.state);
        assert_eq!(lines[0], "Your Choice: Rock");
        assert_eq!(lines[1], "Computer: Scissors");
        assert_eq!(lines[2], "Result: You Win!");
        assert_eq!(lines[3], "Score: You 1 - 0 Computer");
    }

    #[test]
    fn end_of_match_text() {
        assert_eq!(match_over_text(Side::Player), "Game Over! You Wins!");
        assert_eq!(match_over_text(Side::Computer), "Game Over! Computer Wins!");
    }

    #[test]
    fn parses_modes_and_resolves_auto() {
        assert_eq!(UiMode::parse(None).unwrap(), UiMode::Auto);
        assert_eq!(UiMode::parse(Some("json")).unwrap(), UiMode::Json);
        assert!(UiMode::parse(Some("fancy")).is_err());
        assert_eq!(Ui::new(UiMode::Auto, false).mode(), UiMode::Plain);
        assert_eq!(Ui::new(UiMode::Json, true).mode(), UiMode::Json);
    }
}
