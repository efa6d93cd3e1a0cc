//! Loading spinner shown in place of an action button's icon

use std::time::{Duration, Instant};

/// Spinner styles available to loading indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerStyle {
    /// Classic dots spinner: ⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏
    #[default]
    Dots,
    /// Line spinner: |/-\
    Line,
}

impl SpinnerStyle {
    /// Get the frames for this spinner style
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Dots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            SpinnerStyle::Line => &["|", "/", "-", "\\"],
        }
    }

    /// Get the recommended frame duration for this spinner style
    pub fn frame_duration(self) -> Duration {
        match self {
            SpinnerStyle::Dots => Duration::from_millis(80),
            SpinnerStyle::Line => Duration::from_millis(100),
        }
    }
}

/// Time-driven spinner frame selector
#[derive(Debug, Clone)]
pub struct Spinner {
    style: SpinnerStyle,
    started: Instant,
    current_frame: usize,
}

impl Spinner {
    pub fn new(style: SpinnerStyle) -> Self {
        Self {
            style,
            started: Instant::now(),
            current_frame: 0,
        }
    }

    /// Move to the frame matching the time elapsed since creation
    pub fn advance(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started);
        let frame_nanos = self.style.frame_duration().as_nanos().max(1);
        let frames = self.style.frames().len();
        self.current_frame = ((elapsed.as_nanos() / frame_nanos) % frames as u128) as usize;
    }

    pub fn frame(&self) -> &'static str {
        self.style.frames()[self.current_frame]
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(SpinnerStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles_frames() {
        let mut spinner = Spinner::new(SpinnerStyle::Line);
        let start = spinner.started;
        assert_eq!(spinner.frame(), "|");

        spinner.advance(start + Duration::from_millis(100));
        assert_eq!(spinner.frame(), "/");

        spinner.advance(start + Duration::from_millis(400));
        assert_eq!(spinner.frame(), "|");
    }
}
