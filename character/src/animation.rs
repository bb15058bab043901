use std::time::Duration;

/// Time that must accumulate before the sprite sheet advances.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Number of frames in each directional sprite sheet.
pub const FRAME_COUNT: u8 = 4;

/// Cyclic sprite-sheet clock driven by simulated movement time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpriteAnimation {
    since_last_frame: Duration,
    frame: u8,
}

impl SpriteAnimation {
    /// Time accumulated since the last frame change.
    #[must_use]
    pub const fn since_last_frame(&self) -> Duration {
        self.since_last_frame
    }

    /// Adds simulated time spent moving.
    pub fn accumulate(&mut self, elapsed: Duration) {
        self.since_last_frame = self.since_last_frame.saturating_add(elapsed);
    }

    /// Advances to the next frame once more than [`FRAME_INTERVAL`] has accumulated.
    ///
    /// At most one frame is skipped per call regardless of backlog.
    pub fn advance(&mut self) -> u8 {
        if self.since_last_frame > FRAME_INTERVAL {
            self.since_last_frame = Duration::ZERO;
            self.frame = (self.frame + 1) % FRAME_COUNT;
        }
        self.frame
    }
}
