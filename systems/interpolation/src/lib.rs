#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Render-time blending between consecutive simulation ticks.

use log::trace;
use maze_runner_core::{Axis, Position, Visibility};
use maze_runner_system_geometry::{detect_stutter, interpolate_axis};

/// Display position and visibility produced for one render frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSample {
    position: Position,
    visibility: Visibility,
}

impl RenderSample {
    /// Position to draw.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the frame should be drawn at all.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// Blends the previous and current authoritative positions for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderInterpolator {
    stutter_threshold: f64,
}

impl RenderInterpolator {
    /// Creates an interpolator that hides frames whose tick delta exceeds `stutter_threshold`.
    #[must_use]
    pub const fn new(stutter_threshold: f64) -> Self {
        Self { stutter_threshold }
    }

    /// Samples the display position `fraction` of the way from `previous` to `current`.
    ///
    /// A fraction of `0.0` yields `previous` and `1.0` yields `current`
    /// exactly; values outside that range are clamped. The visibility
    /// decision looks at the raw tick delta, so a teleport hides the whole
    /// frame instead of drawing a streak across the maze.
    #[must_use]
    pub fn sample(&self, previous: Position, current: Position, fraction: f64) -> RenderSample {
        let position = Position::new(
            interpolate_axis(fraction, Axis::Top, previous, current),
            interpolate_axis(fraction, Axis::Left, previous, current),
        );
        let visibility = detect_stutter(current, previous, self.stutter_threshold);
        if visibility == Visibility::Hide {
            trace!("hiding frame after jump from {previous:?} to {current:?}");
        }
        RenderSample {
            position,
            visibility,
        }
    }
}
