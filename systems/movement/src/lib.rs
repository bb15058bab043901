#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick movement state machine for a single grid-constrained character.
//!
//! Each tick splits into two phases. When the character sits exactly on a
//! tile origin it may turn: the requested direction is tested against the
//! maze, falling back to the current direction, and stopping when both are
//! blocked. Between tile origins the only decisions are an immediate
//! reversal or clamping to the next tile boundary so the collision test can
//! run again there. Corner cutting is impossible because walls are only ever
//! probed from aligned positions.

use std::time::Duration;

use log::{debug, trace};
use maze_runner_core::{Direction, Event, MazeQuery, Position, Velocity};
use maze_runner_system_geometry::{
    apply_warp, boundary_ahead, grid_coordinate, has_crossed_into_new_tile, is_on_grid,
    is_reversal, is_wall_collision, project,
};

/// Authoritative movement state owned by a character.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterMovementState {
    position: Position,
    previous_position: Position,
    direction: Direction,
    requested_direction: Direction,
    velocity: Velocity,
    moving: bool,
}

impl CharacterMovementState {
    /// Creates a stationary character facing left at `start`.
    #[must_use]
    pub fn new(start: Position, velocity: Velocity) -> Self {
        Self {
            position: start,
            previous_position: start,
            direction: Direction::Left,
            requested_direction: Direction::Left,
            velocity,
            moving: false,
        }
    }

    /// Current authoritative position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Position at the start of the most recent tick.
    #[must_use]
    pub const fn previous_position(&self) -> Position {
        self.previous_position
    }

    /// Direction of travel.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction most recently requested by input.
    #[must_use]
    pub const fn requested_direction(&self) -> Direction {
        self.requested_direction
    }

    /// Distance covered per millisecond.
    #[must_use]
    pub const fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Whether the character advances on the next tick.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Records a requested direction and resumes motion.
    ///
    /// The request always succeeds; whether it is honoured is decided on the
    /// next tick.
    pub fn request(&mut self, direction: Direction) {
        self.requested_direction = direction;
        self.moving = true;
    }

    fn commit_direction(&mut self, direction: Direction, out: &mut Vec<Event>) {
        if self.direction != direction {
            debug!("turning from {:?} to {:?}", self.direction, direction);
            out.push(Event::DirectionChanged {
                from: self.direction,
                to: direction,
            });
            self.direction = direction;
        }
    }
}

/// Movement system bound to a fixed tile size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    tile_size: f64,
}

impl Movement {
    /// Creates a movement system for tiles of `tile_size` world units.
    #[must_use]
    pub const fn new(tile_size: f64) -> Self {
        Self { tile_size }
    }

    /// Side length of a tile in world units.
    #[must_use]
    pub const fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Advances `state` by one tick of `elapsed` simulated time.
    ///
    /// The previous position is always snapshotted first. Stationary
    /// characters and zero-length ticks leave the position untouched.
    pub fn advance<M>(
        &self,
        state: &mut CharacterMovementState,
        maze: &M,
        elapsed: Duration,
        out: &mut Vec<Event>,
    ) where
        M: MazeQuery + ?Sized,
    {
        state.previous_position = state.position;
        if !state.moving || elapsed.is_zero() {
            return;
        }

        let next = if is_on_grid(state.position, self.tile_size) {
            self.snapped(state, maze, elapsed, out)
        } else {
            self.unsnapped(state, elapsed, out)
        };

        let warped = apply_warp(next, self.tile_size, maze);
        if warped != next {
            debug!("warped from {next:?} to {warped:?}");
            out.push(Event::Warped {
                from: next,
                to: warped,
            });
        }
        state.position = warped;
    }

    fn snapped<M>(
        &self,
        state: &mut CharacterMovementState,
        maze: &M,
        elapsed: Duration,
        out: &mut Vec<Event>,
    ) -> Position
    where
        M: MazeQuery + ?Sized,
    {
        let requested = state.requested_direction;
        let current = state.direction;
        let desired = project(
            state.position,
            requested,
            state.velocity,
            elapsed,
            self.tile_size,
        );
        let alternate = project(
            state.position,
            current,
            state.velocity,
            elapsed,
            self.tile_size,
        );

        if !is_wall_collision(desired.tile_point(), maze, requested) {
            state.commit_direction(requested, out);
            return desired.position();
        }

        if is_wall_collision(alternate.tile_point(), maze, current) {
            debug!("boxed in at {:?}", state.position);
            state.moving = false;
            out.push(Event::Halted { at: state.position });
            return state.position;
        }

        alternate.position()
    }

    fn unsnapped(
        &self,
        state: &mut CharacterMovementState,
        elapsed: Duration,
        out: &mut Vec<Event>,
    ) -> Position {
        let requested = state.requested_direction;
        if is_reversal(state.direction, requested) {
            state.commit_direction(requested, out);
        }

        let candidate = project(
            state.position,
            state.direction,
            state.velocity,
            elapsed,
            self.tile_size,
        );
        let here = grid_coordinate(state.position, self.tile_size);
        let there = grid_coordinate(candidate.position(), self.tile_size);
        if has_crossed_into_new_tile(here, there) {
            // A reversal lands here too: the tile behind was never probed.
            let boundary = boundary_ahead(state.position, state.direction, self.tile_size);
            let tile = grid_coordinate(boundary, self.tile_size);
            trace!("clamped to the origin of {tile:?}");
            out.push(Event::SnappedToTile { tile });
            return boundary;
        }

        candidate.position()
    }
}
