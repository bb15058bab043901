#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Character entity orchestrating movement, interpolation and animation.
//!
//! The entity owns its [`CharacterMovementState`] outright. Input adapters
//! call [`Character::set_requested_direction`], the game loop calls
//! [`Character::tick`] once per simulation step and [`Character::render`]
//! once per presented frame. Nothing here reads a clock; all time arrives as
//! explicit [`Duration`] values so runs are reproducible.

mod animation;

pub use animation::{SpriteAnimation, FRAME_COUNT, FRAME_INTERVAL};

use std::time::Duration;

use log::debug;
use maze_runner_core::{
    ArrowIndicator, CharacterFrame, Command, Direction, Event, MazeQuery, Position, Velocity,
};
use maze_runner_system_interpolation::RenderInterpolator;
use maze_runner_system_movement::{CharacterMovementState, Movement};

/// A single player-controlled maze character.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    state: CharacterMovementState,
    movement: Movement,
    interpolator: RenderInterpolator,
    animation: SpriteAnimation,
}

impl Character {
    /// Creates a resting character at `start`, facing left.
    ///
    /// Frames whose tick delta exceeds one tile are hidden, which only
    /// happens across a warp.
    #[must_use]
    pub fn new(start: Position, tile_size: f64, tiles_per_second: f64) -> Self {
        Self {
            state: CharacterMovementState::new(
                start,
                Velocity::from_tile_size(tile_size, tiles_per_second),
            ),
            movement: Movement::new(tile_size),
            interpolator: RenderInterpolator::new(tile_size),
            animation: SpriteAnimation::default(),
        }
    }

    /// Read-only view of the authoritative movement state.
    #[must_use]
    pub const fn state(&self) -> &CharacterMovementState {
        &self.state
    }

    /// Side length of a maze tile in world units.
    #[must_use]
    pub const fn tile_size(&self) -> f64 {
        self.movement.tile_size()
    }

    /// Records the direction the player wants to travel in next.
    ///
    /// Always accepted; the movement rules decide on the following tick
    /// whether and when it takes effect.
    pub fn set_requested_direction(&mut self, direction: Direction) {
        debug!("requested {}", direction.name());
        self.state.request(direction);
    }

    /// Advances the simulation by `elapsed`.
    pub fn tick<M>(&mut self, maze: &M, elapsed: Duration, out: &mut Vec<Event>)
    where
        M: MazeQuery + ?Sized,
    {
        let was_moving = self.state.is_moving();
        self.movement.advance(&mut self.state, maze, elapsed, out);
        if was_moving {
            self.animation.accumulate(elapsed);
        }
    }

    /// Produces the frame to present `fraction` of the way into the next tick.
    ///
    /// Rendering also drives the sprite clock, so it takes `&mut self`; the
    /// movement state is left untouched.
    pub fn render(&mut self, fraction: f64) -> CharacterFrame {
        let sample = self.interpolator.sample(
            self.state.previous_position(),
            self.state.position(),
            fraction,
        );
        CharacterFrame {
            position: sample.position(),
            direction: self.state.direction(),
            visibility: sample.visibility(),
            sprite_frame: self.animation.advance(),
            arrow: self.arrow(),
        }
    }

    fn arrow(&self) -> ArrowIndicator {
        let position = self.state.position();
        let tile_size = self.tile_size();
        ArrowIndicator {
            position: Position::new(position.top() - tile_size, position.left() - tile_size),
            direction: self.state.requested_direction(),
        }
    }
}

/// Routes a command to the character, collecting any resulting events.
pub fn apply<M>(character: &mut Character, maze: &M, command: Command, out: &mut Vec<Event>)
where
    M: MazeQuery + ?Sized,
{
    match command {
        Command::RequestDirection { direction } => character.set_requested_direction(direction),
        Command::Tick { dt } => character.tick(maze, dt, out),
    }
}
