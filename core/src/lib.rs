#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze runner workspace.
//!
//! This crate defines the value types and message surface that connect the
//! maze data source, the pure movement systems, the character entity and the
//! presentation adapters. Input adapters submit [`Command`] values, the
//! character reacts by mutating its own state once per tick and reports what
//! happened through [`Event`] values. Rendering consumes [`CharacterFrame`]
//! snapshots and nothing else.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of tiles a character crosses per second of simulated time.
pub const TILES_PER_SECOND: f64 = 11.0;

/// Cardinal movement directions available to characters.
///
/// There is deliberately no "stopped" variant; characters track motion with a
/// separate flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Axis, sign and lookahead rounding used when travelling in this direction.
    ///
    /// Projection and collision lookahead both read this table so the
    /// convention lives in exactly one place. Directions that increase an
    /// axis round the leading edge up, directions that decrease it round down,
    /// which always selects the tile the leading edge is about to enter.
    #[must_use]
    pub const fn step(self) -> DirectionStep {
        match self {
            Self::Up => DirectionStep::new(Axis::Top, -1.0, Rounding::Floor),
            Self::Down => DirectionStep::new(Axis::Top, 1.0, Rounding::Ceil),
            Self::Left => DirectionStep::new(Axis::Left, -1.0, Rounding::Floor),
            Self::Right => DirectionStep::new(Axis::Left, 1.0, Rounding::Ceil),
        }
    }

    /// Lower-case name used by presentation layers when selecting sprites.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Axis of a [`Position`] affected by travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Vertical axis, measured downward from the maze origin.
    Top,
    /// Horizontal axis, measured rightward from the maze origin.
    Left,
}

impl Axis {
    /// Both axes in a stable order.
    pub const ALL: [Axis; 2] = [Self::Top, Self::Left];
}

/// Rounding applied to a continuous tile-space coordinate during lookahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round toward negative infinity.
    Floor,
    /// Round toward positive infinity.
    Ceil,
}

/// Entry of the direction lookup table returned by [`Direction::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionStep {
    axis: Axis,
    sign: f64,
    rounding: Rounding,
}

impl DirectionStep {
    const fn new(axis: Axis, sign: f64, rounding: Rounding) -> Self {
        Self {
            axis,
            sign,
            rounding,
        }
    }

    /// Axis that changes while travelling.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Either `1.0` or `-1.0` depending on whether travel increases the axis.
    #[must_use]
    pub const fn sign(&self) -> f64 {
        self.sign
    }

    /// Rounding that selects the tile entered by the leading edge.
    #[must_use]
    pub const fn rounding(&self) -> Rounding {
        self.rounding
    }
}

/// Continuous location expressed in the same unit as the tile size.
///
/// Equality is exact on both axes. Snapped positions are produced by
/// multiplying whole tile indices by the tile size, so comparisons against a
/// freshly snapped value are reliable without tolerances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    top: f64,
    left: f64,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    /// Distance from the top edge of the maze.
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.top
    }

    /// Distance from the left edge of the maze.
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.left
    }

    /// Reads the component along the provided axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Top => self.top,
            Axis::Left => self.left,
        }
    }

    /// Returns a copy with the component along `axis` replaced.
    #[must_use]
    pub const fn with(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Top => Self {
                top: value,
                left: self.left,
            },
            Axis::Left => Self {
                top: self.top,
                left: value,
            },
        }
    }
}

/// Integer tile index pair. Always derived, never stored as authoritative state.
///
/// Components are signed because lookahead and warp tunnels legitimately
/// reference tiles just outside the declared maze bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    column: i32,
    row: i32,
}

impl GridCoordinate {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column index of the tile.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row index of the tile.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Reads the index along the provided axis. Rows run along [`Axis::Top`].
    #[must_use]
    pub const fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Top => self.row,
            Axis::Left => self.column,
        }
    }

    /// Returns a copy with the index along `axis` replaced.
    #[must_use]
    pub const fn with(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::Top => Self {
                column: self.column,
                row: value,
            },
            Axis::Left => Self {
                column: value,
                row: self.row,
            },
        }
    }
}

/// Classification of a single maze tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Freely traversable tile.
    Open,
    /// Impassable tile.
    Wall,
    /// Traversable tunnel mouth linking to the opposite maze edge.
    Warp,
}

/// Read-only maze collaborator queried by the movement systems.
pub trait MazeQuery {
    /// Classifies the tile at `coordinate`.
    ///
    /// Implementations must be total: coordinates outside the declared bounds
    /// receive a deterministic classification rather than a panic.
    fn classify(&self, coordinate: GridCoordinate) -> TileKind;

    /// Number of columns inside the declared bounds.
    fn columns(&self) -> u32;

    /// Number of rows inside the declared bounds.
    fn rows(&self) -> u32;

    /// Number of tiles along `axis`.
    fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Top => self.rows(),
            Axis::Left => self.columns(),
        }
    }
}

impl<T: MazeQuery + ?Sized> MazeQuery for &T {
    fn classify(&self, coordinate: GridCoordinate) -> TileKind {
        (**self).classify(coordinate)
    }

    fn columns(&self) -> u32 {
        (**self).columns()
    }

    fn rows(&self) -> u32 {
        (**self).rows()
    }
}

/// Distance travelled per millisecond of simulated time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Velocity(f64);

impl Velocity {
    /// Derives the velocity from the tile size and a tiles-per-second rate.
    #[must_use]
    pub fn from_tile_size(tile_size: f64, tiles_per_second: f64) -> Self {
        Self(tile_size * tiles_per_second / 1000.0)
    }

    /// Distance covered over `elapsed`.
    #[must_use]
    pub fn distance(&self, elapsed: Duration) -> f64 {
        self.0 * elapsed_ms(elapsed)
    }
}

/// Converts a duration into fractional milliseconds.
///
/// Goes through whole nanoseconds so whole-millisecond durations convert
/// exactly.
#[must_use]
pub fn elapsed_ms(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}

/// Whether a frame should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Draw the character.
    Show,
    /// Suppress the character for this frame.
    Hide,
}

/// Commands accepted by a character entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Records a new requested direction and resumes motion.
    RequestDirection {
        /// Direction supplied by the input collaborator.
        direction: Direction,
    },
    /// Advances the simulation by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events reported by a character entity after processing a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The character committed a new travel direction.
    DirectionChanged {
        /// Direction held before the change.
        from: Direction,
        /// Direction held after the change.
        to: Direction,
    },
    /// Both the requested and current directions are blocked; motion stopped.
    Halted {
        /// Position at which the character stopped.
        at: Position,
    },
    /// Travel was clamped to a tile boundary to re-evaluate collisions there.
    SnappedToTile {
        /// Tile whose origin the character now occupies.
        tile: GridCoordinate,
    },
    /// The character passed through a warp tunnel.
    Warped {
        /// Position before the teleport.
        from: Position,
        /// Position after the teleport.
        to: Position,
    },
}

/// Arrow drawn ahead of the character to show the requested direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowIndicator {
    /// Top-left corner of the arrow sprite.
    pub position: Position,
    /// Direction the arrow points in.
    pub direction: Direction,
}

/// Everything the presentation collaborator needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterFrame {
    /// Interpolated display position.
    pub position: Position,
    /// Travel direction used for sprite selection.
    pub direction: Direction,
    /// Whether the character should be drawn this frame.
    pub visibility: Visibility,
    /// Index of the animation frame within the directional sprite sheet.
    pub sprite_frame: u8,
    /// Requested-direction arrow.
    pub arrow: ArrowIndicator,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn opposite_directions_pair_up() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(direction.opposite().step().axis(), direction.step().axis());
            assert_eq!(direction.opposite().step().sign(), -direction.step().sign());
        }
    }

    #[test]
    fn increasing_directions_round_up() {
        assert_eq!(Direction::Right.step().rounding(), Rounding::Ceil);
        assert_eq!(Direction::Down.step().rounding(), Rounding::Ceil);
        assert_eq!(Direction::Left.step().rounding(), Rounding::Floor);
        assert_eq!(Direction::Up.step().rounding(), Rounding::Floor);
    }

    #[test]
    fn position_axis_accessors_agree() {
        let position = Position::new(3.5, 9.0);
        assert_eq!(position.along(Axis::Top), 3.5);
        assert_eq!(position.along(Axis::Left), 9.0);

        let moved = position.with(Axis::Left, 1.25);
        assert_eq!(moved, Position::new(3.5, 1.25));
        assert_eq!(moved.with(Axis::Top, 0.0), Position::new(0.0, 1.25));
    }

    #[test]
    fn grid_coordinate_axis_accessors_agree() {
        let coordinate = GridCoordinate::new(4, -1);
        assert_eq!(coordinate.along(Axis::Left), 4);
        assert_eq!(coordinate.along(Axis::Top), -1);
        assert_eq!(coordinate.with(Axis::Top, 7), GridCoordinate::new(4, 7));
    }

    #[test]
    fn velocity_matches_eleven_tiles_per_second() {
        let velocity = Velocity::from_tile_size(8.0, TILES_PER_SECOND);
        let one_second = velocity.distance(Duration::from_secs(1));
        assert!((one_second - 88.0).abs() < 1e-9);
    }

    #[test]
    fn whole_milliseconds_convert_exactly() {
        assert_eq!(elapsed_ms(Duration::from_millis(10)), 10.0);
        assert_eq!(elapsed_ms(Duration::from_micros(2_500)), 2.5);
        assert_eq!(elapsed_ms(Duration::ZERO), 0.0);
    }

    #[test]
    fn character_frame_round_trips_through_bincode() {
        let frame = CharacterFrame {
            position: Position::new(12.5, 3.0),
            direction: Direction::Left,
            visibility: Visibility::Hide,
            sprite_frame: 2,
            arrow: ArrowIndicator {
                position: Position::new(4.5, -5.0),
                direction: Direction::Up,
            },
        };
        assert_round_trip(&frame);
    }
}
