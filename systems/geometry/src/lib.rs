#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stateless geometry and collision helpers for grid-constrained movement.
//!
//! Positions are continuous and measured in the same unit as the tile size.
//! Grid coordinates are always derived from positions by floor division and
//! never stored. Every function in this crate is pure; the maze is only read
//! through [`MazeQuery`].

use std::time::Duration;

use log::trace;
use maze_runner_core::{
    Axis, Direction, GridCoordinate, MazeQuery, Position, Rounding, TileKind, Velocity,
    Visibility,
};

/// Continuous location paired with the tile size it is measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePoint {
    position: Position,
    tile_size: f64,
}

impl TilePoint {
    /// Pairs a world-space position with the tile size used for lookahead.
    #[must_use]
    pub const fn from_position(position: Position, tile_size: f64) -> Self {
        Self {
            position,
            tile_size,
        }
    }

    /// Tile entered by the leading edge of a character travelling in `direction`.
    ///
    /// The travel axis is rounded according to [`Direction::step`]; the
    /// perpendicular axis is floored.
    #[must_use]
    pub fn leading_tile(&self, direction: Direction) -> GridCoordinate {
        let step = direction.step();
        let leading = tile_index(
            self.position.along(step.axis()),
            self.tile_size,
            step.rounding(),
        );
        grid_coordinate(self.position, self.tile_size).with(step.axis(), leading)
    }
}

/// Candidate result of moving a position for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    position: Position,
    tile_point: TilePoint,
}

impl Projection {
    /// Position after the move.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Moved position paired with the tile size, used for lookahead.
    #[must_use]
    pub const fn tile_point(&self) -> TilePoint {
        self.tile_point
    }
}

/// Index of the tile boundary reached by rounding `value` in tile units.
///
/// The quotient is corrected against the products [`tile_origin`] computes,
/// so every origin maps back onto its own index for any tile size.
fn tile_index(value: f64, tile_size: f64, rounding: Rounding) -> i32 {
    let boundary = |index: i32| f64::from(index) * tile_size;
    let mut index = (value / tile_size).floor() as i32;
    if boundary(index.saturating_add(1)) <= value {
        index = index.saturating_add(1);
    } else if boundary(index) > value {
        index = index.saturating_sub(1);
    }
    match rounding {
        Rounding::Ceil if boundary(index) < value => index.saturating_add(1),
        Rounding::Floor | Rounding::Ceil => index,
    }
}

/// Floor-divides each axis of `position` by the tile size.
#[must_use]
pub fn grid_coordinate(position: Position, tile_size: f64) -> GridCoordinate {
    GridCoordinate::new(
        tile_index(position.left(), tile_size, Rounding::Floor),
        tile_index(position.top(), tile_size, Rounding::Floor),
    )
}

/// Canonical origin of a tile: the position every tile-aligned character occupies.
#[must_use]
pub fn tile_origin(coordinate: GridCoordinate, tile_size: f64) -> Position {
    Position::new(
        f64::from(coordinate.row()) * tile_size,
        f64::from(coordinate.column()) * tile_size,
    )
}

/// Reports whether `position` sits exactly on its tile's origin.
#[must_use]
pub fn is_on_grid(position: Position, tile_size: f64) -> bool {
    tile_origin(grid_coordinate(position, tile_size), tile_size) == position
}

/// Advances `position` along `direction` by the distance covered in `elapsed`.
///
/// The distance is capped at one tile so the single-tile lookahead performed
/// from a grid-aligned position always inspects the adjacent tile.
#[must_use]
pub fn project(
    position: Position,
    direction: Direction,
    velocity: Velocity,
    elapsed: Duration,
    tile_size: f64,
) -> Projection {
    let step = direction.step();
    let distance = velocity.distance(elapsed).min(tile_size);
    let moved = position.with(
        step.axis(),
        position.along(step.axis()) + step.sign() * distance,
    );
    Projection {
        position: moved,
        tile_point: TilePoint::from_position(moved, tile_size),
    }
}

/// Reports whether the tile entered by the leading edge is solid.
///
/// Coordinates outside the maze are classified by the maze itself, which
/// reports wall everywhere except along warp tunnels.
#[must_use]
pub fn is_wall_collision<M>(tile_point: TilePoint, maze: &M, direction: Direction) -> bool
where
    M: MazeQuery + ?Sized,
{
    maze.classify(tile_point.leading_tile(direction)) == TileKind::Wall
}

/// Reports whether `requested` points exactly opposite to `current`.
#[must_use]
pub fn is_reversal(current: Direction, requested: Direction) -> bool {
    current.opposite() == requested
}

/// Reports whether two derived grid coordinates differ.
#[must_use]
pub fn has_crossed_into_new_tile(before: GridCoordinate, after: GridCoordinate) -> bool {
    before != after
}

/// Origin of the next tile boundary reached when travelling in `direction`.
///
/// Decreasing directions clamp to the current tile's origin, increasing
/// directions to the following tile's origin. Grid-aligned positions are
/// returned unchanged.
#[must_use]
pub fn boundary_ahead(position: Position, direction: Direction, tile_size: f64) -> Position {
    let step = direction.step();
    let current = grid_coordinate(position, tile_size);
    let boundary = tile_index(position.along(step.axis()), tile_size, step.rounding());
    tile_origin(current.with(step.axis(), boundary), tile_size)
}

/// Relocates a character that left the maze through a warp tunnel.
///
/// Each axis wraps onto `extent + 1` tiles, the extra tile being the phantom
/// tunnel tile shared by both edges. Once a character moves past that
/// phantom tile on one side it reappears at the matching phantom position on
/// the other side. The perpendicular axis is left untouched.
#[must_use]
pub fn apply_warp<M>(position: Position, tile_size: f64, maze: &M) -> Position
where
    M: MazeQuery + ?Sized,
{
    let mut warped = position;
    for axis in Axis::ALL {
        let tiles = maze.extent(axis);
        if tiles == 0 {
            continue;
        }
        let extent = f64::from(tiles) * tile_size;
        let period = extent + tile_size;
        let value = warped.along(axis);
        if value < -tile_size {
            warped = warped.with(axis, value + period);
        } else if value > extent {
            warped = warped.with(axis, value - period);
        }
    }
    if warped != position {
        trace!("warped from {position:?} to {warped:?}");
    }
    warped
}

/// Blends one axis between two positions.
///
/// Equivalent to `previous + (current - previous) * fraction`, written as a
/// weighted sum so both endpoints are reproduced exactly. The fraction is
/// clamped to `0.0..=1.0`.
#[must_use]
pub fn interpolate_axis(fraction: f64, axis: Axis, previous: Position, current: Position) -> f64 {
    let fraction = fraction.clamp(0.0, 1.0);
    previous.along(axis) * (1.0 - fraction) + current.along(axis) * fraction
}

/// Hides a frame whose position jumped further than `threshold` on either axis.
#[must_use]
pub fn detect_stutter(current: Position, previous: Position, threshold: f64) -> Visibility {
    let jumped = Axis::ALL
        .iter()
        .any(|axis| (current.along(*axis) - previous.along(*axis)).abs() > threshold);
    if jumped {
        Visibility::Hide
    } else {
        Visibility::Show
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::TILES_PER_SECOND;
    use maze_runner_world::MazeGrid;

    const TILE: f64 = 8.0;

    fn velocity() -> Velocity {
        Velocity::from_tile_size(TILE, TILES_PER_SECOND)
    }

    fn corridor() -> MazeGrid {
        MazeGrid::parse(
            "XXXXXXX\n\
             W.....W\n\
             X.X.X.X\n\
             XXXXXXX",
        )
        .expect("layout parses")
    }

    #[test]
    fn tile_origins_are_on_grid() {
        for column in -2..6 {
            for row in -1..4 {
                let origin = tile_origin(GridCoordinate::new(column, row), TILE);
                assert!(is_on_grid(origin, TILE), "{origin:?} should be aligned");
            }
        }
    }

    #[test]
    fn fractional_tile_origins_round_trip() {
        let tile = 3.3;
        for column in -3..30 {
            for row in -3..30 {
                let coordinate = GridCoordinate::new(column, row);
                let origin = tile_origin(coordinate, tile);
                assert_eq!(grid_coordinate(origin, tile), coordinate);
                assert!(is_on_grid(origin, tile), "{origin:?} should be aligned");
            }
        }
    }

    #[test]
    fn fractional_tiles_clamp_and_look_ahead_from_exact_origins() {
        let tile = 3.3;
        let origin = tile_origin(GridCoordinate::new(3, 1), tile);
        let inside = Position::new(origin.top(), origin.left() + 0.5);
        assert_eq!(
            boundary_ahead(inside, Direction::Right, tile),
            tile_origin(GridCoordinate::new(4, 1), tile)
        );
        assert_eq!(boundary_ahead(inside, Direction::Left, tile), origin);
        assert_eq!(boundary_ahead(origin, Direction::Right, tile), origin);

        let velocity = Velocity::from_tile_size(tile, TILES_PER_SECOND);
        let elapsed = Duration::from_millis(10);
        let expectations = [
            (Direction::Up, GridCoordinate::new(3, 0)),
            (Direction::Down, GridCoordinate::new(3, 2)),
            (Direction::Left, GridCoordinate::new(2, 1)),
            (Direction::Right, GridCoordinate::new(4, 1)),
        ];
        for (direction, expected) in expectations {
            let projection = project(origin, direction, velocity, elapsed, tile);
            assert_eq!(projection.tile_point().leading_tile(direction), expected);
        }
    }

    #[test]
    fn sub_tile_offsets_are_off_grid() {
        let origin = tile_origin(GridCoordinate::new(3, 2), TILE);
        for offset in [0.001, 0.5, 3.999, 7.5] {
            let across = Position::new(origin.top(), origin.left() + offset);
            let down = Position::new(origin.top() + offset, origin.left());
            assert!(!is_on_grid(across, TILE));
            assert!(!is_on_grid(down, TILE));
        }
    }

    #[test]
    fn snapping_is_idempotent() {
        for position in [
            Position::new(13.7, 2.2),
            Position::new(-3.0, 40.0),
            Position::new(0.0, -9.5),
        ] {
            let snapped = tile_origin(grid_coordinate(position, TILE), TILE);
            let twice = tile_origin(grid_coordinate(snapped, TILE), TILE);
            assert_eq!(snapped, twice);
        }
    }

    #[test]
    fn grid_coordinate_floors_negative_positions() {
        assert_eq!(
            grid_coordinate(Position::new(-0.5, -8.0), TILE),
            GridCoordinate::new(-1, -1)
        );
        assert_eq!(
            grid_coordinate(Position::new(15.99, 16.0), TILE),
            GridCoordinate::new(2, 1)
        );
    }

    #[test]
    fn projection_moves_along_direction_axis_only() {
        let start = Position::new(8.0, 16.0);
        let elapsed = Duration::from_millis(10);
        let distance = velocity().distance(elapsed);

        let left = project(start, Direction::Left, velocity(), elapsed, TILE);
        assert_eq!(left.position(), Position::new(8.0, 16.0 - distance));

        let down = project(start, Direction::Down, velocity(), elapsed, TILE);
        assert_eq!(down.position(), Position::new(8.0 + distance, 16.0));
    }

    #[test]
    fn projection_never_exceeds_one_tile() {
        let start = Position::new(8.0, 8.0);
        let projection = project(
            start,
            Direction::Right,
            velocity(),
            Duration::from_secs(5),
            TILE,
        );
        assert_eq!(projection.position(), Position::new(8.0, 16.0));
    }

    #[test]
    fn lookahead_selects_adjacent_tile_from_grid_aligned_positions() {
        let start = tile_origin(GridCoordinate::new(3, 1), TILE);
        let elapsed = Duration::from_millis(10);
        let expectations = [
            (Direction::Up, GridCoordinate::new(3, 0)),
            (Direction::Down, GridCoordinate::new(3, 2)),
            (Direction::Left, GridCoordinate::new(2, 1)),
            (Direction::Right, GridCoordinate::new(4, 1)),
        ];
        for (direction, expected) in expectations {
            let projection = project(start, direction, velocity(), elapsed, TILE);
            assert_eq!(projection.tile_point().leading_tile(direction), expected);
        }
    }

    #[test]
    fn single_tile_walls_block_any_step_length() {
        let maze = corridor();
        let start = tile_origin(GridCoordinate::new(2, 1), TILE);
        for millis in [1, 10, 50, 90, 1_000] {
            let elapsed = Duration::from_millis(millis);
            let down = project(start, Direction::Down, velocity(), elapsed, TILE);
            assert!(is_wall_collision(down.tile_point(), &maze, Direction::Down));
            let up = project(start, Direction::Up, velocity(), elapsed, TILE);
            assert!(is_wall_collision(up.tile_point(), &maze, Direction::Up));
            let left = project(start, Direction::Left, velocity(), elapsed, TILE);
            assert!(!is_wall_collision(left.tile_point(), &maze, Direction::Left));
        }
    }

    #[test]
    fn tunnel_mouths_are_not_walls() {
        let maze = corridor();
        let start = tile_origin(GridCoordinate::new(5, 1), TILE);
        let elapsed = Duration::from_millis(10);
        let right = project(start, Direction::Right, velocity(), elapsed, TILE);
        assert!(!is_wall_collision(right.tile_point(), &maze, Direction::Right));

        let edge = tile_origin(GridCoordinate::new(6, 1), TILE);
        let beyond = project(edge, Direction::Right, velocity(), elapsed, TILE);
        assert!(!is_wall_collision(beyond.tile_point(), &maze, Direction::Right));
    }

    #[test]
    fn reversal_only_for_opposites() {
        assert!(is_reversal(Direction::Right, Direction::Left));
        assert!(is_reversal(Direction::Up, Direction::Down));
        assert!(!is_reversal(Direction::Up, Direction::Left));
        assert!(!is_reversal(Direction::Left, Direction::Left));
    }

    #[test]
    fn crossing_detects_changed_tiles() {
        let a = GridCoordinate::new(1, 1);
        assert!(!has_crossed_into_new_tile(a, a));
        assert!(has_crossed_into_new_tile(a, GridCoordinate::new(0, 1)));
    }

    #[test]
    fn boundary_ahead_follows_travel_direction() {
        let mid = Position::new(8.0, 13.0);
        assert_eq!(
            boundary_ahead(mid, Direction::Right, TILE),
            Position::new(8.0, 16.0)
        );
        assert_eq!(
            boundary_ahead(mid, Direction::Left, TILE),
            Position::new(8.0, 8.0)
        );

        let aligned = Position::new(16.0, 8.0);
        assert_eq!(boundary_ahead(aligned, Direction::Down, TILE), aligned);
        assert_eq!(boundary_ahead(aligned, Direction::Up, TILE), aligned);
    }

    #[test]
    fn warp_round_trip_preserves_perpendicular_offset() {
        let maze = corridor();
        let top = 8.000_000_000_000_002;

        let leaving_left = Position::new(top, -TILE - 0.25);
        let arrived_right = apply_warp(leaving_left, TILE, &maze);
        assert_eq!(arrived_right.top().to_bits(), top.to_bits());
        assert_eq!(arrived_right.left(), 7.0 * TILE - 0.25);

        let leaving_right = Position::new(top, 7.0 * TILE + 0.25);
        let arrived_left = apply_warp(leaving_right, TILE, &maze);
        assert_eq!(arrived_left.top().to_bits(), top.to_bits());
        assert_eq!(arrived_left.left(), -TILE + 0.25);
    }

    #[test]
    fn warp_is_identity_inside_the_tunnel_span() {
        let maze = corridor();
        for left in [-TILE, 0.0, 20.0, 7.0 * TILE] {
            let position = Position::new(8.0, left);
            assert_eq!(apply_warp(position, TILE, &maze), position);
        }
    }

    #[test]
    fn interpolation_hits_endpoints_exactly() {
        let previous = Position::new(0.1, 123.456);
        let current = Position::new(0.3, -7.77);
        for axis in Axis::ALL {
            assert_eq!(
                interpolate_axis(0.0, axis, previous, current),
                previous.along(axis)
            );
            assert_eq!(
                interpolate_axis(1.0, axis, previous, current),
                current.along(axis)
            );
        }
        let halfway = interpolate_axis(0.5, Axis::Left, previous, current);
        assert!((halfway - (123.456 - 7.77) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn interpolation_clamps_fraction() {
        let previous = Position::new(0.0, 0.0);
        let current = Position::new(4.0, 8.0);
        assert_eq!(interpolate_axis(-1.0, Axis::Top, previous, current), 0.0);
        assert_eq!(interpolate_axis(2.0, Axis::Left, previous, current), 8.0);
    }

    #[test]
    fn stutter_hides_large_jumps_only() {
        let previous = Position::new(8.0, 8.0);
        assert_eq!(
            detect_stutter(Position::new(8.0, 8.9), previous, TILE),
            Visibility::Show
        );
        assert_eq!(
            detect_stutter(Position::new(8.0, 16.0), previous, TILE),
            Visibility::Show
        );
        assert_eq!(
            detect_stutter(Position::new(8.0, 200.0), previous, TILE),
            Visibility::Hide
        );
        assert_eq!(
            detect_stutter(Position::new(-1.0, 8.0), previous, TILE),
            Visibility::Hide
        );
    }
}
