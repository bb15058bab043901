#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable maze data source for the maze runner.
//!
//! The [`MazeGrid`] is parsed once from a text layout and never mutated
//! afterwards. Movement systems query it through the
//! [`MazeQuery`](maze_runner_core::MazeQuery) trait, which must stay total for
//! coordinates just outside the declared bounds: lookahead regularly probes
//! one tile past the edge, and warp tunnels deliberately lead there.

mod layout;

pub use layout::{MazeError, CLASSIC_LAYOUT};

use log::debug;
use maze_runner_core::{Axis, GridCoordinate, MazeQuery, TileKind};

/// Tile grid describing walls, open corridors and warp tunnels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<TileKind>,
}

impl MazeGrid {
    /// Parses a maze from its text layout.
    ///
    /// See [`CLASSIC_LAYOUT`] for the glyph set.
    pub fn parse(layout: &str) -> Result<Self, MazeError> {
        let (columns, rows, tiles) = layout::parse(layout)?;
        debug!("parsed maze layout with {columns} columns and {rows} rows");
        Ok(Self {
            columns,
            rows,
            tiles,
        })
    }

    /// Builds the bundled 28x31 arcade maze.
    pub fn classic() -> Result<Self, MazeError> {
        Self::parse(CLASSIC_LAYOUT)
    }

    /// Returns the tiles of a single row, or `None` when the row is outside the grid.
    #[must_use]
    pub fn row_tiles(&self, row: u32) -> Option<&[TileKind]> {
        if row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let start = usize::try_from(row).ok()?.checked_mul(width)?;
        self.tiles.get(start..start + width)
    }

    fn tile(&self, coordinate: GridCoordinate) -> Option<TileKind> {
        let column = u32::try_from(coordinate.column()).ok()?;
        let row = u32::try_from(coordinate.row()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let index = usize::try_from(row).ok()? * width + usize::try_from(column).ok()?;
        self.tiles.get(index).copied()
    }

    fn contains_along(&self, coordinate: GridCoordinate, axis: Axis) -> bool {
        let index = coordinate.along(axis);
        index >= 0 && i64::from(index) < i64::from(self.extent(axis))
    }

    /// Classifies a coordinate that overflows `axis` but lies inside the other axis.
    ///
    /// Lines with a warp mouth at either end form a torus of `extent + 1`
    /// tiles: both ends share one phantom tunnel tile at index `extent`
    /// (equivalently `-1`). Every other overflow is solid wall.
    fn classify_overflow(&self, coordinate: GridCoordinate, axis: Axis) -> TileKind {
        let Ok(extent) = i32::try_from(self.extent(axis)) else {
            return TileKind::Wall;
        };
        if extent == 0 || !self.is_tunnel_line(coordinate, axis, extent) {
            return TileKind::Wall;
        }

        let wrapped = coordinate.along(axis).rem_euclid(extent + 1);
        if wrapped == extent {
            return TileKind::Warp;
        }
        self.tile(coordinate.with(axis, wrapped))
            .unwrap_or(TileKind::Wall)
    }

    fn is_tunnel_line(&self, coordinate: GridCoordinate, axis: Axis, extent: i32) -> bool {
        let first = self.tile(coordinate.with(axis, 0));
        let last = self.tile(coordinate.with(axis, extent - 1));
        first == Some(TileKind::Warp) || last == Some(TileKind::Warp)
    }
}

impl MazeQuery for MazeGrid {
    fn classify(&self, coordinate: GridCoordinate) -> TileKind {
        let column_inside = self.contains_along(coordinate, Axis::Left);
        let row_inside = self.contains_along(coordinate, Axis::Top);
        match (column_inside, row_inside) {
            (true, true) => self.tile(coordinate).unwrap_or(TileKind::Wall),
            (false, true) => self.classify_overflow(coordinate, Axis::Left),
            (true, false) => self.classify_overflow(coordinate, Axis::Top),
            (false, false) => TileKind::Wall,
        }
    }

    fn columns(&self) -> u32 {
        self.columns
    }

    fn rows(&self) -> u32 {
        self.rows
    }
}
