#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for maze runner adapters.

mod text;

pub use text::TextBackend;

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_runner_core::{CharacterFrame, Direction, MazeQuery, Position, TileKind, Visibility};
use maze_runner_world::MazeGrid;
use std::{error::Error, fmt, time::Duration};

/// Describes the static maze that backends draw beneath the character.
#[derive(Clone, Debug, PartialEq)]
pub struct MazePresentation {
    /// Number of columns contained in the maze.
    pub columns: u32,
    /// Number of rows contained in the maze.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
    tiles: Vec<TileKind>,
}

impl MazePresentation {
    /// Captures the tiles of `maze` for presentation.
    ///
    /// Returns an error when `tile_length` is not a positive finite number.
    pub fn new(maze: &MazeGrid, tile_length: f32) -> Result<Self, RenderingError> {
        if !tile_length.is_finite() || tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        let tiles = (0..maze.rows())
            .filter_map(|row| maze.row_tiles(row))
            .flatten()
            .copied()
            .collect();

        Ok(Self {
            columns: maze.columns(),
            rows: maze.rows(),
            tile_length,
            tiles,
        })
    }

    /// Tile at the provided column and row, or `None` outside the maze.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<TileKind> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = row as usize * self.columns as usize + column as usize;
        self.tiles.get(index).copied()
    }

    /// Tile nearest to a world-space position, or `None` when it lies outside the maze.
    #[must_use]
    pub fn nearest_tile(&self, position: Vec2) -> Option<(u32, u32)> {
        let tile = (position / self.tile_length).round();
        if tile.x < 0.0 || tile.y < 0.0 {
            return None;
        }
        let (column, row) = (tile.x as u32, tile.y as u32);
        (column < self.columns && row < self.rows).then_some((column, row))
    }
}

/// Character sprite placement derived from a [`CharacterFrame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterSprite {
    /// Top-left corner of the sprite in world units (`x` = left, `y` = top).
    pub world_position: Vec2,
    /// Facing used to pick the sprite sheet.
    pub direction: Direction,
    /// Frame index within the sprite sheet.
    pub sprite_frame: u8,
    /// Whether the sprite is drawn this frame.
    pub visible: bool,
    /// Top-left corner of the requested-direction arrow.
    pub arrow_position: Vec2,
    /// Direction the arrow points in.
    pub arrow_direction: Direction,
}

impl CharacterSprite {
    /// Converts a simulation frame into world-space sprite placement.
    #[must_use]
    pub fn from_frame(frame: &CharacterFrame) -> Self {
        Self {
            world_position: world_vec(frame.position),
            direction: frame.direction,
            sprite_frame: frame.sprite_frame,
            visible: frame.visibility == Visibility::Show,
            arrow_position: world_vec(frame.arrow.position),
            arrow_direction: frame.arrow.direction,
        }
    }
}

fn world_vec(position: Position) -> Vec2 {
    Vec2::new(position.left() as f32, position.top() as f32)
}

/// Scene description combining the maze and the character.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Maze drawn behind the character.
    pub maze: MazePresentation,
    /// Character drawn on top of the maze.
    pub character: CharacterSprite,
    /// Number of simulation ticks completed so far.
    pub ticks: u64,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(maze: MazePresentation, character: CharacterSprite) -> Self {
        Self {
            maze,
            character,
            ticks: 0,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting maze runner scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and may
    /// mutate the scene before it is rendered, allowing adapters to step the
    /// simulation deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene);
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be positive to produce a visible maze.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}
