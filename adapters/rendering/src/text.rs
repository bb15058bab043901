//! Headless backend that draws scenes as text.

use std::{io::Write, time::Duration};

use anyhow::{Context, Result as AnyResult};
use maze_runner_core::{Direction, TileKind};

use crate::{Presentation, RenderingBackend, Scene};

/// Renders a fixed number of frames as text into a writer.
#[derive(Debug)]
pub struct TextBackend<W> {
    writer: W,
    frames: u32,
    frame_dt: Duration,
    stride: u32,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend that runs `frames` frames of `frame_dt` each.
    ///
    /// Only the final frame is drawn unless [`TextBackend::with_stride`] is used.
    #[must_use]
    pub fn new(writer: W, frames: u32, frame_dt: Duration) -> Self {
        Self {
            writer,
            frames,
            frame_dt,
            stride: 0,
        }
    }

    /// Additionally draws every `stride`-th frame. Zero disables intermediate frames.
    #[must_use]
    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    /// Runs the backend and hands the writer back once all frames are drawn.
    pub fn run_into<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<W>
    where
        F: FnMut(Duration, &mut Scene),
    {
        let Presentation { title, mut scene } = presentation;
        writeln!(self.writer, "{title}").context("failed to write presentation title")?;

        for frame in 1..=self.frames {
            update_scene(self.frame_dt, &mut scene);
            let last = frame == self.frames;
            let sampled = self.stride != 0 && frame % self.stride == 0;
            if last || sampled {
                draw(&mut self.writer, frame, &scene)
                    .with_context(|| format!("failed to draw frame {frame}"))?;
            }
        }

        self.writer.flush().context("failed to flush text output")?;
        Ok(self.writer)
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene),
    {
        let _writer = self.run_into(presentation, update_scene)?;
        Ok(())
    }
}

fn draw<W: Write>(writer: &mut W, frame: u32, scene: &Scene) -> std::io::Result<()> {
    let sprite = scene.character;
    writeln!(
        writer,
        "frame {frame} tick {} at ({:.2}, {:.2}) facing {}{}",
        scene.ticks,
        sprite.world_position.x,
        sprite.world_position.y,
        sprite.direction.name(),
        if sprite.visible { "" } else { " (hidden)" },
    )?;

    let character_tile = sprite
        .visible
        .then(|| scene.maze.nearest_tile(sprite.world_position))
        .flatten();

    for row in 0..scene.maze.rows {
        let mut line = String::with_capacity(scene.maze.columns as usize);
        for column in 0..scene.maze.columns {
            let glyph = if character_tile == Some((column, row)) {
                character_glyph(sprite.direction)
            } else {
                scene.maze.tile(column, row).map_or(' ', tile_glyph)
            };
            line.push(glyph);
        }
        writeln!(writer, "{}", line.trim_end())?;
    }
    Ok(())
}

fn tile_glyph(tile: TileKind) -> char {
    match tile {
        TileKind::Wall => '#',
        TileKind::Warp => '=',
        TileKind::Open => ' ',
    }
}

fn character_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => 'v',
        Direction::Down => '^',
        Direction::Left => '>',
        Direction::Right => '<',
    }
}
