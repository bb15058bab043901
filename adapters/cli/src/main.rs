#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the maze runner headlessly.

mod config;
mod input;
mod simulation;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use maze_runner_character::Character;
use maze_runner_core::{MazeQuery, TileKind};
use maze_runner_rendering::{
    CharacterSprite, MazePresentation, Presentation, RenderingBackend, Scene, TextBackend,
};
use maze_runner_system_geometry::tile_origin;
use maze_runner_world::MazeGrid;

use crate::{
    config::RunnerConfig,
    input::InputScript,
    simulation::{RunSummary, Simulation},
};

#[derive(Debug, Parser)]
#[command(
    name = "maze-runner",
    about = "Drives a grid-constrained maze character with a fixed-timestep loop"
)]
struct CliArgs {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of render frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u32,
    /// Scripted key presses as `tick:key` pairs, e.g. `0:left,40:up`.
    #[arg(long, default_value = "0:left")]
    script: String,
    /// Also draw every Nth frame instead of only the last one.
    #[arg(long, default_value_t = 0)]
    stride: u32,
}

/// Entry point for the maze runner command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    let stdout = io::stdout();
    let summary = run(&args, stdout.lock())?;
    info!(
        "finished {} ticks: {} turns, {} snaps, {} halts, {} warps",
        summary.ticks, summary.turns, summary.snaps, summary.halts, summary.warps
    );
    Ok(())
}

fn run<W: Write>(args: &CliArgs, writer: W) -> Result<RunSummary> {
    let config = match &args.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };
    let maze = load_maze(&config)?;
    let script = InputScript::parse(&args.script).context("invalid --script")?;
    info!("loaded input script with {} scripted ticks", script.len());

    let start = config.start();
    if maze.classify(start) == TileKind::Wall {
        bail!(
            "start tile ({}, {}) is a wall",
            start.column(),
            start.row()
        );
    }

    let mut character = Character::new(
        tile_origin(start, config.tile_size),
        config.tile_size,
        config.tiles_per_second,
    );
    let scene = Scene::new(
        MazePresentation::new(&maze, config.tile_size as f32)?,
        CharacterSprite::from_frame(&character.render(0.0)),
    );

    let mut simulation = Simulation::new(
        maze,
        character,
        script,
        config.tick(),
        config.max_ticks_per_frame,
    );
    let backend = TextBackend::new(writer, args.frames, config.frame()).with_stride(args.stride);
    backend.run(Presentation::new("maze-runner", scene), |frame_dt, scene| {
        let frame = simulation.frame(frame_dt);
        scene.character = CharacterSprite::from_frame(&frame);
        scene.ticks = simulation.summary().ticks;
    })?;

    let summary = simulation.summary();
    Ok(summary)
}

fn load_maze(config: &RunnerConfig) -> Result<MazeGrid> {
    match &config.maze {
        Some(path) => {
            let layout = fs::read_to_string(path)
                .with_context(|| format!("failed to read maze layout at {}", path.display()))?;
            MazeGrid::parse(&layout)
                .with_context(|| format!("invalid maze layout at {}", path.display()))
        }
        None => MazeGrid::classic().context("bundled classic maze failed to parse"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(script: &str, frames: u32) -> CliArgs {
        CliArgs {
            config: None,
            frames,
            script: script.to_owned(),
            stride: 0,
        }
    }

    #[test]
    fn default_run_halts_at_the_end_of_the_start_corridor() {
        let mut output = Vec::new();
        let summary = run(&args("0:left", 60), &mut output).expect("run succeeds");

        assert_eq!(summary.ticks, 96);
        assert_eq!(summary.turns, 0);
        assert_eq!(summary.halts, 1);
        assert!(summary.snaps > 0);

        let text = String::from_utf8(output).expect("utf-8 output");
        assert!(text.starts_with("maze-runner\n"));
        assert!(text.contains("frame 60 tick 96 at (48.00, 184.00) facing left\n"));
        assert_eq!(text.lines().count(), 1 + 1 + 31);
    }

    #[test]
    fn invalid_script_is_reported() {
        let error = run(&args("soon:left", 1), Vec::new()).expect_err("script must fail");
        assert!(format!("{error:#}").contains("invalid --script"));
    }

    #[test]
    fn cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "maze-runner",
            "--frames",
            "5",
            "--script",
            "0:up",
            "--stride",
            "2",
        ])
        .expect("flags parse");
        assert_eq!(args.frames, 5);
        assert_eq!(args.script, "0:up");
        assert_eq!(args.stride, 2);
        assert!(args.config.is_none());
    }
}
