//! Fixed-timestep driver that feeds the character from simulated frames.

use std::time::Duration;

use log::{debug, info, warn};
use maze_runner_character::{apply, Character};
use maze_runner_core::{elapsed_ms, CharacterFrame, Command, Event};
use maze_runner_world::MazeGrid;

use crate::input::InputScript;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StepPlan {
    pub(crate) ticks_to_run: u32,
    pub(crate) remaining_accumulator: Duration,
    pub(crate) dropped_backlog: Duration,
}

pub(crate) fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

/// Counters describing what happened during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) ticks: u64,
    pub(crate) turns: u64,
    pub(crate) snaps: u64,
    pub(crate) halts: u64,
    pub(crate) warps: u64,
}

impl RunSummary {
    fn record(&mut self, event: &Event) {
        match event {
            Event::DirectionChanged { .. } => self.turns += 1,
            Event::SnappedToTile { .. } => self.snaps += 1,
            Event::Halted { at } => {
                info!("boxed in at {at:?}");
                self.halts += 1;
            }
            Event::Warped { from, to } => {
                info!("warped from {from:?} to {to:?}");
                self.warps += 1;
            }
        }
    }
}

/// Owns the maze, the character and the tick accumulator for one run.
#[derive(Debug)]
pub(crate) struct Simulation {
    maze: MazeGrid,
    character: Character,
    script: InputScript,
    tick: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
    events: Vec<Event>,
    summary: RunSummary,
}

impl Simulation {
    pub(crate) fn new(
        maze: MazeGrid,
        character: Character,
        script: InputScript,
        tick: Duration,
        max_ticks_per_frame: u32,
    ) -> Self {
        Self {
            maze,
            character,
            script,
            tick,
            max_ticks_per_frame,
            accumulator: Duration::ZERO,
            events: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    pub(crate) const fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Advances by one presented frame and returns what to draw.
    pub(crate) fn frame(&mut self, frame_dt: Duration) -> CharacterFrame {
        self.accumulator = self.accumulator.saturating_add(frame_dt);
        let plan = plan_sim_steps(self.accumulator, self.tick, self.max_ticks_per_frame);
        self.accumulator = plan.remaining_accumulator;
        if !plan.dropped_backlog.is_zero() {
            warn!(
                "dropping {:?} of simulation backlog after {} ticks",
                plan.dropped_backlog, plan.ticks_to_run
            );
        }

        for _ in 0..plan.ticks_to_run {
            self.step();
        }

        let fraction = elapsed_ms(self.accumulator) / elapsed_ms(self.tick);
        self.character.render(fraction)
    }

    fn step(&mut self) {
        let tick = self.summary.ticks;
        for &direction in self.script.presses_at(tick) {
            debug!("tick {tick}: pressing {}", direction.name());
            apply(
                &mut self.character,
                &self.maze,
                Command::RequestDirection { direction },
                &mut self.events,
            );
        }

        apply(
            &mut self.character,
            &self.maze,
            Command::Tick { dt: self.tick },
            &mut self.events,
        );
        for event in self.events.drain(..) {
            self.summary.record(&event);
        }
        self.summary.ticks += 1;
    }
}
