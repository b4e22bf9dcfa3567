//! Dry-run a routine against the simulated world.
//!
//! The simulated world replaces the input driver, position tracker and clock,
//! so a routine runs instantly and every emitted key event can be inspected.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use command_book::RoutineLoader;
use command_core::{InputEvent, Key, Position, RunFlag, Settings, SimWorld, Status};
use console::style;

/// Run a routine against the simulated world
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Routine file (RON list of commands)
    #[arg(value_name = "ROUTINE")]
    pub routine: PathBuf,

    /// Key bindings file (RON); defaults to the built-in bindings
    #[arg(short, long, value_name = "FILE")]
    pub bindings: Option<PathBuf>,

    /// Starting position as "x,y" in normalized coordinates
    #[arg(long, value_parser = parse_position, default_value = "0.5,0.5")]
    pub start: Position,

    /// Number of times to run the whole routine
    #[arg(short, long, default_value = "1")]
    pub cycles: u32,

    /// Horizontal distance covered per second while an arrow is held
    #[arg(long, default_value_t = SimWorld::DEFAULT_WALK_SPEED)]
    pub walk_speed: f64,

    /// Extra travel after releasing an arrow, in milliseconds
    #[arg(long, default_value = "0")]
    pub slide_ms: u64,

    /// Simulate a tracker that stopped updating
    #[arg(long)]
    pub frozen: bool,

    /// Print every emitted input event
    #[arg(short, long)]
    pub events: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let settings = Settings::from_env().context("Invalid COMMAND_* settings")?;
        let book = super::load_book(self.bindings.as_deref(), &settings)?;
        let mut commands = RoutineLoader::load(&self.routine, &book)?;

        let mut world = SimWorld::new(self.start)
            .with_walk_speed(self.walk_speed)
            .with_slide(Duration::from_millis(self.slide_ms))
            .with_jump_key(book.bindings().jump.clone());
        if self.frozen {
            world = world.frozen();
        }
        let run_flag = RunFlag::default();

        let mut tally: BTreeMap<&'static str, [u32; 3]> = BTreeMap::new();
        for cycle in 1..=self.cycles {
            tracing::info!(cycle, "routine cycle started");
            for command in commands.iter_mut() {
                let status = world.run_with(&settings, &run_flag, |ctx| command.execute(ctx));
                let counts = tally.entry(command.name()).or_default();
                counts[status_index(status)] += 1;

                let position = world.peek_position();
                println!(
                    "[{:>8.2}s] {:<16} {:<10} at ({:.3}, {:.3})",
                    world.now().since_origin().as_secs_f64(),
                    command.name(),
                    styled_status(status),
                    position.x,
                    position.y
                );
            }
        }

        let events = world.events();
        if self.events {
            println!("\n{}", style("Input events").bold());
            for event in &events {
                println!("  {}", describe(event));
            }
        }

        println!("\n{}", style("Summary").bold());
        for (name, [performed, skipped, cancelled]) in &tally {
            println!(
                "  {:<16} performed {:>3}  skipped {:>3}  cancelled {:>3}",
                name, performed, skipped, cancelled
            );
        }
        println!(
            "  {} input events over {:.2}s of simulated time",
            events.len(),
            world.now().since_origin().as_secs_f64()
        );

        let held: Vec<Key> = world.held_keys();
        if !held.is_empty() {
            anyhow::bail!("keys left held after the routine: {:?}", held);
        }
        Ok(())
    }
}

fn parse_position(raw: &str) -> Result<Position, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{raw}\""))?;
    let x = command_core::validate_coordinate("x", x).map_err(|e| e.to_string())?;
    let y = command_core::validate_coordinate("y", y).map_err(|e| e.to_string())?;
    Ok(Position::new(x, y))
}

fn status_index(status: Status) -> usize {
    match status {
        Status::Performed => 0,
        Status::Skipped => 1,
        Status::Cancelled => 2,
    }
}

fn styled_status(status: Status) -> console::StyledObject<&'static str> {
    match status {
        Status::Performed => style("performed").green(),
        Status::Skipped => style("skipped").dim(),
        Status::Cancelled => style("cancelled").yellow(),
    }
}

fn describe(event: &InputEvent) -> String {
    match event {
        InputEvent::Press { key, spec } => format!(
            "press {} x{} ({}ms down / {}ms up)",
            key,
            spec.count,
            spec.down_time.as_millis(),
            spec.up_time.as_millis()
        ),
        InputEvent::Down(key) => format!("down  {}", key),
        InputEvent::Up(key) => format!("up    {}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_positions() {
        assert_eq!(parse_position("0.25,0.75"), Ok(Position::new(0.25, 0.75)));
        assert_eq!(parse_position(" 0.1 , 0.2 "), Ok(Position::new(0.1, 0.2)));
        assert!(parse_position("0.25").is_err());
        assert!(parse_position("left,0.2").is_err());
    }
}
