//! Tank Arena entry point
//!
//! Runs a headless session: the simulation ticks on its own thread while
//! stdin acts as the keyboard. Each line is one key action:
//!
//! - `up` / `down` / `left` / `right` (or `w` `a` `s` `d`): press a direction
//! - `-up`, `-left`, ...: release a direction
//! - `fire` or `space`: fire
//! - `quit`: end the session (EOF works too)

use std::io::{self, BufRead};

use tank_arena::renderer;
use tank_arena::sim::{Direction, InputEvent};
use tank_arena::{GameLoop, Settings};

/// Translate one input line into a key event. Unknown words are ignored.
fn parse_command(line: &str) -> Option<InputEvent> {
    let word = line.trim();
    if let Some(key) = word.strip_prefix('-') {
        return Direction::from_key(key).map(InputEvent::DirectionReleased);
    }
    match word.to_lowercase().as_str() {
        "fire" | "space" => Some(InputEvent::FirePressed),
        other => Direction::from_key(other).map(InputEvent::DirectionPressed),
    }
}

fn main() {
    env_logger::init();
    log::info!("Tank Arena (headless) starting...");

    let settings = Settings::load();
    let handle = match GameLoop::spawn(&settings) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().eq_ignore_ascii_case("quit") {
            break;
        }

        match parse_command(&line) {
            Some(event) => {
                if !handle.input.send(event) {
                    break;
                }
            }
            None => log::debug!("ignoring input {:?}", line.trim()),
        }

        let snapshot = handle.snapshots.latest();
        let frame = renderer::frame(&snapshot);
        println!(
            "tick {:>6}  player ({:.0}, {:.0})  enemies {}  projectiles {}  vertices {}",
            snapshot.tick,
            snapshot.player.pos.x,
            snapshot.player.pos.y,
            snapshot.enemies.len(),
            snapshot.projectiles.len(),
            frame.vertices.len()
        );
    }

    match handle.join() {
        Ok(ticks) => log::info!("Goodbye after {} ticks", ticks),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
