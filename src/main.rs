//! Swarm Shooter headless runner
//!
//! Plays the game in attract mode (autopilot) against the bundled level
//! progression and prints the final stats as JSON.
//!
//! Usage: `swarm-shooter [settings.json] [max-frames]`

#[cfg(not(target_arch = "wasm32"))]
use swarm_shooter::sim::{FrameClock, GameEvent, GamePhase, SimulationState, TickInput, tick};
#[cfg(not(target_arch = "wasm32"))]
use swarm_shooter::{BuiltinLevels, Settings, load_level};

/// Synthetic frame interval (60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Ten minutes of play at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Swarm Shooter (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let max_frames = match args.next().map(|arg| arg.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(err)) => {
            log::warn!("Invalid frame limit ({}), using {}", err, DEFAULT_MAX_FRAMES);
            DEFAULT_MAX_FRAMES
        }
        None => DEFAULT_MAX_FRAMES,
    };

    let mut levels = BuiltinLevels;
    let mut state = SimulationState::new(settings);
    let first = load_level(&mut levels, state.level);
    state.start(&first);

    let mut clock = FrameClock::new();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    for frame in 0..max_frames {
        let dt = clock.advance(frame as f64 * FRAME_MS);
        tick(&mut state, &input, dt);
        log_events(&state.events);

        match state.phase {
            GamePhase::LevelComplete => {
                let next = load_level(&mut levels, state.level);
                state.advance_level(&next);
            }
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    log::info!(
        "Stopped after {} ticks in {:?}",
        state.time_ticks,
        state.phase
    );
    match serde_json::to_string_pretty(&state.stats()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize stats: {}", err),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::EnemyKilled { kind, points, .. } => {
                log::debug!("Killed {:?} (+{})", kind, points);
            }
            GameEvent::PlayerHit { lives } => log::info!("Player hit, {} lives left", lives),
            GameEvent::PowerUpApplied(kind) => log::info!("Power-up: {:?}", kind),
            GameEvent::Breached => log::info!("The swarm reached the player"),
            GameEvent::GameOver { score } => log::info!("Game over with {} points", score),
            _ => log::trace!("{:?}", event),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Embedders drive the simulation directly; nothing runs on its own here
}
