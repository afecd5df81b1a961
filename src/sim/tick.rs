//! Frame-driven simulation tick
//!
//! One call advances the whole game by one frame: player, swarm, projectiles,
//! effects, collisions, pruning and finally the win/loss check.

use super::collision::{prune_inactive, resolve_collisions};
use super::entity::Entity;
use super::player::{Steer, nearest_enemy};
use super::state::{GameEvent, GamePhase, SimulationState};
use crate::consts::*;

/// Vertical distance at which a falling enemy bullet counts as a threat
const THREAT_RANGE: f32 = 160.0;
/// Horizontal slack added to the ship's width when looking for threats
const THREAT_MARGIN: f32 = 8.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left one step
    pub move_left: bool,
    /// Move right one step
    pub move_right: bool,
    /// Shoot (gated by the cooldown)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Turns monotonically increasing frame timestamps into tick deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame: 0 on the first frame, never negative,
    /// clamped to `MAX_FRAME_DT`
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            Some(_) => return 0.0,
            None => 0.0,
        };
        self.last = Some(now_ms);
        dt.min(MAX_FRAME_DT)
    }

    /// Forget the previous timestamp (e.g. after the loop was suspended)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        state.toggle_pause();
    }

    // Nothing is simulated outside of play
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    state.time_ticks += 1;

    let input = if input.idle_mode {
        idle_input(state)
    } else {
        input.clone()
    };

    update_player(state, &input, dt);
    update_swarm(state, dt);
    advance_entities(state, dt);

    resolve_collisions(state);
    prune_inactive(state);
    state.check_transitions();
}

fn update_player(state: &mut SimulationState, input: &TickInput, dt: f32) {
    let canvas_width = state.settings.canvas_width;
    let player = &mut state.player;
    player.update_timers(dt);

    match (input.move_left, input.move_right) {
        (true, false) => player.steer(Steer::Left, canvas_width),
        (false, true) => player.steer(Steer::Right, canvas_width),
        _ => {}
    }

    if input.fire {
        let shots = player.try_shoot(&state.enemies);
        if !shots.is_empty() {
            state.events.push(GameEvent::PlayerFired {
                bullets: shots.len(),
            });
            state.bullets.extend(shots);
        }
    }
}

fn update_swarm(state: &mut SimulationState, dt: f32) {
    let canvas_width = state.settings.canvas_width;
    if let Some(step) = state.swarm.update(&mut state.enemies, dt, canvas_width) {
        log::debug!(
            "Wave step {:?}, heading {:?}",
            step,
            state.swarm.direction
        );
        state.events.push(GameEvent::WaveStepped(step));
    }

    let volley = state.swarm.roll_fire(&state.enemies, &mut state.rng);
    if !volley.is_empty() {
        state.events.push(GameEvent::EnemyFired {
            count: volley.len(),
        });
        state.bullets.extend(volley);
    }
}

fn advance_entities(state: &mut SimulationState, dt: f32) {
    let canvas = state.canvas();

    for bullet in state.bullets.iter_mut().filter(|b| b.active) {
        bullet.advance(canvas);
    }
    for power_up in state.power_ups.iter_mut().filter(|p| p.active) {
        power_up.advance(dt, canvas.y);
    }
    for particle in &mut state.particles {
        particle.update(dt);
    }
    for explosion in &mut state.explosions {
        explosion.update(dt);
    }

    state.shake.update(dt, &mut state.rng);
    state.flash.update(dt);
}

/// Autopilot for idle/demo mode.
///
/// Dodges enemy bullets falling onto the ship, otherwise chases a falling
/// power-up, otherwise lines up under the nearest enemy. Always fires.
pub fn idle_input(state: &SimulationState) -> TickInput {
    let player = &state.player;
    let bounds = player.bounds();
    let center_x = bounds.center().x;
    let canvas_width = state.settings.canvas_width;

    let threat = state
        .bullets
        .iter()
        .filter(|b| b.active && !b.is_player())
        .filter(|b| {
            let r = b.bounds();
            r.bottom() <= bounds.bottom()
                && bounds.top() - r.bottom() < THREAT_RANGE
                && r.right() > bounds.left() - THREAT_MARGIN
                && r.left() < bounds.right() + THREAT_MARGIN
        })
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let target_x = if let Some(bullet) = threat {
        // Step away from the bullet, unless the wall is in the way
        let bullet_x = bullet.center().x;
        let dodge_right = bullet_x <= center_x;
        let blocked = if dodge_right {
            bounds.right() + player.speed > canvas_width
        } else {
            bounds.left() - player.speed < 0.0
        };
        let go_right = dodge_right != blocked;
        Some(if go_right {
            center_x + player.speed * 2.0
        } else {
            center_x - player.speed * 2.0
        })
    } else if let Some(power_up) = state.power_ups.iter().find(|p| p.active) {
        Some(power_up.center().x)
    } else {
        nearest_enemy(&state.enemies, center_x).map(|e| e.center().x)
    };

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    if let Some(target_x) = target_x {
        let dx = target_x - center_x;
        if dx.abs() > player.speed / 2.0 {
            input.move_left = dx < 0.0;
            input.move_right = dx > 0.0;
        }
    }
    input
}
