//! Swarm Shooter - simulation core for an arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, swarm movement, game state)
//! - `level`: Level data boundary with a fixed fallback layout
//! - `settings`: Canvas size, seed and effect toggles

pub mod level;
pub mod settings;
pub mod sim;

pub use level::{BuiltinLevels, JsonLevels, LevelConfig, LevelError, LevelSource, WallConfig, load_level};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Reference canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Largest delta a single frame may feed into the tick (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Distance from the bottom of the canvas to the player's top edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 60.0;
    /// Horizontal distance per move event
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    pub const BASE_SHOOT_COOLDOWN: f32 = 0.25;
    pub const RAPID_SHOOT_COOLDOWN: f32 = 0.1;
    pub const INVULNERABILITY_DURATION: f32 = 2.0;

    /// Player bullets travel up this many units per tick
    pub const PLAYER_BULLET_SPEED: f32 = 7.0;
    /// Horizontal velocity of the two angled multi-shot bullets
    pub const MULTI_SHOT_SPREAD: f32 = 2.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Past positions kept per bullet for trail rendering
    pub const TRAIL_LENGTH: usize = 5;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 1.5;
    pub const POWERUP_LIFETIME: f32 = 10.0;
    pub const POWERUP_DROP_CHANCE: f64 = 0.1;
    pub const SHIELD_DURATION: f32 = 10.0;
    pub const AUTO_AIM_DURATION: f32 = 8.0;
    pub const RAPID_FIRE_DURATION: f32 = 8.0;
    pub const POINTS_BONUS: u64 = 100;

    /// Wall impact radii (enemy shots are stronger)
    pub const PLAYER_IMPACT_RADIUS: f32 = 6.0;
    pub const ENEMY_IMPACT_RADIUS: f32 = 8.0;
    pub const WALL_BLOCK_SIZE: f32 = 5.0;

    /// Swarm layout
    pub const ENEMY_SPACING_X: f32 = 50.0;
    pub const ENEMY_SPACING_Y: f32 = 40.0;
    pub const ENEMY_START_Y: f32 = 50.0;
    /// Animation phase advance (radians per second)
    pub const ENEMY_ANIMATION_RATE: f32 = 4.0;

    /// Effects
    pub const EXPLOSION_PARTICLES: usize = 12;
    pub const EXPLOSION_DURATION: f32 = 0.5;
    pub const EXPLOSION_RADIUS: f32 = 30.0;
    pub const IMPACT_PARTICLES: usize = 5;
    pub const PARTICLE_GRAVITY: f32 = 200.0;
    pub const FLASH_DURATION: f32 = 0.2;
    pub const HIT_SHAKE_INTENSITY: f32 = 10.0;
    pub const HIT_SHAKE_DURATION: f32 = 0.3;
}

/// Wave step interval for a level (seconds), floored at 0.3
#[inline]
pub fn move_interval_for_level(level: u32) -> f32 {
    (1.5 - level as f32 * 0.1).max(0.3)
}
