//! Level data boundary
//!
//! Level layouts come from an outside provider (a bundled table, a JSON file,
//! or a generator behind the network). Whatever the provider, a failed or
//! invalid fetch never stops the game: [`load_level`] substitutes the fixed
//! [`LevelConfig::fallback`] layout and play continues.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::enemy::EnemyKind;

/// Errors a level provider can report
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("no level data for level {level}")]
    NotFound { level: u32 },
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level {level} is invalid: {reason}")]
    Invalid { level: u32, reason: String },
    #[error("level provider unavailable: {0}")]
    Unavailable(String),
}

/// Largest enemy grid dimension a level may ask for
pub const MAX_GRID_DIM: u32 = 20;
/// Largest wall count a level may ask for
pub const MAX_WALLS: u32 = 16;

/// Wall row layout for a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallConfig {
    pub count: u32,
    pub width: f32,
    pub height: f32,
    pub health: u32,
    pub y_position: f32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            count: 4,
            width: 80.0,
            height: 30.0,
            health: 5,
            y_position: 450.0,
        }
    }
}

/// Tuning for one level, as delivered by the level provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelConfig {
    /// Cap on spawned enemies (0 = fill the whole grid)
    #[serde(default)]
    pub enemy_count: u32,
    pub enemy_rows: u32,
    pub enemy_cols: u32,
    /// Horizontal distance per wave step
    pub enemy_speed: f32,
    /// Vertical distance when the swarm hits an edge
    pub enemy_drop_speed: f32,
    /// Enemy bullet displacement per tick
    pub enemy_bullet_speed: f32,
    /// Per-tick fire probability for each enemy
    pub enemy_bullet_frequency: f32,
    /// Initial heading: negative = left, otherwise right
    pub enemy_move_direction: i32,
    pub points_per_enemy: u32,
    pub enemy_type: EnemyKind,
    pub wall_config: WallConfig,
    pub level: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

impl LevelConfig {
    /// Fixed layout used whenever level data cannot be obtained
    pub fn fallback() -> Self {
        Self {
            enemy_count: 15,
            enemy_rows: 3,
            enemy_cols: 5,
            enemy_speed: 1.0,
            enemy_drop_speed: 20.0,
            enemy_bullet_speed: 2.0,
            enemy_bullet_frequency: 0.00005,
            enemy_move_direction: 1,
            points_per_enemy: 10,
            enemy_type: EnemyKind::Basic,
            wall_config: WallConfig::default(),
            level: 1,
        }
    }

    /// Reject layouts the simulation cannot run
    pub fn validate(&self) -> Result<(), LevelError> {
        let invalid = |reason: &str| {
            Err(LevelError::Invalid {
                level: self.level,
                reason: reason.to_string(),
            })
        };

        if self.enemy_rows == 0 || self.enemy_cols == 0 {
            return invalid("enemy grid is empty");
        }
        if self.enemy_rows > MAX_GRID_DIM || self.enemy_cols > MAX_GRID_DIM {
            return invalid("enemy grid is too large");
        }
        let speeds = [self.enemy_speed, self.enemy_drop_speed, self.enemy_bullet_speed];
        if speeds.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return invalid("speeds must be finite and non-negative");
        }
        if !(0.0..=1.0).contains(&self.enemy_bullet_frequency) {
            return invalid("bullet frequency must be a probability");
        }
        let walls = &self.wall_config;
        if walls.count > MAX_WALLS {
            return invalid("too many walls");
        }
        if walls.count > 0 {
            if walls.health == 0 || !(walls.width > 0.0 && walls.height > 0.0) {
                return invalid("walls need positive size and health");
            }
            if walls.width > CANVAS_WIDTH || walls.height > CANVAS_HEIGHT {
                return invalid("walls must fit on the canvas");
            }
            if !walls.y_position.is_finite() {
                return invalid("wall row position must be finite");
            }
        }
        Ok(())
    }
}

/// Anything that can produce level data on request
pub trait LevelSource {
    fn fetch(&mut self, level: u32) -> Result<LevelConfig, LevelError>;
}

impl<F> LevelSource for F
where
    F: FnMut(u32) -> Result<LevelConfig, LevelError>,
{
    fn fetch(&mut self, level: u32) -> Result<LevelConfig, LevelError> {
        self(level)
    }
}

/// Fetch a level, falling back to [`LevelConfig::fallback`] on any failure
pub fn load_level<S: LevelSource + ?Sized>(source: &mut S, level: u32) -> LevelConfig {
    match source.fetch(level).and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => {
            log::info!(
                "Level {} loaded: {}x{} {:?}",
                level,
                config.enemy_rows,
                config.enemy_cols,
                config.enemy_type
            );
            config
        }
        Err(err) => {
            log::warn!("Level {} unavailable ({}), using fallback layout", level, err);
            LevelConfig::fallback()
        }
    }
}

/// Bundled level progression
#[derive(Debug, Clone, Default)]
pub struct BuiltinLevels;

impl BuiltinLevels {
    pub fn config_for(level: u32) -> LevelConfig {
        let level = level.max(1);
        let tier = (level - 1) / 2;

        // Every fifth level is a boss fight
        if level.is_multiple_of(5) {
            return LevelConfig {
                enemy_count: 0,
                enemy_rows: 1,
                enemy_cols: 1 + level / 10,
                enemy_speed: 12.0 + level as f32,
                enemy_drop_speed: 15.0,
                enemy_bullet_speed: 3.0,
                enemy_bullet_frequency: 0.01,
                enemy_move_direction: 1,
                points_per_enemy: 100 * level,
                enemy_type: EnemyKind::Boss,
                wall_config: WallConfig::default(),
                level,
            };
        }

        let enemy_type = match level {
            1..=2 => EnemyKind::Basic,
            3..=4 => EnemyKind::Fast,
            _ => EnemyKind::Aggressive,
        };

        LevelConfig {
            enemy_count: 0,
            enemy_rows: (3 + tier).min(5),
            enemy_cols: (5 + tier).min(9),
            enemy_speed: 10.0 + level as f32 * 2.0,
            enemy_drop_speed: 20.0,
            enemy_bullet_speed: (2.0 + level as f32 * 0.3).min(6.0),
            enemy_bullet_frequency: (0.0005 + level as f32 * 0.0002).min(0.005),
            enemy_move_direction: if level.is_multiple_of(2) { -1 } else { 1 },
            points_per_enemy: 10 * level,
            enemy_type,
            wall_config: WallConfig {
                health: 5u32.saturating_sub(tier).max(2),
                ..WallConfig::default()
            },
            level,
        }
    }
}

impl LevelSource for BuiltinLevels {
    fn fetch(&mut self, level: u32) -> Result<LevelConfig, LevelError> {
        Ok(Self::config_for(level))
    }
}

/// Levels read from a JSON array of level objects
#[derive(Debug, Clone, Default)]
pub struct JsonLevels {
    levels: Vec<LevelConfig>,
}

impl JsonLevels {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelSource for JsonLevels {
    fn fetch(&mut self, level: u32) -> Result<LevelConfig, LevelError> {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .cloned()
            .ok_or(LevelError::NotFound { level })
    }
}
