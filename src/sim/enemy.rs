//! Enemies and the collective swarm movement
//!
//! The swarm moves as one: a single direction and a single move timer are
//! shared by every enemy. On each wave step every enemy is checked against
//! the canvas edges first, and only then does the whole swarm either drop
//! (and turn around) or slide sideways.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::entity::{Entity, Rect};
use crate::consts::*;
use crate::level::LevelConfig;
use crate::move_interval_for_level;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Aggressive,
    Boss,
}

impl EnemyKind {
    pub fn color(&self) -> u32 {
        match self {
            EnemyKind::Basic => 0x44_ff_44,
            EnemyKind::Fast => 0x44_aa_ff,
            EnemyKind::Aggressive => 0xff_44_44,
            EnemyKind::Boss => 0xff_44_ff,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Fast => 20,
            EnemyKind::Aggressive => 30,
            EnemyKind::Boss => 100,
        }
    }

    /// Per-tick chance to fire before level tuning
    pub fn base_shoot_probability(&self) -> f32 {
        match self {
            EnemyKind::Basic => 0.0005,
            EnemyKind::Fast => 0.0008,
            EnemyKind::Aggressive => 0.0015,
            EnemyKind::Boss => 0.003,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            EnemyKind::Basic => Vec2::new(30.0, 30.0),
            EnemyKind::Fast => Vec2::new(25.0, 25.0),
            EnemyKind::Aggressive => Vec2::new(35.0, 35.0),
            EnemyKind::Boss => Vec2::new(80.0, 60.0),
        }
    }
}

/// Boss attack identifiers (behavior belongs to the presentation layer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialAttack {
    Spread,
    Laser,
    Summon,
}

/// Extra state carried by boss enemies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    pub health: u32,
    pub max_health: u32,
    pub special_attacks: Vec<SpecialAttack>,
}

impl BossState {
    pub fn for_level(level: u32) -> Self {
        let max_health = 10 + level * 2;
        Self {
            health: max_health,
            max_health,
            special_attacks: vec![SpecialAttack::Spread, SpecialAttack::Laser],
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
    pub points: u32,
    pub shoot_probability: f32,
    pub speed: f32,
    pub drop_speed: f32,
    /// Render-only wobble phase (radians)
    pub animation_phase: f32,
    pub boss: Option<BossState>,
    pub active: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            size: kind.size(),
            color: kind.color(),
            points: kind.points(),
            shoot_probability: kind.base_shoot_probability(),
            speed: 1.0,
            drop_speed: 20.0,
            animation_phase: 0.0,
            boss: (kind == EnemyKind::Boss).then(|| BossState::for_level(1)),
            active: true,
        }
    }

    /// Spawn with the movement and fire tuning of a level
    pub fn for_level(kind: EnemyKind, x: f32, y: f32, config: &LevelConfig, level: u32) -> Self {
        let mut enemy = Self::new(kind, x, y);
        enemy.speed = config.enemy_speed;
        enemy.drop_speed = config.enemy_drop_speed;
        enemy.points = kind.points().max(config.points_per_enemy);
        // A level's bullet frequency replaces the kind's base rate; 0 keeps the base
        if config.enemy_bullet_frequency > 0.0 {
            enemy.shoot_probability = config.enemy_bullet_frequency;
        }
        if let Some(boss) = enemy.boss.as_mut() {
            *boss = BossState::for_level(level);
        }
        enemy
    }

    /// Register a player hit. Returns true when the enemy is destroyed.
    pub fn hit(&mut self) -> bool {
        if let Some(boss) = self.boss.as_mut() {
            boss.health = boss.health.saturating_sub(1);
            if boss.health > 0 {
                return false;
            }
        }
        self.active = false;
        true
    }

    pub fn animate(&mut self, dt: f32) {
        self.animation_phase = (self.animation_phase + dt * ENEMY_ANIMATION_RATE) % std::f32::consts::TAU;
    }

    /// Bullet spawned from the enemy's bottom center
    pub fn fire(&self, bullet_speed: f32) -> Bullet {
        Bullet::enemy_shot(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y, bullet_speed)
    }
}

impl Entity for Enemy {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Shared swarm heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Negative values mean left, anything else right
    pub fn from_sign(sign: i32) -> Self {
        if sign < 0 { Direction::Left } else { Direction::Right }
    }
}

/// What a wave step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveStep {
    /// Slid sideways in the current direction
    Advanced,
    /// Hit an edge: dropped and turned around
    Dropped,
}

/// Collective movement state for all enemies of a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swarm {
    pub direction: Direction,
    /// Seconds accumulated toward the next wave step
    pub move_timer: f32,
    pub move_interval: f32,
    pub speed: f32,
    pub drop_speed: f32,
    pub bullet_speed: f32,
}

impl Default for Swarm {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            move_timer: 0.0,
            move_interval: move_interval_for_level(1),
            speed: 1.0,
            drop_speed: 20.0,
            bullet_speed: 2.0,
        }
    }
}

impl Swarm {
    pub fn for_level(config: &LevelConfig, level: u32) -> Self {
        Self {
            direction: Direction::from_sign(config.enemy_move_direction),
            move_timer: 0.0,
            move_interval: move_interval_for_level(level),
            speed: config.enemy_speed,
            drop_speed: config.enemy_drop_speed,
            bullet_speed: config.enemy_bullet_speed,
        }
    }

    /// Accumulate `dt` and take at most one wave step
    pub fn update(&mut self, enemies: &mut [Enemy], dt: f32, canvas_width: f32) -> Option<WaveStep> {
        for enemy in enemies.iter_mut().filter(|e| e.active) {
            enemy.animate(dt);
        }

        self.move_timer += dt;
        if self.move_timer < self.move_interval {
            return None;
        }
        self.move_timer = 0.0;
        Some(self.step(enemies, canvas_width))
    }

    /// One wave step: check every enemy against the edges, then move them all
    pub fn step(&mut self, enemies: &mut [Enemy], canvas_width: f32) -> WaveStep {
        let hit_edge = enemies.iter().filter(|e| e.active).any(|e| match self.direction {
            Direction::Left => e.pos.x <= 0.0,
            Direction::Right => e.pos.x + e.size.x >= canvas_width,
        });

        if hit_edge {
            self.direction = self.direction.flipped();
            for enemy in enemies.iter_mut().filter(|e| e.active) {
                enemy.pos.y += self.drop_speed;
            }
            WaveStep::Dropped
        } else {
            let dx = self.speed * self.direction.sign();
            for enemy in enemies.iter_mut().filter(|e| e.active) {
                enemy.pos.x += dx;
            }
            WaveStep::Advanced
        }
    }

    /// Independent per-tick fire roll for every active enemy.
    ///
    /// The probability is flat per tick and not scaled by frame time.
    pub fn roll_fire(&self, enemies: &[Enemy], rng: &mut impl Rng) -> Vec<Bullet> {
        enemies
            .iter()
            .filter(|e| e.active)
            .filter(|e| rng.random::<f32>() < e.shoot_probability)
            .map(|e| e.fire(self.bullet_speed))
            .collect()
    }
}

/// Lay out the enemy grid for a level, centered horizontally
pub fn spawn_grid(config: &LevelConfig, level: u32, canvas_width: f32) -> Vec<Enemy> {
    let kind = config.enemy_type;
    let size = kind.size();
    let spacing_x = ENEMY_SPACING_X.max(size.x + 15.0);
    let spacing_y = ENEMY_SPACING_Y.max(size.y + 10.0);

    let rows = config.enemy_rows as usize;
    let cols = config.enemy_cols as usize;
    let limit = match config.enemy_count {
        0 => rows * cols,
        n => (n as usize).min(rows * cols),
    };

    let grid_width = (cols.saturating_sub(1)) as f32 * spacing_x + size.x;
    let start_x = ((canvas_width - grid_width) / 2.0).max(0.0);

    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .take(limit)
        .map(|(row, col)| {
            let x = start_x + col as f32 * spacing_x;
            let y = ENEMY_START_Y + row as f32 * spacing_y;
            Enemy::for_level(kind, x, y, config, level)
        })
        .collect()
}
