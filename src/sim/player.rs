//! The player's ship: movement, firing patterns, power-up timers and damage

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletOwner};
use super::enemy::Enemy;
use super::entity::{Entity, Rect};
use crate::consts::*;

/// A flag paired with a countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub active: bool,
    pub remaining: f32,
}

impl TimedEffect {
    /// Start or refresh the effect
    pub fn activate(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.remaining = 0.0;
    }

    /// Count down; returns true on the tick the effect expires
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.clear();
            return true;
        }
        false
    }
}

/// Horizontal move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal distance per move event
    pub speed: f32,
    pub lives: u8,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
    /// Cooldown applied after each shot (shortened by rapid-fire)
    pub max_shoot_cooldown: f32,
    pub base_shoot_cooldown: f32,
    pub invulnerable: TimedEffect,
    pub shield: TimedEffect,
    /// Spread shot, lost on the next hit
    pub multi_shot: bool,
    pub auto_aim: TimedEffect,
    pub rapid_fire: TimedEffect,
    pub active: bool,
}

impl Player {
    /// Spawn at the default position: centered, near the bottom of the canvas
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            pos: Self::spawn_position(canvas_width, canvas_height),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            lives: PLAYER_START_LIVES,
            shoot_cooldown: 0.0,
            max_shoot_cooldown: BASE_SHOOT_COOLDOWN,
            base_shoot_cooldown: BASE_SHOOT_COOLDOWN,
            invulnerable: TimedEffect::default(),
            shield: TimedEffect::default(),
            multi_shot: false,
            auto_aim: TimedEffect::default(),
            rapid_fire: TimedEffect::default(),
            active: true,
        }
    }

    pub fn spawn_position(canvas_width: f32, canvas_height: f32) -> Vec2 {
        Vec2::new(
            (canvas_width - PLAYER_WIDTH) / 2.0,
            canvas_height - PLAYER_BOTTOM_MARGIN,
        )
    }

    /// Move one step and keep the ship inside the canvas
    pub fn steer(&mut self, steer: Steer, canvas_width: f32) {
        let dx = match steer {
            Steer::Left => -self.speed,
            Steer::Right => self.speed,
        };
        self.pos.x = (self.pos.x + dx).clamp(0.0, (canvas_width - self.size.x).max(0.0));
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0
    }

    /// Fire if the cooldown allows it.
    ///
    /// Pattern priority: multi-shot, then auto-aim (when a target exists),
    /// then a single straight shot. Empty when still cooling down.
    pub fn try_shoot(&mut self, enemies: &[Enemy]) -> Vec<Bullet> {
        if !self.can_shoot() {
            return Vec::new();
        }
        self.shoot_cooldown = self.max_shoot_cooldown;

        let origin = Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y - BULLET_HEIGHT);

        if self.multi_shot {
            return [-MULTI_SHOT_SPREAD, 0.0, MULTI_SHOT_SPREAD]
                .into_iter()
                .map(|vx| {
                    Bullet::new(
                        origin.x,
                        origin.y,
                        Vec2::new(vx, -PLAYER_BULLET_SPEED),
                        BulletOwner::Player,
                    )
                })
                .collect();
        }

        if self.auto_aim.active
            && let Some(target) = nearest_enemy(enemies, origin.x)
        {
            let to_target = target.center() - origin;
            let angle = to_target.y.atan2(to_target.x);
            let vel = Vec2::new(angle.cos(), angle.sin()) * PLAYER_BULLET_SPEED;
            return vec![Bullet::new(origin.x, origin.y, vel, BulletOwner::Player)];
        }

        vec![Bullet::player_shot(origin.x, origin.y)]
    }

    /// Resolve an incoming hit. Returns true when a life should be lost.
    pub fn take_damage(&mut self) -> bool {
        if self.shield.active {
            self.shield.clear();
            return false;
        }

        self.multi_shot = false;

        if self.invulnerable.active {
            return false;
        }
        self.invulnerable.activate(INVULNERABILITY_DURATION);
        true
    }

    pub fn activate_rapid_fire(&mut self, duration: f32) {
        self.rapid_fire.activate(duration);
        self.max_shoot_cooldown = RAPID_SHOOT_COOLDOWN;
        self.shoot_cooldown = self.shoot_cooldown.min(self.max_shoot_cooldown);
    }

    pub fn gain_life(&mut self) {
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Count down every timer by `dt`
    pub fn update_timers(&mut self, dt: f32) {
        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        self.invulnerable.tick(dt);
        self.shield.tick(dt);
        self.auto_aim.tick(dt);
        if self.rapid_fire.tick(dt) {
            self.max_shoot_cooldown = self.base_shoot_cooldown;
        }
    }

    /// Clear power-ups and timers (lives untouched)
    pub fn clear_effects(&mut self) {
        self.invulnerable.clear();
        self.shield.clear();
        self.multi_shot = false;
        self.auto_aim.clear();
        self.rapid_fire.clear();
        self.max_shoot_cooldown = self.base_shoot_cooldown;
        self.shoot_cooldown = 0.0;
    }
}

/// Active enemy closest to `x` by horizontal distance between centers
pub fn nearest_enemy(enemies: &[Enemy], x: f32) -> Option<&Enemy> {
    enemies
        .iter()
        .filter(|e| e.active)
        .min_by(|a, b| {
            let da = (a.center().x - x).abs();
            let db = (b.center().x - x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

impl Entity for Player {
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
