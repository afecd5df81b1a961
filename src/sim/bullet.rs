//! Projectiles fired by the player and the swarm

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect};
use crate::consts::*;

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub owner: BulletOwner,
    pub active: bool,
    /// Past positions for rendering (newest at the back)
    pub trail: VecDeque<Vec2>,
}

impl Bullet {
    /// Create a bullet centered horizontally on `origin_x` with its top at `origin_y`
    pub fn new(origin_x: f32, origin_y: f32, vel: Vec2, owner: BulletOwner) -> Self {
        Self {
            pos: Vec2::new(origin_x - BULLET_WIDTH / 2.0, origin_y),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel,
            owner,
            active: true,
            trail: VecDeque::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Straight-up player shot
    pub fn player_shot(origin_x: f32, origin_y: f32) -> Self {
        Self::new(origin_x, origin_y, Vec2::new(0.0, -PLAYER_BULLET_SPEED), BulletOwner::Player)
    }

    /// Straight-down enemy shot
    pub fn enemy_shot(origin_x: f32, origin_y: f32, speed: f32) -> Self {
        Self::new(origin_x, origin_y, Vec2::new(0.0, speed), BulletOwner::Enemy)
    }

    pub fn is_player(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    /// Record the current position, move one tick, and deactivate once off-screen
    pub fn advance(&mut self, canvas: Vec2) {
        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }

        self.pos += self.vel;

        let off_screen = self.pos.y + self.size.y < 0.0
            || self.pos.y > canvas.y
            || self.pos.x + self.size.x < 0.0
            || self.pos.x > canvas.x;
        if off_screen {
            self.active = false;
        }
    }
}

impl Entity for Bullet {
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
