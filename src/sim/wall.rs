//! Destructible walls built from a grid of small blocks
//!
//! Each hit knocks out every block whose center falls inside the impact
//! radius. The wall's health drops by one per damaging hit no matter how many
//! blocks went with it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect};
use crate::consts::*;
use crate::level::WallConfig;

/// One cell of a wall
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WallBlock {
    /// Offset of the block's top-left corner from the wall origin
    pub offset: Vec2,
    pub alive: bool,
}

/// A wall entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Vec2,
    pub size: Vec2,
    pub block_size: f32,
    pub blocks: Vec<WallBlock>,
    pub health: u32,
    pub max_health: u32,
    pub active: bool,
}

impl Wall {
    pub fn new(x: f32, y: f32, width: f32, height: f32, health: u32) -> Self {
        Self::with_block_size(x, y, width, height, health, WALL_BLOCK_SIZE)
    }

    pub fn with_block_size(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        health: u32,
        block_size: f32,
    ) -> Self {
        let block_size = block_size.max(1.0);
        let cols = (width / block_size).floor().max(0.0) as usize;
        let rows = (height / block_size).floor().max(0.0) as usize;

        let mut blocks = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                blocks.push(WallBlock {
                    offset: Vec2::new(col as f32 * block_size, row as f32 * block_size),
                    alive: true,
                });
            }
        }

        let active = health > 0 && !blocks.is_empty();
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            block_size,
            blocks,
            health,
            max_health: health,
            active,
        }
    }

    pub fn alive_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    /// Apply an impact at world coordinates.
    ///
    /// Returns `true` when at least one block was destroyed (and one point of
    /// health was taken).
    pub fn take_damage(&mut self, impact_x: f32, impact_y: f32, is_player_bullet: bool) -> bool {
        if !self.active || self.health == 0 {
            return false;
        }

        let radius = if is_player_bullet {
            PLAYER_IMPACT_RADIUS
        } else {
            ENEMY_IMPACT_RADIUS
        };
        let local = Vec2::new(impact_x, impact_y) - self.pos;
        let half = Vec2::splat(self.block_size / 2.0);

        let mut destroyed = 0usize;
        for block in self.blocks.iter_mut().filter(|b| b.alive) {
            if (block.offset + half).distance(local) < radius {
                block.alive = false;
                destroyed += 1;
            }
        }

        if destroyed == 0 {
            return false;
        }

        self.health -= 1;
        if self.health == 0 || self.alive_blocks() == 0 {
            self.active = false;
        }
        true
    }
}

/// Space `config.count` walls evenly across the canvas
pub fn spawn_walls(config: &WallConfig, canvas_width: f32) -> Vec<Wall> {
    let spacing = canvas_width / (config.count as f32 + 1.0);
    (1..=config.count)
        .map(|i| {
            let x = spacing * i as f32 - config.width / 2.0;
            Wall::new(x, config.y_position, config.width, config.height, config.health)
        })
        .collect()
}

impl Entity for Wall {
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
