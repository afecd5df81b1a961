//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the tick's `dt`
//! - Seeded RNG only
//! - Stable iteration order (collections keep spawn order)
//! - No rendering or platform dependencies

pub mod bullet;
pub mod collision;
pub mod effects;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod wall;

pub use bullet::{Bullet, BulletOwner};
pub use collision::{prune_inactive, resolve_collisions};
pub use effects::{Explosion, Flash, Particle, ScreenShake};
pub use enemy::{BossState, Direction, Enemy, EnemyKind, SpecialAttack, Swarm, WaveStep};
pub use entity::{Entity, Rect, active_count, overlaps, prune};
pub use player::{Player, Steer, TimedEffect};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GamePhase, GameRng, SimulationState, Snapshot, Stats};
pub use tick::{FrameClock, TickInput, idle_input, tick};
pub use wall::{Wall, WallBlock};
