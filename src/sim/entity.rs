//! Shared entity model: axis-aligned bounds plus an active flag
//!
//! Every game object implements [`Entity`]. Collision and pruning only ever
//! talk to this capability, never to a concrete type.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict intersection: shared edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::sim::bullet::Bullet {}
    impl Sealed for crate::sim::enemy::Enemy {}
    impl Sealed for crate::sim::player::Player {}
    impl Sealed for crate::sim::powerup::PowerUp {}
    impl Sealed for crate::sim::wall::Wall {}
    impl Sealed for crate::sim::effects::Particle {}
    impl Sealed for crate::sim::effects::Explosion {}
}

/// Capability shared by every game object
pub trait Entity: sealed::Sealed {
    fn bounds(&self) -> Rect;

    fn is_active(&self) -> bool;

    fn deactivate(&mut self);

    fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// True when both entities are active and their bounds strictly intersect
pub fn overlaps<A: Entity + ?Sized, B: Entity + ?Sized>(a: &A, b: &B) -> bool {
    a.is_active() && b.is_active() && a.bounds().intersects(&b.bounds())
}

/// Drop inactive entities, keeping the order of the survivors.
/// Returns how many were removed.
pub fn prune<T: Entity>(entities: &mut Vec<T>) -> usize {
    let before = entities.len();
    entities.retain(|e| e.is_active());
    before - entities.len()
}

/// Count of active entities in a collection
pub fn active_count<T: Entity>(entities: &[T]) -> usize {
    entities.iter().filter(|e| e.is_active()).count()
}
