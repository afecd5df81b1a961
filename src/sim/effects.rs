//! Visual effects: particles, explosions, screen shake and flash
//!
//! None of this feeds back into gameplay, but it is advanced by the same
//! tick and drawn from the same seeded RNG so runs stay reproducible.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect, prune};
use crate::consts::*;

/// Secondary explosion color mixed into every burst
pub const EXPLOSION_ACCENT: u32 = 0xff_aa_00;
/// Color of wall debris
pub const DEBRIS_COLOR: u32 = 0x88_88_88;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub color: u32,
    /// 1.0 when spawned, inactive at 0
    pub life: f32,
    /// Life lost per second
    pub decay: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    pub active: bool,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: u32, decay: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life: 1.0,
            decay,
            gravity: PARTICLE_GRAVITY,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos += self.vel * dt;
        self.vel.y += self.gravity * dt;
        self.life -= self.decay * dt;
        if self.life <= 0.0 {
            self.life = 0.0;
            self.active = false;
        }
    }
}

impl Entity for Particle {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::ONE,
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A burst of particles with a shrinking core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub elapsed: f32,
    pub duration: f32,
    pub particles: Vec<Particle>,
    pub active: bool,
}

impl Explosion {
    /// Radiate `EXPLOSION_PARTICLES` particles at even angles around `pos`
    pub fn new(pos: Vec2, color: u32, rng: &mut impl Rng) -> Self {
        let step = std::f32::consts::TAU / EXPLOSION_PARTICLES as f32;
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|i| {
                let angle = i as f32 * step;
                let speed: f32 = rng.random_range(60.0..180.0);
                let tint = if rng.random_bool(0.5) { color } else { EXPLOSION_ACCENT };
                let decay: f32 = rng.random_range(1.5..2.5);
                Particle::new(pos, Vec2::new(angle.cos(), angle.sin()) * speed, tint, decay)
            })
            .collect();

        Self {
            pos,
            radius: EXPLOSION_RADIUS,
            max_radius: EXPLOSION_RADIUS,
            elapsed: 0.0,
            duration: EXPLOSION_DURATION,
            particles,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        for particle in &mut self.particles {
            particle.update(dt);
        }
        prune(&mut self.particles);

        let progress = (self.elapsed / self.duration).min(1.0);
        self.radius = self.max_radius * (1.0 - progress);

        if self.elapsed >= self.duration {
            self.radius = 0.0;
            self.active = false;
            for particle in &mut self.particles {
                particle.deactivate();
            }
        }
    }
}

impl Entity for Explosion {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos - Vec2::splat(self.radius),
            size: Vec2::splat(self.radius * 2.0),
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Small debris spray for bullet impacts
pub fn impact_burst(pos: Vec2, color: u32, rng: &mut impl Rng) -> Vec<Particle> {
    (0..IMPACT_PARTICLES)
        .map(|_| {
            let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
            let speed: f32 = rng.random_range(30.0..90.0);
            let decay: f32 = rng.random_range(2.0..4.0);
            Particle::new(pos, Vec2::new(angle.cos(), angle.sin()) * speed, color, decay)
        })
        .collect()
}

/// Camera shake with a decaying random offset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub remaining: f32,
    pub offset: Vec2,
}

impl ScreenShake {
    /// Start a shake, keeping the stronger of the current and new intensity
    pub fn trigger(&mut self, intensity: f32, duration: f32) {
        if self.is_active() && self.intensity > intensity {
            self.remaining = self.remaining.max(duration);
            return;
        }
        self.intensity = intensity;
        self.duration = duration;
        self.remaining = duration;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        if !self.is_active() {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            *self = Self::default();
            return;
        }

        let strength = self.intensity * (self.remaining / self.duration);
        self.offset = Vec2::new(
            rng.random_range(-1.0_f32..=1.0) * strength,
            rng.random_range(-1.0_f32..=1.0) * strength,
        );
    }
}

/// Full-screen color overlay that fades out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Flash {
    pub color: u32,
    pub intensity: f32,
    pub duration: f32,
    pub elapsed: f32,
    pub active: bool,
}

impl Flash {
    pub fn trigger(&mut self, color: u32, duration: f32) {
        self.color = color;
        self.intensity = 1.0;
        self.duration = duration.max(f32::EPSILON);
        self.elapsed = 0.0;
        self.active = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        self.intensity = (1.0 - self.elapsed / self.duration).max(0.0);
        if self.intensity <= 0.0 {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_falls_and_fades() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 0xffffff, 2.0);
        p.update(0.1);
        assert!((p.pos.x - 1.0).abs() < 1e-5);
        assert!(p.vel.y > 0.0);
        assert!((p.life - 0.8).abs() < 1e-5);
        for _ in 0..10 {
            p.update(0.1);
        }
        assert!(!p.active);
        assert_eq!(p.life, 0.0);
    }

    #[test]
    fn test_explosion_spacing_and_lifetime() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut e = Explosion::new(Vec2::new(100.0, 100.0), 0xff0000, &mut rng);
        assert_eq!(e.particles.len(), EXPLOSION_PARTICLES);
        // First particle points along +x, the fourth straight down (+y)
        assert!(e.particles[0].vel.y.abs() < 1e-3);
        assert!(e.particles[3].vel.x.abs() < 1e-3);
        assert!(e.particles.iter().all(|p| p.color == 0xff0000 || p.color == EXPLOSION_ACCENT));

        e.update(EXPLOSION_DURATION / 2.0);
        assert!((e.radius - EXPLOSION_RADIUS / 2.0).abs() < 1e-3);
        assert!(e.active);

        e.update(EXPLOSION_DURATION / 2.0);
        assert!(!e.active);
        assert_eq!(e.radius, 0.0);
        assert!(e.particles.iter().all(|p| !p.active));
    }

    #[test]
    fn test_explosion_drops_dead_particles() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut e = Explosion::new(Vec2::new(100.0, 100.0), 0xff0000, &mut rng);
        // Fastest decay (2.5/s) kills a particle at 0.4s, the burst lasts 0.5s
        for p in e.particles.iter_mut().take(3) {
            p.decay = 2.5;
        }
        for _ in 0..27 {
            e.update(1.0 / 60.0);
        }
        assert!(e.active);
        assert!(e.particles.len() <= EXPLOSION_PARTICLES - 3);
        assert!(e.particles.iter().all(|p| p.active));
    }

    #[test]
    fn test_shake_offset_bounded_and_clears() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut shake = ScreenShake::default();
        shake.trigger(10.0, 0.3);
        for _ in 0..5 {
            let before = shake.remaining;
            shake.update(0.05, &mut rng);
            let bound = 10.0 * (shake.remaining / 0.3);
            assert!(shake.offset.x.abs() <= bound + 1e-4);
            assert!(shake.offset.y.abs() <= bound + 1e-4);
            assert!(shake.remaining < before);
        }
        shake.update(0.1, &mut rng);
        assert!(!shake.is_active());
        assert_eq!(shake.offset, Vec2::ZERO);
    }

    #[test]
    fn test_flash_fades_linearly() {
        let mut flash = Flash::default();
        flash.trigger(0xff0000, 0.2);
        flash.update(0.1);
        assert!((flash.intensity - 0.5).abs() < 1e-4);
        assert!(flash.active);
        flash.update(0.1);
        assert!(!flash.active);
    }

    #[test]
    fn test_impact_burst_count() {
        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(impact_burst(Vec2::ZERO, DEBRIS_COLOR, &mut rng).len(), IMPACT_PARTICLES);
    }
}
