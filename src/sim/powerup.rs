//! Power-up drops and their effect on the player

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect};
use super::player::Player;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpKind {
    Shield,
    MultiShot,
    AutoAim,
    RapidFire,
    LifeUp,
    Points,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Shield,
        PowerUpKind::MultiShot,
        PowerUpKind::AutoAim,
        PowerUpKind::RapidFire,
        PowerUpKind::LifeUp,
        PowerUpKind::Points,
    ];

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Effect duration in seconds (0 = instantaneous or until consumed)
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::Shield => SHIELD_DURATION,
            PowerUpKind::AutoAim => AUTO_AIM_DURATION,
            PowerUpKind::RapidFire => RAPID_FIRE_DURATION,
            PowerUpKind::MultiShot | PowerUpKind::LifeUp | PowerUpKind::Points => 0.0,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Shield => 0x44_88_ff,
            PowerUpKind::MultiShot => 0xff_aa_00,
            PowerUpKind::AutoAim => 0xff_44_ff,
            PowerUpKind::RapidFire => 0xff_ff_44,
            PowerUpKind::LifeUp => 0x44_ff_44,
            PowerUpKind::Points => 0xff_ff_ff,
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward displacement per tick
    pub fall_speed: f32,
    /// Seconds left before expiring uncollected
    pub lifetime: f32,
    pub duration: f32,
    pub active: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            size: Vec2::splat(POWERUP_SIZE),
            fall_speed: POWERUP_FALL_SPEED,
            lifetime: POWERUP_LIFETIME,
            duration: kind.duration(),
            active: true,
        }
    }

    /// Fall one tick; expire at the bottom of the screen or when the lifetime runs out
    pub fn advance(&mut self, dt: f32, canvas_height: f32) {
        self.pos.y += self.fall_speed;
        self.lifetime -= dt;
        if self.pos.y > canvas_height || self.lifetime <= 0.0 {
            self.lifetime = self.lifetime.max(0.0);
            self.active = false;
        }
    }

    /// Apply this power-up to the player. Returns the score bonus awarded.
    pub fn apply(&self, player: &mut Player) -> u64 {
        apply_power_up(self.kind, self.duration, player)
    }
}

/// Apply a power-up effect. Returns the score bonus awarded.
pub fn apply_power_up(kind: PowerUpKind, duration: f32, player: &mut Player) -> u64 {
    match kind {
        PowerUpKind::Shield => {
            player.shield.activate(duration);
            0
        }
        PowerUpKind::MultiShot => {
            player.multi_shot = true;
            0
        }
        PowerUpKind::AutoAim => {
            player.auto_aim.activate(duration);
            0
        }
        PowerUpKind::RapidFire => {
            player.activate_rapid_fire(duration);
            0
        }
        PowerUpKind::LifeUp => {
            player.gain_life();
            0
        }
        PowerUpKind::Points => POINTS_BONUS,
    }
}

/// Roll the drop chance for a kill and maybe create a power-up at the kill location
pub fn roll_drop(rng: &mut impl Rng, at: Vec2) -> Option<PowerUp> {
    if rng.random_bool(POWERUP_DROP_CHANCE) {
        let kind = PowerUpKind::random(rng);
        Some(PowerUp::new(kind, at.x, at.y))
    } else {
        None
    }
}

impl Entity for PowerUp {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_expires_after_lifetime() {
        let mut p = PowerUp::new(PowerUpKind::Shield, 100.0, 0.0);
        p.fall_speed = 0.0;
        p.advance(POWERUP_LIFETIME - 1.0, CANVAS_HEIGHT);
        assert!(p.active);
        p.advance(1.5, CANVAS_HEIGHT);
        assert!(!p.active);
    }

    #[test]
    fn test_expires_below_screen() {
        let mut p = PowerUp::new(PowerUpKind::Points, 100.0, CANVAS_HEIGHT - 1.0);
        p.advance(0.016, CANVAS_HEIGHT);
        assert!(!p.active);
        assert!(p.lifetime > 0.0);
    }

    #[test]
    fn test_life_up_caps_at_max() {
        let mut player = Player::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        player.lives = 4;
        apply_power_up(PowerUpKind::LifeUp, 0.0, &mut player);
        assert_eq!(player.lives, 5);
        apply_power_up(PowerUpKind::LifeUp, 0.0, &mut player);
        assert_eq!(player.lives, 5);
    }

    #[test]
    fn test_points_awards_bonus() {
        let mut player = Player::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let bonus = PowerUp::new(PowerUpKind::Points, 0.0, 0.0).apply(&mut player);
        assert_eq!(bonus, POINTS_BONUS);
    }

    #[test]
    fn test_timed_power_ups_refresh() {
        let mut player = Player::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        PowerUp::new(PowerUpKind::AutoAim, 0.0, 0.0).apply(&mut player);
        player.update_timers(AUTO_AIM_DURATION - 1.0);
        assert!(player.auto_aim.active);
        PowerUp::new(PowerUpKind::AutoAim, 0.0, 0.0).apply(&mut player);
        assert_eq!(player.auto_aim.remaining, AUTO_AIM_DURATION);
    }

    #[test]
    fn test_drop_rate_is_roughly_ten_percent() {
        let mut rng = Pcg32::seed_from_u64(7);
        let drops = (0..10_000)
            .filter(|_| roll_drop(&mut rng, Vec2::ZERO).is_some())
            .count();
        assert!((800..1200).contains(&drops), "got {drops}");
    }

    #[test]
    fn test_random_kind_covers_all() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let kind = PowerUpKind::random(&mut rng);
            let idx = PowerUpKind::ALL.iter().position(|k| *k == kind).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
