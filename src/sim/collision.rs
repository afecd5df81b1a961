//! Collision resolution across every entity set
//!
//! All tests are strict AABB overlaps between active entities. The phases
//! run in a fixed order, once per tick, and each is a single pass over its
//! pair of collections:
//!
//! 1. player bullets × walls
//! 2. player bullets × enemies
//! 3. power-ups × player
//! 4. enemy bullets × walls
//! 5. enemy bullets × player
//! 6. swarm reaching the player's row

use glam::Vec2;

use super::bullet::BulletOwner;
use super::effects::{DEBRIS_COLOR, Explosion, Particle, impact_burst};
use super::entity::{Entity, overlaps, prune};
use super::powerup::roll_drop;
use super::state::{GameEvent, GameRng, SimulationState};
use crate::consts::*;
use crate::settings::Settings;

/// Red overlay shown when the player loses a life
pub const HIT_FLASH_COLOR: u32 = 0xff_00_00;

/// Run every collision phase in order
pub fn resolve_collisions(state: &mut SimulationState) {
    bullets_vs_walls(state, BulletOwner::Player);
    player_bullets_vs_enemies(state);
    power_ups_vs_player(state);
    bullets_vs_walls(state, BulletOwner::Enemy);
    enemy_bullets_vs_player(state);
    check_breach(state);
}

/// Drop every inactive entity from its collection
pub fn prune_inactive(state: &mut SimulationState) {
    prune(&mut state.bullets);
    prune(&mut state.enemies);
    prune(&mut state.walls);
    prune(&mut state.power_ups);
    prune(&mut state.particles);
    prune(&mut state.explosions);
}

/// Bullets of one owner against the walls. A bullet damages at most one wall.
pub fn bullets_vs_walls(state: &mut SimulationState, owner: BulletOwner) {
    let SimulationState {
        settings,
        bullets,
        walls,
        particles,
        events,
        rng,
        ..
    } = state;
    let is_player = owner == BulletOwner::Player;

    for bullet in bullets.iter_mut().filter(|b| b.owner == owner) {
        let Some(wall) = walls.iter_mut().find(|w| overlaps(&*bullet, &**w)) else {
            continue;
        };

        let impact = bullet.center();
        if wall.take_damage(impact.x, impact.y, is_player) {
            events.push(GameEvent::WallDamaged {
                health: wall.health,
            });
        }
        bullet.deactivate();
        spawn_debris(particles, settings, rng, impact);
    }
}

/// Player bullets against enemies: score, explosion and a possible drop per kill
pub fn player_bullets_vs_enemies(state: &mut SimulationState) {
    let SimulationState {
        settings,
        enemies_killed,
        bullets,
        enemies,
        power_ups,
        explosions,
        events,
        rng,
        ..
    } = state;

    let mut earned = 0u64;
    for bullet in bullets.iter_mut().filter(|b| b.is_player()) {
        let Some(enemy) = enemies.iter_mut().find(|e| overlaps(&*bullet, &**e)) else {
            continue;
        };
        bullet.deactivate();

        if !enemy.hit() {
            if let Some(boss) = &enemy.boss {
                events.push(GameEvent::BossDamaged {
                    health: boss.health,
                    max_health: boss.max_health,
                });
            }
            continue;
        }

        let center = enemy.center();
        explosions.push(explosion(center, enemy.color, settings, rng));
        earned += enemy.points as u64;
        *enemies_killed += 1;
        events.push(GameEvent::EnemyKilled {
            kind: enemy.kind,
            points: enemy.points,
            pos: center,
        });

        if let Some(power_up) = roll_drop(rng, enemy.pos) {
            events.push(GameEvent::PowerUpSpawned(power_up.kind));
            power_ups.push(power_up);
        }
    }
    state.award(earned);
}

/// Falling power-ups caught by the player
pub fn power_ups_vs_player(state: &mut SimulationState) {
    let SimulationState {
        player,
        power_ups,
        events,
        ..
    } = state;

    let mut earned = 0u64;
    for power_up in power_ups.iter_mut() {
        if overlaps(&*power_up, &*player) {
            let bonus = power_up.apply(player);
            earned += bonus;
            power_up.deactivate();
            events.push(GameEvent::PowerUpApplied(power_up.kind));
        }
    }
    state.award(earned);
}

/// Enemy bullets hitting the player. The bullet is spent whether or not it hurts.
pub fn enemy_bullets_vs_player(state: &mut SimulationState) {
    let SimulationState {
        settings,
        player,
        bullets,
        explosions,
        shake,
        flash,
        events,
        rng,
        ..
    } = state;

    for bullet in bullets.iter_mut().filter(|b| !b.is_player()) {
        if !overlaps(&*bullet, &*player) {
            continue;
        }
        bullet.deactivate();

        let shielded = player.shield.active;
        if player.take_damage() {
            player.lose_life();
            explosions.push(explosion(player.center(), HIT_FLASH_COLOR, settings, rng));
            if settings.effective_screen_shake() {
                shake.trigger(HIT_SHAKE_INTENSITY, HIT_SHAKE_DURATION);
            }
            if settings.effective_flash() {
                flash.trigger(HIT_FLASH_COLOR, FLASH_DURATION);
            }
            events.push(GameEvent::PlayerHit {
                lives: player.lives,
            });
        } else if shielded {
            events.push(GameEvent::ShieldAbsorbed);
        }
    }
}

/// Any active enemy reaching the player's row ends the run
pub fn check_breach(state: &mut SimulationState) {
    let player_y = state.player.pos.y;
    let breached = state
        .enemies
        .iter()
        .filter(|e| e.is_active())
        .any(|e| e.bounds().bottom() >= player_y);

    if breached && state.player.lives > 0 {
        state.player.lives = 0;
        state.events.push(GameEvent::Breached);
    }
}

fn explosion(at: Vec2, color: u32, settings: &Settings, rng: &mut GameRng) -> Explosion {
    let mut explosion = Explosion::new(at, color, rng);
    if !settings.particles {
        explosion.particles.clear();
    }
    explosion
}

fn spawn_debris(particles: &mut Vec<Particle>, settings: &Settings, rng: &mut GameRng, at: Vec2) {
    let room = settings.max_particles().saturating_sub(particles.len());
    if room == 0 {
        return;
    }
    particles.extend(impact_burst(at, DEBRIS_COLOR, rng).into_iter().take(room));
}
