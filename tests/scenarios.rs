//! End-to-end gameplay scenarios against the public API

use swarm_shooter::consts::*;
use swarm_shooter::sim::enemy::spawn_grid;
use swarm_shooter::sim::{
    Bullet, Direction, Enemy, EnemyKind, Entity, GameEvent, GamePhase, PowerUp, PowerUpKind,
    Rect, SimulationState, Swarm, TickInput, Wall, WaveStep, overlaps, resolve_collisions, tick,
};
use swarm_shooter::{
    BuiltinLevels, LevelConfig, LevelError, LevelSource, Settings, load_level,
    move_interval_for_level,
};

fn grid_config(rows: u32, cols: u32) -> LevelConfig {
    LevelConfig {
        enemy_count: 0,
        enemy_rows: rows,
        enemy_cols: cols,
        enemy_speed: 1.0,
        enemy_drop_speed: 20.0,
        enemy_move_direction: 1,
        enemy_type: EnemyKind::Basic,
        ..LevelConfig::fallback()
    }
}

/// Playing state with no enemies or walls
fn open_field() -> SimulationState {
    let mut state = SimulationState::new(Settings::default());
    state.start(&LevelConfig::fallback());
    state.enemies.clear();
    state.walls.clear();
    state
}

fn enemy_bullet_at_player(state: &mut SimulationState) {
    let center = state.player.center();
    state.bullets.push(Bullet::enemy_shot(center.x, center.y, 2.0));
}

#[test]
fn shared_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    assert!(a.intersects(&Rect::new(9.99, 9.99, 10.0, 10.0)));

    // Inactive entities never collide
    let mut bullet = Bullet::player_shot(5.0, 0.0);
    let wall = Wall::new(0.0, 0.0, 10.0, 10.0, 3);
    assert!(overlaps(&bullet, &wall));
    bullet.deactivate();
    assert!(!overlaps(&bullet, &wall));
}

#[test]
fn swarm_drops_and_turns_at_right_edge() {
    // 800×600 canvas, 5×7 basic grid moving right
    let config = grid_config(5, 7);
    let mut enemies = spawn_grid(&config, 1, CANVAS_WIDTH);
    let mut swarm = Swarm::for_level(&config, 1);
    assert_eq!(enemies.len(), 35);
    assert_eq!(swarm.direction, Direction::Right);

    let right_edge = |enemies: &[Enemy]| {
        enemies
            .iter()
            .map(|e| e.bounds().right())
            .fold(f32::MIN, f32::max)
    };

    while right_edge(&enemies) < CANVAS_WIDTH {
        let ys: Vec<f32> = enemies.iter().map(|e| e.pos.y).collect();
        assert_eq!(swarm.step(&mut enemies, CANVAS_WIDTH), WaveStep::Advanced);
        assert!(enemies.iter().zip(ys).all(|(e, y)| e.pos.y == y));
    }

    let before: Vec<(f32, f32)> = enemies.iter().map(|e| (e.pos.x, e.pos.y)).collect();
    assert_eq!(swarm.step(&mut enemies, CANVAS_WIDTH), WaveStep::Dropped);
    assert_eq!(swarm.direction, Direction::Left);
    for (enemy, (x, y)) in enemies.iter().zip(before) {
        assert_eq!(enemy.pos.x, x);
        assert_eq!(enemy.pos.y, y + 20.0);
    }

    // Next step heads left
    let xs: Vec<f32> = enemies.iter().map(|e| e.pos.x).collect();
    assert_eq!(swarm.step(&mut enemies, CANVAS_WIDTH), WaveStep::Advanced);
    assert!(enemies.iter().zip(xs).all(|(e, x)| e.pos.x == x - 1.0));
}

#[test]
fn swarm_steps_once_per_interval() {
    let config = grid_config(2, 3);
    let mut enemies = spawn_grid(&config, 1, CANVAS_WIDTH);
    let mut swarm = Swarm::for_level(&config, 1);
    assert_eq!(swarm.move_interval, move_interval_for_level(1));

    let start_x = enemies[0].pos.x;
    assert_eq!(swarm.update(&mut enemies, 0.5, CANVAS_WIDTH), None);
    assert_eq!(swarm.update(&mut enemies, 0.5, CANVAS_WIDTH), None);
    assert_eq!(swarm.update(&mut enemies, 0.5, CANVAS_WIDTH), Some(WaveStep::Advanced));
    assert_eq!(swarm.move_timer, 0.0);
    assert_eq!(enemies[0].pos.x, start_x + 1.0);
}

#[test]
fn wall_survives_four_hits_and_falls_on_fifth() {
    let mut wall = Wall::new(100.0, 450.0, 80.0, 30.0, 5);
    let mid_y = 450.0 + 15.0;

    for (i, local_x) in [10.0, 25.0, 40.0, 55.0, 70.0].into_iter().enumerate() {
        let blocks_before = wall.alive_blocks();
        assert!(wall.take_damage(100.0 + local_x, mid_y, true));
        assert!(wall.alive_blocks() < blocks_before);
        assert_eq!(wall.health, 4 - i as u32);
        if i < 4 {
            assert!(wall.active, "active after hit {}", i + 1);
        } else {
            assert!(!wall.active, "inactive after hit 5");
        }
    }
    assert!(wall.alive_blocks() > 0);
}

#[test]
fn shield_absorbs_exactly_one_hit() {
    let mut state = open_field();
    PowerUp::new(PowerUpKind::Shield, 0.0, 0.0).apply(&mut state.player);
    assert!(state.player.shield.active);

    enemy_bullet_at_player(&mut state);
    resolve_collisions(&mut state);
    assert_eq!(state.player.lives, 3);
    assert!(!state.player.shield.active);
    assert!(state.events.contains(&GameEvent::ShieldAbsorbed));

    // Next hit costs a life and starts the invulnerability window
    state.events.clear();
    enemy_bullet_at_player(&mut state);
    resolve_collisions(&mut state);
    assert_eq!(state.player.lives, 2);
    assert!(state.player.invulnerable.active);

    // Still invulnerable
    enemy_bullet_at_player(&mut state);
    resolve_collisions(&mut state);
    assert_eq!(state.player.lives, 2);
}

#[test]
fn life_up_is_capped() {
    let mut state = open_field();
    state.player.lives = 4;
    let life_up = PowerUp::new(PowerUpKind::LifeUp, 0.0, 0.0);
    life_up.apply(&mut state.player);
    assert_eq!(state.player.lives, 5);
    life_up.apply(&mut state.player);
    assert_eq!(state.player.lives, MAX_LIVES);
}

#[test]
fn kill_awards_exact_points() {
    let mut state = open_field();
    state.score = 70;
    let mut enemy = Enemy::new(EnemyKind::Aggressive, 300.0, 100.0);
    enemy.points = 30;
    let center = enemy.center();
    state.enemies.push(enemy);
    state.bullets.push(Bullet::player_shot(center.x, center.y));

    resolve_collisions(&mut state);
    assert_eq!(state.score, 100);
    assert_eq!(state.enemies_killed, 1);
    assert!(state.enemies.iter().all(|e| !e.active));
}

#[test]
fn failed_fetch_for_level_three_uses_fallback() {
    let mut failing = |level: u32| -> Result<LevelConfig, LevelError> {
        Err(LevelError::Unavailable(format!("level {level} request rejected")))
    };
    let config = load_level(&mut failing, 3);
    assert_eq!(config, LevelConfig::fallback());
    assert_eq!(config.enemy_type, EnemyKind::Basic);
    assert_eq!((config.enemy_rows, config.enemy_cols), (3, 5));
}

#[test]
fn builtin_levels_feed_the_state_machine() {
    let mut levels = BuiltinLevels;
    let mut state = SimulationState::new(Settings::default());
    state.start(&load_level(&mut levels, 1));
    assert_eq!(state.phase, GamePhase::Playing);

    // Clear the level by hand
    for enemy in &mut state.enemies {
        enemy.active = false;
    }
    tick(&mut state, &TickInput::default(), 1.0 / 60.0);
    assert_eq!(state.phase, GamePhase::LevelComplete);
    assert_eq!(state.level, 2);

    let next = levels.fetch(state.level).unwrap();
    assert!(state.advance_level(&next));
    assert_eq!(state.enemies.len(), (next.enemy_rows * next.enemy_cols) as usize);
}

#[test]
fn breach_ends_the_game() {
    let mut state = open_field();
    let y = state.player.pos.y;
    state.enemies.push(Enemy::new(EnemyKind::Basic, 50.0, y - 20.0));

    tick(&mut state, &TickInput::default(), 1.0 / 60.0);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.events.contains(&GameEvent::Breached));
    assert!(matches!(state.events.last(), Some(GameEvent::GameOver { .. })));
}

#[test]
fn attract_mode_run_keeps_invariants() {
    let mut state = SimulationState::new(Settings {
        seed: 2024,
        ..Default::default()
    });
    let mut levels = BuiltinLevels;
    state.start(&load_level(&mut levels, 1));

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut last_score = 0;
    for _ in 0..3000 {
        tick(&mut state, &input, 1.0 / 60.0);
        assert!(state.score >= last_score);
        assert!(state.player.lives <= MAX_LIVES);
        assert!(state.bullets.iter().all(|b| b.active));
        assert!(state.particles.len() <= state.settings.max_particles());
        last_score = state.score;

        match state.phase {
            GamePhase::LevelComplete => {
                let next = load_level(&mut levels, state.level);
                state.advance_level(&next);
            }
            GamePhase::GameOver => break,
            _ => {}
        }
    }
    assert!(state.time_ticks > 0);
}
