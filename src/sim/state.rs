//! Game state and core simulation types
//!
//! `SimulationState` owns every entity collection. Only the tick mutates it;
//! collaborators read [`SimulationState::snapshot`], [`SimulationState::stats`]
//! and the per-tick `events` afterwards.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::effects::{Explosion, Flash, Particle, ScreenShake};
use super::enemy::{Enemy, EnemyKind, Swarm, WaveStep, spawn_grid};
use super::entity::active_count;
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::wall::{Wall, spawn_walls};
use crate::level::LevelConfig;
use crate::settings::Settings;

/// Seedable RNG driving every random roll in the simulation
pub type GameRng = Pcg32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
    /// Every enemy destroyed, waiting for the next level's data
    LevelComplete,
}

/// Notifications for the audio/UI layer, collected per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { kind: EnemyKind, points: u32, pos: Vec2 },
    BossDamaged { health: u32, max_health: u32 },
    PlayerHit { lives: u8 },
    ShieldAbsorbed,
    PlayerFired { bullets: usize },
    EnemyFired { count: usize },
    WallDamaged { health: u32 },
    WaveStepped(WaveStep),
    PowerUpSpawned(PowerUpKind),
    PowerUpApplied(PowerUpKind),
    /// An enemy reached the player's row
    Breached,
    LevelComplete { level: u32 },
    GameOver { score: u64 },
}

/// Aggregate numbers for the HUD and score submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub enemies_killed: u32,
    pub total_enemies: u32,
}

/// Read-only view of everything a renderer draws
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub walls: &'a [Wall],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub explosions: &'a [Explosion],
    pub shake_offset: Vec2,
    pub flash: &'a Flash,
    pub stats: Stats,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Kills in the current level
    pub enemies_killed: u32,
    /// Enemies spawned for the current level
    pub total_enemies: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub swarm: Swarm,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub walls: Vec<Wall>,
    pub power_ups: Vec<PowerUp>,
    /// Free-floating debris (explosions own their own particles)
    pub particles: Vec<Particle>,
    pub explosions: Vec<Explosion>,
    pub shake: ScreenShake,
    pub flash: Flash,
    /// Events raised by the most recent tick or command
    pub events: Vec<GameEvent>,
    pub rng: GameRng,
}

impl SimulationState {
    /// Create a state in the menu, seeded from the settings
    pub fn new(settings: Settings) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self::with_rng(settings, rng)
    }

    /// Create a state in the menu with an explicit RNG
    pub fn with_rng(settings: Settings, rng: GameRng) -> Self {
        let mut player = Player::new(settings.canvas_width, settings.canvas_height);
        player.lives = settings.starting_lives();
        Self {
            settings,
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            enemies_killed: 0,
            total_enemies: 0,
            time_ticks: 0,
            player,
            swarm: Swarm::default(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            walls: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            explosions: Vec::new(),
            shake: ScreenShake::default(),
            flash: Flash::default(),
            events: Vec::new(),
            rng,
        }
    }

    pub fn canvas(&self) -> Vec2 {
        Vec2::new(self.settings.canvas_width, self.settings.canvas_height)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            score: self.score,
            lives: self.player.lives,
            level: self.level,
            enemies_killed: self.enemies_killed,
            total_enemies: self.total_enemies,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            player: &self.player,
            enemies: &self.enemies,
            bullets: &self.bullets,
            walls: &self.walls,
            power_ups: &self.power_ups,
            particles: &self.particles,
            explosions: &self.explosions,
            shake_offset: self.shake.offset,
            flash: &self.flash,
            stats: self.stats(),
        }
    }

    pub fn active_enemies(&self) -> usize {
        active_count(&self.enemies)
    }

    /// Add points; the score never goes down
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Menu → Playing with the given level data
    pub fn start(&mut self, config: &LevelConfig) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.enter_level(config);
        self.set_phase(GamePhase::Playing);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            log::debug!("pause ignored in {:?}", self.phase);
            return false;
        }
        self.set_phase(GamePhase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            log::debug!("resume ignored in {:?}", self.phase);
            return false;
        }
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Pause while playing, resume while paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// LevelComplete → Playing once the next level's data is available
    pub fn advance_level(&mut self, config: &LevelConfig) -> bool {
        if self.phase != GamePhase::LevelComplete {
            log::debug!("advance_level ignored in {:?}", self.phase);
            return false;
        }
        self.enter_level(config);
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Full reset to a fresh run (from game over or pause)
    pub fn restart(&mut self, config: &LevelConfig) -> bool {
        if !matches!(self.phase, GamePhase::GameOver | GamePhase::Paused) {
            log::debug!("restart ignored in {:?}", self.phase);
            return false;
        }
        self.score = 0;
        self.level = 1;
        self.time_ticks = 0;
        self.player = Player::new(self.settings.canvas_width, self.settings.canvas_height);
        self.player.lives = self.settings.starting_lives();
        self.enter_level(config);
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Evaluate win/loss after a tick
    pub fn check_transitions(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.player.lives == 0 {
            self.events.push(GameEvent::GameOver { score: self.score });
            self.set_phase(GamePhase::GameOver);
        } else if self.active_enemies() == 0 {
            self.events.push(GameEvent::LevelComplete { level: self.level });
            self.level += 1;
            self.set_phase(GamePhase::LevelComplete);
        }
    }

    /// Spawn enemies and walls for a level and clear everything transient
    fn enter_level(&mut self, config: &LevelConfig) {
        let canvas = self.canvas();
        self.enemies = spawn_grid(config, self.level, canvas.x);
        self.walls = spawn_walls(&config.wall_config, canvas.x);
        self.swarm = Swarm::for_level(config, self.level);
        self.enemies_killed = 0;
        self.total_enemies = self.enemies.len() as u32;

        self.bullets.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.explosions.clear();
        self.shake = ScreenShake::default();
        self.flash = Flash::default();
        self.player.pos = Player::spawn_position(canvas.x, canvas.y);
        self.player.shoot_cooldown = 0.0;

        log::info!(
            "Level {}: {} {:?} enemies, {} walls, wave step every {:.2}s",
            self.level,
            self.total_enemies,
            config.enemy_type,
            self.walls.len(),
            self.swarm.move_interval
        );
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
