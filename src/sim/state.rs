//! Session state
//!
//! Everything the tick mutates lives on `GameState`: the player, the live
//! entity collections, level progression, spawn and shot timers, and the
//! seeded RNG that places spawns.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::progression::{LevelProgress, LevelUp};
use super::projectile::{Projectile, RadialPulse, volley};
use super::spawner::{Spawner, spawn_point};
use crate::config::{ConfigError, GameConfig};

/// Outer session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the start intent
    Menu,
    /// A run is in progress (possibly ended in game over or completion)
    Playing,
    /// Quit was requested; the loop should stop
    Quit,
}

/// Borrowed view of any live entity
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
    Projectile(&'a Projectile),
    Pulse(&'a RadialPulse),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: SessionPhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pulses: Vec<RadialPulse>,
    pub progress: LevelProgress,
    pub spawner: Spawner,
    /// Time of the last volley
    pub last_shot_ms: Option<u64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Clock reading of the latest tick
    pub now_ms: u64,
    next_id: u32,
}

impl GameState {
    /// Create a session in the menu using the built-in tuning
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Create a session in the menu with custom tuning
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: SessionPhase::Menu,
            player: Player::new(&config),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pulses: Vec::new(),
            progress: LevelProgress::new(&config),
            spawner: Spawner::new(config.level(1).spawn_delay_ms),
            last_shot_ms: None,
            time_ticks: 0,
            now_ms: 0,
            next_id: 1,
            config,
        }
    }

    /// Begin a fresh run at level 1 (start and restart both land here)
    pub fn start(&mut self, now_ms: u64) {
        self.phase = SessionPhase::Playing;
        self.player = Player::new(&self.config);
        self.enemies.clear();
        self.projectiles.clear();
        self.pulses.clear();
        self.progress = LevelProgress::new(&self.config);
        self.spawner = Spawner::new(self.config.level(1).spawn_delay_ms);
        self.last_shot_ms = None;
        self.now_ms = now_ms;
        log::info!("Run started (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether gameplay (movement, spawns, combat) advances this tick
    pub fn is_simulating(&self) -> bool {
        self.phase == SessionPhase::Playing
            && !self.progress.is_transitioning()
            && !self.progress.is_terminal()
            && !self.player.is_dead()
    }

    /// Every live entity, player first
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Player(&self.player))
            .chain(self.enemies.iter().map(EntityRef::Enemy))
            .chain(self.projectiles.iter().map(EntityRef::Projectile))
            .chain(self.pulses.iter().map(EntityRef::Pulse))
    }

    /// Fire the current level's volley if the shot timer and ammo allow
    pub fn try_shoot(&mut self, now_ms: u64) -> bool {
        if !self.player.can_shoot() {
            return false;
        }
        let ready = self
            .last_shot_ms
            .is_none_or(|t| now_ms.saturating_sub(t) > self.config.weapons.shot_delay_ms);
        if !ready || !self.player.shoot(now_ms) {
            return false;
        }

        let pattern = self.config.level(self.progress.level).fire_pattern;
        let origin = self.player.center();
        for direction in volley(pattern, self.player.last_direction) {
            let id = self.next_entity_id();
            let projectile = Projectile::new(id, origin, direction, now_ms, &self.config);
            self.projectiles.push(projectile);
        }
        self.player.begin_shot_animation();
        self.last_shot_ms = Some(now_ms);
        true
    }

    /// Launch a sing pulse if its cooldown has elapsed
    pub fn try_sing(&mut self, now_ms: u64) -> bool {
        if self.player.is_dead() || !self.player.sing_attack(now_ms) {
            return false;
        }
        let id = self.next_entity_id();
        let pulse = RadialPulse::new(id, self.player.center(), &self.config);
        self.pulses.push(pulse);
        true
    }

    /// Spawn a batch of enemies if the spawn timer is due
    pub fn spawn_enemies(&mut self, now_ms: u64) -> usize {
        if !self.spawner.poll(now_ms) {
            return 0;
        }
        let spec = self.config.level(self.progress.level).clone();
        let window = &self.config.window;
        let (width, height) = (window.width, window.height);
        let margin = self.config.enemy.spawn_margin;

        for _ in 0..spec.spawn_batch {
            let pos: Vec2 = spawn_point(&mut self.rng, width, height, margin);
            let id = self.next_entity_id();
            let enemy = Enemy::new(id, pos, spec.enemy_speed, &self.config);
            self.enemies.push(enemy);
        }
        log::debug!(
            "Spawned {} at level {} ({} alive)",
            spec.spawn_batch,
            self.progress.level,
            self.enemies.len()
        );
        spec.spawn_batch as usize
    }

    /// Run the level-up check, sweeping the field when a level ends
    pub fn check_level_up(&mut self, now_ms: u64) -> LevelUp {
        let outcome = self
            .progress
            .check_level_up(now_ms, self.config.final_level());
        if outcome != LevelUp::None {
            self.enemies.clear();
        }
        outcome
    }

    /// Debug shortcut: count the current level as cleared
    pub fn skip_level(&mut self, now_ms: u64) -> LevelUp {
        if self.progress.level >= self.config.final_level() {
            return LevelUp::None;
        }
        self.progress.enemies_killed = self.progress.enemies_for_level;
        self.check_level_up(now_ms)
    }

    /// Start the next level once the transition delay has passed
    pub fn advance_transition(&mut self, now_ms: u64) -> Option<u32> {
        let level = self.progress.poll_transition(now_ms, &self.config)?;
        let delay = self.config.level(level).spawn_delay_ms;
        self.spawner.set_delay(delay);
        Some(level)
    }
}
