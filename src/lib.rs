//! Infected Zone - a top-down survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (animation, combat, spawning, progression)
//! - `config`: Immutable game tuning passed into a session

pub mod config;
pub mod sim;

pub use config::{ConfigError, FirePattern, GameConfig, LevelSpec};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Nominal milliseconds per tick
    pub const TICK_MS: f64 = 1000.0 / TICKS_PER_SECOND as f64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 3.0; // units per tick, per axis
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_MAX_AMMO: u32 = 10;
    /// Collision box is an eighth of the 128px soldier frame
    pub const PLAYER_BOX_SIZE: (f32, f32) = (16.0, 16.0);
    pub const PLAYER_SPRITE_OFFSET: (f32, f32) = (-40.0, -80.0);
    /// Health lost per enemy contact
    pub const ENEMY_HIT_DAMAGE: i32 = 5;

    /// Enemy defaults
    pub const ATTACK_ANIMATION_DISTANCE: f32 = 50.0;
    pub const ATTACK_DAMAGE_DISTANCE: f32 = 50.0;
    /// An eighth of the frame wide, a quarter tall
    pub const ENEMY_BOX_SIZE: (f32, f32) = (12.0, 24.0);
    pub const ENEMY_SPRITE_OFFSET: (f32, f32) = (-25.0, -60.0);
    /// How far outside the screen edge enemies appear
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Weapons
    pub const SHOT_DELAY_MS: u64 = 250;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_LIFETIME_MS: u64 = 500;
    pub const PROJECTILE_SPRITE_SIZE: (f32, f32) = (8.0, 8.0);
    /// Hitbox is this many times the sprite in each dimension
    pub const PROJECTILE_HITBOX_SCALE: f32 = 2.0;
    pub const TRIPLE_SHOT_SPREAD_DEG: f32 = 15.0;
    pub const ARC_PROJECTILE_COUNT: u32 = 5;
    pub const ARC_SPREAD_DEG: f32 = 60.0;

    /// Sing attack (radial pulse)
    pub const PULSE_START_RADIUS: f32 = 50.0;
    pub const PULSE_MAX_RADIUS: f32 = 200.0;
    pub const PULSE_GROWTH_PER_TICK: f32 = 5.0;
    pub const SING_COOLDOWN_MS: u64 = 2000;

    /// Timers (milliseconds)
    pub const INVULNERABILITY_MS: u64 = 1000;
    pub const HURT_DURATION_MS: u64 = 500;
    pub const FLASH_INTERVAL_MS: u64 = 100;
    pub const FLASH_PAIRS: u32 = 3;
    pub const RECHARGE_MS: u64 = 1000;
    pub const DEATH_DURATION_MS: u64 = 2000;
    pub const LEVEL_TRANSITION_MS: u64 = 3000;

    /// Levels: quota, enemy speed, spawn batch, spawn delay
    pub const LEVEL_1_ENEMIES: u32 = 25;
    pub const LEVEL_2_ENEMIES: u32 = 50;
    pub const LEVEL_3_ENEMIES: u32 = 100;
    pub const LEVEL_1_SPEED: f32 = 1.0;
    pub const LEVEL_2_SPEED: f32 = 2.0;
    pub const LEVEL_3_SPEED: f32 = 3.0;
    pub const LEVEL_1_BATCH: u32 = 1;
    pub const LEVEL_2_BATCH: u32 = 3;
    pub const LEVEL_3_BATCH: u32 = 2;
    pub const DEFAULT_SPAWN_DELAY_MS: u64 = 1000;
    /// Level 2 spawns bigger batches, so it waits longer between them
    pub const LEVEL_2_SPAWN_DELAY_MS: u64 = 1500;
    pub const MAX_LEVELS: usize = 3;
}

/// Normalize a direction, returning zero for a zero-length input
#[inline]
pub fn direction_or_zero(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Rotate a unit direction by `degrees` in screen space (y grows downward)
///
/// Positive angles turn counter-clockwise as seen on screen.
#[inline]
pub fn rotate_screen(dir: Vec2, degrees: f32) -> Vec2 {
    let base = (-dir.y).atan2(dir.x);
    let angle = base + degrees.to_radians();
    Vec2::new(angle.cos(), -angle.sin())
}
