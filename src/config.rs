//! Game tuning
//!
//! One immutable `GameConfig` is handed to a session at construction. The
//! defaults reproduce the three built-in levels; nothing reads global state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised when a tuning document is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("play area must be positive, got {width}x{height}")]
    EmptyWindow { width: f32, height: f32 },

    #[error("level table must hold between 1 and 3 levels, got {0}")]
    LevelCount(usize),

    #[error("level {level}: {reason}")]
    Level { level: usize, reason: &'static str },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("pulse max radius {max} must exceed start radius {start}")]
    PulseRadius { start: f32, max: f32 },
}

/// Bullet layout fired by one successful shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FirePattern {
    /// One bullet along the aim direction
    Single,
    /// Center bullet plus one either side, `spread_deg` apart
    Triple { spread_deg: f32 },
    /// `count` bullets evenly across `spread_deg`
    Arc { count: u32, spread_deg: f32 },
}

/// Per-level difficulty row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Kills needed to clear the level
    pub quota: u32,
    /// Enemy pursuit speed (units per tick)
    pub enemy_speed: f32,
    /// Enemies created per spawn
    pub spawn_batch: u32,
    /// Minimum gap between spawns (ms)
    pub spawn_delay_ms: u64,
    pub fire_pattern: FirePattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub speed: f32,
    pub max_health: i32,
    pub max_ammo: u32,
    pub box_size: (f32, f32),
    pub sprite_offset: (f32, f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub attack_animation_distance: f32,
    pub attack_damage_distance: f32,
    /// Health removed from the player per contact
    pub hit_damage: i32,
    pub box_size: (f32, f32),
    pub sprite_offset: (f32, f32),
    pub spawn_margin: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub shot_delay_ms: u64,
    pub projectile_speed: f32,
    pub projectile_lifetime_ms: u64,
    pub projectile_sprite_size: (f32, f32),
    pub projectile_hitbox_scale: f32,
    pub pulse_start_radius: f32,
    pub pulse_max_radius: f32,
    pub pulse_growth_per_tick: f32,
    pub sing_cooldown_ms: u64,
}

/// Gameplay timers, all in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub invulnerability_ms: u64,
    pub hurt_ms: u64,
    pub flash_interval_ms: u64,
    pub flash_pairs: u32,
    pub recharge_ms: u64,
    pub death_ms: u64,
    pub level_transition_ms: u64,
}

/// Complete tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub weapons: WeaponConfig,
    pub timers: TimerConfig,
    /// Index 0 is level 1
    pub levels: Vec<LevelSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                width: WINDOW_WIDTH,
                height: WINDOW_HEIGHT,
            },
            player: PlayerConfig {
                speed: PLAYER_SPEED,
                max_health: PLAYER_MAX_HEALTH,
                max_ammo: PLAYER_MAX_AMMO,
                box_size: PLAYER_BOX_SIZE,
                sprite_offset: PLAYER_SPRITE_OFFSET,
            },
            enemy: EnemyConfig {
                attack_animation_distance: ATTACK_ANIMATION_DISTANCE,
                attack_damage_distance: ATTACK_DAMAGE_DISTANCE,
                hit_damage: ENEMY_HIT_DAMAGE,
                box_size: ENEMY_BOX_SIZE,
                sprite_offset: ENEMY_SPRITE_OFFSET,
                spawn_margin: SPAWN_MARGIN,
            },
            weapons: WeaponConfig {
                shot_delay_ms: SHOT_DELAY_MS,
                projectile_speed: PROJECTILE_SPEED,
                projectile_lifetime_ms: PROJECTILE_LIFETIME_MS,
                projectile_sprite_size: PROJECTILE_SPRITE_SIZE,
                projectile_hitbox_scale: PROJECTILE_HITBOX_SCALE,
                pulse_start_radius: PULSE_START_RADIUS,
                pulse_max_radius: PULSE_MAX_RADIUS,
                pulse_growth_per_tick: PULSE_GROWTH_PER_TICK,
                sing_cooldown_ms: SING_COOLDOWN_MS,
            },
            timers: TimerConfig {
                invulnerability_ms: INVULNERABILITY_MS,
                hurt_ms: HURT_DURATION_MS,
                flash_interval_ms: FLASH_INTERVAL_MS,
                flash_pairs: FLASH_PAIRS,
                recharge_ms: RECHARGE_MS,
                death_ms: DEATH_DURATION_MS,
                level_transition_ms: LEVEL_TRANSITION_MS,
            },
            levels: vec![
                LevelSpec {
                    quota: LEVEL_1_ENEMIES,
                    enemy_speed: LEVEL_1_SPEED,
                    spawn_batch: LEVEL_1_BATCH,
                    spawn_delay_ms: DEFAULT_SPAWN_DELAY_MS,
                    fire_pattern: FirePattern::Single,
                },
                LevelSpec {
                    quota: LEVEL_2_ENEMIES,
                    enemy_speed: LEVEL_2_SPEED,
                    spawn_batch: LEVEL_2_BATCH,
                    spawn_delay_ms: LEVEL_2_SPAWN_DELAY_MS,
                    fire_pattern: FirePattern::Triple {
                        spread_deg: TRIPLE_SHOT_SPREAD_DEG,
                    },
                },
                LevelSpec {
                    quota: LEVEL_3_ENEMIES,
                    enemy_speed: LEVEL_3_SPEED,
                    spawn_batch: LEVEL_3_BATCH,
                    spawn_delay_ms: DEFAULT_SPAWN_DELAY_MS,
                    fire_pattern: FirePattern::Arc {
                        count: ARC_PROJECTILE_COUNT,
                        spread_deg: ARC_SPREAD_DEG,
                    },
                },
            ],
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tuning the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let WindowConfig { width, height } = self.window;
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::EmptyWindow { width, height });
        }

        if self.levels.is_empty() || self.levels.len() > MAX_LEVELS {
            return Err(ConfigError::LevelCount(self.levels.len()));
        }
        for (i, spec) in self.levels.iter().enumerate() {
            let level = i + 1;
            if spec.quota == 0 {
                return Err(ConfigError::Level { level, reason: "quota must be positive" });
            }
            if spec.spawn_batch == 0 {
                return Err(ConfigError::Level { level, reason: "spawn batch must be positive" });
            }
            if spec.enemy_speed <= 0.0 {
                return Err(ConfigError::Level { level, reason: "enemy speed must be positive" });
            }
            if let FirePattern::Arc { count, .. } = spec.fire_pattern {
                if count < 2 {
                    return Err(ConfigError::Level { level, reason: "arc needs at least two bullets" });
                }
            }
        }

        if self.player.speed <= 0.0 {
            return Err(ConfigError::NonPositive { field: "player.speed" });
        }
        if self.player.max_health <= 0 {
            return Err(ConfigError::NonPositive { field: "player.max_health" });
        }
        if self.player.max_ammo == 0 {
            return Err(ConfigError::NonPositive { field: "player.max_ammo" });
        }
        if self.weapons.projectile_speed <= 0.0 {
            return Err(ConfigError::NonPositive { field: "weapons.projectile_speed" });
        }
        if self.weapons.pulse_growth_per_tick <= 0.0 {
            return Err(ConfigError::NonPositive { field: "weapons.pulse_growth_per_tick" });
        }
        if self.weapons.pulse_max_radius <= self.weapons.pulse_start_radius {
            return Err(ConfigError::PulseRadius {
                start: self.weapons.pulse_start_radius,
                max: self.weapons.pulse_max_radius,
            });
        }
        Ok(())
    }

    /// Tuning row for a 1-based level, clamped to the last defined level
    pub fn level(&self, level: u32) -> &LevelSpec {
        let idx = (level.max(1) as usize - 1).min(self.levels.len() - 1);
        &self.levels[idx]
    }

    /// Number of levels in the campaign
    pub fn final_level(&self) -> u32 {
        self.levels.len() as u32
    }
}
