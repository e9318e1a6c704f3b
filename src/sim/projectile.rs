//! Short-lived attack entities
//!
//! - `Projectile`: straight bullet with a fixed lifetime
//! - `RadialPulse`: the sing attack, a ring that grows around the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::{FirePattern, GameConfig};
use crate::{direction_or_zero, rotate_screen};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Hitbox, larger than the drawn sprite
    pub bounds: Rect,
    /// Unit vector fixed at spawn
    pub direction: Vec2,
    pub speed: f32,
    pub spawned_ms: u64,
    pub lifetime_ms: u64,
}

impl Projectile {
    pub fn new(id: u32, center: Vec2, direction: Vec2, now_ms: u64, config: &GameConfig) -> Self {
        let weapons = &config.weapons;
        let (w, h) = weapons.projectile_sprite_size;
        let size = Vec2::new(w, h) * weapons.projectile_hitbox_scale;
        Self {
            id,
            bounds: Rect::new(center, size),
            direction: direction_or_zero(direction),
            speed: weapons.projectile_speed,
            spawned_ms: now_ms,
            lifetime_ms: weapons.projectile_lifetime_ms,
        }
    }

    /// Move one tick; returns false once the lifetime has run out
    pub fn update(&mut self, now_ms: u64) -> bool {
        self.bounds.center += self.direction * self.speed;
        self.is_alive(now_ms)
    }

    pub fn is_alive(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.spawned_ms) <= self.lifetime_ms
    }

    /// Sprite rotation in degrees, counter-clockwise on screen
    pub fn angle_deg(&self) -> f32 {
        (-self.direction.y).atan2(self.direction.x).to_degrees()
    }
}

/// Directions for one volley fired along `aim`
pub fn volley(pattern: FirePattern, aim: Vec2) -> Vec<Vec2> {
    match pattern {
        FirePattern::Single => vec![aim],
        FirePattern::Triple { spread_deg } => vec![
            aim,
            rotate_screen(aim, -spread_deg),
            rotate_screen(aim, spread_deg),
        ],
        FirePattern::Arc { count, spread_deg } => {
            let count = count.max(2);
            let step = spread_deg / (count - 1) as f32;
            let start = -spread_deg / 2.0;
            (0..count)
                .map(|i| rotate_screen(aim, start + step * i as f32))
                .collect()
        }
    }
}

/// The sing attack: an expanding ring that kills whatever it touches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadialPulse {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub growth: f32,
}

impl RadialPulse {
    pub fn new(id: u32, center: Vec2, config: &GameConfig) -> Self {
        Self {
            id,
            center,
            radius: config.weapons.pulse_start_radius,
            max_radius: config.weapons.pulse_max_radius,
            growth: config.weapons.pulse_growth_per_tick,
        }
    }

    /// Grow one step around `anchor`; returns false at full size
    pub fn update(&mut self, anchor: Vec2) -> bool {
        self.radius += self.growth;
        self.center = anchor;
        self.radius < self.max_radius
    }

    /// Fades linearly to transparent at full size
    pub fn opacity(&self) -> u8 {
        (255.0 * (1.0 - self.radius / self.max_radius)).clamp(0.0, 255.0) as u8
    }

    /// Square bounds of the ring, `2 * radius` on a side
    pub fn bounds(&self) -> Rect {
        Rect::new(self.center, Vec2::splat(2.0 * self.radius))
    }

    /// Hits are decided by the ring's square bounds, corners included
    pub fn overlaps(&self, rect: &Rect) -> bool {
        self.bounds().overlaps(rect)
    }
}
