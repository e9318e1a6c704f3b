//! Time-gated enemy spawning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Fires once per spawn delay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// None until the first batch, which fires immediately
    last_spawn_ms: Option<u64>,
    delay_ms: u64,
}

impl Spawner {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            last_spawn_ms: None,
            delay_ms,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn set_delay(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// True when a batch is due; restarts the timer when it fires
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let due = self
            .last_spawn_ms
            .is_none_or(|t| now_ms.saturating_sub(t) > self.delay_ms);
        if due {
            self.last_spawn_ms = Some(now_ms);
        }
        due
    }
}

/// Random point just outside a uniformly chosen screen edge
pub fn spawn_point<R: Rng>(rng: &mut R, width: f32, height: f32, margin: f32) -> Vec2 {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    match edge {
        Edge::Top => Vec2::new(rng.random_range(0.0..=width), -margin),
        Edge::Right => Vec2::new(width + margin, rng.random_range(0.0..=height)),
        Edge::Bottom => Vec2::new(rng.random_range(0.0..=width), height + margin),
        Edge::Left => Vec2::new(-margin, rng.random_range(0.0..=height)),
    }
}
