//! Read-only views for renderers and the HUD
//!
//! A `FrameSnapshot` is captured after a tick and owns everything a frontend
//! needs to draw that frame: sprite draw positions (box origin plus the
//! per-kind sprite offset), frame IDs, tints and HUD numbers.

use glam::Vec2;
use serde::Serialize;

use super::animation::{Animated, Facing, FrameId};
use super::enemy::EnemyAction;
use super::player::PlayerAction;
use super::state::{GameState, SessionPhase};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub center: Vec2,
    /// Top-left of the sprite
    pub draw_pos: Vec2,
    pub frame: FrameId,
    pub facing: Facing,
    pub action: PlayerAction,
    /// Red hurt flash is on this frame
    pub tinted: bool,
    pub experience: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub center: Vec2,
    pub draw_pos: Vec2,
    pub frame: FrameId,
    pub facing: Facing,
    pub action: EnemyAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub center: Vec2,
    pub angle_deg: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PulseView {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub opacity: u8,
}

/// HUD numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub level: u32,
    pub enemies_killed: u32,
    pub enemies_for_level: u32,
    pub transitioning: bool,
    pub game_over: bool,
    pub campaign_complete: bool,
    pub health: i32,
    pub max_health: i32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub recharging: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: SessionPhase,
    pub time_ticks: u64,
    pub now_ms: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub pulses: Vec<PulseView>,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let config = &state.config;
        let player = &state.player;
        let offset = |o: (f32, f32)| Vec2::new(o.0, o.1);
        let player_offset = offset(config.player.sprite_offset);
        let enemy_offset = offset(config.enemy.sprite_offset);

        let progress = &state.progress;
        Self {
            phase: state.phase,
            time_ticks: state.time_ticks,
            now_ms: state.now_ms,
            player: PlayerView {
                center: player.center(),
                draw_pos: player.bounds.min() + player_offset,
                frame: player.current_frame_id(),
                facing: player.facing,
                action: player.action(),
                tinted: player.is_flash_tinted(),
                experience: player.experience,
                level: player.level,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    center: e.center(),
                    draw_pos: e.bounds.min() + enemy_offset,
                    frame: e.current_frame_id(),
                    facing: e.facing,
                    action: e.action,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    center: p.bounds.center,
                    angle_deg: p.angle_deg(),
                })
                .collect(),
            pulses: state
                .pulses
                .iter()
                .map(|p| PulseView {
                    id: p.id,
                    center: p.center,
                    radius: p.radius,
                    opacity: p.opacity(),
                })
                .collect(),
            hud: Hud {
                level: progress.level,
                enemies_killed: progress.enemies_killed,
                enemies_for_level: progress.enemies_for_level,
                transitioning: progress.is_transitioning(),
                game_over: progress.game_over,
                campaign_complete: progress.is_complete(),
                health: player.health,
                max_health: player.max_health,
                ammo: player.ammo,
                max_ammo: player.max_ammo,
                recharging: player.is_recharging(),
            },
        }
    }
}
