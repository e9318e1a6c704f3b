//! The player's soldier
//!
//! Owns movement, facing, health, ammo and the soldier animation. Each tick
//! resolves a single displayed action, highest priority first:
//! Dead > Hurt > Recharging > Shooting > Walking > Idle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{
    AnimationState, Animated, Facing, PLAYER_DEATH, PLAYER_HURT, PLAYER_IDLE, PLAYER_RECHARGE,
    PLAYER_SHOT, PLAYER_WALK,
};
use super::collision::Rect;
use crate::config::{GameConfig, TimerConfig};
use crate::direction_or_zero;

/// Displayed player behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Idle,
    Walking,
    Shooting,
    Hurt,
    Recharging,
    Dead,
}

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Shoot key held (keeps the shot animation cycling)
    pub shoot: bool,
}

/// Red-tint flashing after a hit: on/off cycles of a fixed interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HurtFlash {
    active: bool,
    cycle: u32,
    last_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Collision box; also the placement anchor
    pub bounds: Rect,
    pub health: i32,
    pub max_health: i32,
    /// Tracked for display only
    pub experience: u32,
    pub level: u32,
    pub facing: Facing,
    /// Last nonzero movement, normalized; aim for shots
    pub last_direction: Vec2,
    pub ammo: u32,
    pub max_ammo: u32,
    action: PlayerAction,
    anim: AnimationState,
    speed: f32,
    arena: Rect,
    timers: TimerConfig,
    sing_cooldown_ms: u64,
    shooting: bool,
    hurt: bool,
    hurt_started_ms: u64,
    /// Time of the last accepted hit
    last_hit_ms: Option<u64>,
    flash: HurtFlash,
    recharge_started_ms: Option<u64>,
    dead_since_ms: Option<u64>,
    last_sing_ms: Option<u64>,
}

impl Player {
    /// Create a player centered in the play area
    pub fn new(config: &GameConfig) -> Self {
        let arena = Rect::from_min_size(
            Vec2::ZERO,
            Vec2::new(config.window.width, config.window.height),
        );
        let (w, h) = config.player.box_size;
        Self {
            bounds: Rect::new(arena.center, Vec2::new(w, h)),
            health: config.player.max_health,
            max_health: config.player.max_health,
            experience: 0,
            level: 1,
            facing: Facing::Right,
            last_direction: Vec2::X,
            ammo: config.player.max_ammo,
            max_ammo: config.player.max_ammo,
            action: PlayerAction::Idle,
            anim: AnimationState::new(PLAYER_IDLE),
            speed: config.player.speed,
            arena,
            timers: config.timers.clone(),
            sing_cooldown_ms: config.weapons.sing_cooldown_ms,
            shooting: false,
            hurt: false,
            hurt_started_ms: 0,
            last_hit_ms: None,
            flash: HurtFlash::default(),
            recharge_started_ms: None,
            dead_since_ms: None,
            last_sing_ms: None,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center
    }

    pub fn action(&self) -> PlayerAction {
        self.action
    }

    pub fn is_dead(&self) -> bool {
        self.dead_since_ms.is_some()
    }

    pub fn is_hurt(&self) -> bool {
        self.hurt
    }

    pub fn is_recharging(&self) -> bool {
        self.recharge_started_ms.is_some()
    }

    /// Hits are ignored until the invulnerability window after the last one closes
    pub fn is_invulnerable(&self, now_ms: u64) -> bool {
        self.last_hit_ms
            .is_some_and(|t| now_ms.saturating_sub(t) <= self.timers.invulnerability_ms)
    }

    /// Red tint is drawn on even cycles while the flash runs
    pub fn is_flash_tinted(&self) -> bool {
        self.flash.active && self.flash.cycle % 2 == 0
    }

    /// Milliseconds since death, if dead
    pub fn death_elapsed(&self, now_ms: u64) -> Option<u64> {
        self.dead_since_ms.map(|t| now_ms.saturating_sub(t))
    }

    /// Whether shots may be fired this tick
    pub fn can_shoot(&self) -> bool {
        !self.is_dead() && !self.hurt && !self.is_recharging()
    }

    /// Start a hurt reaction; no-op while invulnerable or dead
    pub fn take_damage(&mut self, now_ms: u64) {
        if self.is_dead() || self.is_invulnerable(now_ms) {
            return;
        }
        self.hurt = true;
        self.hurt_started_ms = now_ms;
        self.last_hit_ms = Some(now_ms);
        self.flash = HurtFlash {
            active: true,
            cycle: 0,
            last_ms: now_ms,
        };
        self.action = PlayerAction::Hurt;
        self.anim.restart(PLAYER_HURT);
    }

    /// Spend one round; the last round arms the recharge immediately
    pub fn shoot(&mut self, now_ms: u64) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        if self.ammo == 0 {
            self.recharge_started_ms = Some(now_ms);
            log::debug!("Out of ammo, recharging");
        }
        true
    }

    /// Restart the shot animation after a successful shot
    pub fn begin_shot_animation(&mut self) {
        self.shooting = true;
        self.action = PlayerAction::Shooting;
        self.anim.restart(PLAYER_SHOT);
    }

    /// Try the sing attack; true when the cooldown allowed it
    pub fn sing_attack(&mut self, now_ms: u64) -> bool {
        let ready = self
            .last_sing_ms
            .is_none_or(|t| now_ms.saturating_sub(t) >= self.sing_cooldown_ms);
        if ready {
            self.last_sing_ms = Some(now_ms);
        }
        ready
    }

    /// Enter the death animation; repeated calls do nothing
    pub fn die(&mut self, now_ms: u64) {
        if self.is_dead() {
            return;
        }
        self.dead_since_ms = Some(now_ms);
        self.hurt = false;
        self.shooting = false;
        self.action = PlayerAction::Dead;
        self.anim.restart(PLAYER_DEATH);
        log::info!("Player died at {} ms", now_ms);
    }

    /// Advance one tick
    pub fn update(&mut self, intent: &MoveIntent, now_ms: u64) {
        if self.is_dead() {
            self.anim.advance(1);
            return;
        }

        self.update_flash(now_ms);

        if self.hurt {
            self.anim.advance(1);
            let elapsed = now_ms.saturating_sub(self.hurt_started_ms);
            if self.anim.is_finished() || elapsed >= self.timers.hurt_ms {
                self.hurt = false;
                if self.is_recharging() {
                    self.action = PlayerAction::Recharging;
                    self.anim.restart(PLAYER_RECHARGE);
                } else {
                    self.action = PlayerAction::Idle;
                    self.anim.restart(PLAYER_IDLE);
                }
            }
            return;
        }

        if let Some(started) = self.recharge_started_ms {
            self.action = PlayerAction::Recharging;
            self.anim.play(PLAYER_RECHARGE);
            self.anim.advance(1);
            if now_ms.saturating_sub(started) >= self.timers.recharge_ms {
                self.recharge_started_ms = None;
                self.ammo = self.max_ammo;
                log::debug!("Recharge complete");
            }
            return;
        }

        if intent.shoot {
            self.shooting = true;
        }

        let mut delta = Vec2::ZERO;
        if intent.up {
            delta.y -= self.speed;
        }
        if intent.down {
            delta.y += self.speed;
        }
        if intent.left {
            delta.x -= self.speed;
            self.facing = Facing::Left;
        }
        if intent.right {
            delta.x += self.speed;
            self.facing = Facing::Right;
        }
        let moving = intent.up || intent.down || intent.left || intent.right;

        // Diagonals are deliberately not normalized
        self.bounds.center += delta;
        self.bounds = self.bounds.clamped_within(&self.arena);

        if delta != Vec2::ZERO {
            self.last_direction = direction_or_zero(delta);
        }

        if self.shooting {
            if self.action != PlayerAction::Shooting {
                self.anim.restart(PLAYER_SHOT);
            }
            self.anim.advance(1);
            if self.anim.is_finished() {
                self.shooting = false;
            } else {
                self.action = PlayerAction::Shooting;
                return;
            }
        }

        if moving {
            self.action = PlayerAction::Walking;
            self.anim.play(PLAYER_WALK);
            self.anim.advance(1);
        } else {
            self.action = PlayerAction::Idle;
            self.anim.play(PLAYER_IDLE);
        }
    }

    fn update_flash(&mut self, now_ms: u64) {
        if !self.flash.active {
            return;
        }
        if now_ms.saturating_sub(self.flash.last_ms) > self.timers.flash_interval_ms {
            self.flash.cycle += 1;
            self.flash.active = self.flash.cycle < self.timers.flash_pairs * 2;
            self.flash.last_ms = now_ms;
        }
    }
}

impl Animated for Player {
    fn animation(&self) -> &AnimationState {
        &self.anim
    }

    fn facing(&self) -> Facing {
        self.facing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::animation::Sheet;

    fn player() -> Player {
        Player::new(&GameConfig::default())
    }

    fn held(up: bool, down: bool, left: bool, right: bool) -> MoveIntent {
        MoveIntent {
            up,
            down,
            left,
            right,
            shoot: false,
        }
    }

    #[test]
    fn test_spawns_centered_with_full_stats() {
        let p = player();
        assert_eq!(p.center(), Vec2::new(400.0, 300.0));
        assert_eq!(p.health, 100);
        assert_eq!(p.ammo, 10);
        assert_eq!(p.last_direction, Vec2::X);
        assert_eq!(p.action(), PlayerAction::Idle);
    }

    #[test]
    fn test_diagonal_is_unnormalized() {
        let mut p = player();
        p.update(&held(true, false, false, true), 16);
        assert_eq!(p.center(), Vec2::new(403.0, 297.0));
        let d = p.last_direction;
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert_eq!(p.action(), PlayerAction::Walking);
    }

    #[test]
    fn test_vertical_movement_keeps_facing() {
        let mut p = player();
        p.update(&held(false, false, true, false), 16);
        assert_eq!(p.facing, Facing::Left);
        p.update(&held(false, true, false, false), 33);
        assert_eq!(p.facing, Facing::Left);
        assert_eq!(p.last_direction, Vec2::Y);
    }

    #[test]
    fn test_idle_keeps_last_direction() {
        let mut p = player();
        p.update(&held(true, false, false, false), 16);
        p.update(&MoveIntent::default(), 33);
        assert_eq!(p.last_direction, Vec2::new(0.0, -1.0));
        assert_eq!(p.action(), PlayerAction::Idle);
        assert_eq!(p.current_frame_id().sheet, Sheet::SoldierWalk);
        assert_eq!(p.current_frame_id().index, 0);
    }

    #[test]
    fn test_clamped_to_arena() {
        let mut p = player();
        for i in 0..400 {
            p.update(&held(true, false, true, false), i * 16);
        }
        assert_eq!(p.bounds.min(), Vec2::ZERO);
    }

    #[test]
    fn test_shoot_drains_then_recharges() {
        let mut p = player();
        for _ in 0..10 {
            assert!(p.shoot(100));
        }
        assert!(!p.shoot(100));
        assert!(p.is_recharging());
        assert!(!p.can_shoot());

        p.update(&MoveIntent::default(), 600);
        assert_eq!(p.action(), PlayerAction::Recharging);
        assert_eq!(p.ammo, 0);

        p.update(&MoveIntent::default(), 1100);
        assert!(!p.is_recharging());
        assert_eq!(p.ammo, 10);
        assert!(p.shoot(1116));
    }

    #[test]
    fn test_recharge_suppresses_movement() {
        let mut p = player();
        for _ in 0..10 {
            p.shoot(0);
        }
        let start = p.center();
        p.update(&held(false, false, false, true), 16);
        assert_eq!(p.center(), start);
    }

    #[test]
    fn test_take_damage_respects_invulnerability() {
        let mut p = player();
        p.take_damage(1000);
        assert!(p.is_hurt());
        assert!(p.is_invulnerable(1500));
        assert!(p.is_invulnerable(2000));
        assert!(!p.is_invulnerable(2001));
        assert!(p.is_flash_tinted());
    }

    #[test]
    fn test_hurt_ends_before_invulnerability() {
        let mut p = player();
        p.take_damage(0);
        let mut now = 0;
        while p.is_hurt() {
            now += 16;
            p.update(&MoveIntent::default(), now);
        }
        assert!(now <= 500);
        assert!(p.is_invulnerable(now));
    }

    #[test]
    fn test_action_leaves_hurt_when_hurt_ends() {
        let mut p = player();
        p.take_damage(0);
        let mut now = 0;
        while p.is_hurt() {
            assert_eq!(p.action(), PlayerAction::Hurt);
            now += 16;
            p.update(&MoveIntent::default(), now);
        }
        assert_eq!(p.action(), PlayerAction::Idle);
        assert_eq!(p.current_frame_id().sheet, Sheet::SoldierWalk);
    }

    #[test]
    fn test_hurt_ends_into_recharge_when_out_of_ammo() {
        let mut p = player();
        for _ in 0..10 {
            p.shoot(0);
        }
        p.take_damage(0);
        let mut now = 0;
        while p.is_hurt() {
            now += 16;
            p.update(&MoveIntent::default(), now);
        }
        assert_eq!(p.action(), PlayerAction::Recharging);
    }

    #[test]
    fn test_hurt_suppresses_movement() {
        let mut p = player();
        p.take_damage(0);
        let start = p.center();
        p.update(&held(false, false, false, true), 16);
        assert_eq!(p.center(), start);
        assert_eq!(p.action(), PlayerAction::Hurt);
    }

    #[test]
    fn test_flash_runs_three_pairs() {
        let mut p = player();
        p.take_damage(0);
        let mut now = 0;
        let mut tinted_changes = 0;
        let mut was = p.is_flash_tinted();
        while now < 1000 {
            now += 101;
            p.update(&MoveIntent::default(), now);
            if p.is_flash_tinted() != was {
                tinted_changes += 1;
                was = p.is_flash_tinted();
            }
        }
        assert!(!p.is_flash_tinted());
        assert!(tinted_changes >= 5);
    }

    #[test]
    fn test_sing_cooldown() {
        let mut p = player();
        assert!(p.sing_attack(0));
        assert!(!p.sing_attack(1999));
        assert!(p.sing_attack(2000));
    }

    #[test]
    fn test_die_is_idempotent() {
        let mut p = player();
        p.die(500);
        p.die(900);
        assert_eq!(p.death_elapsed(2500), Some(2000));
        assert_eq!(p.action(), PlayerAction::Dead);
        p.take_damage(1000);
        assert!(!p.is_hurt());
    }

    #[test]
    fn test_death_animation_holds_last_frame() {
        let mut p = player();
        p.die(0);
        for i in 0..200 {
            p.update(&MoveIntent::default(), i * 16);
        }
        let id = p.current_frame_id();
        assert_eq!(id.sheet, Sheet::SoldierDead);
        assert_eq!(id.index, 3);
    }

    #[test]
    fn test_shot_animation_plays_once() {
        let mut p = player();
        p.begin_shot_animation();
        assert_eq!(p.action(), PlayerAction::Shooting);
        // 4 frames at 0.3 per tick: the cycle overruns on the 14th tick
        for i in 1..=13 {
            p.update(&MoveIntent::default(), i * 16);
            assert_eq!(p.action(), PlayerAction::Shooting);
        }
        p.update(&MoveIntent::default(), 14 * 16);
        assert_eq!(p.action(), PlayerAction::Idle);
    }
}
