//! Zombie pursuit
//!
//! Each enemy walks straight at the player and switches to its attack loop
//! whenever it is within reach. The choice is re-made every tick from the
//! current distance alone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationState, Animated, ENEMY_ATTACK, ENEMY_WALK, Facing};
use super::collision::Rect;
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyAction {
    Walking,
    Attacking,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub bounds: Rect,
    pub facing: Facing,
    pub action: EnemyAction,
    /// Units per tick, fixed by the level it spawned in
    pub speed: f32,
    /// Distance at which the attack animation plays
    pub attack_animation_distance: f32,
    /// Distance at which contact hurts the player
    pub attack_damage_distance: f32,
    anim: AnimationState,
}

impl Enemy {
    pub fn new(id: u32, center: Vec2, speed: f32, config: &GameConfig) -> Self {
        let (w, h) = config.enemy.box_size;
        Self {
            id,
            bounds: Rect::new(center, Vec2::new(w, h)),
            facing: Facing::Right,
            action: EnemyAction::Walking,
            speed,
            attack_animation_distance: config.enemy.attack_animation_distance,
            attack_damage_distance: config.enemy.attack_damage_distance,
            anim: AnimationState::new(ENEMY_WALK),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center
    }

    /// Advance one tick toward `target` (the player's center)
    pub fn update(&mut self, target: Vec2) {
        let offset = target - self.bounds.center;
        let dist = offset.length();

        self.action = if dist <= self.attack_animation_distance {
            EnemyAction::Attacking
        } else {
            EnemyAction::Walking
        };

        // Standing exactly on the player: nothing to steer toward
        if dist == 0.0 {
            return;
        }

        match self.action {
            EnemyAction::Walking => {
                self.bounds.center += offset / dist * self.speed;
                self.anim.play(ENEMY_WALK);
            }
            EnemyAction::Attacking => {
                self.anim.play(ENEMY_ATTACK);
            }
        }
        self.anim.advance(1);
        self.facing = Facing::toward(offset.x);
    }

    /// Straight-line distance between centers
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.bounds.center.distance(point)
    }
}

impl Animated for Enemy {
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

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(1, Vec2::new(x, y), 2.0, &GameConfig::default())
    }

    #[test]
    fn test_walks_toward_target() {
        let mut e = enemy_at(0.0, 0.0);
        e.update(Vec2::new(300.0, 400.0));
        assert_eq!(e.action, EnemyAction::Walking);
        assert!((e.center() - Vec2::new(1.2, 1.6)).length() < 1e-5);
        assert_eq!(e.facing, Facing::Right);
    }

    #[test]
    fn test_attacks_in_range_without_moving() {
        let mut e = enemy_at(100.0, 100.0);
        e.update(Vec2::new(60.0, 100.0));
        assert_eq!(e.action, EnemyAction::Attacking);
        assert_eq!(e.center(), Vec2::new(100.0, 100.0));
        assert_eq!(e.facing, Facing::Left);
        assert_eq!(e.current_frame_id().sheet, Sheet::ZombieAttack);
    }

    #[test]
    fn test_switches_back_to_walking_without_latching() {
        let mut e = enemy_at(100.0, 100.0);
        e.update(Vec2::new(140.0, 100.0));
        assert_eq!(e.action, EnemyAction::Attacking);
        e.update(Vec2::new(151.0, 100.0));
        assert_eq!(e.action, EnemyAction::Walking);
        assert_eq!(e.current_frame_id().sheet, Sheet::ZombieWalk);
        assert_eq!(e.current_frame_id().index, 0);
    }

    #[test]
    fn test_walk_loop_has_eight_frames() {
        let mut e = enemy_at(-5000.0, 0.0);
        // 0.15 per tick: 60 ticks = 9 steps, wraps once
        for _ in 0..60 {
            e.update(Vec2::new(5000.0, 0.0));
        }
        assert_eq!(e.current_frame_id().index, 1);
    }

    #[test]
    fn test_zero_distance_is_stable() {
        let mut e = enemy_at(10.0, 10.0);
        e.update(Vec2::new(10.0, 10.0));
        assert_eq!(e.center(), Vec2::new(10.0, 10.0));
        assert_eq!(e.action, EnemyAction::Attacking);
    }
}
