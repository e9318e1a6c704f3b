//! Collision geometry and combat resolution
//!
//! Boxes are axis-aligned and stored by center. Combat runs once per tick in
//! a fixed order: player damage, projectile kills, pulse kills, then the
//! level-up check. Removals are marked during the passes and applied once
//! afterwards, so an enemy can only be killed (and counted) once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            center: min + size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half()
    }

    /// Interiors intersect; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Move the box so it lies entirely inside `outer` (centered on any axis where it cannot fit)
    pub fn clamped_within(&self, outer: &Rect) -> Rect {
        let half = self.half();
        let axis = |c: f32, h: f32, lo: f32, hi: f32, mid: f32| {
            if hi - lo <= 2.0 * h { mid } else { c.clamp(lo + h, hi - h) }
        };
        let (lo, hi) = (outer.min(), outer.max());
        Rect {
            center: Vec2::new(
                axis(self.center.x, half.x, lo.x, hi.x, outer.center.x),
                axis(self.center.y, half.y, lo.y, hi.y, outer.center.y),
            ),
            size: self.size,
        }
    }
}

/// What one combat pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Hits that actually reduced player health
    pub player_hits: u32,
    pub projectile_kills: u32,
    pub pulse_kills: u32,
}

impl CombatReport {
    pub fn kills(&self) -> u32 {
        self.projectile_kills + self.pulse_kills
    }
}

/// Run all combat passes for this tick
pub fn resolve_combat(state: &mut GameState, now_ms: u64) -> CombatReport {
    let mut report = CombatReport::default();
    let damage = state.config.enemy.hit_damage;

    // Player damage: each enemy in reach may land a hit unless the player is
    // already invulnerable from an earlier hit
    let player_center = state.player.center();
    for enemy in &state.enemies {
        if state.player.is_dead() {
            break;
        }
        if enemy.distance_to(player_center) > enemy.attack_damage_distance {
            continue;
        }
        if state.player.is_invulnerable(now_ms) {
            continue;
        }
        state.player.health = (state.player.health - damage).max(0);
        state.player.take_damage(now_ms);
        report.player_hits += 1;
        if state.player.health <= 0 {
            state.player.die(now_ms);
        }
    }

    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut projectile_spent = vec![false; state.projectiles.len()];

    // Projectile kills: one projectile takes at most one enemy
    for (pi, projectile) in state.projectiles.iter().enumerate() {
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !enemy_dead[*ei] && projectile.bounds.overlaps(&enemy.bounds))
            .map(|(ei, _)| ei);
        if let Some(ei) = hit {
            enemy_dead[ei] = true;
            projectile_spent[pi] = true;
            report.projectile_kills += 1;
        }
    }

    // Pulse kills: pulses are not consumed and may take several enemies
    for pulse in &state.pulses {
        for (ei, enemy) in state.enemies.iter().enumerate() {
            if !enemy_dead[ei] && pulse.overlaps(&enemy.bounds) {
                enemy_dead[ei] = true;
                report.pulse_kills += 1;
            }
        }
    }

    retain_unmarked(&mut state.enemies, &enemy_dead);
    retain_unmarked(&mut state.projectiles, &projectile_spent);

    if report.kills() > 0 {
        log::debug!(
            "Killed {} by projectile, {} by pulse",
            report.projectile_kills,
            report.pulse_kills
        );
    }
    state.progress.record_kills(report.kills());
    state.check_level_up(now_ms);

    report
}

/// Drop every element whose mark is set
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marked[idx];
        idx += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Enemy;
    use crate::sim::projectile::{Projectile, RadialPulse};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    /// Playing session with the player parked at the center and nothing else alive
    fn session() -> GameState {
        let mut state = GameState::new(1);
        state.start(0);
        state
    }

    fn add_enemy(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        let enemy = Enemy::new(id, pos, 1.0, &state.config);
        state.enemies.push(enemy);
    }

    fn add_projectile(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        let projectile = Projectile::new(id, pos, Vec2::X, 0, &state.config);
        state.projectiles.push(projectile);
    }

    #[test]
    fn test_rect_overlap_excludes_touching() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(9.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(0.0, 30.0, 10.0, 10.0)));
    }

    #[test]
    fn test_clamped_within() {
        let outer = Rect::from_min_size(Vec2::ZERO, Vec2::new(800.0, 600.0));
        let clamped = rect(-20.0, 700.0, 16.0, 16.0).clamped_within(&outer);
        assert_eq!(clamped.center, Vec2::new(8.0, 592.0));
        let huge = rect(0.0, 0.0, 900.0, 10.0).clamped_within(&outer);
        assert_eq!(huge.center.x, 400.0);
    }

    #[test]
    fn test_projectile_kills_one_enemy() {
        let mut state = session();
        add_enemy(&mut state, Vec2::new(100.0, 100.0));
        add_enemy(&mut state, Vec2::new(102.0, 100.0));
        add_projectile(&mut state, Vec2::new(101.0, 100.0));

        let report = resolve_combat(&mut state, 16);
        assert_eq!(report.projectile_kills, 1);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.progress.enemies_killed, 1);
    }

    #[test]
    fn test_two_projectiles_one_enemy_counts_once() {
        let mut state = session();
        add_enemy(&mut state, Vec2::new(100.0, 100.0));
        add_projectile(&mut state, Vec2::new(100.0, 100.0));
        add_projectile(&mut state, Vec2::new(101.0, 101.0));

        let report = resolve_combat(&mut state, 16);
        assert_eq!(report.kills(), 1);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.progress.enemies_killed, 1);
    }

    #[test]
    fn test_pulse_kills_many_and_persists() {
        let mut state = session();
        let center = state.player.center();
        for dx in [-60.0, 0.0, 60.0] {
            add_enemy(&mut state, center + Vec2::new(dx, 120.0));
        }
        add_enemy(&mut state, center + Vec2::new(0.0, -250.0));
        let id = state.next_entity_id();
        let mut pulse = RadialPulse::new(id, center, &state.config);
        pulse.radius = 150.0;
        state.pulses.push(pulse);

        let report = resolve_combat(&mut state, 16);
        assert_eq!(report.pulse_kills, 3);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.pulses.len(), 1);
    }

    #[test]
    fn test_pulse_kills_diagonal_enemy() {
        let mut state = session();
        let center = state.player.center();
        add_enemy(&mut state, center + Vec2::new(125.0, 125.0));
        let id = state.next_entity_id();
        let mut pulse = RadialPulse::new(id, center, &state.config);
        pulse.radius = 150.0;
        state.pulses.push(pulse);

        let report = resolve_combat(&mut state, 16);
        assert_eq!(report.pulse_kills, 1);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_adjacent_enemies_hit_once_per_window() {
        let mut state = session();
        let center = state.player.center();
        add_enemy(&mut state, center + Vec2::new(20.0, 0.0));
        add_enemy(&mut state, center + Vec2::new(-20.0, 0.0));

        let report = resolve_combat(&mut state, 100);
        assert_eq!(report.player_hits, 1);
        assert_eq!(state.player.health, 95);

        // Still inside the invulnerability window on later ticks
        for now in [500, 900, 1100] {
            resolve_combat(&mut state, now);
        }
        assert_eq!(state.player.health, 95);

        resolve_combat(&mut state, 1101);
        assert_eq!(state.player.health, 90);
    }

    #[test]
    fn test_out_of_reach_enemy_does_no_damage() {
        let mut state = session();
        let center = state.player.center();
        add_enemy(&mut state, center + Vec2::new(51.0, 0.0));
        resolve_combat(&mut state, 100);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_quota_kill_clears_field_same_tick() {
        let mut state = session();
        state.progress.enemies_killed = 24;
        add_enemy(&mut state, Vec2::new(100.0, 100.0));
        add_enemy(&mut state, Vec2::new(700.0, 500.0));
        add_projectile(&mut state, Vec2::new(100.0, 100.0));

        resolve_combat(&mut state, 16);
        assert_eq!(state.progress.enemies_killed, 25);
        assert!(state.progress.is_transitioning());
        assert!(state.enemies.is_empty());
    }
}
