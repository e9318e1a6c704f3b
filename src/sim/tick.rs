//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Stage order
//! within a tick is fixed: intents, player, enemies, attacks, spawning,
//! combat (with the level-up check), then the level transition timer.

use super::collision::resolve_combat;
use super::player::MoveIntent;
use super::state::{GameState, SessionPhase};

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Shoot held
    pub shoot: bool,
    /// Sing attack pressed
    pub sing: bool,
    /// Skip to next level (debug/testing)
    pub skip_level: bool,
    /// Start a run from the menu
    pub start: bool,
    /// Restart after game over or completion
    pub restart: bool,
    /// Stop the loop immediately
    pub quit: bool,
}

impl TickInput {
    pub fn movement(&self) -> MoveIntent {
        MoveIntent {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            shoot: self.shoot,
        }
    }
}

/// Advance the session by one tick at clock reading `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if input.quit && state.phase != SessionPhase::Quit {
        state.phase = SessionPhase::Quit;
        log::info!("Quit requested");
        return;
    }

    match state.phase {
        SessionPhase::Quit => return,
        SessionPhase::Menu => {
            if input.start {
                state.start(now_ms);
            }
            return;
        }
        SessionPhase::Playing => {}
    }

    state.time_ticks += 1;
    state.now_ms = now_ms;

    if state.progress.is_terminal() && input.restart {
        state.start(now_ms);
        return;
    }

    let death_ms = state.config.timers.death_ms;
    state
        .progress
        .check_game_over(state.player.death_elapsed(now_ms), death_ms);

    let movement = input.movement();

    if state.is_simulating() {
        if input.sing {
            state.try_sing(now_ms);
        }
        if input.skip_level {
            state.skip_level(now_ms);
        }
        if input.shoot {
            state.try_shoot(now_ms);
        }
    }

    // Level skip may have started a transition
    if state.is_simulating() {
        state.player.update(&movement, now_ms);

        let target = state.player.center();
        for enemy in state.enemies.iter_mut() {
            enemy.update(target);
        }

        state.projectiles.retain_mut(|p| p.update(now_ms));
        state.pulses.retain_mut(|p| p.update(target));

        state.spawn_enemies(now_ms);
        resolve_combat(state, now_ms);
    } else if state.player.is_dead() {
        state.player.update(&movement, now_ms);
    }

    // Game over freezes the level where the run ended
    if !state.progress.game_over {
        state.advance_transition(now_ms);
    }
}
