//! Sprite animation state machines
//!
//! Every animated entity owns an `AnimationState` playing one `Clip` at a
//! time. Progress is a fixed-point accumulator in thousandths of a frame, so
//! `floor(rate * ticks)` steps come out exact no matter how the ticks are
//! batched.

use serde::{Deserialize, Serialize};

/// Accumulator units per whole frame step
pub const STEP: u32 = 1000;

/// Sprite sheets the renderer must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sheet {
    SoldierWalk,
    SoldierShot,
    SoldierHurt,
    SoldierRecharge,
    SoldierDead,
    ZombieWalk,
    ZombieAttack,
}

/// Horizontal facing; `Left` selects the mirrored frame set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal offset (zero keeps facing right)
    pub fn toward(dx: f32) -> Self {
        if dx < 0.0 { Facing::Left } else { Facing::Right }
    }

    pub fn is_left(self) -> bool {
        self == Facing::Left
    }
}

/// What happens when a clip steps past its last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Playback {
    /// Wrap back to frame 0
    Loop,
    /// Hold the last frame and report completion
    Once,
}

/// A named strip of frames on one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub sheet: Sheet,
    pub frames: u8,
    /// Accumulator gain per tick, in thousandths of a frame
    pub rate: u32,
    pub playback: Playback,
}

impl Clip {
    pub const fn new(sheet: Sheet, frames: u8, rate: u32, playback: Playback) -> Self {
        Self {
            sheet,
            frames,
            rate,
            playback,
        }
    }
}

// Soldier
pub const PLAYER_IDLE: Clip = Clip::new(Sheet::SoldierWalk, 1, 0, Playback::Loop);
pub const PLAYER_WALK: Clip = Clip::new(Sheet::SoldierWalk, 7, 200, Playback::Loop);
pub const PLAYER_SHOT: Clip = Clip::new(Sheet::SoldierShot, 4, 300, Playback::Once);
pub const PLAYER_HURT: Clip = Clip::new(Sheet::SoldierHurt, 3, 200, Playback::Once);
pub const PLAYER_RECHARGE: Clip = Clip::new(Sheet::SoldierRecharge, 13, 200, Playback::Loop);
pub const PLAYER_DEATH: Clip = Clip::new(Sheet::SoldierDead, 4, 150, Playback::Once);

// Zombie
pub const ENEMY_WALK: Clip = Clip::new(Sheet::ZombieWalk, 8, 150, Playback::Loop);
pub const ENEMY_ATTACK: Clip = Clip::new(Sheet::ZombieAttack, 5, 150, Playback::Loop);

/// Opaque frame handle consumed by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId {
    pub sheet: Sheet,
    pub index: u8,
    pub mirrored: bool,
}

/// Playback position within the current clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationState {
    clip: Clip,
    frame: u8,
    progress: u32,
    finished: bool,
}

impl AnimationState {
    pub fn new(clip: Clip) -> Self {
        Self {
            clip,
            frame: 0,
            progress: 0,
            finished: false,
        }
    }

    /// Switch to `clip`, resetting only if it differs from the current one
    pub fn play(&mut self, clip: Clip) {
        if self.clip != clip {
            self.restart(clip);
        }
    }

    /// Switch to `clip` from its first frame
    pub fn restart(&mut self, clip: Clip) {
        *self = Self::new(clip);
    }

    /// Advance by `ticks` simulation ticks
    pub fn advance(&mut self, ticks: u32) {
        let total = self.progress + self.clip.rate * ticks;
        let steps = total / STEP;
        self.progress = total % STEP;
        if steps == 0 {
            return;
        }

        let frames = u32::from(self.clip.frames.max(1));
        let frame = u32::from(self.frame);
        match self.clip.playback {
            Playback::Loop => {
                self.frame = ((frame + steps) % frames) as u8;
            }
            Playback::Once => {
                if frame + steps >= frames {
                    self.frame = (frames - 1) as u8;
                    self.finished = true;
                } else {
                    self.frame = (frame + steps) as u8;
                }
            }
        }
    }

    pub fn clip(&self) -> Clip {
        self.clip
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    /// Fractional progress toward the next step, in thousandths
    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// A one-shot clip tried to step past its last frame
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn frame_id(&self, facing: Facing) -> FrameId {
        FrameId {
            sheet: self.clip.sheet,
            index: self.frame,
            mirrored: facing.is_left(),
        }
    }
}

/// Anything that plays a clip and can be drawn facing left or right
pub trait Animated {
    fn animation(&self) -> &AnimationState;

    fn facing(&self) -> Facing;

    fn current_frame_id(&self) -> FrameId {
        self.animation().frame_id(self.facing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_walk_steps_every_five_ticks() {
        let mut anim = AnimationState::new(PLAYER_WALK);
        anim.advance(4);
        assert_eq!(anim.frame(), 0);
        anim.advance(1);
        assert_eq!(anim.frame(), 1);
        assert_eq!(anim.progress(), 0);
    }

    #[test]
    fn test_loop_wraps() {
        let mut anim = AnimationState::new(ENEMY_ATTACK);
        // 0.15 per tick: 34 ticks = 5.1 steps
        for _ in 0..34 {
            anim.advance(1);
        }
        assert_eq!(anim.frame(), 0);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_once_clamps_and_finishes() {
        let mut anim = AnimationState::new(PLAYER_HURT);
        anim.advance(10);
        assert_eq!(anim.frame(), 2);
        assert!(!anim.is_finished());
        anim.advance(5);
        assert_eq!(anim.frame(), 2);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_play_same_clip_keeps_position() {
        let mut anim = AnimationState::new(PLAYER_WALK);
        anim.advance(12);
        anim.play(PLAYER_WALK);
        assert_eq!(anim.frame(), 2);
        anim.play(PLAYER_SHOT);
        assert_eq!(anim.frame(), 0);
        assert_eq!(anim.progress(), 0);
    }

    #[test]
    fn test_frame_id_mirrors_left() {
        let anim = AnimationState::new(ENEMY_WALK);
        let id = anim.frame_id(Facing::Left);
        assert_eq!(id.sheet, Sheet::ZombieWalk);
        assert!(id.mirrored);
        assert!(!anim.frame_id(Facing::Right).mirrored);
    }

    proptest! {
        #[test]
        fn prop_loop_matches_floor(ticks in 0u32..5000) {
            let mut anim = AnimationState::new(PLAYER_RECHARGE);
            for _ in 0..ticks {
                anim.advance(1);
            }
            let steps = PLAYER_RECHARGE.rate * ticks / STEP;
            prop_assert_eq!(u32::from(anim.frame()), steps % 13);
        }

        #[test]
        fn prop_once_clamps_at_last(ticks in 0u32..200) {
            let mut anim = AnimationState::new(PLAYER_DEATH);
            anim.advance(ticks);
            let steps = PLAYER_DEATH.rate * ticks / STEP;
            prop_assert_eq!(u32::from(anim.frame()), steps.min(3));
        }

        #[test]
        fn prop_batched_equals_stepwise(a in 0u32..100, b in 0u32..100) {
            let mut batched = AnimationState::new(ENEMY_WALK);
            batched.advance(a);
            batched.advance(b);
            let mut single = AnimationState::new(ENEMY_WALK);
            single.advance(a + b);
            prop_assert_eq!(batched, single);
        }
    }
}
