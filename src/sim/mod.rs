//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven by a millisecond clock reading per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity collection)
//! - No rendering, audio or input-backend dependencies

pub mod animation;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod progression;
pub mod projectile;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use animation::{Animated, AnimationState, Clip, Facing, FrameId, Sheet};
pub use clock::{Clock, FixedStep, ManualClock, SimClock};
pub use collision::{CombatReport, Rect, resolve_combat};
pub use enemy::{Enemy, EnemyAction};
pub use player::{MoveIntent, Player, PlayerAction};
pub use progression::{LevelProgress, LevelUp, Stage};
pub use projectile::{Projectile, RadialPulse, volley};
pub use snapshot::{FrameSnapshot, Hud};
pub use spawner::{Edge, Spawner, spawn_point};
pub use state::{EntityRef, GameState, SessionPhase};
pub use tick::{TickInput, tick};
