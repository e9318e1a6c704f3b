//! Infected Zone headless entry point
//!
//! Runs a seeded autopilot session through the fixed-step loop and prints the
//! final frame as JSON. Usage: `infected-zone [seed] [seconds]`.

use glam::Vec2;

use infected_zone::consts::TICK_MS;
use infected_zone::sim::{
    Clock, FixedStep, FrameSnapshot, GameState, ManualClock, SessionPhase, TickInput, tick,
};

/// Enemies within this distance count toward crowding
const CROWD_RADIUS: f32 = 150.0;
/// Sing when at least this many enemies are close
const CROWD_SIZE: usize = 3;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);
    let seconds = args.next().and_then(|s| s.parse().ok()).unwrap_or(120u64);
    log::info!("Infected Zone (headless) starting: seed {seed}, {seconds}s");

    let mut state = GameState::new(seed);
    let mut clock = ManualClock::new(0);
    let mut step = FixedStep::new(clock.now_ms());
    step.advance(clock.now_ms());

    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        clock.now_ms(),
    );

    // Feed the loop uneven frame times like a real display would
    let frame_ms = [16u64, 17, 17];
    let end_ms = seconds * 1000;
    let mut frame = 0usize;
    let mut last_report = 0u64;

    while clock.now_ms() < end_ms && state.phase != SessionPhase::Quit {
        clock.advance(frame_ms[frame % frame_ms.len()]);
        frame += 1;

        for now in step.advance(clock.now_ms()) {
            let input = autopilot(&state);
            tick(&mut state, &input, now);
        }

        if state.progress.is_terminal() {
            break;
        }
        if state.time_ticks - last_report >= (5000.0 / TICK_MS) as u64 {
            last_report = state.time_ticks;
            log::info!(
                "t={}ms level {} kills {}/{} health {} entities {}",
                state.now_ms,
                state.progress.level,
                state.progress.enemies_killed,
                state.progress.enemies_for_level,
                state.player.health,
                state.entities().count()
            );
        }
    }

    log::info!(
        "Finished after {} ticks: level {}, game over {}, complete {}",
        state.time_ticks,
        state.progress.level,
        state.progress.game_over,
        state.progress.is_complete()
    );

    match serde_json::to_string_pretty(&FrameSnapshot::capture(&state)) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

/// Steer toward the nearest enemy, keep shooting, sing when crowded
fn autopilot(state: &GameState) -> TickInput {
    let me = state.player.center();
    let nearest = state
        .enemies
        .iter()
        .map(|e| e.center())
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

    let mut input = TickInput {
        shoot: true,
        ..Default::default()
    };

    if let Some(target) = nearest {
        let to = target - me;
        // Aim by stepping toward the target, but back off when it is close
        let dir = if to.length() < 80.0 { -to } else { to };
        apply_direction(&mut input, dir);
    }

    let crowd = state
        .enemies
        .iter()
        .filter(|e| e.distance_to(me) < CROWD_RADIUS)
        .count();
    input.sing = crowd >= CROWD_SIZE;
    input
}

fn apply_direction(input: &mut TickInput, dir: Vec2) {
    const DEADZONE: f32 = 4.0;
    input.left = dir.x < -DEADZONE;
    input.right = dir.x > DEADZONE;
    input.up = dir.y < -DEADZONE;
    input.down = dir.y > DEADZONE;
}
