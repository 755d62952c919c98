//! Demo player: jumps when the next obstacle gets close
//!
//! Used by the headless native build; it plays well at base speed and starts
//! missing once the scroll speed approaches the maximum.

use super::state::GameState;

/// Decide whether to press the input button this frame
pub fn wants_jump(state: &GameState) -> bool {
    if !state.is_running() || state.actor.airborne {
        return false;
    }

    let actor_front = state.actor.pos.x + state.actor.size.x;
    // Time to apex is jump_velocity / gravity frames; take off that many
    // frames of travel ahead of the obstacle, scaled down a little
    let frames_to_apex = state.config.jump_velocity / state.config.gravity.max(f32::EPSILON);
    let lead = state.speed * frames_to_apex * 0.6;

    state
        .obstacles()
        .iter()
        .filter(|o| o.pos.x + o.size.x > state.actor.pos.x)
        .map(|o| o.pos.x - actor_front)
        .any(|gap| gap >= 0.0 && gap <= lead)
}
