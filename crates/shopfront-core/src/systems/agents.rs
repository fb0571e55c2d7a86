//! Agent system - advances every customer's FSM by one tick.

use hecs::{Entity, World};

use crate::components::{Customer, CustomerState, Phase, Position};
use crate::config::SimConfig;

/// What happened to customers during one tick.
#[derive(Debug, Default)]
pub struct AgentOutcomes {
    /// Customers that hit zero patience this tick (Waiting -> Leaving edge).
    /// Each entity appears here at most once over its whole lifetime.
    pub angry: Vec<Entity>,
    /// Leaving customers that crossed the exit line and were despawned.
    pub departed: Vec<Entity>,
}

/// Tick all customers: walk movers, drain waiters, march leavers off-screen.
///
/// Arrival snaps the customer onto its slot and switches it to Waiting;
/// patience starts draining on the *next* tick, so a customer spawned with
/// zero patience still waits one tick before storming off.
pub fn agents_system(world: &mut World, cfg: &SimConfig, dt: f32) -> AgentOutcomes {
    let mut outcomes = AgentOutcomes::default();

    for (entity, (customer, pos, state)) in
        world.query_mut::<(&Customer, &mut Position, &mut CustomerState)>()
    {
        match state.phase {
            Phase::Moving => {
                pos.0 = pos.0.move_toward(state.target, customer.speed * dt);
                if pos.0.distance(&state.target) < cfg.arrival_epsilon {
                    pos.0 = state.target;
                    state.phase = Phase::Waiting;
                }
            }
            Phase::Waiting => {
                state.patience_left -= dt;
                if state.patience_left <= 0.0 && state.become_angry(pos.0, cfg.leave_x) {
                    outcomes.angry.push(entity);
                }
            }
            Phase::Leaving => {
                let step = customer.speed * cfg.leaving_speed_multiplier * dt;
                pos.0 = pos.0.move_toward(state.leave_target, step);
                if pos.0.x <= state.leave_target.x + cfg.leave_exit_epsilon {
                    outcomes.departed.push(entity);
                }
            }
            // Served customers are despawned by the scheduler on the same
            // tick; nothing to advance if one is still around.
            Phase::Served => {}
        }
    }

    for &entity in &outcomes.departed {
        let _ = world.despawn(entity);
    }

    outcomes
}
