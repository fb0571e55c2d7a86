//! Spawner - timer-driven source of new customers.

use hecs::{Entity, World};

use crate::components::{Customer, CustomerState, Position};
use crate::config::SimConfig;
use crate::systems::ServiceQueue;

/// Accumulates time and emits one customer per interval at the spawn point.
#[derive(Debug, Default)]
pub struct Spawner {
    timer: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the interval timer (day rollover / map end).
    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}

/// Tick the spawn timer; on expiry spawn one customer and enqueue it, which
/// reflows the queue and hands the newcomer its slot target. A disabled
/// spawner is a no-op and the rest of the simulation runs on.
pub fn spawner_system(
    world: &mut World,
    queue: &mut ServiceQueue,
    spawner: &mut Spawner,
    cfg: &SimConfig,
    dt: f32,
) -> Option<Entity> {
    if !cfg.spawn_enabled {
        return None;
    }

    spawner.timer += dt;
    if spawner.timer < cfg.spawn_interval {
        return None;
    }
    spawner.timer = 0.0;

    let customer = world.spawn((
        Customer::from_config(cfg),
        Position(cfg.spawn_pos),
        CustomerState::new(cfg.spawn_pos, cfg.customer_patience, cfg.leave_x),
    ));
    queue.enqueue(world, customer);

    Some(customer)
}
