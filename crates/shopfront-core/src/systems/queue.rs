//! Service queue - FIFO line of customers in front of the counter.
//!
//! The queue holds non-owning entity handles. Customers can be despawned
//! out from under it (day rollover, leaving the screen); dead handles are
//! purged on the next reflow.

use hecs::{Entity, World};

use crate::components::{CustomerState, Vec2};
use crate::config::SimConfig;

/// Ordered line of customers, head at index 0. Slot `i` sits `i * slot_pitch`
/// below the counter.
#[derive(Debug)]
pub struct ServiceQueue {
    counter: Vec2,
    slot_pitch: f32,
    entries: Vec<Entity>,
}

impl ServiceQueue {
    pub fn new(cfg: &SimConfig) -> Self {
        Self {
            counter: cfg.counter_pos,
            slot_pitch: cfg.slot_pitch,
            entries: Vec::new(),
        }
    }

    /// Append a customer to the tail and reassign every slot target.
    pub fn enqueue(&mut self, world: &mut World, customer: Entity) {
        self.entries.push(customer);
        self.reflow(world);
    }

    /// Drop the first matching entry, compacting the line without reordering.
    pub fn remove(&mut self, world: &mut World, customer: Entity) {
        if let Some(index) = self.entries.iter().position(|&e| e == customer) {
            self.entries.remove(index);
        }
        self.reflow(world);
    }

    /// Purge dead handles, then point every surviving customer at its slot.
    /// Idempotent; terminal customers ignore the retarget.
    pub fn reflow(&mut self, world: &mut World) {
        self.entries.retain(|&e| world.contains(e));

        for (index, &entity) in self.entries.iter().enumerate() {
            if let Ok(mut state) = world.get::<&mut CustomerState>(entity) {
                state.set_target(self.slot_target(index));
            }
        }
    }

    /// Target position for queue slot `index`.
    pub fn slot_target(&self, index: usize) -> Vec2 {
        self.counter + Vec2::new(0.0, index as f32 * self.slot_pitch)
    }

    /// First customer in line, if any.
    pub fn head(&self) -> Option<Entity> {
        self.entries.first().copied()
    }

    pub fn entries(&self) -> &[Entity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everyone (day rollover / map end). Despawning the entities is
    /// the caller's job.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Customer, Phase, Position};

    fn spawn_customer(world: &mut World, cfg: &SimConfig) -> Entity {
        world.spawn((
            Customer::from_config(cfg),
            Position(cfg.spawn_pos),
            CustomerState::new(cfg.spawn_pos, cfg.customer_patience, cfg.leave_x),
        ))
    }

    #[test]
    fn test_slot_geometry() {
        let cfg = SimConfig::default();
        let mut world = World::new();
        let mut queue = ServiceQueue::new(&cfg);

        let customers: Vec<_> = (0..3).map(|_| spawn_customer(&mut world, &cfg)).collect();
        for &c in &customers {
            queue.enqueue(&mut world, c);
        }

        for (i, &c) in customers.iter().enumerate() {
            let state = world.get::<&CustomerState>(c).unwrap();
            assert_eq!(state.target, Vec2::new(600.0, 200.0 + i as f32 * 40.0));
        }
    }

    #[test]
    fn test_fifo_preserved_across_removal() {
        let cfg = SimConfig::default();
        let mut world = World::new();
        let mut queue = ServiceQueue::new(&cfg);

        let customers: Vec<_> = (0..4).map(|_| spawn_customer(&mut world, &cfg)).collect();
        for &c in &customers {
            queue.enqueue(&mut world, c);
        }

        // Remove the second in line; the rest shift down without reordering.
        queue.remove(&mut world, customers[1]);
        assert_eq!(queue.entries(), &[customers[0], customers[2], customers[3]]);
        assert_eq!(queue.head(), Some(customers[0]));

        let state = world.get::<&CustomerState>(customers[2]).unwrap();
        assert_eq!(state.target, queue.slot_target(1));
    }

    #[test]
    fn test_reflow_purges_dead_handles() {
        let cfg = SimConfig::default();
        let mut world = World::new();
        let mut queue = ServiceQueue::new(&cfg);

        let a = spawn_customer(&mut world, &cfg);
        let b = spawn_customer(&mut world, &cfg);
        queue.enqueue(&mut world, a);
        queue.enqueue(&mut world, b);

        // Host despawns `a` externally; reflow tolerates and purges it.
        world.despawn(a).unwrap();
        queue.reflow(&mut world);

        assert_eq!(queue.entries(), &[b]);
        let state = world.get::<&CustomerState>(b).unwrap();
        assert_eq!(state.target, queue.slot_target(0));
    }

    #[test]
    fn test_reflow_is_idempotent_and_skips_terminal() {
        let cfg = SimConfig::default();
        let mut world = World::new();
        let mut queue = ServiceQueue::new(&cfg);

        let a = spawn_customer(&mut world, &cfg);
        queue.enqueue(&mut world, a);

        world.get::<&mut CustomerState>(a).unwrap().phase = Phase::Leaving;
        let before = *world.get::<&CustomerState>(a).unwrap();

        queue.reflow(&mut world);
        queue.reflow(&mut world);

        let after = *world.get::<&CustomerState>(a).unwrap();
        assert_eq!(after.phase, Phase::Leaving);
        assert_eq!(after.target, before.target);
    }
}
