//! Simulation engine - main entry point driving the tick loop.

use hecs::{Entity, World};

use crate::components::{Customer, CustomerState, Position};
use crate::config::SimConfig;
use crate::hud::{CustomerView, HudFrame, PatienceMood};
use crate::systems::{
    agents_system, service_system, spawner_system, MapDirector, MapOutcome, ServiceCounter,
    ServiceQueue, Spawner,
};

/// Notifications for the host, drained with [`SimulationEngine::take_events`].
/// Spawn/despawn hooks for visual entities hang off these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A new customer entered at the spawn point.
    CustomerSpawned(Entity),
    /// A customer ran out of patience and is storming off. Fired at most
    /// once per customer.
    CustomerLeftAngry(Entity),
    /// A customer was served and despawned; `reward` was credited.
    CustomerServed { customer: Entity, reward: i64 },
    /// A new day began (shop floor was cleared, scores kept).
    DayStarted(u32),
    /// The map ended; the engine has already restarted fresh.
    MapEnded(MapOutcome),
}

/// Main simulation engine: one shop, one counter, one map at a time.
pub struct SimulationEngine {
    /// ECS world containing all customers.
    pub world: World,
    /// Tunables for this match.
    pub config: SimConfig,
    /// FIFO line in front of the counter.
    pub queue: ServiceQueue,
    /// Single-server service context.
    pub counter: ServiceCounter,
    /// Scores, day counter, day clock.
    pub director: MapDirector,
    spawner: Spawner,
    sim_time: f64,
    hud: HudFrame,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let queue = ServiceQueue::new(&config);
        let mut engine = Self {
            world: World::new(),
            queue,
            counter: ServiceCounter::new(),
            director: MapDirector::new(),
            spawner: Spawner::new(),
            sim_time: 0.0,
            hud: HudFrame::default(),
            events: Vec::new(),
            config,
        };
        engine.push_hud();
        engine
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Fixed update order: spawner, customer agents, queue reflow for angry
    /// departures, service scheduler, map director, HUD. Non-positive or NaN
    /// `dt` advances nothing.
    pub fn update(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        self.sim_time += f64::from(dt);

        if let Some(customer) =
            spawner_system(&mut self.world, &mut self.queue, &mut self.spawner, &self.config, dt)
        {
            self.events.push(SimEvent::CustomerSpawned(customer));
        }

        let outcomes = agents_system(&mut self.world, &self.config, dt);
        // Angry customers drop out of the line before the scheduler looks at
        // the head, so one cannot be adopted on the tick it gives up.
        for &customer in &outcomes.angry {
            self.queue.remove(&mut self.world, customer);
            self.events.push(SimEvent::CustomerLeftAngry(customer));
        }

        if let Some(served) = service_system(
            &mut self.world,
            &mut self.queue,
            &mut self.counter,
            &self.config,
            dt,
        ) {
            self.director.player_money += served.reward;
            self.events.push(SimEvent::CustomerServed {
                customer: served.customer,
                reward: served.reward,
            });
        }

        if self.director.accrue(&self.config, dt) {
            self.next_day();
        }
        if let Some(outcome) = self.director.check_end(&self.config) {
            self.end_map(outcome);
        }

        self.push_hud();
    }

    /// Latest HUD snapshot, refreshed at the end of every tick.
    pub fn hud(&self) -> HudFrame {
        self.hud
    }

    /// Drain pending host notifications.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render data for every live customer.
    pub fn customer_views(&self) -> Vec<CustomerView> {
        self.world
            .query::<(&Customer, &Position, &CustomerState)>()
            .iter()
            .map(|(entity, (customer, pos, state))| {
                let ratio = state.patience_ratio(customer.patience);
                CustomerView {
                    customer: entity,
                    position: pos.0,
                    phase: state.phase,
                    patience_ratio: ratio,
                    mood: PatienceMood::from_ratio(ratio),
                }
            })
            .collect()
    }

    /// Count live customers.
    pub fn customer_count(&self) -> usize {
        self.world.query::<&Customer>().iter().count()
    }

    /// Seconds simulated since construction.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    fn next_day(&mut self) {
        self.director.next_day();
        self.clear_floor();
        log::info!("Day {}/{}", self.director.day, self.config.total_days);
        self.events.push(SimEvent::DayStarted(self.director.day));
    }

    fn end_map(&mut self, outcome: MapOutcome) {
        log::info!("{}", outcome.describe());
        self.director.reset();
        self.clear_floor();
        self.events.push(SimEvent::MapEnded(outcome));
    }

    /// Despawn every customer and reset queue, service context, and spawn
    /// timer. Scores and the day counter are untouched.
    fn clear_floor(&mut self) {
        let customers: Vec<Entity> = self
            .world
            .query::<&Customer>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for customer in customers {
            let _ = self.world.despawn(customer);
        }

        self.queue.clear();
        self.counter.reset();
        self.spawner.reset();
    }

    fn push_hud(&mut self) {
        self.hud = HudFrame {
            day: self.director.day,
            total_days: self.config.total_days,
            player_pct: self.director.player_pct(&self.config),
            opponent_pct: self.director.opponent_pct(&self.config),
            player_money: self.director.player_money,
            opponent_money: self.director.opponent_money.floor() as i64,
        };
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
