//! Simulation configuration - every tunable the host can adjust.
//!
//! All values default to the shipped game balance. The record is plain serde
//! data so hosts and editors can load overrides from JSON without touching
//! engine code.

use serde::{Deserialize, Serialize};

use crate::components::Vec2;

/// Full set of tunables for one match. Passed to the engine at construction;
/// no global mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seconds between customer spawns.
    pub spawn_interval: f32,
    /// When false the spawner is a no-op and the rest of the sim runs on.
    pub spawn_enabled: bool,
    /// Where new customers appear.
    pub spawn_pos: Vec2,

    /// Walk speed of a customer, units per second.
    pub customer_speed: f32,
    /// Seconds a waiting customer tolerates before leaving angry.
    pub customer_patience: f32,
    /// Money credited to the player per served customer.
    pub customer_reward: i64,

    /// Position of the service counter (queue slot 0).
    pub counter_pos: Vec2,
    /// Seconds of work to serve one customer at server_speed 1.0.
    pub base_service_time: f32,
    /// Service rate multiplier: 0.5 slow, 1.0 normal, 2.0 fast.
    pub server_speed: f32,
    /// A customer must be this close to the counter before service starts.
    pub counter_arrival_epsilon: f32,

    /// Distance at which a moving customer counts as arrived at its slot.
    pub arrival_epsilon: f32,
    /// Vertical spacing between queue slots.
    pub slot_pitch: f32,
    /// Speed multiplier while storming off.
    pub leaving_speed_multiplier: f32,
    /// X coordinate angry customers run to (off-screen left).
    pub leave_x: f32,
    /// Distance past leave_x at which a leaving customer exits the sim.
    pub leave_exit_epsilon: f32,

    /// Length of one in-game day in seconds.
    pub seconds_per_day: f32,
    /// Day limit for the map.
    pub total_days: u32,
    /// Money total equal to 100% map progress.
    pub money_goal: i64,
    /// Opponent passive income, money per second.
    pub opponent_rate: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 1.2,
            spawn_enabled: true,
            spawn_pos: Vec2::new(100.0, 400.0),
            customer_speed: 120.0,
            customer_patience: 6.0,
            customer_reward: 10,
            counter_pos: Vec2::new(600.0, 200.0),
            base_service_time: 3.0,
            server_speed: 1.0,
            counter_arrival_epsilon: 5.0,
            arrival_epsilon: 2.0,
            slot_pitch: 40.0,
            leaving_speed_multiplier: 1.5,
            leave_x: -200.0,
            leave_exit_epsilon: 2.0,
            seconds_per_day: 45.0,
            total_days: 25,
            money_goal: 3000,
            opponent_rate: 8.0,
        }
    }
}
