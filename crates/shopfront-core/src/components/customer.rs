//! Customer components: per-instance tunables and the four-phase FSM state.

use serde::{Deserialize, Serialize};

use super::Vec2;
use crate::config::SimConfig;

/// Per-customer tunables, fixed at spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Customer {
    /// Walk speed, units per second.
    pub speed: f32,
    /// Seconds of waiting tolerated before leaving angry.
    pub patience: f32,
    /// Money credited to the player when served.
    pub reward: i64,
}

impl Customer {
    pub fn from_config(cfg: &SimConfig) -> Self {
        Self {
            speed: cfg.customer_speed,
            patience: cfg.customer_patience,
            reward: cfg.customer_reward,
        }
    }
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            speed: 120.0,
            patience: 6.0,
            reward: 10,
        }
    }
}

/// What a customer is currently doing. Leaving and Served are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Walking toward the current target (queue slot).
    Moving,
    /// At the slot, patience draining.
    Waiting,
    /// Storming off toward the screen edge; despawns past the exit line.
    Leaving,
    /// Service completed; despawns immediately.
    Served,
}

impl Phase {
    /// Terminal phases never transition again and ignore retargets.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Leaving | Phase::Served)
    }
}

/// Dynamic FSM state of one customer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CustomerState {
    pub phase: Phase,
    /// Where the customer is walking to (its queue slot while alive).
    pub target: Vec2,
    /// Seconds of patience remaining; drains only while Waiting.
    pub patience_left: f32,
    /// Off-screen point an angry customer runs to.
    pub leave_target: Vec2,
}

impl CustomerState {
    /// Fresh state at the spawn point. The first queue reflow retargets the
    /// customer to its slot.
    pub fn new(spawn_pos: Vec2, patience: f32, leave_x: f32) -> Self {
        Self {
            phase: Phase::Moving,
            target: spawn_pos,
            patience_left: patience,
            leave_target: Vec2::new(leave_x, spawn_pos.y),
        }
    }

    /// Retarget the customer (queue reflow). Ignored in terminal phases.
    pub fn set_target(&mut self, target: Vec2) {
        if self.phase.is_terminal() {
            return;
        }
        self.target = target;
        self.phase = Phase::Moving;
    }

    /// Waiting -> Leaving edge. Returns true only on the tick it actually
    /// fires, so the "left angry" notification goes out exactly once.
    pub fn become_angry(&mut self, pos: Vec2, leave_x: f32) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.patience_left = 0.0;
        self.leave_target = Vec2::new(leave_x, pos.y);
        self.phase = Phase::Leaving;
        true
    }

    /// Complete service. Returns false if the customer already left or was
    /// served (idempotent).
    pub fn serve(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = Phase::Served;
        true
    }

    /// Remaining patience as a 0..=1 ratio for the host's patience bar.
    /// Zero-or-negative total patience reports 0.
    pub fn patience_ratio(&self, patience: f32) -> f32 {
        if patience <= 0.0 {
            0.0
        } else {
            (self.patience_left / patience).clamp(0.0, 1.0)
        }
    }
}
