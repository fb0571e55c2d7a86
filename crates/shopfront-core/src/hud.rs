//! HUD data - per-tick snapshot the host renders.
//!
//! The core publishes numbers only; bar drawing, labels, and colors are the
//! host's business. Mood bands mirror the patience bar color thresholds of
//! the shipped game (green above 60%, yellow above 30%, red below).

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::components::{Phase, Vec2};

/// Match-level HUD values, refreshed at the end of every tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HudFrame {
    pub day: u32,
    pub total_days: u32,
    /// Player progress toward the money goal, 0..=100.
    pub player_pct: f32,
    /// Opponent progress toward the money goal, 0..=100.
    pub opponent_pct: f32,
    pub player_money: i64,
    /// Opponent money floored to whole units for display.
    pub opponent_money: i64,
}

/// Color band for the patience bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatienceMood {
    /// More than 60% patience left.
    Calm,
    /// 30%..60% left.
    Annoyed,
    /// Under 30%; about to storm off.
    Furious,
}

impl PatienceMood {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio > 0.6 {
            PatienceMood::Calm
        } else if ratio > 0.3 {
            PatienceMood::Annoyed
        } else {
            PatienceMood::Furious
        }
    }
}

/// Everything the host needs to draw one customer: sprite position, phase
/// (Leaving bodies render red), and the patience bar fill.
#[derive(Debug, Clone, Copy)]
pub struct CustomerView {
    pub customer: Entity,
    pub position: Vec2,
    pub phase: Phase,
    /// Remaining patience as 0..=1; 0 when the customer has none to begin
    /// with.
    pub patience_ratio: f32,
    pub mood: PatienceMood,
}
