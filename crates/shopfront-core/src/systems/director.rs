//! Map director - day progression, score tracking, and match outcome.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// How a map ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapOutcome {
    /// Player hit 100% of the money goal first.
    PlayerGoal,
    /// Opponent hit 100% first.
    OpponentGoal,
    /// Day limit reached, player ahead on percentage.
    PlayerByPercent,
    /// Day limit reached, opponent ahead on percentage.
    OpponentByPercent,
    /// Day limit reached with equal percentages.
    Tie,
}

impl MapOutcome {
    /// Narration line for the host's log channel.
    pub fn describe(&self) -> &'static str {
        match self {
            MapOutcome::PlayerGoal => "You hit 100% first: MAP WIN!",
            MapOutcome::OpponentGoal => "Opponent hit 100% first: MAP LOSS!",
            MapOutcome::PlayerByPercent => "Day limit reached: you win by %!",
            MapOutcome::OpponentByPercent => "Day limit reached: opponent wins by %!",
            MapOutcome::Tie => "Day limit reached: tie!",
        }
    }

    pub fn is_player_win(&self) -> bool {
        matches!(self, MapOutcome::PlayerGoal | MapOutcome::PlayerByPercent)
    }
}

/// Scores, day counter, and day clock for one map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDirector {
    /// Current day, 1-based.
    pub day: u32,
    /// Seconds into the current day.
    pub day_timer: f32,
    /// Player money across the whole map.
    pub player_money: i64,
    /// Opponent money across the whole map; accrues continuously, also
    /// through day rollovers.
    pub opponent_money: f64,
}

impl MapDirector {
    pub fn new() -> Self {
        Self {
            day: 1,
            day_timer: 0.0,
            player_money: 0,
            opponent_money: 0.0,
        }
    }

    /// Accrue opponent income and the day clock. Returns true when the
    /// current day just expired; the caller advances the day and resets the
    /// shop floor.
    pub fn accrue(&mut self, cfg: &SimConfig, dt: f32) -> bool {
        self.opponent_money += f64::from(dt) * f64::from(cfg.opponent_rate);
        self.day_timer += dt;

        if self.day_timer >= cfg.seconds_per_day {
            self.day_timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Advance the day counter. Scores persist across days.
    pub fn next_day(&mut self) {
        self.day += 1;
        self.day_timer = 0.0;
    }

    /// Player progress toward the money goal, clamped to 0..=100.
    pub fn player_pct(&self, cfg: &SimConfig) -> f32 {
        percent(self.player_money as f64, cfg.money_goal)
    }

    /// Opponent progress toward the money goal, clamped to 0..=100.
    pub fn opponent_pct(&self, cfg: &SimConfig) -> f32 {
        percent(self.opponent_money, cfg.money_goal)
    }

    /// Evaluate end conditions. The player-goal branch is checked first so a
    /// tick in which both sides cross 100% goes to the player.
    pub fn check_end(&self, cfg: &SimConfig) -> Option<MapOutcome> {
        let player = self.player_pct(cfg);
        let opponent = self.opponent_pct(cfg);

        if player >= 100.0 {
            return Some(MapOutcome::PlayerGoal);
        }
        if opponent >= 100.0 {
            return Some(MapOutcome::OpponentGoal);
        }

        if self.day > cfg.total_days {
            return Some(if player > opponent {
                MapOutcome::PlayerByPercent
            } else if opponent > player {
                MapOutcome::OpponentByPercent
            } else {
                MapOutcome::Tie
            });
        }

        None
    }

    /// Zero everything for a fresh map (auto-restart after `end_map`).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for MapDirector {
    fn default() -> Self {
        Self::new()
    }
}

fn percent(money: f64, goal: i64) -> f32 {
    if goal <= 0 {
        return 100.0;
    }
    ((money / goal as f64) * 100.0).clamp(0.0, 100.0) as f32
}
