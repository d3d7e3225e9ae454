use crate::time::clock;
use serde::{Deserialize, Serialize};

/// Normalized, validated game state for one recommendation request.
///
/// Built through [`crate::domain::contract::SituationRequest::validate_and_into_situation`], which
/// enforces the field ranges documented below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSituation {
    /// 1..=4
    pub down: u8,
    /// Yards to go, never negative.
    pub distance: f64,
    /// Yards from the opponent goal line, 0..=100.
    pub yardline_100: u8,
    /// 1..=4, 5 is overtime.
    pub quarter: u8,
    pub time_remaining_seconds: u32,
    /// Offense score minus defense score.
    pub score_difference: i32,
    pub posteam_timeouts_remaining: u8,
    pub defteam_timeouts_remaining: u8,
    pub opponent: String,
}

impl GameSituation {
    pub fn game_seconds_remaining(&self) -> u32 {
        clock::game_seconds_remaining(self.quarter, self.time_remaining_seconds)
    }

    pub fn half_seconds_remaining(&self) -> u32 {
        clock::half_seconds_remaining(self.quarter, self.time_remaining_seconds)
    }

    pub fn is_overtime(&self) -> bool {
        self.quarter == 5
    }

    pub fn is_leading(&self) -> bool {
        self.score_difference > 0
    }

    pub fn is_trailing(&self) -> bool {
        self.score_difference < 0
    }

    pub fn deficit(&self) -> u32 {
        if self.is_trailing() {
            self.score_difference.unsigned_abs()
        } else {
            0
        }
    }

    /// Fourth quarter with at most `seconds` on the clock, or any point in overtime.
    pub fn is_late(&self, seconds: u32) -> bool {
        (self.quarter == 4 && self.time_remaining_seconds <= seconds) || self.is_overtime()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::GameSituation;

    pub fn situation(
        down: u8,
        distance: f64,
        yardline_100: u8,
        quarter: u8,
        time_remaining_seconds: u32,
        score_difference: i32,
    ) -> GameSituation {
        GameSituation {
            down,
            distance,
            yardline_100,
            quarter,
            time_remaining_seconds,
            score_difference,
            posteam_timeouts_remaining: 3,
            defteam_timeouts_remaining: 3,
            opponent: "GB".to_string(),
        }
    }
}
