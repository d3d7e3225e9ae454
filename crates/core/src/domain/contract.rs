use crate::domain::situation::GameSituation;
use crate::time::clock;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUTS: i32 = 3;

fn default_timeouts() -> i32 {
    DEFAULT_TIMEOUTS
}

/// Inbound situation as sent by the request layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SituationRequest {
    pub down: i32,
    pub distance: i32,
    pub field_position: i32,
    pub quarter: i32,
    /// `MM:SS`
    pub time_remaining: String,
    pub score_difference: i32,
    pub opponent: String,
    #[serde(rename = "posteam_timeouts_remaining", default = "default_timeouts")]
    pub posteam_timeouts_remaining: i32,
    #[serde(rename = "defteam_timeouts_remaining", default = "default_timeouts")]
    pub defteam_timeouts_remaining: i32,
}

impl SituationRequest {
    /// Checks field ranges and converts into a [`GameSituation`].
    ///
    /// The clock is the one lenient field: a malformed `time_remaining` becomes 0 seconds.
    pub fn validate_and_into_situation(self) -> anyhow::Result<GameSituation> {
        ensure!((1..=4).contains(&self.down), "down must be 1..=4 (got {})", self.down);
        ensure!(
            self.distance >= 0,
            "distance must be non-negative (got {})",
            self.distance
        );
        ensure!(
            (0..=100).contains(&self.field_position),
            "fieldPosition must be 0..=100 (got {})",
            self.field_position
        );
        ensure!(
            (1..=5).contains(&self.quarter),
            "quarter must be 1..=5 (got {})",
            self.quarter
        );
        ensure!(
            (0..=3).contains(&self.posteam_timeouts_remaining),
            "posteam_timeouts_remaining must be 0..=3 (got {})",
            self.posteam_timeouts_remaining
        );
        ensure!(
            (0..=3).contains(&self.defteam_timeouts_remaining),
            "defteam_timeouts_remaining must be 0..=3 (got {})",
            self.defteam_timeouts_remaining
        );

        let opponent = self.opponent.trim().to_string();
        ensure!(!opponent.is_empty(), "opponent must be non-empty");

        Ok(GameSituation {
            down: self.down as u8,
            distance: f64::from(self.distance),
            yardline_100: self.field_position as u8,
            quarter: self.quarter as u8,
            time_remaining_seconds: clock::clock_seconds_or_zero(&self.time_remaining),
            score_difference: self.score_difference,
            posteam_timeouts_remaining: self.posteam_timeouts_remaining as u8,
            defteam_timeouts_remaining: self.defteam_timeouts_remaining as u8,
            opponent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::play::{Candidate, Formation, PassDepth, PlayLocation};
    use serde_json::json;

    fn request(v: serde_json::Value) -> SituationRequest {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn decodes_camel_case_and_defaults_timeouts() {
        let req = request(json!({
            "down": 1,
            "distance": 10,
            "fieldPosition": 63,
            "quarter": 3,
            "timeRemaining": "08:09",
            "scoreDifference": 0,
            "opponent": "GB",
        }));
        assert_eq!(req.posteam_timeouts_remaining, 3);
        assert_eq!(req.defteam_timeouts_remaining, 3);

        let situation = req.validate_and_into_situation().unwrap();
        assert_eq!(situation.down, 1);
        assert_eq!(situation.distance, 10.0);
        assert_eq!(situation.yardline_100, 63);
        assert_eq!(situation.time_remaining_seconds, 489);
        assert_eq!(situation.opponent, "GB");
    }

    #[test]
    fn keeps_explicit_timeouts() {
        let req = request(json!({
            "down": 2,
            "distance": 4,
            "fieldPosition": 30,
            "quarter": 4,
            "timeRemaining": "01:30",
            "scoreDifference": -4,
            "opponent": "DET",
            "posteam_timeouts_remaining": 1,
            "defteam_timeouts_remaining": 0,
        }));
        let situation = req.validate_and_into_situation().unwrap();
        assert_eq!(situation.posteam_timeouts_remaining, 1);
        assert_eq!(situation.defteam_timeouts_remaining, 0);
    }

    #[test]
    fn malformed_clock_is_not_an_error() {
        let req = request(json!({
            "down": 3,
            "distance": 6,
            "fieldPosition": 35,
            "quarter": 3,
            "timeRemaining": "soon",
            "scoreDifference": -3,
            "opponent": "MIN",
        }));
        let situation = req.validate_and_into_situation().unwrap();
        assert_eq!(situation.time_remaining_seconds, 0);
    }

    #[test]
    fn oversized_clock_degrades_to_zero_and_builds_features() {
        let req = request(json!({
            "down": 1,
            "distance": 10,
            "fieldPosition": 75,
            "quarter": 1,
            "timeRemaining": "71582788:00",
            "scoreDifference": 0,
            "opponent": "CHI",
        }));
        let situation = req.validate_and_into_situation().unwrap();
        assert_eq!(situation.time_remaining_seconds, 0);

        let candidate = Candidate::pass(Formation::Shotgun, PlayLocation::Left, PassDepth::Short);
        let features = candidate.features(&situation);
        assert_eq!(features.game_seconds_remaining, 2700);
        assert_eq!(features.half_seconds_remaining, 900);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let base = json!({
            "down": 1,
            "distance": 10,
            "fieldPosition": 63,
            "quarter": 3,
            "timeRemaining": "08:09",
            "scoreDifference": 0,
            "opponent": "GB",
        });

        for (key, value) in [
            ("down", json!(5)),
            ("down", json!(0)),
            ("fieldPosition", json!(101)),
            ("quarter", json!(6)),
            ("distance", json!(-1)),
            ("opponent", json!("  ")),
            ("posteam_timeouts_remaining", json!(4)),
        ] {
            let mut v = base.clone();
            v[key] = value;
            assert!(
                request(v).validate_and_into_situation().is_err(),
                "expected {key} to be rejected"
            );
        }
    }
}
