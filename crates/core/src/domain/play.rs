use crate::domain::situation::GameSituation;
use serde::{Deserialize, Serialize};

/// Ball-carrier value carried by pass candidates.
pub const NOT_RUN: &str = "not_run";

/// Predictor input columns, in the order [`FeatureRecord`] serializes them.
pub const FEATURE_COLUMNS: [&str; 18] = [
    "down",
    "ydstogo",
    "yardline_100",
    "game_seconds_remaining",
    "half_seconds_remaining",
    "score_differential",
    "posteam_timeouts_remaining",
    "defteam_timeouts_remaining",
    "no_huddle",
    "defteam",
    "posteam_type",
    "play_type",
    "run_location",
    "run_gap",
    "run_player",
    "pass_location",
    "pass_depth_bucket",
    "shotgun",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Run,
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayLocation {
    Left,
    Middle,
    Right,
    /// Not applicable to this play type.
    Unknown,
}

impl PlayLocation {
    pub const ALL: [PlayLocation; 3] = [PlayLocation::Left, PlayLocation::Middle, PlayLocation::Right];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunGap {
    Guard,
    Tackle,
    End,
    /// Not applicable to this play type.
    Unknown,
}

impl RunGap {
    pub const ALL: [RunGap; 3] = [RunGap::Guard, RunGap::Tackle, RunGap::End];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassDepth {
    Short,
    Medium,
    Deep,
    NotPass,
}

impl PassDepth {
    pub const ALL: [PassDepth; 3] = [PassDepth::Short, PassDepth::Medium, PassDepth::Deep];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formation {
    Shotgun,
    UnderCenter,
}

impl Formation {
    pub const ALL: [Formation; 2] = [Formation::Shotgun, Formation::UnderCenter];
}

/// One schematically distinct play. Every field is populated; fields that do not apply to the
/// play type hold their "not applicable" variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "type")]
    pub play_type: PlayType,
    pub run_location: PlayLocation,
    pub run_gap: RunGap,
    pub run_player: String,
    pub pass_location: PlayLocation,
    pub pass_depth_bucket: PassDepth,
    #[serde(rename = "shotgun")]
    pub formation: Formation,
}

impl Candidate {
    pub fn run(formation: Formation, location: PlayLocation, gap: RunGap, carrier: &str) -> Self {
        Self {
            play_type: PlayType::Run,
            run_location: location,
            run_gap: gap,
            run_player: carrier.to_string(),
            pass_location: PlayLocation::Unknown,
            pass_depth_bucket: PassDepth::NotPass,
            formation,
        }
    }

    pub fn pass(formation: Formation, location: PlayLocation, depth: PassDepth) -> Self {
        Self {
            play_type: PlayType::Pass,
            run_location: PlayLocation::Unknown,
            run_gap: RunGap::Unknown,
            run_player: NOT_RUN.to_string(),
            pass_location: location,
            pass_depth_bucket: depth,
            formation,
        }
    }

    pub fn is_run(&self) -> bool {
        self.play_type == PlayType::Run
    }

    pub fn is_pass(&self) -> bool {
        self.play_type == PlayType::Pass
    }

    /// Full predictor input for this play in `situation`.
    pub fn features(&self, situation: &GameSituation) -> FeatureRecord {
        FeatureRecord {
            down: situation.down,
            ydstogo: situation.distance,
            yardline_100: situation.yardline_100,
            game_seconds_remaining: situation.game_seconds_remaining(),
            half_seconds_remaining: situation.half_seconds_remaining(),
            score_differential: situation.score_difference,
            posteam_timeouts_remaining: situation.posteam_timeouts_remaining,
            defteam_timeouts_remaining: situation.defteam_timeouts_remaining,
            no_huddle: 0,
            defteam: situation.opponent.clone(),
            posteam_type: PosteamType::Home,
            play_type: self.play_type,
            run_location: self.run_location,
            run_gap: self.run_gap,
            run_player: self.run_player.clone(),
            pass_location: self.pass_location,
            pass_depth_bucket: self.pass_depth_bucket,
            shotgun: self.formation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosteamType {
    Home,
    Away,
}

/// Exact record handed to the predictors. Field names follow the training columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub down: u8,
    pub ydstogo: f64,
    pub yardline_100: u8,
    pub game_seconds_remaining: u32,
    pub half_seconds_remaining: u32,
    pub score_differential: i32,
    pub posteam_timeouts_remaining: u8,
    pub defteam_timeouts_remaining: u8,
    pub no_huddle: u8,
    pub defteam: String,
    pub posteam_type: PosteamType,
    pub play_type: PlayType,
    pub run_location: PlayLocation,
    pub run_gap: RunGap,
    pub run_player: String,
    pub pass_location: PlayLocation,
    pub pass_depth_bucket: PassDepth,
    pub shotgun: Formation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::situation::fixtures::situation;
    use serde_json::json;

    #[test]
    fn feature_record_matches_predictor_columns() {
        let s = situation(1, 10.0, 63, 3, 489, 0);
        let candidate = Candidate::run(Formation::Shotgun, PlayLocation::Left, RunGap::Guard, "D.Swift");
        let value = serde_json::to_value(candidate.features(&s)).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), FEATURE_COLUMNS.len());
        for column in FEATURE_COLUMNS {
            assert!(obj.contains_key(column), "missing predictor column {column}");
        }
    }

    #[test]
    fn run_features_carry_pass_sentinels() {
        let s = situation(1, 10.0, 63, 3, 489, 0);
        let candidate = Candidate::run(Formation::UnderCenter, PlayLocation::Right, RunGap::End, "K.Monangai");
        let value = serde_json::to_value(candidate.features(&s)).unwrap();

        assert_eq!(value["play_type"], json!("run"));
        assert_eq!(value["run_location"], json!("right"));
        assert_eq!(value["run_gap"], json!("end"));
        assert_eq!(value["run_player"], json!("K.Monangai"));
        assert_eq!(value["pass_location"], json!("unknown"));
        assert_eq!(value["pass_depth_bucket"], json!("not_pass"));
        assert_eq!(value["shotgun"], json!("under_center"));
        assert_eq!(value["game_seconds_remaining"], json!(489 + 900));
        assert_eq!(value["half_seconds_remaining"], json!(489 + 900));
        assert_eq!(value["defteam"], json!("GB"));
        assert_eq!(value["posteam_type"], json!("home"));
        assert_eq!(value["no_huddle"], json!(0));
    }

    #[test]
    fn pass_features_carry_run_sentinels() {
        let s = situation(2, 7.0, 40, 2, 100, -3);
        let candidate = Candidate::pass(Formation::Shotgun, PlayLocation::Middle, PassDepth::Deep);
        let value = serde_json::to_value(candidate.features(&s)).unwrap();

        assert_eq!(value["play_type"], json!("pass"));
        assert_eq!(value["run_location"], json!("unknown"));
        assert_eq!(value["run_gap"], json!("unknown"));
        assert_eq!(value["run_player"], json!(NOT_RUN));
        assert_eq!(value["pass_depth_bucket"], json!("deep"));
        assert_eq!(value["score_differential"], json!(-3));
    }

    #[test]
    fn candidate_serializes_with_wire_keys() {
        let candidate = Candidate::pass(Formation::Shotgun, PlayLocation::Left, PassDepth::Short);
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["type"], json!("pass"));
        assert_eq!(value["shotgun"], json!("shotgun"));
        assert!(value.get("play_type").is_none());
    }
}
