use crate::domain::play::{Candidate, PassDepth};
use crate::domain::recommendation::Disqualification;
use crate::domain::situation::GameSituation;
use crate::policy::HardConstraints;

/// First hard constraint `candidate` violates in `situation`, if any.
pub fn check(
    situation: &GameSituation,
    candidate: &Candidate,
    rules: &HardConstraints,
) -> Option<Disqualification> {
    if situation.yardline_100 <= rules.goal_line_yardline
        && situation.distance <= rules.goal_line_max_distance
        && candidate.is_pass()
        && matches!(candidate.pass_depth_bucket, PassDepth::Medium | PassDepth::Deep)
    {
        return Some(Disqualification::GoalLinePassDepth);
    }

    if is_two_minute_drill(situation, rules) {
        if situation.deficit() >= rules.two_minute_large_deficit
            && candidate.is_run()
            && situation.distance > rules.two_minute_run_max_distance
        {
            return Some(Disqualification::TwoMinuteRun);
        }

        if situation.time_remaining_seconds <= rules.chunk_needed_seconds
            && situation.distance >= rules.chunk_needed_distance
            && candidate.is_pass()
            && candidate.pass_depth_bucket == PassDepth::Short
        {
            return Some(Disqualification::TwoMinuteShortPass);
        }
    }

    None
}

pub fn is_two_minute_drill(situation: &GameSituation, rules: &HardConstraints) -> bool {
    rules.two_minute_quarters.contains(&situation.quarter)
        && situation.time_remaining_seconds <= rules.two_minute_seconds
        && situation.is_trailing()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::play::{Formation, PlayLocation, RunGap};
    use crate::domain::situation::fixtures::situation;

    fn pass(depth: PassDepth) -> Candidate {
        Candidate::pass(Formation::Shotgun, PlayLocation::Middle, depth)
    }

    fn run() -> Candidate {
        Candidate::run(Formation::UnderCenter, PlayLocation::Middle, RunGap::Guard, "D.Swift")
    }

    #[test]
    fn goal_line_rejects_medium_and_deep_passes() {
        let rules = HardConstraints::default();
        let s = situation(2, 3.0, 4, 2, 600, 0);
        assert_eq!(check(&s, &pass(PassDepth::Deep), &rules), Some(Disqualification::GoalLinePassDepth));
        assert_eq!(check(&s, &pass(PassDepth::Medium), &rules), Some(Disqualification::GoalLinePassDepth));
        assert_eq!(check(&s, &pass(PassDepth::Short), &rules), None);
        assert_eq!(check(&s, &run(), &rules), None);
    }

    #[test]
    fn goal_line_needs_both_field_position_and_distance() {
        let rules = HardConstraints::default();
        assert_eq!(check(&situation(1, 6.0, 5, 1, 600, 0), &pass(PassDepth::Deep), &rules), None);
        assert_eq!(check(&situation(1, 5.0, 6, 1, 600, 0), &pass(PassDepth::Deep), &rules), None);
    }

    #[test]
    fn two_minute_large_deficit_rejects_runs_beyond_short_yardage() {
        let rules = HardConstraints::default();
        let s = situation(1, 10.0, 60, 4, 110, -9);
        assert_eq!(check(&s, &run(), &rules), Some(Disqualification::TwoMinuteRun));

        let short_yardage = situation(3, 2.0, 60, 4, 110, -9);
        assert_eq!(check(&short_yardage, &run(), &rules), None);

        let one_score = situation(1, 10.0, 60, 4, 110, -8);
        assert_eq!(check(&one_score, &run(), &rules), None);
    }

    #[test]
    fn two_minute_chunk_need_rejects_short_passes() {
        let rules = HardConstraints::default();
        let s = situation(2, 10.0, 70, 2, 90, -1);
        assert_eq!(check(&s, &pass(PassDepth::Short), &rules), Some(Disqualification::TwoMinuteShortPass));
        assert_eq!(check(&s, &pass(PassDepth::Medium), &rules), None);

        let more_time = situation(2, 10.0, 70, 2, 91, -1);
        assert_eq!(check(&more_time, &pass(PassDepth::Short), &rules), None);
    }

    #[test]
    fn two_minute_rules_need_trailing_and_eligible_quarter() {
        let rules = HardConstraints::default();
        assert!(!is_two_minute_drill(&situation(1, 10.0, 60, 4, 60, 0), &rules));
        assert!(!is_two_minute_drill(&situation(1, 10.0, 60, 3, 60, -14), &rules));
        assert!(!is_two_minute_drill(&situation(1, 10.0, 60, 1, 60, -14), &rules));
        assert!(is_two_minute_drill(&situation(1, 10.0, 60, 5, 120, -3), &rules));
    }
}
