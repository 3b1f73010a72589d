use crate::config::*;

/// Results of a roll call that indicate that the ayes won.
pub const SUCCESS_RESOLUTIONS: &[&str] = &[
    "Amendment Agreed to",
    "Amendment Germane",
    "Bill Passed",
    "Cloture Motion Agreed to",
    "Cloture on the Motion to Proceed Agreed to",
    "Concurrent Resolution Agreed to",
    "Conference Report Agreed to",
    "Decision of Chair Sustained",
    "Guilty",
    "Joint Resolution Passed",
    "Motion Agreed to",
    "Motion for Attendance Agreed to",
    "Motion to Adjourn Agreed to",
    "Motion to Proceed Agreed to",
    "Motion to Reconsider Agreed to",
    "Motion to Table Agreed to",
    "Motion to Table Motion to Recommit Agreed to",
    "Motion to Table Motion to Reconsider Agreed to",
    "Nomination Confirmed",
    "Point of Order Sustained",
    "Resolution Agreed to",
    "Resolution of Ratification Agreed to",
    "Veto Overridden",
];

/// Results of a roll call that indicate that the nays won.
pub const FAILURE_RESOLUTIONS: &[&str] = &[
    "Amendment Not Germane",
    "Amendment Rejected",
    "Bill Defeated",
    "Cloture Motion Rejected",
    "Cloture on the Motion to Proceed Rejected",
    "Concurrent Resolution Rejected",
    "Conference Report Rejected",
    "Decision of Chair Not Sustained",
    "Joint Resolution Defeated",
    "Motion Rejected",
    "Motion to Adjourn Rejected",
    "Motion to Discharge Rejected",
    "Motion to Postpone Rejected",
    "Motion to Proceed Rejected",
    "Motion to Recommit Rejected",
    "Motion to Refer Rejected",
    "Motion to Reconsider Rejected",
    "Motion to Table Failed",
    "Motion to Table Motion to Reconsider Rejected",
    "Nomination Rejected",
    "Not Guilty",
    "Objection Not Sustained",
    "Point of Order Not Sustained",
    "Point of Order Not Well Taken",
    "Resolution Rejected",
    "Resolution of Ratification Rejected",
    "Veto Sustained",
];

/// The placeholder used by the clerk for a result that has not been classified.
pub const PENDING_RESOLUTION: &str = "unknown";

/// Finds which side won, from the text of the result.
pub fn resolve(text: &str) -> Result<Outcome, AnalysisError> {
    if SUCCESS_RESOLUTIONS.iter().any(|s| *s == text) {
        Ok(Answer::Aye)
    } else if FAILURE_RESOLUTIONS.iter().any(|s| *s == text) {
        Ok(Answer::Nay)
    } else if text == PENDING_RESOLUTION {
        PendingResolutionSnafu { text }.fail()
    } else {
        UnrecognizedResolutionSnafu { text }.fail()
    }
}

/// The number of ayes required to carry the question against the given number of nays.
pub fn necessary_ayes(nays: u64, rule: MajorityRule) -> u64 {
    match rule {
        MajorityRule::Half => nays + 1,
        MajorityRule::TwoThirds => 2 * nays + 1,
        MajorityRule::ThreeFifths => 3 * nays / 2 + 1,
    }
}

/// The number of nays required to defeat the question against the given number of ayes.
pub fn necessary_nays(ayes: u64, rule: MajorityRule) -> u64 {
    match rule {
        MajorityRule::Half => ayes,
        MajorityRule::TwoThirds => ayes / 2,
        MajorityRule::ThreeFifths => 2 * ayes / 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabularies_are_disjoint() {
        for s in SUCCESS_RESOLUTIONS {
            assert!(!FAILURE_RESOLUTIONS.contains(s), "{} in both lists", s);
        }
    }

    #[test]
    fn resolve_known_texts() {
        assert_eq!(resolve("Bill Passed"), Ok(Answer::Aye));
        assert_eq!(resolve("Guilty"), Ok(Answer::Aye));
        assert_eq!(resolve("Not Guilty"), Ok(Answer::Nay));
        assert_eq!(resolve("Cloture Motion Rejected"), Ok(Answer::Nay));
    }

    #[test]
    fn resolve_pending_is_distinct() {
        assert_eq!(
            resolve("unknown"),
            Err(AnalysisError::PendingResolution {
                text: "unknown".to_string()
            })
        );
        assert_eq!(
            resolve("Bill Vetoed By Accident"),
            Err(AnalysisError::UnrecognizedResolution {
                text: "Bill Vetoed By Accident".to_string()
            })
        );
    }

    #[test]
    fn ayes_thresholds() {
        assert_eq!(necessary_ayes(10, MajorityRule::Half), 11);
        assert_eq!(necessary_ayes(10, MajorityRule::TwoThirds), 21);
        assert_eq!(necessary_ayes(9, MajorityRule::ThreeFifths), 14);
        assert_eq!(necessary_ayes(40, MajorityRule::ThreeFifths), 61);
        assert_eq!(necessary_ayes(0, MajorityRule::Half), 1);
    }

    #[test]
    fn nays_thresholds() {
        assert_eq!(necessary_nays(10, MajorityRule::Half), 10);
        assert_eq!(necessary_nays(11, MajorityRule::TwoThirds), 5);
        assert_eq!(necessary_nays(60, MajorityRule::ThreeFifths), 40);
        assert_eq!(necessary_nays(7, MajorityRule::ThreeFifths), 4);
    }

    #[test]
    fn majority_rule_parsing() {
        assert_eq!(MajorityRule::parse("3/5"), Ok(MajorityRule::ThreeFifths));
        assert_eq!("2/3".parse::<MajorityRule>(), Ok(MajorityRule::TwoThirds));
        assert_eq!(
            MajorityRule::parse("QUORUM"),
            Err(AnalysisError::UnknownMajorityRule {
                rule: "QUORUM".to_string()
            })
        );
        assert_eq!(MajorityRule::Half.to_string(), "1/2");
    }
}
