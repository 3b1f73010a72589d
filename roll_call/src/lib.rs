mod config;
mod directory;
mod report;
mod resolution;

pub mod builder;
pub mod manual;

use log::debug;

use std::collections::BTreeMap;

pub use crate::config::*;
pub use crate::directory::*;
pub use crate::report::*;
pub use crate::resolution::*;

/// One recorded vote of the chamber.
///
/// A roll call is classified once when it is built: the party breakdown is
/// computed, then every ballot is flagged as betrayed, futile or neither.
/// It does not change afterwards.
#[derive(PartialEq, Debug, Clone)]
pub struct RollCall {
    id: String,
    requires: MajorityRule,
    resolution: String,
    outcome: Outcome,
    ballots: Vec<Ballot>,
    breakdown: PartyBreakdown,
}

impl RollCall {
    /// Builds and classifies a roll call.
    ///
    /// Arguments:
    /// * `id` the unique identifier of the roll call
    /// * `requires` the majority needed for the ayes to win
    /// * `resolution` the result, as written by the clerk
    /// * `ballots` the ayes and nays. Abstentions must already be removed.
    pub fn new(
        id: &str,
        requires: MajorityRule,
        resolution: &str,
        ballots: Vec<BallotRecord>,
    ) -> Result<RollCall, AnalysisError> {
        if ballots.is_empty() {
            return MalformedRollCallSnafu { roll_call_id: id }.fail();
        }
        let outcome = resolve(resolution)?;
        let breakdown = party_breakdown(&ballots);
        let ballots: Vec<Ballot> = ballots
            .into_iter()
            .map(|b| classify_ballot(b, outcome, &breakdown))
            .collect();
        debug!(
            "RollCall::new: {} outcome: {} ballots: {} breakdown: {:?}",
            id,
            outcome,
            ballots.len(),
            breakdown
        );
        Ok(RollCall {
            id: id.to_string(),
            requires,
            resolution: resolution.to_string(),
            outcome,
            ballots,
            breakdown,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn requires(&self) -> MajorityRule {
        self.requires
    }

    pub fn resolution(&self) -> &str {
        &self.resolution
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn breakdown(&self) -> &PartyBreakdown {
        &self.breakdown
    }

    /// Whether the majority of the ballots of this party were on the winning side.
    /// A party that did not vote never prevails.
    pub fn party_prevailed(&self, party: &str) -> bool {
        party_prevailed(&self.breakdown, party, self.outcome)
    }

    pub fn aye_count(&self) -> u64 {
        self.count_answers(Answer::Aye)
    }

    pub fn nay_count(&self) -> u64 {
        self.count_answers(Answer::Nay)
    }

    /// How many ballots joined the winning side against their own party.
    pub fn betrayal_count(&self) -> u64 {
        self.ballots.iter().filter(|b| b.betrayed).count() as u64
    }

    pub fn futile_count(&self) -> u64 {
        self.ballots.iter().filter(|b| b.futile).count() as u64
    }

    /// Whether the winning side needed the betraying ballots to reach its threshold.
    ///
    /// The ballots of the winning side are split between the ones that followed
    /// their party and the ones that betrayed it. The betrayals were necessary if
    /// the first group alone falls short of the votes needed to carry (or to
    /// defeat) the question.
    pub fn betrayal_necessary(&self) -> bool {
        let betrayals = self.betrayal_count();
        if betrayals == 0 {
            return false;
        }
        let (needed, winners) = match self.outcome {
            Answer::Aye => (
                necessary_ayes(self.nay_count(), self.requires),
                self.aye_count(),
            ),
            Answer::Nay => (
                necessary_nays(self.aye_count(), self.requires),
                self.nay_count(),
            ),
        };
        // Betrayals are always on the winning side, this cannot underflow.
        let non_betrayals = winners - betrayals;
        debug!(
            "betrayal_necessary: {}: needed: {} non betrayals: {}",
            self.id, needed, non_betrayals
        );
        needed > non_betrayals
    }

    fn count_answers(&self, answer: Answer) -> u64 {
        self.ballots.iter().filter(|b| b.answer == answer).count() as u64
    }
}

/// Free-standing form of [RollCall::betrayal_necessary].
pub fn betrayal_necessary(roll_call: &RollCall) -> bool {
    roll_call.betrayal_necessary()
}

fn party_breakdown(ballots: &[BallotRecord]) -> PartyBreakdown {
    // (yes, no) for each party
    let mut counts: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for b in ballots.iter() {
        let e = counts.entry(b.party.clone()).or_insert((0, 0));
        match b.answer {
            Answer::Aye => e.0 += 1,
            Answer::Nay => e.1 += 1,
        }
    }
    // Every party in the map has at least one ballot.
    let shares = counts
        .into_iter()
        .map(|(party, (yes, no))| {
            let total = (yes + no) as f64;
            (
                party,
                PartyShare {
                    yes: yes as f64 / total,
                    no: no as f64 / total,
                },
            )
        })
        .collect();
    PartyBreakdown { shares }
}

fn party_prevailed(breakdown: &PartyBreakdown, party: &str, outcome: Outcome) -> bool {
    breakdown
        .get(party)
        .map(|share| share.fraction(outcome) > 0.5)
        .unwrap_or(false)
}

fn classify_ballot(record: BallotRecord, outcome: Outcome, breakdown: &PartyBreakdown) -> Ballot {
    let prevailed = party_prevailed(breakdown, &record.party, outcome);
    let with_outcome = record.answer == outcome;
    Ballot {
        betrayed: with_outcome && !prevailed,
        futile: !with_outcome && prevailed,
        legislator_id: record.legislator_id,
        party: record.party,
        answer: record.answer,
    }
}
