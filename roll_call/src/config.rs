// ********* Input data structures ***********

use snafu::Snafu;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

/// The two possible answers on a ballot.
///
/// The outcome of a roll call uses the same type: `Aye` means that the
/// side in favor carried the question.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Answer {
    Aye,
    Nay,
}

pub type Outcome = Answer;

impl Answer {
    /// Maps a ballot label, as recorded by the clerk, to an answer.
    ///
    /// Abstentions ("Present", "Not Voting") are not ballots and must be
    /// dropped by the reader before calling this function.
    pub fn from_label(label: &str) -> Result<Answer, AnalysisError> {
        match label {
            "Yea" | "Aye" | "Guilty" => Ok(Answer::Aye),
            "Nay" | "No" | "Not Guilty" => Ok(Answer::Nay),
            _ => UnknownAnswerLabelSnafu { label }.fail(),
        }
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Aye => write!(f, "Y"),
            Answer::Nay => write!(f, "N"),
        }
    }
}

/// The fraction of the votes required for the ayes to carry a question.
///
/// Ties always go to the nays.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum MajorityRule {
    /// "1/2"
    Half,
    /// "2/3", for example to override a veto.
    TwoThirds,
    /// "3/5", for example to invoke cloture.
    ThreeFifths,
}

impl MajorityRule {
    pub fn parse(rule: &str) -> Result<MajorityRule, AnalysisError> {
        match rule {
            "1/2" => Ok(MajorityRule::Half),
            "2/3" => Ok(MajorityRule::TwoThirds),
            "3/5" => Ok(MajorityRule::ThreeFifths),
            _ => UnknownMajorityRuleSnafu { rule }.fail(),
        }
    }
}

impl FromStr for MajorityRule {
    type Err = AnalysisError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MajorityRule::parse(s)
    }
}

impl Display for MajorityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MajorityRule::Half => "1/2",
            MajorityRule::TwoThirds => "2/3",
            MajorityRule::ThreeFifths => "3/5",
        };
        write!(f, "{}", s)
    }
}

/// A ballot before classification: who voted, under which party, and how.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BallotRecord {
    pub legislator_id: String,
    pub party: String,
    pub answer: Answer,
}

/// One legislator's answer in a roll call, with the flags computed when
/// the roll call was built.
///
/// Invariant: a ballot is never both betrayed and futile.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ballot {
    pub(crate) legislator_id: String,
    pub(crate) party: String,
    pub(crate) answer: Answer,
    pub(crate) betrayed: bool,
    pub(crate) futile: bool,
}

impl Ballot {
    pub fn legislator_id(&self) -> &str {
        &self.legislator_id
    }

    pub fn party(&self) -> &str {
        &self.party
    }

    pub fn answer(&self) -> Answer {
        self.answer
    }

    /// Sided with the winning outcome while the majority of the party opposed it.
    pub fn betrayed(&self) -> bool {
        self.betrayed
    }

    /// Sided with the majority of the party, which then lost.
    pub fn futile(&self) -> bool {
        self.futile
    }
}

/// Fractions of the ballots of one party on each side.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct PartyShare {
    pub yes: f64,
    pub no: f64,
}

impl PartyShare {
    pub fn fraction(&self, answer: Answer) -> f64 {
        match answer {
            Answer::Aye => self.yes,
            Answer::Nay => self.no,
        }
    }
}

/// Per-party breakdown of a roll call.
///
/// Only parties that cast at least one ballot are present.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct PartyBreakdown {
    pub(crate) shares: BTreeMap<String, PartyShare>,
}

impl PartyBreakdown {
    pub fn get(&self, party: &str) -> Option<&PartyShare> {
        self.shares.get(party)
    }

    pub fn parties(&self) -> impl Iterator<Item = (&String, &PartyShare)> {
        self.shares.iter()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// A legislator, as provided by the directory.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Legislator {
    pub id: String,
    pub name: String,
    pub parties: BTreeSet<String>,
    pub states: BTreeSet<String>,
    pub is_current: bool,
}

impl Display for Legislator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parties: Vec<&str> = self.parties.iter().map(|s| s.as_str()).collect();
        let states: Vec<&str> = self.states.iter().map(|s| s.as_str()).collect();
        write!(
            f,
            "{} {} - {}",
            self.name,
            parties.join(","),
            states.join(",")
        )
    }
}

// ******** Output data structures *********

/// Counters accumulated for one legislator over many roll calls.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct LegislatorTally {
    pub ballots: u64,
    pub effective: u64,
    pub futile: u64,
}

impl LegislatorTally {
    pub fn total_defections(&self) -> u64 {
        self.effective + self.futile
    }

    pub fn success_pct(&self) -> f64 {
        let total = self.total_defections();
        if total == 0 {
            0.0
        } else {
            self.effective as f64 / total as f64
        }
    }

    pub fn total_defection_pct(&self) -> f64 {
        if self.ballots == 0 {
            0.0
        } else {
            self.total_defections() as f64 / self.ballots as f64
        }
    }
}

impl std::ops::AddAssign for LegislatorTally {
    fn add_assign(&mut self, rhs: LegislatorTally) {
        self.ballots += rhs.ballots;
        self.effective += rhs.effective;
        self.futile += rhs.futile;
    }
}

/// A record that could not be processed, and why.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RecordFailure {
    pub roll_call_id: String,
    pub error: AnalysisError,
}

/// One line of the ranked report.
#[derive(PartialEq, Debug, Clone)]
pub struct ReportRow {
    pub legislator: Legislator,
    pub ballot_count: u64,
    pub total_defections: u64,
    pub total_defection_pct: f64,
    pub effective_count: u64,
    pub futile_count: u64,
    pub success_pct: f64,
}

/// The ranked report, along with the roll calls that had to be skipped.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub failures: Vec<RecordFailure>,
}

/// Errors raised by the analysis.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AnalysisError {
    #[snafu(display("roll call {roll_call_id} has no usable ballot"))]
    MalformedRollCall { roll_call_id: String },

    #[snafu(display("{text:?} is not a documented result"))]
    UnrecognizedResolution { text: String },

    #[snafu(display("the result {text:?} has not been classified yet"))]
    PendingResolution { text: String },

    #[snafu(display("invalid majority rule: {rule:?}"))]
    UnknownMajorityRule { rule: String },

    #[snafu(display("unknown legislator {legislator_id}"))]
    UnknownLegislator { legislator_id: String },

    #[snafu(display("roll call {roll_call_id} has an invalid ballot entry {entry:?}"))]
    MalformedBallot { roll_call_id: String, entry: String },

    #[snafu(display("unknown ballot label {label:?}"))]
    UnknownAnswerLabel { label: String },

    #[snafu(display("unknown ranking key {key:?}"))]
    UnknownRankingKey { key: String },
}

// ********* Configuration **********

/// The criteria available to rank legislators. All rankings are descending.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum RankingKey {
    BallotCount,
    TotalDefections,
    TotalDefectionPct,
    EffectiveCount,
    FutileCount,
    SuccessPct,
}

impl RankingKey {
    pub const ALL: [RankingKey; 6] = [
        RankingKey::BallotCount,
        RankingKey::TotalDefections,
        RankingKey::TotalDefectionPct,
        RankingKey::EffectiveCount,
        RankingKey::FutileCount,
        RankingKey::SuccessPct,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RankingKey::BallotCount => "ballots",
            RankingKey::TotalDefections => "defections",
            RankingKey::TotalDefectionPct => "defection-pct",
            RankingKey::EffectiveCount => "effective",
            RankingKey::FutileCount => "futile",
            RankingKey::SuccessPct => "success-pct",
        }
    }
}

impl FromStr for RankingKey {
    type Err = AnalysisError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankingKey::ALL
            .iter()
            .find(|k| k.name() == s)
            .copied()
            .ok_or_else(|| AnalysisError::UnknownRankingKey { key: s.to_string() })
    }
}

/// Options that control the aggregation and the ranking.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportOptions {
    /// Only count the roll calls in which the betrayals were necessary.
    pub only_necessary: bool,
    /// Only report the legislators currently serving.
    pub only_current: bool,
    /// If provided, only report these legislators.
    pub cohort: Option<BTreeSet<String>>,
    pub sort_by: RankingKey,
    /// Maximum number of rows. Zero or negative means no limit.
    pub limit: i64,
}

impl ReportOptions {
    pub const DEFAULT_OPTIONS: ReportOptions = ReportOptions {
        only_necessary: false,
        only_current: false,
        cohort: None,
        sort_by: RankingKey::EffectiveCount,
        limit: 20,
    };
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions::DEFAULT_OPTIONS
    }
}
