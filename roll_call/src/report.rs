use log::{debug, info, warn};
use rayon::prelude::*;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::config::*;
use crate::directory::LegislatorDirectory;
use crate::RollCall;

/// The counters of all the legislators, after folding a number of roll calls.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    pub counters: HashMap<String, LegislatorTally>,
    /// The roll calls that were left out of the counters.
    pub failures: Vec<RecordFailure>,
    pub roll_calls: u64,
}

impl Tally {
    /// Adds the ballots of one roll call.
    ///
    /// The roll call is counted as a whole or not at all: if one of the
    /// legislators is missing from the directory, it is recorded as a failure
    /// and none of its ballots are counted.
    pub fn absorb(
        &mut self,
        roll_call: &RollCall,
        directory: &LegislatorDirectory,
        only_necessary: bool,
    ) {
        if only_necessary && !roll_call.betrayal_necessary() {
            return;
        }
        if let Some(missing) = roll_call
            .ballots()
            .iter()
            .find(|b| !directory.contains(b.legislator_id()))
        {
            warn!(
                "Skipping roll call {}: unknown legislator {}",
                roll_call.id(),
                missing.legislator_id()
            );
            self.failures.push(RecordFailure {
                roll_call_id: roll_call.id().to_string(),
                error: AnalysisError::UnknownLegislator {
                    legislator_id: missing.legislator_id().to_string(),
                },
            });
            return;
        }
        for b in roll_call.ballots() {
            let c = self
                .counters
                .entry(b.legislator_id().to_string())
                .or_default();
            c.ballots += 1;
            if b.betrayed() {
                c.effective += 1;
            }
            if b.futile() {
                c.futile += 1;
            }
        }
        self.roll_calls += 1;
    }

    /// Combines two partial tallies computed over disjoint sets of roll calls.
    pub fn merge(mut self, other: Tally) -> Tally {
        for (id, c) in other.counters {
            *self.counters.entry(id).or_default() += c;
        }
        self.failures.extend(other.failures);
        self.roll_calls += other.roll_calls;
        self
    }

    fn sort_failures(&mut self) {
        self.failures.sort_by(|a, b| a.roll_call_id.cmp(&b.roll_call_id));
    }
}

/// Folds the roll calls into per-legislator counters.
pub fn tally(
    roll_calls: &[RollCall],
    directory: &LegislatorDirectory,
    only_necessary: bool,
) -> Tally {
    let mut res = Tally::default();
    for rc in roll_calls.iter() {
        res.absorb(rc, directory, only_necessary);
    }
    res.sort_failures();
    debug!(
        "tally: {} roll calls counted, {} failures",
        res.roll_calls,
        res.failures.len()
    );
    res
}

/// Same as [tally], with the roll calls split across threads.
///
/// Every thread folds its own partial counters, which are merged at the end.
pub fn par_tally(
    roll_calls: &[RollCall],
    directory: &LegislatorDirectory,
    only_necessary: bool,
) -> Tally {
    let mut res = roll_calls
        .par_iter()
        .fold(Tally::default, |mut acc, rc| {
            acc.absorb(rc, directory, only_necessary);
            acc
        })
        .reduce(Tally::default, Tally::merge);
    res.sort_failures();
    debug!(
        "par_tally: {} roll calls counted, {} failures",
        res.roll_calls,
        res.failures.len()
    );
    res
}

/// The record name of the failures found while ranking.
pub const RANKING_RECORD: &str = "<rank>";

/// Turns the counters into the ranked report.
///
/// A counter whose legislator is not in the directory is reported as a failure.
pub fn rank(tally: &Tally, directory: &LegislatorDirectory, options: &ReportOptions) -> Report {
    let mut rows: Vec<ReportRow> = Vec::new();
    let mut missing: Vec<RecordFailure> = Vec::new();
    for (id, c) in tally.counters.iter() {
        let legislator = match directory.lookup(id) {
            Ok(l) => l,
            Err(error) => {
                warn!("rank: dropping {} ballots: {}", c.ballots, error);
                missing.push(RecordFailure {
                    roll_call_id: RANKING_RECORD.to_string(),
                    error,
                });
                continue;
            }
        };
        if options.only_current && !legislator.is_current {
            continue;
        }
        if let Some(cohort) = options.cohort.as_ref() {
            if !cohort.contains(id) {
                continue;
            }
        }
        rows.push(ReportRow {
            legislator: legislator.clone(),
            ballot_count: c.ballots,
            total_defections: c.total_defections(),
            total_defection_pct: c.total_defection_pct(),
            effective_count: c.effective,
            futile_count: c.futile,
            success_pct: c.success_pct(),
        });
    }

    rows.sort_by(|a, b| compare_rows(options.sort_by, a, b));
    if options.limit > 0 {
        rows.truncate(options.limit as usize);
    }
    info!(
        "rank: {} legislators ranked by {}",
        rows.len(),
        options.sort_by.name()
    );
    missing.sort_by(|a, b| a.error.to_string().cmp(&b.error.to_string()));
    let mut failures = tally.failures.clone();
    failures.extend(missing);
    Report { rows, failures }
}

/// Descending order on the key, then ascending order on the legislator id.
fn compare_rows(key: RankingKey, a: &ReportRow, b: &ReportRow) -> Ordering {
    let primary = match key {
        RankingKey::BallotCount => b.ballot_count.cmp(&a.ballot_count),
        RankingKey::TotalDefections => b.total_defections.cmp(&a.total_defections),
        RankingKey::TotalDefectionPct => b.total_defection_pct.total_cmp(&a.total_defection_pct),
        RankingKey::EffectiveCount => b.effective_count.cmp(&a.effective_count),
        RankingKey::FutileCount => b.futile_count.cmp(&a.futile_count),
        RankingKey::SuccessPct => b.success_pct.total_cmp(&a.success_pct),
    };
    primary.then_with(|| a.legislator.id.cmp(&b.legislator.id))
}

/// Counts and ranks in one pass.
pub fn build_report(
    roll_calls: &[RollCall],
    directory: &LegislatorDirectory,
    options: &ReportOptions,
) -> Report {
    let t = tally(roll_calls, directory, options.only_necessary);
    rank(&t, directory, options)
}

pub fn par_build_report(
    roll_calls: &[RollCall],
    directory: &LegislatorDirectory,
    options: &ReportOptions,
) -> Report {
    let t = par_tally(roll_calls, directory, options.only_necessary);
    rank(&t, directory, options)
}

/// Number of roll calls for each resolution text, most common first.
pub fn resolution_histogram(roll_calls: &[RollCall]) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for rc in roll_calls.iter() {
        *counts.entry(rc.resolution().to_string()).or_insert(0) += 1;
    }
    let mut res: Vec<(String, u64)> = counts.into_iter().collect();
    res.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    res
}

/// Number of roll calls for each count of betraying ballots, most common first.
pub fn betrayal_histogram(roll_calls: &[RollCall]) -> Vec<(u64, u64)> {
    let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
    for rc in roll_calls.iter() {
        *counts.entry(rc.betrayal_count()).or_insert(0) += 1;
    }
    let mut res: Vec<(u64, u64)> = counts.into_iter().collect();
    res.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    res
}
