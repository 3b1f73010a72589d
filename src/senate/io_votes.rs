use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use roll_call::builder::Builder;

use crate::senate::io_common::{congress_session, list_json_files, simplify_file_name};
use crate::senate::*;

/// The entry of the vice-president breaking a tie. It is not a senate ballot.
pub const VICE_PRESIDENT: &str = "VP";

/// Labels of the members who did not take a side.
pub const ABSTENTION_LABELS: [&str; 2] = ["Present", "Not Voting"];

/// A file that could not be turned into a roll call.
#[derive(Debug)]
pub struct FileFailure {
    pub path: String,
    pub error: SenateError,
}

/// The roll calls of a year, and the files that were skipped.
#[derive(Debug)]
pub struct YearData {
    pub roll_calls: Vec<RollCall>,
    pub failures: Vec<FileFailure>,
}

pub fn to_roll_call(vote: &VoteFile) -> Result<RollCall, AnalysisError> {
    let mut builder = Builder::new(&vote.vote_id, &vote.requires)?.resolution(&vote.result);
    for (label, entries) in vote.votes.iter() {
        if ABSTENTION_LABELS.contains(&label.as_str()) {
            continue;
        }
        let answer = Answer::from_label(label)?;
        for entry in entries.iter() {
            match entry {
                VoterEntry::Member(m) => builder.add_ballot_2(BallotRecord {
                    legislator_id: m.id.clone(),
                    party: m.party.clone(),
                    answer,
                })?,
                VoterEntry::Placeholder(p) if p == VICE_PRESIDENT => {
                    debug!("to_roll_call: {}: skipping {:?}", vote.vote_id, p);
                }
                VoterEntry::Placeholder(p) => {
                    return Err(AnalysisError::MalformedBallot {
                        roll_call_id: vote.vote_id.clone(),
                        entry: p.clone(),
                    });
                }
            }
        }
    }
    debug!(
        "to_roll_call: {}: {} ballots",
        vote.vote_id,
        builder.num_ballots()
    );
    builder.build()
}

pub fn parse_roll_call(contents: &str, path: &str) -> SenateResult<RollCall> {
    let vote: VoteFile = serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    to_roll_call(&vote).context(AnalysisSnafu { record: path })
}

pub fn read_roll_call_file(path: &Path) -> SenateResult<RollCall> {
    let p = path.display().to_string();
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path: p.clone() })?;
    parse_roll_call(&contents, &p)
}

/// Reads all the roll calls of a year, in parallel.
///
/// The files that fail are returned along the roll calls, they do not stop
/// the loading. A year without any file is an error.
pub fn load_year(data_directory: &Path, year: u32) -> SenateResult<YearData> {
    let session = congress_session(year)?;
    let dir = data_path(data_directory, &[&year.to_string()]);
    if !dir.is_dir() {
        return NoRollCallsSnafu { year, session }.fail();
    }
    let files = list_json_files(&dir)?;
    ensure!(!files.is_empty(), NoRollCallsSnafu { year, session });
    info!("Reading {} files from {:?}", files.len(), dir);

    let results: Vec<(PathBuf, SenateResult<RollCall>)> = files
        .par_iter()
        .map(|p| (p.clone(), read_roll_call_file(p)))
        .collect();

    let mut roll_calls: Vec<RollCall> = Vec::new();
    let mut failures: Vec<FileFailure> = Vec::new();
    for (p, res) in results {
        match res {
            Ok(rc) => roll_calls.push(rc),
            Err(error) => {
                if let SenateError::Analysis {
                    source: AnalysisError::PendingResolution { .. },
                    ..
                } = &error
                {
                    info!("Skipping {}: {}", simplify_file_name(&p), error);
                } else {
                    warn!("Skipping {}: {}", simplify_file_name(&p), error);
                }
                failures.push(FileFailure {
                    path: p.display().to_string(),
                    error,
                });
            }
        }
    }
    if roll_calls.is_empty() {
        warn!("None of the {} files of {} could be used", failures.len(), year);
    }
    roll_calls.sort_by(|a, b| a.id().cmp(b.id()));
    Ok(YearData {
        roll_calls,
        failures,
    })
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MemberVote {
    id: String,
    party: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoterEntry {
    Member(MemberVote),
    Placeholder(String),
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct VoteFile {
    vote_id: String,
    requires: String,
    result: String,
    votes: BTreeMap<String, Vec<VoterEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vote_file(result: &str, votes: JSValue) -> String {
        json!({
            "vote_id": "s12-113.2013",
            "requires": "1/2",
            "result": result,
            "category": "passage",
            "votes": votes,
        })
        .to_string()
    }

    #[test]
    fn parse_vote() {
        let contents = vote_file(
            "Bill Passed",
            json!({
                "Yea": [
                    {"id": "S001", "party": "D", "state": "VT", "display_name": "A"},
                    {"id": "S002", "party": "D"},
                    {"id": "S003", "party": "R"},
                    "VP"
                ],
                "Nay": [{"id": "S004", "party": "R"}, {"id": "S005", "party": "R"}],
                "Not Voting": [{"id": "S006", "party": "R"}],
                "Present": [{"id": "S007", "party": "D"}]
            }),
        );
        let rc = parse_roll_call(&contents, "data.json").unwrap();
        assert_eq!(rc.id(), "s12-113.2013");
        assert_eq!(rc.ballots().len(), 5);
        assert_eq!(rc.aye_count(), 3);
        assert_eq!(rc.nay_count(), 2);
        assert_eq!(rc.outcome(), Answer::Aye);
        assert_eq!(rc.betrayal_count(), 1);
    }

    #[test]
    fn unknown_label() {
        let contents = vote_file(
            "Bill Passed",
            json!({"Maybe": [{"id": "S001", "party": "D"}]}),
        );
        let res = parse_roll_call(&contents, "data.json");
        assert!(matches!(
            res,
            Err(SenateError::Analysis {
                source: AnalysisError::UnknownAnswerLabel { .. },
                ..
            })
        ));
    }

    #[test]
    fn only_the_vice_president_is_skipped() {
        let contents = vote_file(
            "Bill Passed",
            json!({
                "Yea": [{"id": "S001", "party": "D"}, "S002"],
                "Nay": ["garbage"]
            }),
        );
        let res = parse_roll_call(&contents, "data.json");
        assert!(matches!(
            res,
            Err(SenateError::Analysis {
                source: AnalysisError::MalformedBallot { .. },
                ..
            })
        ));
    }

    #[test]
    fn pending_vote() {
        let contents = vote_file("unknown", json!({"Yea": [{"id": "S001", "party": "D"}]}));
        let res = parse_roll_call(&contents, "data.json");
        assert!(matches!(
            res,
            Err(SenateError::Analysis {
                source: AnalysisError::PendingResolution { .. },
                ..
            })
        ));
    }

    #[test]
    fn bad_json() {
        let res = parse_roll_call("{\"vote_id\": 3}", "data.json");
        assert!(matches!(res, Err(SenateError::ParsingJson { .. })));
    }

    #[test]
    fn year_directory() {
        let root = std::env::temp_dir().join(format!("betrayal-votes-{}", std::process::id()));
        let s2 = root.join("2013").join("s2");
        let s1 = root.join("2013").join("s1");
        fs::create_dir_all(&s1).unwrap();
        fs::create_dir_all(&s2).unwrap();
        fs::write(
            s2.join("data.json"),
            json!({
                "vote_id": "s2-113.2013",
                "requires": "3/5",
                "result": "Cloture Motion Rejected",
                "votes": {
                    "Yea": [{"id": "S001", "party": "D"}],
                    "Nay": [{"id": "S002", "party": "R"}]
                }
            })
            .to_string(),
        )
        .unwrap();
        fs::write(s1.join("data.json"), vote_file("unknown", json!({}))).unwrap();

        let data = load_year(&root, 2013).unwrap();
        assert_eq!(data.roll_calls.len(), 1);
        assert_eq!(data.roll_calls[0].outcome(), Answer::Nay);
        assert_eq!(data.failures.len(), 1);

        assert!(matches!(
            load_year(&root, 2015),
            Err(SenateError::NoRollCalls {
                year: 2015,
                session: 114
            })
        ));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn year_without_usable_roll_call() {
        let root = std::env::temp_dir().join(format!("betrayal-pending-{}", std::process::id()));
        let s1 = root.join("2014").join("s1");
        let s2 = root.join("2014").join("s2");
        fs::create_dir_all(&s1).unwrap();
        fs::create_dir_all(&s2).unwrap();
        let pending = vote_file("unknown", json!({"Yea": [{"id": "S001", "party": "D"}]}));
        fs::write(s1.join("data.json"), &pending).unwrap();
        fs::write(s2.join("data.json"), &pending).unwrap();

        let data = load_year(&root, 2014).unwrap();
        assert!(data.roll_calls.is_empty());
        assert_eq!(data.failures.len(), 2);
        assert!(data.failures.iter().all(|f| matches!(
            f.error,
            SenateError::Analysis {
                source: AnalysisError::PendingResolution { .. },
                ..
            }
        )));

        let empty = root.join("2016");
        fs::create_dir_all(&empty).unwrap();
        assert!(matches!(
            load_year(&root, 2016),
            Err(SenateError::NoRollCalls { year: 2016, .. })
        ));

        fs::remove_dir_all(&root).unwrap();
    }
}
