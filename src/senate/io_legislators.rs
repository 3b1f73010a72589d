// Reader for the legislator rosters published by govtrack.us (YAML).

use serde::Deserialize;

use std::collections::BTreeSet;

use crate::senate::*;

pub const CURRENT_URL: &str =
    "https://www.govtrack.us/data/congress-legislators/legislators-current.yaml";
pub const HISTORICAL_URL: &str =
    "https://www.govtrack.us/data/congress-legislators/legislators-historical.yaml";

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct RosterEntry {
    id: RosterIds,
    name: RosterName,
    #[serde(default)]
    terms: Vec<RosterTerm>,
}

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct RosterIds {
    // Only the senators have a LIS identifier.
    lis: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct RosterName {
    first: Option<String>,
    last: Option<String>,
    official_full: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct RosterTerm {
    party: Option<String>,
    state: Option<String>,
}

impl RosterName {
    fn display_name(&self) -> String {
        if let Some(n) = self.official_full.as_ref() {
            return n.clone();
        }
        format!(
            "{} {}",
            self.first.as_deref().unwrap_or_default(),
            self.last.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// Parses a roster. The entries without a senate identifier are dropped.
pub fn parse_roster(contents: &str, is_current: bool, path: &str) -> SenateResult<Vec<Legislator>> {
    let entries: Vec<RosterEntry> =
        serde_yaml::from_str(contents).context(ParsingYamlSnafu { path })?;
    let num_entries = entries.len();
    let res: Vec<Legislator> = entries
        .into_iter()
        .filter_map(|e| {
            let id = e.id.lis?;
            let parties: BTreeSet<String> =
                e.terms.iter().filter_map(|t| t.party.clone()).collect();
            let states: BTreeSet<String> =
                e.terms.iter().filter_map(|t| t.state.clone()).collect();
            Some(Legislator {
                id,
                name: e.name.display_name(),
                parties,
                states,
                is_current,
            })
        })
        .collect();
    debug!(
        "parse_roster: {}: {} senators out of {} entries",
        path,
        res.len(),
        num_entries
    );
    Ok(res)
}

fn read_roster(path: &Path, is_current: bool, url: &str) -> SenateResult<Vec<Legislator>> {
    let p = path.display().to_string();
    if !path.exists() {
        return MissingLegislatorFileSnafu { path: p, url }.fail();
    }
    info!("Reading legislators from {}", p);
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path: p.clone() })?;
    parse_roster(&contents, is_current, &p)
}

/// Builds the directory out of the current and the historical rosters.
///
/// A senator listed in both rosters is a data integrity issue.
pub fn build_directory(
    current: Vec<Legislator>,
    historical: Vec<Legislator>,
) -> SenateResult<LegislatorDirectory> {
    let mut directory: LegislatorDirectory = current.into_iter().collect();
    for l in historical {
        ensure!(
            !directory.contains(&l.id),
            DuplicateLegislatorSnafu {
                id: l.id.clone(),
                name: l.name.clone()
            }
        );
        directory.insert(l);
    }
    Ok(directory)
}

pub fn load_directory(data_directory: &Path) -> SenateResult<LegislatorDirectory> {
    let current = read_roster(
        &data_path(data_directory, &["legislators", "legislators-current.yaml"]),
        true,
        CURRENT_URL,
    )?;
    let historical = read_roster(
        &data_path(data_directory, &["legislators", "legislators-historical.yaml"]),
        false,
        HISTORICAL_URL,
    )?;
    build_directory(current, historical)
}
