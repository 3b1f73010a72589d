pub mod config_reader;
pub mod io_common;
pub mod io_legislators;
pub mod io_votes;
pub mod render;

use log::{debug, info, warn};

use roll_call::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::{Action, Args};
use crate::senate::config_reader::*;
use crate::senate::io_votes::{load_year, FileFailure};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SenateError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading directory {path}"))]
    ReadingDirectory {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error parsing YAML file {path}"))]
    ParsingYaml {
        source: serde_yaml::Error,
        path: String,
    },
    #[snafu(display("Error writing JSON"))]
    WritingJson { source: serde_json::Error },

    #[snafu(display("Invalid record {record}: {source}"))]
    Analysis {
        source: AnalysisError,
        record: String,
    },
    #[snafu(display("Invalid configuration: {source}"))]
    Configuration { source: AnalysisError },

    #[snafu(display("Data integrity issue: {name} ({id}) is in both current and historical records. Please update both legislators files"))]
    DuplicateLegislator { id: String, name: String },
    #[snafu(display("No file at {path}. Please download from {url}"))]
    MissingLegislatorFile { path: String, url: String },

    #[snafu(display("Unable to calculate session for years before 1941: {year}"))]
    YearOutOfRange { year: u32 },
    #[snafu(display("Could not understand year {year:?}"))]
    InvalidYear { year: String },
    #[snafu(display("No year to analyze"))]
    NoYears {},
    #[snafu(display("No roll call for {year}. Please download all json in subdirectories of https://www.govtrack.us/data/congress/{session}/votes/{year}/s*"))]
    NoRollCalls { year: u32, session: u32 },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type SenateResult<T> = Result<T, SenateError>;

/// Everything read from the data directory for the requested years.
pub struct Dataset {
    pub directory: LegislatorDirectory,
    pub roll_calls: Vec<RollCall>,
    pub failures: Vec<FileFailure>,
}

pub fn load_dataset(settings: &Settings) -> SenateResult<Dataset> {
    let directory = io_legislators::load_directory(&settings.data_directory)?;
    info!("Loaded {} senators", directory.len());

    let mut roll_calls: Vec<RollCall> = Vec::new();
    let mut failures: Vec<FileFailure> = Vec::new();
    for year in settings.years.iter() {
        info!("Loading: {}", year);
        let mut loaded = load_year(&settings.data_directory, *year)?;
        roll_calls.append(&mut loaded.roll_calls);
        failures.append(&mut loaded.failures);
    }
    info!(
        "Loaded {} roll calls ({} skipped)",
        roll_calls.len(),
        failures.len()
    );
    Ok(Dataset {
        directory,
        roll_calls,
        failures,
    })
}

pub fn report_to_json(report: &Report, options: &ReportOptions) -> JSValue {
    let rows: Vec<JSValue> = report
        .rows
        .iter()
        .map(|r| {
            json!({
                "id": r.legislator.id,
                "name": r.legislator.name,
                "parties": r.legislator.parties,
                "states": r.legislator.states,
                "current": r.legislator.is_current,
                "ballots": r.ballot_count,
                "defections": r.total_defections,
                "defectionPct": r.total_defection_pct,
                "effective": r.effective_count,
                "futile": r.futile_count,
                "successPct": r.success_pct,
            })
        })
        .collect();
    let failures: Vec<JSValue> = report
        .failures
        .iter()
        .map(|f| json!({"rollCall": f.roll_call_id, "error": f.error.to_string()}))
        .collect();
    json!({
        "config": {
            "onlyNecessary": options.only_necessary,
            "onlyCurrent": options.only_current,
            "sortBy": options.sort_by.name(),
            "limit": options.limit,
        },
        "results": rows,
        "skipped": failures,
    })
}

fn write_output(out: &str, js: &JSValue) -> SenateResult<String> {
    let pretty = serde_json::to_string_pretty(js).context(WritingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty);
    } else {
        fs::write(out, pretty.as_bytes()).context(OpeningFileSnafu { path: out })?;
        info!("Report written to {}", out);
    }
    Ok(pretty)
}

fn check_reference(reference_path: &str, pretty_js: &str) -> SenateResult<()> {
    let contents =
        fs::read_to_string(reference_path).context(OpeningFileSnafu { path: reference_path })?;
    let reference: JSValue =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path: reference_path })?;
    let pretty_reference = serde_json::to_string_pretty(&reference).context(WritingJsonSnafu {})?;
    if pretty_reference != pretty_js {
        warn!("Found differences with the reference report");
        print_diff(pretty_reference.as_str(), pretty_js, "\n");
        whatever!("Difference detected between calculated report and reference report")
    }
    info!("The report matches the reference {}", reference_path);
    Ok(())
}

pub fn run_report(settings: &Settings, dataset: &Dataset) -> SenateResult<()> {
    let report = par_build_report(&dataset.roll_calls, &dataset.directory, &settings.options);
    debug!("run_report: {} rows", report.rows.len());

    print!("{}", render::render_report(&report, &dataset.failures));

    let js = report_to_json(&report, &settings.options);
    let pretty = match settings.out.as_deref() {
        Some(out) => write_output(out, &js)?,
        None => serde_json::to_string_pretty(&js).context(WritingJsonSnafu {})?,
    };
    if let Some(reference_path) = settings.reference.as_deref() {
        check_reference(reference_path, &pretty)?;
    }
    Ok(())
}

pub fn run(args: &Args) -> SenateResult<()> {
    let config: Option<AnalysisConfig> = match args.config.as_deref() {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    let settings = resolve_settings(args, config.as_ref())?;
    info!("settings: {:?}", settings);

    let dataset = load_dataset(&settings)?;
    match settings.action {
        Action::Calculate => run_report(&settings, &dataset),
        Action::Resolutions => {
            let hist = resolution_histogram(&dataset.roll_calls);
            print!("{}", render::render_resolutions(&hist));
            Ok(())
        }
        Action::Betrayals => {
            let hist = betrayal_histogram(&dataset.roll_calls);
            print!("{}", render::render_betrayals(&hist, &dataset.roll_calls));
            Ok(())
        }
    }
}

/// The path of a file below the data directory.
pub fn data_path(root: &Path, parts: &[&str]) -> PathBuf {
    let mut p = root.to_path_buf();
    for part in parts {
        p.push(part);
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn row(id: &str) -> ReportRow {
        ReportRow {
            legislator: Legislator {
                id: id.to_string(),
                name: "Susan M. Collins".to_string(),
                parties: ["Republican".to_string()].into_iter().collect(),
                states: ["ME".to_string()].into_iter().collect::<BTreeSet<String>>(),
                is_current: true,
            },
            ballot_count: 10,
            total_defections: 4,
            total_defection_pct: 0.4,
            effective_count: 3,
            futile_count: 1,
            success_pct: 0.75,
        }
    }

    #[test]
    fn json_report() {
        let report = Report {
            rows: vec![row("S252")],
            failures: vec![RecordFailure {
                roll_call_id: "s7-113.2013".to_string(),
                error: AnalysisError::UnknownLegislator {
                    legislator_id: "S999".to_string(),
                },
            }],
        };
        let js = report_to_json(&report, &ReportOptions::default());
        assert_eq!(js["results"][0]["id"], json!("S252"));
        assert_eq!(js["results"][0]["parties"], json!(["Republican"]));
        assert_eq!(js["results"][0]["successPct"], json!(0.75));
        assert_eq!(js["config"]["sortBy"], json!("effective"));
        assert_eq!(js["skipped"][0]["rollCall"], json!("s7-113.2013"));
        assert_eq!(
            js["skipped"][0]["error"],
            json!("unknown legislator S999")
        );
    }

    #[test]
    fn data_paths() {
        let p = data_path(Path::new("data"), &["legislators", "legislators-current.yaml"]);
        assert_eq!(p, Path::new("data/legislators/legislators-current.yaml"));
    }
}
