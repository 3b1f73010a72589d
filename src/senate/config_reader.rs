use crate::args::{Action, Args};
use crate::senate::io_common::parse_years;
use crate::senate::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

use std::collections::BTreeSet;

/// The optional configuration file. All the fields may be overridden
/// from the command line.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(rename = "dataDirectory")]
    pub data_directory: Option<String>,
    /// Numbers or strings.
    #[serde(rename = "years")]
    _years: Option<Vec<JSValue>>,
    #[serde(rename = "onlyCurrent")]
    pub only_current: Option<bool>,
    #[serde(rename = "onlyNecessary")]
    pub only_necessary: Option<bool>,
    pub limit: Option<i64>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub cohort: Option<Vec<String>>,
}

impl AnalysisConfig {
    pub fn years(&self) -> SenateResult<Option<Vec<u32>>> {
        match self._years.as_ref() {
            None => Ok(None),
            Some(l) => l.iter().map(read_js_year).collect::<SenateResult<Vec<u32>>>().map(Some),
        }
    }
}

/// The settings of a run, after merging the command line and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub data_directory: PathBuf,
    pub years: Vec<u32>,
    pub action: Action,
    pub options: ReportOptions,
    pub out: Option<String>,
    pub reference: Option<String>,
}

pub const DEFAULT_DATA_DIRECTORY: &str = "data";

pub fn read_config(path: &str) -> SenateResult<AnalysisConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: AnalysisConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Merges the command line and the configuration file.
///
/// The ranking key is checked here, before any data is read.
pub fn resolve_settings(args: &Args, config: Option<&AnalysisConfig>) -> SenateResult<Settings> {
    let default_config = AnalysisConfig::default();
    let config = config.unwrap_or(&default_config);

    let years: Vec<u32> = match args.years.as_deref() {
        Some(s) => parse_years(s)?,
        None => config.years()?.unwrap_or_default(),
    };
    ensure!(!years.is_empty(), NoYearsSnafu {});

    let sort_by: RankingKey = match args.sort_by.as_deref().or(config.sort_by.as_deref()) {
        Some(s) => s.parse::<RankingKey>().context(ConfigurationSnafu {})?,
        None => ReportOptions::DEFAULT_OPTIONS.sort_by,
    };

    let cohort: Option<BTreeSet<String>> = args
        .cohort
        .clone()
        .or_else(|| config.cohort.clone())
        .map(|ids| ids.into_iter().collect());

    let options = ReportOptions {
        only_necessary: args.only_necessary || config.only_necessary.unwrap_or(false),
        only_current: args.only_current || config.only_current.unwrap_or(false),
        cohort,
        sort_by,
        limit: args
            .limit
            .or(config.limit)
            .unwrap_or(ReportOptions::DEFAULT_OPTIONS.limit),
    };

    let data_directory: PathBuf = args
        .data
        .clone()
        .or_else(|| config.data_directory.clone())
        .unwrap_or_else(|| DEFAULT_DATA_DIRECTORY.to_string())
        .into();

    Ok(Settings {
        data_directory,
        years,
        action: args.action.unwrap_or(Action::Calculate),
        options,
        out: args.out.clone(),
        reference: args.reference.clone(),
    })
}

fn read_js_year(x: &JSValue) -> SenateResult<u32> {
    match x {
        JSValue::Number(n) => n
            .as_u64()
            .and_then(|y| u32::try_from(y).ok())
            .context(InvalidYearSnafu { year: n.to_string() }),
        JSValue::String(s) => s
            .trim()
            .parse::<u32>()
            .ok()
            .context(InvalidYearSnafu { year: s.clone() }),
        _ => None.context(InvalidYearSnafu { year: x.to_string() }),
    }
}
