use clap::Parser;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Ranks the senators by their betrayals.
    Calculate,
    /// Counts the results found in the roll calls.
    Resolutions,
    /// Counts the roll calls by number of betrayals.
    Betrayals,
}

/// This is a program that finds the senators who voted against their own party
/// and made the difference.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (comma-separated list of years) The years to analyze, for example 2013,2014.
    /// Setting this option overrides the years that may be specified with the --config option.
    #[clap(value_parser)]
    pub years: Option<String>,

    /// (file path, optional) A JSON file with the settings of the analysis. All the settings
    /// may be overridden from the command line.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, default 'data') The directory with the legislators files and the roll calls.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (default calculate) What to do with the roll calls.
    #[clap(long, value_enum)]
    pub action: Option<Action>,

    /// Only reports the senators who currently sit.
    #[clap(long, takes_value = false)]
    pub only_current: bool,

    /// Only counts the betrayals that changed the outcome.
    #[clap(long, takes_value = false)]
    pub only_necessary: bool,

    /// (default 20) The number of senators to report. Zero or a negative number reports all of them.
    #[clap(long, value_parser, allow_hyphen_values = true)]
    pub limit: Option<i64>,

    /// (default effective) The column used to rank the senators: ballots, defections,
    /// defection-pct, effective, futile or success-pct.
    #[clap(long, value_parser)]
    pub sort_by: Option<String>,

    /// (list of senate ids) If specified, only these senators are reported.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub cohort: Option<Vec<String>>,

    /// (file path, 'stdout' or empty) If specified, the report will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a report in JSON format. If provided, the program will
    /// check that the calculated report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
