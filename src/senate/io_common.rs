use crate::senate::*;

/// The first year for which the session can be computed.
const FIRST_YEAR: u32 = 1941;
/// Years before this one have not been checked against the data.
const FIRST_TESTED_YEAR: u32 = 1991;

/// The number of the congress sitting during the given year.
///
/// Congresses start in 1789 and last two years.
pub fn congress_session(year: u32) -> SenateResult<u32> {
    ensure!(year >= FIRST_YEAR, YearOutOfRangeSnafu { year });
    if year < FIRST_TESTED_YEAR {
        warn!("years before {} have not been tested: {}", FIRST_TESTED_YEAR, year);
    }
    Ok((year + 1) / 2 - 894)
}

/// Parses a comma-separated list of years.
pub fn parse_years(s: &str) -> SenateResult<Vec<u32>> {
    s.split(',')
        .map(|y| y.trim())
        .filter(|y| !y.is_empty())
        .map(|y| y.parse::<u32>().ok().context(InvalidYearSnafu { year: y }))
        .collect()
}

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// All the JSON files below a directory, in a stable order.
pub fn list_json_files(dir: &Path) -> SenateResult<Vec<PathBuf>> {
    let mut res: Vec<PathBuf> = Vec::new();
    let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];
    while let Some(d) = pending.pop() {
        let path = d.display().to_string();
        let entries = fs::read_dir(&d).context(ReadingDirectorySnafu { path: path.clone() })?;
        for entry in entries {
            let p = entry
                .context(ReadingDirectorySnafu { path: path.clone() })?
                .path();
            if p.is_dir() {
                pending.push(p);
            } else if p.extension().map(|e| e == "json").unwrap_or(false) {
                res.push(p);
            }
        }
    }
    res.sort();
    debug!("list_json_files: {:?}: {} files", dir, res.len());
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions() {
        assert_eq!(congress_session(2013).unwrap(), 113);
        assert_eq!(congress_session(2014).unwrap(), 113);
        assert_eq!(congress_session(2015).unwrap(), 114);
        assert_eq!(congress_session(1941).unwrap(), 77);
        assert!(matches!(
            congress_session(1920),
            Err(SenateError::YearOutOfRange { year: 1920 })
        ));
    }

    #[test]
    fn years() {
        assert_eq!(parse_years("2013, 2014,").unwrap(), vec![2013, 2014]);
        assert!(matches!(
            parse_years("2013,MMXIV"),
            Err(SenateError::InvalidYear { .. })
        ));
    }

    #[test]
    fn json_files() {
        let root = std::env::temp_dir().join(format!("betrayal-list-{}", std::process::id()));
        let nested = root.join("s1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("data.json"), "{}").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join("a.json"), "{}").unwrap();

        let files = list_json_files(&root).unwrap();
        let names: Vec<String> = files.iter().map(|p| simplify_file_name(p)).collect();
        assert_eq!(names, vec!["a.json", "data.json"]);

        fs::remove_dir_all(&root).unwrap();
    }
}
