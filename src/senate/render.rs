// Text output of the actions.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::senate::io_votes::FileFailure;
use crate::senate::*;

/// Roll calls with more betrayals than this are listed individually.
pub const BETRAYAL_LISTING_THRESHOLD: u64 = 30;

/// The ranked table, followed by the records that were skipped.
pub struct ReportTable<'a> {
    pub report: &'a Report,
    pub file_failures: &'a [FileFailure],
}

impl Display for ReportTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(
            f,
            "{:>7}  {:>6}  {:>7}  {:>6}  {:>6}  {:>8}  Senator",
            "Ballots", "Defect", "Defect%", "Betray", "Futile", "Success%"
        )?;
        for r in self.report.rows.iter() {
            writeln!(
                f,
                "{:>7}  {:>6}  {:>6.1}%  {:>6}  {:>6}  {:>7.1}%  {}",
                r.ballot_count,
                r.total_defections,
                100.0 * r.total_defection_pct,
                r.effective_count,
                r.futile_count,
                100.0 * r.success_pct,
                r.legislator
            )?;
        }
        let num_skipped = self.report.failures.len() + self.file_failures.len();
        if num_skipped > 0 {
            writeln!(f, "\nSkipped {} records:", num_skipped)?;
            for ff in self.file_failures.iter() {
                writeln!(f, "  {}: {}", ff.path, ff.error)?;
            }
            for rf in self.report.failures.iter() {
                writeln!(f, "  {}: {}", rf.roll_call_id, rf.error)?;
            }
        }
        Ok(())
    }
}

/// Number of roll calls per resolution text.
pub struct ResolutionTable<'a>(pub &'a [(String, u64)]);

impl Display for ResolutionTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (text, count) in self.0.iter() {
            writeln!(f, "{:>6}  {}", count, text)?;
        }
        Ok(())
    }
}

/// Number of roll calls per betrayal count, and the roll calls with many betrayals.
pub struct BetrayalTable<'a> {
    pub histogram: &'a [(u64, u64)],
    pub roll_calls: &'a [RollCall],
}

impl Display for BetrayalTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{:>8}  {:>10}", "Betrayals", "Roll calls")?;
        for (betrayals, count) in self.histogram.iter() {
            writeln!(f, "{:>9}  {:>10}", betrayals, count)?;
        }
        let large: Vec<&str> = self
            .roll_calls
            .iter()
            .filter(|rc| rc.betrayal_count() > BETRAYAL_LISTING_THRESHOLD)
            .map(|rc| rc.id())
            .collect();
        if !large.is_empty() {
            writeln!(
                f,
                "\nMore than {} betrayals: {}",
                BETRAYAL_LISTING_THRESHOLD,
                large.join(", ")
            )?;
        }
        Ok(())
    }
}

pub fn render_report(report: &Report, file_failures: &[FileFailure]) -> String {
    ReportTable {
        report,
        file_failures,
    }
    .to_string()
}

pub fn render_resolutions(hist: &[(String, u64)]) -> String {
    ResolutionTable(hist).to_string()
}

pub fn render_betrayals(histogram: &[(u64, u64)], roll_calls: &[RollCall]) -> String {
    BetrayalTable {
        histogram,
        roll_calls,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roll_call::builder::Builder;

    fn report() -> Report {
        Report {
            rows: vec![ReportRow {
                legislator: Legislator {
                    id: "S252".to_string(),
                    name: "Susan M. Collins".to_string(),
                    parties: ["Republican".to_string()].into_iter().collect(),
                    states: ["ME".to_string()].into_iter().collect(),
                    is_current: true,
                },
                ballot_count: 10,
                total_defections: 4,
                total_defection_pct: 0.4,
                effective_count: 3,
                futile_count: 1,
                success_pct: 0.75,
            }],
            failures: vec![],
        }
    }

    #[test]
    fn table() {
        let s = render_report(&report(), &[]);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Ballots  Defect  Defect%  Betray  Futile  Success%"));
        assert_eq!(
            lines[1],
            "     10       4    40.0%       3       1     75.0%  Susan M. Collins Republican - ME"
        );
    }

    #[test]
    fn skipped_records() {
        let failures = vec![FileFailure {
            path: "data/2013/s1/data.json".to_string(),
            error: SenateError::NoYears {},
        }];
        let s = render_report(&report(), &failures);
        assert!(s.contains("Skipped 1 records:"));
        assert!(s.contains("data/2013/s1/data.json: No year to analyze"));

        let mut r = report();
        r.rows.clear();
        r.failures.push(RecordFailure {
            roll_call_id: "s7-113.2013".to_string(),
            error: AnalysisError::UnknownLegislator {
                legislator_id: "S999".to_string(),
            },
        });
        let s = ReportTable {
            report: &r,
            file_failures: &failures,
        }
        .to_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(
            lines[1..],
            [
                "",
                "Skipped 2 records:",
                "  data/2013/s1/data.json: No year to analyze",
                "  s7-113.2013: unknown legislator S999",
            ]
        );
    }

    #[test]
    fn resolutions() {
        let hist = vec![
            ("Bill Passed".to_string(), 12),
            ("Veto Sustained".to_string(), 1),
        ];
        let s = render_resolutions(&hist);
        assert_eq!(s, "    12  Bill Passed\n     1  Veto Sustained\n");
    }

    #[test]
    fn betrayals() {
        let mut b = Builder::new("s40-113.2013", "1/2").unwrap().resolution("Bill Passed");
        for i in 0..40 {
            b.add_ballot(&format!("D{}", i), "D", "Yea").unwrap();
        }
        for i in 0..70 {
            let label = if i < 31 { "Yea" } else { "Nay" };
            b.add_ballot(&format!("R{}", i), "R", label).unwrap();
        }
        let rc = b.build().unwrap();
        assert_eq!(rc.betrayal_count(), 31);
        let s = render_betrayals(&[(31, 1)], &[rc]);
        assert!(s.contains("More than 30 betrayals: s40-113.2013"));
    }
}
