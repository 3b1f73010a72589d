pub use crate::config::*;
use crate::RollCall;

/// A builder for roll calls, starting from the labels found in the records.
///
/// ```
/// pub use roll_call::builder::Builder;
/// # use roll_call::AnalysisError;
///
/// let mut builder = Builder::new("s12-113.2013", "1/2")?.resolution("Bill Passed");
///
/// builder.add_ballot("S001", "D", "Yea")?;
/// builder.add_ballot("S002", "R", "Nay")?;
/// builder.add_ballot("S003", "R", "Yea")?;
///
/// let roll_call = builder.build()?;
/// assert_eq!(roll_call.betrayal_count(), 1);
///
/// # Ok::<(), AnalysisError>(())
/// ```
pub struct Builder {
    pub(crate) _id: String,
    pub(crate) _requires: MajorityRule,
    pub(crate) _resolution: String,
    pub(crate) _ballots: Vec<BallotRecord>,
}

impl Builder {
    /// Fails if the majority rule is not one of "1/2", "2/3" or "3/5".
    pub fn new(id: &str, requires: &str) -> Result<Builder, AnalysisError> {
        Ok(Builder {
            _id: id.to_string(),
            _requires: MajorityRule::parse(requires)?,
            _resolution: String::new(),
            _ballots: Vec::new(),
        })
    }

    pub fn resolution(self, text: &str) -> Builder {
        Builder {
            _resolution: text.to_string(),
            ..self
        }
    }

    /// Adds a ballot, using the label of the record ("Yea", "Nay", "Guilty", ...).
    ///
    /// Unknown labels are rejected. Abstentions should not be added.
    pub fn add_ballot(
        &mut self,
        legislator_id: &str,
        party: &str,
        label: &str,
    ) -> Result<(), AnalysisError> {
        let answer = Answer::from_label(label)?;
        self.add_ballot_2(BallotRecord {
            legislator_id: legislator_id.to_string(),
            party: party.to_string(),
            answer,
        })
    }

    pub fn add_ballot_2(&mut self, ballot: BallotRecord) -> Result<(), AnalysisError> {
        self._ballots.push(ballot);
        Ok(())
    }

    pub fn num_ballots(&self) -> usize {
        self._ballots.len()
    }

    /// Classifies the roll call.
    pub fn build(self) -> Result<RollCall, AnalysisError> {
        RollCall::new(&self._id, self._requires, &self._resolution, self._ballots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let mut b = Builder::new("x", "2/3").unwrap().resolution("Guilty");
        b.add_ballot("S1", "D", "Guilty").unwrap();
        b.add_ballot("S2", "R", "Not Guilty").unwrap();
        assert_eq!(
            b.add_ballot("S3", "R", "Present"),
            Err(AnalysisError::UnknownAnswerLabel {
                label: "Present".to_string()
            })
        );
        assert_eq!(b.num_ballots(), 2);
        let rc = b.build().unwrap();
        assert_eq!(rc.requires(), MajorityRule::TwoThirds);
        assert_eq!(rc.outcome(), Answer::Aye);
        assert_eq!(rc.resolution(), "Guilty");
    }

    #[test]
    fn bad_rule() {
        assert!(matches!(
            Builder::new("x", "unanimous"),
            Err(AnalysisError::UnknownMajorityRule { .. })
        ));
    }

    #[test]
    fn no_ballot() {
        let b = Builder::new("x", "1/2").unwrap().resolution("Bill Passed");
        assert!(matches!(
            b.build(),
            Err(AnalysisError::MalformedRollCall { .. })
        ));
    }
}
