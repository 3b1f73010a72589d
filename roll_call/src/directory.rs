use std::collections::HashMap;

use crate::config::*;

/// Read-only lookup of legislators by id.
///
/// The directory is built once by the caller and passed explicitly to the
/// aggregation functions.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct LegislatorDirectory {
    legislators: HashMap<String, Legislator>,
}

impl LegislatorDirectory {
    pub fn new() -> LegislatorDirectory {
        LegislatorDirectory::default()
    }

    /// Adds a legislator. Returns the legislator previously registered
    /// under the same id, if any.
    pub fn insert(&mut self, legislator: Legislator) -> Option<Legislator> {
        self.legislators.insert(legislator.id.clone(), legislator)
    }

    pub fn lookup(&self, id: &str) -> Result<&Legislator, AnalysisError> {
        self.legislators
            .get(id)
            .ok_or_else(|| AnalysisError::UnknownLegislator {
                legislator_id: id.to_string(),
            })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.legislators.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.legislators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legislators.is_empty()
    }
}

impl FromIterator<Legislator> for LegislatorDirectory {
    fn from_iter<I: IntoIterator<Item = Legislator>>(iter: I) -> Self {
        let mut res = LegislatorDirectory::new();
        for l in iter {
            res.insert(l);
        }
        res
    }
}
