use serde::{Deserialize, Serialize};

use super::required;
use crate::error::CoreError;

/// Distinct category names in insertion order. Matching is exact and
/// case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trimmed name. `Ok(false)` if it is already present.
    pub fn insert(&mut self, name: &str) -> Result<bool, CoreError> {
        let name = required("category", name)?;
        if self.contains(&name) {
            return Ok(false);
        }
        self.0.push(name);
        Ok(true)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != name);
        self.0.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stored lists may carry blanks or repeats; both are dropped.
impl From<Vec<String>> for CategorySet {
    fn from(names: Vec<String>) -> Self {
        let mut set = Self::new();
        for name in names {
            let _ = set.insert(&name);
        }
        set
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.0
    }
}
