//! Shared-currency group selection

use crate::types::RawTable;
use std::collections::BTreeSet;

/// Countries pre-selected as sharing the reference currency. Not
/// authoritative: names missing from the uploaded workbook are ignored.
pub const DEFAULT_SHARED_CURRENCY: &[&str] = &[
    "France",
    "Ukraine",
    "Sweden",
    "Germany",
    "Finland",
    "Poland, Rep. of",
    "Belgium",
    "Greece",
    "Italy",
    "Ireland",
    "Netherlands, The",
    "Ireland",
];

/// Countries that read their FX rate from the reference row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyGroup {
    members: BTreeSet<String>,
}

impl CurrencyGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            members: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn default_preset() -> Self {
        Self::from_names(DEFAULT_SHARED_CURRENCY)
    }

    pub fn contains(&self, country: &str) -> bool {
        self.members.contains(country)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Keep only members that are row keys of `table`.
    ///
    /// Returns the restricted group and the names that were dropped.
    pub fn restrict_to(&self, table: &RawTable) -> (CurrencyGroup, Vec<String>) {
        let (kept, ignored): (BTreeSet<String>, BTreeSet<String>) = self
            .members
            .iter()
            .cloned()
            .partition(|name| table.contains_key(name));
        (
            CurrencyGroup { members: kept },
            ignored.into_iter().collect(),
        )
    }
}
