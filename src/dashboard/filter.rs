//! Filter engine
//!
//! Pure derivations over the payload's results: stage counts, the concept
//! universe, and the stage/concept cross-filter. Everything here is total and
//! cheap enough to recompute on every frame.

use super::payload::{ScanResult, CONCEPT_DELIMITER};
use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;
use std::str::FromStr;

/// The two independent filter axes. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub stage: Option<String>,
    pub concept: Option<String>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.stage.is_none() && self.concept.is_none()
    }
}

/// How a concept filter is matched against a result's joined concept string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConceptMatch {
    /// Raw substring containment on the joined string.
    /// Over-matches when one concept label contains another ("AI" matches "AI芯片").
    #[default]
    Substring,
    /// Exact match against the split tag list
    Token,
}

impl FromStr for ConceptMatch {
    type Err = Infallible;

    /// Unknown values fall back to substring
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "token" | "exact" => Self::Token,
            _ => Self::Substring,
        })
    }
}

impl ConceptMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Token => "token",
        }
    }

    fn matches(self, concepts: Option<&str>, wanted: &str) -> bool {
        let Some(joined) = concepts else {
            return false;
        };
        match self {
            Self::Substring => joined.contains(wanted),
            Self::Token => joined.split(CONCEPT_DELIMITER).any(|tag| tag == wanted),
        }
    }
}

/// Count results per stage label. Stages with no results are absent.
pub fn stage_counts(results: &[ScanResult]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        *counts.entry(result.stage.clone()).or_insert(0) += 1;
    }
    counts
}

/// Every distinct concept tag across all results, ascending
pub fn concept_universe(results: &[ScanResult]) -> Vec<String> {
    let tags: BTreeSet<&str> = results.iter().flat_map(|r| r.concept_tags()).collect();
    tags.into_iter().map(str::to_string).collect()
}

/// Keep results matching both axes of the selection, preserving input order
pub fn apply_filters<'a>(
    results: &'a [ScanResult],
    selection: &FilterSelection,
    mode: ConceptMatch,
) -> Vec<&'a ScanResult> {
    results
        .iter()
        .filter(|result| matches_selection(result, selection, mode))
        .collect()
}

/// Whether a single result passes the selection
pub fn matches_selection(
    result: &ScanResult,
    selection: &FilterSelection,
    mode: ConceptMatch,
) -> bool {
    if selection.is_empty() {
        return true;
    }
    if let Some(stage) = &selection.stage {
        if &result.stage != stage {
            return false;
        }
    }
    if let Some(concept) = &selection.concept {
        if !mode.matches(result.concepts.as_deref(), concept) {
            return false;
        }
    }
    true
}
