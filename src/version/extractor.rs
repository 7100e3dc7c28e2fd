//! Version extraction from artifact paths
//!
//! Pattern sets are evaluated as an ordered rule list: sets in table order,
//! regexes in set order, and the first regex whose first capture group is
//! non-empty wins. Specificity is never inferred; ordering the table from
//! most specific to most generic is the pattern author's job.

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::version::pattern::{PatternSet, PatternTable, SdkType};

/// Successful extraction of a version from a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub version: String,
    /// Name of the pattern set that matched
    pub pattern_name: String,
}

/// A regex from the pattern table that failed to compile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidRule {
    pub pattern_name: String,
    pub source: String,
    pub error: String,
}

struct CompiledPatternSet {
    definition: PatternSet,
    rules: Vec<Regex>,
}

impl CompiledPatternSet {
    fn find(&self, path: &str) -> Option<Extraction> {
        self.rules.iter().find_map(|rule| {
            let version = rule.captures(path)?.get(1)?.as_str();
            (!version.is_empty()).then(|| Extraction {
                version: version.to_string(),
                pattern_name: self.definition.name.clone(),
            })
        })
    }
}

/// Immutable pattern registry with first-match-wins extraction
///
/// Built once from a [`PatternTable`] and never mutated afterwards, so a
/// shared reference can serve any number of concurrent resolutions.
pub struct Extractor {
    sets: Vec<CompiledPatternSet>,
    invalid_rules: Vec<InvalidRule>,
}

impl Extractor {
    /// Compile every regex of the table, keeping the table order.
    ///
    /// Regexes that fail to compile are logged and skipped; the remaining
    /// regexes of the same set are still used.
    pub fn load(table: PatternTable) -> Self {
        let mut invalid_rules = Vec::new();

        let sets = table
            .into_pattern_sets()
            .into_iter()
            .map(|definition| {
                if definition.patterns.is_empty() {
                    warn!("Pattern set '{}' has no patterns", definition.name);
                }

                let rules = definition
                    .patterns
                    .iter()
                    .filter_map(|source| match Regex::new(source) {
                        Ok(rule) => Some(rule),
                        Err(e) => {
                            warn!(
                                "Skipping invalid regex in pattern set '{}': {} ({})",
                                definition.name, source, e
                            );
                            invalid_rules.push(InvalidRule {
                                pattern_name: definition.name.clone(),
                                source: source.clone(),
                                error: e.to_string(),
                            });
                            None
                        }
                    })
                    .collect();

                CompiledPatternSet { definition, rules }
            })
            .collect::<Vec<_>>();

        debug!("Loaded {} pattern sets", sets.len());

        Self {
            sets,
            invalid_rules,
        }
    }

    /// Build an extractor whose `custom` sets take priority over `table`.
    pub fn with_custom_patterns(table: PatternTable, custom: Vec<PatternSet>) -> Self {
        Self::load(table.with_custom(custom))
    }

    /// Try every pattern set regardless of SDK type.
    pub fn extract_any(&self, path: &str) -> Option<Extraction> {
        debug!("Extracting version from path: {}", path);
        self.extract_where(path, |_| true)
    }

    /// Try only pattern sets for `sdk_type` and wildcard sets.
    pub fn extract_by_type(&self, path: &str, sdk_type: &str) -> Option<Extraction> {
        debug!(
            "Extracting version from path (type filter: {}): {}",
            sdk_type, path
        );
        self.extract_where(path, |set| set.sdk_type.applies_to(sdk_type))
    }

    /// Try only the pattern set named `distribution`.
    pub fn extract_by_distribution(&self, path: &str, distribution: &str) -> Option<Extraction> {
        debug!(
            "Extracting version from path (distribution filter: {}): {}",
            distribution, path
        );
        self.extract_where(path, |set| set.name == distribution)
    }

    fn extract_where(
        &self,
        path: &str,
        include: impl Fn(&PatternSet) -> bool,
    ) -> Option<Extraction> {
        let extraction = self
            .sets
            .iter()
            .filter(|set| include(&set.definition))
            .find_map(|set| set.find(path))?;

        debug!(
            "Matched pattern '{}': extracted version {}",
            extraction.pattern_name, extraction.version
        );
        Some(extraction)
    }

    /// Pattern sets that apply to `sdk_type`, wildcard sets included
    pub fn patterns_for_type<'a>(
        &'a self,
        sdk_type: &'a str,
    ) -> impl Iterator<Item = &'a PatternSet> + 'a {
        self.patterns()
            .filter(move |set| set.sdk_type.applies_to(sdk_type))
    }

    pub fn pattern_by_name(&self, name: &str) -> Option<&PatternSet> {
        self.patterns().find(|set| set.name == name)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &PatternSet> {
        self.sets.iter().map(|set| &set.definition)
    }

    /// Regexes skipped at load because they failed to compile
    pub fn invalid_rules(&self) -> &[InvalidRule] {
        &self.invalid_rules
    }

    /// SDK types named by the table, wildcard excluded
    pub fn sdk_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .patterns()
            .filter_map(|set| match &set.sdk_type {
                SdkType::Specific(sdk_type) => Some(sdk_type.as_str()),
                SdkType::Any => None,
            })
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }
}
