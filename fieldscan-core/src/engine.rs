// fieldscan-core/src/engine.rs
//! Defines the core `MatchEngine` trait.
//!
//! The trait decouples report generation from the way text is matched. The
//! report generator only ever sees a `&dyn MatchEngine`, so tests can hand it
//! an engine built from any pattern set.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use std::collections::HashSet;

use crate::config::DedupPolicy;
use crate::document::EntityId;
use crate::extractor::ScanTarget;
use crate::match_result::{FieldMatch, MatchResult};
use crate::patterns::compiler::CompiledPatterns;

/// Scans text with a fixed, ordered set of patterns.
pub trait MatchEngine: Send + Sync {
    /// Returns every match of every pattern in `text`.
    ///
    /// Results are ordered by pattern, then by position. Only the whole match
    /// (group 0) is reported. A substring that satisfies two patterns shows up
    /// once per pattern.
    fn find_matches(&self, text: &str, source_label: &str) -> Result<Vec<FieldMatch>>;

    /// The compiled patterns this engine runs.
    fn compiled_patterns(&self) -> &CompiledPatterns;

    /// Scans all targets of one document and folds the matches with `policy`.
    ///
    /// Stops at the first target error; nothing partial is returned.
    fn scan_document(
        &self,
        document_id: EntityId,
        targets: &mut dyn Iterator<Item = Result<ScanTarget>>,
        policy: DedupPolicy,
    ) -> Result<MatchResult> {
        let mut matches = Vec::new();
        for target in targets {
            let target = target?;
            matches.extend(
                self.find_matches(&target.text, &target.label)?
                    .into_iter()
                    .map(|m| m.matched_text),
            );
        }
        Ok(MatchResult {
            document_id,
            matches: policy.apply(matches),
        })
    }
}

impl DedupPolicy {
    /// Folds a document's matches according to the policy.
    pub fn apply(self, matches: Vec<String>) -> Vec<String> {
        match self {
            DedupPolicy::Raw => matches,
            DedupPolicy::PerDocument => {
                let mut seen = HashSet::new();
                matches
                    .into_iter()
                    .filter(|m| seen.insert(m.clone()))
                    .collect()
            }
        }
    }
}
