//! A `MatchEngine` implementation backed by compiled regular expressions.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::PatternRule;
use crate::engine::MatchEngine;
use crate::match_result::{log_field_match_debug, log_scan_target_debug, FieldMatch};
use crate::patterns::compiler::{get_or_compile_rules, CompiledPatterns};

#[derive(Debug, Clone)]
pub struct RegexEngine {
    compiled: Arc<CompiledPatterns>,
}

impl RegexEngine {
    /// Builds an engine for `rules`, reusing a cached compilation when the
    /// same rule list was compiled before.
    pub fn new(rules: &[PatternRule]) -> Result<Self> {
        let compiled = get_or_compile_rules(rules)
            .context("Failed to compile pattern rules for RegexEngine")?;
        Ok(Self { compiled })
    }

    /// Wraps an already compiled pattern set.
    pub fn from_compiled(compiled: Arc<CompiledPatterns>) -> Self {
        Self { compiled }
    }
}

impl MatchEngine for RegexEngine {
    fn find_matches(&self, text: &str, source_label: &str) -> Result<Vec<FieldMatch>> {
        log_scan_target_debug(module_path!(), source_label, text);

        let mut matches = Vec::new();
        for pattern in &self.compiled.patterns {
            for m in pattern.regex.find_iter(text) {
                let field_match = FieldMatch {
                    rule_name: pattern.name.clone(),
                    matched_text: m.as_str().to_string(),
                    source_label: source_label.to_string(),
                    start: m.start(),
                    end: m.end(),
                };
                log_field_match_debug(module_path!(), &field_match);
                matches.push(field_match);
            }
        }
        Ok(matches)
    }

    fn compiled_patterns(&self) -> &CompiledPatterns {
        &self.compiled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;

    fn city_clean_engine() -> RegexEngine {
        RegexEngine::new(&[
            PatternRule::new("city_clean_spaced", r"\bcity\s+clean\b"),
            PatternRule::new("cityclean", r"\bcityclean\b"),
        ])
        .unwrap()
    }

    #[test]
    fn test_matches_are_case_insensitive() {
        let engine = city_clean_engine();
        for text in ["CityClean", "city clean", "cityclean", "CITY   CLEAN"] {
            let found = engine.find_matches(text, "body").unwrap();
            assert_eq!(found.len(), 1, "expected one match in {:?}", text);
            assert_eq!(found[0].matched_text, text);
        }
    }

    #[test]
    fn test_global_search_in_pattern_then_position_order() {
        let engine = city_clean_engine();
        let found = engine
            .find_matches("cityclean first, then City Clean, then CITYCLEAN", "body")
            .unwrap();
        let texts: Vec<_> = found.iter().map(|m| m.matched_text.as_str()).collect();
        assert_eq!(texts, vec!["City Clean", "cityclean", "CITYCLEAN"]);
        assert_eq!(found[0].rule_name, "city_clean_spaced");
        assert_eq!(found[1].start, 0);
    }

    #[test]
    fn test_overlapping_patterns_both_report() {
        let engine = RegexEngine::new(&[
            PatternRule::new("word", r"\bclean\b"),
            PatternRule::new("also_word", r"clean"),
        ])
        .unwrap();
        let found = engine.find_matches("keep it clean", "body").unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_default_rules_use_ascii_classes() {
        let config = ScanConfig::load_default().unwrap();
        let report = config.report("body").unwrap();
        let engine = RegexEngine::new(&config.rules_for(report)).unwrap();

        assert!(engine.find_matches("city\u{a0}clean", "body").unwrap().is_empty());
        let found = engine.find_matches("\u{e9}cityclean", "body").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].matched_text, "cityclean");
        assert_eq!(engine.find_matches("City \t Clean", "body").unwrap().len(), 1);
    }

    #[test]
    fn test_word_boundaries_hold() {
        let engine = city_clean_engine();
        assert!(engine.find_matches("citycleaner", "body").unwrap().is_empty());
    }
}
