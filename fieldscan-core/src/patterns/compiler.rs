//! compiler.rs - Manages the compilation and caching of pattern rules.
//!
//! This module converts a list of `PatternRule`s into `CompiledPatterns`. It
//! keeps a global, shared cache keyed by a hash of the rule list so that every
//! request for the same report reuses one compiled set.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{PatternRule, MAX_PATTERN_LENGTH};
use crate::errors::FieldscanError;

/// A single compiled pattern.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The unique name of the rule it was built from.
    pub name: String,
    pub regex: Regex,
}

/// The ordered set of patterns a scan runs with.
///
/// Order is the configuration order; it only decides the order matches are
/// reported in.
#[derive(Debug, Default)]
pub struct CompiledPatterns {
    pub patterns: Vec<CompiledPattern>,
}

impl CompiledPatterns {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }
}

lazy_static! {
    /// Compiled pattern sets keyed by a hash of their rule list.
    static ref COMPILED_PATTERNS_CACHE: RwLock<HashMap<u64, Arc<CompiledPatterns>>> =
        RwLock::new(HashMap::new());
}

/// Order matters for match order, so the rule list is hashed as given.
fn hash_rules(rules: &[PatternRule]) -> u64 {
    let mut hasher = DefaultHasher::new();
    rules.hash(&mut hasher);
    hasher.finish()
}

/// Compiles rules into `CompiledPatterns`.
///
/// Every failing rule is collected so one error lists them all. Rules without
/// a pattern are skipped with a warning.
pub fn compile_rules(rules: &[PatternRule]) -> Result<CompiledPatterns, FieldscanError> {
    debug!("Starting compilation of {} rules.", rules.len());

    let mut patterns = Vec::with_capacity(rules.len());
    let mut compilation_errors = Vec::new();

    for rule in rules {
        let Some(pattern) = rule.pattern.as_ref() else {
            warn!("Skipping rule '{}' because its pattern is missing.", &rule.name);
            continue;
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(FieldscanError::PatternLengthExceeded(
                rule.name.clone(),
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(pattern)
            .case_insensitive(rule.case_insensitive)
            .multi_line(rule.multiline)
            .size_limit(10 * (1 << 20))
            .build();

        match regex_result {
            Ok(regex) => {
                debug!(
                    target: "fieldscan_core::patterns",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                patterns.push(CompiledPattern {
                    name: rule.name.clone(),
                    regex,
                });
            }
            Err(e) => {
                compilation_errors.push(FieldscanError::RuleCompilationError(rule.name.clone(), e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(FieldscanError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", patterns.len());
    Ok(CompiledPatterns { patterns })
}

/// Returns the cached compiled set for `rules`, compiling it on first use.
pub fn get_or_compile_rules(rules: &[PatternRule]) -> Result<Arc<CompiledPatterns>> {
    let cache_key = hash_rules(rules);

    {
        let cache = COMPILED_PATTERNS_CACHE
            .read()
            .map_err(|_| FieldscanError::Fatal("pattern cache lock poisoned".to_string()))?;
        if let Some(compiled) = cache.get(&cache_key) {
            debug!("Serving compiled patterns from cache for key: {}", cache_key);
            return Ok(Arc::clone(compiled));
        }
    }

    debug!("Compiled patterns not found in cache. Compiling now.");
    let compiled = Arc::new(compile_rules(rules)?);

    COMPILED_PATTERNS_CACHE
        .write()
        .map_err(|_| FieldscanError::Fatal("pattern cache lock poisoned".to_string()))?
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Compiled and cached patterns for key: {}", cache_key);
    Ok(compiled)
}
