//! Configuration management for `fieldscan-core`.
//!
//! This module defines the pattern rules and the report definitions that drive
//! a scan. It handles YAML (de)serialization and provides utilities for
//! loading, merging, filtering and validating configurations.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::document::FieldType;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// File name looked up in the candidate configuration directories.
pub const CONFIG_FILE_NAME: &str = "fieldscan.yaml";

/// A single pattern used by the match engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternRule {
    /// Unique identifier for the rule (e.g., "cityclean").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Matches ignore case unless this is switched off.
    pub case_insensitive: bool,
    /// If true, `^` and `$` match at line boundaries.
    pub multiline: bool,
    /// If true, the rule is skipped unless explicitly enabled.
    pub opt_in: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

impl Default for PatternRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            case_insensitive: true,
            multiline: false,
            opt_in: false,
            enabled: None,
            tags: None,
        }
    }
}

impl PatternRule {
    /// Shorthand for a case-insensitive rule.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    /// Explicit `enabled` wins; otherwise opt-in rules stay off.
    pub fn is_active(&self) -> bool {
        self.enabled.unwrap_or(!self.opt_in)
    }
}

/// Where a report finds the text it scans.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSource {
    /// One body-like field on the document itself.
    Flat { field: String },
    /// A reference field whose components are scanned field by field.
    Sections {
        field: String,
        #[serde(default = "FieldType::default_text_types")]
        text_types: Vec<FieldType>,
    },
}

impl FieldSource {
    pub fn field_name(&self) -> &str {
        match self {
            FieldSource::Flat { field } | FieldSource::Sections { field, .. } => field,
        }
    }
}

/// How matches of one document are folded before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Drop repeated substrings (exact equality), keep first-seen order.
    #[default]
    PerDocument,
    /// Keep every match, including repeats across sections.
    Raw,
}

/// Which flavour of HTML the report assembler emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupMode {
    /// Full, escaped, well-nested HTML document.
    #[default]
    Corrected,
    /// Byte-compatible with the deployed handlers, including their quirks.
    ///
    /// The header and row shape follow the report's [`DedupPolicy`]: the
    /// deployed per-document handler printed no count paragraph, the raw one
    /// left its title paragraph unclosed.
    Legacy,
}

fn default_true() -> bool {
    true
}

fn default_matches_label() -> String {
    "Matched Text".to_string()
}

/// One report served by the application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportDefinition {
    /// Route segment and lookup key (e.g., "body").
    pub name: String,
    /// Paragraph shown above the table.
    pub title: String,
    /// Content type whose documents are listed.
    pub content_type: String,
    #[serde(default = "default_true")]
    pub access_check: bool,
    pub source: FieldSource,
    #[serde(default)]
    pub dedup: DedupPolicy,
    #[serde(default)]
    pub markup: MarkupMode,
    #[serde(default = "default_matches_label")]
    pub matches_label: String,
    /// Restricts the report to these rule names; all active rules when absent.
    #[serde(default)]
    pub rules: Option<Vec<String>>,
}

/// Top-level configuration: the pattern rules plus the reports built on them.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScanConfig {
    #[serde(default)]
    pub rules: Vec<PatternRule>,
    #[serde(default)]
    pub reports: Vec<ReportDefinition>,
}

impl ScanConfig {
    /// Loads and validates a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::load_overlay(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file without validating it.
    ///
    /// An overlay may reference rules that only exist in the defaults, so it
    /// is validated after [`merge_config`], not on its own.
    pub fn load_overlay<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading scan configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ScanConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            "Loaded {} rules and {} reports from file {}.",
            config.rules.len(),
            config.reports.len(),
            path.display()
        );

        Ok(config)
    }

    /// Loads the built-in rules and reports from the embedded configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_reports.yaml");
        let config: ScanConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default configuration")?;

        debug!(
            "Loaded {} default rules and {} default reports.",
            config.rules.len(),
            config.reports.len()
        );
        Ok(config)
    }

    /// Defaults, overlaid with the first configuration file found in
    /// [`candidate_config_paths`].
    pub fn discover() -> Result<Self> {
        let defaults = Self::load_default()?;
        for path in candidate_config_paths() {
            if path.is_file() {
                return Self::with_overlay(defaults, &path);
            }
            debug!("No configuration at {}", path.display());
        }
        Ok(defaults)
    }

    /// Merges the file at `path` over `defaults` and validates the result.
    pub fn with_overlay<P: AsRef<Path>>(defaults: Self, path: P) -> Result<Self> {
        let user = Self::load_overlay(path)?;
        let merged = merge_config(defaults, Some(user));
        merged.validate()?;
        Ok(merged)
    }

    /// Looks up a report by name.
    pub fn report(&self, name: &str) -> Option<&ReportDefinition> {
        self.reports.iter().find(|r| r.name == name)
    }

    /// Rules a report runs with, in configuration order.
    ///
    /// Naming a rule in the report's `rules` list is enough to switch on an
    /// opt-in rule; an explicit `enabled: false` still wins.
    pub fn rules_for(&self, report: &ReportDefinition) -> Vec<PatternRule> {
        match &report.rules {
            Some(names) => self
                .rules
                .iter()
                .filter(|r| names.iter().any(|n| n == &r.name) && r.enabled != Some(false))
                .cloned()
                .collect(),
            None => self.rules.iter().filter(|r| r.is_active()).cloned().collect(),
        }
    }

    /// Filters active rules based on enable/disable lists provided via CLI.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();
        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }
        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        let before = self.rules.len();
        self.rules.retain(|rule| !disable_set.contains(rule.name.as_str()));
        for rule in self.rules.iter_mut() {
            if enable_set.contains(rule.name.as_str()) {
                rule.enabled = Some(true);
            }
        }
        let active = self.rules.iter().filter(|r| r.is_active()).count();
        debug!(
            "Rules after filtering: {} kept of {}, {} active",
            self.rules.len(),
            before,
            active
        );
    }

    /// Checks rule and report integrity.
    pub fn validate(&self) -> Result<()> {
        let mut errors = validate_rules(&self.rules);

        let rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();
        let mut report_names = HashSet::new();
        for report in &self.reports {
            if report.name.is_empty() {
                errors.push("A report has an empty `name` field.".to_string());
            } else if !report_names.insert(report.name.as_str()) {
                errors.push(format!("Duplicate report name found: '{}'.", report.name));
            }
            if report.content_type.is_empty() {
                errors.push(format!("Report '{}' has an empty `content_type`.", report.name));
            }
            if report.source.field_name().is_empty() {
                errors.push(format!("Report '{}' has an empty source field.", report.name));
            }
            for name in report.rules.iter().flatten() {
                if !rule_names.contains(name.as_str()) {
                    errors.push(format!(
                        "Report '{}' references unknown rule '{}'.",
                        report.name, name
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

/// Overlays a user configuration on the defaults.
///
/// Rules and reports are matched by name: a user entry replaces the default in
/// place, new entries are appended. Order is preserved since rule order decides
/// the order matches are reported in.
pub fn merge_config(default_config: ScanConfig, user_config: Option<ScanConfig>) -> ScanConfig {
    let Some(user) = user_config else {
        return default_config;
    };
    debug!(
        "Merging {} user rules and {} user reports over defaults.",
        user.rules.len(),
        user.reports.len()
    );

    let mut rules = default_config.rules;
    for user_rule in user.rules {
        match rules.iter_mut().find(|r| r.name == user_rule.name) {
            Some(existing) => *existing = user_rule,
            None => rules.push(user_rule),
        }
    }

    let mut reports = default_config.reports;
    for user_report in user.reports {
        match reports.iter_mut().find(|r| r.name == user_report.name) {
            Some(existing) => *existing = user_report,
            None => reports.push(user_report),
        }
    }

    debug!("Final configuration: {} rules, {} reports.", rules.len(), reports.len());
    ScanConfig { rules, reports }
}

/// Places a configuration file is looked for, most specific first.
pub fn candidate_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("fieldscan").join(CONFIG_FILE_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fieldscan").join(CONFIG_FILE_NAME));
    }
    paths
}

fn validate_rules(rules: &[PatternRule]) -> Vec<String> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let Some(pattern) = &rule.pattern else {
            errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
            continue;
        };

        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }
        if let Err(e) = regex::Regex::new(pattern) {
            errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
        }
    }

    errors
}
