// fieldscan-core/src/match_result.rs
//! Data structures for pattern matches and the logging helpers around them.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::EntityId;

lazy_static! {
    /// Whether debug logs may carry full field text instead of a preview.
    static ref FULL_TEXT_LOGGING: bool = {
        std::env::var("FIELDSCAN_LOG_FULL_TEXT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One matched substring, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldMatch {
    pub rule_name: String,
    /// Group 0 of the match.
    pub matched_text: String,
    /// Label of the scanned text, e.g. `body` or `12/field_text`.
    pub source_label: String,
    pub start: usize,
    pub end: usize,
}

/// All matches kept for one document after the dedup policy ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub document_id: EntityId,
    pub matches: Vec<String>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Shortens text for log output.
pub fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 48;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{}... [{} chars]", head, text.chars().count())
    }
}

fn get_loggable_content(content: &str) -> String {
    if *FULL_TEXT_LOGGING {
        content.to_string()
    } else {
        preview(content)
    }
}

pub fn log_scan_target_debug(module_path: &str, source_label: &str, text: &str) {
    debug!(
        "{} Scanning '{}': '{}'",
        module_path,
        source_label,
        get_loggable_content(text)
    );
}

pub fn log_field_match_debug(module_path: &str, m: &FieldMatch) {
    debug!(
        "{} Rule '{}' matched '{}' in '{}' at {}..{}",
        module_path,
        m.rule_name,
        get_loggable_content(&m.matched_text),
        m.source_label,
        m.start,
        m.end
    );
}
