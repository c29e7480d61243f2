// fieldscan/src/commands/check.rs
//! `fieldscan check <FILE>`

use anyhow::Result;
use std::path::Path;

use fieldscan_core::{compile_rules, ScanConfig};

/// Merges `file` over the defaults, validates it, and compiles every report's
/// rules. Nothing is scanned.
pub fn run(file: &Path) -> Result<()> {
    let config = ScanConfig::with_overlay(ScanConfig::load_default()?, file)?;
    for report in &config.reports {
        compile_rules(&config.rules_for(report))?;
    }
    println!(
        "{}: OK ({} rules, {} reports)",
        file.display(),
        config.rules.len(),
        config.reports.len()
    );
    Ok(())
}
