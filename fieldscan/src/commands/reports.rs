// fieldscan/src/commands/reports.rs
//! `fieldscan reports`: what is configured, as two tables.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use fieldscan_core::{DedupPolicy, FieldSource, MarkupMode, ScanConfig};

pub fn run(config: &ScanConfig) -> Result<()> {
    println!("{}", reports_table(config));
    println!("{}", rules_table(config));
    Ok(())
}

pub fn reports_table(config: &ScanConfig) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Report", "Title", "Content type", "Source", "Dedup", "Markup", "Rules"]);

    for report in &config.reports {
        let source = match &report.source {
            FieldSource::Flat { field } => field.clone(),
            FieldSource::Sections { field, .. } => format!("{} (sections)", field),
        };
        let dedup = match report.dedup {
            DedupPolicy::PerDocument => "per document",
            DedupPolicy::Raw => "raw",
        };
        let markup = match report.markup {
            MarkupMode::Corrected => "corrected",
            MarkupMode::Legacy => "legacy",
        };
        let rules: Vec<String> = config.rules_for(report).into_iter().map(|r| r.name).collect();
        table.add_row(vec![
            report.name.clone(),
            report.title.clone(),
            report.content_type.clone(),
            source,
            dedup.to_string(),
            markup.to_string(),
            rules.join(", "),
        ]);
    }
    table
}

pub fn rules_table(config: &ScanConfig) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Pattern", "Active", "Description"]);

    for rule in &config.rules {
        table.add_row(vec![
            rule.name.clone(),
            rule.pattern.clone().unwrap_or_default(),
            if rule.is_active() { "yes" } else { "opt-in" }.to_string(),
            rule.description.clone().unwrap_or_default(),
        ]);
    }
    table
}
