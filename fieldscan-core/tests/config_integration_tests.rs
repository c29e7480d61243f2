// fieldscan-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;

use fieldscan_core::config::{self, DedupPolicy, FieldSource, MarkupMode, PatternRule, ScanConfig};
use fieldscan_core::FieldType;

fn write_yaml(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_reports() {
    let config = ScanConfig::load_default().unwrap();
    let body = config.report("body").unwrap();
    assert_eq!(body.content_type, "localgov_services_page");
    assert_eq!(body.source, FieldSource::Flat { field: "body".to_string() });
    assert_eq!(body.dedup, DedupPolicy::PerDocument);
    assert!(body.access_check);

    let sections = config.report("sections").unwrap();
    assert_eq!(sections.content_type, "html_page");
    assert_eq!(sections.dedup, DedupPolicy::Raw);
    assert_eq!(
        sections.source,
        FieldSource::Sections {
            field: "field_section".to_string(),
            text_types: vec![FieldType::TextLong, FieldType::TextWithSummary],
        }
    );
}

#[test]
fn test_load_from_file_applies_defaults() -> Result<()> {
    let file = write_yaml(
        r#"
rules:
  - name: phone
    pattern: '0\d{4}\s?\d{3}\s?\d{3}'
reports:
  - name: phones
    title: "Phone numbers"
    content_type: article
    source:
      kind: sections
      field: field_blocks
"#,
    )?;
    let config = ScanConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert!(config.rules[0].case_insensitive);
    assert!(config.rules[0].is_active());

    let report = config.report("phones").unwrap();
    assert_eq!(report.dedup, DedupPolicy::PerDocument);
    assert_eq!(report.markup, MarkupMode::Corrected);
    assert_eq!(report.matches_label, "Matched Text");
    assert_eq!(
        report.source,
        FieldSource::Sections {
            field: "field_blocks".to_string(),
            text_types: FieldType::default_text_types(),
        }
    );
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_pattern() -> Result<()> {
    let file = write_yaml(
        r#"
rules:
  - name: broken
    pattern: '(unclosed'
"#,
    )?;
    let err = ScanConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid regex"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_unknown_rule_reference() -> Result<()> {
    let file = write_yaml(
        r#"
rules:
  - name: a
    pattern: 'a'
reports:
  - name: r
    title: "R"
    content_type: page
    source: { kind: flat, field: body }
    rules: [a, missing]
"#,
    )?;
    let err = ScanConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown rule 'missing'"));
    Ok(())
}

#[test]
fn test_merge_config_overrides_in_place_and_appends() -> Result<()> {
    let defaults = ScanConfig::load_default()?;
    let user = ScanConfig {
        rules: vec![
            PatternRule::new("cityclean", r"\bcity-?clean\b"),
            PatternRule::new("new_rule", "new"),
        ],
        reports: vec![],
    };
    let merged = config::merge_config(defaults.clone(), Some(user));

    assert_eq!(merged.rules.len(), defaults.rules.len() + 1);
    let position = merged.rules.iter().position(|r| r.name == "cityclean").unwrap();
    let default_position = defaults.rules.iter().position(|r| r.name == "cityclean").unwrap();
    assert_eq!(position, default_position);
    assert_eq!(merged.rules[position].pattern.as_deref(), Some(r"\bcity-?clean\b"));
    assert_eq!(merged.rules.last().unwrap().name, "new_rule");
    assert_eq!(merged.reports, defaults.reports);
    Ok(())
}

#[test]
fn test_merge_config_without_user_is_identity() -> Result<()> {
    let defaults = ScanConfig::load_default()?;
    assert_eq!(config::merge_config(defaults.clone(), None), defaults);
    Ok(())
}

#[test]
fn test_rules_for_restricts_and_enables_opt_in() -> Result<()> {
    let mut config = ScanConfig::load_default()?;
    let mut report = config.report("body").unwrap().clone();

    let all: Vec<_> = config.rules_for(&report).into_iter().map(|r| r.name).collect();
    assert_eq!(all, vec!["city_clean_spaced", "cityclean"]);

    report.rules = Some(vec!["email".to_string()]);
    let only_email: Vec<_> = config.rules_for(&report).into_iter().map(|r| r.name).collect();
    assert_eq!(only_email, vec!["email"]);

    config.rules.iter_mut().find(|r| r.name == "email").unwrap().enabled = Some(false);
    assert!(config.rules_for(&report).is_empty());
    Ok(())
}

#[test]
fn test_overlay_may_reference_builtin_rules() -> Result<()> {
    let file = write_yaml(
        r#"
reports:
  - name: landlines
    title: "Landlines"
    content_type: localgov_services_page
    source: { kind: flat, field: body }
    rules: [uk_landline]
"#,
    )?;
    assert!(ScanConfig::load_from_file(file.path()).is_err());

    let merged = ScanConfig::with_overlay(ScanConfig::load_default()?, file.path())?;
    let report = merged.report("landlines").expect("overlay report");
    let names: Vec<String> = merged.rules_for(report).into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["uk_landline"]);
    assert!(merged.report("body").is_some());
    Ok(())
}
