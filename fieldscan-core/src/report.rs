// fieldscan-core/src/report.rs
//! Row rendering and report assembly.
//!
//! A report is either the terminal "no documents" message or a table of the
//! documents that matched. Two markup flavours are produced from the same
//! rows: [`MarkupMode::Corrected`] renders a full, escaped document through a
//! template; [`MarkupMode::Legacy`] reproduces the deployed handlers byte for
//! byte, quirks included. Legacy output follows the handler that matches the
//! report's dedup policy: per-document reports get the body handler's title
//! only header and linked URLs, raw reports get the section handler's count
//! header with its unclosed title paragraph, bare URLs and the misnested status
//! cell. The matches label is whatever the report configures.
//!
//! License: MIT OR Apache-2.0

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::config::{DedupPolicy, MarkupMode, ReportDefinition};
use crate::document::{EntityId, PublicationStatus};
use crate::errors::FieldscanError;
use crate::match_result::MatchResult;

/// Body returned when the lister finds no documents at all.
pub const NO_DOCUMENTS_MESSAGE: &str = "<h1>No nodes found</h1>";

const TABLE_OPEN: &str = r#"<table border="1" cellpadding="5" cellspacing="0">"#;

const CORRECTED_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<p>Node count: {scanned}</p>
<p>{title}</p>
<table border="1" cellpadding="5" cellspacing="0">
<thead><tr><th>Node ID</th><th>Title</th><th>Page URL</th><th>Content Type</th><th>{matches_label}</th><th>Status</th></tr></thead>
<tbody>
{{ for row in rows }}<tr><td>{row.id}</td><td>{row.title}</td><td><a href="{row.url}" target="_blank">{row.url}</a></td><td>{row.content_type}</td><td>{{ if row.line_per_match }}{{ for m in row.matches }}{m}<br />{{ endfor }}{{ else }}{row.matched_text}{{ endif }}</td><td>{row.status}</td></tr>
{{ endfor }}</tbody>
</table>
</body>
</html>
"#;

/// Per-document metadata shown next to the matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMeta {
    pub id: EntityId,
    pub title: String,
    pub url: String,
    pub content_type: String,
    pub status: PublicationStatus,
}

/// One table row: a document that produced at least one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub id: EntityId,
    pub title: String,
    pub url: String,
    pub content_type: String,
    pub matches: Vec<String>,
    pub policy: DedupPolicy,
    pub status: PublicationStatus,
}

impl ReportRow {
    /// Matches as one string: comma-separated for per-document rows, one
    /// match per line for raw rows.
    pub fn matched_text(&self) -> String {
        match self.policy {
            DedupPolicy::PerDocument => self.matches.join(", "),
            DedupPolicy::Raw => self.matches.join("\n"),
        }
    }
}

/// Builds the row for a document, or `None` when it matched nothing.
pub fn render_row(meta: RowMeta, result: MatchResult, policy: DedupPolicy) -> Option<ReportRow> {
    if result.is_empty() {
        return None;
    }
    Some(ReportRow {
        id: meta.id,
        title: meta.title,
        url: meta.url,
        content_type: meta.content_type,
        matches: result.matches,
        policy,
        status: meta.status,
    })
}

/// What a report run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The lister returned nothing; no table is rendered.
    NoDocuments,
    /// `scanned` documents were listed, `rows` of them matched.
    Table { scanned: usize, rows: Vec<ReportRow> },
}

impl ReportOutcome {
    pub fn rows(&self) -> &[ReportRow] {
        match self {
            ReportOutcome::NoDocuments => &[],
            ReportOutcome::Table { rows, .. } => rows,
        }
    }
}

#[derive(Serialize)]
struct RowContext<'a> {
    id: EntityId,
    title: &'a str,
    url: &'a str,
    content_type: &'a str,
    matched_text: String,
    matches: &'a [String],
    line_per_match: bool,
    status: String,
}

#[derive(Serialize)]
struct TableContext<'a> {
    title: &'a str,
    matches_label: &'a str,
    scanned: usize,
    rows: Vec<RowContext<'a>>,
}

/// Renders the response body for `outcome`.
pub fn assemble_report(
    definition: &ReportDefinition,
    outcome: &ReportOutcome,
) -> Result<String, FieldscanError> {
    let (scanned, rows) = match outcome {
        ReportOutcome::NoDocuments => return Ok(NO_DOCUMENTS_MESSAGE.to_string()),
        ReportOutcome::Table { scanned, rows } => (*scanned, rows),
    };

    match definition.markup {
        MarkupMode::Corrected => render_corrected(definition, scanned, rows),
        MarkupMode::Legacy => Ok(render_legacy(definition, scanned, rows)),
    }
}

fn render_corrected(
    definition: &ReportDefinition,
    scanned: usize,
    rows: &[ReportRow],
) -> Result<String, FieldscanError> {
    let mut tt = TinyTemplate::new();
    tt.add_template("report", CORRECTED_TEMPLATE)
        .map_err(|e| FieldscanError::TemplateError(e.to_string()))?;

    let ctx = TableContext {
        title: &definition.title,
        matches_label: &definition.matches_label,
        scanned,
        rows: rows
            .iter()
            .map(|row| RowContext {
                id: row.id,
                title: &row.title,
                url: &row.url,
                content_type: &row.content_type,
                matched_text: row.matched_text(),
                matches: &row.matches,
                line_per_match: row.policy == DedupPolicy::Raw,
                status: row.status.to_string(),
            })
            .collect(),
    };

    tt.render("report", &ctx)
        .map_err(|e| FieldscanError::TemplateError(e.to_string()))
}

fn render_legacy(definition: &ReportDefinition, scanned: usize, rows: &[ReportRow]) -> String {
    let mut html = legacy_header(definition, scanned);
    html.push_str(TABLE_OPEN);
    html.push_str("<thead><tr>");
    for label in [
        "Node ID",
        "Title",
        "Page URL",
        "Content Type",
        definition.matches_label.as_str(),
        "Status",
    ] {
        html.push_str(&format!("<th>{}</th>", label));
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        html.push_str(&legacy_row(row));
    }

    html.push_str("</tbody></table>");
    html
}

/// The deployed per-document handler printed only the title. The raw one
/// printed the count, then a title paragraph it never closed.
fn legacy_header(definition: &ReportDefinition, scanned: usize) -> String {
    match definition.dedup {
        DedupPolicy::PerDocument => format!("<p>{}</p>", definition.title),
        DedupPolicy::Raw => format!("<p>Node count: {}</p><p>{}<p>", scanned, definition.title),
    }
}

fn legacy_row(row: &ReportRow) -> String {
    let mut html = format!(
        "<tr><td>{}</td><td>{}</td>",
        row.id, row.title
    );
    match row.policy {
        DedupPolicy::PerDocument => {
            html.push_str(&format!(
                "<td><a href=\"{url}\" target=\"_blank\">{url}</a></td>",
                url = row.url
            ));
            html.push_str(&format!("<td>{}</td>", row.content_type));
            html.push_str(&format!("<td>{}</td>", row.matched_text()));
            html.push_str(&format!("<td>{}</td>", row.status));
        }
        DedupPolicy::Raw => {
            html.push_str(&format!("<td>{}</td>", row.url));
            html.push_str(&format!("<td>{}</td>", row.content_type));
            html.push_str("<td>");
            for m in &row.matches {
                html.push_str(m);
                html.push_str("<br />");
            }
            // The deployed markup opens the status cell inside the matches cell.
            html.push_str(&format!("<td>{}</td>", row.status));
            html.push_str("</td>");
        }
    }
    html.push_str("</tr>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldSource;

    fn definition(dedup: DedupPolicy, markup: MarkupMode) -> ReportDefinition {
        ReportDefinition {
            name: "body".to_string(),
            title: "Body Field Data Extraction".to_string(),
            content_type: "localgov_services_page".to_string(),
            access_check: true,
            source: FieldSource::Flat { field: "body".to_string() },
            dedup,
            markup,
            matches_label: "Matched Text".to_string(),
            rules: None,
        }
    }

    fn row(policy: DedupPolicy, matches: &[&str]) -> ReportRow {
        render_row(
            RowMeta {
                id: 7,
                title: "Bins & Recycling".to_string(),
                url: "https://example.org/node/7".to_string(),
                content_type: "localgov_services_page".to_string(),
                status: PublicationStatus::Published,
            },
            MatchResult {
                document_id: 7,
                matches: matches.iter().map(|s| s.to_string()).collect(),
            },
            policy,
        )
        .unwrap()
    }

    #[test]
    fn test_render_row_skips_empty_matches() {
        let meta = RowMeta {
            id: 1,
            title: "t".to_string(),
            url: "u".to_string(),
            content_type: "c".to_string(),
            status: PublicationStatus::Unpublished,
        };
        let result = MatchResult { document_id: 1, matches: vec![] };
        assert!(render_row(meta, result, DedupPolicy::PerDocument).is_none());
    }

    #[test]
    fn test_matched_text_joins_by_policy() {
        assert_eq!(row(DedupPolicy::PerDocument, &["a", "b"]).matched_text(), "a, b");
        assert_eq!(row(DedupPolicy::Raw, &["a", "a"]).matched_text(), "a\na");
    }

    #[test]
    fn test_no_documents_short_circuits() {
        let body = assemble_report(
            &definition(DedupPolicy::PerDocument, MarkupMode::Corrected),
            &ReportOutcome::NoDocuments,
        )
        .unwrap();
        assert_eq!(body, NO_DOCUMENTS_MESSAGE);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let body = assemble_report(
            &definition(DedupPolicy::PerDocument, MarkupMode::Corrected),
            &ReportOutcome::Table { scanned: 3, rows: vec![] },
        )
        .unwrap();
        assert!(body.contains("<p>Node count: 3</p>"));
        assert!(body.contains("<th>Node ID</th><th>Title</th><th>Page URL</th><th>Content Type</th><th>Matched Text</th><th>Status</th>"));
        assert!(!body.contains("<tr><td>"));
        assert!(body.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_corrected_escapes_and_nests_cells() {
        let def = definition(DedupPolicy::Raw, MarkupMode::Corrected);
        let outcome = ReportOutcome::Table {
            scanned: 1,
            rows: vec![row(DedupPolicy::Raw, &["cityclean", "<b>cityclean</b>"])],
        };
        let body = assemble_report(&def, &outcome).unwrap();
        assert!(body.contains("<td>Bins &amp; Recycling</td>"));
        assert!(body.contains("<td>cityclean<br />&lt;b&gt;cityclean&lt;/b&gt;<br /></td><td>Published</td></tr>"));
    }

    #[test]
    fn test_legacy_per_document_row_is_byte_compatible() {
        let def = definition(DedupPolicy::PerDocument, MarkupMode::Legacy);
        let outcome = ReportOutcome::Table {
            scanned: 1,
            rows: vec![row(DedupPolicy::PerDocument, &["cityclean", "City Clean"])],
        };
        let body = assemble_report(&def, &outcome).unwrap();
        let expected = concat!(
            "<p>Body Field Data Extraction</p>",
            "<table border=\"1\" cellpadding=\"5\" cellspacing=\"0\">",
            "<thead><tr><th>Node ID</th><th>Title</th><th>Page URL</th><th>Content Type</th><th>Matched Text</th><th>Status</th></tr></thead><tbody>",
            "<tr><td>7</td><td>Bins & Recycling</td>",
            "<td><a href=\"https://example.org/node/7\" target=\"_blank\">https://example.org/node/7</a></td>",
            "<td>localgov_services_page</td><td>cityclean, City Clean</td><td>Published</td></tr>",
            "</tbody></table>"
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn test_legacy_raw_report_matches_section_handler_output() {
        let mut def = definition(DedupPolicy::Raw, MarkupMode::Legacy);
        def.title = "HTML Page Data Extraction".to_string();
        def.content_type = "html_page".to_string();
        def.matches_label = "Phone Number".to_string();
        let mut only = row(DedupPolicy::Raw, &["cityclean"]);
        only.content_type = "html_page".to_string();
        only.status = PublicationStatus::Unpublished;
        let outcome = ReportOutcome::Table { scanned: 2, rows: vec![only] };

        let body = assemble_report(&def, &outcome).unwrap();
        let expected = concat!(
            "<p>Node count: 2</p><p>HTML Page Data Extraction<p>",
            "<table border=\"1\" cellpadding=\"5\" cellspacing=\"0\">",
            "<thead><tr><th>Node ID</th><th>Title</th><th>Page URL</th><th>Content Type</th><th>Phone Number</th><th>Status</th></tr></thead><tbody>",
            "<tr><td>7</td><td>Bins & Recycling</td><td>https://example.org/node/7</td><td>html_page</td>",
            "<td>cityclean<br /><td>Unpublished</td></td></tr>",
            "</tbody></table>"
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn test_legacy_raw_row_keeps_misnested_status_cell() {
        let def = definition(DedupPolicy::Raw, MarkupMode::Legacy);
        let outcome = ReportOutcome::Table {
            scanned: 1,
            rows: vec![row(DedupPolicy::Raw, &["cityclean", "cityclean"])],
        };
        let body = assemble_report(&def, &outcome).unwrap();
        assert!(body.contains(
            "<td>https://example.org/node/7</td><td>localgov_services_page</td><td>cityclean<br />cityclean<br /><td>Published</td></td></tr>"
        ));
    }
}
