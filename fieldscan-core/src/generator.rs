// fieldscan-core/src/generator.rs
//! One-shot report generation over injected collaborators.
//!
//! `ReportGenerator` runs one report end to end: list documents, then for each
//! document extract, match and render, then assemble the body. It keeps no
//! state between runs; every document is loaded, scanned and dropped in turn.

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::config::{ReportDefinition, ScanConfig};
use crate::engine::MatchEngine;
use crate::engines::regex_engine::RegexEngine;
use crate::errors::FieldscanError;
use crate::extractor::extract_fields;
use crate::report::{assemble_report, render_row, ReportOutcome, ReportRow, RowMeta};
use crate::store::{ComponentStore, DocumentStore, UrlGenerator};

/// The collaborators a report run reads from.
pub struct ReportGenerator<'a> {
    pub documents: &'a dyn DocumentStore,
    pub components: &'a dyn ComponentStore,
    pub urls: &'a dyn UrlGenerator,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(
        documents: &'a dyn DocumentStore,
        components: &'a dyn ComponentStore,
        urls: &'a dyn UrlGenerator,
    ) -> Self {
        Self {
            documents,
            components,
            urls,
        }
    }

    /// Lists, scans and collects the rows of one report.
    ///
    /// Any collaborator error aborts the run; nothing partial is returned.
    pub fn run(&self, definition: &ReportDefinition, engine: &dyn MatchEngine) -> Result<ReportOutcome> {
        let ids = self
            .documents
            .query_ids(&definition.content_type, definition.access_check)
            .map_err(|e| FieldscanError::unavailable("document query", format!("{:#}", e)))?;

        if ids.is_empty() {
            info!(
                "Report '{}': no documents of type '{}'.",
                definition.name, definition.content_type
            );
            return Ok(ReportOutcome::NoDocuments);
        }

        debug!(
            "Report '{}': scanning {} documents with {} patterns.",
            definition.name,
            ids.len(),
            engine.compiled_patterns().len()
        );

        let mut rows: Vec<ReportRow> = Vec::new();
        for &id in &ids {
            let document = self
                .documents
                .load(id)
                .map_err(|e| FieldscanError::unavailable("document load", format!("{:#}", e)))?;
            let Some(document) = document else {
                warn!("Document {} was listed but could not be loaded; skipping.", id);
                continue;
            };

            let mut targets = extract_fields(&document, &definition.source, self.components);
            let result = engine
                .scan_document(id, &mut targets, definition.dedup)
                .with_context(|| format!("Failed to scan document {}", id))?;
            if result.is_empty() {
                continue;
            }

            let url = self
                .urls
                .canonical_url(id)
                .map_err(|e| FieldscanError::unavailable("url generator", format!("{:#}", e)))?;
            let meta = RowMeta {
                id,
                title: document.title.clone(),
                url,
                content_type: document.content_type.clone(),
                status: document.status(),
            };
            if let Some(row) = render_row(meta, result, definition.dedup) {
                rows.push(row);
            }
        }

        info!(
            "Report '{}': {} of {} documents matched.",
            definition.name,
            rows.len(),
            ids.len()
        );
        Ok(ReportOutcome::Table {
            scanned: ids.len(),
            rows,
        })
    }

    /// Runs a report and renders its body.
    pub fn render(&self, definition: &ReportDefinition, engine: &dyn MatchEngine) -> Result<String> {
        let outcome = self.run(definition, engine)?;
        let body = assemble_report(definition, &outcome)
            .with_context(|| format!("Failed to assemble report '{}'", definition.name))?;
        Ok(body)
    }

    /// Looks the report up in `config`, builds its engine and renders it.
    pub fn render_named(&self, config: &ScanConfig, name: &str) -> Result<String> {
        let definition = config
            .report(name)
            .ok_or_else(|| FieldscanError::UnknownReport(name.to_string()))?;
        let engine = RegexEngine::new(&config.rules_for(definition))?;
        self.render(definition, &engine)
    }
}
