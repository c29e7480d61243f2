// fieldscan-core/src/lib.rs
//! # fieldscan Core Library
//!
//! `fieldscan-core` holds the logic behind the content match reports: given a
//! content repository (behind collaborator traits), list the documents of one
//! content type, pull the text out of the configured fields, run a set of
//! regular expressions over it, and render an HTML table of the documents that
//! matched.
//!
//! The library has no I/O of its own beyond reading configuration files. All
//! storage goes through [`DocumentStore`], [`ComponentStore`] and
//! [`UrlGenerator`], which the caller injects.
//!
//! ## Modules
//!
//! * `config`: `PatternRule`s and `ReportDefinition`s, loading, merging and validation.
//! * `document`: documents, components and typed fields.
//! * `store`: the collaborator traits.
//! * `patterns`: compilation and caching of pattern rules.
//! * `engine`: the `MatchEngine` trait and the dedup policies.
//! * `engines`: concrete engines (`RegexEngine`).
//! * `extractor`: turns a document into the texts to scan.
//! * `match_result`: match records and their logging helpers.
//! * `report`: row rendering and report assembly.
//! * `generator`: the per-request pipeline.
//! * `errors`: the library error type.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use fieldscan_core::{ScanConfig, ReportGenerator};
//! # fn stores() -> (Box<dyn fieldscan_core::DocumentStore>, Box<dyn fieldscan_core::ComponentStore>, Box<dyn fieldscan_core::UrlGenerator>) { unimplemented!() }
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = ScanConfig::load_default()?;
//!     let (documents, components, urls) = stores();
//!     let generator = ReportGenerator::new(documents.as_ref(), components.as_ref(), urls.as_ref());
//!     let html = generator.render_named(&config, "body")?;
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `anyhow::Result`. Errors the caller may want to
//! react to (an unknown report, an unavailable collaborator) are
//! [`FieldscanError`] values and can be recovered with `downcast_ref`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod document;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod extractor;
pub mod generator;
pub mod match_result;
pub mod patterns;
pub mod report;
pub mod store;

/// Configuration types and helpers.
pub use config::{
    candidate_config_paths, merge_config, DedupPolicy, FieldSource, MarkupMode, PatternRule,
    ReportDefinition, ScanConfig, MAX_PATTERN_LENGTH,
};

pub use document::{Component, Document, EntityId, Field, FieldType, PublicationStatus};

pub use errors::FieldscanError;

pub use engine::MatchEngine;
pub use engines::regex_engine::RegexEngine;

pub use extractor::{extract_fields, ScanTarget};

pub use generator::ReportGenerator;

pub use match_result::{FieldMatch, MatchResult};

pub use report::{
    assemble_report, render_row, ReportOutcome, ReportRow, RowMeta, NO_DOCUMENTS_MESSAGE,
};

pub use store::{ComponentStore, DocumentStore, UrlGenerator};

pub use patterns::compiler::{compile_rules, get_or_compile_rules, CompiledPattern, CompiledPatterns};
