// fieldscan-core/src/document.rs
//! Data model for documents and the child components attached to them.
//!
//! These types are what the storage collaborators hand back to the report
//! generator. They are plain, owned values: a document is loaded for one
//! request, scanned, and dropped.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a document or a component.
pub type EntityId = u64;

/// Declared type of a field.
///
/// Only `TextLong` and `TextWithSummary` carry rich text that the section
/// reports scan; the rest exist so a store can describe fields faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    TextLong,
    TextWithSummary,
    /// Plain single-line text.
    #[serde(rename = "string")]
    PlainText,
    EntityReferenceRevisions,
    #[serde(untagged)]
    Other(String),
}

impl FieldType {
    /// The text-bearing types scanned inside components unless a report says otherwise.
    pub fn default_text_types() -> Vec<FieldType> {
        vec![FieldType::TextLong, FieldType::TextWithSummary]
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::TextLong => write!(f, "text_long"),
            FieldType::TextWithSummary => write!(f, "text_with_summary"),
            FieldType::PlainText => write!(f, "string"),
            FieldType::EntityReferenceRevisions => write!(f, "entity_reference_revisions"),
            FieldType::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// A single named field on a document or component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Textual value, if the field carries one.
    #[serde(default)]
    pub value: Option<String>,
    /// Referenced entity ids, for reference fields.
    #[serde(default)]
    pub target_ids: Vec<EntityId>,
}

impl Field {
    /// Builds a text field.
    pub fn text(name: impl Into<String>, field_type: FieldType, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            value: Some(value.into()),
            target_ids: Vec::new(),
        }
    }

    /// Builds a reference field pointing at the given components.
    pub fn references(name: impl Into<String>, target_ids: Vec<EntityId>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::EntityReferenceRevisions,
            value: None,
            target_ids,
        }
    }

    /// A field is empty when it has neither text nor references.
    pub fn is_empty(&self) -> bool {
        self.text_value().is_none() && self.target_ids.is_empty()
    }

    /// The field's text, treating an empty string as absent.
    pub fn text_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// A document of the content repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: EntityId,
    pub title: String,
    pub content_type: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Document {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn status(&self) -> PublicationStatus {
        if self.published {
            PublicationStatus::Published
        } else {
            PublicationStatus::Unpublished
        }
    }
}

/// A child content block owned by a document through a reference field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: EntityId,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Publication status as shown in the report's status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PublicationStatus {
    Published,
    Unpublished,
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicationStatus::Published => write!(f, "Published"),
            PublicationStatus::Unpublished => write!(f, "Unpublished"),
        }
    }
}
