// fieldscan-core/src/extractor.rs
//! Field extraction: turns a loaded document into the texts a report scans.
//!
//! Extraction is lazy. For section reports each component is only loaded when
//! the iterator reaches its reference, and dropped once its fields have been
//! handed out.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use log::debug;

use crate::config::FieldSource;
use crate::document::{Document, EntityId, FieldType};
use crate::errors::FieldscanError;
use crate::store::ComponentStore;

/// One piece of text to scan and the label it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// Field name for flat sources, `<component id>/<field name>` for sections.
    pub label: String,
    pub text: String,
}

/// Yields the scan targets of `document` according to `source`.
///
/// A document without the source field, or whose components hold no text of
/// an allowed type, yields nothing. References that do not resolve are
/// skipped; a failing component store is yielded as an error.
pub fn extract_fields<'a>(
    document: &'a Document,
    source: &'a FieldSource,
    components: &'a dyn ComponentStore,
) -> Box<dyn Iterator<Item = Result<ScanTarget>> + 'a> {
    match source {
        FieldSource::Flat { field } => {
            let target = document
                .field(field)
                .and_then(|f| f.text_value())
                .map(|text| {
                    Ok::<_, anyhow::Error>(ScanTarget {
                        label: field.clone(),
                        text: text.to_string(),
                    })
                });
            Box::new(target.into_iter())
        }
        FieldSource::Sections { field, text_types } => {
            let target_ids: &[EntityId] = document
                .field(field)
                .map(|f| f.target_ids.as_slice())
                .unwrap_or(&[]);
            Box::new(
                target_ids
                    .iter()
                    .flat_map(move |&id| component_targets(components, id, text_types)),
            )
        }
    }
}

fn component_targets(
    components: &dyn ComponentStore,
    id: EntityId,
    text_types: &[FieldType],
) -> Vec<Result<ScanTarget>> {
    let component = match components.load_component(id) {
        Ok(Some(component)) => component,
        Ok(None) => {
            debug!("Component {} could not be resolved; skipping reference.", id);
            return Vec::new();
        }
        Err(e) => {
            let err = FieldscanError::unavailable("component load", format!("{:#}", e));
            return vec![Err(
                anyhow::Error::new(err).context(format!("Failed to load component {}", id)),
            )];
        }
    };

    component
        .fields
        .into_iter()
        .filter(|f| text_types.contains(&f.field_type))
        .filter_map(|f| {
            let text = f.value.filter(|v| !v.is_empty())?;
            Some(Ok(ScanTarget {
                label: format!("{}/{}", id, f.name),
                text,
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Component, Field};
    use anyhow::anyhow;
    use std::collections::HashMap;

    struct MapComponents(HashMap<EntityId, Component>);

    impl ComponentStore for MapComponents {
        fn load_component(&self, id: EntityId) -> Result<Option<Component>> {
            Ok(self.0.get(&id).cloned())
        }
    }

    struct BrokenComponents;

    impl ComponentStore for BrokenComponents {
        fn load_component(&self, _id: EntityId) -> Result<Option<Component>> {
            Err(anyhow!("connection refused"))
        }
    }

    fn doc(fields: Vec<Field>) -> Document {
        Document {
            id: 1,
            title: "Bins".to_string(),
            content_type: "html_page".to_string(),
            published: true,
            fields,
        }
    }

    fn sections() -> FieldSource {
        FieldSource::Sections {
            field: "field_section".to_string(),
            text_types: FieldType::default_text_types(),
        }
    }

    #[test]
    fn test_flat_yields_single_body_target() {
        let document = doc(vec![Field::text("body", FieldType::TextWithSummary, "hello")]);
        let source = FieldSource::Flat { field: "body".to_string() };
        let store = MapComponents(HashMap::new());
        let targets: Vec<_> = extract_fields(&document, &source, &store)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            targets,
            vec![ScanTarget { label: "body".to_string(), text: "hello".to_string() }]
        );
    }

    #[test]
    fn test_flat_missing_or_empty_field_yields_nothing() {
        let source = FieldSource::Flat { field: "body".to_string() };
        let store = MapComponents(HashMap::new());
        assert_eq!(extract_fields(&doc(vec![]), &source, &store).count(), 0);
        let empty = doc(vec![Field::text("body", FieldType::TextWithSummary, "")]);
        assert_eq!(extract_fields(&empty, &source, &store).count(), 0);
    }

    #[test]
    fn test_sections_filter_types_and_skip_unresolved() {
        let mut map = HashMap::new();
        map.insert(
            10,
            Component {
                id: 10,
                fields: vec![
                    Field::text("field_heading", FieldType::PlainText, "cityclean heading"),
                    Field::text("field_text", FieldType::TextLong, "first"),
                    Field::text("field_summary", FieldType::TextWithSummary, ""),
                ],
            },
        );
        map.insert(
            11,
            Component {
                id: 11,
                fields: vec![Field::text("field_text", FieldType::TextWithSummary, "second")],
            },
        );
        let store = MapComponents(map);
        let document = doc(vec![Field::references("field_section", vec![10, 99, 11])]);

        let source = sections();
        let targets: Vec<_> = extract_fields(&document, &source, &store)
            .collect::<Result<_>>()
            .unwrap();
        let labels: Vec<_> = targets.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["10/field_text", "11/field_text"]);
    }

    #[test]
    fn test_sections_store_failure_is_yielded() {
        let document = doc(vec![Field::references("field_section", vec![5])]);
        let source = sections();
        let results: Vec<_> = extract_fields(&document, &source, &BrokenComponents).collect();
        assert_eq!(results.len(), 1);
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FieldscanError>(),
            Some(FieldscanError::Unavailable { collaborator: "component load", .. })
        ));
    }
}
