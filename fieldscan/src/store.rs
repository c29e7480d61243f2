// fieldscan/src/store.rs
//! File-backed content repository.
//!
//! `FileStore` reads documents and components from one YAML or JSON file and
//! serves them through the core collaborator traits. Canonical URLs are built
//! from a base URL as `{base_url}/node/{id}`.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use fieldscan_core::{Component, ComponentStore, Document, DocumentStore, EntityId, UrlGenerator};

fn default_true() -> bool {
    true
}

/// A document plus the access flag the store enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(flatten)]
    pub document: Document,
    /// Documents with `viewable: false` are hidden from access-checked queries.
    #[serde(default = "default_true")]
    pub viewable: bool,
}

/// On-disk layout of a repository file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RepositoryFile {
    #[serde(default)]
    pub documents: Vec<StoredDocument>,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    documents: BTreeMap<EntityId, StoredDocument>,
    components: BTreeMap<EntityId, Component>,
    base_url: String,
}

impl FileStore {
    /// Loads a repository file; `.json` files are read as JSON, anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P, base_url: &str) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read repository file {}", path.display()))?;
        let file: RepositoryFile = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse repository file {}", path.display()))?,
            _ => serde_yml::from_str(&text)
                .with_context(|| format!("Failed to parse repository file {}", path.display()))?,
        };
        let store = Self::from_file(file, base_url);
        info!(
            "Loaded {} documents and {} components from {}.",
            store.documents.len(),
            store.components.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn from_file(file: RepositoryFile, base_url: &str) -> Self {
        Self {
            documents: file
                .documents
                .into_iter()
                .map(|d| (d.document.id, d))
                .collect(),
            components: file.components.into_iter().map(|c| (c.id, c)).collect(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DocumentStore for FileStore {
    /// Ids come back in ascending order.
    fn query_ids(&self, content_type: &str, access_check: bool) -> Result<Vec<EntityId>> {
        let ids: Vec<EntityId> = self
            .documents
            .values()
            .filter(|d| d.document.content_type == content_type)
            .filter(|d| !access_check || d.viewable)
            .map(|d| d.document.id)
            .collect();
        debug!(
            "Query type='{}' access_check={} returned {} ids.",
            content_type,
            access_check,
            ids.len()
        );
        Ok(ids)
    }

    fn load(&self, id: EntityId) -> Result<Option<Document>> {
        Ok(self.documents.get(&id).map(|d| d.document.clone()))
    }
}

impl ComponentStore for FileStore {
    fn load_component(&self, id: EntityId) -> Result<Option<Component>> {
        Ok(self.components.get(&id).cloned())
    }
}

impl UrlGenerator for FileStore {
    fn canonical_url(&self, id: EntityId) -> Result<String> {
        Ok(format!("{}/node/{}", self.base_url, id))
    }
}
