// fieldscan-core/src/store.rs
//! Collaborator traits for the content repository.
//!
//! The report generator never reaches for storage on its own: every lookup
//! goes through one of these traits, injected by the caller. The application
//! crate ships a file-backed implementation; tests use small in-memory fakes.
//!
//! Contract shared by all loaders: `Ok(None)` means the entity does not exist
//! (recovered locally by the caller), `Err(_)` means the collaborator itself is
//! unavailable and the request must be aborted.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;

use crate::document::{Component, Document, EntityId};

/// Lists and loads documents.
pub trait DocumentStore: Send + Sync {
    /// Returns the ids of all documents of `content_type`.
    ///
    /// When `access_check` is set the store applies its access policy and
    /// omits documents the caller may not view. An empty vector is a valid
    /// answer, not an error.
    fn query_ids(&self, content_type: &str, access_check: bool) -> Result<Vec<EntityId>>;

    /// Loads one document by id.
    fn load(&self, id: EntityId) -> Result<Option<Document>>;
}

/// Resolves component references held by a document.
pub trait ComponentStore: Send + Sync {
    fn load_component(&self, id: EntityId) -> Result<Option<Component>>;
}

/// Converts a document id into an absolute canonical link.
pub trait UrlGenerator: Send + Sync {
    fn canonical_url(&self, id: EntityId) -> Result<String>;
}
