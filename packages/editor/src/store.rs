//! # Entity Store
//!
//! Ordered layer stack plus selection and the composite image cache.
//!
//! ## Invariants
//!
//! - Layer IDs are unique for the lifetime of the store
//! - `entities` order is the paint order (index 0 is back-most)
//! - `image_cache` is either `None` (dirty) or matches the current layers
//!
//! ## Cache Coherency
//!
//! Many operations may invalidate the cache, exactly one may populate it:
//! [`EntityStore::set_image_cache`]. Renderers must treat `None` as "recompute
//! before painting".

use crate::errors::EditorError;
use crate::layer::{EntityIdentifier, LayerEntity};
use crate::objects::{ImageSource, ImageWithDims};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Layer stack, selection and composite cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStore {
    /// Back-most first
    pub(crate) entities: Vec<LayerEntity>,

    pub(crate) selected_entity_identifier: Option<EntityIdentifier>,

    pub(crate) image_cache: Option<ImageWithDims>,
}

impl EntityStore {
    /// Empty store: no layers, nothing selected, dirty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers in paint order (back-most first)
    pub fn layers(&self) -> &[LayerEntity] {
        &self.entities
    }

    /// Layer IDs in paint order
    pub fn layer_ids(&self) -> Vec<&str> {
        self.entities.iter().map(|layer| layer.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn selected(&self) -> Option<&EntityIdentifier> {
        self.selected_entity_identifier.as_ref()
    }

    pub fn image_cache(&self) -> Option<&ImageWithDims> {
        self.image_cache.as_ref()
    }

    pub fn is_cache_dirty(&self) -> bool {
        self.image_cache.is_none()
    }

    /// Find a layer by ID
    pub fn layer(&self, id: &str) -> Option<&LayerEntity> {
        self.entities.iter().find(|layer| layer.id == id)
    }

    pub(crate) fn layer_mut(&mut self, id: &str) -> Option<&mut LayerEntity> {
        self.entities.iter_mut().find(|layer| layer.id == id)
    }

    /// Index of a layer in paint order
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.entities.iter().position(|layer| layer.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    /// Find a layer, reporting absence as an error
    pub fn require_layer(&self, id: &str) -> Result<&LayerEntity, EditorError> {
        self.layer(id)
            .ok_or_else(|| EditorError::LayerNotFound(id.to_string()))
    }

    /// Find a layer the caller has already guaranteed exists
    ///
    /// # Panics
    ///
    /// Panics if no layer has this ID. Absence here is a logic error in the
    /// caller, not a runtime condition.
    pub fn expect_layer(&self, id: &str) -> &LayerEntity {
        match self.layer(id) {
            Some(layer) => layer,
            None => panic!("Layer with id {} not found", id),
        }
    }

    /// Append a layer as front-most and select it
    pub(crate) fn push_layer(&mut self, layer: LayerEntity) {
        self.selected_entity_identifier = Some(layer.identifier());
        self.entities.push(layer);
        self.invalidate_cache();
    }

    /// Remove a layer by ID; returns whether anything was removed
    ///
    /// The cache is invalidated either way.
    pub(crate) fn remove_layer(&mut self, id: &str) -> bool {
        let before = self.entities.len();
        self.entities.retain(|layer| layer.id != id);
        self.invalidate_cache();
        self.entities.len() != before
    }

    pub(crate) fn clear_layers(&mut self) {
        self.entities.clear();
        self.invalidate_cache();
    }

    pub(crate) fn invalidate_cache(&mut self) {
        self.image_cache = None;
    }

    /// Store an externally computed composite, or clear it with `None`
    ///
    /// This is the only writer of a non-empty cache.
    pub fn set_image_cache(&mut self, image: Option<&ImageSource>) {
        match image {
            Some(image) => debug!(
                image_name = %image.image_name,
                width = image.width,
                height = image.height,
                "populated image cache"
            ),
            None => debug!("cleared image cache"),
        }
        self.image_cache = image.map(ImageWithDims::from);
    }
}
