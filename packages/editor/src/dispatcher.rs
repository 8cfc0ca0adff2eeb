//! # Transition Dispatcher
//!
//! Single owner of the [`EntityStore`]. Transitions are applied strictly one
//! at a time, in dispatch order; every state observed between dispatches is a
//! fully-applied snapshot.
//!
//! ## Lifecycle
//!
//! ```text
//! prepare (mint IDs) → dispatch → apply → snapshot
//!        ↓                ↓          ↓        ↓
//!   IdGenerator       Transition   Store   &EntityStore
//! ```
//!
//! Work that happens elsewhere (compositing, fetching images) reports back
//! only through `SetImageCache` and `AppendImage`. A late composite simply
//! overwrites the cache, so callers that need cancellation must gate their
//! own async work before dispatching.

use crate::errors::EditorError;
use crate::layer::{LayerEntity, LayerOverrides, LAYER_ID_CATEGORY};
use crate::objects::ImageSource;
use crate::store::EntityStore;
use crate::transitions::{Transition, TransitionOutcome};
use std::path::Path;
use strata_common::{IdGenerator, Point};
use tracing::debug;

/// Owns the store and ID generator for one editing session
#[derive(Debug, Default)]
pub struct Dispatcher {
    store: EntityStore,
    ids: IdGenerator,

    /// Increments on each dispatch
    version: u64,
}

/// Result of dispatching one transition
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    /// Store version after this dispatch
    pub version: u64,
    pub outcome: TransitionOutcome,
}

/// Counts from replaying a transition log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub skipped: usize,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(ids: IdGenerator) -> Self {
        Self::from_store(EntityStore::new(), ids)
    }

    /// Resume from an existing store
    ///
    /// IDs already in `store` are fed to `ids` so new IDs never collide.
    pub fn from_store(store: EntityStore, mut ids: IdGenerator) -> Self {
        for layer in store.layers() {
            observe_layer(&mut ids, layer);
        }
        Self {
            store,
            ids,
            version: 0,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn into_store(self) -> EntityStore {
        self.store
    }

    /// Build an `Add` transition, minting the new layer ID now
    pub fn prepare_add(&mut self, overrides: Option<LayerOverrides>) -> Transition {
        Transition::add(&mut self.ids, overrides)
    }

    /// Build an `AppendImage` transition, minting the image object ID now
    pub fn prepare_append_image(
        &mut self,
        layer_id: &str,
        image: ImageSource,
        position: Option<Point>,
    ) -> Transition {
        Transition::append_image(&mut self.ids, layer_id, image, position)
    }

    /// Add a layer and return its ID
    pub fn add_layer(&mut self, overrides: Option<LayerOverrides>) -> String {
        let id = self.ids.new_id(LAYER_ID_CATEGORY);
        self.dispatch(Transition::Add {
            id: id.clone(),
            overrides,
        });
        id
    }

    /// Apply one transition
    pub fn dispatch(&mut self, transition: Transition) -> DispatchResult {
        self.version += 1;
        self.observe_ids(&transition);
        let outcome = transition.apply(&mut self.store);

        match &outcome {
            TransitionOutcome::Applied => debug!(
                version = self.version,
                transition = transition.name(),
                target = transition.target(),
                cache_dirty = self.store.is_cache_dirty(),
                "applied transition"
            ),
            TransitionOutcome::Noop { reason } => debug!(
                version = self.version,
                transition = transition.name(),
                target = transition.target(),
                %reason,
                "transition had no effect"
            ),
        }

        DispatchResult {
            version: self.version,
            outcome,
        }
    }

    /// Feed IDs carried by a transition to the generator
    fn observe_ids(&mut self, transition: &Transition) {
        match transition {
            Transition::Add { id, overrides } => {
                self.ids.observe(id);
                let objects = overrides.as_ref().and_then(|o| o.objects.as_ref());
                for object in objects.into_iter().flatten() {
                    self.ids.observe(object.id());
                }
            }
            Transition::Recall { data } => observe_layer(&mut self.ids, data),
            Transition::AppendBrushLine { brush_line, .. } => self.ids.observe(&brush_line.id),
            Transition::AppendEraserLine { eraser_line, .. } => self.ids.observe(&eraser_line.id),
            Transition::AppendRect { rect, .. } => self.ids.observe(&rect.id),
            Transition::AppendImage { object_id, .. } => self.ids.observe(object_id),
            Transition::Rasterize { image_object, .. } => self.ids.observe(&image_object.id),
            _ => {}
        }
    }

    /// Dispatch a log of transitions in order
    pub fn replay(&mut self, transitions: impl IntoIterator<Item = Transition>) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for transition in transitions {
            if self.dispatch(transition).outcome.is_applied() {
                summary.applied += 1;
            } else {
                summary.skipped += 1;
            }
        }
        summary
    }
}

fn observe_layer(ids: &mut IdGenerator, layer: &LayerEntity) {
    ids.observe(&layer.id);
    for object in &layer.objects {
        ids.observe(object.id());
    }
}

/// Apply transitions to a store without a dispatcher
pub fn replay<'a>(store: &mut EntityStore, transitions: impl IntoIterator<Item = &'a Transition>) {
    for transition in transitions {
        transition.apply(store);
    }
}

/// Parse a JSON array of transitions
pub fn parse_log(source: &str) -> Result<Vec<Transition>, EditorError> {
    Ok(serde_json::from_str(source)?)
}

/// Read a JSON transition log from disk
pub fn read_log(path: &Path) -> Result<Vec<Transition>, EditorError> {
    let source = std::fs::read_to_string(path)?;
    parse_log(&source)
}
