//! # Layer Transitions
//!
//! The closed set of atomic state changes on an [`EntityStore`].
//!
//! ## Design Principles
//!
//! 1. **Atomic**: A transition fully applies or leaves the store untouched
//! 2. **Self-contained**: IDs are minted before the transition exists, so
//!    replaying a log reproduces the same store
//! 3. **Tolerant**: Targeting a missing layer is a no-op, not an error. The UI
//!    may dispatch against a layer another transition already deleted
//!
//! ## Cache Semantics
//!
//! Every transition that changes visible output clears the composite cache in
//! the same step. `SetImageCache` is the only transition that fills it.
//! `Delete` clears it even when nothing was removed.
//!
//! ## Bounding Boxes
//!
//! `ChangeBbox` resolves its layer and does nothing else. Layer bounds are not
//! tracked, so an empty bbox never clears objects.

use crate::layer::{LayerEntity, LayerOverrides, LAYER_ID_CATEGORY};
use crate::objects::{BrushLine, DrawableObject, EraserLine, ImageObject, ImageSource, RectShape};
use crate::store::EntityStore;
use crate::z_order::ZOrderMove;
use serde::{Deserialize, Serialize};
use strata_common::{IdGenerator, Point, Rect};

/// Category used when minting image object IDs
pub const IMAGE_ID_CATEGORY: &str = "image";

/// Atomic store transitions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Transition {
    /// Append a default layer (with overrides) as front-most and select it
    Add {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        overrides: Option<LayerOverrides>,
    },

    /// Append a fully-formed layer verbatim and select it
    ///
    /// The caller guarantees `data.id` is not already in the store.
    Recall { data: LayerEntity },

    ToggleEnabled { id: String },

    Translate { id: String, position: Point },

    /// Report a layer's bounding box; `None` means empty
    ChangeBbox { id: String, bbox: Option<Rect> },

    /// Re-enable, clear objects, move to origin
    Reset { id: String },

    Delete { id: String },

    DeleteAll,

    SetOpacity { id: String, opacity: f64 },

    MoveOneForward { id: String },

    MoveOneBackward { id: String },

    MoveToFront { id: String },

    MoveToBack { id: String },

    AppendBrushLine {
        id: String,
        #[serde(rename = "brushLine")]
        brush_line: BrushLine,
    },

    AppendEraserLine {
        id: String,
        #[serde(rename = "eraserLine")]
        eraser_line: EraserLine,
    },

    AppendRect { id: String, rect: RectShape },

    /// Convert an external image into a drawable and append it
    AppendImage {
        id: String,
        #[serde(rename = "objectId")]
        object_id: String,
        image: ImageSource,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Point>,
    },

    /// Populate (or explicitly clear) the composite cache
    SetImageCache { image: Option<ImageSource> },

    /// Replace every object with one baked image and move the layer
    Rasterize {
        id: String,
        #[serde(rename = "imageObject")]
        image_object: ImageObject,
        position: Point,
    },
}

/// What a transition did to the store
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Applied,
    Noop { reason: NoopReason },
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied)
    }

    fn layer_not_found(id: &str) -> Self {
        TransitionOutcome::Noop {
            reason: NoopReason::LayerNotFound(id.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoopReason {
    LayerNotFound(String),
    /// Position with a NaN or infinite axis
    NonFinitePosition,
    /// Bounds are accepted but not tracked
    BboxNotTracked,
}

impl std::fmt::Display for NoopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoopReason::LayerNotFound(id) => write!(f, "layer {} not found", id),
            NoopReason::NonFinitePosition => write!(f, "position is not finite"),
            NoopReason::BboxNotTracked => write!(f, "layer bbox is not tracked"),
        }
    }
}

impl Transition {
    /// Build an `Add` with an ID minted from `ids`
    pub fn add(ids: &mut IdGenerator, overrides: Option<LayerOverrides>) -> Self {
        Transition::Add {
            id: ids.new_id(LAYER_ID_CATEGORY),
            overrides,
        }
    }

    /// Build an `AppendImage` with an object ID minted from `ids`
    pub fn append_image(
        ids: &mut IdGenerator,
        layer_id: impl Into<String>,
        image: ImageSource,
        position: Option<Point>,
    ) -> Self {
        Transition::AppendImage {
            id: layer_id.into(),
            object_id: ids.new_id(IMAGE_ID_CATEGORY),
            image,
            position,
        }
    }

    /// Stable name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Transition::Add { .. } => "add",
            Transition::Recall { .. } => "recall",
            Transition::ToggleEnabled { .. } => "toggleEnabled",
            Transition::Translate { .. } => "translate",
            Transition::ChangeBbox { .. } => "changeBbox",
            Transition::Reset { .. } => "reset",
            Transition::Delete { .. } => "delete",
            Transition::DeleteAll => "deleteAll",
            Transition::SetOpacity { .. } => "setOpacity",
            Transition::MoveOneForward { .. } => "moveOneForward",
            Transition::MoveOneBackward { .. } => "moveOneBackward",
            Transition::MoveToFront { .. } => "moveToFront",
            Transition::MoveToBack { .. } => "moveToBack",
            Transition::AppendBrushLine { .. } => "appendBrushLine",
            Transition::AppendEraserLine { .. } => "appendEraserLine",
            Transition::AppendRect { .. } => "appendRect",
            Transition::AppendImage { .. } => "appendImage",
            Transition::SetImageCache { .. } => "setImageCache",
            Transition::Rasterize { .. } => "rasterize",
        }
    }

    /// ID of the layer this transition addresses, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Transition::Recall { data } => Some(&data.id),
            Transition::Add { id, .. }
            | Transition::ToggleEnabled { id }
            | Transition::Translate { id, .. }
            | Transition::ChangeBbox { id, .. }
            | Transition::Reset { id }
            | Transition::Delete { id }
            | Transition::SetOpacity { id, .. }
            | Transition::MoveOneForward { id }
            | Transition::MoveOneBackward { id }
            | Transition::MoveToFront { id }
            | Transition::MoveToBack { id }
            | Transition::AppendBrushLine { id, .. }
            | Transition::AppendEraserLine { id, .. }
            | Transition::AppendRect { id, .. }
            | Transition::AppendImage { id, .. }
            | Transition::Rasterize { id, .. } => Some(id),
            Transition::DeleteAll | Transition::SetImageCache { .. } => None,
        }
    }

    /// Apply this transition to the store
    pub fn apply(&self, store: &mut EntityStore) -> TransitionOutcome {
        match self {
            Transition::Add { id, overrides } => Self::apply_add(store, id, overrides.as_ref()),

            Transition::Recall { data } => {
                store.push_layer(data.clone());
                TransitionOutcome::Applied
            }

            Transition::ToggleEnabled { id } => Self::with_layer(store, id, |layer| {
                layer.is_enabled = !layer.is_enabled;
            }),

            Transition::Translate { id, position } => {
                if !store.contains(id) {
                    return TransitionOutcome::layer_not_found(id);
                }
                if !position.is_finite() {
                    return TransitionOutcome::Noop {
                        reason: NoopReason::NonFinitePosition,
                    };
                }
                Self::with_layer(store, id, |layer| layer.position = *position)
            }

            Transition::ChangeBbox { id, bbox } => Self::apply_change_bbox(store, id, bbox.as_ref()),

            Transition::Reset { id } => Self::with_layer(store, id, LayerEntity::reset),

            Transition::Delete { id } => {
                if store.remove_layer(id) {
                    TransitionOutcome::Applied
                } else {
                    TransitionOutcome::layer_not_found(id)
                }
            }

            Transition::DeleteAll => {
                store.clear_layers();
                TransitionOutcome::Applied
            }

            Transition::SetOpacity { id, opacity } => {
                Self::with_layer(store, id, |layer| layer.opacity = *opacity)
            }

            Transition::MoveOneForward { id } => Self::apply_move(store, id, ZOrderMove::OneForward),
            Transition::MoveOneBackward { id } => Self::apply_move(store, id, ZOrderMove::OneBackward),
            Transition::MoveToFront { id } => Self::apply_move(store, id, ZOrderMove::ToFront),
            Transition::MoveToBack { id } => Self::apply_move(store, id, ZOrderMove::ToBack),

            Transition::AppendBrushLine { id, brush_line } => {
                Self::apply_append(store, id, brush_line.clone().into())
            }

            Transition::AppendEraserLine { id, eraser_line } => {
                Self::apply_append(store, id, eraser_line.clone().into())
            }

            Transition::AppendRect { id, rect } => Self::apply_append(store, id, rect.clone().into()),

            Transition::AppendImage {
                id,
                object_id,
                image,
                position,
            } => {
                let mut object = ImageObject::from_source(object_id.as_str(), image);
                if let Some(position) = position {
                    object.x = position.x;
                    object.y = position.y;
                }
                Self::apply_append(store, id, object.into())
            }

            Transition::SetImageCache { image } => {
                store.set_image_cache(image.as_ref());
                TransitionOutcome::Applied
            }

            Transition::Rasterize {
                id,
                image_object,
                position,
            } => {
                if !store.contains(id) {
                    return TransitionOutcome::layer_not_found(id);
                }
                if !position.is_finite() {
                    return TransitionOutcome::Noop {
                        reason: NoopReason::NonFinitePosition,
                    };
                }
                Self::with_layer(store, id, |layer| {
                    layer.objects = vec![DrawableObject::Image(image_object.clone())];
                    layer.position = *position;
                })
            }
        }
    }

    fn apply_add(store: &mut EntityStore, id: &str, overrides: Option<&LayerOverrides>) -> TransitionOutcome {
        let mut layer = LayerEntity::new(id);
        if let Some(overrides) = overrides {
            overrides.apply_to(&mut layer);
        }
        store.push_layer(layer);
        TransitionOutcome::Applied
    }

    fn apply_change_bbox(store: &EntityStore, id: &str, bbox: Option<&Rect>) -> TransitionOutcome {
        if !store.contains(id) {
            return TransitionOutcome::layer_not_found(id);
        }
        // Layer bounds always come back empty today, so clearing objects on an
        // empty bbox would wipe every layer.
        tracing::trace!(layer_id = id, ?bbox, "ignoring layer bbox");
        TransitionOutcome::Noop {
            reason: NoopReason::BboxNotTracked,
        }
    }

    fn apply_move(store: &mut EntityStore, id: &str, movement: ZOrderMove) -> TransitionOutcome {
        let Some(index) = store.position_of(id) else {
            return TransitionOutcome::layer_not_found(id);
        };
        movement.apply(&mut store.entities, index);
        store.invalidate_cache();
        TransitionOutcome::Applied
    }

    fn apply_append(store: &mut EntityStore, id: &str, object: DrawableObject) -> TransitionOutcome {
        Self::with_layer(store, id, |layer| layer.objects.push(object))
    }

    /// Resolve a layer, run `edit` on it, then invalidate the cache
    fn with_layer(
        store: &mut EntityStore,
        id: &str,
        edit: impl FnOnce(&mut LayerEntity),
    ) -> TransitionOutcome {
        let Some(layer) = store.layer_mut(id) else {
            return TransitionOutcome::layer_not_found(id);
        };
        edit(layer);
        store.invalidate_cache();
        TransitionOutcome::Applied
    }
}
