//! # Layer Entities
//!
//! A layer is the orderable unit of a canvas document. It has no z-value of
//! its own: its paint order is its position in [`EntityStore`](crate::EntityStore).

use crate::objects::DrawableObject;
use serde::{Deserialize, Serialize};
use strata_common::Point;

/// Category used when minting layer IDs
pub const LAYER_ID_CATEGORY: &str = "layer";

/// Kind of canvas entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Layer,
}

/// Identifies the selected entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityIdentifier {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: String,
}

impl EntityIdentifier {
    pub fn layer(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Layer,
            id: id.into(),
        }
    }
}

/// A single layer and its drawable objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerEntity {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: EntityKind,

    pub is_enabled: bool,

    /// Paint order: first is bottom-most
    pub objects: Vec<DrawableObject>,

    /// Expected in `0.0..=1.0`; not enforced
    pub opacity: f64,

    pub position: Point,
}

impl LayerEntity {
    /// A fresh layer: enabled, empty, fully opaque, at the origin
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Layer,
            is_enabled: true,
            objects: Vec::new(),
            opacity: 1.0,
            position: Point::ORIGIN,
        }
    }

    pub fn identifier(&self) -> EntityIdentifier {
        EntityIdentifier {
            kind: self.kind,
            id: self.id.clone(),
        }
    }

    /// Restore the freshly-created state, keeping ID and opacity
    pub fn reset(&mut self) {
        self.is_enabled = true;
        self.objects.clear();
        self.position = Point::ORIGIN;
    }
}

/// Per-axis position override
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Field-level overrides applied on top of a default layer
///
/// Each field is applied independently and the override always wins.
/// `position` is merged per axis, so overriding `x` keeps the default `y`.
/// `objects` replaces the (empty) default sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<DrawableObject>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionOverride>,
}

impl LayerOverrides {
    pub fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = Some(is_enabled);
        self
    }

    pub fn with_objects(mut self, objects: Vec<DrawableObject>) -> Self {
        self.objects = Some(objects);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_x(mut self, x: f64) -> Self {
        self.position.get_or_insert_with(Default::default).x = Some(x);
        self
    }

    pub fn with_y(mut self, y: f64) -> Self {
        self.position.get_or_insert_with(Default::default).y = Some(y);
        self
    }

    /// Apply every present field to `layer`
    ///
    /// Non-finite position axes are skipped so the layer position stays a
    /// finite point.
    pub fn apply_to(&self, layer: &mut LayerEntity) {
        if let Some(is_enabled) = self.is_enabled {
            layer.is_enabled = is_enabled;
        }
        if let Some(objects) = &self.objects {
            layer.objects = objects.clone();
        }
        if let Some(opacity) = self.opacity {
            layer.opacity = opacity;
        }
        if let Some(position) = self.position {
            if let Some(x) = position.x.filter(|x| x.is_finite()) {
                layer.position.x = x;
            }
            if let Some(y) = position.y.filter(|y| y.is_finite()) {
                layer.position.y = y;
            }
        }
    }
}
