//! # Drawable Objects
//!
//! Everything a layer can paint. Objects inside a layer paint in append
//! order: the first object is the bottom-most.
//!
//! Image assets live outside this crate. An [`ImageSource`] is the opaque
//! descriptor the host hands us; [`ImageObject::from_source`] and
//! [`ImageWithDims::from`] are the only conversions from it.

use serde::{Deserialize, Serialize};
use strata_common::Rect;

/// RGBA color, alpha in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 1.0 };

    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Freehand brush stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushLine {
    pub id: String,
    pub stroke_width: f64,
    /// Flat list of `x, y` pairs
    pub points: Vec<f64>,
    pub color: Rgba,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<Rect>,
}

/// Freehand eraser stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EraserLine {
    pub id: String,
    pub stroke_width: f64,
    /// Flat list of `x, y` pairs
    pub points: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<Rect>,
}

/// Filled rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub id: String,
    pub rect: Rect,
    pub color: Rgba,
}

/// Reference to an external image asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Placed image drawable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    pub id: String,
    pub image: ImageRef,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageObject {
    /// Convert an external image descriptor into a drawable at the origin,
    /// sized to the image
    pub fn from_source(id: impl Into<String>, source: &ImageSource) -> Self {
        Self {
            id: id.into(),
            image: ImageRef {
                name: source.image_name.clone(),
                width: source.width,
                height: source.height,
            },
            x: 0.0,
            y: 0.0,
            width: f64::from(source.width),
            height: f64::from(source.height),
        }
    }
}

/// Tagged union over every object a layer may hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DrawableObject {
    BrushLine(BrushLine),
    EraserLine(EraserLine),
    Rect(RectShape),
    Image(ImageObject),
}

impl DrawableObject {
    pub fn id(&self) -> &str {
        match self {
            DrawableObject::BrushLine(line) => &line.id,
            DrawableObject::EraserLine(line) => &line.id,
            DrawableObject::Rect(rect) => &rect.id,
            DrawableObject::Image(image) => &image.id,
        }
    }

    pub fn as_image(&self) -> Option<&ImageObject> {
        match self {
            DrawableObject::Image(image) => Some(image),
            _ => None,
        }
    }
}

impl From<BrushLine> for DrawableObject {
    fn from(line: BrushLine) -> Self {
        DrawableObject::BrushLine(line)
    }
}

impl From<EraserLine> for DrawableObject {
    fn from(line: EraserLine) -> Self {
        DrawableObject::EraserLine(line)
    }
}

impl From<RectShape> for DrawableObject {
    fn from(rect: RectShape) -> Self {
        DrawableObject::Rect(rect)
    }
}

impl From<ImageObject> for DrawableObject {
    fn from(image: ImageObject) -> Self {
        DrawableObject::Image(image)
    }
}

/// Opaque image descriptor supplied by the host application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    pub image_name: String,
    pub width: u32,
    pub height: u32,
}

impl ImageSource {
    pub fn new(image_name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            image_name: image_name.into(),
            width,
            height,
        }
    }
}

/// Composite cache value: an image name plus its dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageWithDims {
    pub image_name: String,
    pub width: u32,
    pub height: u32,
}

impl From<&ImageSource> for ImageWithDims {
    fn from(source: &ImageSource) -> Self {
        Self {
            image_name: source.image_name.clone(),
            width: source.width,
            height: source.height,
        }
    }
}
