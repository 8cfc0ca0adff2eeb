//! # Strata Editor
//!
//! Document-state core for a multi-layer 2D canvas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: input handling, image fetching        │
//! └─────────────────────────────────────────────┘
//!                     ↓ Transition
//! ┌─────────────────────────────────────────────┐
//! │ editor: layer stack + transitions           │
//! │  - Mint IDs before dispatch                 │
//! │  - Apply transitions atomically, in order   │
//! │  - Keep paint order in one place            │
//! │  - Invalidate the composite cache           │
//! └─────────────────────────────────────────────┘
//!                     ↓ &EntityStore
//! ┌─────────────────────────────────────────────┐
//! │ renderer: paints layers, fills the cache    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Stack order is paint order**: Layers carry no z-value
//! 2. **Many invalidators, one populator**: Only `SetImageCache` fills the cache
//! 3. **Stale IDs are tolerated**: Transitions on missing layers are no-ops
//! 4. **Replayable**: A transition log rebuilds the same store
//!
//! ## Usage
//!
//! ```rust
//! use strata_editor::{Dispatcher, Transition};
//!
//! let mut dispatcher = Dispatcher::new();
//! let id = dispatcher.add_layer(None);
//!
//! dispatcher.dispatch(Transition::SetOpacity { id: id.clone(), opacity: 0.5 });
//! assert_eq!(dispatcher.store().expect_layer(&id).opacity, 0.5);
//! assert!(dispatcher.store().is_cache_dirty());
//! ```

mod dispatcher;
mod errors;
mod layer;
mod objects;
mod store;
mod transitions;
mod z_order;

pub use dispatcher::{parse_log, read_log, replay, DispatchResult, Dispatcher, ReplaySummary};
pub use errors::EditorError;
pub use layer::{
    EntityIdentifier, EntityKind, LayerEntity, LayerOverrides, PositionOverride, LAYER_ID_CATEGORY,
};
pub use objects::{
    BrushLine, DrawableObject, EraserLine, ImageObject, ImageRef, ImageSource, ImageWithDims,
    RectShape, Rgba,
};
pub use store::EntityStore;
pub use transitions::{NoopReason, Transition, TransitionOutcome, IMAGE_ID_CATEGORY};
pub use z_order::ZOrderMove;

// Re-export common types for convenience
pub use strata_common::{IdGenerator, Point, Rect};
