//! Z-order moves over the layer stack.
//!
//! The stack order is the only paint order; moving a layer means moving it
//! within `EntityStore::entities`.

use crate::layer::LayerEntity;
use serde::{Deserialize, Serialize};
use strata_common::{move_one_to_end, move_one_to_start, move_to_end, move_to_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZOrderMove {
    /// Swap with the neighbor toward the front
    OneForward,
    /// Swap with the neighbor toward the back
    OneBackward,
    ToFront,
    ToBack,
}

impl ZOrderMove {
    /// Move the layer at `index`; returns whether the order changed
    pub fn apply(self, layers: &mut [LayerEntity], index: usize) -> bool {
        match self {
            ZOrderMove::OneForward => move_one_to_end(layers, index),
            ZOrderMove::OneBackward => move_one_to_start(layers, index),
            ZOrderMove::ToFront => move_to_end(layers, index),
            ZOrderMove::ToBack => move_to_start(layers, index),
        }
    }
}
