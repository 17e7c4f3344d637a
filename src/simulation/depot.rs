//! Delivery depots

use serde::{Deserialize, Serialize};

use crate::core::types::{DepotId, Vec2};

/// A fixed delivery destination accumulating a running total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Depot {
    pub id: DepotId,
    /// `None` until the host resolves a position (layout not yet measured);
    /// carrying agents hold in place while unresolved
    pub position: Option<Vec2>,
    pub total: u64,
}

impl Depot {
    pub fn new(id: DepotId, position: Option<Vec2>) -> Self {
        Self {
            id,
            position,
            total: 0,
        }
    }

    /// Credit a completed delivery, returning the new total
    pub fn deliver(&mut self, amount: u64) -> u64 {
        self.total += amount;
        self.total
    }
}
