//! Zone - a derived (floor, wing) capacity bucket

use serde::{Deserialize, Serialize};

/// Floor label applied when a room block omits one
pub const DEFAULT_FLOOR: &str = "1";
/// Wing label applied when a room block omits one
pub const DEFAULT_WING: &str = "Main";

/// Identifies a zone by its (floor, wing) location labels
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneKey {
    pub floor: String,
    pub wing: String,
}

impl ZoneKey {
    pub fn new(floor: impl Into<String>, wing: impl Into<String>) -> Self {
        Self {
            floor: floor.into(),
            wing: wing.into(),
        }
    }
}

impl std::fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "floor {} / {} wing", self.floor, self.wing)
    }
}

/// A transient capacity bucket, rebuilt fresh on every allocation run.
///
/// Never persisted - only the guest floor/wing fields survive a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub key: ZoneKey,
    /// Sum of `total_qty` over room blocks sharing this (floor, wing)
    pub capacity: u32,
    /// Non-cancelled guests already holding this (floor, wing)
    pub occupied: u32,
}

impl Zone {
    pub fn new(key: ZoneKey, capacity: u32) -> Self {
        Self {
            key,
            capacity,
            occupied: 0,
        }
    }

    pub fn has_space(&self) -> bool {
        self.occupied < self.capacity
    }

    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }
}
