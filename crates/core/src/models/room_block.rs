//! Room block model - the inventory unit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ZoneKey, DEFAULT_FLOOR, DEFAULT_WING};

/// A block of rooms reserved for an event, located by floor and wing.
///
/// Immutable input to allocation. `booked_qty` tracks self-service
/// bookings and is informational only - zone capacity comes from
/// `total_qty` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomBlock {
    pub id: Uuid,
    pub event_id: Uuid,
    pub label: String,
    pub floor: Option<String>,
    pub wing: Option<String>,
    pub total_qty: u32,
    pub booked_qty: u32,
    pub created_at: DateTime<Utc>,
}

impl RoomBlock {
    pub fn new(event_id: Uuid, label: String, total_qty: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            label,
            floor: None,
            wing: None,
            total_qty,
            booked_qty: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_location(mut self, floor: String, wing: String) -> Self {
        self.floor = Some(floor);
        self.wing = Some(wing);
        self
    }

    /// The zone this block contributes capacity to, defaulting missing
    /// location labels
    pub fn zone_key(&self) -> ZoneKey {
        ZoneKey::new(
            self.floor.as_deref().unwrap_or(DEFAULT_FLOOR),
            self.wing.as_deref().unwrap_or(DEFAULT_WING),
        )
    }
}
