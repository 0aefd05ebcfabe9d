//! Guest model and social grouping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ZoneKey;

/// Social group tags recognized by the allocator
///
/// Known labels carry a fixed allocation priority; anything else is
/// preserved verbatim as `Other` and sorts last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuestGroup {
    Vip,
    BrideSide,
    GroomSide,
    Family,
    Friends,
    Other(String),
}

impl GuestGroup {
    /// Parse a free-text label into a typed group.
    ///
    /// Trims surrounding whitespace and matches known labels
    /// case-insensitively. Empty labels yield `None`.
    pub fn parse(label: &str) -> Option<GuestGroup> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.to_lowercase().as_str() {
            "vip" => Some(GuestGroup::Vip),
            "bride side" => Some(GuestGroup::BrideSide),
            "groom side" => Some(GuestGroup::GroomSide),
            "family" => Some(GuestGroup::Family),
            "friends" => Some(GuestGroup::Friends),
            _ => Some(GuestGroup::Other(trimmed.to_string())),
        }
    }

    /// Canonical label as stored and displayed
    pub fn as_label(&self) -> &str {
        match self {
            GuestGroup::Vip => "VIP",
            GuestGroup::BrideSide => "Bride Side",
            GuestGroup::GroomSide => "Groom Side",
            GuestGroup::Family => "Family",
            GuestGroup::Friends => "Friends",
            GuestGroup::Other(label) => label,
        }
    }
}

impl std::fmt::Display for GuestGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Guest lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GuestStatus {
    Invited = 0,
    Confirmed = 1,
    CheckedIn = 2,
    Cancelled = 3,
}

impl GuestStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            GuestStatus::Invited => "Invited",
            GuestStatus::Confirmed => "Confirmed",
            GuestStatus::CheckedIn => "Checked In",
            GuestStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A guest on an event's room-block list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: Uuid,
    pub event_id: Uuid,
    pub full_name: String,
    pub group: Option<GuestGroup>,
    /// Free-text request to be co-located with a named other guest,
    /// e.g. "near Alice Moreau"
    pub proximity_request: Option<String>,
    pub status: GuestStatus,
    pub allocated_floor: Option<String>,
    pub allocated_wing: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(event_id: Uuid, full_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            full_name,
            group: None,
            proximity_request: None,
            status: GuestStatus::Invited,
            allocated_floor: None,
            allocated_wing: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a social group, parsing the free-text label at ingestion
    pub fn with_group(mut self, label: &str) -> Self {
        self.group = GuestGroup::parse(label);
        self
    }

    pub fn with_proximity_request(mut self, request: String) -> Self {
        self.proximity_request = Some(request);
        self
    }

    /// The zone this guest currently holds, if both fields are set
    pub fn allocated_zone(&self) -> Option<ZoneKey> {
        match (&self.allocated_floor, &self.allocated_wing) {
            (Some(floor), Some(wing)) => Some(ZoneKey::new(floor.clone(), wing.clone())),
            _ => None,
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated_floor.is_some() && self.allocated_wing.is_some()
    }

    /// Eligible for the next allocation run: not yet placed, not cancelled
    pub fn awaiting_allocation(&self) -> bool {
        !self.is_allocated() && self.status != GuestStatus::Cancelled
    }
}
