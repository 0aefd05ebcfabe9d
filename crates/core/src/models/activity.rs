//! Activity log model - the per-event audit trail

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One append-only audit entry on an event's activity log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    /// Who acted, e.g. "AI Allocator" or "Agent"
    pub actor: String,
    pub message: String,
    /// Optional structured payload (the allocation mapping for runs)
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(event_id: Uuid, actor: &str, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            actor: actor.to_string(),
            message,
            detail: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}
