//! Event model - the core booking unit

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An Event is a room-block booking engagement (wedding, conference)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub venue: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(name: String, starts_on: NaiveDate, ends_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            venue: None,
            starts_on,
            ends_on,
            created_at: Utc::now(),
        }
    }

    pub fn with_venue(mut self, venue: String) -> Self {
        self.venue = Some(venue);
        self
    }
}
