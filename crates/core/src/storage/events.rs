//! Event storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_date, parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::Event;

pub struct EventStore<'a> {
    conn: &'a Connection,
}

impl<'a> EventStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new event
    #[instrument(skip(self, event), fields(event_name = %event.name))]
    pub fn create(&self, event: &Event) -> Result<()> {
        self.conn.execute(
            "INSERT INTO events (id, name, venue, starts_on, ends_on, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.id.to_string(),
                event.name,
                event.venue,
                event.starts_on.to_string(),
                event.ends_on.to_string(),
                event.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find event by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, venue, starts_on, ends_on, created_at
             FROM events WHERE id = ?1",
        )?;

        let event = stmt
            .query_row(params![id.to_string()], Self::map_event)
            .optional()?;

        Ok(event)
    }

    /// List all events
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, venue, starts_on, ends_on, created_at
             FROM events ORDER BY starts_on, name",
        )?;

        let events = stmt
            .query_map([], Self::map_event)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    fn map_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
        Ok(Event {
            id: parse_uuid(&row.get::<_, String>(0)?)?,
            name: row.get(1)?,
            venue: row.get(2)?,
            starts_on: parse_date(&row.get::<_, String>(3)?)?,
            ends_on: parse_date(&row.get::<_, String>(4)?)?,
            created_at: parse_datetime(&row.get::<_, String>(5)?)?,
        })
    }
}
