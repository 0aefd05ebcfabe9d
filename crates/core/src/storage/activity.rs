//! Activity log storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_json_opt, parse_uuid};
use crate::error::Result;
use crate::models::ActivityEntry;

pub struct ActivityStore<'a> {
    conn: &'a Connection,
}

impl<'a> ActivityStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append an audit entry
    #[instrument(skip(self, entry), fields(actor = %entry.actor))]
    pub fn append(&self, entry: &ActivityEntry) -> Result<()> {
        let detail_json = entry
            .detail
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn.execute(
            "INSERT INTO activity_log (id, event_id, actor, message, detail_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id.to_string(),
                entry.event_id.to_string(),
                entry.actor,
                entry.message,
                detail_json,
                entry.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List recent entries for an event, newest first
    #[instrument(skip(self))]
    pub fn list_for_event(&self, event_id: Uuid, limit: u32) -> Result<Vec<ActivityEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_id, actor, message, detail_json, created_at
             FROM activity_log WHERE event_id = ?1
             ORDER BY created_at DESC
             LIMIT ?2",
        )?;

        let entries = stmt
            .query_map(params![event_id.to_string(), limit], |row| {
                Ok(ActivityEntry {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    event_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    actor: row.get(2)?,
                    message: row.get(3)?,
                    detail: parse_json_opt(row.get::<_, Option<String>>(4)?)?,
                    created_at: parse_datetime(&row.get::<_, String>(5)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}
