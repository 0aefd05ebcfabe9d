//! Room block storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid};
use crate::error::Result;
use crate::models::RoomBlock;

pub struct RoomBlockStore<'a> {
    conn: &'a Connection,
}

impl<'a> RoomBlockStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new room block
    #[instrument(skip(self, block), fields(block_label = %block.label))]
    pub fn create(&self, block: &RoomBlock) -> Result<()> {
        self.conn.execute(
            "INSERT INTO room_blocks (id, event_id, label, floor, wing,
                                      total_qty, booked_qty, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                block.id.to_string(),
                block.event_id.to_string(),
                block.label,
                block.floor,
                block.wing,
                block.total_qty,
                block.booked_qty,
                block.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List room blocks for an event in insertion order
    #[instrument(skip(self))]
    pub fn list_for_event(&self, event_id: Uuid) -> Result<Vec<RoomBlock>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_id, label, floor, wing, total_qty, booked_qty, created_at
             FROM room_blocks WHERE event_id = ?1
             ORDER BY created_at, id",
        )?;

        let blocks = stmt
            .query_map(params![event_id.to_string()], |row| {
                Ok(RoomBlock {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    event_id: parse_uuid(&row.get::<_, String>(1)?)?,
                    label: row.get(2)?,
                    floor: row.get(3)?,
                    wing: row.get(4)?,
                    total_qty: row.get(5)?,
                    booked_qty: row.get(6)?,
                    created_at: parse_datetime(&row.get::<_, String>(7)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(blocks)
    }
}
