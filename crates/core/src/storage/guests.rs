//! Guest storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_group_opt, parse_uuid, status_from_u8, OptionalExt};
use crate::error::Result;
use crate::invariants::assert_guest_invariants;
use crate::models::{Guest, GuestStatus, ZoneKey};

pub struct GuestStore<'a> {
    conn: &'a Connection,
}

impl<'a> GuestStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new guest
    #[instrument(skip(self, guest), fields(guest_name = %guest.full_name))]
    pub fn create(&self, guest: &Guest) -> Result<()> {
        assert_guest_invariants(guest);
        self.conn.execute(
            "INSERT INTO guests (id, event_id, full_name, social_group, proximity_request,
                                 status, allocated_floor, allocated_wing, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                guest.id.to_string(),
                guest.event_id.to_string(),
                guest.full_name,
                guest.group.as_ref().map(|g| g.as_label().to_string()),
                guest.proximity_request,
                guest.status as u8,
                guest.allocated_floor,
                guest.allocated_wing,
                guest.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Import a guest batch in one transaction
    #[instrument(skip(self, guests), fields(count = guests.len()))]
    pub fn import(&self, guests: &[Guest]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for guest in guests {
            assert_guest_invariants(guest);
            tx.execute(
                "INSERT INTO guests (id, event_id, full_name, social_group, proximity_request,
                                     status, allocated_floor, allocated_wing, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    guest.id.to_string(),
                    guest.event_id.to_string(),
                    guest.full_name,
                    guest.group.as_ref().map(|g| g.as_label().to_string()),
                    guest.proximity_request,
                    guest.status as u8,
                    guest.allocated_floor,
                    guest.allocated_wing,
                    guest.created_at.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Find guest by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Guest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_id, full_name, social_group, proximity_request,
                    status, allocated_floor, allocated_wing, created_at
             FROM guests WHERE id = ?1",
        )?;

        let guest = stmt
            .query_row(params![id.to_string()], Self::map_guest)
            .optional()?;

        Ok(guest)
    }

    /// List all guests for an event.
    ///
    /// Ordered by insertion so allocation runs see a deterministic
    /// sequence.
    #[instrument(skip(self))]
    pub fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Guest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_id, full_name, social_group, proximity_request,
                    status, allocated_floor, allocated_wing, created_at
             FROM guests WHERE event_id = ?1
             ORDER BY created_at, id",
        )?;

        let guests = stmt
            .query_map(params![event_id.to_string()], Self::map_guest)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(guests)
    }

    /// List guests awaiting allocation (unplaced, not cancelled)
    #[instrument(skip(self))]
    pub fn list_unallocated(&self, event_id: Uuid) -> Result<Vec<Guest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_id, full_name, social_group, proximity_request,
                    status, allocated_floor, allocated_wing, created_at
             FROM guests
             WHERE event_id = ?1
               AND allocated_floor IS NULL
               AND allocated_wing IS NULL
               AND status != ?2
             ORDER BY created_at, id",
        )?;

        let guests = stmt
            .query_map(
                params![event_id.to_string(), GuestStatus::Cancelled as u8],
                Self::map_guest,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(guests)
    }

    /// Update guest lifecycle status
    #[instrument(skip(self))]
    pub fn update_status(&self, guest_id: Uuid, status: GuestStatus) -> Result<()> {
        self.conn.execute(
            "UPDATE guests SET status = ?1 WHERE id = ?2",
            params![status as u8, guest_id.to_string()],
        )?;
        Ok(())
    }

    /// Write a guest's allocated (floor, wing) pair
    #[instrument(skip(self, zone), fields(floor = %zone.floor, wing = %zone.wing))]
    pub fn set_allocation(&self, guest_id: Uuid, zone: &ZoneKey) -> Result<()> {
        self.conn.execute(
            "UPDATE guests SET allocated_floor = ?1, allocated_wing = ?2 WHERE id = ?3",
            params![zone.floor, zone.wing, guest_id.to_string()],
        )?;
        Ok(())
    }

    /// Write a batch of allocation pairs in one transaction
    #[instrument(skip(self, batch), fields(count = batch.len()))]
    pub fn set_allocations(&self, batch: &[(Uuid, ZoneKey)]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (guest_id, zone) in batch {
            tx.execute(
                "UPDATE guests SET allocated_floor = ?1, allocated_wing = ?2 WHERE id = ?3",
                params![zone.floor, zone.wing, guest_id.to_string()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Clear a guest's allocation
    #[instrument(skip(self))]
    pub fn clear_allocation(&self, guest_id: Uuid) -> Result<()> {
        self.conn.execute(
            "UPDATE guests SET allocated_floor = NULL, allocated_wing = NULL WHERE id = ?1",
            params![guest_id.to_string()],
        )?;
        Ok(())
    }

    fn map_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
        Ok(Guest {
            id: parse_uuid(&row.get::<_, String>(0)?)?,
            event_id: parse_uuid(&row.get::<_, String>(1)?)?,
            full_name: row.get(2)?,
            group: parse_group_opt(row.get::<_, Option<String>>(3)?),
            proximity_request: row.get(4)?,
            status: status_from_u8(row.get::<_, u8>(5)?),
            allocated_floor: row.get(6)?,
            allocated_wing: row.get(7)?,
            created_at: parse_datetime(&row.get::<_, String>(8)?)?,
        })
    }
}
