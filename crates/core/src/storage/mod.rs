//! SQLite storage layer for Atrium

mod activity;
mod events;
mod guests;
mod migrations;
mod parse;
mod room_blocks;
mod traits;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{ActivityEntry, Event, Guest, GuestStatus, RoomBlock, ZoneKey};
use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

pub use activity::ActivityStore;
pub use events::EventStore;
pub use guests::GuestStore;
pub use room_blocks::RoomBlockStore;
pub use traits::{
    ActivityRepository, EventRepository, GuestRepository, RoomBlockRepository, Storage,
};

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get event store
    pub fn events(&self) -> EventStore<'_> {
        EventStore::new(&self.conn)
    }

    /// Get guest store
    pub fn guests(&self) -> GuestStore<'_> {
        GuestStore::new(&self.conn)
    }

    /// Get room block store
    pub fn room_blocks(&self) -> RoomBlockStore<'_> {
        RoomBlockStore::new(&self.conn)
    }

    /// Get activity log store
    pub fn activity(&self) -> ActivityStore<'_> {
        ActivityStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl EventRepository for Database {
    fn create_event(&self, event: &Event) -> Result<()> {
        self.events().create(event)
    }

    fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        self.events().find_by_id(id)
    }

    fn list_events(&self) -> Result<Vec<Event>> {
        self.events().list()
    }
}

impl GuestRepository for Database {
    fn create_guest(&self, guest: &Guest) -> Result<()> {
        self.guests().create(guest)
    }

    fn import_guests(&self, guests: &[Guest]) -> Result<()> {
        self.guests().import(guests)
    }

    fn find_guest_by_id(&self, id: Uuid) -> Result<Option<Guest>> {
        self.guests().find_by_id(id)
    }

    fn list_guests_for_event(&self, event_id: Uuid) -> Result<Vec<Guest>> {
        self.guests().list_for_event(event_id)
    }

    fn list_unallocated_guests(&self, event_id: Uuid) -> Result<Vec<Guest>> {
        self.guests().list_unallocated(event_id)
    }

    fn update_guest_status(&self, guest_id: Uuid, status: GuestStatus) -> Result<()> {
        self.guests().update_status(guest_id, status)
    }

    fn set_guest_allocation(&self, guest_id: Uuid, zone: &ZoneKey) -> Result<()> {
        self.guests().set_allocation(guest_id, zone)
    }

    fn set_guest_allocations(&self, batch: &[(Uuid, ZoneKey)]) -> Result<()> {
        self.guests().set_allocations(batch)
    }

    fn clear_guest_allocation(&self, guest_id: Uuid) -> Result<()> {
        self.guests().clear_allocation(guest_id)
    }
}

impl RoomBlockRepository for Database {
    fn create_room_block(&self, block: &RoomBlock) -> Result<()> {
        self.room_blocks().create(block)
    }

    fn list_room_blocks_for_event(&self, event_id: Uuid) -> Result<Vec<RoomBlock>> {
        self.room_blocks().list_for_event(event_id)
    }
}

impl ActivityRepository for Database {
    fn append_activity(&self, entry: &ActivityEntry) -> Result<()> {
        self.activity().append(entry)
    }

    fn list_activity_for_event(&self, event_id: Uuid, limit: u32) -> Result<Vec<ActivityEntry>> {
        self.activity().list_for_event(event_id, limit)
    }
}
