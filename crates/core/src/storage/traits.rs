//! Storage repository traits
//!
//! These traits define the storage interface, allowing for different
//! implementations (SQLite, mock, future service backend).

use uuid::Uuid;

use crate::error::Result;
use crate::models::{ActivityEntry, Event, Guest, GuestStatus, RoomBlock, ZoneKey};

/// Event repository operations
pub trait EventRepository {
    /// Create a new event
    fn create_event(&self, event: &Event) -> Result<()>;

    /// Find event by ID
    fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    /// List all events
    fn list_events(&self) -> Result<Vec<Event>>;
}

/// Guest repository operations
pub trait GuestRepository {
    /// Create a new guest
    fn create_guest(&self, guest: &Guest) -> Result<()>;

    /// Import a batch of guests in one transaction
    fn import_guests(&self, guests: &[Guest]) -> Result<()>;

    /// Find guest by ID
    fn find_guest_by_id(&self, id: Uuid) -> Result<Option<Guest>>;

    /// List all guests for an event in deterministic fetch order
    fn list_guests_for_event(&self, event_id: Uuid) -> Result<Vec<Guest>>;

    /// List guests awaiting allocation
    fn list_unallocated_guests(&self, event_id: Uuid) -> Result<Vec<Guest>>;

    /// Update guest lifecycle status
    fn update_guest_status(&self, guest_id: Uuid, status: GuestStatus) -> Result<()>;

    /// Write a guest's allocated (floor, wing) pair
    fn set_guest_allocation(&self, guest_id: Uuid, zone: &ZoneKey) -> Result<()>;

    /// Write a batch of allocation pairs in one transaction
    fn set_guest_allocations(&self, batch: &[(Uuid, ZoneKey)]) -> Result<()>;

    /// Clear a guest's allocation
    fn clear_guest_allocation(&self, guest_id: Uuid) -> Result<()>;
}

/// Room block repository operations
pub trait RoomBlockRepository {
    /// Create a new room block
    fn create_room_block(&self, block: &RoomBlock) -> Result<()>;

    /// List room blocks for an event
    fn list_room_blocks_for_event(&self, event_id: Uuid) -> Result<Vec<RoomBlock>>;
}

/// Activity log repository operations
pub trait ActivityRepository {
    /// Append an audit entry
    fn append_activity(&self, entry: &ActivityEntry) -> Result<()>;

    /// List recent entries for an event, newest first
    fn list_activity_for_event(&self, event_id: Uuid, limit: u32) -> Result<Vec<ActivityEntry>>;
}

/// Combined storage interface
///
/// Provides access to all repository operations.
/// Implementations may be backed by SQLite or mocks.
pub trait Storage:
    EventRepository + GuestRepository + RoomBlockRepository + ActivityRepository
{
}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where
    T: EventRepository + GuestRepository + RoomBlockRepository + ActivityRepository
{
}
