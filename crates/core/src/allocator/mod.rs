//! Guest-to-zone auto-allocator
//!
//! Three cooperating stages: the zone builder derives capacity zones
//! from room-block inventory, the priority sorter orders the
//! unallocated guests, and the assignment engine places them honoring
//! proximity requests, group cohesion, and priority tiering. The
//! `Allocator` wraps the stages with storage I/O, the audit log, and
//! per-event run serialization.

mod engine;
mod locks;
mod priority;
mod zones;

pub use engine::{assign_all, proximity_target, AllocationContext, AllocationMap, Assignment};
pub use locks::EventLocks;
pub use priority::{guest_rank, sort_for_allocation, UNRANKED};
pub use zones::build_zones;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{ActivityEntry, Guest, ZoneKey};
use crate::storage::Database;

/// Actor tag recorded on auto-allocation audit entries
pub const ALLOCATOR_ACTOR: &str = "AI Allocator";
/// Actor tag recorded on manual-override audit entries
pub const MANUAL_ACTOR: &str = "Agent";

/// Result of one auto-allocation run
#[derive(Debug, Clone)]
pub enum AllocationOutcome {
    /// No eligible guests existed; nothing was read beyond the guest
    /// list and nothing was written
    NothingToAllocate,
    /// The run completed; `assignments` may cover fewer guests than
    /// were eligible when capacity ran out
    Allocated {
        assignments: AllocationMap,
        zones_considered: usize,
        unplaced: usize,
    },
}

/// Orchestrates allocation runs against storage
#[derive(Debug, Default)]
pub struct Allocator {
    locks: EventLocks,
}

impl Allocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the auto-allocator for an event.
    ///
    /// Holds the event's run lock for the whole read-compute-write
    /// span. Persisting the mapping is idempotent: re-running with
    /// unchanged data finds no eligible guests and writes nothing.
    #[instrument(skip(self, db))]
    pub fn auto_allocate(&self, db: &Database, event_id: Uuid) -> Result<AllocationOutcome> {
        let lock = self.locks.for_event(event_id);
        let _guard = locks::hold(&lock);

        db.events()
            .find_by_id(event_id)?
            .ok_or_else(|| Error::NotFound(format!("Event {event_id}")))?;

        let all_guests = db.guests().list_for_event(event_id)?;
        let mut pending: Vec<Guest> = all_guests
            .iter()
            .filter(|g| g.awaiting_allocation())
            .cloned()
            .collect();

        if pending.is_empty() {
            info!(%event_id, "No unallocated guests, nothing to do");
            return Ok(AllocationOutcome::NothingToAllocate);
        }

        let blocks = db.room_blocks().list_for_event(event_id)?;
        let zones = build_zones(&blocks, &all_guests);

        sort_for_allocation(&mut pending);

        let mut ctx = AllocationContext::new(zones, &all_guests);
        let zones_considered = ctx.zone_count();
        let assignments = assign_all(&mut ctx, &pending);
        crate::invariants::assert_assignment_invariants(&assignments, ctx.zones());

        for assignment in &assignments {
            db.guests()
                .set_allocation(assignment.guest_id, &assignment.zone)?;
        }

        let unplaced = pending.len() - assignments.len();
        let summary = format!(
            "Auto-allocated {} of {} guests across {} zones",
            assignments.len(),
            pending.len(),
            zones_considered
        );
        let entry = ActivityEntry::new(event_id, ALLOCATOR_ACTOR, summary)
            .with_detail(serde_json::to_value(&assignments)?);
        db.activity().append(&entry)?;

        info!(
            %event_id,
            placed = assignments.len(),
            unplaced,
            zones = zones_considered,
            "Allocation run complete"
        );

        Ok(AllocationOutcome::Allocated {
            assignments,
            zones_considered,
            unplaced,
        })
    }

    /// Manual override: write explicit guest -> (floor, wing) pairs.
    ///
    /// Validates every guest id belongs to the event before writing,
    /// then writes the whole batch in one transaction (all-or-nothing).
    /// Deliberately skips capacity, proximity, and priority logic - a
    /// human override may push a zone past its nominal capacity.
    #[instrument(skip(self, db, batch), fields(batch_len = batch.len()))]
    pub fn allocate_manual(
        &self,
        db: &Database,
        event_id: Uuid,
        batch: &[(Uuid, ZoneKey)],
    ) -> Result<usize> {
        let lock = self.locks.for_event(event_id);
        let _guard = locks::hold(&lock);

        db.events()
            .find_by_id(event_id)?
            .ok_or_else(|| Error::NotFound(format!("Event {event_id}")))?;

        for (guest_id, _) in batch {
            match db.guests().find_by_id(*guest_id)? {
                Some(guest) if guest.event_id == event_id => {}
                _ => {
                    return Err(Error::InvalidOperation(format!(
                        "Guest {guest_id} does not belong to event {event_id}"
                    )))
                }
            }
        }

        db.guests().set_allocations(batch)?;

        let entry = ActivityEntry::new(
            event_id,
            MANUAL_ACTOR,
            format!("Manually assigned {} guests", batch.len()),
        );
        db.activity().append(&entry)?;

        info!(%event_id, assigned = batch.len(), "Manual assignment complete");
        Ok(batch.len())
    }
}
