//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use uuid::Uuid;

use crate::allocator::AllocationMap;
use crate::models::{Guest, Zone};

/// Validate that a guest's state is internally consistent
pub fn assert_guest_invariants(guest: &Guest) {
    debug_assert!(
        guest.id != Uuid::nil(),
        "Guest {} has nil id",
        guest.full_name
    );

    debug_assert!(
        guest.event_id != Uuid::nil(),
        "Guest {} has nil event_id",
        guest.full_name
    );

    debug_assert!(
        !guest.full_name.trim().is_empty(),
        "Guest {} has empty name",
        guest.id
    );

    // Allocation fields are set together or not at all
    debug_assert!(
        guest.allocated_floor.is_some() == guest.allocated_wing.is_some(),
        "Guest {} has a half-set allocation: floor {:?}, wing {:?}",
        guest.id,
        guest.allocated_floor,
        guest.allocated_wing
    );
}

/// Validate that a zone is well-formed
pub fn assert_zone_invariants(zone: &Zone) {
    debug_assert!(
        !zone.key.floor.trim().is_empty() && !zone.key.wing.trim().is_empty(),
        "Zone has empty location labels: {:?}",
        zone.key
    );
}

/// Validate an engine run's output against its zone set.
///
/// Each guest appears at most once, every target zone exists, and no
/// zone holds more engine placements than it had room for. Occupancy
/// itself may exceed capacity when a manual override preceded the run.
pub fn assert_assignment_invariants(assignments: &AllocationMap, zones: &[Zone]) {
    let mut seen = std::collections::HashSet::new();
    for assignment in assignments {
        debug_assert!(
            seen.insert(assignment.guest_id),
            "Guest {} assigned more than once in a single run",
            assignment.guest_id
        );

        debug_assert!(
            zones.iter().any(|z| z.key == assignment.zone),
            "Assignment targets unknown zone {:?}",
            assignment.zone
        );
    }

    for zone in zones {
        let placed = assignments.iter().filter(|a| a.zone == zone.key).count();
        debug_assert!(
            placed as u32 <= zone.capacity,
            "Zone {:?} received {} placements against capacity {}",
            zone.key,
            placed,
            zone.capacity
        );
    }
}
