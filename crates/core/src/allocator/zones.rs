//! Zone builder - derives capacity zones from room-block inventory

use crate::models::{Guest, GuestStatus, RoomBlock, Zone};

/// Build the zone set for an allocation run.
///
/// Room blocks sharing a (floor, wing) pair pool their `total_qty` into
/// one zone. Occupancy counts every non-cancelled guest already holding
/// that pair; a pair no longer backed by any room block is an orphaned
/// allocation and contributes no count. Zone order follows block
/// insertion order, which keeps fallback placement deterministic.
pub fn build_zones(blocks: &[RoomBlock], guests: &[Guest]) -> Vec<Zone> {
    let mut zones: Vec<Zone> = Vec::new();

    for block in blocks {
        let key = block.zone_key();
        match zones.iter_mut().find(|z| z.key == key) {
            Some(zone) => zone.capacity += block.total_qty,
            None => zones.push(Zone::new(key, block.total_qty)),
        }
    }

    for guest in guests {
        if guest.status == GuestStatus::Cancelled {
            continue;
        }
        let Some(key) = guest.allocated_zone() else {
            continue;
        };
        if let Some(zone) = zones.iter_mut().find(|z| z.key == key) {
            zone.occupied += 1;
        }
    }

    for zone in &zones {
        crate::invariants::assert_zone_invariants(zone);
    }

    zones
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZoneKey;
    use uuid::Uuid;

    fn block(event_id: Uuid, floor: &str, wing: &str, qty: u32) -> RoomBlock {
        RoomBlock::new(event_id, format!("Block {floor}-{wing}"), qty)
            .with_location(floor.to_string(), wing.to_string())
    }

    fn placed_guest(event_id: Uuid, name: &str, floor: &str, wing: &str) -> Guest {
        let mut guest = Guest::new(event_id, name.to_string());
        guest.allocated_floor = Some(floor.to_string());
        guest.allocated_wing = Some(wing.to_string());
        guest
    }

    #[test]
    fn test_blocks_pool_capacity_per_zone() {
        let event_id = Uuid::new_v4();
        let blocks = vec![
            block(event_id, "2", "East", 4),
            block(event_id, "2", "East", 6),
            block(event_id, "3", "West", 2),
        ];

        let zones = build_zones(&blocks, &[]);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].key, ZoneKey::new("2", "East"));
        assert_eq!(zones[0].capacity, 10);
        assert_eq!(zones[1].capacity, 2);
    }

    #[test]
    fn test_missing_location_uses_defaults() {
        let event_id = Uuid::new_v4();
        let blocks = vec![RoomBlock::new(event_id, "Unlabelled".to_string(), 8)];

        let zones = build_zones(&blocks, &[]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].key, ZoneKey::new("1", "Main"));
    }

    #[test]
    fn test_occupancy_counts_placed_guests() {
        let event_id = Uuid::new_v4();
        let blocks = vec![block(event_id, "2", "East", 4)];
        let guests = vec![
            placed_guest(event_id, "Alice Moreau", "2", "East"),
            placed_guest(event_id, "Bob Tan", "2", "East"),
            Guest::new(event_id, "Carol Diaz".to_string()),
        ];

        let zones = build_zones(&blocks, &guests);
        assert_eq!(zones[0].occupied, 2);
        assert_eq!(zones[0].remaining(), 2);
    }

    #[test]
    fn test_orphaned_allocation_is_ignored() {
        let event_id = Uuid::new_v4();
        let blocks = vec![block(event_id, "2", "East", 4)];
        // Placed into a zone that no longer matches any inventory
        let guests = vec![placed_guest(event_id, "Alice Moreau", "9", "Annex")];

        let zones = build_zones(&blocks, &guests);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].occupied, 0);
    }

    #[test]
    fn test_cancelled_guest_frees_capacity() {
        let event_id = Uuid::new_v4();
        let blocks = vec![block(event_id, "2", "East", 1)];
        let mut guest = placed_guest(event_id, "Alice Moreau", "2", "East");
        guest.status = GuestStatus::Cancelled;

        let zones = build_zones(&blocks, &[guest]);
        assert_eq!(zones[0].occupied, 0);
        assert!(zones[0].has_space());
    }

    #[test]
    fn test_no_blocks_yields_no_zones() {
        let zones = build_zones(&[], &[]);
        assert!(zones.is_empty());
    }
}
