//! Assignment engine - places sorted guests into zones
//!
//! Per guest, tried in order with the first success committed
//! immediately: proximity resolution, group cohesion, priority
//! fallback. Guests with no reachable capacity stay unallocated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Guest, GuestGroup, Zone, ZoneKey};

/// Guest-id -> zone mapping produced by a run, in placement order
pub type AllocationMap = Vec<Assignment>;

/// One committed placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub guest_id: Uuid,
    pub zone: ZoneKey,
}

/// Mutable state threaded through the assignment loop.
///
/// Holds the zone occupancy table, the per-group anchor table, and the
/// name lookup used to resolve proximity requests. All state is
/// explicit so the engine stays unit-testable in isolation.
pub struct AllocationContext {
    zones: Vec<Zone>,
    anchors: HashMap<GuestGroup, ZoneKey>,
    /// Lowercased full name -> current placement (None while unplaced)
    placements: HashMap<String, Option<ZoneKey>>,
}

impl AllocationContext {
    /// Seed the context with the run's zones and the event's full guest
    /// list, so proximity requests can resolve to anyone - including
    /// guests placed earlier in the same run.
    pub fn new(zones: Vec<Zone>, all_guests: &[Guest]) -> Self {
        let placements = all_guests
            .iter()
            .map(|g| (normalize_name(&g.full_name), g.allocated_zone()))
            .collect();

        Self {
            zones,
            anchors: HashMap::new(),
            placements,
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    fn zone(&self, key: &ZoneKey) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.key == key)
    }

    fn zone_has_space(&self, key: &ZoneKey) -> bool {
        self.zone(key).map(Zone::has_space).unwrap_or(false)
    }

    /// Commit a placement: bump occupancy and record the guest in the
    /// name lookup so later proximity requests can target them.
    fn commit(&mut self, guest: &Guest, key: &ZoneKey) {
        if let Some(zone) = self.zones.iter_mut().find(|z| &z.key == key) {
            debug_assert!(zone.has_space(), "engine committed into a full zone");
            zone.occupied += 1;
        }
        self.placements
            .insert(normalize_name(&guest.full_name), Some(key.clone()));
    }

    /// Record the group's anchor zone if it has none yet
    fn record_anchor(&mut self, group: &GuestGroup, key: &ZoneKey) {
        self.anchors
            .entry(group.clone())
            .or_insert_with(|| key.clone());
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Extract the target name from a proximity request: strip a leading
/// "near" / "next to" (case-insensitive), trim, lowercase.
pub fn proximity_target(request: &str) -> Option<String> {
    let lowered = request.trim().to_lowercase();
    let rest = lowered
        .strip_prefix("next to")
        .or_else(|| lowered.strip_prefix("near"))
        .unwrap_or(&lowered);
    let name = rest.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Run the engine over an already-sorted guest sequence.
///
/// Returns the mapping for every guest placed; capacity-exhausted
/// guests are omitted, never errored.
pub fn assign_all(ctx: &mut AllocationContext, guests: &[Guest]) -> AllocationMap {
    let mut assignments = AllocationMap::new();

    for guest in guests {
        match place_guest(ctx, guest) {
            Some(zone) => {
                debug!(guest = %guest.full_name, %zone, "Placed guest");
                assignments.push(Assignment {
                    guest_id: guest.id,
                    zone,
                });
            }
            None => {
                debug!(guest = %guest.full_name, "No zone with capacity, leaving unallocated");
            }
        }
    }

    assignments
}

fn place_guest(ctx: &mut AllocationContext, guest: &Guest) -> Option<ZoneKey> {
    // 1. Proximity: follow the named guest if they are placed and their
    //    zone has room.
    if let Some(request) = guest.proximity_request.as_deref() {
        if let Some(target) = proximity_target(request) {
            if let Some(Some(key)) = ctx.placements.get(&target).cloned() {
                if ctx.zone_has_space(&key) {
                    ctx.commit(guest, &key);
                    return Some(key);
                }
            }
        }
    }

    // 2. Group cohesion: join the group's anchor zone while it has room.
    if let Some(group) = guest.group.as_ref() {
        if let Some(key) = ctx.anchors.get(group).cloned() {
            if ctx.zone_has_space(&key) {
                ctx.commit(guest, &key);
                return Some(key);
            }
        }
    }

    // 3. Priority fallback: walk zones ordered by floor label, top-down
    //    for VIPs. Floor comparison is lexicographic, matching the
    //    free-text labels ("9" sorts above "10").
    let top_down = guest.group == Some(GuestGroup::Vip);
    let mut candidates: Vec<ZoneKey> = ctx.zones.iter().map(|z| z.key.clone()).collect();
    candidates.sort_by(|a, b| {
        let by_floor = if top_down {
            b.floor.cmp(&a.floor)
        } else {
            a.floor.cmp(&b.floor)
        };
        by_floor.then_with(|| a.wing.cmp(&b.wing))
    });

    for key in candidates {
        if ctx.zone_has_space(&key) {
            ctx.commit(guest, &key);
            // First successful fallback placement anchors the group
            if let Some(group) = guest.group.as_ref() {
                ctx.record_anchor(group, &key);
            }
            return Some(key);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(floor: &str, wing: &str, capacity: u32) -> Zone {
        Zone::new(ZoneKey::new(floor, wing), capacity)
    }

    fn guest(name: &str, group: Option<&str>) -> Guest {
        let mut g = Guest::new(Uuid::new_v4(), name.to_string());
        if let Some(label) = group {
            g = g.with_group(label);
        }
        g
    }

    fn placed(name: &str, floor: &str, wing: &str) -> Guest {
        let mut g = Guest::new(Uuid::new_v4(), name.to_string());
        g.allocated_floor = Some(floor.to_string());
        g.allocated_wing = Some(wing.to_string());
        g
    }

    #[test]
    fn test_proximity_target_stripping() {
        assert_eq!(proximity_target("near Alice"), Some("alice".to_string()));
        assert_eq!(proximity_target("Near  Alice Moreau "), Some("alice moreau".to_string()));
        assert_eq!(proximity_target("next to Bob"), Some("bob".to_string()));
        assert_eq!(proximity_target("NEXT TO Bob"), Some("bob".to_string()));
        assert_eq!(proximity_target("Carol Diaz"), Some("carol diaz".to_string()));
        assert_eq!(proximity_target("near "), None);
        assert_eq!(proximity_target(""), None);
    }

    #[test]
    fn test_proximity_follows_placed_guest() {
        let alice = placed("Alice Moreau", "3", "East");
        let x = guest("Xavier Rook", None)
            .with_proximity_request("near Alice Moreau".to_string());

        let mut zones = vec![zone("1", "Main", 5), zone("3", "East", 5)];
        zones[1].occupied = 4; // 1 of 5 slots free
        let mut ctx = AllocationContext::new(zones, &[alice, x.clone()]);

        let map = assign_all(&mut ctx, &[x]);
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].zone, ZoneKey::new("3", "East"));
    }

    #[test]
    fn test_proximity_full_zone_falls_through() {
        let alice = placed("Alice Moreau", "3", "East");
        let x = guest("Xavier Rook", None)
            .with_proximity_request("near Alice Moreau".to_string());

        let mut zones = vec![zone("1", "Main", 5), zone("3", "East", 4)];
        zones[1].occupied = 4; // full
        let mut ctx = AllocationContext::new(zones, &[alice, x.clone()]);

        let map = assign_all(&mut ctx, &[x]);
        assert_eq!(map.len(), 1);
        // Fallback placement instead
        assert_eq!(map[0].zone, ZoneKey::new("1", "Main"));
    }

    #[test]
    fn test_proximity_resolves_within_run() {
        // Bea references Ada, who is only placed earlier in this run
        let ada = guest("Ada Lin", Some("Friends"));
        let bea = guest("Bea Cole", None).with_proximity_request("next to Ada Lin".to_string());

        let zones = vec![zone("1", "Main", 2), zone("2", "Main", 2)];
        let all = vec![ada.clone(), bea.clone()];
        let mut ctx = AllocationContext::new(zones, &all);

        let map = assign_all(&mut ctx, &[ada, bea]);
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].zone, map[1].zone);
    }

    #[test]
    fn test_group_cohesion_uses_anchor() {
        let first = guest("First Famm", Some("Family"));
        let second = guest("Second Famm", Some("Family"));

        let zones = vec![zone("1", "Main", 3), zone("2", "Main", 3)];
        let all = vec![first.clone(), second.clone()];
        let mut ctx = AllocationContext::new(zones, &all);

        let map = assign_all(&mut ctx, &[first, second]);
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].zone, map[1].zone);
    }

    #[test]
    fn test_full_anchor_falls_back_without_moving_anchor() {
        let g1 = guest("One Famm", Some("Family"));
        let g2 = guest("Two Famm", Some("Family"));
        let g3 = guest("Three Famm", Some("Family"));

        // Anchor zone only fits one
        let zones = vec![zone("1", "Main", 1), zone("2", "Main", 5)];
        let all = vec![g1.clone(), g2.clone(), g3.clone()];
        let mut ctx = AllocationContext::new(zones, &all);

        let map = assign_all(&mut ctx, &[g1, g2, g3]);
        assert_eq!(map.len(), 3);
        assert_eq!(map[0].zone, ZoneKey::new("1", "Main"));
        assert_eq!(map[1].zone, ZoneKey::new("2", "Main"));
        // Anchor stays on the first zone even after the overflow; the
        // third guest still tries it first, finds it full, overflows too.
        assert_eq!(map[2].zone, ZoneKey::new("2", "Main"));
        assert_eq!(ctx.anchors[&GuestGroup::Family], ZoneKey::new("1", "Main"));
    }

    #[test]
    fn test_vip_prefers_top_floor_lexicographic() {
        let vip = guest("Vera Imp", Some("VIP"));

        let zones = vec![zone("1", "Main", 2), zone("2", "Main", 2), zone("5", "Main", 2)];
        let all = vec![vip.clone()];
        let mut ctx = AllocationContext::new(zones, &all);

        let map = assign_all(&mut ctx, &[vip]);
        assert_eq!(map[0].zone, ZoneKey::new("5", "Main"));
    }

    #[test]
    fn test_vip_ordering_is_lexicographic_not_numeric() {
        let vip = guest("Vera Imp", Some("VIP"));

        // "9" sorts above "10" as strings
        let zones = vec![zone("10", "Main", 2), zone("9", "Main", 2)];
        let all = vec![vip.clone()];
        let mut ctx = AllocationContext::new(zones, &all);

        let map = assign_all(&mut ctx, &[vip]);
        assert_eq!(map[0].zone, ZoneKey::new("9", "Main"));
    }

    #[test]
    fn test_non_vip_prefers_bottom_floor() {
        let g = guest("Norm Ally", Some("Friends"));

        let zones = vec![zone("5", "Main", 2), zone("1", "Main", 2)];
        let all = vec![g.clone()];
        let mut ctx = AllocationContext::new(zones, &all);

        let map = assign_all(&mut ctx, &[g]);
        assert_eq!(map[0].zone, ZoneKey::new("1", "Main"));
    }

    #[test]
    fn test_exhaustion_leaves_guest_unallocated() {
        let g = guest("Late Comer", None);

        let mut zones = vec![zone("1", "Main", 1)];
        zones[0].occupied = 1;
        let all = vec![g.clone()];
        let mut ctx = AllocationContext::new(zones, &all);

        let map = assign_all(&mut ctx, &[g]);
        assert!(map.is_empty());
        assert_eq!(ctx.zones()[0].occupied, 1);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let zones = vec![zone("1", "Main", 2), zone("2", "Main", 1)];
        let guests: Vec<Guest> = (0..6)
            .map(|i| guest(&format!("Guest {i}"), Some("Friends")))
            .collect();
        let mut ctx = AllocationContext::new(zones, &guests);

        let map = assign_all(&mut ctx, &guests);
        assert_eq!(map.len(), 3);
        for z in ctx.zones() {
            assert!(z.occupied <= z.capacity);
        }
    }
}
