//! Priority sorter - orders unallocated guests for greedy assignment

use crate::models::{Guest, GuestGroup};

/// Rank assigned to unknown or missing groups
pub const UNRANKED: u8 = 99;

fn group_rank(group: &GuestGroup) -> u8 {
    match group {
        GuestGroup::Vip => 0,
        GuestGroup::BrideSide => 1,
        GuestGroup::GroomSide => 2,
        GuestGroup::Family => 3,
        GuestGroup::Friends => 4,
        GuestGroup::Other(_) => UNRANKED,
    }
}

/// Allocation priority for a guest (lower sorts first)
pub fn guest_rank(guest: &Guest) -> u8 {
    guest.group.as_ref().map(group_rank).unwrap_or(UNRANKED)
}

/// Sort guests for one-at-a-time assignment.
///
/// Stable: ties keep fetch order, so the run is deterministic given a
/// deterministic guest listing upstream.
pub fn sort_for_allocation(guests: &mut [Guest]) {
    guests.sort_by_key(guest_rank);
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn guest(name: &str, group: Option<&str>) -> Guest {
        let mut g = Guest::new(Uuid::new_v4(), name.to_string());
        if let Some(label) = group {
            g = g.with_group(label);
        }
        g
    }

    #[test]
    fn test_priority_ordering() {
        let mut guests = vec![
            guest("Ana", Some("Friends")),
            guest("Ben", Some("VIP")),
            guest("Cleo", None),
        ];
        sort_for_allocation(&mut guests);

        let names: Vec<&str> = guests.iter().map(|g| g.full_name.as_str()).collect();
        assert_eq!(names, ["Ben", "Ana", "Cleo"]);
    }

    #[test]
    fn test_full_rank_table() {
        let mut guests = vec![
            guest("f", Some("Friends")),
            guest("o", Some("College Crew")),
            guest("g", Some("Groom Side")),
            guest("v", Some("VIP")),
            guest("fam", Some("Family")),
            guest("b", Some("Bride Side")),
        ];
        sort_for_allocation(&mut guests);

        let names: Vec<&str> = guests.iter().map(|g| g.full_name.as_str()).collect();
        assert_eq!(names, ["v", "b", "g", "fam", "f", "o"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut guests = vec![
            guest("first", Some("Family")),
            guest("second", Some("Family")),
            guest("third", Some("Family")),
        ];
        sort_for_allocation(&mut guests);

        let names: Vec<&str> = guests.iter().map(|g| g.full_name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_unknown_group_ranks_last() {
        assert_eq!(guest_rank(&guest("x", Some("College Crew"))), UNRANKED);
        assert_eq!(guest_rank(&guest("y", None)), UNRANKED);
        assert_eq!(guest_rank(&guest("z", Some("VIP"))), 0);
    }
}
