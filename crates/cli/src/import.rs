//! Guest list file parsing
//!
//! One guest per line: "Full Name; group; proximity request". The
//! group and proximity fields are optional; blank lines and lines
//! starting with '#' are skipped.

use uuid::Uuid;

use atrium_core::Guest;

pub fn parse_guest_lines(
    event_id: Uuid,
    contents: &str,
) -> Result<Vec<Guest>, Box<dyn std::error::Error>> {
    let mut guests = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.splitn(3, ';').map(str::trim);
        let name = fields
            .next()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| format!("line {}: missing guest name", idx + 1))?;

        let mut guest = Guest::new(event_id, name.to_string());
        if let Some(group) = fields.next().filter(|g| !g.is_empty()) {
            guest = guest.with_group(group);
        }
        if let Some(request) = fields.next().filter(|r| !r.is_empty()) {
            guest = guest.with_proximity_request(request.to_string());
        }
        guests.push(guest);
    }

    Ok(guests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::GuestGroup;

    #[test]
    fn test_parse_full_lines() {
        let contents = "\
# wedding list
Alice Moreau; VIP
Bob Tan; Family; near Alice Moreau

Carol Diaz
";
        let guests = parse_guest_lines(Uuid::new_v4(), contents).unwrap();
        assert_eq!(guests.len(), 3);

        assert_eq!(guests[0].full_name, "Alice Moreau");
        assert_eq!(guests[0].group, Some(GuestGroup::Vip));

        assert_eq!(guests[1].group, Some(GuestGroup::Family));
        assert_eq!(
            guests[1].proximity_request.as_deref(),
            Some("near Alice Moreau")
        );

        assert_eq!(guests[2].full_name, "Carol Diaz");
        assert!(guests[2].group.is_none());
    }

    #[test]
    fn test_parse_rejects_nameless_line() {
        let contents = "; Family";
        assert!(parse_guest_lines(Uuid::new_v4(), contents).is_err());
    }
}
