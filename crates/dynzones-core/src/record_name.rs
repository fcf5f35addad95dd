//! Record name conversion between display form and API form
//!
//! The API composes `name + "." + zone` on the server side, so outbound names
//! must be relative with no trailing dot, and `@` for the zone apex.
//! Inbound names arrive fully qualified and are shown relative to the zone.

/// Marker for the zone apex
pub const APEX: &str = "@";

/// Canonicalize a user-entered record name before it is sent to the API.
///
/// - `@` and `\@` become `@`
/// - trailing dots are removed (`www.` becomes `www`)
/// - a name equal to the zone itself becomes `@`
///
/// Everything else is returned trimmed and otherwise unchanged.
pub fn normalize_record_name(name: &str, zone: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let trimmed = name.trim();
    if trimmed == APEX || trimmed == "\\@" {
        return APEX.to_string();
    }

    let relative = trimmed.trim_end_matches('.');
    let zone = zone.strip_suffix('.').unwrap_or(zone);
    if relative == zone {
        return APEX.to_string();
    }

    relative.to_string()
}

/// Turn a fully qualified record name from the API into the form shown to users.
///
/// Returns `@` for the apex. When the record ends with the zone, the zone and
/// the character in front of it are cut off, then one remaining trailing dot.
/// The character in front of the zone is not checked, so
/// `wwwexample.com.` in `example.com.` yields `ww`. Names not ending with the
/// zone come back unchanged.
pub fn strip_zone(record_name: &str, zone_name: &str) -> String {
    let fqdn_record = with_trailing_dot(record_name);
    let fqdn_zone = with_trailing_dot(zone_name);

    if fqdn_record == fqdn_zone {
        return APEX.to_string();
    }

    if let Some(rest) = fqdn_record.strip_suffix(fqdn_zone.as_str()) {
        let mut chars = rest.chars();
        chars.next_back();
        let prefix = chars.as_str();
        return prefix.strip_suffix('.').unwrap_or(prefix).to_string();
    }

    record_name.to_string()
}

fn with_trailing_dot(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_apex_markers() {
        assert_eq!(normalize_record_name("@", "example.com"), "@");
        assert_eq!(normalize_record_name("  @ ", "example.com"), "@");
        assert_eq!(normalize_record_name("\\@", "example.com"), "@");
    }

    #[test]
    fn test_normalize_strips_trailing_dots() {
        assert_eq!(normalize_record_name("www.", "example.com"), "www");
        assert_eq!(normalize_record_name("www...", "example.com"), "www");
        assert_eq!(normalize_record_name(" host ", "example.com"), "host");
        assert_eq!(normalize_record_name("a.b", "example.com"), "a.b");
    }

    #[test]
    fn test_normalize_zone_name_becomes_apex() {
        assert_eq!(normalize_record_name("example.com", "example.com"), "@");
        assert_eq!(normalize_record_name("example.com.", "example.com"), "@");
        assert_eq!(normalize_record_name("example.com", "example.com."), "@");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_record_name("", "example.com"), "");
    }

    #[test]
    fn test_strip_zone() {
        assert_eq!(strip_zone("www.example.com.", "example.com."), "www");
        assert_eq!(strip_zone("www.example.com", "example.com"), "www");
        assert_eq!(strip_zone("a.b.example.com.", "example.com"), "a.b");
        assert_eq!(strip_zone("example.com.", "example.com"), "@");
        assert_eq!(strip_zone("example.com", "example.com."), "@");
    }

    #[test]
    fn test_strip_zone_fallback_returns_input() {
        assert_eq!(strip_zone("other.org.", "example.com."), "other.org.");
        assert_eq!(strip_zone("www", "example.com"), "www");
    }

    #[test]
    fn test_strip_zone_removes_remaining_trailing_dot() {
        assert_eq!(strip_zone("www..example.com.", "example.com."), "www");
        assert_eq!(strip_zone("www..example.com", "example.com"), "www");
    }

    #[test]
    fn test_strip_zone_does_not_check_label_boundary() {
        assert_eq!(strip_zone("wwwexample.com.", "example.com."), "ww");
        assert_eq!(strip_zone("xexample.com.", "example.com."), "");
    }

    #[test]
    fn test_round_trip() {
        for zone in ["example.com", "example.com.", "users.example.org"] {
            for label in ["www", "a.b", "_acme-challenge", "host-1"] {
                let fqdn = format!("{label}.{zone}");
                assert_eq!(strip_zone(&fqdn, zone), label, "strip {fqdn} in {zone}");
                assert_eq!(normalize_record_name(label, zone), label);
            }
        }
    }
}
