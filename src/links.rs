//! Resource locations for `Location` headers.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const API_BASE: &str = "/api";

/// Everything but RFC 3986 unreserved characters is escaped in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// `search` is shadowed by the search route; dot segments are collapsed by clients.
fn routable(moniker: &str) -> bool {
    !moniker.trim().is_empty() && !matches!(moniker, "search" | "." | "..")
}

/// Path of the get-by-moniker route, or `None` when the moniker cannot be routed back to the camp.
pub fn camp_location(moniker: &str) -> Option<String> {
    routable(moniker).then(|| format!("{}/camps/{}", API_BASE, utf8_percent_encode(moniker, SEGMENT)))
}

pub fn talk_location(moniker: &str, talk_id: i32) -> Option<String> {
    camp_location(moniker).map(|camp| format!("{}/talks/{}", camp, talk_id))
}
