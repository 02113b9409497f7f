use std::net::IpAddr;

/// Returns `true` if `s` is an IPv4 or IPv6 literal.
///
/// Surrounding whitespace, ports, zone indices and
/// IPv4 octets with leading zeros are not accepted.
pub fn is_ip_address(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}
