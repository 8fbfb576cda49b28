//! Timing-safe comparison helpers.

/// Compares two byte slices in time proportional to their length only.
///
/// Slices of different lengths compare unequal immediately; length is not
/// secret for fixed-size digests.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
