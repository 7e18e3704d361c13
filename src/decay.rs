//! Temporal decay — maps message age to an influence weight.

/// Weight for a message sent at `ts`, observed at `now` (both epoch seconds).
///
/// Buckets: up to 1 hour old → 1.0, up to 24 hours → 0.7, older → 0.4.
/// Boundaries resolve to the lower-age bucket. Future timestamps clamp to 1.0.
pub fn decay_weight(ts: f64, now: f64) -> f64 {
    let age_hours = (now - ts) / 3600.0;
    if age_hours <= 1.0 {
        1.0
    } else if age_hours <= 24.0 {
        0.7
    } else {
        0.4
    }
}
