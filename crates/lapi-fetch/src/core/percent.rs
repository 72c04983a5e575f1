use crate::data::ProgressSnapshot;

/// Completion percentage of the active direction, floored and clamped to 100.
///
/// Returns `None` when either counter is unknown: there is no estimate to
/// apply. A known total of zero reads as 0% while the transfer runs and 100%
/// once it is inactive, so empty bodies finish without dividing by zero.
///
/// ```
/// use lapi_fetch::{ProgressSnapshot, percent_of};
///
/// let snapshot = ProgressSnapshot {
///     bytes_received:   Some(2452),
///     total_to_receive: Some(2500),
///     bytes_sent:       Some(0),
///     total_to_send:    Some(0),
///     in_progress:      true,
/// };
/// assert_eq!(percent_of(&snapshot), Some(98));
/// ```
#[must_use]
pub fn percent_of(snapshot: &ProgressSnapshot) -> Option<u8> {
    let (moved, total) = snapshot.counters();
    let (moved, total) = (moved?, total?);
    if total == 0 {
        return Some(if snapshot.in_progress { 0 } else { 100 });
    }
    let percent = (u128::from(moved) * 100 / u128::from(total)).min(100);
    Some(percent as u8)
}
