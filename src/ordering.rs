//! Comparison functions shared by the event queue and the dispatcher's waiting queue.
//!
//! Each function follows the [`Ord::cmp`] convention of "[`Ordering::Less`] goes first": the event or request that
//! compares as less is the one that gets processed or served earlier.

use crate::Request;

use std::cmp::Ordering;

/// Time order for scheduled events: earlier execution time first, then earlier insertion.
pub fn event_order<Time: Ord>(a: (&Time, usize), b: (&Time, usize)) -> Ordering {
    a.0.cmp(b.0).then(a.1.cmp(&b.1))
}

/// Service order for waiting requests.
///
/// Higher priority is served first. Among equal priorities the request expected to arrive earlier goes first, and the
/// request id settles anything still tied so the order never depends on heap internals.
pub fn waiting_order(a: &Request, b: &Request) -> Ordering {
    b.priority()
        .cmp(&a.priority())
        .then_with(|| a.estimated_arrival_time().cmp(&b.estimated_arrival_time()))
        .then_with(|| a.id().cmp(&b.id()))
}
