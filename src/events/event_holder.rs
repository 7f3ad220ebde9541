use crate::SimTime;
use std::cmp::Ordering;

/// Helper struct for the event queue. This struct holds the event payload alongside the data necessary to sort events
/// within the priority queue, namely the execution time and a record of the event's insertion sequence.
///
/// The implementation of [`Ord`] on this struct cares first about the execution time, comparing the insertion
/// sequences only to break ties.
#[derive(Debug)]
pub(super) struct EventHolder<Event, Time>
where
    Time: SimTime,
{
    pub execution_time: Time,
    pub event: Event,
    pub insertion_sequence: usize,
}

impl<Event, Time> PartialEq<Self> for EventHolder<Event, Time>
where
    Time: SimTime,
{
    fn eq(&self, other: &Self) -> bool {
        self.insertion_sequence == other.insertion_sequence && self.execution_time == other.execution_time
    }
}

impl<Event, Time> Eq for EventHolder<Event, Time> where Time: SimTime {}

impl<Event, Time> PartialOrd<Self> for EventHolder<Event, Time>
where
    Time: SimTime,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Event, Time> Ord for EventHolder<Event, Time>
where
    Time: SimTime,
{
    fn cmp(&self, other: &Self) -> Ordering {
        crate::ordering::event_order(
            (&self.execution_time, self.insertion_sequence),
            (&other.execution_time, other.insertion_sequence),
        )
    }
}
