mod event_holder;

use crate::SimTime;
use event_holder::EventHolder;

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// An event popped off an [`EventQueue`], paired with the time at which it executes.
///
/// Two scheduled events are equal only when both their execution times and their payloads are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledEvent<Event, Time> {
    /// Clock time at which the event executes.
    pub time: Time,
    /// What happens at that time.
    pub event: Event,
}

/// Priority queue of scheduled events, plus the simulation's logical clock.
///
/// Events will execute in ascending order of execution time, with ties broken by the order in which they were pushed
/// onto the queue, so repeated runs with the same inputs execute in the same order.
///
/// This struct is generic over the type used to represent clock time, as well as over the event payload. The clock
/// only moves when an event is popped, and then only forward, to the popped event's execution time.
///
/// Attempting to schedule an event for a time that is already past will result in an [`Error::BackInTime`] without
/// modifying the queue. This error indicates that client code probably has a logical error, as rewinding the clock in a
/// discrete-event simulation should be very rare.
///
/// [`Error::BackInTime`]: crate::Error::BackInTime
#[derive(Debug)]
pub struct EventQueue<Event, Time>
where
    Time: SimTime,
{
    events: BinaryHeap<Reverse<EventHolder<Event, Time>>>,
    last_execution_time: Time,
    events_added: usize,
}

impl<Event, Time> EventQueue<Event, Time>
where
    Time: SimTime,
{
    /// Construct a new [`EventQueue`] with no scheduled events and a clock initialized to the provided time.
    pub fn new(start_time: Time) -> Self {
        Self {
            events: BinaryHeap::default(),
            last_execution_time: start_time,
            events_added: 0,
        }
    }

    /// Schedule the provided event at the specified time.
    ///
    /// # Errors
    ///
    /// If `time` is less than the current clock time on `self`, returns an [`Error::BackInTime`] to indicate the likely
    /// presence of a logical bug at the call site, with no modifications to the queue.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule(&mut self, event: Event, time: Time) -> crate::Result {
        if time < self.last_execution_time {
            return Err(crate::Error::BackInTime);
        }

        let count = self.increment_event_count();
        self.events.push(Reverse(EventHolder {
            execution_time: time,
            event,
            insertion_sequence: count,
        }));
        Ok(())
    }

    /// Helper function to make sure incrementing the internal count of added events occurs the same way for every
    /// scheduled event.
    fn increment_event_count(&mut self) -> usize {
        let count = self.events_added;
        self.events_added += 1;
        count
    }

    /// Pop the earliest event from the queue. Updates the current clock time to match the execution time of the popped
    /// event, and leaves the clock untouched when the queue is empty.
    pub fn next(&mut self) -> Option<ScheduledEvent<Event, Time>>
    where
        Time: Clone,
    {
        let Reverse(holder) = self.events.pop()?;
        self.last_execution_time = holder.execution_time.clone();
        Some(ScheduledEvent {
            time: holder.execution_time,
            event: holder.event,
        })
    }

    /// Look at the earliest event without popping it or moving the clock.
    pub fn peek(&self) -> Option<(&Time, &Event)> {
        self.events
            .peek()
            .map(|Reverse(holder)| (&holder.execution_time, &holder.event))
    }

    /// Get a shared reference to the simulation's current clock time.
    pub fn current_time(&self) -> &Time {
        &self.last_execution_time
    }

    /// Number of events still waiting to execute.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether every scheduled event has executed.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<Event, Time> std::fmt::Display for EventQueue<Event, Time>
where
    Time: SimTime,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            formatter,
            "EventQueue with {} scheduled events at current time {:?}",
            self.events.len(),
            self.last_execution_time
        )
    }
}
