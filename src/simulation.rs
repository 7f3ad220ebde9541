use crate::{EventQueue, SimState, SimTime};

use std::fmt::Formatter;

/// A model paired with the queue of events that drive it.
///
/// Both halves are owned here and exposed through shared and exclusive accessors, so callers can seed events before a
/// run and pull results out of the model afterwards. A typical run looks like:
///
/// 1. Build the model, a type implementing [`SimState`], and hand it to [`new()`] along with the clock's start.
/// 2. Seed one or more events through [`schedule()`].
/// 3. Call [`run()`] to drain the queue, or [`step()`] to advance one event at a time.
/// 4. Read the outcome through [`state()`], or take the model back with [`into_state()`].
///
/// [`new()`]: Simulation::new
/// [`schedule()`]: Simulation::schedule
/// [`run()`]: Simulation::run
/// [`step()`]: Simulation::step
/// [`state()`]: Simulation::state
/// [`into_state()`]: Simulation::into_state
#[derive(Debug)]
pub struct Simulation<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    event_queue: EventQueue<State::Event, Time>,
    /// Handed exclusively to each event as it executes.
    state: State,
}

impl<State, Time> Simulation<State, Time>
where
    State: SimState<Time>,
    Time: SimTime + Clone,
{
    /// Wrap `initial_state` with an empty queue whose clock reads `start_time`.
    pub fn new(initial_state: State, start_time: Time) -> Self {
        Self {
            event_queue: EventQueue::new(start_time),
            state: initial_state,
        }
    }

    /// Keep calling [`step()`] until it reports that nothing is left to do: the model says it is complete, or the
    /// queue has run dry.
    ///
    /// # Errors
    ///
    /// The first error returned by [`state.execute()`] stops the run and comes back unchanged. [`Error::BackInTime`]
    /// means a handler tried to schedule something in the past; other variants come from the model's own checks.
    ///
    /// [`step()`]: Simulation::step
    /// [`state.execute()`]: SimState::execute
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn run(&mut self) -> crate::Result {
        let mut executed = 0usize;
        while self.step()? {
            executed += 1;
        }

        log::debug!(
            "[{:?}] simulation stopped after {} events, {} still queued",
            self.event_queue.current_time(),
            executed,
            self.event_queue.len()
        );
        Ok(())
    }

    /// Execute at most one event. Returns `Ok(false)` without touching anything when the state reports completion or
    /// the queue is empty, and `Ok(true)` after executing an event.
    ///
    /// # Errors
    ///
    /// Forwards any error returned by [`state.execute()`]. The event that failed has already been popped and the clock
    /// already advanced to its time.
    ///
    /// [`state.execute()`]: SimState::execute
    pub fn step(&mut self) -> crate::Result<bool> {
        if self.state.is_complete(self.event_queue.current_time()) {
            return Ok(false);
        }

        let Some(next_event) = self.event_queue.next() else {
            return Ok(false);
        };

        log::trace!("[{:?}] executing {:?}", next_event.time, next_event.event);
        self.state.execute(next_event.event, &mut self.event_queue)?;
        Ok(true)
    }

    /// Queue `event` to execute at `time`.
    ///
    /// # Errors
    ///
    /// [`Error::BackInTime`] when `time` is earlier than the clock, leaving the queue untouched.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule(&mut self, event: State::Event, time: Time) -> crate::Result {
        self.event_queue.schedule(event, time)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Consume the simulation, keeping only its state.
    pub fn into_state(self) -> State {
        self.state
    }

    pub fn event_queue(&self) -> &EventQueue<State::Event, Time> {
        &self.event_queue
    }

    pub fn event_queue_mut(&mut self) -> &mut EventQueue<State::Event, Time> {
        &mut self.event_queue
    }
}

impl<State, Time> std::fmt::Display for Simulation<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Simulation at time {:?}", self.event_queue.current_time())
    }
}
