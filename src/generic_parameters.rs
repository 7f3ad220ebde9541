use crate::EventQueue;

use std::fmt::Debug;

/// Clock type for a simulation.
///
/// Kept generic so the event queue and runner can be driven by whichever clock suits a model. This trait is a superset
/// of [`Ord`] and [`Debug`] with no additional requirements or functionality.
///
/// Your implementation of this trait should use the [`Ord`] trait to account for the overall sequencing of events. Note
/// that events will be executed in ascending order of execution time, i.e. if `A.cmp(&B) == std::cmp::Ordering::Less`
/// then event A will execute before event B. Ties are resolved by the order in which events are enqueued.
///
/// [`Debug`] is necessary for the implementation of Debug on [`EventQueue`] and for the per-event trace logging in
/// [`Simulation::run()`].
///
/// The dispatch engine counts whole seconds in a [`u64`]. Implementations are provided for integral builtin types, but
/// not for floating-point builtin types as the latter do not implement [`Ord`]. If you wish to use either [`f32`] or
/// [`f64`] as your [`SimTime`], enable the `ordered-float` feature (and so add a dependency on the [`ordered-float`]
/// crate) to gain access to an implementation on [`OrderedFloat`] and [`NotNan`].
///
/// [`Simulation::run()`]: crate::Simulation::run
/// [`ordered-float`]: https://docs.rs/ordered-float/4
/// [`OrderedFloat`]: https://docs.rs/ordered-float/4/ordered_float/struct.OrderedFloat.html
/// [`NotNan`]: https://docs.rs/ordered-float/4/ordered_float/struct.NotNan.html
pub trait SimTime: Ord + Debug {}

impl SimTime for u8 {}
impl SimTime for u16 {}
impl SimTime for u32 {}
impl SimTime for u64 {}
impl SimTime for u128 {}
impl SimTime for usize {}
impl SimTime for i8 {}
impl SimTime for i16 {}
impl SimTime for i32 {}
impl SimTime for i64 {}
impl SimTime for i128 {}
impl SimTime for isize {}

#[cfg(feature = "ordered-float")]
impl<Float> SimTime for ordered_float::OrderedFloat<Float> where Float: ordered_float::FloatCore + Debug {}

#[cfg(feature = "ordered-float")]
impl<Float> SimTime for ordered_float::NotNan<Float> where Float: ordered_float::FloatCore + Debug {}

/// The model a simulation drives: every simulated entity, plus the rules for how events change them.
///
/// Events are plain data of the associated [`Event`] type, usually a small enum naming what happened and to whom.
/// The state matches on that value in [`execute()`] and mutates itself accordingly. Handlers receive exclusive access
/// to the event queue so they can schedule follow-up events, and the queue's clock has already been advanced to the
/// popped event's time.
///
/// [`is_complete()`] provides a way for [`Simulation::run()`] to ask whether it should wrap up event execution. The
/// default implementation always answers "no," and so a simulation running with the default will continue until the
/// event queue becomes empty.
///
/// [`Event`]: SimState::Event
/// [`execute()`]: SimState::execute
/// [`is_complete()`]: SimState::is_complete
/// [`Simulation::run()`]: crate::Simulation::run
pub trait SimState<Time>
where
    Time: SimTime,
{
    /// Payload carried by each scheduled event.
    type Event: Debug;

    /// Apply one popped event to the state.
    ///
    /// # Errors
    ///
    /// Any error returned here stops [`Simulation::run()`] and is handed back to its caller unchanged. Implementations
    /// should return an error rather than skip an event whenever the event contradicts the state's bookkeeping.
    ///
    /// [`Simulation::run()`]: crate::Simulation::run
    fn execute(&mut self, event: Self::Event, event_queue: &mut EventQueue<Self::Event, Time>) -> crate::Result;

    /// Asked before every event is popped, with the clock as it stands. Returning `true` ends [`Simulation::run()`]
    /// with the remaining events still queued.
    ///
    /// [`Simulation::run()`]: crate::Simulation::run
    #[allow(unused_variables)]
    fn is_complete(&self, current_time: &Time) -> bool {
        false
    }
}
