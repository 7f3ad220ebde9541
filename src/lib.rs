//! # Overview
//!
//! dispatchsim simulates a ride-share dispatch service as a discrete-event simulation. A fixed fleet of drivers serves
//! a batch of ride requests spread over a window of time. Each request arrives at its request time and is handed to
//! the first idle driver; when every driver is busy it waits in a queue ordered by ride type. Whenever a ride ends,
//! the freed driver takes the highest-priority waiting request, or goes back to the idle pool if nobody is waiting.
//! Once every request has been dropped off, the run is summarized in a [`Report`]: average waiting and riding times,
//! rides handled per driver, and the smallest fleet that could have served every request without anyone waiting.
//!
//! The engine underneath is a small, generic event loop:
//!
//! * [`EventQueue`] orders scheduled events by execution time, breaking ties in insertion order, and owns the logical
//!   clock. Scheduling an event in the past fails with [`Error::BackInTime`].
//! * [`SimState`] is implemented by the model. Its associated event type is a plain value, typically an enum, and
//!   each event is handed to [`SimState::execute`] together with exclusive access to the queue.
//! * [`Simulation`] owns both and runs until the queue drains, the state reports completion, or an event fails.
//!
//! [`Dispatcher`] is the ride-share model built on top of that loop. [`runner::run`] ties everything together for a
//! single seeded run, and [`RunConfig`] describes one.
//!
//! # Features
//!
//! dispatchsim offers one feature, `ordered-float`, which adds a dependency on the [`ordered-float`] crate so that its
//! [`OrderedFloat`] and [`NotNan`] structs may be used as [`SimTime`] for models that need a continuous clock. The ride
//! dispatch model itself keeps time in whole seconds and does not need it.
//!
//! [`ordered-float`]: https://docs.rs/ordered-float/4
//! [`OrderedFloat`]: https://docs.rs/ordered-float/4/ordered_float/struct.OrderedFloat.html
//! [`NotNan`]: https://docs.rs/ordered-float/4/ordered_float/struct.NotNan.html

mod config;
mod dispatch;
mod driver;
mod error;
mod events;
mod generator;
mod generic_parameters;
mod report;
mod request;
mod simulation;

pub mod analysis;
pub mod ordering;
pub mod runner;

pub use config::{parse_counts, prompt_counts, CountsRejection, RunConfig, DEFAULT_WINDOW_SECS};
pub use dispatch::{build_simulation, DispatchEvent, DispatchSimulation, Dispatcher};
pub use driver::{Driver, DriverId};
pub use error::{Error, Result};
pub use events::{EventQueue, ScheduledEvent};
pub use generator::{RequestGenerator, MAX_DISTANCE_MILES, MIN_DISTANCE_MILES};
pub use generic_parameters::{SimState, SimTime};
pub use report::{format_clock, format_duration, Report};
pub use request::{PriorityJitter, Request, RequestId, RideType, SPEED_MILES_PER_HOUR};
pub use runner::RunOutcome;
pub use simulation::Simulation;
