use crate::{DriverId, RequestId};

/// Errors that may be encountered while configuring, executing, or analyzing a dispatch simulation.
///
/// The [`BackInTime`] variant originates from the [`EventQueue`] to indicate that an event's scheduled execution time
/// is prior to the queue's current time. This error likely corresponds to a logical bug at the call site, e.g.
/// seeding an arrival for a request that was issued before the simulation's start time.
///
/// The [`UnknownRequest`], [`NotActive`], [`UnknownDriver`], [`AlreadyDispatched`] and [`ConservationViolated`]
/// variants originate from the [`Dispatcher`] and mean its bookkeeping no longer agrees with the events it is being
/// asked to handle. They always indicate a scheduling bug rather than bad input. [`ClockOverflow`] also comes from the
/// dispatcher, when a request was issued so close to [`u64::MAX`] that its drop-off cannot be represented.
/// [`Simulation::run()`] halts on the first of any of these.
///
/// [`BackInTime`]: Error::BackInTime
/// [`UnknownRequest`]: Error::UnknownRequest
/// [`NotActive`]: Error::NotActive
/// [`UnknownDriver`]: Error::UnknownDriver
/// [`AlreadyDispatched`]: Error::AlreadyDispatched
/// [`ClockOverflow`]: Error::ClockOverflow
/// [`ConservationViolated`]: Error::ConservationViolated
/// [`EventQueue`]: crate::EventQueue
/// [`Dispatcher`]: crate::Dispatcher
/// [`Simulation::run()`]: crate::Simulation::run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The event queue rejected an event that would have been scheduled for a time that has already passed.
    BackInTime,
    /// A run was configured with values the engine cannot work with, such as zero drivers.
    InvalidConfiguration(String),
    /// An arrival fired for a request the dispatcher is not holding as incoming.
    UnknownRequest(RequestId),
    /// A ride-finished event fired for a request that is not in the active queue at the current time.
    NotActive(RequestId),
    /// A finishing ride referenced a driver that is not out on a ride.
    UnknownDriver(DriverId),
    /// A request was handed a driver after it had already been dispatched.
    AlreadyDispatched(RequestId),
    /// A request's drop-off time would not fit in the clock.
    ClockOverflow(RequestId),
    /// Drivers or requests went missing between the dispatcher's containers.
    ConservationViolated {
        /// Drivers sitting in the idle pool.
        idle: usize,
        /// Requests currently out on a ride.
        active: usize,
        /// Drivers the dispatcher was built with.
        drivers: usize,
        /// Requests accounted for across every container.
        accounted: usize,
        /// Requests handed to the dispatcher.
        issued: usize,
    },
    /// Analysis was asked about a request that never received a driver.
    NotDispatched(RequestId),
    /// Analysis was asked to average over zero requests.
    EmptyHistory,
}

impl std::fmt::Display for Error {
    #[allow(clippy::uninlined_format_args)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let descriptor = match self {
            Self::BackInTime => "event execution time is less than current simulation time".into(),
            Self::InvalidConfiguration(reason) => format!("invalid configuration: {}", reason),
            Self::UnknownRequest(id) => format!("request {} is not waiting to arrive", id),
            Self::NotActive(id) => format!("request {} is not an active ride at the current time", id),
            Self::UnknownDriver(id) => format!("driver {} is not assigned to any ride", id),
            Self::AlreadyDispatched(id) => format!("request {} already has a driver", id),
            Self::ClockOverflow(id) => format!("request {} would be dropped off past the end of the clock", id),
            Self::ConservationViolated {
                idle,
                active,
                drivers,
                accounted,
                issued,
            } => format!(
                "conservation violated: {} idle + {} active of {} drivers, {} of {} requests accounted for",
                idle, active, drivers, accounted, issued
            ),
            Self::NotDispatched(id) => format!("request {} was never dispatched", id),
            Self::EmptyHistory => "no finished requests to analyze".into(),
        };
        write!(f, "{}", descriptor)
    }
}

impl std::error::Error for Error {}

/// [`std::result::Result`]`<T, `[`dispatchsim::Error`]`>`, defaulting to `T = ()`.
///
/// A type alias that simplifies the signatures of the engine's fallible operations.
///
/// [`dispatchsim::Error`]: Error
pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_request() {
        let message = Error::NotActive(RequestId(7)).to_string();
        assert_eq!("request #7 is not an active ride at the current time", message);
    }

    #[test]
    fn overflow_message_names_the_request() {
        assert_eq!(
            "request #3 would be dropped off past the end of the clock",
            Error::ClockOverflow(RequestId(3)).to_string()
        );
    }

    #[test]
    fn conservation_message_lists_counts() {
        let error = Error::ConservationViolated {
            idle: 1,
            active: 0,
            drivers: 2,
            accounted: 3,
            issued: 3,
        };
        assert_eq!(
            "conservation violated: 1 idle + 0 active of 2 drivers, 3 of 3 requests accounted for",
            error.to_string()
        );
    }
}
