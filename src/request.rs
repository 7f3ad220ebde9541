use crate::DriverId;

use std::fmt::{Display, Formatter};

/// Average driving speed assumed for every ride.
pub const SPEED_MILES_PER_HOUR: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Identifies a request and doubles as its issue sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub usize);

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Service category chosen by the customer, listed from highest to lowest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RideType {
    Express,
    Standard,
    WaitAndSave,
    EnvironmentallyConscious,
}

impl RideType {
    pub const ALL: [RideType; 4] = [
        RideType::Express,
        RideType::Standard,
        RideType::WaitAndSave,
        RideType::EnvironmentallyConscious,
    ];

    /// Priority before any distance adjustment. Higher is served first.
    pub fn base_priority(self) -> i32 {
        match self {
            RideType::Express => 3,
            RideType::Standard => 2,
            RideType::WaitAndSave => 1,
            RideType::EnvironmentallyConscious => 0,
        }
    }
}

impl Display for RideType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            RideType::Express => "Express",
            RideType::Standard => "Standard",
            RideType::WaitAndSave => "Wait & Save",
            RideType::EnvironmentallyConscious => "Environmentally Conscious",
        };
        write!(f, "{}", name)
    }
}

/// How a request's priority is nudged below its ride type's base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriorityJitter {
    /// Priority is the base value. Same-category requests are ordered by estimated arrival and then by id.
    #[default]
    None,
    /// Subtract `|hash(distance) % 3|`, where `hash` folds the IEEE-754 bits of the distance into 32 bits the way the
    /// JVM hashes a boxed double. Only useful for reproducing legacy runs.
    LegacyDistanceHash,
}

impl PriorityJitter {
    /// Adjustment in `0..=2` subtracted from the base priority.
    pub fn adjustment(self, distance_miles: f64) -> i32 {
        match self {
            PriorityJitter::None => 0,
            PriorityJitter::LegacyDistanceHash => {
                // the JVM collapses every NaN to one canonical bit pattern before hashing
                let bits = if distance_miles.is_nan() {
                    0x7ff8_0000_0000_0000
                } else {
                    distance_miles.to_bits()
                };
                let hash = (bits ^ (bits >> 32)) as i32;
                (hash % 3).abs()
            }
        }
    }
}

/// A customer's request for a ride.
///
/// The core attributes are fixed at creation, along with everything derived from them: riding time, estimated arrival
/// and priority. The assigned driver and actual arrival time are filled in exactly once, when the request is
/// dispatched. Times are whole seconds on the simulation clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    id: RequestId,
    customer: String,
    origin: String,
    destination: String,
    distance_miles: f64,
    request_time: u64,
    ride_type: RideType,
    priority: i32,
    riding_seconds: f64,
    estimated_arrival_time: u64,
    assigned_driver: Option<DriverId>,
    actual_arrival_time: Option<u64>,
}

impl Request {
    pub fn new(
        id: RequestId,
        customer: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance_miles: f64,
        request_time: u64,
        ride_type: RideType,
    ) -> Self {
        let riding_seconds = distance_miles / SPEED_MILES_PER_HOUR * SECONDS_PER_HOUR;
        Self {
            id,
            customer: customer.into(),
            origin: origin.into(),
            destination: destination.into(),
            distance_miles,
            request_time,
            ride_type,
            priority: ride_type.base_priority(),
            riding_seconds,
            estimated_arrival_time: request_time.saturating_add(riding_seconds as u64),
            assigned_driver: None,
            actual_arrival_time: None,
        }
    }

    /// Recompute the priority with the given jitter applied.
    pub fn with_priority_jitter(mut self, jitter: PriorityJitter) -> Self {
        self.priority = self.ride_type.base_priority() - jitter.adjustment(self.distance_miles);
        self
    }

    /// Hand the request to a driver. `actual_arrival_time` is when that driver drops the customer off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyDispatched`] if the request already has a driver, leaving it unchanged.
    ///
    /// [`Error::AlreadyDispatched`]: crate::Error::AlreadyDispatched
    pub fn dispatch(&mut self, driver: DriverId, actual_arrival_time: u64) -> crate::Result {
        if self.assigned_driver.is_some() {
            return Err(crate::Error::AlreadyDispatched(self.id));
        }

        self.assigned_driver = Some(driver);
        self.actual_arrival_time = Some(actual_arrival_time);
        Ok(())
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_miles
    }

    pub fn request_time(&self) -> u64 {
        self.request_time
    }

    pub fn ride_type(&self) -> RideType {
        self.ride_type
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Exact riding time in seconds, including the fractional part.
    pub fn riding_seconds(&self) -> f64 {
        self.riding_seconds
    }

    /// Riding time truncated to the whole seconds the clock works in.
    pub fn riding_duration(&self) -> u64 {
        self.riding_seconds as u64
    }

    /// Drop-off time had a driver been free the moment the request came in, saturating at [`u64::MAX`].
    pub fn estimated_arrival_time(&self) -> u64 {
        self.estimated_arrival_time
    }

    pub fn assigned_driver(&self) -> Option<DriverId> {
        self.assigned_driver
    }

    pub fn actual_arrival_time(&self) -> Option<u64> {
        self.actual_arrival_time
    }

    /// How much later than estimated the customer arrives, or `None` before dispatch.
    pub fn waiting_seconds(&self) -> Option<i64> {
        self.actual_arrival_time
            .map(|actual| actual as i64 - self.estimated_arrival_time as i64)
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Request {} by {} from {} to {} ({:.2} mi, {}, priority {})",
            self.id, self.customer, self.origin, self.destination, self.distance_miles, self.ride_type, self.priority
        )
    }
}
