use crate::{Error, PriorityJitter, Request, RequestId, RideType};

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use rand_pcg::Pcg64;

/// Shortest ride a generated request asks for, in miles.
pub const MIN_DISTANCE_MILES: f64 = 10.0;
/// Generated distances stay strictly below this many miles.
pub const MAX_DISTANCE_MILES: f64 = 60.0;

/// Produces random ride requests spread over a window of time.
///
/// Request `i` is made by `Customer{i}` from `Start location{i}` to `Ending Location{i}`. Its distance is uniform on
/// [`MIN_DISTANCE_MILES`]`..`[`MAX_DISTANCE_MILES`], its request time uniform on `start_time..start_time + window`, and
/// its ride type uniform over [`RideType::ALL`].
#[derive(Debug)]
pub struct RequestGenerator<R = Pcg64> {
    start_time: u64,
    offset: Uniform<u64>,
    distance: Uniform<f64>,
    jitter: PriorityJitter,
    rng: R,
}

impl RequestGenerator<Pcg64> {
    /// A generator whose output is fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when `window_secs` is zero or the window ends past [`u64::MAX`].
    pub fn seeded(start_time: u64, window_secs: u64, seed: u64) -> crate::Result<Self> {
        Self::new(start_time, window_secs, Pcg64::seed_from_u64(seed))
    }
}

impl<R> RequestGenerator<R>
where
    R: Rng,
{
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when `window_secs` is zero or the window ends past [`u64::MAX`].
    pub fn new(start_time: u64, window_secs: u64, rng: R) -> crate::Result<Self> {
        if start_time.checked_add(window_secs).is_none() {
            return Err(Error::InvalidConfiguration(format!(
                "request window of {} seconds starting at {} ends past the end of the clock",
                window_secs, start_time
            )));
        }
        let offset = Uniform::new(0, window_secs)
            .map_err(|e| Error::InvalidConfiguration(format!("request window of {} seconds: {}", window_secs, e)))?;
        let distance = Uniform::new(MIN_DISTANCE_MILES, MAX_DISTANCE_MILES)
            .map_err(|e| Error::InvalidConfiguration(format!("distance range: {}", e)))?;

        Ok(Self {
            start_time,
            offset,
            distance,
            jitter: PriorityJitter::None,
            rng,
        })
    }

    /// Apply `jitter` to the priority of every request generated from now on.
    pub fn with_priority_jitter(mut self, jitter: PriorityJitter) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn generate(&mut self, id: RequestId) -> Request {
        let distance = self.distance.sample(&mut self.rng);
        let request_time = self.start_time + self.offset.sample(&mut self.rng);
        let ride_type = RideType::ALL[self.rng.random_range(0..RideType::ALL.len())];

        Request::new(
            id,
            format!("Customer{}", id.0),
            format!("Start location{}", id.0),
            format!("Ending Location{}", id.0),
            distance,
            request_time,
            ride_type,
        )
        .with_priority_jitter(self.jitter)
    }

    /// Generate requests with ids `0..count`.
    pub fn generate_batch(&mut self, count: usize) -> Vec<Request> {
        (0..count).map(|i| self.generate(RequestId(i))).collect()
    }
}
