use crate::{Error, PriorityJitter, MAX_DISTANCE_MILES, SPEED_MILES_PER_HOUR};

use std::io::{BufRead, Write};

/// Default length of the window over which request times are spread: one hour.
pub const DEFAULT_WINDOW_SECS: u64 = 3600;

/// Everything needed to set up one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub drivers: usize,
    pub requests: usize,
    /// Clock time at which the simulation starts; requests arrive no earlier.
    pub start_time: u64,
    /// Requests are issued uniformly over `start_time..start_time + window_secs`.
    pub window_secs: u64,
    /// Seed for the request generator. A fresh one is drawn when absent.
    pub seed: Option<u64>,
    pub jitter: PriorityJitter,
}

impl RunConfig {
    pub fn new(drivers: usize, requests: usize) -> Self {
        Self {
            drivers,
            requests,
            start_time: 0,
            window_secs: DEFAULT_WINDOW_SECS,
            seed: None,
            jitter: PriorityJitter::None,
        }
    }

    /// Latest clock time any ride could end: every request issued at the close of the window and served back to back
    /// by one driver, each riding the longest distance. `None` when that time does not fit in a `u64`.
    pub fn latest_drop_off(&self) -> Option<u64> {
        let longest_ride = (MAX_DISTANCE_MILES / SPEED_MILES_PER_HOUR * 3600.0).ceil() as u64;
        let back_to_back = longest_ride.checked_mul(u64::try_from(self.requests).ok()?)?;
        self.start_time.checked_add(self.window_secs)?.checked_add(back_to_back)
    }

    /// Reject configurations the engine cannot run.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] for zero drivers, zero requests, a zero-length window, or a run that could
    /// carry the clock past [`u64::MAX`].
    pub fn validate(&self) -> crate::Result {
        if self.drivers == 0 {
            return Err(Error::InvalidConfiguration("at least one driver is required".into()));
        }
        if self.requests == 0 {
            return Err(Error::InvalidConfiguration("at least one ride request is required".into()));
        }
        if self.window_secs == 0 {
            return Err(Error::InvalidConfiguration("request window must be at least one second".into()));
        }
        if self.start_time.checked_add(self.window_secs).is_none() {
            return Err(Error::InvalidConfiguration(format!(
                "request window of {} seconds starting at {} ends past the end of the clock",
                self.window_secs, self.start_time
            )));
        }
        if self.latest_drop_off().is_none() {
            return Err(Error::InvalidConfiguration(format!(
                "{} rides starting as late as {} could end past the end of the clock",
                self.requests,
                self.start_time + self.window_secs
            )));
        }
        Ok(())
    }
}

/// Why a line typed at the prompt was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountsRejection {
    WrongArity,
    NotPositive,
    NotInteger,
}

impl CountsRejection {
    /// Hint shown before asking again.
    pub fn hint(self) -> &'static str {
        match self {
            CountsRejection::WrongArity => "Usage: dispatchsim <number_of_drivers> <number_of_rides>",
            CountsRejection::NotPositive => "Please provide positive numbers!",
            CountsRejection::NotInteger => "Please provide valid integer format. Null, words etc are not accepted!",
        }
    }
}

/// Parse a `"<drivers> <requests>"` line into two positive counts.
pub fn parse_counts(line: &str) -> Result<(usize, usize), CountsRejection> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [drivers, requests] = fields.as_slice() else {
        return Err(CountsRejection::WrongArity);
    };

    let drivers: i64 = drivers.parse().map_err(|_| CountsRejection::NotInteger)?;
    let requests: i64 = requests.parse().map_err(|_| CountsRejection::NotInteger)?;
    if drivers <= 0 || requests <= 0 {
        return Err(CountsRejection::NotPositive);
    }

    let drivers = usize::try_from(drivers).map_err(|_| CountsRejection::NotInteger)?;
    let requests = usize::try_from(requests).map_err(|_| CountsRejection::NotInteger)?;
    Ok((drivers, requests))
}

/// Ask on `output` for a driver count and a request count until `input` yields a valid line.
///
/// # Errors
///
/// [`Error::InvalidConfiguration`] if `input` runs out, or reading or writing fails, before a valid line arrives.
pub fn prompt_counts(mut input: impl BufRead, mut output: impl Write) -> crate::Result<(usize, usize)> {
    let io_error = |e: std::io::Error| Error::InvalidConfiguration(format!("reading counts: {}", e));
    let mut line = String::new();

    loop {
        writeln!(output, "Please input driver numbers and ride request numbers: ").map_err(io_error)?;
        output.flush().map_err(io_error)?;

        line.clear();
        if input.read_line(&mut line).map_err(io_error)? == 0 {
            return Err(Error::InvalidConfiguration(
                "input ended before driver and request counts were given".into(),
            ));
        }

        match parse_counts(&line) {
            Ok(counts) => return Ok(counts),
            Err(rejection) => {
                log::debug!("rejected counts line {:?}: {:?}", line.trim_end(), rejection);
                writeln!(output, "{}", rejection.hint()).map_err(io_error)?;
            }
        }
    }
}
