use crate::analysis::{average_wait_and_ride, optimal_driver_count, Averages};
use crate::Request;

use std::fmt::{Display, Formatter};

/// Summary of a finished run, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub drivers: usize,
    pub averages: Averages,
    /// Finished rides divided evenly across the fleet, truncated.
    pub rides_per_driver: usize,
    pub optimal_drivers: usize,
    /// Finished requests in completion order. Left empty to print the summary alone.
    pub history: Vec<Request>,
}

impl Report {
    /// Analyze a run's finished requests.
    ///
    /// # Errors
    ///
    /// Anything [`average_wait_and_ride`] reports, such as an empty history.
    pub fn from_history(history: Vec<Request>, drivers: usize) -> crate::Result<Self> {
        let averages = average_wait_and_ride(&history)?;
        Ok(Self {
            drivers,
            averages,
            rides_per_driver: history.len().checked_div(drivers).unwrap_or(0),
            optimal_drivers: optimal_driver_count(&history),
            history,
        })
    }

    /// Drop the per-request listing from the rendered report.
    pub fn without_history(mut self) -> Self {
        self.history.clear();
        self
    }
}

/// Render whole seconds as `H hours M minutes S seconds`.
pub fn format_duration(seconds: i64) -> String {
    format!(
        "{} hours {} minutes {} seconds",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Render a clock time as `HH:MM:SS` past the start of day zero, prefixed with the day when past the first one.
pub fn format_clock(seconds: u64) -> String {
    let days = seconds / 86_400;
    let within_day = seconds % 86_400;
    let clock = format!(
        "{:02}:{:02}:{:02}",
        within_day / 3600,
        (within_day % 3600) / 60,
        within_day % 60
    );
    if days == 0 {
        clock
    } else {
        format!("day {} {}", days, clock)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "=========================== Simulation Analysis Report ==========================="
        )?;
        writeln!(f)?;
        writeln!(f, "Average waiting time: {}", format_duration(self.averages.waiting_seconds))?;
        writeln!(f, "Average riding time: {}", format_duration(self.averages.riding_seconds))?;
        writeln!(f, "Average number of handled rides for a driver: {}", self.rides_per_driver)?;
        writeln!(
            f,
            "To balance the business operating costs with the customer convenience, the optimal number of drivers is {}",
            self.optimal_drivers
        )?;

        if !self.history.is_empty() {
            writeln!(f)?;
            writeln!(f, "Finished requests:")?;
            for request in &self.history {
                let actual = request
                    .actual_arrival_time()
                    .map_or_else(|| "-".to_string(), format_clock);
                writeln!(
                    f,
                    "Request: {} EstimatedArrival: {} ActualArrival: {} Distance (miles): {:.2} RidingMinutes: {:.2} Waiting: {}",
                    format_clock(request.request_time()),
                    format_clock(request.estimated_arrival_time()),
                    actual,
                    request.distance_miles(),
                    request.riding_seconds() / 60.0,
                    format_duration(request.waiting_seconds().unwrap_or(0))
                )?;
            }
        }

        writeln!(f)?;
        write!(
            f,
            "================================= End Of Report ==================================="
        )
    }
}
