//! Statistics computed once a run is over, from the finished requests.

use crate::{Error, Request};

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Minimum number of tracks needed to hold every `(start, end)` interval without two overlapping intervals sharing a
/// track.
///
/// Intervals are taken in order of start. Each one tries the track that frees up earliest: if that track's last
/// interval ends no later than the new one starts, the track is reused, otherwise a new track is opened. An interval
/// ending exactly when another starts does not overlap it. Greedy reuse of the earliest-finishing track is exact here,
/// the count matching the largest number of intervals alive at any single moment.
pub fn min_tracks<Time>(intervals: impl IntoIterator<Item = (Time, Time)>) -> usize
where
    Time: Ord + Copy,
{
    let mut intervals: Vec<_> = intervals.into_iter().collect();
    intervals.sort_by_key(|&(start, _)| start);

    // end time of the last interval on each open track, earliest on top
    let mut track_ends: BinaryHeap<Reverse<Time>> = BinaryHeap::with_capacity(intervals.len());
    for (start, end) in intervals {
        match track_ends.peek() {
            Some(&Reverse(free_at)) if free_at <= start => {
                track_ends.pop();
            }
            _ => {}
        }
        track_ends.push(Reverse(end));
    }
    track_ends.len()
}

/// Fewest drivers that could have served every request in `history` without anyone waiting.
///
/// Each request occupies a driver from its request time to its estimated arrival.
pub fn optimal_driver_count(history: &[Request]) -> usize {
    min_tracks(
        history
            .iter()
            .map(|request| (request.request_time(), request.estimated_arrival_time())),
    )
}

/// Mean waiting and riding time over a set of finished requests, truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Averages {
    pub waiting_seconds: i64,
    pub riding_seconds: i64,
}

/// Average waiting and riding seconds over `history`.
///
/// Each request's riding time is truncated to whole seconds before summing, and both sums are divided with integer
/// division.
///
/// # Errors
///
/// [`Error::EmptyHistory`] when `history` is empty, [`Error::NotDispatched`] when a request never received a driver.
pub fn average_wait_and_ride(history: &[Request]) -> crate::Result<Averages> {
    if history.is_empty() {
        return Err(Error::EmptyHistory);
    }

    let mut total_waiting = 0i64;
    let mut total_riding = 0i64;
    for request in history {
        total_waiting += request.waiting_seconds().ok_or(Error::NotDispatched(request.id()))?;
        total_riding += request.riding_duration() as i64;
    }

    let count = history.len() as i64;
    Ok(Averages {
        waiting_seconds: total_waiting / count,
        riding_seconds: total_riding / count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DriverId, RequestId, RideType};

    const HOUR: u64 = 3600;

    /// Two 120-mile express rides requested at 06:00 and 07:00, dropped off at 08:00 and 10:00.
    fn history() -> Vec<Request> {
        let mut first = Request::new(RequestId(0), "Jane", "1", "1", 120.0, 6 * HOUR, RideType::Express);
        first.dispatch(DriverId(0), 8 * HOUR).unwrap();
        let mut second = Request::new(RequestId(1), "Jane", "1", "1", 120.0, 7 * HOUR, RideType::Express);
        second.dispatch(DriverId(1), 10 * HOUR).unwrap();
        vec![first, second]
    }

    #[test]
    fn no_intervals_need_no_tracks() {
        assert_eq!(0, min_tracks(Vec::<(u64, u64)>::new()));
    }

    #[test]
    fn single_interval_needs_one_track() {
        assert_eq!(1, min_tracks([(3u64, 9u64)]));
    }

    #[test]
    fn freed_track_is_reused() {
        assert_eq!(2, min_tracks([(0u64, 10u64), (5, 15), (20, 30)]));
        assert_eq!(2, min_tracks([(20u64, 30u64), (5, 15), (0, 10)]), "input order should not matter");
    }

    #[test]
    fn touching_intervals_share_a_track() {
        assert_eq!(1, min_tracks([(0u64, 10u64), (10, 20), (20, 30)]));
    }

    #[test]
    fn nested_overlaps_count_peak_concurrency() {
        let intervals = [(0i64, 100i64), (10, 20), (15, 30), (25, 40), (50, 60)];
        // 0..100 overlaps everything; 10..20 and 15..30 overlap; 25..40 reuses 10..20's track
        assert_eq!(3, min_tracks(intervals));
    }

    #[test]
    fn optimal_drivers_follow_estimated_intervals() {
        assert_eq!(2, optimal_driver_count(&history()));
        assert_eq!(0, optimal_driver_count(&[]));
    }

    #[test]
    fn averages_truncate_to_whole_seconds() {
        assert_eq!(
            Ok(Averages {
                waiting_seconds: 1800,
                riding_seconds: 7200,
            }),
            average_wait_and_ride(&history())
        );
    }

    #[test]
    fn averages_need_data() {
        assert_eq!(Err(Error::EmptyHistory), average_wait_and_ride(&[]));

        let undispatched = Request::new(RequestId(5), "Joe", "a", "b", 1.0, 0, RideType::Standard);
        assert_eq!(Err(Error::NotDispatched(RequestId(5))), average_wait_and_ride(&[undispatched]));
    }
}
