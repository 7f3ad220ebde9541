#[cfg(feature = "ordered-float")]
mod ordered_float_tests {
    use dispatchsim::*;
    use ordered_float::NotNan;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Exp, Uniform};
    use rand_pcg::Pcg64;
    use std::collections::VecDeque;

    /// Clock in fractional hours.
    type Hours = NotNan<f64>;

    fn hours(value: f64) -> Hours {
        NotNan::new(value).expect("time should not be NaN")
    }

    #[derive(Debug)]
    enum RankEvent {
        RiderArrives,
        RideEnds,
        /// Stop taking riders and charge the wait of everyone still in line
        ShiftEnds,
    }

    /// A taxi rank: riders show up at random, take the first free driver, and otherwise queue in arrival order.
    struct TaxiRank {
        drivers: usize,
        drivers_out: usize,
        arrivals: Exp<f64>,
        distance: Uniform<f64>,
        waiting: VecDeque<Hours>,
        rides_completed: usize,
        total_wait: Hours,
        shift_over: bool,
        rng: Pcg64,
    }

    impl TaxiRank {
        fn new(drivers: usize, riders_per_hour: f64, rng: Pcg64) -> Self {
            Self {
                drivers,
                drivers_out: 0,
                arrivals: Exp::new(riders_per_hour).unwrap(),
                distance: Uniform::new(MIN_DISTANCE_MILES, MAX_DISTANCE_MILES).unwrap(),
                waiting: VecDeque::new(),
                rides_completed: 0,
                total_wait: hours(0.0),
                shift_over: false,
                rng,
            }
        }

        fn next_arrival_in(&mut self) -> f64 {
            self.arrivals.sample(&mut self.rng)
        }

        fn start_ride(&mut self, arrived_at: Hours, events: &mut EventQueue<RankEvent, Hours>) -> Result {
            let now = *events.current_time();
            self.total_wait += now - arrived_at;

            let ride_hours = self.distance.sample(&mut self.rng) / SPEED_MILES_PER_HOUR;
            events.schedule(RankEvent::RideEnds, now + ride_hours)
        }
    }

    impl SimState<Hours> for TaxiRank {
        type Event = RankEvent;

        fn execute(&mut self, event: RankEvent, events: &mut EventQueue<RankEvent, Hours>) -> Result {
            let now = *events.current_time();
            match event {
                RankEvent::RiderArrives => {
                    if self.drivers_out < self.drivers {
                        self.drivers_out += 1;
                        self.start_ride(now, events)?;
                    } else {
                        self.waiting.push_back(now);
                    }
                    let delay = self.next_arrival_in();
                    events.schedule(RankEvent::RiderArrives, now + delay)
                }
                RankEvent::RideEnds => {
                    self.rides_completed += 1;
                    match self.waiting.pop_front() {
                        Some(arrived_at) => self.start_ride(arrived_at, events),
                        None => {
                            self.drivers_out -= 1;
                            Ok(())
                        }
                    }
                }
                RankEvent::ShiftEnds => {
                    self.shift_over = true;
                    for arrived_at in &self.waiting {
                        self.total_wait += now - *arrived_at;
                    }
                    Ok(())
                }
            }
        }

        fn is_complete(&self, _: &Hours) -> bool {
            self.shift_over
        }
    }

    /// Run an eight-hour shift, returning rides completed and total hours riders spent waiting.
    fn run_shift(seed: u64, drivers: usize, riders_per_hour: f64) -> (usize, Hours) {
        let rank = TaxiRank::new(drivers, riders_per_hour, Pcg64::seed_from_u64(seed));
        let shift_end = hours(8.0);

        let mut sim = Simulation::new(rank, hours(0.0));
        sim.schedule(RankEvent::ShiftEnds, shift_end).expect("shift end should not be in the past");
        let first_arrival = sim.state_mut().next_arrival_in();
        sim.schedule(RankEvent::RiderArrives, hours(first_arrival))
            .expect("arrival delay should always be positive");

        sim.run().expect("shift should complete normally");
        assert_eq!(shift_end, *sim.event_queue().current_time(), "run should stop at shift end");

        (sim.state().rides_completed, sim.state().total_wait)
    }

    #[test]
    fn fractional_hour_clock_runs_a_shift() {
        let (rides, total_wait) = run_shift(11434450237083315284, 3, 4.0);
        assert!(rides > 0, "some rides should finish during the shift");
        assert!(total_wait >= hours(0.0), "waiting cannot be negative");

        assert_eq!((rides, total_wait), run_shift(11434450237083315284, 3, 4.0), "same seed should replay the shift");
    }

    #[test]
    fn bigger_fleet_shortens_the_wait() {
        // rides average 35 minutes, so 6 riders an hour keep one driver permanently behind
        let (_, one_driver) = run_shift(42, 1, 6.0);
        let (_, six_drivers) = run_shift(42, 6, 6.0);
        assert!(six_drivers < one_driver, "six drivers should clear the line faster than one");
    }

    #[test]
    fn simultaneous_float_times_keep_insertion_order() {
        let mut queue = EventQueue::new(hours(0.0));
        queue.schedule("first", hours(0.25)).unwrap();
        queue.schedule("earlier", hours(0.125)).unwrap();
        queue.schedule("second", hours(0.25)).unwrap();

        let order: Vec<_> = std::iter::from_fn(|| queue.next()).map(|scheduled| scheduled.event).collect();
        assert_eq!(vec!["earlier", "first", "second"], order);
        assert_eq!(hours(0.25), *queue.current_time());
        assert_eq!(Err(Error::BackInTime), queue.schedule("late", hours(0.2)));
    }
}
