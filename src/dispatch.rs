//! The dispatch engine: which driver takes which request, and when.
//!
//! A [`Dispatcher`] owns every driver and every request for the length of a run. Requests move through four
//! containers, never living in more than one at a time:
//!
//! 1. *incoming* - issued, with an arrival event scheduled at the request time;
//! 2. *pending* - arrived while every driver was busy, waiting in priority order;
//! 3. *active* - out on a ride, ordered by drop-off time;
//! 4. *finished* - dropped off, in completion order.
//!
//! Drivers likewise sit either in the idle pool or with exactly one active request.

use crate::ordering::waiting_order;
use crate::{Driver, DriverId, Error, EventQueue, Request, RequestId, SimState, Simulation};

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, VecDeque};

/// What can happen to a request while the simulation runs.
///
/// The execution time of an event lives alongside it in the [`EventQueue`], so the payload only names the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchEvent {
    /// The customer asks for a ride.
    RequestArrived { request: RequestId },
    /// The customer has been dropped off and the driver is free again.
    RideFinished { request: RequestId },
}

impl DispatchEvent {
    pub fn request(&self) -> RequestId {
        match self {
            DispatchEvent::RequestArrived { request } | DispatchEvent::RideFinished { request } => *request,
        }
    }
}

/// A [`Simulation`] driven by a [`Dispatcher`] on a clock of whole seconds.
pub type DispatchSimulation = Simulation<Dispatcher, u64>;

/// Build a simulation holding `drivers`, with one arrival scheduled per request at its request time.
///
/// # Errors
///
/// [`Error::BackInTime`] if a request was issued before `start_time`, [`Error::InvalidConfiguration`] if two requests
/// share an id.
pub fn build_simulation(
    drivers: Vec<Driver>,
    requests: impl IntoIterator<Item = Request>,
    start_time: u64,
) -> crate::Result<DispatchSimulation> {
    let mut sim = Simulation::new(Dispatcher::new(drivers), start_time);
    for request in requests {
        sim.schedule(
            DispatchEvent::RequestArrived { request: request.id() },
            request.request_time(),
        )?;
        sim.state_mut().admit(request)?;
    }

    log::info!(
        "seeded {} requests for {} drivers starting at {}",
        sim.state().requests_issued(),
        sim.state().total_drivers(),
        start_time
    );
    Ok(sim)
}

/// Wraps a request so the max-heap pops the one [`waiting_order`] serves first.
#[derive(Debug)]
struct Waiting(Request);

impl PartialEq for Waiting {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Waiting {}

impl PartialOrd for Waiting {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Waiting {
    fn cmp(&self, other: &Self) -> Ordering {
        waiting_order(&other.0, &self.0)
    }
}

/// Position of a ride in the active queue. Field order gives drop-off time first, request id second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ActiveKey {
    arrival: u64,
    request: RequestId,
}

/// Simulation state for ride dispatch.
///
/// Handles [`DispatchEvent`]s through its [`SimState`] implementation:
///
/// * **RequestArrived** hands the request to the first idle driver, with drop-off at request time plus riding time,
///   and schedules the matching [`RideFinished`]. With no idle driver the request joins the pending queue instead.
/// * **RideFinished** moves the ride to the finished list and frees its driver. If anyone is waiting, the
///   highest-priority pending request gets that driver straight away, its drop-off being the finished ride's drop-off
///   plus its own riding time. Otherwise the driver goes back to the idle pool.
///
/// After every event the dispatcher checks that no driver or request has gone missing, and stops the run with
/// [`Error::ConservationViolated`] if one has.
///
/// [`RideFinished`]: DispatchEvent::RideFinished
#[derive(Debug)]
pub struct Dispatcher {
    total_drivers: usize,
    idle: VecDeque<Driver>,
    busy: HashMap<DriverId, Driver>,
    incoming: HashMap<RequestId, Request>,
    pending: BinaryHeap<Waiting>,
    active: BTreeMap<ActiveKey, Request>,
    finished: Vec<Request>,
    requests_issued: usize,
}

impl Dispatcher {
    /// Create a dispatcher with every driver idle and no requests.
    pub fn new(drivers: Vec<Driver>) -> Self {
        Self {
            total_drivers: drivers.len(),
            idle: drivers.into(),
            busy: HashMap::new(),
            incoming: HashMap::new(),
            pending: BinaryHeap::new(),
            active: BTreeMap::new(),
            finished: Vec::new(),
            requests_issued: 0,
        }
    }

    /// Take ownership of a request whose arrival event has been scheduled.
    fn admit(&mut self, request: Request) -> crate::Result {
        let id = request.id();
        if self.incoming.contains_key(&id) {
            return Err(Error::InvalidConfiguration(format!("request {} was issued twice", id)));
        }

        self.incoming.insert(id, request);
        self.requests_issued += 1;
        Ok(())
    }

    fn handle_request_arrived(
        &mut self,
        id: RequestId,
        event_queue: &mut EventQueue<DispatchEvent, u64>,
    ) -> crate::Result {
        let request = self.incoming.remove(&id).ok_or(Error::UnknownRequest(id))?;
        let now = *event_queue.current_time();

        match self.idle.pop_front() {
            Some(driver) => {
                let arrival = request
                    .request_time()
                    .checked_add(request.riding_duration())
                    .ok_or(Error::ClockOverflow(id))?;
                log::debug!("[{}] request {} taken by {}, drop-off at {}", now, id, driver, arrival);
                self.start_ride(request, driver, arrival, event_queue)
            }
            None => {
                log::debug!("[{}] request {} waiting, {} ahead of it in line", now, id, self.pending.len());
                self.pending.push(Waiting(request));
                Ok(())
            }
        }
    }

    fn handle_ride_finished(
        &mut self,
        id: RequestId,
        event_queue: &mut EventQueue<DispatchEvent, u64>,
    ) -> crate::Result {
        let now = *event_queue.current_time();
        let request = self
            .active
            .remove(&ActiveKey { arrival: now, request: id })
            .ok_or(Error::NotActive(id))?;
        let driver_id = request.assigned_driver().ok_or(Error::NotDispatched(id))?;
        let driver = self.busy.remove(&driver_id).ok_or(Error::UnknownDriver(driver_id))?;
        let dropped_off_at = request.actual_arrival_time().ok_or(Error::NotDispatched(id))?;

        log::debug!("[{}] request {} dropped off by {}", now, id, driver);
        self.finished.push(request);

        match self.pending.pop() {
            Some(Waiting(next)) => {
                let arrival = dropped_off_at
                    .checked_add(next.riding_duration())
                    .ok_or(Error::ClockOverflow(next.id()))?;
                log::debug!(
                    "[{}] request {} promoted from the waiting queue to {}, drop-off at {}",
                    now,
                    next.id(),
                    driver,
                    arrival
                );
                self.start_ride(next, driver, arrival, event_queue)
            }
            None => {
                self.idle.push_back(driver);
                Ok(())
            }
        }
    }

    /// Assign `driver` to `request`, move the request into the active queue, and schedule its drop-off.
    fn start_ride(
        &mut self,
        mut request: Request,
        driver: Driver,
        arrival: u64,
        event_queue: &mut EventQueue<DispatchEvent, u64>,
    ) -> crate::Result {
        let id = request.id();
        request.dispatch(driver.id(), arrival)?;
        event_queue.schedule(DispatchEvent::RideFinished { request: id }, arrival)?;

        self.busy.insert(driver.id(), driver);
        self.active.insert(ActiveKey { arrival, request: id }, request);
        Ok(())
    }

    /// Verify that every driver and every issued request is held exactly where the counts say it should be.
    ///
    /// # Errors
    ///
    /// [`Error::ConservationViolated`] describing the mismatched counts.
    pub fn check_conservation(&self) -> crate::Result {
        let accounted = self.incoming.len() + self.pending.len() + self.active.len() + self.finished.len();
        let drivers_balanced =
            self.idle.len() + self.active.len() == self.total_drivers && self.busy.len() == self.active.len();

        if drivers_balanced && accounted == self.requests_issued {
            Ok(())
        } else {
            Err(Error::ConservationViolated {
                idle: self.idle.len(),
                active: self.active.len(),
                drivers: self.total_drivers,
                accounted,
                issued: self.requests_issued,
            })
        }
    }

    pub fn total_drivers(&self) -> usize {
        self.total_drivers
    }

    pub fn idle_driver_count(&self) -> usize {
        self.idle.len()
    }

    /// Idle drivers, the next one to be assigned first.
    pub fn idle_drivers(&self) -> impl Iterator<Item = &Driver> {
        self.idle.iter()
    }

    pub fn requests_issued(&self) -> usize {
        self.requests_issued
    }

    /// Requests whose arrival event has not fired yet.
    pub fn incoming_count(&self) -> usize {
        self.incoming.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The pending request that the next freed driver will take.
    pub fn next_pending(&self) -> Option<&Request> {
        self.pending.peek().map(|Waiting(request)| request)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Active requests in drop-off order.
    pub fn active_requests(&self) -> impl Iterator<Item = &Request> {
        self.active.values()
    }

    /// Finished requests in completion order.
    pub fn finished_requests(&self) -> &[Request] {
        &self.finished
    }

    pub fn into_finished_requests(self) -> Vec<Request> {
        self.finished
    }
}

impl SimState<u64> for Dispatcher {
    type Event = DispatchEvent;

    fn execute(&mut self, event: DispatchEvent, event_queue: &mut EventQueue<DispatchEvent, u64>) -> crate::Result {
        match event {
            DispatchEvent::RequestArrived { request } => self.handle_request_arrived(request, event_queue)?,
            DispatchEvent::RideFinished { request } => self.handle_ride_finished(request, event_queue)?,
        }
        self.check_conservation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RideType;

    const SIX_AM: u64 = 6 * 3600;

    fn request(id: usize, distance: f64, request_time: u64, ride_type: RideType) -> Request {
        Request::new(RequestId(id), format!("Customer{}", id), "1", "1", distance, request_time, ride_type)
    }

    #[test]
    fn building_seeds_one_arrival_per_request() {
        let requests = (0..3).map(|i| request(i, 10.0, 10 * i as u64, RideType::Standard));
        let sim = build_simulation(Driver::fleet(1), requests, 0).unwrap();

        assert_eq!(3, sim.event_queue().len());
        assert_eq!(
            Some((&0, &DispatchEvent::RequestArrived { request: RequestId(0) })),
            sim.event_queue().peek()
        );
        assert_eq!(1, sim.state().idle_driver_count());
        assert_eq!(3, sim.state().incoming_count());
    }

    #[test]
    fn building_rejects_requests_before_start_or_repeated() {
        let early = build_simulation(Driver::fleet(1), [request(0, 10.0, 5, RideType::Express)], 10);
        assert_eq!(Some(Error::BackInTime), early.err());

        let twice = build_simulation(
            Driver::fleet(1),
            [request(0, 10.0, 5, RideType::Express), request(0, 10.0, 6, RideType::Express)],
            0,
        );
        assert!(matches!(twice, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn arrival_with_idle_driver_dispatches_immediately() {
        let mut sim = build_simulation(Driver::fleet(1), [request(0, 60.0, SIX_AM, RideType::Express)], 0).unwrap();
        assert_eq!(Ok(true), sim.step());

        let dispatcher = sim.state();
        assert_eq!(0, dispatcher.idle_driver_count());
        assert_eq!(1, dispatcher.active_count());

        let active = dispatcher.active_requests().next().expect("request should be active");
        assert_eq!(SIX_AM + 3600, active.estimated_arrival_time());
        assert_eq!(Some(SIX_AM + 3600), active.actual_arrival_time());
        assert_eq!(Some(DriverId(0)), active.assigned_driver());
        assert_eq!(
            Some((&(SIX_AM + 3600), &DispatchEvent::RideFinished { request: RequestId(0) })),
            sim.event_queue().peek()
        );
    }

    #[test]
    fn arrival_without_idle_driver_waits() {
        let requests = [request(0, 60.0, 0, RideType::Standard), request(1, 60.0, 5, RideType::Express)];
        let mut sim = build_simulation(Driver::fleet(1), requests, 0).unwrap();
        sim.step().unwrap();
        sim.step().unwrap();

        let dispatcher = sim.state();
        assert_eq!(1, dispatcher.pending_count());
        assert_eq!(Some(RequestId(1)), dispatcher.next_pending().map(Request::id));
        assert_eq!(None, dispatcher.next_pending().and_then(Request::actual_arrival_time));
        assert_eq!(1, sim.event_queue().len(), "only the first ride's drop-off should be queued");
    }

    #[test]
    fn freed_driver_takes_highest_priority_waiting_request() {
        let requests = [
            request(0, 60.0, 0, RideType::Standard),
            request(1, 10.0, 1, RideType::EnvironmentallyConscious),
            request(2, 30.0, 2, RideType::Express),
            request(3, 20.0, 3, RideType::Express),
        ];
        let mut sim = build_simulation(Driver::fleet(1), requests, 0).unwrap();
        for _ in 0..5 {
            sim.step().unwrap();
        }

        let dispatcher = sim.state();
        assert_eq!(vec![RequestId(0)], dispatcher.finished_requests().iter().map(Request::id).collect::<Vec<_>>());

        // request 3 is Express with the earlier estimated arrival (3 + 1200 < 2 + 1800)
        let promoted = dispatcher.active_requests().next().expect("a request should have been promoted");
        assert_eq!(RequestId(3), promoted.id());
        assert_eq!(Some(3600 + 1200), promoted.actual_arrival_time());
        assert_eq!(Some(DriverId(0)), promoted.assigned_driver());
        assert_eq!(0, dispatcher.idle_driver_count());
    }

    #[test]
    fn finished_ride_with_nobody_waiting_idles_the_driver() {
        let mut sim = build_simulation(Driver::fleet(2), [request(0, 1.0, 0, RideType::Standard)], 0).unwrap();
        sim.run().unwrap();

        let dispatcher = sim.state();
        assert_eq!(2, dispatcher.idle_driver_count());
        let idle: Vec<_> = dispatcher.idle_drivers().map(Driver::id).collect();
        assert_eq!(vec![DriverId(1), DriverId(0)], idle, "released drivers rejoin at the back of the pool");
        assert_eq!(60, *sim.event_queue().current_time());
    }

    #[test]
    fn finish_for_unknown_ride_is_an_invariant_violation() {
        let mut dispatcher = Dispatcher::new(Driver::fleet(1));
        let mut queue = EventQueue::new(0);

        let result = dispatcher.execute(DispatchEvent::RideFinished { request: RequestId(9) }, &mut queue);
        assert_eq!(Err(Error::NotActive(RequestId(9))), result);
    }

    #[test]
    fn arrival_for_unknown_request_is_an_invariant_violation() {
        let mut dispatcher = Dispatcher::new(Driver::fleet(1));
        let mut queue = EventQueue::new(0);

        let result = dispatcher.execute(DispatchEvent::RequestArrived { request: RequestId(2) }, &mut queue);
        assert_eq!(Err(Error::UnknownRequest(RequestId(2))), result);
    }

    #[test]
    fn finish_out_of_step_with_clock_is_rejected() {
        let mut sim = build_simulation(Driver::fleet(1), [request(0, 1.0, 0, RideType::Standard)], 0).unwrap();
        sim.step().unwrap();

        // the ride ends at 60, so a finish event at 30 does not match it
        sim.schedule(DispatchEvent::RideFinished { request: RequestId(0) }, 30).unwrap();
        assert_eq!(Err(Error::NotActive(RequestId(0))), sim.run());
    }

    #[test]
    fn drop_off_past_end_of_clock_is_rejected() {
        let late = request(0, 1.0, u64::MAX - 10, RideType::Standard);
        let mut sim = build_simulation(Driver::fleet(1), [late], 0).unwrap();

        assert_eq!(Err(Error::ClockOverflow(RequestId(0))), sim.step());
        assert_eq!(0, sim.state().active_count());
    }

    #[test]
    fn lost_request_breaks_conservation() {
        let mut dispatcher = Dispatcher::new(Driver::fleet(2));
        dispatcher.admit(request(0, 1.0, 0, RideType::Standard)).unwrap();
        assert_eq!(Ok(()), dispatcher.check_conservation());

        dispatcher.incoming.clear();
        assert_eq!(
            Err(Error::ConservationViolated {
                idle: 2,
                active: 0,
                drivers: 2,
                accounted: 0,
                issued: 1,
            }),
            dispatcher.check_conservation()
        );
    }

    #[test]
    fn missing_driver_breaks_conservation_after_an_event() {
        let mut dispatcher = Dispatcher::new(Driver::fleet(2));
        dispatcher.admit(request(0, 1.0, 0, RideType::Standard)).unwrap();
        dispatcher.idle.pop_back();

        let mut queue = EventQueue::new(0);
        let result = dispatcher.execute(DispatchEvent::RequestArrived { request: RequestId(0) }, &mut queue);
        assert_eq!(
            Err(Error::ConservationViolated {
                idle: 0,
                active: 1,
                drivers: 2,
                accounted: 1,
                issued: 1,
            }),
            result
        );
    }

    #[test]
    fn event_names_its_request() {
        assert_eq!(RequestId(4), DispatchEvent::RideFinished { request: RequestId(4) }.request());
        assert_eq!(RequestId(5), DispatchEvent::RequestArrived { request: RequestId(5) }.request());
    }
}
