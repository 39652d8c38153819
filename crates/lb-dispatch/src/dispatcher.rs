//! The `Dispatcher` struct and its tick loop.

use std::thread;

use lb_core::{DoorStatus, ElevatorId, FloorId, PollConfig, Tick};
use lb_service::ElevatorService;
use log::{debug, error, info, trace};

use crate::{
    DispatchError, DispatchObserver, DispatchResult, Elevator, RequestTracker, StopHandle,
};

// ── Per-tick inputs ───────────────────────────────────────────────────────────

/// The dispatch inputs of one car, read once per tick so every decision in
/// the tick sees the same picture.
#[derive(Debug, Clone, Copy)]
struct CarSnapshot {
    floor:  FloorId,
    door:   DoorStatus,
    /// Remote target; updated locally when this tick issues a command.
    target: FloorId,
}

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Remote clock value read at the start of the tick.
    pub clock:          Tick,
    /// `false` when the clock had not moved and telemetry refresh was skipped.
    pub clock_advanced: bool,
    /// Hall calls handed to idle cars, in assignment order.
    pub assignments:    Vec<(ElevatorId, FloorId)>,
    /// Route heads completed this tick.
    pub arrivals:       Vec<(ElevatorId, FloorId)>,
    /// `set_target` commands sent to the remote service.
    pub commands:       usize,
    /// Hall-call queue length at the end of the tick.
    pub hall_calls:     usize,
    /// Assigned-target queue length at the end of the tick.
    pub assigned:       usize,
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// The dispatch loop.
///
/// `Dispatcher<S>` owns the remote service client, the per-car routes and the
/// two request queues.  Nothing else writes them: presentation code reads the
/// state through the accessors below and may only flip a car's automatic flag.
///
/// Create via [`DispatcherBuilder`][crate::DispatcherBuilder].
pub struct Dispatcher<S: ElevatorService> {
    pub(crate) service:     S,
    pub(crate) floor_count: usize,
    pub(crate) elevators:   Vec<Elevator>,
    pub(crate) tracker:     RequestTracker,
    /// Clock value seen by the previous tick; `None` before the first tick.
    pub(crate) last_clock:  Option<Tick>,
    pub(crate) polls:       u64,
}

impl<S: ElevatorService> Dispatcher<S> {
    // ── Read accessors ────────────────────────────────────────────────────

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn elevator(&self, id: ElevatorId) -> Option<&Elevator> {
        self.elevators.get(id.index())
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    /// Clock value of the most recent tick.
    pub fn last_clock(&self) -> Option<Tick> {
        self.last_clock
    }

    /// Ticks completed since construction.
    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn into_service(self) -> S {
        self.service
    }

    /// Switch a car between automatic and manual operation.  Manual cars are
    /// skipped by the dispatch loop; their route is left as it is.
    pub fn set_automatic(&mut self, id: ElevatorId, automatic: bool) -> DispatchResult<()> {
        let id = id.checked(self.elevators.len())?;
        self.elevators[id.index()].set_automatic(automatic);
        info!("{id} switched to {} mode", if automatic { "automatic" } else { "manual" });
        Ok(())
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Poll the remote service every `config.poll_interval_ms` until `stop`
    /// is raised, `config.max_polls` ticks have run, or a tick fails.
    ///
    /// A failed tick is terminal: `observer.on_failure` is called, the error
    /// is logged and returned, and no further command reaches the service.
    pub fn run<O: DispatchObserver>(
        &mut self,
        config:   &PollConfig,
        observer: &mut O,
        stop:     &StopHandle,
    ) -> DispatchResult<()> {
        config.validate()?;
        info!(
            "dispatcher started: {} elevators, {} floors, polling every {} ms",
            self.elevators.len(),
            self.floor_count,
            config.poll_interval_ms,
        );

        let mut ran: u64 = 0;
        loop {
            if stop.is_stopped() {
                info!("dispatcher stop requested after {ran} ticks");
                break;
            }
            if config.max_polls.is_some_and(|max| ran >= max) {
                break;
            }
            if ran > 0 && config.poll_interval_ms > 0 {
                thread::sleep(config.interval());
            }

            if let Err(e) = self.observed_tick(config, observer) {
                error!("dispatcher stopped: {e}");
                observer.on_failure(&e);
                return Err(e);
            }
            ran += 1;
        }

        observer.on_run_end(ran);
        Ok(())
    }

    /// Run one tick and report it to `observer`.
    fn observed_tick<O: DispatchObserver>(
        &mut self,
        config:   &PollConfig,
        observer: &mut O,
    ) -> DispatchResult<()> {
        let poll = self.polls;
        observer.on_tick_start(poll);
        let report = self.tick()?;

        for &(elevator, floor) in &report.assignments {
            observer.on_assignment(elevator, floor);
        }
        for &(elevator, floor) in &report.arrivals {
            observer.on_arrival(elevator, floor);
        }
        observer.on_tick_end(poll, &report);
        if config.is_snapshot_poll(poll) {
            observer.on_snapshot(poll, &report, &self.elevators, &self.tracker);
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Run exactly one dispatch tick.
    pub fn tick(&mut self) -> DispatchResult<TickReport> {
        // ── Phase 1: clock and telemetry ──────────────────────────────────
        let clock = self.service.clock_tick()?;
        let clock_advanced = self.last_clock != Some(clock);
        if clock_advanced {
            self.refresh_telemetry()?;
        }
        self.last_clock = Some(clock);

        let mut report = TickReport { clock, clock_advanced, ..TickReport::default() };

        // ── Phase 2: per-car snapshot ─────────────────────────────────────
        let mut snapshots = self.read_snapshots()?;

        // ── Phase 3: scan buttons ─────────────────────────────────────────
        self.scan_requests(&snapshots)?;

        // ── Phase 4: assign, realign, resolve arrivals ────────────────────
        //
        // Sequential in ascending ElevatorId: an idle car with a lower id
        // always gets the first unassigned hall call.
        for (idx, snapshot) in snapshots.iter_mut().enumerate() {
            if self.elevators[idx].is_automatic() {
                self.dispatch_car(idx, snapshot, &mut report)?;
            }
        }

        report.hall_calls = self.tracker.hall_calls().len();
        report.assigned   = self.tracker.assigned().len();
        self.polls += 1;
        trace!(
            "{clock}: {} hall calls, {} assigned, {} commands",
            report.hall_calls,
            report.assigned,
            report.commands,
        );
        Ok(report)
    }

    /// Reload every car's cached telemetry.
    pub(crate) fn refresh_telemetry(&mut self) -> DispatchResult<()> {
        for idx in 0..self.elevators.len() {
            let id = self.elevators[idx].id();
            let telemetry = self.service.telemetry(id)?;
            self.check_floor(id, telemetry.floor)?;
            self.check_floor(id, telemetry.target)?;
            self.elevators[idx].set_telemetry(telemetry);
        }
        Ok(())
    }

    fn read_snapshots(&self) -> DispatchResult<Vec<CarSnapshot>> {
        self.elevators
            .iter()
            .map(|car| -> DispatchResult<CarSnapshot> {
                let id = car.id();
                Ok(CarSnapshot {
                    floor:  self.check_floor(id, self.service.elevator_floor(id)?)?,
                    door:   self.service.door_status(id)?,
                    target: self.check_floor(id, self.service.target(id)?)?,
                })
            })
            .collect()
    }

    /// Record lit landing buttons and apply lit cab buttons to automatic cars.
    fn scan_requests(&mut self, snapshots: &[CarSnapshot]) -> DispatchResult<()> {
        for floor in FloorId::all(self.floor_count) {
            if self.service.hall_call_pressed(floor)? && self.tracker.record_hall_call(floor) {
                debug!("hall call recorded at {floor}");
            }

            for (idx, snapshot) in snapshots.iter().enumerate() {
                let id = self.elevators[idx].id();
                if self.elevators[idx].is_automatic() && self.service.elevator_button(id, floor)? {
                    self.insert_into_route(idx, floor, snapshot.floor);
                }
            }
        }
        Ok(())
    }

    /// Apply the insertion policy to car `idx` and claim `floor`.
    ///
    /// No-op when `floor` is already assigned to any car, which also covers
    /// repeated observations of the same lit button.
    fn insert_into_route(&mut self, idx: usize, floor: FloorId, current: FloorId) -> bool {
        if self.tracker.is_assigned(floor) {
            return false;
        }
        let car = &mut self.elevators[idx];
        match car.insert_target(floor, current) {
            Some(at) => {
                self.tracker.claim(floor);
                debug!("{} cab call {floor} placed at {at:?} of route {:?}", car.id(), car.route());
                true
            }
            None => false,
        }
    }

    /// Handle a cab call for `elevator` outside the regular scan, reading the
    /// car's current floor from the remote service.
    pub fn record_cab_call(&mut self, elevator: ElevatorId, floor: FloorId) -> DispatchResult<bool> {
        let id = elevator.checked(self.elevators.len())?;
        let floor = floor.checked(self.floor_count)?;
        let current = self.check_floor(id, self.service.elevator_floor(id)?)?;
        Ok(self.insert_into_route(id.index(), floor, current))
    }

    /// One car's share of phase 4.
    fn dispatch_car(
        &mut self,
        idx:      usize,
        snapshot: &mut CarSnapshot,
        report:   &mut TickReport,
    ) -> DispatchResult<()> {
        let id = self.elevators[idx].id();

        match self.elevators[idx].next_target() {
            // IDLE: take the first hall call no other car holds.
            None => {
                let Some(floor) = self.tracker.first_unassigned_hall_call() else {
                    self.reconcile_idle(id, snapshot);
                    return Ok(());
                };
                self.command(id, floor, snapshot, report)?;
                self.elevators[idx].insert_target(floor, snapshot.floor);
                self.tracker.claim(floor);
                report.assignments.push((id, floor));
                debug!("{id} assigned hall call {floor}");
            }
            // EN_ROUTE: the remote target must follow the route head.
            Some(head) => {
                if snapshot.target != head {
                    debug!("{id} remote target {} realigned to route head {head}", snapshot.target);
                    self.command(id, head, snapshot, report)?;
                }
            }
        }

        // ARRIVED: at the head with the door open.
        if let Some(head) = self.elevators[idx].next_target() {
            if snapshot.floor == head && snapshot.door.is_open() {
                self.complete_head(idx, report);
            }
        }
        Ok(())
    }

    fn command(
        &mut self,
        id:       ElevatorId,
        floor:    FloorId,
        snapshot: &mut CarSnapshot,
        report:   &mut TickReport,
    ) -> DispatchResult<()> {
        self.service.set_target(id, floor)?;
        snapshot.target = floor;
        report.commands += 1;
        Ok(())
    }

    /// Pop the served head and release its entries from both queues.  The
    /// next head, if any, is sent to the remote service on the next tick.
    fn complete_head(&mut self, idx: usize, report: &mut TickReport) {
        let car = &mut self.elevators[idx];
        let Some(floor) = car.pop_target() else {
            return;
        };
        let id = car.id();
        let was_hall_call = self.tracker.release_hall_call(floor);
        self.tracker.release_assigned(floor);
        report.arrivals.push((id, floor));
        info!(
            "{id} served {floor}{}; next {:?}",
            if was_hall_call { " (hall call)" } else { "" },
            car.next_target(),
        );
    }

    /// An idle car parked at its remote target with the door open frees that
    /// floor if it is still marked assigned but no route holds it any more.
    fn reconcile_idle(&mut self, id: ElevatorId, snapshot: &CarSnapshot) {
        let floor = snapshot.target;
        if snapshot.floor != floor || !snapshot.door.is_open() || !self.tracker.is_assigned(floor) {
            return;
        }
        if self.elevators.iter().any(|car| car.has_in_route(floor)) {
            return;
        }
        self.tracker.release_assigned(floor);
        self.tracker.release_hall_call(floor);
        debug!("{id} released stale assignment of {floor}");
    }

    fn check_floor(&self, elevator: ElevatorId, floor: FloorId) -> DispatchResult<FloorId> {
        floor.checked(self.floor_count).map_err(|_| DispatchError::InvalidTelemetry {
            elevator,
            floor,
            floor_count: self.floor_count,
        })
    }
}
