//! `SimulatedBank`: an in-process elevator bank behind the service boundary.
//!
//! # Car model
//!
//! Each call to [`SimulatedBank::step`] advances the clock by one tick and
//! moves every car through a small door/travel state machine:
//!
//! ```text
//!   Open ──target≠floor──▶ Closing ──door_ticks──▶ Closed
//!    ▲                                                │
//!    │                                     target≠floor: travel one floor
//!  Opening ◀──────────── floor==target ◀──── every ticks_per_floor ticks
//! ```
//!
//! While a car's door is open, the landing buttons of its floor and its own
//! cab button for that floor are cleared, as a passenger would by boarding or
//! alighting.
//!
//! The bank is a cheap-to-clone handle over shared state, so one thread can
//! call `step` while the dispatcher polls the same bank from another.

use std::sync::{Arc, Mutex, MutexGuard};

use lb_core::{Direction, DoorStatus, ElevatorId, FloorId, LbError, Tick};
use log::trace;

use crate::{ElevatorService, ServiceError, ServiceResult};

// ── BankConfig ────────────────────────────────────────────────────────────────

/// Geometry and timing of a simulated bank.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BankConfig {
    pub elevator_count:  usize,
    pub floor_count:     usize,
    /// Distance between two landings, in the bank's length unit.
    pub floor_height:    u32,
    /// Ticks a car needs to travel one floor.  At least 1.
    pub ticks_per_floor: u32,
    /// Extra ticks spent in `Opening` / `Closing`.  `0` means one tick each.
    pub door_ticks:      u32,
    /// Maximum payload accepted by [`SimulatedBank::set_payload`].
    pub capacity:        u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            elevator_count:  3,
            floor_count:     10,
            floor_height:    10,
            ticks_per_floor: 2,
            door_ticks:      1,
            capacity:        1_000,
        }
    }
}

impl BankConfig {
    pub fn validate(&self) -> Result<(), LbError> {
        if self.elevator_count == 0 {
            return Err(LbError::Config("bank needs at least one elevator".into()));
        }
        if self.floor_count < 2 {
            return Err(LbError::Config("bank needs at least two floors".into()));
        }
        if self.ticks_per_floor == 0 {
            return Err(LbError::Config("ticks_per_floor must be at least 1".into()));
        }
        if self.floor_height == 0 {
            return Err(LbError::Config("floor_height must be at least 1".into()));
        }
        Ok(())
    }
}

// ── Car ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Car {
    floor:        FloorId,
    target:       FloorId,
    door:         DoorStatus,
    door_timer:   u32,
    /// Direction of the floor leg in progress; `Uncommitted` between legs.
    heading:      Direction,
    leg_progress: u32,
    weight:       u32,
    cab_buttons:  Vec<bool>,
}

impl Car {
    fn parked(floor_count: usize) -> Self {
        Self {
            floor:        FloorId(0),
            target:       FloorId(0),
            door:         DoorStatus::Closed,
            door_timer:   0,
            heading:      Direction::Uncommitted,
            leg_progress: 0,
            weight:       0,
            cab_buttons:  vec![false; floor_count],
        }
    }

    fn advance(&mut self, cfg: &BankConfig) {
        match self.door {
            DoorStatus::Open => {
                if self.target != self.floor {
                    self.begin_door(DoorStatus::Closing, cfg);
                }
            }
            DoorStatus::Opening => self.tick_door(DoorStatus::Open),
            DoorStatus::Closing => self.tick_door(DoorStatus::Closed),
            DoorStatus::Closed | DoorStatus::Unknown(_) => self.travel(cfg),
        }
    }

    fn begin_door(&mut self, phase: DoorStatus, cfg: &BankConfig) {
        self.door       = phase;
        self.door_timer = cfg.door_ticks;
    }

    fn tick_door(&mut self, done: DoorStatus) {
        if self.door_timer == 0 {
            self.door = done;
        } else {
            self.door_timer -= 1;
        }
    }

    fn travel(&mut self, cfg: &BankConfig) {
        if self.heading == Direction::Uncommitted {
            self.heading = Direction::towards(self.floor, self.target);
            if self.heading == Direction::Uncommitted {
                self.begin_door(DoorStatus::Opening, cfg);
                return;
            }
        }

        self.leg_progress += 1;
        if self.leg_progress < cfg.ticks_per_floor {
            return;
        }

        self.leg_progress = 0;
        self.floor = match self.heading {
            Direction::Up          => FloorId(self.floor.0 + 1),
            Direction::Down        => FloorId(self.floor.0.saturating_sub(1)),
            Direction::Uncommitted => self.floor,
        };
        self.heading = Direction::Uncommitted;
        if self.floor == self.target {
            self.begin_door(DoorStatus::Opening, cfg);
        }
    }

    fn position(&self, cfg: &BankConfig) -> u32 {
        let base  = self.floor.0 * cfg.floor_height;
        let delta = self.leg_progress * cfg.floor_height / cfg.ticks_per_floor;
        match self.heading {
            Direction::Up          => base + delta,
            Direction::Down        => base.saturating_sub(delta),
            Direction::Uncommitted => base,
        }
    }

    fn speed(&self, cfg: &BankConfig) -> i32 {
        let magnitude = (cfg.floor_height / cfg.ticks_per_floor) as i32;
        match self.heading {
            Direction::Up          => magnitude,
            Direction::Down        => -magnitude,
            Direction::Uncommitted => 0,
        }
    }
}

// ── BankState ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct BankState {
    config:    BankConfig,
    clock:     Tick,
    connected: bool,
    cars:      Vec<Car>,
    hall_up:   Vec<bool>,
    hall_down: Vec<bool>,
    commands:  u64,
}

impl BankState {
    fn car(&self, elevator: ElevatorId) -> ServiceResult<&Car> {
        let id = elevator.checked(self.cars.len())?;
        Ok(&self.cars[id.index()])
    }

    fn car_mut(&mut self, elevator: ElevatorId) -> ServiceResult<&mut Car> {
        let id = elevator.checked(self.cars.len())?;
        Ok(&mut self.cars[id.index()])
    }

    fn floor(&self, floor: FloorId) -> ServiceResult<FloorId> {
        Ok(floor.checked(self.config.floor_count)?)
    }

    fn clear_served_buttons(&mut self) {
        for car in self.cars.iter_mut().filter(|c| c.door.is_open()) {
            let at = car.floor.index();
            self.hall_up[at]     = false;
            self.hall_down[at]   = false;
            car.cab_buttons[at]  = false;
        }
    }
}

// ── SimulatedBank ─────────────────────────────────────────────────────────────

/// A simulated elevator bank implementing [`ElevatorService`].
///
/// All cars start parked at floor 0 with the door closed and target 0.
#[derive(Clone, Debug)]
pub struct SimulatedBank {
    state: Arc<Mutex<BankState>>,
}

impl SimulatedBank {
    pub fn new(config: BankConfig) -> ServiceResult<Self> {
        config.validate()?;
        let cars = vec![Car::parked(config.floor_count); config.elevator_count];
        let state = BankState {
            clock:     Tick::ZERO,
            connected: true,
            cars,
            hall_up:   vec![false; config.floor_count],
            hall_down: vec![false; config.floor_count],
            commands:  0,
            config,
        };
        Ok(Self { state: Arc::new(Mutex::new(state)) })
    }

    fn lock(&self, call: &'static str) -> ServiceResult<MutexGuard<'_, BankState>> {
        self.state.lock().map_err(|_| ServiceError::Call {
            call,
            reason: "simulator state poisoned".into(),
        })
    }

    /// Lock for a remote call: fails once the bank has been disconnected.
    fn remote(&self, call: &'static str) -> ServiceResult<MutexGuard<'_, BankState>> {
        let state = self.lock(call)?;
        if !state.connected {
            return Err(ServiceError::Disconnected(format!("{call}: connection refused")));
        }
        Ok(state)
    }

    // ── Simulation control ────────────────────────────────────────────────

    pub fn config(&self) -> ServiceResult<BankConfig> {
        Ok(self.lock("config")?.config.clone())
    }

    /// Advance the clock by one tick and move every car.  Keeps running
    /// after [`disconnect`][Self::disconnect]; only remote calls fail.
    pub fn step(&self) -> ServiceResult<Tick> {
        let mut guard = self.lock("step")?;
        let state = &mut *guard;
        for car in &mut state.cars {
            car.advance(&state.config);
        }
        state.clear_served_buttons();
        state.clock = state.clock + 1;
        Ok(state.clock)
    }

    /// Light a landing button.  `Direction::Uncommitted` lights both.
    pub fn press_hall(&self, floor: FloorId, direction: Direction) -> ServiceResult<()> {
        let mut state = self.lock("press_hall")?;
        let at = state.floor(floor)?.index();
        match direction {
            Direction::Up          => state.hall_up[at] = true,
            Direction::Down        => state.hall_down[at] = true,
            Direction::Uncommitted => {
                state.hall_up[at]   = true;
                state.hall_down[at] = true;
            }
        }
        Ok(())
    }

    /// Light the in-cab button for `floor` in `elevator`.
    pub fn press_cab(&self, elevator: ElevatorId, floor: FloorId) -> ServiceResult<()> {
        let mut state = self.lock("press_cab")?;
        let at = state.floor(floor)?.index();
        state.car_mut(elevator)?.cab_buttons[at] = true;
        Ok(())
    }

    /// Set the car's payload.  Rejects loads above `capacity`.
    pub fn set_payload(&self, elevator: ElevatorId, weight: u32) -> ServiceResult<()> {
        let mut state = self.lock("set_payload")?;
        if weight > state.config.capacity {
            return Err(LbError::Config(format!(
                "payload {weight} exceeds capacity {}",
                state.config.capacity
            ))
            .into());
        }
        state.car_mut(elevator)?.weight = weight;
        Ok(())
    }

    /// Teleport a car to `floor` with the given door state, abandoning any
    /// floor leg in progress.  The remote target is left unchanged.
    pub fn place(&self, elevator: ElevatorId, floor: FloorId, door: DoorStatus) -> ServiceResult<()> {
        let mut state = self.lock("place")?;
        state.floor(floor)?;
        let car = state.car_mut(elevator)?;
        car.floor        = floor;
        car.door         = door;
        car.door_timer   = 0;
        car.heading      = Direction::Uncommitted;
        car.leg_progress = 0;
        Ok(())
    }

    /// Drop the connection: every subsequent remote call fails.
    pub fn disconnect(&self) -> ServiceResult<()> {
        self.lock("disconnect")?.connected = false;
        Ok(())
    }

    pub fn is_connected(&self) -> ServiceResult<bool> {
        Ok(self.lock("is_connected")?.connected)
    }

    /// Number of accepted `set_target` commands since construction.
    pub fn commands_issued(&self) -> ServiceResult<u64> {
        Ok(self.lock("commands_issued")?.commands)
    }
}

impl ElevatorService for SimulatedBank {
    fn clock_tick(&self) -> ServiceResult<Tick> {
        Ok(self.remote("clock_tick")?.clock)
    }

    fn elevator_count(&self) -> ServiceResult<usize> {
        Ok(self.remote("elevator_count")?.cars.len())
    }

    fn floor_count(&self) -> ServiceResult<usize> {
        Ok(self.remote("floor_count")?.config.floor_count)
    }

    fn elevator_floor(&self, elevator: ElevatorId) -> ServiceResult<FloorId> {
        Ok(self.remote("elevator_floor")?.car(elevator)?.floor)
    }

    fn elevator_position(&self, elevator: ElevatorId) -> ServiceResult<u32> {
        let state = self.remote("elevator_position")?;
        Ok(state.car(elevator)?.position(&state.config))
    }

    fn elevator_speed(&self, elevator: ElevatorId) -> ServiceResult<i32> {
        let state = self.remote("elevator_speed")?;
        Ok(state.car(elevator)?.speed(&state.config))
    }

    fn elevator_weight(&self, elevator: ElevatorId) -> ServiceResult<u32> {
        Ok(self.remote("elevator_weight")?.car(elevator)?.weight)
    }

    fn door_status_code(&self, elevator: ElevatorId) -> ServiceResult<i32> {
        Ok(self.remote("door_status")?.car(elevator)?.door.code())
    }

    fn target(&self, elevator: ElevatorId) -> ServiceResult<FloorId> {
        Ok(self.remote("target")?.car(elevator)?.target)
    }

    fn elevator_button(&self, elevator: ElevatorId, floor: FloorId) -> ServiceResult<bool> {
        let state = self.remote("elevator_button")?;
        let at = state.floor(floor)?.index();
        Ok(state.car(elevator)?.cab_buttons[at])
    }

    fn floor_button_up(&self, floor: FloorId) -> ServiceResult<bool> {
        let state = self.remote("floor_button_up")?;
        let at = state.floor(floor)?.index();
        Ok(state.hall_up[at])
    }

    fn floor_button_down(&self, floor: FloorId) -> ServiceResult<bool> {
        let state = self.remote("floor_button_down")?;
        let at = state.floor(floor)?.index();
        Ok(state.hall_down[at])
    }

    fn set_target(&mut self, elevator: ElevatorId, floor: FloorId) -> ServiceResult<()> {
        let mut state = self.remote("set_target")?;
        let floor = state.floor(floor)?;
        state.car_mut(elevator)?.target = floor;
        state.commands += 1;
        trace!("sim: {elevator} commanded to {floor}");
        Ok(())
    }
}
