//! Unit tests for lb-service.

use lb_core::{Direction, DoorStatus, ElevatorId, FloorId, Tick};

use crate::{BankConfig, ElevatorService, ServiceError, SimulatedBank};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two cars, five floors, one tick per floor, instant doors.
fn fast_config() -> BankConfig {
    BankConfig {
        elevator_count:  2,
        floor_count:     5,
        floor_height:    10,
        ticks_per_floor: 1,
        door_ticks:      0,
        capacity:        500,
    }
}

fn fast_bank() -> SimulatedBank {
    SimulatedBank::new(fast_config()).unwrap()
}

fn step_n(bank: &SimulatedBank, n: usize) {
    for _ in 0..n {
        bank.step().unwrap();
    }
}

// ── BankConfig ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(BankConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_bank() {
        let cfg = BankConfig { elevator_count: 0, ..BankConfig::default() };
        assert!(SimulatedBank::new(cfg).is_err());
    }

    #[test]
    fn rejects_single_floor() {
        let cfg = BankConfig { floor_count: 1, ..BankConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_ticks_per_floor() {
        let cfg = BankConfig { ticks_per_floor: 0, ..BankConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

// ── Remote accessors ──────────────────────────────────────────────────────────

#[cfg(test)]
mod accessor_tests {
    use super::*;

    #[test]
    fn counts_match_config() {
        let bank = fast_bank();
        assert_eq!(bank.elevator_count().unwrap(), 2);
        assert_eq!(bank.floor_count().unwrap(), 5);
    }

    #[test]
    fn cars_start_parked_at_ground() {
        let bank = fast_bank();
        let t = bank.telemetry(ElevatorId(1)).unwrap();
        assert_eq!(t.floor, FloorId(0));
        assert_eq!(t.target, FloorId(0));
        assert_eq!(t.door, DoorStatus::Closed);
        assert_eq!(t.speed, 0);
        assert_eq!(t.position, 0);
    }

    #[test]
    fn out_of_range_ids_are_invalid() {
        let bank = fast_bank();
        assert!(matches!(bank.elevator_floor(ElevatorId(2)), Err(ServiceError::Invalid(_))));
        assert!(matches!(bank.floor_button_up(FloorId(5)), Err(ServiceError::Invalid(_))));
    }

    #[test]
    fn hall_call_pressed_either_direction() {
        let bank = fast_bank();
        bank.press_hall(FloorId(2), Direction::Down).unwrap();
        bank.press_hall(FloorId(3), Direction::Up).unwrap();
        assert!(bank.hall_call_pressed(FloorId(2)).unwrap());
        assert!(bank.hall_call_pressed(FloorId(3)).unwrap());
        assert!(!bank.hall_call_pressed(FloorId(4)).unwrap());
    }

    #[test]
    fn payload_respects_capacity() {
        let bank = fast_bank();
        bank.set_payload(ElevatorId(0), 450).unwrap();
        assert_eq!(bank.elevator_weight(ElevatorId(0)).unwrap(), 450);
        assert!(bank.set_payload(ElevatorId(0), 501).is_err());
    }

    #[test]
    fn set_target_counts_commands() {
        let mut bank = fast_bank();
        bank.set_target(ElevatorId(0), FloorId(3)).unwrap();
        bank.set_target(ElevatorId(0), FloorId(3)).unwrap();
        assert_eq!(bank.target(ElevatorId(0)).unwrap(), FloorId(3));
        assert_eq!(bank.commands_issued().unwrap(), 2);
    }
}

// ── Physics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod physics_tests {
    use super::*;

    #[test]
    fn step_advances_clock() {
        let bank = fast_bank();
        assert_eq!(bank.clock_tick().unwrap(), Tick(0));
        step_n(&bank, 3);
        assert_eq!(bank.clock_tick().unwrap(), Tick(3));
    }

    #[test]
    fn parked_car_opens_at_its_target() {
        let bank = fast_bank();
        step_n(&bank, 2); // Closed → Opening → Open
        assert_eq!(bank.door_status(ElevatorId(0)).unwrap(), DoorStatus::Open);
    }

    #[test]
    fn car_travels_and_opens_at_target() {
        let mut bank = fast_bank();
        bank.set_target(ElevatorId(0), FloorId(3)).unwrap();
        // Closed: three one-tick legs, then Opening → Open.
        step_n(&bank, 3);
        assert_eq!(bank.elevator_floor(ElevatorId(0)).unwrap(), FloorId(3));
        assert_eq!(bank.door_status(ElevatorId(0)).unwrap(), DoorStatus::Opening);
        bank.step().unwrap();
        let t = bank.telemetry(ElevatorId(0)).unwrap();
        assert!(t.at_target_with_door_open());
        assert_eq!(t.position, 30);
    }

    #[test]
    fn open_door_closes_before_travel() {
        let mut bank = fast_bank();
        bank.place(ElevatorId(0), FloorId(1), DoorStatus::Open).unwrap();
        bank.set_target(ElevatorId(0), FloorId(2)).unwrap();
        bank.step().unwrap();
        assert_eq!(bank.door_status(ElevatorId(0)).unwrap(), DoorStatus::Closing);
        bank.step().unwrap();
        assert_eq!(bank.door_status(ElevatorId(0)).unwrap(), DoorStatus::Closed);
        assert_eq!(bank.elevator_floor(ElevatorId(0)).unwrap(), FloorId(1));
        bank.step().unwrap();
        assert_eq!(bank.elevator_floor(ElevatorId(0)).unwrap(), FloorId(2));
    }

    #[test]
    fn multi_tick_leg_reports_speed_and_position() {
        let cfg = BankConfig { ticks_per_floor: 2, ..fast_config() };
        let mut bank = SimulatedBank::new(cfg).unwrap();
        bank.place(ElevatorId(0), FloorId(2), DoorStatus::Closed).unwrap();
        bank.set_target(ElevatorId(0), FloorId(0)).unwrap();
        bank.step().unwrap();
        assert_eq!(bank.elevator_speed(ElevatorId(0)).unwrap(), -5);
        assert_eq!(bank.elevator_position(ElevatorId(0)).unwrap(), 15);
        assert_eq!(bank.elevator_floor(ElevatorId(0)).unwrap(), FloorId(2));
        bank.step().unwrap();
        assert_eq!(bank.elevator_floor(ElevatorId(0)).unwrap(), FloorId(1));
    }

    #[test]
    fn open_door_clears_buttons_at_floor() {
        let mut bank = fast_bank();
        bank.press_hall(FloorId(2), Direction::Uncommitted).unwrap();
        bank.press_cab(ElevatorId(0), FloorId(2)).unwrap();
        bank.press_cab(ElevatorId(1), FloorId(2)).unwrap();
        bank.set_target(ElevatorId(0), FloorId(2)).unwrap();
        step_n(&bank, 3);
        assert!(!bank.hall_call_pressed(FloorId(2)).unwrap());
        assert!(!bank.elevator_button(ElevatorId(0), FloorId(2)).unwrap());
        // The other car never stopped there.
        assert!(bank.elevator_button(ElevatorId(1), FloorId(2)).unwrap());
    }
}

// ── Connectivity ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod disconnect_tests {
    use super::*;

    #[test]
    fn remote_calls_fail_after_disconnect() {
        let mut bank = fast_bank();
        bank.disconnect().unwrap();
        assert!(matches!(bank.clock_tick(), Err(ServiceError::Disconnected(_))));
        assert!(bank.set_target(ElevatorId(0), FloorId(1)).is_err());
        assert!(!bank.is_connected().unwrap());
    }

    #[test]
    fn simulation_keeps_running_after_disconnect() {
        let bank = fast_bank();
        bank.disconnect().unwrap();
        assert_eq!(bank.step().unwrap(), Tick(1));
    }

    #[test]
    fn clones_share_state() {
        let bank = fast_bank();
        let handle = bank.clone();
        handle.step().unwrap();
        assert_eq!(bank.clock_tick().unwrap(), Tick(1));
        handle.disconnect().unwrap();
        assert!(bank.clock_tick().is_err());
    }
}
