//! bank: runs the liftbank dispatcher against a simulated elevator bank.
//!
//! A simulator thread advances the bank at the polling rate and generates
//! passengers: each one presses a landing button, boards the first car that
//! opens its door on that floor, and presses a cab button for its
//! destination.  The dispatcher polls the same bank and writes a CSV trace.
//!
//! ```text
//! cargo run -p bank                     # built-in defaults
//! cargo run -p bank -- tower.json       # JSON overrides (any subset of fields)
//! RUST_LOG=debug cargo run -p bank      # per-assignment log lines
//! ```
//!
//! The process exits non-zero when the dispatcher stops on an error, for
//! instance after `disconnect_after_steps` simulated ticks.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use lb_core::{Direction, ElevatorId, FloorId, PollConfig, Tick};
use lb_dispatch::{
    DispatchError, DispatchObserver, DispatcherBuilder, Elevator, RequestTracker, StopHandle,
    TickReport,
};
use lb_output::{CsvWriter, DispatchOutputObserver, OutputWriter};
use lb_service::{BankConfig, ElevatorService, ServiceResult, SimulatedBank};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct DemoConfig {
    bank:                   BankConfig,
    poll:                   PollConfig,
    seed:                   u64,
    /// Probability that a new passenger appears on a given tick.
    passenger_rate:         f64,
    trace_dir:              PathBuf,
    /// Drop the connection after this many simulated ticks.
    disconnect_after_steps: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bank: BankConfig::default(),
            poll: PollConfig {
                poll_interval_ms: 20,
                max_polls:        Some(500),
                ..PollConfig::default()
            },
            seed:                   42,
            passenger_rate:         0.15,
            trace_dir:              PathBuf::from("output/bank"),
            disconnect_after_steps: None,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── Passenger traffic ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Passenger {
    origin:      FloorId,
    destination: FloorId,
}

/// Passengers waiting at landings and riding cars, driven one tick at a time.
struct Traffic {
    rng:     SmallRng,
    rate:    f64,
    floors:  u32,
    waiting: VecDeque<Passenger>,
    riding:  Vec<Vec<FloorId>>,
    spawned: u64,
    served:  u64,
}

impl Traffic {
    fn new(config: &DemoConfig) -> Self {
        Self {
            rng:     SmallRng::seed_from_u64(config.seed),
            rate:    config.passenger_rate.clamp(0.0, 1.0),
            floors:  config.bank.floor_count as u32,
            waiting: VecDeque::new(),
            riding:  vec![Vec::new(); config.bank.elevator_count],
            spawned: 0,
            served:  0,
        }
    }

    fn spawn(&mut self, bank: &SimulatedBank) -> ServiceResult<()> {
        if !self.rng.gen_bool(self.rate) {
            return Ok(());
        }
        let origin = FloorId(self.rng.gen_range(0..self.floors));
        let mut destination = FloorId(self.rng.gen_range(0..self.floors - 1));
        if destination >= origin {
            destination = FloorId(destination.0 + 1);
        }
        bank.press_hall(origin, Direction::towards(origin, destination))?;
        self.waiting.push_back(Passenger { origin, destination });
        self.spawned += 1;
        Ok(())
    }

    /// Unload and board every car standing with its door open.
    fn exchange(&mut self, bank: &SimulatedBank) -> ServiceResult<()> {
        for (idx, riders) in self.riding.iter_mut().enumerate() {
            let car = ElevatorId(idx as u32);
            if !bank.door_status(car)?.is_open() {
                continue;
            }
            let floor = bank.elevator_floor(car)?;

            let before = riders.len();
            riders.retain(|&dest| dest != floor);
            self.served += (before - riders.len()) as u64;

            let mut boarded = Vec::new();
            self.waiting.retain(|p| {
                if p.origin == floor {
                    boarded.push(p.destination);
                    false
                } else {
                    true
                }
            });
            for dest in boarded {
                bank.press_cab(car, dest)?;
                riders.push(dest);
            }
            bank.set_payload(car, (riders.len() as u32 * 75).min(bank.config()?.capacity))?;
        }
        Ok(())
    }

    /// Re-press landing buttons of passengers a departing car left behind.
    fn repress(&self, bank: &SimulatedBank) -> ServiceResult<()> {
        for p in &self.waiting {
            if !bank.hall_call_pressed(p.origin)? {
                bank.press_hall(p.origin, Direction::towards(p.origin, p.destination))?;
            }
        }
        Ok(())
    }
}

/// Step the bank at the polling rate until `stop` is raised or the bank is
/// disconnected.  Returns the traffic counters.
fn simulate(bank: SimulatedBank, config: DemoConfig, stop: StopHandle) -> (u64, u64) {
    let mut traffic = Traffic::new(&config);
    let interval = config.poll.interval();

    while !stop.is_stopped() {
        let result = bank.step().and_then(|tick| {
            if config.disconnect_after_steps.is_some_and(|n| tick >= Tick(n)) {
                warn!("simulator: dropping the connection at {tick}");
                bank.disconnect()?;
            }
            traffic.exchange(&bank)?;
            traffic.repress(&bank)?;
            traffic.spawn(&bank)
        });
        if let Err(e) = result {
            info!("simulator stopped: {e}");
            break;
        }
        thread::sleep(interval);
    }
    (traffic.spawned, traffic.served)
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         DispatchOutputObserver<W>,
    summary_rows:  usize,
    snapshot_rows: usize,
    arrivals:      usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: DispatchOutputObserver<W>) -> Self {
        Self { inner, summary_rows: 0, snapshot_rows: 0, arrivals: 0 }
    }
}

impl<W: OutputWriter> DispatchObserver for CountingObserver<W> {
    fn on_arrival(&mut self, elevator: ElevatorId, floor: FloorId) {
        self.arrivals += 1;
        self.inner.on_arrival(elevator, floor);
    }

    fn on_tick_end(&mut self, poll: u64, report: &TickReport) {
        self.summary_rows += 1;
        self.inner.on_tick_end(poll, report);
    }

    fn on_snapshot(
        &mut self,
        poll:      u64,
        report:    &TickReport,
        elevators: &[Elevator],
        tracker:   &RequestTracker,
    ) {
        self.snapshot_rows += elevators.len();
        self.inner.on_snapshot(poll, report, elevators, tracker);
    }

    fn on_failure(&mut self, error: &DispatchError) {
        self.inner.on_failure(error);
    }

    fn on_run_end(&mut self, polls: u64) {
        self.inner.on_run_end(polls);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let arg = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(arg.as_deref())?;
    config.poll.validate()?;

    println!("=== bank — liftbank dispatcher demo ===");
    println!(
        "Elevators: {}  |  Floors: {}  |  Poll: {} ms  |  Seed: {}",
        config.bank.elevator_count, config.bank.floor_count, config.poll.poll_interval_ms, config.seed,
    );
    println!();

    // 1. Simulated bank and dispatcher.
    let bank = SimulatedBank::new(config.bank.clone())?;
    let mut dispatcher = DispatcherBuilder::new(bank.clone())
        .automatic(config.poll.automatic_by_default)
        .expect_elevators(config.bank.elevator_count)
        .expect_floors(config.bank.floor_count)
        .build()?;

    // 2. Trace output.
    std::fs::create_dir_all(&config.trace_dir)?;
    let writer = CsvWriter::new(&config.trace_dir)?;
    let mut obs = CountingObserver::new(DispatchOutputObserver::new(writer));

    // 3. Simulator thread.
    let stop = StopHandle::new();
    let simulator = {
        let (bank, config, stop) = (bank.clone(), config.clone(), stop.clone());
        thread::spawn(move || simulate(bank, config, stop))
    };

    // 4. Run.
    let t0 = Instant::now();
    let outcome = dispatcher.run(&config.poll, &mut obs, &stop);
    let elapsed = t0.elapsed();
    stop.stop();
    let (spawned, served) = simulator
        .join()
        .map_err(|_| anyhow::anyhow!("simulator thread panicked"))?;

    if let Some(e) = obs.inner.take_error() {
        eprintln!("trace error: {e}");
    }

    // 5. Summary.
    println!("Dispatcher ran {} polls in {:.3} s", dispatcher.polls(), elapsed.as_secs_f64());
    println!("  passengers         : {spawned} arrived, {served} delivered");
    println!("  arrivals           : {}", obs.arrivals);
    println!("  commands issued    : {}", bank.commands_issued()?);
    println!("  tick_summaries.csv     : {} rows", obs.summary_rows);
    println!("  elevator_snapshots.csv : {} rows", obs.snapshot_rows);
    println!(
        "  queues at exit     : {} hall calls, {} assigned",
        dispatcher.tracker().hall_calls().len(),
        dispatcher.tracker().assigned().len(),
    );
    println!();

    // 6. Final elevator table.
    println!("{:<12} {:<6} {:<8} {:<10} {}", "Elevator", "Auto", "Floor", "Door", "Route");
    println!("{}", "-".repeat(52));
    for car in dispatcher.elevators() {
        let t = car.telemetry();
        let route: Vec<String> = car.route().iter().map(|f| f.0.to_string()).collect();
        println!(
            "{:<12} {:<6} {:<8} {:<10} [{}]",
            car.id().to_string(),
            if car.is_automatic() { "yes" } else { "no" },
            t.floor.0,
            t.door.to_string(),
            route.join(", "),
        );
    }

    outcome.context("dispatcher stopped")?;
    Ok(())
}
