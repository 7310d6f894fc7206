//! Player Locomotion Machine
//!
//! This example drives a small movement controller for a few simulated frames.
//!
//! Key concepts:
//! - Typed keys declared with `state_keys!`
//! - States requesting transitions from `check_transitions`
//! - Refused requests leaving the machine untouched
//!
//! Run with: RUST_LOG=debug cargo run --example locomotion

use std::cell::Cell;
use std::rc::Rc;
use tickfsm::core::{MachineHandle, State};
use tickfsm::{state_keys, MachineBuilder};
use tracing_subscriber::EnvFilter;

state_keys! {
    enum Locomotion {
        Idle = 0,
        Moving = 1,
        Jumping = 2,
    }
}

/// Input the host samples once per frame.
#[derive(Default)]
struct Input {
    speed: Cell<f32>,
    jump: Cell<bool>,
}

struct Idle {
    input: Rc<Input>,
    machine: Option<MachineHandle<Locomotion>>,
}

impl State<Locomotion> for Idle {
    fn identifier(&self) -> &str {
        "Idle"
    }

    fn initialize(&mut self, machine: MachineHandle<Locomotion>) {
        self.machine = Some(machine);
    }

    fn check_transitions(&mut self) {
        let Some(machine) = &self.machine else { return };
        if self.input.jump.get() {
            // not whitelisted from Idle, refused and logged
            machine.attempt_transition(Locomotion::Jumping);
        }
        if self.input.speed.get() > 0.1 {
            machine.attempt_transition(Locomotion::Moving);
        }
    }
}

struct Moving {
    input: Rc<Input>,
    machine: Option<MachineHandle<Locomotion>>,
    distance: f32,
}

impl State<Locomotion> for Moving {
    fn identifier(&self) -> &str {
        "Moving"
    }

    fn initialize(&mut self, machine: MachineHandle<Locomotion>) {
        self.machine = Some(machine);
    }

    fn on_fixed_update(&mut self) {
        self.distance += self.input.speed.get();
    }

    fn check_transitions(&mut self) {
        let Some(machine) = &self.machine else { return };
        if self.input.jump.get() {
            machine.attempt_transition(Locomotion::Jumping);
        } else if self.input.speed.get() <= 0.1 {
            machine.attempt_transition(Locomotion::Idle);
        }
    }
}

struct Jumping {
    machine: Option<MachineHandle<Locomotion>>,
    airborne: u32,
}

impl State<Locomotion> for Jumping {
    fn identifier(&self) -> &str {
        "Jumping"
    }

    fn initialize(&mut self, machine: MachineHandle<Locomotion>) {
        self.machine = Some(machine);
    }

    fn on_enter(&mut self) {
        self.airborne = 0;
    }

    fn on_fixed_update(&mut self) {
        self.airborne += 1;
    }

    fn check_transitions(&mut self) {
        if self.airborne >= 2 {
            if let Some(machine) = &self.machine {
                machine.attempt_transition(Locomotion::Idle);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Player Locomotion Machine ===\n");

    let input = Rc::new(Input::default());
    let mut machine = MachineBuilder::new()
        .state(
            Locomotion::Idle,
            Idle {
                input: Rc::clone(&input),
                machine: None,
            },
        )
        .state(
            Locomotion::Moving,
            Moving {
                input: Rc::clone(&input),
                machine: None,
                distance: 0.0,
            },
        )
        .state(
            Locomotion::Jumping,
            Jumping {
                machine: None,
                airborne: 0,
            },
        )
        .allow(Locomotion::Idle, Locomotion::Moving)
        .allow(Locomotion::Moving, Locomotion::Idle)
        .allow(Locomotion::Moving, Locomotion::Jumping)
        .allow(Locomotion::Jumping, Locomotion::Idle)
        .start()?;

    // (speed, jump) per frame
    let frames = [
        (0.0, true),
        (1.0, false),
        (1.0, false),
        (1.0, true),
        (0.0, false),
        (0.0, false),
        (0.0, false),
    ];

    for (frame, (speed, jump)) in frames.into_iter().enumerate() {
        input.speed.set(speed);
        input.jump.set(jump);

        machine.tick()?;
        machine.fixed_tick()?;
        machine.late_tick()?;

        let current = machine.current_key().map(|key| key.name()).unwrap_or("-");
        println!("frame {frame}: speed={speed:.1} jump={jump:<5} -> {current}");
    }

    let path: Vec<&str> = machine
        .history()
        .get_path()
        .into_iter()
        .map(|key| key.name())
        .collect();
    println!("\nPath: {}", path.join(" -> "));

    machine.stop()?;
    println!("\n=== Example Complete ===");
    Ok(())
}
