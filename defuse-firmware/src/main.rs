//! Defuse - countdown-and-disarm prop firmware
//!
//! Main firmware binary for RP2040-based props: three buttons, a piezo
//! buzzer on PWM and a text display. All behavior lives in defuse-core;
//! this crate only wires hardware into its tick loop.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use defuse_core::state::Machine;
use defuse_display::ScreenSink;
use defuse_hal::{ButtonBank, ButtonConfig};

use crate::buzzer::Buzzer;
use crate::console::ConsoleBackend;

mod buzzer;
mod clock;
mod config;
mod console;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Defuse firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Buttons to ground on GPIO2/3/4, internal pull-ups
    let buttons = ButtonBank::new(
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        ButtonConfig::default(),
    );
    info!("Buttons initialized");

    // Piezo on GPIO14 (PWM slice 7, channel A), silent until the first tone
    let pwm = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, PwmConfig::default());
    let buzzer = Buzzer::new(pwm);
    info!("Buzzer initialized");

    let display = ScreenSink::new(ConsoleBackend::new());
    let machine = Machine::new(config);

    spawner
        .spawn(tasks::tick_task(machine, buttons, display, buzzer))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
