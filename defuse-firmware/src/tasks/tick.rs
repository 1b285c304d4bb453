//! Tick task
//!
//! Drives the prop: every tick polls the buttons, steps the machine and
//! dispatches its frame and tones. Mode changes and sink failures are
//! logged here.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use defuse_core::driver::run_tick;
use defuse_core::state::Machine;
use defuse_display::ScreenSink;
use defuse_hal::ButtonBank;

use crate::buzzer::Buzzer;
use crate::clock::UptimeClock;
use crate::console::ConsoleBackend;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 10;

/// Tick task - runs the machine for the lifetime of the firmware
#[embassy_executor::task]
pub async fn tick_task(
    mut machine: Machine,
    mut buttons: ButtonBank<Input<'static>>,
    mut display: ScreenSink<ConsoleBackend>,
    mut buzzer: Buzzer,
) {
    info!("Tick task started");

    let clock = UptimeClock::new();
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut failed_frames = 0;
    let mut read_errors = 0;

    loop {
        ticker.next().await;

        let output = run_tick(&mut machine, &clock, &mut buttons, &mut display, &mut buzzer);

        if let Some(transition) = output.transition {
            info!(
                "Mode: {} -> {} (remaining {}s)",
                transition.from.name(),
                transition.to.name(),
                machine.timer().remaining_s()
            );
        }

        buzzer.service();

        if display.failed_frames() != failed_frames {
            failed_frames = display.failed_frames();
            warn!("Display: {} frames failed", failed_frames);
        }
        if buttons.read_errors() != read_errors {
            read_errors = buttons.read_errors();
            warn!("Buttons: {} pin read errors", read_errors);
        }
    }
}
