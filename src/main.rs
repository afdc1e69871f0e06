//! Firmware entry point for the nRF52840.
//!
//! Edge tasks run on an interrupt executor at a higher priority than the
//! thread-mode foreground, which only ever drains finished events.

#![no_std]
#![no_main]

mod tasks;

use defmt::{info, unwrap};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_nrf::gpio::Pin;
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_time::{Duration, Ticker};
use rotary_knob::config::POLL_INTERVAL_MS;
use rotary_knob::{Encoder, EncoderState, InputEvent};
use {defmt_rtt as _, panic_probe as _};

/// The one encoder instance. Interrupt handlers reach it via the registry.
static ENCODER_STATE: EncoderState = EncoderState::new();

/// Runs the edge tasks from `EGU1_SWI1`.
static EDGE_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    EDGE_EXECUTOR.on_interrupt()
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("rotary-knob starting");

    // Register before any edge can fire.
    let encoder = unwrap!(Encoder::with_button(&ENCODER_STATE, tasks::now_micros()));

    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    let edge_spawner = EDGE_EXECUTOR.start(interrupt::EGU1_SWI1);
    unwrap!(edge_spawner.spawn(tasks::quadrature_task(p.P0_11.degrade(), p.P0_12.degrade())));
    unwrap!(edge_spawner.spawn(tasks::button_task(p.P0_24.degrade())));

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    loop {
        ticker.next().await;

        for event in encoder.take_events() {
            match event {
                InputEvent::Rotated(delta) => {
                    info!("Knob: {} (count {})", delta, encoder.count())
                }
                InputEvent::Pressed => info!("Knob: pressed"),
                InputEvent::Clicked => info!("Knob: clicked"),
                InputEvent::DoubleClicked => info!("Knob: double-clicked"),
            }
        }
    }
}
