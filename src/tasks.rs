//! Edge tasks for the encoder lines (firmware only).
//!
//! Three inputs, all active-low with the internal pull-up:
//!   - A, B   - quadrature lines, both edges
//!   - BUTTON - pushbutton, both edges
//!
//! The tasks are spawned on the interrupt executor, so each edge is
//! decoded in interrupt context as soon as GPIOTE reports it. They never
//! block on anything but the edge itself.

use defmt::{error, info};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::Instant;
use rotary_knob::{run_button, run_quadrature};

/// Microsecond uptime, wrapping at `u32::MAX` (about 71 minutes).
pub fn now_micros() -> u32 {
    Instant::now().as_micros() as u32
}

#[embassy_executor::task]
pub async fn quadrature_task(a: AnyPin, b: AnyPin) {
    let a = Input::new(a, Pull::Up);
    let b = Input::new(b, Pull::Up);
    info!("Encoder: quadrature lines armed");

    let err = run_quadrature(a, b).await;
    error!("Encoder: quadrature pump stopped: {}", err);
}

#[embassy_executor::task]
pub async fn button_task(pin: AnyPin) {
    let btn = Input::new(pin, Pull::Up);
    info!("Encoder: button line armed");

    let err = run_button(btn, now_micros).await;
    error!("Encoder: button pump stopped: {}", err);
}
