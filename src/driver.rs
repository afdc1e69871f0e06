//! Platform-neutral edge pumps.
//!
//! Each pump awaits an edge on `embedded-hal-async` pins and hands the
//! sample to the registered encoder through [`crate::registry`]. Run them
//! on an executor driven from an interrupt and the decoding happens in
//! interrupt context, preempting whatever the foreground is doing.

use embassy_futures::select::{select, Either};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::button::ButtonEdge;
use crate::error::{pin_error, Error};
use crate::quadrature::Direction;
use crate::registry;

/// Free-running microsecond clock. Expected to wrap at `u32::MAX`.
pub trait Clock {
    fn now_micros(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    fn now_micros(&self) -> u32 {
        self()
    }
}

/// Wait for one edge on either quadrature line, then sample both.
pub async fn quadrature_edge<A, B>(a: &mut A, b: &mut B) -> Result<Option<Direction>, Error>
where
    A: InputPin + Wait,
    B: InputPin + Wait,
{
    let edge = select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
    match edge {
        Either::First(res) => res.map_err(pin_error)?,
        Either::Second(res) => res.map_err(pin_error)?,
    }

    let level_a = a.is_high().map_err(pin_error)?;
    let level_b = b.is_high().map_err(pin_error)?;
    registry::try_on_quadrature_edge(level_a, level_b)
}

/// Wait for one edge on the button line and timestamp it.
pub async fn button_edge<P, C>(pin: &mut P, clock: &C) -> Result<ButtonEdge, Error>
where
    P: Wait,
    C: Clock,
{
    pin.wait_for_any_edge().await.map_err(pin_error)?;
    registry::try_on_button_edge(clock.now_micros())
}

/// Pump quadrature edges forever. Returns only on a pin error.
pub async fn run_quadrature<A, B>(mut a: A, mut b: B) -> Error
where
    A: InputPin + Wait,
    B: InputPin + Wait,
{
    loop {
        match quadrature_edge(&mut a, &mut b).await {
            Ok(Some(direction)) => trace!("indent {}", direction),
            Ok(None) => {}
            Err(Error::NotRegistered) => warn!("quadrature edge with no encoder registered"),
            Err(e) => return e,
        }
    }
}

/// Pump button edges forever. Returns only on a pin error.
pub async fn run_button<P, C>(mut pin: P, clock: C) -> Error
where
    P: Wait,
    C: Clock,
{
    loop {
        match button_edge(&mut pin, &clock).await {
            Ok(ButtonEdge::Rejected) => {}
            Ok(edge) => trace!("button {}", edge),
            Err(Error::NotRegistered) => warn!("button edge with no encoder registered"),
            Err(e) => return e,
        }
    }
}
