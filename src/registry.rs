//! Single-slot registry binding interrupt entry points to the encoder.
//!
//! Interrupt handlers are free functions and cannot carry a `self`. The
//! encoder parks a `&'static EncoderState` here at construction and the
//! handlers dispatch through [`on_quadrature_edge`] / [`on_button_edge`].
//! Only one encoder can be registered at a time.

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use crate::button::ButtonEdge;
use crate::error::Error;
use crate::quadrature::Direction;
use crate::state::EncoderState;

static ACTIVE: AtomicPtr<EncoderState> = AtomicPtr::new(ptr::null_mut());

/// Claim the slot for `state`. Fails whenever the slot is occupied, even
/// by `state` itself.
pub fn register(state: &'static EncoderState) -> Result<(), Error> {
    let new = state as *const EncoderState as *mut EncoderState;
    match ACTIVE.compare_exchange(ptr::null_mut(), new, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {
            info!("encoder registered");
            Ok(())
        }
        Err(_) => {
            warn!("encoder slot already taken");
            Err(Error::AlreadyRegistered)
        }
    }
}

/// Empty the slot. Later edges are dropped until something registers.
pub fn unregister() {
    ACTIVE.store(ptr::null_mut(), Ordering::Release);
}

/// The registered state, if any.
pub fn active() -> Option<&'static EncoderState> {
    let current = ACTIVE.load(Ordering::Acquire);
    // SAFETY: the slot only ever holds null or a pointer derived from a
    // `&'static EncoderState` in `register`, and `EncoderState` is only
    // mutated through atomics.
    unsafe { current.as_ref() }
}

/// Quadrature interrupt entry point. Dropped silently when unregistered.
pub fn on_quadrature_edge(a: bool, b: bool) -> Option<Direction> {
    active()?.on_quadrature_edge(a, b)
}

/// Button interrupt entry point. Dropped silently when unregistered.
pub fn on_button_edge(now: u32) -> Option<ButtonEdge> {
    active().map(|state| state.on_button_edge(now))
}

/// Like [`on_quadrature_edge`], but reports a missing registration.
pub fn try_on_quadrature_edge(a: bool, b: bool) -> Result<Option<Direction>, Error> {
    let state = active().ok_or(Error::NotRegistered)?;
    Ok(state.on_quadrature_edge(a, b))
}

/// Like [`on_button_edge`], but reports a missing registration.
pub fn try_on_button_edge(now: u32) -> Result<ButtonEdge, Error> {
    let state = active().ok_or(Error::NotRegistered)?;
    Ok(state.on_button_edge(now))
}
