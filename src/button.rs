//! Time-window debouncing for the encoder pushbutton.
//!
//! The button line is active-low with a pull-up. Every edge on it lands
//! here with a microsecond timestamp. Edges closer than
//! [`DEBOUNCE_MICROS`] to the last accepted one are bounce and dropped;
//! accepted edges simply toggle the logical state, so the line level is
//! never read back.
//!
//! A click completes on release. Two releases no further apart than
//! [`DOUBLE_CLICK_MICROS`] make the second one a double-click.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::{DEBOUNCE_MICROS, DOUBLE_CLICK_MICROS};

/// Debounced logical button state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Released,
    Pressed,
}

/// Outcome of one button edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    /// Inside the debounce window; nothing changed.
    Rejected,
    /// Released -> Pressed.
    Pressed,
    /// Pressed -> Released.
    Clicked,
    /// Pressed -> Released, within the double-click window of the last click.
    DoubleClicked,
}

/// Microseconds from `then` to `now` on a wrapping 32-bit clock.
pub const fn elapsed(now: u32, then: u32) -> u32 {
    now.wrapping_sub(then)
}

/// Debouncer state, written only from the button interrupt.
pub struct Debouncer {
    pressed: AtomicBool,
    debounce_at: AtomicU32,
    last_click_at: AtomicU32,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            pressed: AtomicBool::new(false),
            debounce_at: AtomicU32::new(0),
            last_click_at: AtomicU32::new(0),
        }
    }

    /// Back to `Released`, with both windows anchored at `now`.
    pub fn reset(&self, now: u32) {
        self.pressed.store(false, Ordering::Relaxed);
        self.debounce_at.store(now, Ordering::Relaxed);
        self.last_click_at.store(now, Ordering::Relaxed);
    }

    /// Feed one edge observed at `now`.
    pub fn on_edge(&self, now: u32) -> ButtonEdge {
        if elapsed(now, self.debounce_at.load(Ordering::Relaxed)) < DEBOUNCE_MICROS {
            return ButtonEdge::Rejected;
        }
        self.debounce_at.store(now, Ordering::Relaxed);

        if !self.pressed.load(Ordering::Relaxed) {
            self.pressed.store(true, Ordering::Release);
            return ButtonEdge::Pressed;
        }

        self.pressed.store(false, Ordering::Release);
        let since_last = elapsed(now, self.last_click_at.load(Ordering::Relaxed));
        self.last_click_at.store(now, Ordering::Relaxed);

        if since_last <= DOUBLE_CLICK_MICROS {
            ButtonEdge::DoubleClicked
        } else {
            ButtonEdge::Clicked
        }
    }

    pub fn state(&self) -> ButtonState {
        if self.pressed.load(Ordering::Acquire) {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
