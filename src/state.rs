//! The one shared encoder state, written by interrupt handlers and read by
//! the foreground.
//!
//! Every field is a single atomic with a single producer:
//!
//! | field      | written by            | consumed by                  |
//! |------------|-----------------------|------------------------------|
//! | `position` | quadrature interrupt  | `count` / `set_count`        |
//! | `delta`    | quadrature interrupt  | `diff` (swap to 0 on clear)  |
//! | `status`   | both interrupts, per bit | `test` / `clear_all`      |
//! | `decoder`  | quadrature interrupt  | never read outside           |
//! | `debouncer`| button interrupt      | `button_state` (peek)        |
//! | `button`   | setup only            | `on_button_edge` gate        |
//!
//! No update spans two fields in a way the foreground could observe half
//! of, so no interrupt masking is needed. `position` and `delta` wrap on
//! overflow.

use core::sync::atomic::{AtomicBool, AtomicI16, Ordering};

use crate::button::{ButtonEdge, ButtonState, Debouncer};
use crate::quadrature::{Direction, QuadratureDecoder};
use crate::status::{Flag, Status, StatusRegister};

pub struct EncoderState {
    position: AtomicI16,
    delta: AtomicI16,
    status: StatusRegister,
    decoder: QuadratureDecoder,
    debouncer: Debouncer,
    button: AtomicBool,
}

impl EncoderState {
    /// Const so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            position: AtomicI16::new(0),
            delta: AtomicI16::new(0),
            status: StatusRegister::new(),
            decoder: QuadratureDecoder::new(),
            debouncer: Debouncer::new(),
            button: AtomicBool::new(false),
        }
    }

    /// Return to power-on values, anchoring the button windows at `now`.
    /// Without `button`, every button edge is rejected untouched.
    ///
    /// Call before interrupts can reach this state.
    pub fn reset(&self, now: u32, button: bool) {
        self.button.store(button, Ordering::Release);
        self.status.clear_all();
        self.position.store(0, Ordering::Relaxed);
        self.delta.store(0, Ordering::Relaxed);
        self.decoder.reset();
        self.debouncer.reset(now);
    }

    // Interrupt side

    /// Quadrature handler: one edge on A or B with both pin levels sampled.
    pub fn on_quadrature_edge(&self, a: bool, b: bool) -> Option<Direction> {
        let direction = self.decoder.on_edge(a, b)?;
        let step = direction.step();
        self.position.fetch_add(step, Ordering::AcqRel);
        self.delta.fetch_add(step, Ordering::AcqRel);
        self.status.raise(Flag::Moved);
        Some(direction)
    }

    /// Button handler: one edge on the button line at `now` (µs).
    pub fn on_button_edge(&self, now: u32) -> ButtonEdge {
        if !self.has_button() {
            return ButtonEdge::Rejected;
        }
        let edge = self.debouncer.on_edge(now);
        match edge {
            ButtonEdge::Rejected => {}
            ButtonEdge::Pressed => self.status.raise(Flag::Pressed),
            ButtonEdge::Clicked => self.status.raise(Flag::Clicked),
            ButtonEdge::DoubleClicked => {
                self.status.raise(Flag::Clicked);
                self.status.raise(Flag::DoubleClicked);
            }
        }
        edge
    }

    // Foreground side

    pub fn count(&self) -> i16 {
        self.position.load(Ordering::Acquire)
    }

    pub fn set_count(&self, count: i16) {
        self.position.store(count, Ordering::Release);
    }

    /// Net indents since the delta was last cleared.
    pub fn diff(&self, clear_on_read: bool) -> i16 {
        if clear_on_read {
            self.delta.swap(0, Ordering::AcqRel)
        } else {
            self.delta.load(Ordering::Acquire)
        }
    }

    pub fn flag(&self, flag: Flag, clear_on_read: bool) -> bool {
        self.status.test(flag, clear_on_read)
    }

    pub fn clear(&self) {
        self.status.clear_all();
    }

    pub fn status(&self) -> Status {
        self.status.snapshot()
    }

    pub fn has_button(&self) -> bool {
        self.button.load(Ordering::Acquire)
    }

    pub fn button_state(&self) -> ButtonState {
        self.debouncer.state()
    }
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::new()
    }
}
