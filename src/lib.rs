//! Interrupt-driven rotary encoder + pushbutton decoding.
//!
//! Edge interrupts on the A/B quadrature lines feed a four-sample pattern
//! matcher; edges on the button line feed a time-window debouncer that
//! derives press, click and double-click. Both write into one shared
//! [`EncoderState`] made of independent atomics, and the foreground reads
//! and clears it through an [`Encoder`] handle without ever masking
//! interrupts.
//!
//! The library builds on the host (`cargo test --lib`); the nRF52840
//! firmware in `main.rs` needs the `embedded` feature.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod button;
pub mod config;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod quadrature;
pub mod registry;
pub mod state;
pub mod status;

pub use button::{ButtonEdge, ButtonState};
pub use driver::{run_button, run_quadrature, Clock};
pub use encoder::{Encoder, InputEvent};
pub use error::Error;
pub use quadrature::Direction;
pub use state::EncoderState;
pub use status::{Flag, Status};
