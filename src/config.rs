//! Compile-time constants for the encoder core and the firmware.
//!
//! Timing windows and decode patterns are fixed; they are not meant to be
//! tuned at runtime.

// Button timing

/// Minimum gap between two accepted button transitions (µs).
/// Edges arriving sooner are treated as contact bounce and dropped.
pub const DEBOUNCE_MICROS: u32 = 10_000;

/// Maximum gap between two click releases that still counts as a
/// double-click (µs). Compared with `<=`.
pub const DOUBLE_CLICK_MICROS: u32 = 500_000;

// Quadrature decoding
//
// The edge history holds the last four 2-bit samples (A in the high bit,
// B in the low bit), newest in the low bits. One full detent reads:
//
//   clockwise          01 00 10 11
//   counter-clockwise  10 00 01 11

/// History byte that completes one clockwise indent.
pub const CLOCKWISE_PATTERN: u8 = 0b0100_1011;

/// History byte that completes one counter-clockwise indent.
pub const COUNTER_CLOCKWISE_PATTERN: u8 = 0b1000_0111;

// Foreground

/// One slot per event kind in [`crate::encoder::Encoder::take_events`].
pub const EVENT_CAPACITY: usize = 4;

/// How often the firmware foreground drains encoder events (ms).
pub const POLL_INTERVAL_MS: u64 = 10;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Actual `embassy_nrf::peripherals::*` pins are picked in `main.rs`.
// All three lines are active-low with the internal pull-up enabled.
//
//   Encoder A      → P0.11
//   Encoder B      → P0.12
//   Encoder button → P0.24
