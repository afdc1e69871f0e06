//! Error type for encoder setup and the edge pumps.
//!
//! The decoding core itself is total and never fails; only registration
//! and platform pin access can. No `alloc` - every variant is fixed-size.

use core::fmt;

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Another encoder already owns the interrupt dispatch slot.
    AlreadyRegistered,

    /// An edge arrived before any encoder was registered.
    NotRegistered,

    /// The platform pin failed to report its level or wait for an edge.
    Pin,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::AlreadyRegistered => write!(f, "an encoder is already registered"),
            Error::NotRegistered => write!(f, "no encoder registered"),
            Error::Pin => write!(f, "pin error"),
        }
    }
}

/// Collapse any `embedded-hal` pin error into [`Error::Pin`].
pub(crate) fn pin_error<E: embedded_hal::digital::Error>(_: E) -> Error {
    Error::Pin
}
