//! Status flag register shared between interrupt and foreground context.
//!
//! Each flag has exactly one producer (the quadrature or the button
//! handler), which only ever sets it. The foreground only ever clears.
//! Both sides use single atomic read-modify-write operations on the one
//! byte, so a flag raised by an interrupt between a foreground read and
//! its clear is never lost for any *other* flag.

use core::sync::atomic::{AtomicU8, Ordering};

/// One bit of the status register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flag {
    /// A full indent was decoded.
    Moved,
    /// The button went down.
    Pressed,
    /// The button came back up, completing a click.
    Clicked,
    /// A click completed within the double-click window of the previous one.
    DoubleClicked,
}

impl Flag {
    pub const ALL: [Flag; 4] = [Flag::Moved, Flag::Pressed, Flag::Clicked, Flag::DoubleClicked];

    const fn mask(self) -> u8 {
        match self {
            Flag::Moved => 1 << 0,
            Flag::Pressed => 1 << 1,
            Flag::Clicked => 1 << 2,
            Flag::DoubleClicked => 1 << 3,
        }
    }
}

const ALL_MASK: u8 = Flag::Moved.mask()
    | Flag::Pressed.mask()
    | Flag::Clicked.mask()
    | Flag::DoubleClicked.mask();

/// Point-in-time copy of all four flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub moved: bool,
    pub pressed: bool,
    pub clicked: bool,
    pub double_clicked: bool,
}

impl Status {
    fn from_bits(bits: u8) -> Self {
        Self {
            moved: bits & Flag::Moved.mask() != 0,
            pressed: bits & Flag::Pressed.mask() != 0,
            clicked: bits & Flag::Clicked.mask() != 0,
            double_clicked: bits & Flag::DoubleClicked.mask() != 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.moved || self.pressed || self.clicked || self.double_clicked)
    }
}

/// Atomic flag byte.
pub struct StatusRegister {
    bits: AtomicU8,
}

impl StatusRegister {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// Set `flag`. Interrupt side.
    pub fn raise(&self, flag: Flag) {
        self.bits.fetch_or(flag.mask(), Ordering::AcqRel);
    }

    /// Whether `flag` is set; with `clear_on_read` the bit is cleared in the
    /// same atomic operation that reads it.
    pub fn test(&self, flag: Flag, clear_on_read: bool) -> bool {
        let bits = if clear_on_read {
            self.bits.fetch_and(!flag.mask(), Ordering::AcqRel)
        } else {
            self.bits.load(Ordering::Acquire)
        };
        bits & flag.mask() != 0
    }

    /// Drop all four flags at once.
    pub fn clear_all(&self) {
        self.bits.fetch_and(!ALL_MASK, Ordering::AcqRel);
    }

    pub fn snapshot(&self) -> Status {
        Status::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl Default for StatusRegister {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_start_clear() {
        let reg = StatusRegister::new();
        assert!(reg.snapshot().is_empty());
        for flag in Flag::ALL {
            assert!(!reg.test(flag, false));
        }
    }

    #[test]
    fn peek_leaves_flag_set() {
        let reg = StatusRegister::new();
        reg.raise(Flag::Moved);
        for _ in 0..5 {
            assert!(reg.test(Flag::Moved, false));
        }
        assert!(reg.test(Flag::Moved, true));
        assert!(!reg.test(Flag::Moved, true));
    }

    #[test]
    fn clearing_one_flag_keeps_the_others() {
        let reg = StatusRegister::new();
        reg.raise(Flag::Moved);
        reg.raise(Flag::Clicked);

        assert!(reg.test(Flag::Clicked, true));

        let status = reg.snapshot();
        assert!(status.moved);
        assert!(!status.clicked);
    }

    #[test]
    fn raise_is_idempotent() {
        let reg = StatusRegister::new();
        reg.raise(Flag::Pressed);
        reg.raise(Flag::Pressed);
        assert!(reg.test(Flag::Pressed, true));
        assert!(!reg.test(Flag::Pressed, false));
    }

    #[test]
    fn clear_all_drops_every_flag() {
        let reg = StatusRegister::new();
        for flag in Flag::ALL {
            reg.raise(flag);
        }
        assert_eq!(
            reg.snapshot(),
            Status {
                moved: true,
                pressed: true,
                clicked: true,
                double_clicked: true,
            }
        );

        reg.clear_all();
        assert!(reg.snapshot().is_empty());
    }
}
