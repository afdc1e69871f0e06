//! Quadrature decoding over a four-sample edge history.
//!
//! Every edge on A or B pushes one 2-bit symbol into an 8-bit shift
//! register. Only a byte that spells out a complete detent cycle counts as
//! movement; partial or jittery sequences simply never match.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::{CLOCKWISE_PATTERN, COUNTER_CLOCKWISE_PATTERN};

/// Direction of one recognized indent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub const fn step(self) -> i16 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Pack the two pin levels into a symbol, A in the high bit.
pub const fn symbol(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | b as u8
}

/// Shift `symbol` into `history`; the oldest sample falls off the top.
pub const fn push(history: u8, symbol: u8) -> u8 {
    (history << 2) | (symbol & 0b11)
}

/// Match a history byte against the two detent patterns.
pub const fn decode(history: u8) -> Option<Direction> {
    match history {
        CLOCKWISE_PATTERN => Some(Direction::Clockwise),
        COUNTER_CLOCKWISE_PATTERN => Some(Direction::CounterClockwise),
        _ => None,
    }
}

/// Edge history owned by the quadrature interrupt.
///
/// Only the quadrature handler touches the history, and the platform
/// serializes that handler, so plain load/store is enough.
pub struct QuadratureDecoder {
    history: AtomicU8,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            history: AtomicU8::new(0),
        }
    }

    /// Record one sample and report a completed indent, if any.
    pub fn on_edge(&self, a: bool, b: bool) -> Option<Direction> {
        let history = push(self.history.load(Ordering::Relaxed), symbol(a, b));
        self.history.store(history, Ordering::Relaxed);
        decode(history)
    }

    pub fn reset(&self) {
        self.history.store(0, Ordering::Relaxed);
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const CCW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];

    fn feed(decoder: &QuadratureDecoder, samples: &[(bool, bool)]) -> Option<Direction> {
        let mut last = None;
        for &(a, b) in samples {
            last = decoder.on_edge(a, b);
        }
        last
    }

    #[test]
    fn symbol_puts_a_in_high_bit() {
        assert_eq!(symbol(false, false), 0b00);
        assert_eq!(symbol(false, true), 0b01);
        assert_eq!(symbol(true, false), 0b10);
        assert_eq!(symbol(true, true), 0b11);
    }

    #[test]
    fn push_drops_oldest_sample() {
        assert_eq!(push(0b1100_0000, 0b01), 0b0000_0001);
        assert_eq!(push(0b0100_1011, 0b10), 0b0010_1110);
    }

    #[test]
    fn only_the_two_patterns_decode() {
        for history in 0..=u8::MAX {
            let expected = match history {
                0b0100_1011 => Some(Direction::Clockwise),
                0b1000_0111 => Some(Direction::CounterClockwise),
                _ => None,
            };
            assert_eq!(decode(history), expected, "history {:#010b}", history);
        }
    }

    #[test]
    fn full_clockwise_cycle_is_one_indent() {
        let decoder = QuadratureDecoder::new();
        assert_eq!(decoder.on_edge(CW[0].0, CW[0].1), None);
        assert_eq!(decoder.on_edge(CW[1].0, CW[1].1), None);
        assert_eq!(decoder.on_edge(CW[2].0, CW[2].1), None);
        assert_eq!(decoder.on_edge(CW[3].0, CW[3].1), Some(Direction::Clockwise));
    }

    #[test]
    fn full_counter_clockwise_cycle_is_one_indent() {
        let decoder = QuadratureDecoder::new();
        assert_eq!(feed(&decoder, &CCW), Some(Direction::CounterClockwise));
    }

    #[test]
    fn truncated_cycle_is_ignored() {
        let decoder = QuadratureDecoder::new();
        // Jitter at the detent: B bounces before A moves.
        let jitter = [(true, true), (true, false), (true, true), (true, false), (true, true)];
        assert_eq!(feed(&decoder, &jitter), None);
    }

    #[test]
    fn back_to_back_indents_each_decode() {
        let decoder = QuadratureDecoder::new();
        assert_eq!(feed(&decoder, &CW), Some(Direction::Clockwise));
        assert_eq!(feed(&decoder, &CW), Some(Direction::Clockwise));
        assert_eq!(feed(&decoder, &CCW), Some(Direction::CounterClockwise));
    }

    #[test]
    fn reset_forgets_partial_history() {
        let decoder = QuadratureDecoder::new();
        feed(&decoder, &CW[..3]);
        decoder.reset();
        assert_eq!(decoder.on_edge(CW[3].0, CW[3].1), None);
    }
}
