//! Foreground handle for the registered encoder.
//!
//! Constructing an [`Encoder`] resets the backing [`EncoderState`] and
//! claims the interrupt dispatch slot for it. Every accessor touches a
//! single field or flag, so any of them can race freely with the
//! interrupt handlers.
//!
//! The `is_*` accessors take `clear_on_read`: `true` consumes the flag,
//! `false` peeks and leaves it for the next reader.

use heapless::Vec;

use crate::button::ButtonState;
use crate::config::EVENT_CAPACITY;
use crate::error::Error;
use crate::registry;
use crate::state::EncoderState;
use crate::status::{Flag, Status};

// `take_events` pushes at most one event per flag.
const _: () = assert!(EVENT_CAPACITY >= Flag::ALL.len());

/// Something the foreground should react to, drained by
/// [`Encoder::take_events`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Net indents since the last drain (never zero).
    Rotated(i16),
    Pressed,
    Clicked,
    DoubleClicked,
}

pub struct Encoder {
    state: &'static EncoderState,
}

impl Encoder {
    /// Encoder with only the A/B lines wired up. `now` is the current
    /// microsecond clock.
    pub fn new(state: &'static EncoderState, now: u32) -> Result<Self, Error> {
        Self::setup(state, now, false)
    }

    /// Encoder with A/B plus the pushbutton.
    pub fn with_button(state: &'static EncoderState, now: u32) -> Result<Self, Error> {
        Self::setup(state, now, true)
    }

    fn setup(state: &'static EncoderState, now: u32, has_button: bool) -> Result<Self, Error> {
        // Refuse before touching `state`: if it is the registered one,
        // interrupts are already writing to it.
        if registry::active().is_some() {
            return Err(Error::AlreadyRegistered);
        }
        state.reset(now, has_button);
        registry::register(state)?;
        debug!("encoder setup, button: {}", has_button);
        Ok(Self { state })
    }

    pub fn has_button(&self) -> bool {
        self.state.has_button()
    }

    /// Indents turned since setup or the last [`set_count`](Self::set_count).
    pub fn count(&self) -> i16 {
        self.state.count()
    }

    pub fn set_count(&self, count: i16) {
        self.state.set_count(count);
    }

    /// Net indents since the delta was last cleared.
    pub fn diff(&self, clear_on_read: bool) -> i16 {
        self.state.diff(clear_on_read)
    }

    /// Has the knob moved since the flag was last cleared?
    pub fn is_moved(&self, clear_on_read: bool) -> bool {
        self.state.flag(Flag::Moved, clear_on_read)
    }

    /// Has the button gone down since the flag was last cleared?
    pub fn is_pressed(&self, clear_on_read: bool) -> bool {
        self.state.flag(Flag::Pressed, clear_on_read)
    }

    /// Has a press + release completed?
    pub fn is_clicked(&self, clear_on_read: bool) -> bool {
        self.state.flag(Flag::Clicked, clear_on_read)
    }

    /// Did a click complete within the double-click window of the one before?
    pub fn is_double_clicked(&self, clear_on_read: bool) -> bool {
        self.state.flag(Flag::DoubleClicked, clear_on_read)
    }

    /// Clear Moved, Pressed, Clicked and DoubleClicked together.
    /// Count, delta and button timing are untouched.
    pub fn clear(&self) {
        self.state.clear();
    }

    /// Peek all four flags without clearing any.
    pub fn status(&self) -> Status {
        self.state.status()
    }

    /// Debounced level of the button right now. Always `false` without one.
    pub fn is_button_down(&self) -> bool {
        self.state.has_button() && self.state.button_state() == ButtonState::Pressed
    }

    /// Consume every pending event in a fixed order: rotation, press,
    /// click, double-click. A double-click also reports its click.
    pub fn take_events(&self) -> Vec<InputEvent, EVENT_CAPACITY> {
        let mut events = Vec::new();
        // Pushes below cannot overflow; see the capacity assertion above.

        // Moved is cleared before the delta is swapped out, so an indent
        // landing in between re-raises Moved and is reported next time.
        if self.is_moved(true) {
            let delta = self.diff(true);
            if delta != 0 {
                let _ = events.push(InputEvent::Rotated(delta));
            }
        }
        if self.is_pressed(true) {
            let _ = events.push(InputEvent::Pressed);
        }
        if self.is_clicked(true) {
            let _ = events.push(InputEvent::Clicked);
        }
        if self.is_double_clicked(true) {
            let _ = events.push(InputEvent::DoubleClicked);
        }

        if !events.is_empty() {
            trace!("drained {} encoder events", events.len());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonEdge;
    use crate::registry::tests::lock_slot;

    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const CCW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];

    fn turn(samples: &[(bool, bool)]) {
        for &(a, b) in samples {
            registry::on_quadrature_edge(a, b);
        }
    }

    #[test]
    fn setup_resets_and_registers() {
        static STATE: EncoderState = EncoderState::new();
        let _slot = lock_slot();
        STATE.set_count(42);

        let encoder = Encoder::with_button(&STATE, 0).unwrap();
        assert_eq!(encoder.count(), 0);
        assert!(encoder.has_button());
        assert!(registry::active().is_some());

        registry::unregister();
    }

    #[test]
    fn second_encoder_is_refused() {
        static FIRST: EncoderState = EncoderState::new();
        static SECOND: EncoderState = EncoderState::new();
        let _slot = lock_slot();

        let _first = Encoder::new(&FIRST, 0).unwrap();
        assert!(matches!(
            Encoder::new(&SECOND, 0),
            Err(Error::AlreadyRegistered)
        ));

        registry::unregister();
    }

    #[test]
    fn same_state_is_not_reset_twice() {
        static STATE: EncoderState = EncoderState::new();
        let _slot = lock_slot();

        let encoder = Encoder::with_button(&STATE, 0).unwrap();
        turn(&CW);
        encoder.set_count(7);
        registry::on_button_edge(1_000_000);

        assert!(matches!(
            Encoder::with_button(&STATE, 0),
            Err(Error::AlreadyRegistered)
        ));
        assert_eq!(encoder.count(), 7);
        assert_eq!(encoder.diff(false), 1);
        assert!(encoder.is_moved(false));
        assert!(encoder.is_pressed(false));
        assert!(encoder.is_button_down());

        registry::unregister();
    }

    #[test]
    fn no_button_means_no_button_flags() {
        static STATE: EncoderState = EncoderState::new();
        let _slot = lock_slot();
        let encoder = Encoder::new(&STATE, 0).unwrap();
        assert!(!encoder.has_button());

        for now in [1_000_000, 1_100_000, 1_200_000, 1_300_000] {
            assert_eq!(registry::on_button_edge(now), Some(ButtonEdge::Rejected));
        }
        assert!(!encoder.is_pressed(false));
        assert!(!encoder.is_clicked(false));
        assert!(!encoder.is_double_clicked(false));
        assert!(!encoder.is_button_down());
        assert!(encoder.take_events().is_empty());

        registry::unregister();
    }

    #[test]
    fn moved_peek_then_consume() {
        static STATE: EncoderState = EncoderState::new();
        let _slot = lock_slot();
        let encoder = Encoder::new(&STATE, 0).unwrap();

        turn(&CW);
        assert!(encoder.is_moved(false));
        assert!(encoder.is_moved(false));
        assert!(encoder.is_moved(true));
        assert!(!encoder.is_moved(true));

        registry::unregister();
    }

    #[test]
    fn events_drain_in_order() {
        static STATE: EncoderState = EncoderState::new();
        let _slot = lock_slot();
        let encoder = Encoder::with_button(&STATE, 0).unwrap();

        turn(&CW);
        turn(&CW);
        turn(&CCW);
        registry::on_button_edge(1_000_000);
        registry::on_button_edge(1_100_000);

        let events = encoder.take_events();
        assert_eq!(
            events.as_slice(),
            &[InputEvent::Rotated(1), InputEvent::Pressed, InputEvent::Clicked]
        );
        assert!(encoder.take_events().is_empty());
        assert!(encoder.status().is_empty());
        assert_eq!(encoder.count(), 1);

        registry::unregister();
    }

    #[test]
    fn every_event_kind_fits_one_drain() {
        static STATE: EncoderState = EncoderState::new();
        let _slot = lock_slot();
        let encoder = Encoder::with_button(&STATE, 0).unwrap();

        turn(&CCW);
        for now in [1_000_000, 1_100_000, 1_200_000, 1_300_000] {
            registry::on_button_edge(now);
        }

        let events = encoder.take_events();
        assert!(events.is_full());
        assert_eq!(
            events.as_slice(),
            &[
                InputEvent::Rotated(-1),
                InputEvent::Pressed,
                InputEvent::Clicked,
                InputEvent::DoubleClicked,
            ]
        );

        registry::unregister();
    }

    #[test]
    fn net_zero_rotation_reports_nothing() {
        static STATE: EncoderState = EncoderState::new();
        let _slot = lock_slot();
        let encoder = Encoder::new(&STATE, 0).unwrap();

        turn(&CW);
        turn(&CCW);
        assert!(encoder.take_events().is_empty());
        assert!(!encoder.is_moved(false));

        registry::unregister();
    }

    #[test]
    fn button_down_tracks_debounced_state() {
        static STATE: EncoderState = EncoderState::new();
        let _slot = lock_slot();
        let encoder = Encoder::with_button(&STATE, 0).unwrap();

        assert!(!encoder.is_button_down());
        registry::on_button_edge(1_000_000);
        assert!(encoder.is_button_down());
        // Consuming the Pressed flag does not release the button.
        assert!(encoder.is_pressed(true));
        assert!(encoder.is_button_down());
        registry::on_button_edge(1_050_000);
        assert!(!encoder.is_button_down());

        registry::unregister();
    }
}
