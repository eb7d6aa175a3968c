//! Push button click detection
//!
//! Debounces a GPIO input and turns presses into click and long-click
//! edges for the display coordinator.

use humivent_core::traits::{ButtonEdges, ButtonSource};
use humivent_hal::InputPin;

/// Time the input must be stable before a change is accepted
pub const DEBOUNCE_MS: u64 = 50;

/// Hold time after which a press counts as a long click
pub const LONG_CLICK_MS: u64 = 800;

/// Debounced click and long-click detector
///
/// A release before [`LONG_CLICK_MS`] produces a click. Holding for
/// [`LONG_CLICK_MS`] produces one long click while still held, and the
/// following release produces nothing.
pub struct ClickDetector<P> {
    pin: P,
    /// If true, pressed = pin LOW (button to ground with pull-up)
    active_low: bool,
    /// Raw reading on the previous poll
    raw: bool,
    /// When the raw reading last changed (ms)
    raw_since_ms: u64,
    /// Debounced state
    pressed: bool,
    /// When the current press started (ms)
    press_start_ms: u64,
    /// Current press already reported (long click, or held since boot)
    consumed: bool,
}

impl<P: InputPin> ClickDetector<P> {
    /// Create a new detector
    ///
    /// # Arguments
    /// - `pin`: The button input
    /// - `active_low`: If true, the button pulls the pin LOW when pressed
    /// - `now_ms`: Current time
    ///
    /// A button already held at creation is ignored until released.
    pub fn new(pin: P, active_low: bool, now_ms: u64) -> Self {
        let mut detector = Self {
            pin,
            active_low,
            raw: false,
            raw_since_ms: now_ms,
            pressed: false,
            press_start_ms: now_ms,
            consumed: false,
        };
        let held = detector.read();
        detector.raw = held;
        detector.pressed = held;
        detector.consumed = held;
        detector
    }

    /// Create a detector for a button to ground with pull-up
    pub fn new_active_low(pin: P, now_ms: u64) -> Self {
        Self::new(pin, true, now_ms)
    }

    /// Create a detector for a button to supply with pull-down
    pub fn new_active_high(pin: P, now_ms: u64) -> Self {
        Self::new(pin, false, now_ms)
    }

    /// Debounced pressed state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn read(&self) -> bool {
        self.pin.is_high() != self.active_low
    }
}

impl<P: InputPin> ButtonSource for ClickDetector<P> {
    fn poll(&mut self, now_ms: u64) -> ButtonEdges {
        let raw = self.read();
        if raw != self.raw {
            self.raw = raw;
            self.raw_since_ms = now_ms;
        }

        let mut edges = ButtonEdges::NONE;

        if self.raw != self.pressed && now_ms.saturating_sub(self.raw_since_ms) >= DEBOUNCE_MS {
            self.pressed = self.raw;

            if self.pressed {
                self.press_start_ms = self.raw_since_ms;
                self.consumed = false;
            } else if !self.consumed {
                edges.click = true;
            }
        }

        if self.pressed
            && !self.consumed
            && now_ms.saturating_sub(self.press_start_ms) >= LONG_CLICK_MS
        {
            self.consumed = true;
            edges.long_click = true;
        }

        edges
    }
}
