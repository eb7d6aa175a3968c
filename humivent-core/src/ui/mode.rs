//! Display mode state machine
//!
//! What the display shows is a function of the current mode, the mode to
//! restore after a transient interrupt, and an event.

/// Display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Compact inside humidity readout; the idle mode
    HumidityInsideSimple,
    /// Inside humidity with label
    HumidityInside,
    /// Outside humidity with label
    HumidityOutside,
    /// Inside temperature
    TemperatureInside,
    /// Outside temperature
    TemperatureOutside,
    /// Inside pressure
    PressureInside,
    /// Outside pressure
    PressureOutside,
    /// Fan mode label, shown after the fan mode changed
    FanMode,
}

impl DisplayMode {
    /// Mode the UI rests in and falls back to
    pub const IDLE: Self = DisplayMode::HumidityInsideSimple;

    /// Check if this mode is entered by an external event and reverts on its own
    pub fn is_transient(&self) -> bool {
        matches!(self, DisplayMode::FanMode)
    }

    /// Next mode on the click ring
    ///
    /// The ring loops back to `HumidityInside`; the idle mode is only an
    /// entry point. The transient mode is not on the ring and maps to itself.
    pub fn next_in_ring(self) -> Self {
        use DisplayMode::*;

        match self {
            HumidityInsideSimple => HumidityInside,
            HumidityInside => HumidityOutside,
            HumidityOutside => TemperatureInside,
            TemperatureInside => TemperatureOutside,
            TemperatureOutside => PressureInside,
            PressureInside => PressureOutside,
            PressureOutside => HumidityInside,
            FanMode => FanMode,
        }
    }
}

/// Events that drive mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// Short button click
    Click,
    /// Fan controller switched to another mode
    FanModeChanged,
    /// Fan mode has been on screen too long without a refresh
    FanTimeout,
    /// No button press for too long
    Inactivity,
}

/// Current and restorable display mode
///
/// `last_mode` is never `FanMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeState {
    /// Mode on screen
    pub mode: DisplayMode,
    /// Mode to restore when the transient mode ends
    pub last_mode: DisplayMode,
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeState {
    /// Start in the idle mode
    pub const fn new() -> Self {
        Self {
            mode: DisplayMode::IDLE,
            last_mode: DisplayMode::IDLE,
        }
    }

    /// Mode to return to from the transient mode
    pub fn restore_target(&self) -> DisplayMode {
        if self.last_mode.is_transient() {
            DisplayMode::IDLE
        } else {
            self.last_mode
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: UiEvent) -> Self {
        use DisplayMode::*;
        use UiEvent::*;

        match (self.mode, event) {
            // Clicking away the fan mode restores what was shown before
            (FanMode, Click) => self.with_mode(self.restore_target()),
            (mode, Click) => self.with_mode(mode.next_in_ring()),

            // Another fan change while already showing it keeps last_mode
            (FanMode, FanModeChanged) => self,
            (mode, FanModeChanged) => Self {
                mode: FanMode,
                last_mode: mode,
            },

            (FanMode, FanTimeout) => self.with_mode(self.restore_target()),

            (FanMode, Inactivity) => self,
            (_, Inactivity) => self.with_mode(DisplayMode::IDLE),

            // Default: stay in current state
            _ => self,
        }
    }

    fn with_mode(self, mode: DisplayMode) -> Self {
        Self { mode, ..self }
    }
}
