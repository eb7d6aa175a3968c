//! Relay-switched extractor fan
//!
//! The fan motor is switched by a relay on a GPIO pin. The user picks
//! between automatic, forced on and forced off; in automatic mode the
//! relay follows the demand computed by the humidity control loop.

use humivent_core::traits::FanControl;
use humivent_hal::OutputPin;

/// Fan operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FanMode {
    /// Follow the humidity controller
    Auto,
    /// Always on
    On,
    /// Always off
    Off,
}

impl FanMode {
    /// Next mode in the button cycle
    pub fn next(self) -> Self {
        match self {
            FanMode::Auto => FanMode::On,
            FanMode::On => FanMode::Off,
            FanMode::Off => FanMode::Auto,
        }
    }

    /// Label spelled for a 7-segment display
    pub fn label(self) -> &'static str {
        match self {
            FanMode::Auto => "AUto",
            FanMode::On => "On",
            FanMode::Off => "OFF",
        }
    }
}

/// Relay fan output
pub struct RelayFan<P> {
    pin: P,
    mode: FanMode,
    /// Last demand from the humidity controller
    auto_demand: bool,
}

impl<P: OutputPin> RelayFan<P> {
    /// Create a fan in automatic mode with no demand (relay released)
    pub fn new(pin: P) -> Self {
        let mut fan = Self {
            pin,
            mode: FanMode::Auto,
            auto_demand: false,
        };
        fan.apply();
        fan
    }

    /// Switch to a specific mode
    pub fn set_mode(&mut self, mode: FanMode) {
        self.mode = mode;
        self.apply();
    }

    /// Update the humidity controller's demand
    ///
    /// Only drives the relay while in [`FanMode::Auto`].
    pub fn set_auto_demand(&mut self, demand: bool) {
        self.auto_demand = demand;
        self.apply();
    }

    /// Check if the relay is energised
    pub fn is_running(&self) -> bool {
        self.pin.is_set_high()
    }

    fn apply(&mut self) {
        let on = match self.mode {
            FanMode::Auto => self.auto_demand,
            FanMode::On => true,
            FanMode::Off => false,
        };
        self.pin.set_state(on);
    }
}

impl<P: OutputPin> FanControl for RelayFan<P> {
    type Mode = FanMode;

    fn mode(&self) -> FanMode {
        self.mode
    }

    fn mode_label(&self) -> &str {
        self.mode.label()
    }

    fn cycle_modes(&mut self) {
        self.set_mode(self.mode.next());
    }
}
