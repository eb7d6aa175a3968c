//! Display coordinator
//!
//! Polled from the main loop. Each tick runs, in order:
//!
//! 1. Backlight cadence step
//! 2. Button polling and event handling
//! 3. Fan mode change detection
//! 4. Per-mode timeout and routine refresh
//!
//! Later stages read the mode and timestamps written by earlier ones in
//! the same tick, so the order is fixed.

use super::dimmer::{Backlight, Dimmer};
use super::format::render;
use super::mode::{DisplayMode, ModeState, UiEvent};
use super::{FAN_MODE_TIMEOUT_MS, INACTIVITY_REVERT_MS, REFRESH_INTERVAL_MS};
use crate::traits::{ButtonSource, Clock, FanControl, SegmentDisplay, SensorSource};

/// Display and button state machine
///
/// Owns the display and the button. The fan and the sensors are shared
/// with the rest of the firmware and lent in on every tick.
pub struct DisplayCoordinator<D, B, M> {
    display: D,
    button: B,
    modes: ModeState,
    dimmer: Dimmer,
    /// Time of the last button press (ms)
    last_button_press_ms: u64,
    /// Time of the last display text update (ms)
    last_display_update_ms: u64,
    /// Fan mode seen on the previous tick
    last_fan_mode: M,
}

impl<D, B, M> DisplayCoordinator<D, B, M>
where
    D: SegmentDisplay,
    B: ButtonSource,
    M: Copy + PartialEq,
{
    /// Create a coordinator in the idle mode at full brightness
    ///
    /// Pushes the initial brightness to the display.
    pub fn new<F>(mut display: D, button: B, fan: &F, now_ms: u64) -> Self
    where
        F: FanControl<Mode = M>,
    {
        let dimmer = Dimmer::new(now_ms);
        let backlight = dimmer.backlight();
        display.set_brightness(backlight.level, backlight.on);

        Self {
            display,
            button,
            modes: ModeState::new(),
            dimmer,
            last_button_press_ms: now_ms,
            last_display_update_ms: now_ms,
            last_fan_mode: fan.mode(),
        }
    }

    /// Run one iteration, reading the time from `clock`
    pub fn tick<C, F, S>(&mut self, clock: &C, fan: &mut F, sensors: &S)
    where
        C: Clock,
        F: FanControl<Mode = M>,
        S: SensorSource,
    {
        self.tick_at(clock.now_ms(), fan, sensors);
    }

    /// Run one iteration at `now_ms`
    pub fn tick_at<F, S>(&mut self, now_ms: u64, fan: &mut F, sensors: &S)
    where
        F: FanControl<Mode = M>,
        S: SensorSource,
    {
        self.update_backlight(now_ms);
        self.handle_button(now_ms, fan, sensors);
        self.check_fan_mode(now_ms, fan, sensors);
        self.apply_mode_timeouts(now_ms, fan, sensors);
    }

    /// Mode on screen
    pub fn mode(&self) -> DisplayMode {
        self.modes.mode
    }

    /// Mode to restore when the fan mode times out
    pub fn last_mode(&self) -> DisplayMode {
        self.modes.last_mode
    }

    /// Current brightness level (0-7)
    pub fn brightness(&self) -> u8 {
        self.dimmer.brightness()
    }

    /// Check if the display is lit
    pub fn is_display_on(&self) -> bool {
        self.dimmer.is_on()
    }

    /// Get access to the underlying display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get access to the underlying button
    pub fn button(&self) -> &B {
        &self.button
    }

    fn update_backlight(&mut self, now_ms: u64) {
        let inactivity_ms = now_ms.saturating_sub(self.last_button_press_ms);
        let hold_bright = self.modes.mode.is_transient();

        if let Some(Backlight { level, on }) = self.dimmer.update(now_ms, inactivity_ms, hold_bright) {
            self.display.set_brightness(level, on);
        }
    }

    fn handle_button<F, S>(&mut self, now_ms: u64, fan: &mut F, sensors: &S)
    where
        F: FanControl<Mode = M>,
        S: SensorSource,
    {
        let edges = self.button.poll(now_ms);

        if edges.click {
            self.modes = self.modes.transition(UiEvent::Click);
            self.refresh(now_ms, true, fan, sensors);
            self.last_button_press_ms = now_ms;
        }

        if edges.long_click {
            // Resulting mode change is picked up by change detection
            fan.cycle_modes();
            self.last_button_press_ms = now_ms;
        }
    }

    fn check_fan_mode<F, S>(&mut self, now_ms: u64, fan: &F, sensors: &S)
    where
        F: FanControl<Mode = M>,
        S: SensorSource,
    {
        let fan_mode = fan.mode();
        if fan_mode == self.last_fan_mode {
            return;
        }

        log_info!("Fan mode changed, updating display");
        self.modes = self.modes.transition(UiEvent::FanModeChanged);
        self.last_fan_mode = fan_mode;
        self.refresh(now_ms, true, fan, sensors);
    }

    fn apply_mode_timeouts<F, S>(&mut self, now_ms: u64, fan: &F, sensors: &S)
    where
        F: FanControl<Mode = M>,
        S: SensorSource,
    {
        let since_refresh = now_ms.saturating_sub(self.last_display_update_ms);
        let since_press = now_ms.saturating_sub(self.last_button_press_ms);

        match self.modes.mode {
            DisplayMode::FanMode => {
                if since_refresh >= FAN_MODE_TIMEOUT_MS {
                    log_info!("Fan mode change too long ago");
                    self.modes = self.modes.transition(UiEvent::FanTimeout);
                    self.refresh(now_ms, false, fan, sensors);
                }
            }
            DisplayMode::HumidityInsideSimple => {
                if since_refresh >= REFRESH_INTERVAL_MS {
                    self.refresh(now_ms, false, fan, sensors);
                }
            }
            _ => {
                if since_press >= INACTIVITY_REVERT_MS {
                    log_info!("No user activity, switching display back to simple humidity display mode");
                    self.modes = self.modes.transition(UiEvent::Inactivity);
                    self.refresh(now_ms, false, fan, sensors);
                } else if since_refresh >= REFRESH_INTERVAL_MS {
                    self.refresh(now_ms, false, fan, sensors);
                }
            }
        }
    }

    /// Render the current mode; `immediate` replaces the text, otherwise it is queued
    fn refresh<F, S>(&mut self, now_ms: u64, immediate: bool, fan: &F, sensors: &S)
    where
        F: FanControl<Mode = M>,
        S: SensorSource,
    {
        let text = render(self.modes.mode, sensors, fan.mode_label());

        if immediate {
            self.display.set_text(&text);
        } else {
            self.display.set_next_text(&text);
        }

        self.last_display_update_ms = now_ms;
    }
}
