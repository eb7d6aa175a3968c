//! Backlight dimmer
//!
//! Steps the display brightness at a fixed cadence: ramps down after a
//! period of inactivity, switches the display off once fully dimmed and
//! inactive for longer, and ramps back up (or snaps to full on fresh
//! activity) otherwise.

use super::{BRIGHTNESS_STEP_MS, DIM_TIMEOUT_MS, MAX_BRIGHTNESS, OFF_TIMEOUT_MS, SNAP_WINDOW_MS};

/// Brightness command for the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backlight {
    /// Brightness level (0-7)
    pub level: u8,
    /// Whether the display is lit
    pub on: bool,
}

impl Backlight {
    /// Display switched off
    pub const OFF: Self = Self { level: 0, on: false };

    /// Display lit at `level`
    pub const fn lit(level: u8) -> Self {
        Self { level, on: true }
    }
}

/// Backlight state machine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dimmer {
    brightness: u8,
    display_on: bool,
    /// Time of the last cadence step (ms)
    last_update_ms: u64,
}

impl Dimmer {
    /// Start at full brightness, display on
    pub const fn new(now_ms: u64) -> Self {
        Self {
            brightness: MAX_BRIGHTNESS,
            display_on: true,
            last_update_ms: now_ms,
        }
    }

    /// Current brightness level (0-7)
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Check if the display is lit
    pub fn is_on(&self) -> bool {
        self.display_on
    }

    /// Current state as a display command
    pub fn backlight(&self) -> Backlight {
        Backlight {
            level: self.brightness,
            on: self.display_on,
        }
    }

    /// Run one step if the cadence interval has passed
    ///
    /// - `inactivity_ms`: time since the last button press
    /// - `hold_bright`: suppress dimming (a transient mode is on screen)
    ///
    /// Returns the command to push to the display when anything changed.
    pub fn update(&mut self, now_ms: u64, inactivity_ms: u64, hold_bright: bool) -> Option<Backlight> {
        if now_ms.saturating_sub(self.last_update_ms) <= BRIGHTNESS_STEP_MS {
            return None;
        }
        self.last_update_ms = now_ms;

        self.step(inactivity_ms, hold_bright)
    }

    /// One cadence step, ignoring the cadence timer
    pub fn step(&mut self, inactivity_ms: u64, hold_bright: bool) -> Option<Backlight> {
        let dim = inactivity_ms > DIM_TIMEOUT_MS && !hold_bright;
        let turn_off = self.brightness == 0 && dim && inactivity_ms > OFF_TIMEOUT_MS;

        if turn_off {
            if !self.display_on {
                return None;
            }
            log_info!("Turning off display");
            self.brightness = 0;
            self.display_on = false;
            return Some(Backlight::OFF);
        }

        if !self.display_on {
            log_info!("Turning on display");
        }
        self.display_on = true;

        if dim && self.brightness > 0 {
            self.brightness -= 1;
            log_debug!("Decreasing display brightness to level {}", self.brightness);
            Some(Backlight::lit(self.brightness))
        } else if !dim && self.brightness < MAX_BRIGHTNESS {
            if inactivity_ms < SNAP_WINDOW_MS {
                // the user is active, light up immediately
                self.brightness = MAX_BRIGHTNESS;
            } else {
                self.brightness += 1;
            }
            log_debug!("Increasing display brightness to level {}", self.brightness);
            Some(Backlight::lit(self.brightness))
        } else {
            None
        }
    }
}
