//! Settings type definitions
//!
//! The settings record parametrizes the fan controller. Every value that
//! leaves this module through the public API has been sanitized: numeric
//! fields are clamped into range and sensor names hold no control bytes
//! or double quotes.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size of a sensor name buffer, including the terminator
pub const SENSOR_NAME_MAX_LENGTH: usize = 32;

// Compiled-in defaults
pub const DEFAULT_AUTO_ON_DH: u8 = 15;
pub const DEFAULT_AUTO_OFF_DH: u8 = 20;
pub const DEFAULT_CHECK_INTERVAL_S: u16 = 30;
pub const DEFAULT_ALTITUDE_M: u16 = 0;
pub const DEFAULT_INSIDE_SENSOR_NAME: &str = "inside";
pub const DEFAULT_OUTSIDE_SENSOR_NAME: &str = "outside";
pub const DEFAULT_REVERSE_STUCK_CHECK_INTERVAL_S: i16 = 15;
pub const DEFAULT_REVERSE_STUCK_MAX_TEMPERATURE_C: i16 = 20;

// Valid ranges
pub const MAX_HUMIDITY_DIFFERENCE: u8 = 100;
pub const MIN_CHECK_INTERVAL_S: u16 = 5;
pub const MAX_CHECK_INTERVAL_S: u16 = 10 * 60;
pub const MAX_ALTITUDE_M: u16 = 9000;
pub const MAX_REVERSE_STUCK_CHECK_INTERVAL_S: i16 = 180;
pub const MAX_REVERSE_STUCK_MAX_TEMPERATURE_C: i16 = 50;

/// Replacement for bytes that may not appear in a sensor name
const NAME_REPLACEMENT: u8 = b'_';

/// Null-terminated sensor name in a fixed buffer
///
/// Names are shown to users and quoted in status output, so control
/// characters and double quotes never survive sanitization.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorName {
    bytes: [u8; SENSOR_NAME_MAX_LENGTH],
}

impl SensorName {
    /// Create a name from text, truncated to fit with its terminator
    ///
    /// The result is not sanitized; call [`SensorName::sanitize`] or go
    /// through [`Settings::update`].
    pub fn new(text: &str) -> Self {
        let mut bytes = [0u8; SENSOR_NAME_MAX_LENGTH];
        let len = text.len().min(SENSOR_NAME_MAX_LENGTH - 1);
        bytes[..len].copy_from_slice(&text.as_bytes()[..len]);
        Self { bytes }
    }

    /// Wrap a raw buffer exactly as stored
    pub const fn from_bytes(bytes: [u8; SENSOR_NAME_MAX_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Raw buffer, including the terminator and anything after it
    pub const fn as_bytes(&self) -> &[u8; SENSOR_NAME_MAX_LENGTH] {
        &self.bytes
    }

    /// Length of the name up to (not including) the terminator
    pub fn len(&self) -> usize {
        self.bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(SENSOR_NAME_MAX_LENGTH)
    }

    /// Check if the name is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The name as text
    ///
    /// A name holding bytes that are not valid UTF-8 yields the longest
    /// valid prefix.
    pub fn as_str(&self) -> &str {
        let name = &self.bytes[..self.len()];
        match core::str::from_utf8(name) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&name[..e.valid_up_to()]).unwrap_or(""),
        }
    }

    /// Force a terminator and replace forbidden bytes with `_`
    ///
    /// Scans up to the first terminator only; bytes behind it are kept
    /// as they are.
    pub fn sanitize(&mut self) {
        self.bytes[SENSOR_NAME_MAX_LENGTH - 1] = 0;

        for byte in self.bytes.iter_mut().take_while(|b| **b != 0) {
            if !is_allowed_name_byte(*byte) {
                *byte = NAME_REPLACEMENT;
            }
        }
    }
}

/// Anything from the space upward except the double quote
fn is_allowed_name_byte(byte: u8) -> bool {
    byte >= b' ' && byte != b'"'
}

impl fmt::Debug for SensorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorName {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// Controller settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Humidity difference (percentage points) that turns the fan on
    pub auto_on_dh: u8,
    /// Humidity difference (percentage points) that turns the fan off
    pub auto_off_dh: u8,
    /// Seconds between sensor reads
    pub sensor_check_interval_s: u16,
    /// Installation altitude in meters, for pressure compensation
    pub altitude_m: u16,
    /// Display name of the inside sensor
    pub inside_sensor_name: SensorName,
    /// Display name of the outside sensor
    pub outside_sensor_name: SensorName,
    /// Seconds between reverse-stuck checks (0 disables)
    pub reverse_stuck_check_interval_s: i16,
    /// Outside temperature (°C) above which the reverse-stuck check is skipped
    pub reverse_stuck_max_temperature_c: i16,
}

impl Default for Settings {
    /// Compiled-in defaults, sanitized
    fn default() -> Self {
        Self::defaults().sanitized()
    }
}

impl Settings {
    /// Compiled-in defaults exactly as declared
    ///
    /// The declared on/off thresholds are inverted, so this record is not
    /// itself valid; [`Settings::default`] is.
    pub fn defaults() -> Self {
        Self {
            auto_on_dh: DEFAULT_AUTO_ON_DH,
            auto_off_dh: DEFAULT_AUTO_OFF_DH,
            sensor_check_interval_s: DEFAULT_CHECK_INTERVAL_S,
            altitude_m: DEFAULT_ALTITUDE_M,
            inside_sensor_name: SensorName::new(DEFAULT_INSIDE_SENSOR_NAME),
            outside_sensor_name: SensorName::new(DEFAULT_OUTSIDE_SENSOR_NAME),
            reverse_stuck_check_interval_s: DEFAULT_REVERSE_STUCK_CHECK_INTERVAL_S,
            reverse_stuck_max_temperature_c: DEFAULT_REVERSE_STUCK_MAX_TEMPERATURE_C,
        }
    }

    /// Clamp every field into its valid range
    ///
    /// Idempotent. Callers cannot tell whether anything was corrected.
    pub fn sanitize(&mut self) {
        self.auto_on_dh = self.auto_on_dh.min(MAX_HUMIDITY_DIFFERENCE);
        self.auto_off_dh = self.auto_off_dh.min(MAX_HUMIDITY_DIFFERENCE);

        // auto_on_dh must be greater than or equal to auto_off_dh
        if self.auto_off_dh > self.auto_on_dh {
            core::mem::swap(&mut self.auto_on_dh, &mut self.auto_off_dh);
        }

        self.sensor_check_interval_s = self
            .sensor_check_interval_s
            .clamp(MIN_CHECK_INTERVAL_S, MAX_CHECK_INTERVAL_S);

        self.altitude_m = self.altitude_m.min(MAX_ALTITUDE_M);

        self.inside_sensor_name.sanitize();
        self.outside_sensor_name.sanitize();

        self.reverse_stuck_check_interval_s = self
            .reverse_stuck_check_interval_s
            .clamp(0, MAX_REVERSE_STUCK_CHECK_INTERVAL_S);

        self.reverse_stuck_max_temperature_c = self
            .reverse_stuck_max_temperature_c
            .clamp(0, MAX_REVERSE_STUCK_MAX_TEMPERATURE_C);
    }

    /// Sanitized copy
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }

    /// Apply field writes, then re-validate
    pub fn update<F: FnOnce(&mut Settings)>(&mut self, f: F) {
        f(self);
        self.sanitize();
    }
}

/// Human-readable dump, one field per line
impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Settings:")?;
        writeln!(f, "  auto on humidity difference:    {}", self.auto_on_dh)?;
        writeln!(f, "  auto off humidity difference:   {}", self.auto_off_dh)?;
        writeln!(f, "  sensor check interval:          {}", self.sensor_check_interval_s)?;
        writeln!(f, "  altitude:                       {}", self.altitude_m)?;
        writeln!(f, "  inside sensor name:             {}", self.inside_sensor_name.as_str())?;
        writeln!(f, "  outside sensor name:            {}", self.outside_sensor_name.as_str())?;
        writeln!(f, "  reverse stuck check interval:   {}", self.reverse_stuck_check_interval_s)?;
        writeln!(f, "  reverse stuck max temperature:  {}", self.reverse_stuck_max_temperature_c)
    }
}
