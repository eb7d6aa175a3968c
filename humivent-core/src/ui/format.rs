//! Display text for each mode
//!
//! Labels are spelled for a 7-segment display ("PErc", "hPA"). Readings
//! are truncated toward zero.

use core::fmt::Write;

use heapless::String;

use super::mode::DisplayMode;
use crate::traits::SensorSource;

/// Maximum display text length
pub const TEXT_CAPACITY: usize = 32;

/// Text for one display update
pub type DisplayText = String<TEXT_CAPACITY>;

/// Render the text for `mode`
///
/// `fan_label` is only used by the fan mode.
pub fn render<S: SensorSource>(mode: DisplayMode, sensors: &S, fan_label: &str) -> DisplayText {
    let mut text = DisplayText::new();

    // Numeric templates always fit in TEXT_CAPACITY
    let _ = match mode {
        DisplayMode::HumidityInside => {
            write!(text, "Hin {} PErc", truncate(sensors.inside().humidity))
        }
        DisplayMode::HumidityOutside => {
            write!(text, "Hout  {} PErc", truncate(sensors.outside().humidity))
        }
        DisplayMode::PressureInside => {
            write!(text, "Pin {} hPA", truncate(sensors.inside().pressure))
        }
        DisplayMode::PressureOutside => {
            write!(text, "Pout  {} hPA", truncate(sensors.outside().pressure))
        }
        DisplayMode::TemperatureInside => {
            write!(text, "tin {} *C", truncate(sensors.inside().temperature))
        }
        DisplayMode::TemperatureOutside => {
            write!(text, "tout  {} *C", truncate(sensors.outside().temperature))
        }
        DisplayMode::HumidityInsideSimple => {
            write!(text, " {:3}", truncate(sensors.inside().humidity))
        }
        DisplayMode::FanMode => {
            push_truncated(&mut text, fan_label);
            Ok(())
        }
    };

    text
}

/// Whole units, toward zero; NaN reads as 0
fn truncate(value: f32) -> i32 {
    value as i32
}

/// Append as much of `s` as fits, never splitting a character
fn push_truncated(text: &mut DisplayText, s: &str) {
    for c in s.chars() {
        if text.push(c).is_err() {
            break;
        }
    }
}
