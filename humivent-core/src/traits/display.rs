//! Numeric display trait

/// Highest brightness level a display accepts
pub const MAX_BRIGHTNESS: u8 = 7;

/// Trait for the scrolling 7-segment display
///
/// Rendering, scrolling and transition effects are the driver's business.
/// Callers only choose what to show and how bright.
pub trait SegmentDisplay {
    /// Set the brightness level (0-7) and whether the display is lit
    fn set_brightness(&mut self, level: u8, on: bool);

    /// Replace the shown text immediately
    fn set_text(&mut self, text: &str);

    /// Queue text to show after the current text finishes its transition
    fn set_next_text(&mut self, text: &str);
}
