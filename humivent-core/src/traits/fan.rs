//! Fan controller trait

/// Trait for the fan controller as seen by the user interface
///
/// The UI only observes the mode and asks for the next one; how the
/// fan is driven in each mode is up to the implementation.
pub trait FanControl {
    /// Operating mode, compared for change detection
    type Mode: Copy + PartialEq;

    /// Current operating mode
    fn mode(&self) -> Self::Mode;

    /// Short label for the current mode, suitable for the display
    fn mode_label(&self) -> &str;

    /// Advance to the next operating mode
    fn cycle_modes(&mut self);
}
