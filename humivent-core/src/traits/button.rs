//! Push button trait

/// Edge events produced by one poll of the button
///
/// At most one of each kind per poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdges {
    /// A short press was released
    pub click: bool,
    /// A press was held past the long-press threshold
    pub long_click: bool,
}

impl ButtonEdges {
    /// No events
    pub const NONE: Self = Self {
        click: false,
        long_click: false,
    };

    /// A single short click
    pub const fn click() -> Self {
        Self {
            click: true,
            long_click: false,
        }
    }

    /// A single long click
    pub const fn long_click() -> Self {
        Self {
            click: false,
            long_click: true,
        }
    }
}

/// Trait for a debounced push button
///
/// Must be polled once per main-loop iteration.
pub trait ButtonSource {
    /// Sample the button and return the edges detected since the last poll
    fn poll(&mut self, now_ms: u64) -> ButtonEdges;
}
