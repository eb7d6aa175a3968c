//! Monotonic time source

/// Monotonic millisecond clock
///
/// Injected so timeouts and dimming can be driven by simulated time.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin; never decreases
    fn now_ms(&self) -> u64;
}
