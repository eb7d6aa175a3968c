//! User interface
//!
//! A button-driven numeric display that multiplexes sensor readings and
//! fan state, with an auto-dimming backlight. Two independent state
//! machines are combined by [`DisplayCoordinator`]:
//!
//! - [`mode::ModeState`]: which reading is shown, with the transient fan
//!   mode interrupt
//! - [`dimmer::Dimmer`]: backlight ramp, dim and shutdown on inactivity

pub mod coordinator;
pub mod dimmer;
pub mod format;
pub mod mode;

pub use coordinator::DisplayCoordinator;
pub use dimmer::{Backlight, Dimmer};
pub use format::{render, DisplayText};
pub use mode::{DisplayMode, ModeState, UiEvent};

pub use crate::traits::display::MAX_BRIGHTNESS;

/// Inactivity after which the backlight starts dimming
pub const DIM_TIMEOUT_MS: u64 = 2 * 60 * 1000;

/// Inactivity after which a fully dimmed display is switched off
pub const OFF_TIMEOUT_MS: u64 = 5 * 60 * 1000;

/// Cadence of backlight steps
pub const BRIGHTNESS_STEP_MS: u64 = 350;

/// Activity this recent snaps the backlight straight to full
pub const SNAP_WINDOW_MS: u64 = 1000;

/// How long the fan mode stays on screen without a refresh
pub const FAN_MODE_TIMEOUT_MS: u64 = 10 * 1000;

/// Inactivity after which a browsing mode falls back to idle
pub const INACTIVITY_REVERT_MS: u64 = 60 * 1000;

/// Interval between routine reading refreshes
pub const REFRESH_INTERVAL_MS: u64 = 5 * 1000;
