//! Board-agnostic core logic for the humidity fan controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Settings record: defaults, sanitization, CRC-checked persistence
//! - Display mode state machine and backlight dimmer
//! - The display coordinator polled from the main loop
//! - Collaborator traits (sensors, fan, display, button, clock)

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod config;
pub mod traits;
pub mod ui;
