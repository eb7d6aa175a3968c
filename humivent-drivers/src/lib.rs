//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in humivent-core on top of the humivent-hal pin traits:
//!
//! - Push button click and long-click detection
//! - Relay-switched extractor fan with mode cycling

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod fan;

pub use button::ClickDetector;
pub use fan::{FanMode, RelayFan};
