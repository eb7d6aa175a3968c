//! Humivent Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware contracts the controller logic
//! consumes. Board support code implements them on top of the chip HAL;
//! host tests implement them in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  humivent-core / humivent-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  humivent-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  board flash  │       │  RamStorage   │
//! │  EEPROM emu   │       │  (host/tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`storage::RecordStorage`] - Fixed-size persistent record area

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use storage::{RamStorage, RecordStorage, StorageError};
