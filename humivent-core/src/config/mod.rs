//! Controller settings
//!
//! Settings type, sanitization rules, and CRC-checked persistence.

pub mod record;
pub mod settings;
pub mod store;

pub use record::{PersistedRecord, RECORD_SIZE};
pub use settings::*;
pub use store::{describe, ConfigStore, LoadSource};
