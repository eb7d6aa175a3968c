//! Collaborator traits
//!
//! These traits define the interface between the display coordinator
//! and the drivers it consumes.

pub mod button;
pub mod clock;
pub mod display;
pub mod fan;
pub mod sensor;

pub use button::{ButtonEdges, ButtonSource};
pub use clock::Clock;
pub use display::SegmentDisplay;
pub use fan::FanControl;
pub use sensor::{Reading, SensorSource};
