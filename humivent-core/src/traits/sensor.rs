//! Climate sensor trait

/// One climate sensor snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Relative humidity (%)
    pub humidity: f32,
    /// Temperature (°C)
    pub temperature: f32,
    /// Barometric pressure (hPa)
    pub pressure: f32,
}

impl Reading {
    /// Create a snapshot
    pub const fn new(humidity: f32, temperature: f32, pressure: f32) -> Self {
        Self {
            humidity,
            temperature,
            pressure,
        }
    }
}

/// Read-only access to the latest inside and outside readings
pub trait SensorSource {
    /// Latest reading of the sensor inside the room
    fn inside(&self) -> Reading;

    /// Latest reading of the sensor outside the room
    fn outside(&self) -> Reading;
}
