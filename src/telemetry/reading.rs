use crate::sensor::{SensorBoard, SensorError};

/// One sampling pass over the board: three independent scalars, owned by a
/// single publish cycle and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature_celsius: f64,

    pub pressure_hpa: f64,

    pub humidity_percent: f64,
}

impl Reading {
    /// Resets the board and reads all three sensors. A failure on any
    /// accessor propagates without retry.
    pub fn sample<B: SensorBoard>(board: &mut B) -> Result<Self, SensorError> {
        board.reset()?;

        Ok(Self {
            temperature_celsius: board.read_temperature()?,
            pressure_hpa: board.read_pressure()?,
            humidity_percent: board.read_humidity()?,
        })
    }
}
