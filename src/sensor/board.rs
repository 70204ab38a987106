#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("sensor board unavailable: {0}")]
    Unavailable(String),
}

/// Access to one Sense HAT-style environmental sensor board.
///
/// Readings are instantaneous and never cached; every call reaches the
/// board. `reset` is idempotent and safe to call before each sampling pass.
pub trait SensorBoard {
    fn reset(&mut self) -> Result<(), SensorError>;

    fn read_temperature(&mut self) -> Result<f64, SensorError>;

    fn read_pressure(&mut self) -> Result<f64, SensorError>;

    fn read_humidity(&mut self) -> Result<f64, SensorError>;
}
