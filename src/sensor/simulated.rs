use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

use crate::sensor::{SensorBoard, SensorError};

const TEMPERATURE_BASE_CELSIUS: f64 = 22.0;
const TEMPERATURE_VARIATION: f64 = 3.0;

const PRESSURE_BASE_HPA: f64 = 1013.25;
const PRESSURE_VARIATION: f64 = 8.0;

const HUMIDITY_BASE_PERCENT: f64 = 45.0;
const HUMIDITY_VARIATION: f64 = 10.0;

/// Random walk step multiplier, relative to each channel's variation.
const STEP: f64 = 0.2;

/// Random-walk simulation of a Sense HAT board.
///
/// Each channel drifts around a fixed baseline, clamped to
/// baseline ± variation, so consecutive readings stay plausible.
pub struct SimulatedBoard {
    rng: StdRng,
    temperature_celsius: f64,
    pressure_hpa: f64,
    humidity_percent: f64,
}

impl SimulatedBoard {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            temperature_celsius: TEMPERATURE_BASE_CELSIUS,
            pressure_hpa: PRESSURE_BASE_HPA,
            humidity_percent: HUMIDITY_BASE_PERCENT,
        }
    }

    fn walk(&mut self, current: f64, base: f64, variation: f64) -> f64 {
        let delta = (self.rng.random::<f64>() - 0.5) * variation * STEP;
        (current + delta).clamp(base - variation, base + variation)
    }
}

impl Default for SimulatedBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorBoard for SimulatedBoard {
    fn reset(&mut self) -> Result<(), SensorError> {
        // The real board clears its LED matrix here; the simulator has
        // nothing to clear.
        Ok(())
    }

    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        self.temperature_celsius = self.walk(
            self.temperature_celsius,
            TEMPERATURE_BASE_CELSIUS,
            TEMPERATURE_VARIATION,
        );
        Ok(self.temperature_celsius)
    }

    fn read_pressure(&mut self) -> Result<f64, SensorError> {
        self.pressure_hpa = self.walk(self.pressure_hpa, PRESSURE_BASE_HPA, PRESSURE_VARIATION);
        Ok(self.pressure_hpa)
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        self.humidity_percent = self.walk(
            self.humidity_percent,
            HUMIDITY_BASE_PERCENT,
            HUMIDITY_VARIATION,
        );
        Ok(self.humidity_percent)
    }
}
