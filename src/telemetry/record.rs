use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::telemetry::Reading;

/// SSN/SOSA observed-property URI for ambient temperature.
pub const OBSERVED_PROPERTY_TEMPERATURE: &str = "http://data.posccaesar.org/rdl/RDS16432325";

/// QUDT unit URI for degrees Celsius.
pub const UNIT_DEGREES_CELSIUS: &str = "http://qudt.org/2.1/vocab/unit#DEG_C";

/// Kafka partition key: the AIMS asset identifier of the simulated node.
/// Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetKey {
    pub aims_asset_id: String,
}

impl AssetKey {
    pub fn new(aims_asset_id: impl Into<String>) -> Self {
        Self {
            aims_asset_id: aims_asset_id.into(),
        }
    }
}

/// PTP clock sync status attached to every record. The simulator does not
/// track a live PTP daemon; these values describe the assumed steady state
/// and are identical across all cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockSyncStatus {
    pub ptp_clock_status: String,

    pub ptp_best_master_id: String,

    pub ptp_offset_from_master: f32,
}

impl ClockSyncStatus {
    pub fn fixed() -> Self {
        Self {
            ptp_clock_status: "calibrated, in control, stabilised".to_string(),
            ptp_best_master_id: "38eaa7fffe38476b(unknown)/178".to_string(),
            ptp_offset_from_master: 0.000_000_082,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityValue {
    #[serde(rename = "numericValue")]
    pub numeric_value: f64,

    pub unit: String,
}

/// The unit of publication, laid out field-for-field as consumers of the
/// `base_unprocessed_data` schema expect it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    #[serde(rename = "SOSAobservedProperty")]
    pub observed_property: String,

    #[serde(rename = "SOSAhasResult")]
    pub result: QuantityValue,

    pub timestamp_clock_sync: ClockSyncStatus,

    #[serde(rename = "SOSAresultTime")]
    pub result_time: String,
}

impl TelemetryRecord {
    /// Builds one record from a sampling pass. Pure: identical inputs yield
    /// identical records.
    ///
    /// Only the temperature reading goes on the wire. Pressure and humidity
    /// are sampled and logged each cycle but have no field in the published
    /// record; consumers of the schema receive temperature only.
    pub fn from_reading(reading: &Reading, at: DateTime<Utc>) -> Self {
        Self {
            observed_property: OBSERVED_PROPERTY_TEMPERATURE.to_string(),
            result: QuantityValue {
                numeric_value: reading.temperature_celsius,
                unit: UNIT_DEGREES_CELSIUS.to_string(),
            },
            timestamp_clock_sync: ClockSyncStatus::fixed(),
            result_time: at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn reading() -> Reading {
        Reading {
            temperature_celsius: 21.5,
            pressure_hpa: 1012.8,
            humidity_percent: 44.2,
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let a = TelemetryRecord::from_reading(&reading(), at);
        let b = TelemetryRecord::from_reading(&reading(), at);
        assert_eq!(a, b);
    }

    #[test]
    fn test_record_carries_temperature_only() {
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let record = TelemetryRecord::from_reading(&reading(), at);
        assert_eq!(record.result.numeric_value, 21.5);
        assert_eq!(record.result.unit, UNIT_DEGREES_CELSIUS);
        assert_eq!(record.observed_property, OBSERVED_PROPERTY_TEMPERATURE);
    }

    #[test]
    fn test_clock_sync_status_is_constant_across_records() {
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 10).unwrap();
        let a = TelemetryRecord::from_reading(&reading(), at);
        let b = TelemetryRecord::from_reading(&reading(), later);
        assert_eq!(a.timestamp_clock_sync, b.timestamp_clock_sync);
        assert_eq!(
            a.timestamp_clock_sync.ptp_clock_status,
            "calibrated, in control, stabilised"
        );
    }

    #[test]
    fn test_result_time_format() {
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let record = TelemetryRecord::from_reading(&reading(), at);
        assert_eq!(record.result_time, "2026-08-06T12:00:00.000000Z");
    }

    #[test]
    fn test_result_times_are_non_decreasing() {
        let mut times = Vec::new();
        for second in [0u32, 10, 20, 30] {
            let at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, second).unwrap();
            times.push(TelemetryRecord::from_reading(&reading(), at).result_time);
        }
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
    }
}
