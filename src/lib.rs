//! Sense HAT node simulator: samples environmental readings from a
//! (simulated) sensor board and publishes them to a Kafka topic as
//! Avro-encoded telemetry records.

pub mod cycle;
pub mod producer;
pub mod schema;
pub mod sensor;
pub mod telemetry;
