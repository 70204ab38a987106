use crate::schema::{SchemaError, SchemaPair};
use crate::telemetry::{AssetKey, TelemetryRecord};

/// Outcome of one accepted record: where the broker put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub topic: String,

    pub partition: i32,

    pub offset: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("record rejected by schema validation: {0}")]
    SchemaValidation(#[from] SchemaError),

    #[error("topic not found on broker: {0}")]
    TopicNotFound(String),

    #[error("broker transport failure: {0}")]
    Broker(String),
}

/// Narrow seam to the broker producer client. `send` resolves once the
/// broker has accepted or rejected the record, so awaiting it drains the
/// in-flight message before the cycle ends.
pub trait ProducerClient {
    fn topic(&self) -> &str;

    fn send(
        &self,
        key: Vec<u8>,
        value: Vec<u8>,
    ) -> impl Future<Output = Result<DeliveryReceipt, PublishError>> + Send;
}

/// Encodes records against the fixed schema pair and ships them through a
/// producer client.
pub struct Publisher<C> {
    client: C,
    schemas: SchemaPair,
}

impl<C: ProducerClient> Publisher<C> {
    pub fn new(client: C, schemas: SchemaPair) -> Self {
        Self { client, schemas }
    }

    pub fn topic(&self) -> &str {
        self.client.topic()
    }

    /// Validates and serializes the record and key, then hands them to the
    /// client. Schema mismatches fail here, synchronously, before anything
    /// is enqueued; broker-side failures surface from the awaited send.
    pub async fn publish(
        &self,
        record: &TelemetryRecord,
        key: &AssetKey,
    ) -> Result<DeliveryReceipt, PublishError> {
        let value = self.schemas.encode_value(record)?;
        let key_bytes = self.schemas.encode_key(key)?;
        self.client.send(key_bytes, value).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone as _, Utc};

    use super::*;
    use crate::telemetry::Reading;

    const KEY_SCHEMA: &str = include_str!("../../schemas/telemetry-key.avsc");
    const VALUE_SCHEMA: &str = include_str!("../../schemas/telemetry-value.avsc");

    #[derive(Default)]
    struct RecordingClient {
        sends: AtomicUsize,
        last_value: Mutex<Option<Vec<u8>>>,
        fail: bool,
    }

    impl ProducerClient for &RecordingClient {
        fn topic(&self) -> &str {
            "test_avro_2"
        }

        async fn send(
            &self,
            _key: Vec<u8>,
            value: Vec<u8>,
        ) -> Result<DeliveryReceipt, PublishError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PublishError::Broker("connection reset".to_string()));
            }
            *self.last_value.lock().unwrap() = Some(value);
            Ok(DeliveryReceipt {
                topic: "test_avro_2".to_string(),
                partition: 0,
                offset: 17,
            })
        }
    }

    fn record() -> TelemetryRecord {
        let reading = Reading {
            temperature_celsius: 21.5,
            pressure_hpa: 1013.0,
            humidity_percent: 45.0,
        };
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        TelemetryRecord::from_reading(&reading, at)
    }

    #[tokio::test]
    async fn test_publish_returns_receipt() {
        let client = RecordingClient::default();
        let publisher = Publisher::new(&client, SchemaPair::embedded().unwrap());

        let receipt = publisher
            .publish(&record(), &AssetKey::new("HS2-000024H7L"))
            .await
            .unwrap();

        assert_eq!(receipt.topic, "test_avro_2");
        assert!(receipt.partition >= 0);
        assert_eq!(client.sends.load(Ordering::SeqCst), 1);
        assert!(client.last_value.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_schema_mismatch_fails_before_send() {
        // A pair whose value schema is the key schema: no telemetry record
        // can conform to it.
        let schemas = SchemaPair::from_strs(KEY_SCHEMA, KEY_SCHEMA).unwrap();
        let client = RecordingClient::default();
        let publisher = Publisher::new(&client, schemas);

        let result = publisher
            .publish(&record(), &AssetKey::new("HS2-000024H7L"))
            .await;

        assert!(matches!(result, Err(PublishError::SchemaValidation(_))));
        assert_eq!(client.sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_broker_failure_propagates() {
        let client = RecordingClient {
            fail: true,
            ..RecordingClient::default()
        };
        let publisher = Publisher::new(&client, SchemaPair::embedded().unwrap());

        let result = publisher
            .publish(&record(), &AssetKey::new("HS2-000024H7L"))
            .await;

        assert!(matches!(result, Err(PublishError::Broker(_))));
    }
}
