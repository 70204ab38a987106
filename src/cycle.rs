use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use crate::producer::{DeliveryReceipt, ProducerClient, Publisher, PublishError};
use crate::sensor::{SensorBoard, SensorError};
use crate::telemetry::{AssetKey, Reading, TelemetryRecord};

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("sensor read failed: {0}")]
    Sensor(#[from] SensorError),

    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}

/// The repeating sample-and-publish loop.
///
/// Each tick samples the board, builds one record and publishes it, awaiting
/// delivery before the tick ends. The interval re-arms only after the
/// current cycle's work completes, so cycles never overlap. It re-arms
/// unconditionally: a failed cycle is logged and the stream continues.
pub struct PublishCycle<B, C> {
    board: B,
    publisher: Publisher<C>,
    key: AssetKey,
    interval: Duration,
}

impl<B: SensorBoard, C: ProducerClient> PublishCycle<B, C> {
    pub fn new(board: B, publisher: Publisher<C>, key: AssetKey, interval: Duration) -> Self {
        Self {
            board,
            publisher,
            key,
            interval,
        }
    }

    /// One full cycle: Sampling → Building → Publishing.
    pub async fn run_once(&mut self) -> Result<DeliveryReceipt, CycleError> {
        let reading = Reading::sample(&mut self.board)?;
        tracing::info!(
            temperature_celsius = reading.temperature_celsius,
            pressure_hpa = reading.pressure_hpa,
            humidity_percent = reading.humidity_percent,
            "acquired sensor readings"
        );

        let record = TelemetryRecord::from_reading(&reading, Utc::now());

        let receipt = self.publisher.publish(&record, &self.key).await?;
        Ok(receipt)
    }

    /// Runs cycles until the task is dropped. The first cycle fires
    /// immediately, then one per interval.
    pub async fn run(&mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self.run_once().await {
                Ok(receipt) => {
                    tracing::info!(
                        topic = %receipt.topic,
                        partition = receipt.partition,
                        offset = receipt.offset,
                        "message delivered"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "message delivery failed");
                }
            }
        }
    }
}
