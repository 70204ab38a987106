use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash as _, Hasher as _};

use chrono::Utc;
use rskafka::client::ClientBuilder;
use rskafka::client::partition::{Compression, PartitionClient, UnknownTopicHandling};
use rskafka::record::Record;

use crate::producer::{DeliveryReceipt, ProducerClient, PublishError};

/// Kafka-backed producer client. The broker connection, topic metadata and
/// partition routing for the fixed key are all resolved once at startup and
/// reused for every cycle.
pub struct KafkaProducer {
    topic: String,
    partition: i32,
    client: PartitionClient,
}

impl KafkaProducer {
    /// Connects to the broker and binds to the partition the given encoded
    /// key routes to. The key is fixed for the process lifetime, so the
    /// routing decision is too.
    pub async fn connect(target: &str, topic: &str, key: &[u8]) -> Result<Self, PublishError> {
        let client = ClientBuilder::new(vec![target.to_string()])
            .build()
            .await
            .map_err(|e| PublishError::Broker(e.to_string()))?;

        let topics = client
            .list_topics()
            .await
            .map_err(|e| PublishError::Broker(e.to_string()))?;
        let meta = topics
            .into_iter()
            .find(|t| t.name == topic)
            .ok_or_else(|| PublishError::TopicNotFound(topic.to_string()))?;
        if meta.partitions.is_empty() {
            return Err(PublishError::TopicNotFound(topic.to_string()));
        }

        let partitions: Vec<i32> = meta.partitions.iter().copied().collect();
        let partition = route_partition(key, &partitions);
        let partition_client = client
            .partition_client(topic, partition, UnknownTopicHandling::Retry)
            .await
            .map_err(|e| PublishError::Broker(e.to_string()))?;

        Ok(Self {
            topic: topic.to_string(),
            partition,
            client: partition_client,
        })
    }

    pub fn partition(&self) -> i32 {
        self.partition
    }
}

impl ProducerClient for KafkaProducer {
    fn topic(&self) -> &str {
        &self.topic
    }

    async fn send(&self, key: Vec<u8>, value: Vec<u8>) -> Result<DeliveryReceipt, PublishError> {
        let record = Record {
            key: Some(key),
            value: Some(value),
            headers: BTreeMap::new(),
            timestamp: Utc::now(),
        };

        let offsets = self
            .client
            .produce(vec![record], Compression::default())
            .await
            .map_err(|e| PublishError::Broker(e.to_string()))?;

        Ok(DeliveryReceipt {
            topic: self.topic.clone(),
            partition: self.partition,
            offset: offsets.into_iter().next().unwrap_or_default(),
        })
    }
}

fn route_partition(key: &[u8], partitions: &[i32]) -> i32 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    partitions[(hasher.finish() % partitions.len() as u64) as usize]
}
