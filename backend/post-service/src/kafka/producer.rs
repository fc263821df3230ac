use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::ClientConfig;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use waggle_common::NotificationEvent;

/// Kafka producer wrapper for notification events
#[derive(Clone)]
pub struct EventProducer {
    producer: FutureProducer,
    topic: String,
    timeout: Duration,
}

impl EventProducer {
    pub fn new(brokers: &str, topic: String) -> Result<Self> {
        let producer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .set("queue.buffering.max.messages", "100000")
            .set("acks", "all")
            .set("compression.type", "lz4")
            .create()
            .map_err(AppError::Kafka)?;

        Ok(Self {
            producer,
            topic,
            timeout: Duration::from_secs(5),
        })
    }

    /// Publish a single notification event, keyed by recipient
    pub async fn publish(&self, event: &NotificationEvent) -> Result<()> {
        let payload = serde_json::to_string(event)
            .map_err(|e| AppError::Internal(format!("notification serialization: {e}")))?;
        let key = event.key();
        let record = FutureRecord::to(&self.topic).payload(&payload).key(&key);

        debug!(
            "Publishing {} event to topic {} (key={})",
            event.notification_type, self.topic, key
        );

        match timeout(self.timeout, self.producer.send(record, self.timeout)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err((e, _))) => Err(AppError::Kafka(e)),
            Err(_) => {
                warn!("Kafka send timed out after {:?}", self.timeout);
                Err(AppError::Internal("Kafka publish timeout".into()))
            }
        }
    }

    /// Lightweight health check by fetching cluster metadata
    pub async fn health_check(&self) -> Result<()> {
        // librdkafka performs metadata fetch synchronously; scope is limited to readiness probes.
        self.producer
            .client()
            .fetch_metadata(Some(&self.topic), self.timeout)
            .map(|_| ())
            .map_err(AppError::Kafka)
    }
}
