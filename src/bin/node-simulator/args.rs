use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Feed readings from a simulated Sense HAT board into a Kafka topic.")]
pub struct Args {
    /// Address of the target Kafka broker, host:port.
    #[arg(long, env = "KAFKA_TARGET")]
    pub target: String,

    /// Kafka topic name to send messages to.
    #[arg(long, env = "KAFKA_TOPIC")]
    pub topic: String,

    /// AIMS asset identifier used as the record key.
    #[arg(long, env = "AIMS_ASSET_ID", default_value = "HS2-000024H7L")]
    pub asset_id: String,

    /// Seconds between publish cycles.
    #[arg(long, env = "SAMPLE_INTERVAL_SECS", default_value_t = 10)]
    pub interval_secs: u64,
}
