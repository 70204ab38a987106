mod args;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use sense_telemetry::cycle::PublishCycle;
use sense_telemetry::producer::{KafkaProducer, Publisher};
use sense_telemetry::schema::SchemaPair;
use sense_telemetry::sensor::SimulatedBoard;
use sense_telemetry::telemetry::AssetKey;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let schemas = SchemaPair::embedded().context("failed to load telemetry schemas")?;

    let key = AssetKey::new(&args.asset_id);
    let key_bytes = schemas
        .encode_key(&key)
        .context("failed to encode partition key")?;

    let producer = KafkaProducer::connect(&args.target, &args.topic, &key_bytes)
        .await
        .context("failed to connect to Kafka broker")?;
    tracing::info!(
        target = %args.target,
        topic = %args.topic,
        partition = producer.partition(),
        asset_id = %args.asset_id,
        "connected to broker"
    );

    let publisher = Publisher::new(producer, schemas);
    let board = SimulatedBoard::new();
    let mut cycle = PublishCycle::new(
        board,
        publisher,
        key,
        Duration::from_secs(args.interval_secs),
    );

    tokio::select! {
        _ = cycle.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received, stopping publish cycle");
        }
    }

    Ok(())
}
