//! Headless reminder daemon for host-shell integration.
//!
//! Loads the reminder config, starts the scheduler against a file-backed
//! dedup ledger, and writes every delivered reminder to stdout as
//! newline-delimited JSON for the host shell to render.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use exhale::scheduler::FileLedger;
use exhale::{ChannelSink, PreferencesClient, ReminderConfig, ReminderScheduler};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("exhale-reminderd starting");

    let config = ReminderConfig::load()?;
    let ledger = Arc::new(FileLedger::new(config.scheduler.ledger_file()));
    let client = PreferencesClient::new(&config.api);

    // The daemon process owning stdout counts as granted permission; the
    // host shell decides what to do with each line.
    let (sink, mut deliveries) = ChannelSink::new();
    let writer = tokio::spawn(async move {
        while let Some(notification) = deliveries.recv().await {
            let line = serde_json::json!({
                "category": notification.category.key(),
                "title": notification.title,
                "body": notification.body,
                "icon": notification.icon,
                "route": notification.route.path(),
            });
            println!("{line}");
        }
    });

    let mut scheduler = ReminderScheduler::new(client, Arc::new(sink), ledger)
        .with_intervals(
            config.scheduler.poll_interval(),
            config.scheduler.refresh_interval(),
        );
    scheduler.start();

    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("received Ctrl+C, shutting down...");
    }
    scheduler.stop();
    writer.abort();

    tracing::info!("exhale-reminderd shut down cleanly");
    Ok(())
}
