use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dailybrief::api;
use dailybrief::app_state::AppState;
use dailybrief::config::Config;
use dailybrief::job::{DailyJob, Sources};
use dailybrief::notify::PushplusNotifier;
use dailybrief::scheduler::SchedulerService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        hour = config.schedule().hour,
        minute = config.schedule().minute,
        token_set = !config.pushplus_token().is_empty(),
        "configuration loaded"
    );

    let notifier = Arc::new(PushplusNotifier::new(config.pushplus_token().to_string()));
    let job = Arc::new(DailyJob::new(
        Sources::default(),
        config.fetch_timeout(),
        notifier,
    ));

    let scheduler = Arc::new(SchedulerService::new(config.schedule(), job));
    let scheduler_handle = scheduler.start();

    let app = api::router(AppState::new(scheduler.clone()));
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    info!(addr = config.bind_addr(), "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("received shutdown signal");
        })
        .await
        .context("http server failed")?;

    scheduler.stop();
    let _ = scheduler_handle.await;
    Ok(())
}
