// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use crate::application::chart_presenter::ChartPresenter;
use crate::application::resize::ResizeRegistry;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_chart_source::HttpChartSource;
use crate::infrastructure::page_mount::HostedPage;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Data source (infrastructure layer)
    let source = Arc::new(HttpChartSource::new(&config.backend)?);

    // Page mounts and viewport resize events
    let page = Arc::new(HostedPage::new(&config.page.mounts, config.page.viewport));
    let resize = ResizeRegistry::new();
    let (resize_events, resize_rx) = broadcast::channel(32);
    resize.listen(resize_rx);

    // Presenter (application layer)
    let presenter = ChartPresenter::new(source, config.composition.clone(), resize);

    // Initial render, as on page load
    let mounts = page.registry();
    if mounts.is_empty() {
        tracing::warn!("No mount points configured, nothing will be rendered");
    } else {
        let targets: Vec<String> = mounts.targets().map(|t| t.to_string()).collect();
        tracing::info!("Rendering into {} mounts: {}", mounts.len(), targets.join(", "));
    }
    for outcome in presenter.render_all(&mounts).await {
        tracing::debug!("{}: {:?}", outcome.target, outcome.state);
    }

    let state = Arc::new(AppState {
        presenter,
        page,
        resize_events,
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.server.listen))?;
    tracing::info!("Starting energy-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
