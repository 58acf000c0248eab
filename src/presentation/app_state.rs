// Application state for HTTP handlers
use crate::application::chart_presenter::ChartPresenter;
use crate::application::mount::ViewportSize;
use crate::infrastructure::page_mount::HostedPage;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub presenter: ChartPresenter,
    pub page: Arc<HostedPage>,
    pub resize_events: broadcast::Sender<ViewportSize>,
}
