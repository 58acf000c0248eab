// Route table for the hosted page
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_chart, health_check, list_charts, render_charts, resize_viewport,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/charts", get(list_charts))
        .route("/charts/render", post(render_charts))
        .route("/charts/:target", get(get_chart))
        .route("/viewport/resize", post(resize_viewport))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_presenter::ChartPresenter;
    use crate::application::chart_source::{ChartDataSource, FetchError};
    use crate::application::mount::ViewportSize;
    use crate::application::resize::ResizeRegistry;
    use crate::domain::chart_data::{ComparisonPayload, CompositionSlice, TimeSeriesPayload};
    use crate::domain::mount_target::MountTarget;
    use crate::infrastructure::page_mount::HostedPage;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tokio::sync::broadcast;

    /// Trend endpoint is down, comparison works.
    struct HalfBrokenBackend;

    #[async_trait]
    impl ChartDataSource for HalfBrokenBackend {
        async fn fetch_realtime_chart(&self) -> Result<TimeSeriesPayload, FetchError> {
            Err(FetchError::Status(502))
        }

        async fn fetch_comparison_data(&self) -> Result<ComparisonPayload, FetchError> {
            Ok(ComparisonPayload {
                labels: vec!["本期".to_string(), "上周".to_string(), "去年".to_string()],
                values: vec![50.0, 0.0, 40.0],
            })
        }
    }

    async fn spawn_page(targets: &[MountTarget]) -> String {
        let resize = ResizeRegistry::new();
        let (resize_events, rx) = broadcast::channel(16);
        resize.listen(rx);

        let state = Arc::new(AppState {
            presenter: ChartPresenter::new(
                Arc::new(HalfBrokenBackend),
                CompositionSlice::demo_set(),
                resize,
            ),
            page: Arc::new(HostedPage::new(
                targets,
                ViewportSize {
                    width: 1280,
                    height: 720,
                },
            )),
            resize_events,
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_render_reports_each_mount() {
        let base = spawn_page(&MountTarget::ALL).await;
        let client = reqwest::Client::new();

        let body: Value = client
            .post(format!("{}/charts/render", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let outcomes = body["outcomes"].as_array().unwrap();
        assert_eq!(outcomes[0]["target"], "mainChart");
        assert_eq!(outcomes[0]["state"], "failed");
        assert_eq!(outcomes[1]["state"], "rendered");
        assert_eq!(outcomes[2]["state"], "rendered");

        let main: Value = client
            .get(format!("{}/charts/mainChart", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            main["content"],
            json!({ "kind": "message", "text": "暂无数据或加载失败" })
        );

        let comparison: Value = client
            .get(format!("{}/charts/comparisonChart", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            comparison["content"]["option"]["series"][0]["markPoint"]["data"][0]["label"]
                ["formatter"],
            "period-over-period: N/A% | year-over-year: 25.0%"
        );
    }

    #[tokio::test]
    async fn test_absent_or_unknown_mount_is_404() {
        let base = spawn_page(&[MountTarget::PieChart]).await;
        let client = reqwest::Client::new();

        for path in ["mainChart", "lineChart"] {
            let status = client
                .get(format!("{}/charts/{}", base, path))
                .send()
                .await
                .unwrap()
                .status();
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        }

        let charts: Value = client
            .get(format!("{}/charts", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(charts.as_array().unwrap().len(), 1);
        assert_eq!(charts[0]["content"]["kind"], "empty");
    }

    #[tokio::test]
    async fn test_resize_reaches_rendered_charts() {
        let base = spawn_page(&[MountTarget::PieChart]).await;
        let client = reqwest::Client::new();

        // before any render: accepted, nothing to resize
        let status = client
            .post(format!("{}/viewport/resize", base))
            .json(&json!({ "width": 640, "height": 480 }))
            .send()
            .await
            .unwrap()
            .status();
        assert_eq!(status, reqwest::StatusCode::ACCEPTED);

        client
            .post(format!("{}/charts/render", base))
            .send()
            .await
            .unwrap();
        client
            .post(format!("{}/viewport/resize", base))
            .json(&json!({ "width": 800, "height": 600 }))
            .send()
            .await
            .unwrap();

        // the listener task applies the event asynchronously
        let mut pie = Value::Null;
        for _ in 0..50 {
            pie = client
                .get(format!("{}/charts/pieChart", base))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            if pie["resize_count"] == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(pie["resize_count"], 1);
        assert_eq!(pie["viewport"], json!({ "width": 800, "height": 600 }));
    }

    #[tokio::test]
    async fn test_health_check() {
        let base = spawn_page(&[]).await;
        let body = reqwest::get(format!("{}/healthz", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }
}
