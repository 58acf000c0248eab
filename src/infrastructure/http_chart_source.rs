// HTTP chart data source backed by the dashboard backend
use crate::application::chart_source::{ChartDataSource, FetchError};
use crate::domain::chart_data::{ComparisonPayload, TimeSeriesPayload};
use crate::infrastructure::config::BackendSettings;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpChartSource {
    client: reqwest::Client,
    base_url: String,
    realtime_path: String,
    comparison_path: String,
}

impl HttpChartSource {
    pub fn new(settings: &BackendSettings) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &settings.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid backend header name '{}'", name))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for backend header '{}'", name.as_str()))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            realtime_path: settings.realtime_path.clone(),
            comparison_path: settings.comparison_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} responded with {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChartDataSource for HttpChartSource {
    async fn fetch_realtime_chart(&self) -> Result<TimeSeriesPayload, FetchError> {
        self.get_json(&self.realtime_path).await
    }

    async fn fetch_comparison_data(&self) -> Result<ComparisonPayload, FetchError> {
        self.get_json(&self.comparison_path).await
    }
}
