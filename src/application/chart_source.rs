// Data source trait for chart payloads
use crate::domain::chart_data::{ComparisonPayload, ShapeError, TimeSeriesPayload};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("backend responded with status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode payload: {0}")]
    Decode(String),
    #[error("malformed payload: {0}")]
    Shape(#[from] ShapeError),
}

#[async_trait]
pub trait ChartDataSource: Send + Sync {
    /// Recent load samples for the trend chart
    async fn fetch_realtime_chart(&self) -> Result<TimeSeriesPayload, FetchError>;

    /// Current/prior-period/prior-year values for the comparison chart
    async fn fetch_comparison_data(&self) -> Result<ComparisonPayload, FetchError>;
}
