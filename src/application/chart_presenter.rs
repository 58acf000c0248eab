// Chart presenter - Fetch, transform and hand options to each mount point
use crate::application::chart_options::{comparison_option, composition_option, trend_option};
use crate::application::chart_source::{ChartDataSource, FetchError};
use crate::application::mount::{MountPoint, MountRegistry};
use crate::application::resize::ResizeRegistry;
use crate::domain::chart_data::{ComparisonPayload, CompositionSlice, ShapeError};
use crate::domain::growth::GrowthResult;
use crate::domain::mount_target::MountTarget;
use crate::domain::render_state::{RenderState, TransitionError};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const NO_DATA_MESSAGE: &str = "暂无数据或加载失败";
pub const COMPARISON_FAILED_MESSAGE: &str = "对比数据加载失败";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOutcome {
    pub target: MountTarget,
    /// False when the page has no such mount; the state then stays Idle
    pub mounted: bool,
    #[serde(flatten)]
    pub state: RenderState,
}

impl RenderOutcome {
    fn skipped(target: MountTarget) -> Self {
        Self {
            target,
            mounted: false,
            state: RenderState::Idle,
        }
    }
}

#[derive(Clone)]
pub struct ChartPresenter {
    source: Arc<dyn ChartDataSource>,
    composition: Vec<CompositionSlice>,
    resize: ResizeRegistry,
}

impl ChartPresenter {
    pub fn new(
        source: Arc<dyn ChartDataSource>,
        composition: Vec<CompositionSlice>,
        resize: ResizeRegistry,
    ) -> Self {
        Self {
            source,
            composition,
            resize,
        }
    }

    pub fn resize_registry(&self) -> &ResizeRegistry {
        &self.resize
    }

    /// Run all three renderers concurrently over the mounts that exist.
    pub async fn render_all(&self, mounts: &MountRegistry) -> Vec<RenderOutcome> {
        let (trend, composition, comparison) = tokio::join!(
            self.render_trend(mounts),
            async { self.render_composition(mounts) },
            self.render_comparison(mounts),
        );
        vec![trend, composition, comparison]
    }

    pub async fn render_trend(&self, mounts: &MountRegistry) -> RenderOutcome {
        let target = MountTarget::MainChart;
        let Some(mount) = self.attach(mounts, target) else {
            return RenderOutcome::skipped(target);
        };

        let loading = begin(target, &*mount);
        let result = match self.source.fetch_realtime_chart().await {
            Ok(payload) => payload
                .validate()
                .map(|_| trend_option(&payload))
                .map_err(FetchError::from),
            Err(e) => Err(e),
        };

        finish(target, &*mount, loading, result, NO_DATA_MESSAGE)
    }

    pub fn render_composition(&self, mounts: &MountRegistry) -> RenderOutcome {
        let target = MountTarget::PieChart;
        let Some(mount) = self.attach(mounts, target) else {
            return RenderOutcome::skipped(target);
        };

        // Nothing to fetch: no loading indicator, Loading is left right away
        let loading = step(target, RenderState::Idle, RenderState::Loading);
        let result = self
            .composition
            .iter()
            .try_for_each(CompositionSlice::validate)
            .map(|_| composition_option(&self.composition))
            .map_err(FetchError::from);

        match result {
            Ok(option) => {
                mount.set_option(option);
                settle(target, loading, RenderState::Rendered)
            }
            Err(e) => {
                tracing::error!("Invalid composition slices for {}: {}", target, e);
                mount.replace_content(NO_DATA_MESSAGE);
                settle(target, loading, RenderState::Failed(e.to_string()))
            }
        }
    }

    pub async fn render_comparison(&self, mounts: &MountRegistry) -> RenderOutcome {
        let target = MountTarget::ComparisonChart;
        let Some(mount) = self.attach(mounts, target) else {
            return RenderOutcome::skipped(target);
        };

        let loading = begin(target, &*mount);
        let result = self
            .source
            .fetch_comparison_data()
            .await
            .and_then(|payload| build_comparison(payload).map_err(FetchError::from));

        finish(target, &*mount, loading, result, COMPARISON_FAILED_MESSAGE)
    }

    /// Look up the mount and make sure it follows viewport resizes.
    fn attach(&self, mounts: &MountRegistry, target: MountTarget) -> Option<Arc<dyn MountPoint>> {
        match mounts.get(target) {
            Some(mount) => {
                self.resize.register(target, mount.clone());
                Some(mount)
            }
            None => {
                tracing::debug!("Mount {} not present, skipping", target);
                None
            }
        }
    }
}

fn build_comparison(payload: ComparisonPayload) -> Result<Value, ShapeError> {
    let comparison = payload.validate()?;
    let growth = GrowthResult::from_comparison(&comparison);
    tracing::debug!(
        "Comparison growth: period={:?} year={:?}",
        growth.period_growth_pct,
        growth.year_growth_pct
    );
    Ok(comparison_option(&comparison, &growth))
}

fn begin(target: MountTarget, mount: &dyn MountPoint) -> Result<RenderState, TransitionError> {
    mount.show_loading();
    step(target, RenderState::Idle, RenderState::Loading)
}

fn finish(
    target: MountTarget,
    mount: &dyn MountPoint,
    loading: Result<RenderState, TransitionError>,
    result: Result<Value, FetchError>,
    failure_message: &str,
) -> RenderOutcome {
    mount.hide_loading();
    match result {
        Ok(option) => {
            mount.set_option(option);
            settle(target, loading, RenderState::Rendered)
        }
        Err(e) => {
            tracing::error!("Error fetching chart data for {}: {}", target, e);
            mount.replace_content(failure_message);
            settle(target, loading, RenderState::Failed(e.to_string()))
        }
    }
}

fn step(
    target: MountTarget,
    from: RenderState,
    to: RenderState,
) -> Result<RenderState, TransitionError> {
    let next = from.transition(to)?;
    tracing::debug!("{} -> {:?}", target, next);
    Ok(next)
}

fn settle(
    target: MountTarget,
    loading: Result<RenderState, TransitionError>,
    to: RenderState,
) -> RenderOutcome {
    let state = match loading.and_then(|s| s.transition(to)) {
        Ok(state) => state,
        Err(e) => {
            // Unreachable with the fixed Idle -> Loading start above
            tracing::error!("{}: {}", target, e);
            RenderState::Failed(e.to_string())
        }
    };
    debug_assert!(state.is_terminal());
    if let RenderState::Failed(reason) = &state {
        tracing::warn!("{} failed: {}", target, reason);
    } else {
        tracing::info!("{} rendered", target);
    }
    RenderOutcome {
        target,
        mounted: true,
        state,
    }
}
