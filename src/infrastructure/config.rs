use crate::application::mount::ViewportSize;
use crate::domain::chart_data::CompositionSlice;
use crate::domain::mount_target::MountTarget;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub page: PageSettings,
    /// Slices for the energy-composition ring; demo data unless overridden
    #[serde(default = "CompositionSlice::demo_set")]
    pub composition: Vec<CompositionSlice>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_realtime_path")]
    pub realtime_path: String,
    #[serde(default = "default_comparison_path")]
    pub comparison_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra headers sent with every fetch, e.g. a session cookie
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            realtime_path: default_realtime_path(),
            comparison_path: default_comparison_path(),
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageSettings {
    /// Mount points the hosted page provides
    #[serde(default = "default_mounts")]
    pub mounts: Vec<MountTarget>,
    #[serde(default = "default_viewport")]
    pub viewport: ViewportSize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            mounts: default_mounts(),
            viewport: default_viewport(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_realtime_path() -> String {
    "/api/realtime_chart".to_string()
}

fn default_comparison_path() -> String {
    "/api/comparison_data".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_mounts() -> Vec<MountTarget> {
    MountTarget::ALL.to_vec()
}

fn default_viewport() -> ViewportSize {
    ViewportSize {
        width: 1280,
        height: 720,
    }
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__*` variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(env_source());

    from_builder(builder)
}

/// `DASHBOARD__BACKEND__TIMEOUT_SECS=3`, `DASHBOARD__PAGE__MOUNTS=mainChart,pieChart`
fn env_source() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("page.mounts")
        .try_parsing(true)
}

fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<DashboardConfig> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}
