// Hosted page - mount points whose rendered content is served as JSON
use crate::application::mount::{MountPoint, MountRegistry, ViewportSize};
use crate::domain::mount_target::MountTarget;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MountContent {
    Empty,
    Chart { option: Value },
    Message { text: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct MountSnapshot {
    pub target: MountTarget,
    pub loading: bool,
    pub content: MountContent,
    pub viewport: ViewportSize,
    pub resize_count: u64,
    /// RFC 3339 time of the last applied option
    pub rendered_at: Option<String>,
}

pub struct PageMount {
    state: Mutex<MountSnapshot>,
}

impl PageMount {
    pub fn new(target: MountTarget, viewport: ViewportSize) -> Self {
        Self {
            state: Mutex::new(MountSnapshot {
                target,
                loading: false,
                content: MountContent::Empty,
                viewport,
                resize_count: 0,
                rendered_at: None,
            }),
        }
    }

    pub fn snapshot(&self) -> MountSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, MountSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MountPoint for PageMount {
    fn show_loading(&self) {
        self.lock().loading = true;
    }

    fn hide_loading(&self) {
        self.lock().loading = false;
    }

    fn set_option(&self, option: Value) {
        let mut state = self.lock();
        state.content = MountContent::Chart { option };
        state.rendered_at = Some(chrono::Utc::now().to_rfc3339());
    }

    fn replace_content(&self, message: &str) {
        let mut state = self.lock();
        state.loading = false;
        state.content = MountContent::Message {
            text: message.to_string(),
        };
    }

    fn resize(&self, size: ViewportSize) {
        let mut state = self.lock();
        if matches!(state.content, MountContent::Chart { .. }) {
            state.viewport = size;
            state.resize_count += 1;
        }
    }
}

/// The set of mounts one page instance provides.
pub struct HostedPage {
    mounts: Vec<(MountTarget, Arc<PageMount>)>,
}

impl HostedPage {
    pub fn new(targets: &[MountTarget], viewport: ViewportSize) -> Self {
        let mut mounts: Vec<(MountTarget, Arc<PageMount>)> = Vec::new();
        for &target in targets {
            if mounts.iter().any(|(t, _)| *t == target) {
                tracing::warn!("Mount {} configured twice, ignoring duplicate", target);
                continue;
            }
            mounts.push((target, Arc::new(PageMount::new(target, viewport))));
        }
        Self { mounts }
    }

    pub fn registry(&self) -> MountRegistry {
        let mut registry = MountRegistry::new();
        for (target, mount) in &self.mounts {
            registry.register(*target, mount.clone());
        }
        registry
    }

    pub fn snapshot(&self) -> Vec<MountSnapshot> {
        self.mounts.iter().map(|(_, m)| m.snapshot()).collect()
    }

    pub fn snapshot_of(&self, target: MountTarget) -> Option<MountSnapshot> {
        self.mounts
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, m)| m.snapshot())
    }
}
