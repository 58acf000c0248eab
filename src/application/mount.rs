// Mount point abstraction and the capability map of present mounts
use crate::domain::mount_target::MountTarget;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

/// A place the rendering engine draws into.
///
/// `resize` must be a no-op while no chart option has been applied.
pub trait MountPoint: Send + Sync {
    fn show_loading(&self);
    fn hide_loading(&self);
    fn set_option(&self, option: Value);
    /// Replace whatever the mount shows with a plain message
    fn replace_content(&self, message: &str);
    fn resize(&self, size: ViewportSize);
}

/// Targets the host page actually provides, each with its handle.
#[derive(Clone, Default)]
pub struct MountRegistry {
    mounts: BTreeMap<MountTarget, Arc<dyn MountPoint>>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: MountTarget, mount: Arc<dyn MountPoint>) {
        self.mounts.insert(target, mount);
    }

    pub fn get(&self, target: MountTarget) -> Option<Arc<dyn MountPoint>> {
        self.mounts.get(&target).cloned()
    }

    pub fn targets(&self) -> impl Iterator<Item = MountTarget> + '_ {
        self.mounts.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}
