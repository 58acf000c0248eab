// Viewport resize fan-out
use crate::application::mount::{MountPoint, ViewportSize};
use crate::domain::mount_target::MountTarget;
use futures::StreamExt;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

/// One resize listener per mount target. Registering a target again
/// replaces its listener, so re-rendering never accumulates handlers.
#[derive(Clone, Default)]
pub struct ResizeRegistry {
    listeners: Arc<Mutex<BTreeMap<MountTarget, Arc<dyn MountPoint>>>>,
}

impl ResizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, target: MountTarget, mount: Arc<dyn MountPoint>) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        if listeners.insert(target, mount).is_none() {
            tracing::debug!("Registered resize listener for {}", target);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn dispatch(&self, size: ViewportSize) {
        // Snapshot so mounts are resized without holding the lock
        let mounts: Vec<Arc<dyn MountPoint>> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        tracing::debug!(
            "Resizing {} mounts to {}x{}",
            mounts.len(),
            size.width,
            size.height
        );
        for mount in mounts {
            mount.resize(size);
        }
    }

    /// Forward every event from `events` until the sender side is dropped.
    pub fn listen(&self, events: broadcast::Receiver<ViewportSize>) -> JoinHandle<()> {
        let registry = self.clone();
        let mut stream = BroadcastStream::new(events);

        tokio::spawn(async move {
            while let Some(event) = stream.next().await {
                match event {
                    Ok(size) => registry.dispatch(size),
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        tracing::warn!("Resize listener lagged, skipped {} events", skipped);
                    }
                }
            }
            tracing::debug!("Resize event source closed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Default)]
    struct CountingMount {
        sizes: Mutex<Vec<ViewportSize>>,
    }

    impl MountPoint for CountingMount {
        fn show_loading(&self) {}
        fn hide_loading(&self) {}
        fn set_option(&self, _option: Value) {}
        fn replace_content(&self, _message: &str) {}
        fn resize(&self, size: ViewportSize) {
            self.sizes.lock().unwrap().push(size);
        }
    }

    #[test]
    fn test_registering_twice_keeps_one_listener() {
        let registry = ResizeRegistry::new();
        let mount = Arc::new(CountingMount::default());
        registry.register(MountTarget::MainChart, mount.clone());
        registry.register(MountTarget::MainChart, mount.clone());
        assert_eq!(registry.listener_count(), 1);

        registry.dispatch(ViewportSize { width: 800, height: 600 });
        assert_eq!(mount.sizes.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dispatch_without_listeners() {
        ResizeRegistry::new().dispatch(ViewportSize { width: 1, height: 1 });
    }

    #[tokio::test]
    async fn test_listen_forwards_events() {
        let registry = ResizeRegistry::new();
        let mount = Arc::new(CountingMount::default());
        registry.register(MountTarget::PieChart, mount.clone());

        let (tx, rx) = broadcast::channel(8);
        let handle = registry.listen(rx);
        tx.send(ViewportSize { width: 1024, height: 768 }).unwrap();
        tx.send(ViewportSize { width: 640, height: 480 }).unwrap();
        drop(tx);
        handle.await.unwrap();

        let sizes = mount.sizes.lock().unwrap();
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[1], ViewportSize { width: 640, height: 480 });
    }
}
