//! Mount points: named containers that receive rendered markup.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// A container that accepts wholesale markup replacement
pub trait MountPoint: Send {
    /// Replace the container's content with `html`
    fn set_html(&mut self, html: &str);

    /// The markup currently mounted
    fn html(&self) -> &str;
}

/// Shared handle to a mount point, writable from spawned query tasks
pub type MountHandle = Arc<Mutex<Box<dyn MountPoint>>>;

/// In-memory mount point holding the last written markup
#[derive(Debug, Default)]
pub struct HtmlBuffer {
    html: String,
    writes: usize,
}

impl HtmlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the content has been replaced
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl MountPoint for HtmlBuffer {
    fn set_html(&mut self, html: &str) {
        self.html = html.to_string();
        self.writes += 1;
    }

    fn html(&self) -> &str {
        &self.html
    }
}

/// Registry of mount points keyed by identifier string.
///
/// Consumers look containers up by id; a missing id makes the corresponding
/// controller attachment a no-op rather than a fault.
#[derive(Default)]
pub struct MountRegistry {
    mounts: HashMap<String, MountHandle>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mount point under `id`, returning its shared handle
    pub fn register(&mut self, id: impl Into<String>, mount: Box<dyn MountPoint>) -> MountHandle {
        let handle: MountHandle = Arc::new(Mutex::new(mount));
        self.mounts.insert(id.into(), handle.clone());
        handle
    }

    /// Look up a mount point by id
    pub fn get(&self, id: &str) -> Option<MountHandle> {
        self.mounts.get(id).cloned()
    }
}
