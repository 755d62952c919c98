//! Named visual resources and their load state
//!
//! Loading itself is done by the platform layer; this cache only records what
//! was requested and whether each entry became usable. The simulation never
//! waits on it: renderers ask `get`/`is_ready` every frame and draw a
//! placeholder for anything missing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Sprites the game asks for, as (key, url)
pub const MANIFEST: &[(&str, &str)] = &[
    ("panther_run_1", "assets/panther_run_1.png"),
    ("panther_run_2", "assets/panther_run_2.png"),
    ("panther_run_3", "assets/panther_run_3.png"),
    ("panther_run_4", "assets/panther_run_4.png"),
    ("bush_obstacle", "assets/bush_obstacle.png"),
    ("log_obstacle", "assets/log_obstacle.png"),
    ("pantanal_background", "assets/pantanal_background.png"),
    ("ground_grass", "assets/ground_grass.png"),
];

pub const BACKGROUND: &str = "pantanal_background";
pub const GROUND: &str = "ground_grass";

/// Load state of one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Ready,
    /// Terminal: never retried, never becomes ready
    Failed,
}

#[derive(Debug)]
struct Entry<T> {
    status: AssetStatus,
    resource: Option<T>,
}

/// Shared handle to the cache; clones see the same entries
#[derive(Debug)]
pub struct AssetCache<T = ()> {
    entries: Rc<RefCell<HashMap<String, Entry<T>>>>,
}

impl<T> Clone for AssetCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<T> Default for AssetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AssetCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Record a request with no resource attached yet
    pub fn request(&self, name: &str) {
        self.entries.borrow_mut().insert(
            name.to_string(),
            Entry {
                status: AssetStatus::Pending,
                resource: None,
            },
        );
    }

    /// Record a request whose resource handle exists but is still loading
    pub fn insert_pending(&self, name: &str, resource: T) {
        self.entries.borrow_mut().insert(
            name.to_string(),
            Entry {
                status: AssetStatus::Pending,
                resource: Some(resource),
            },
        );
    }

    /// Mark a pending entry usable. Unknown, ready and failed entries are
    /// left alone. Returns whether the entry changed.
    pub fn resolve(&self, name: &str) -> bool {
        let changed = match self.entries.borrow_mut().get_mut(name) {
            Some(entry) if entry.status == AssetStatus::Pending => {
                entry.status = AssetStatus::Ready;
                true
            }
            _ => false,
        };
        if changed {
            let (settled, total) = self.progress();
            log::info!("Asset loaded: {} ({}/{})", name, settled, total);
        }
        changed
    }

    /// Mark an entry permanently unusable. Returns whether the entry changed.
    pub fn fail(&self, name: &str) -> bool {
        let changed = match self.entries.borrow_mut().get_mut(name) {
            Some(entry) if entry.status != AssetStatus::Failed => {
                entry.status = AssetStatus::Failed;
                entry.resource = None;
                true
            }
            _ => false,
        };
        if changed {
            log::error!("Failed to load asset: {}", name);
        }
        changed
    }

    pub fn status(&self, name: &str) -> Option<AssetStatus> {
        self.entries.borrow().get(name).map(|e| e.status)
    }

    pub fn is_ready(&self, name: &str) -> bool {
        self.status(name) == Some(AssetStatus::Ready)
    }

    /// Every requested entry is either ready or failed
    pub fn is_settled(&self) -> bool {
        self.entries
            .borrow()
            .values()
            .all(|e| e.status != AssetStatus::Pending)
    }

    /// (settled, total) entry counts
    pub fn progress(&self) -> (usize, usize) {
        let entries = self.entries.borrow();
        let settled = entries
            .values()
            .filter(|e| e.status != AssetStatus::Pending)
            .count();
        (settled, entries.len())
    }
}

impl<T: Clone> AssetCache<T> {
    /// The resource, only once it is ready
    pub fn get(&self, name: &str) -> Option<T> {
        self.entries
            .borrow()
            .get(name)
            .filter(|e| e.status == AssetStatus::Ready)
            .and_then(|e| e.resource.clone())
    }
}
