//! In-process backend for tests and throwaway sessions.

use std::cell::RefCell;
use std::rc::Rc;

use super::WeekDataRepository;
use crate::schedule::WeekData;

/// Keeps the serialized snapshot in memory.
///
/// Clones share the same slot, so a test can hand one clone to a store and
/// inspect what was persisted through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository that already holds `data`.
    pub fn with_snapshot(data: &WeekData) -> Self {
        let repo = Self::new();
        repo.save(data);
        repo
    }

    /// Replace the stored document with raw text, bypassing serialization.
    pub fn put_raw(&self, json: &str) {
        *self.slot.borrow_mut() = Some(json.to_string());
    }
}

impl WeekDataRepository for MemoryRepository {
    fn name(&self) -> &str {
        "memory"
    }

    fn save(&self, data: &WeekData) -> bool {
        match serde_json::to_string(data) {
            Ok(json) => {
                *self.slot.borrow_mut() = Some(json);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize week data");
                false
            }
        }
    }

    fn load(&self) -> Option<WeekData> {
        let slot = self.slot.borrow();
        let json = slot.as_deref()?;
        serde_json::from_str(json)
            .map_err(|e| tracing::error!(error = %e, "failed to parse week data"))
            .ok()
    }

    fn clear(&self) -> bool {
        self.slot.borrow_mut().take();
        true
    }

    fn exists(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::sample::sample_week;

    #[test]
    fn clones_share_storage() {
        let repo = MemoryRepository::new();
        let handle = repo.clone();
        let week = sample_week();
        assert!(repo.save(&week));
        assert_eq!(handle.load(), Some(week));
        assert!(handle.clear());
        assert!(!repo.exists());
    }

    #[test]
    fn garbage_loads_as_none() {
        let repo = MemoryRepository::new();
        repo.put_raw("nope");
        assert!(repo.exists());
        assert_eq!(repo.load(), None);
    }
}
