//! # Storage Slots
//!
//! A slot is a single named, durable string value: the Rust counterpart of
//! one browser local-storage key. The store is its only writer and always
//! writes the full cart, never a partial update.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemorySlot                         FileSlot                            │
//! │  ──────────                         ────────                            │
//! │  Arc<Mutex<..>> shared by clones    <data_dir>/<key>.json               │
//! │  optional byte quota                write tmp file → rename             │
//! │  can be switched "unavailable"      missing file = absent slot          │
//! │  tests, ephemeral sessions          CLI / desktop sessions              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::trace;

use crate::error::{SlotError, SlotResult};

/// A durable key-value slot holding the serialized cart.
pub trait CartSlot {
    /// Returns the stored payload, or `None` if the slot is absent.
    fn read(&self) -> SlotResult<Option<String>>;

    /// Replaces the stored payload.
    fn write(&mut self, payload: &str) -> SlotResult<()>;

    /// Deletes the slot. Removing an absent slot is not an error.
    fn remove(&mut self) -> SlotResult<()>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// Memory Slot
// =============================================================================

#[derive(Debug)]
struct MemoryState {
    value: Option<String>,
    quota: Option<usize>,
    available: bool,
    writes: usize,
}

/// In-process slot. Clones share the same storage, so a second
/// `CartStore` opened over a clone behaves like a restarted process.
#[derive(Debug, Clone)]
pub struct MemorySlot {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemorySlot {
    /// Creates an empty, available slot without a quota.
    pub fn new() -> Self {
        MemorySlot {
            inner: Arc::new(Mutex::new(MemoryState {
                value: None,
                quota: None,
                available: true,
                writes: 0,
            })),
        }
    }

    /// Creates an empty slot that rejects payloads larger than `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        let slot = MemorySlot::new();
        if let Ok(mut state) = slot.inner.lock() {
            state.quota = Some(bytes);
        }
        slot
    }

    /// Creates a slot pre-filled with `payload`, as if written by an
    /// earlier session.
    pub fn with_contents(payload: impl Into<String>) -> Self {
        let slot = MemorySlot::new();
        if let Ok(mut state) = slot.inner.lock() {
            state.value = Some(payload.into());
        }
        slot
    }

    /// Simulates the medium being disabled (or re-enabled).
    pub fn set_available(&self, available: bool) {
        if let Ok(mut state) = self.inner.lock() {
            state.available = available;
        }
    }

    /// Current raw payload.
    pub fn contents(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|state| state.value.clone())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().map(|state| state.writes).unwrap_or(0)
    }

    fn state(&self) -> SlotResult<MutexGuard<'_, MemoryState>> {
        let state = self
            .inner
            .lock()
            .map_err(|_| SlotError::Unavailable("memory slot lock poisoned".into()))?;

        if !state.available {
            return Err(SlotError::Unavailable("memory slot disabled".into()));
        }
        Ok(state)
    }
}

impl Default for MemorySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl CartSlot for MemorySlot {
    fn read(&self) -> SlotResult<Option<String>> {
        Ok(self.state()?.value.clone())
    }

    fn write(&mut self, payload: &str) -> SlotResult<()> {
        let mut state = self.state()?;

        if let Some(quota) = state.quota {
            if payload.len() > quota {
                return Err(SlotError::QuotaExceeded {
                    needed: payload.len(),
                    quota,
                });
            }
        }

        state.value = Some(payload.to_string());
        state.writes += 1;
        Ok(())
    }

    fn remove(&mut self) -> SlotResult<()> {
        self.state()?.value = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// =============================================================================
// File Slot
// =============================================================================

/// Slot stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
    key: String,
}

impl FileSlot {
    /// Creates a slot handle. Nothing touches the filesystem until the
    /// first read or write; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        FileSlot {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Path of the slot file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", self.key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CartSlot for FileSlot {
    fn read(&self) -> SlotResult<Option<String>> {
        match fs::read_to_string(self.path()) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, payload: &str) -> SlotResult<()> {
        fs::create_dir_all(&self.dir)?;

        // Readers only ever see the old or the new payload.
        let temp = self.temp_path();
        fs::write(&temp, payload)?;
        fs::rename(&temp, self.path())?;

        trace!(path = ?self.path(), bytes = payload.len(), "Slot file written");
        Ok(())
    }

    fn remove(&mut self) -> SlotResult<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn describe(&self) -> String {
        self.path().display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("basket-slot-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_slot_roundtrip() {
        let mut slot = MemorySlot::new();
        assert_eq!(slot.read().unwrap(), None);

        slot.write("[1]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[1]"));
        assert_eq!(slot.write_count(), 1);

        slot.remove().unwrap();
        assert_eq!(slot.read().unwrap(), None);
        slot.remove().unwrap();
    }

    #[test]
    fn test_memory_slot_clones_share_storage() {
        let mut writer = MemorySlot::new();
        let reader = writer.clone();

        writer.write("shared").unwrap();
        assert_eq!(reader.contents().as_deref(), Some("shared"));
    }

    #[test]
    fn test_memory_slot_quota() {
        let mut slot = MemorySlot::with_quota(4);
        slot.write("1234").unwrap();

        let err = slot.write("12345").unwrap_err();
        assert!(matches!(
            err,
            SlotError::QuotaExceeded {
                needed: 5,
                quota: 4
            }
        ));
        assert_eq!(slot.contents().as_deref(), Some("1234"));
    }

    #[test]
    fn test_memory_slot_unavailable() {
        let mut slot = MemorySlot::with_contents("[]");
        slot.set_available(false);

        assert!(matches!(slot.read(), Err(SlotError::Unavailable(_))));
        assert!(matches!(slot.write("x"), Err(SlotError::Unavailable(_))));
        assert!(matches!(slot.remove(), Err(SlotError::Unavailable(_))));

        slot.set_available(true);
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_slot_missing_is_absent() {
        let mut slot = FileSlot::new(scratch_dir(), "cart");
        assert_eq!(slot.read().unwrap(), None);
        slot.remove().unwrap();
    }

    #[test]
    fn test_file_slot_roundtrip() {
        let dir = scratch_dir();
        let mut slot = FileSlot::new(&dir, "cart");

        slot.write(r#"[{"id":"a"}]"#).unwrap();
        assert_eq!(slot.path(), dir.join("cart.json"));
        assert!(!slot.temp_path().exists());

        let other = FileSlot::new(&dir, "cart");
        assert_eq!(other.read().unwrap().as_deref(), Some(r#"[{"id":"a"}]"#));

        slot.write("[]").unwrap();
        assert_eq!(other.read().unwrap().as_deref(), Some("[]"));

        slot.remove().unwrap();
        assert!(!slot.path().exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_slot_keys_are_independent() {
        let dir = scratch_dir();
        let mut cart = FileSlot::new(&dir, "cart");
        let mut wishlist = FileSlot::new(&dir, "wishlist");

        cart.write("cart").unwrap();
        wishlist.write("wishlist").unwrap();
        cart.remove().unwrap();

        assert_eq!(wishlist.read().unwrap().as_deref(), Some("wishlist"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
