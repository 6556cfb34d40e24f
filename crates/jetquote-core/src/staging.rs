// ── Transient intent staging ──
//
// Single-writer / single-reader handoff between the form step and the
// details step. One slot, one key. Lifecycle: stage -> load (not removed
// on read) -> clear on success, cancellation or expiry.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{BookingIntent, StagedIntent};

/// Logical key of the staged intent.
pub const INTENT_KEY: &str = "bookingIntent";

/// File name `FileStore` keeps the staged intent in.
pub const INTENT_FILE: &str = "booking-intent.json";

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("staged booking intent is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to serialize booking intent: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("staging storage error: {0}")]
    Io(#[from] io::Error),
}

// ── Storage backends ────────────────────────────────────────────────

/// Raw string slot holding the serialized intent.
pub trait IntentStore {
    fn read(&self) -> Result<Option<String>, StagingError>;
    fn write(&self, raw: &str) -> Result<(), StagingError>;
    fn remove(&self) -> Result<(), StagingError>;
}

/// Process-local slot, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with raw contents, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }
}

impl IntentStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StagingError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, raw: &str) -> Result<(), StagingError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StagingError> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

/// One JSON file in the session state directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(INTENT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IntentStore for FileStore {
    fn read(&self) -> Result<Option<String>, StagingError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, raw: &str) -> Result<(), StagingError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // write-then-rename so a reader never sees half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), StagingError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

// ── Staging ─────────────────────────────────────────────────────────

/// Typed access to the staged intent over any `IntentStore`.
#[derive(Debug)]
pub struct Staging<S> {
    store: S,
}

impl<S: IntentStore> Staging<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stamp `intent` and write it, replacing whatever was staged.
    pub fn stage(
        &self,
        intent: BookingIntent,
        now: DateTime<Utc>,
    ) -> Result<StagedIntent, StagingError> {
        let staged = StagedIntent::new(intent, now);
        let raw = serde_json::to_string(&staged).map_err(StagingError::Serialize)?;
        self.store.write(&raw)?;
        info!(
            key = INTENT_KEY,
            trip = %staged.intent.kind(),
            token = %staged.token,
            "booking intent staged"
        );
        Ok(staged)
    }

    /// The staged intent, if any. Malformed contents are an error, not `None`.
    pub fn load(&self) -> Result<Option<StagedIntent>, StagingError> {
        let Some(raw) = self.store.read()? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(StagingError::Malformed)
    }

    pub fn clear(&self) -> Result<(), StagingError> {
        self.store.remove()?;
        debug!(key = INTENT_KEY, "staged booking intent cleared");
        Ok(())
    }

    pub fn is_staged(&self) -> Result<bool, StagingError> {
        Ok(self.store.read()?.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{Endpoint, Leg, Luggage, Passengers, Pets};

    fn intent() -> BookingIntent {
        let endpoint = |id: u64| Endpoint {
            label: format!("Airport {id}"),
            id: Some(id),
            ..Endpoint::default()
        };
        BookingIntent::OneWay(Leg {
            from: endpoint(1),
            to: endpoint(2),
            date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            time: None,
            passengers: Passengers::default(),
            pets: Pets::default(),
            luggage: Luggage::default(),
        })
    }

    fn now() -> DateTime<Utc> {
        "2026-10-14T08:00:00Z".parse().unwrap()
    }

    #[test]
    fn memory_round_trip_and_clear() {
        let staging = Staging::new(MemoryStore::new());
        assert!(staging.load().unwrap().is_none());

        let staged = staging.stage(intent(), now()).unwrap();
        assert_eq!(staging.load().unwrap(), Some(staged.clone()));
        // reading does not consume
        assert_eq!(staging.load().unwrap(), Some(staged));

        staging.clear().unwrap();
        assert!(!staging.is_staged().unwrap());
    }

    #[test]
    fn restaging_mints_a_new_token() {
        let staging = Staging::new(MemoryStore::new());
        let first = staging.stage(intent(), now()).unwrap();
        let second = staging.stage(intent(), now()).unwrap();
        assert_ne!(first.token, second.token);
        assert_eq!(staging.load().unwrap().map(|s| s.token), Some(second.token));
    }

    #[test]
    fn malformed_contents_are_an_error() {
        let staging = Staging::new(MemoryStore::with_raw(r#"{"type":"oneWay"}"#));
        assert!(matches!(staging.load(), Err(StagingError::Malformed(_))));
    }

    #[test]
    fn file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(&dir.path().join("session"));
        let path = store.path().to_path_buf();
        let staging = Staging::new(store);

        staging.clear().unwrap();
        let staged = staging.stage(intent(), now()).unwrap();
        assert!(path.exists());
        assert_eq!(staging.load().unwrap(), Some(staged));

        staging.clear().unwrap();
        assert!(!path.exists());
        assert!(staging.load().unwrap().is_none());
    }
}
