use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use relaydesk_shared::SubmissionKind;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cooldown state unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("cooldown state is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Durable storage for the last successful submission time of each kind,
/// in epoch milliseconds.
pub trait CooldownStore {
    fn last_submitted(&self, kind: SubmissionKind) -> Result<Option<i64>, StoreError>;

    fn record(&self, kind: SubmissionKind, at_ms: i64) -> Result<(), StoreError>;
}

impl<S: CooldownStore + ?Sized> CooldownStore for &S {
    fn last_submitted(&self, kind: SubmissionKind) -> Result<Option<i64>, StoreError> {
        (**self).last_submitted(kind)
    }

    fn record(&self, kind: SubmissionKind, at_ms: i64) -> Result<(), StoreError> {
        (**self).record(kind, at_ms)
    }
}

/// JSON object on disk keyed by [`SubmissionKind::storage_key`].
#[derive(Debug, Clone)]
pub struct FileCooldownStore {
    path: PathBuf,
}

impl FileCooldownStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<BTreeMap<String, i64>, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CooldownStore for FileCooldownStore {
    fn last_submitted(&self, kind: SubmissionKind) -> Result<Option<i64>, StoreError> {
        Ok(self.read()?.get(kind.storage_key()).copied())
    }

    fn record(&self, kind: SubmissionKind, at_ms: i64) -> Result<(), StoreError> {
        // An unreadable file is replaced so the marker takes effect again.
        let mut state = match self.read() {
            Err(StoreError::Corrupted(err)) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Overwriting corrupted cooldown state");
                BTreeMap::new()
            }
            state => state?,
        };
        state.insert(kind.storage_key().to_owned(), at_ms);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&state)?)?;

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryCooldownStore {
    entries: Mutex<HashMap<SubmissionKind, i64>>,
}

impl CooldownStore for MemoryCooldownStore {
    fn last_submitted(&self, kind: SubmissionKind) -> Result<Option<i64>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&kind).copied())
    }

    fn record(&self, kind: SubmissionKind, at_ms: i64) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(kind, at_ms);
        Ok(())
    }
}

/// Fixed window during which a new submission of the same kind is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    window: Duration,
}

impl Cooldown {
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time left before the next submission is allowed, `None` once the window
    /// has elapsed. A marker from the future counts as a full window.
    pub fn remaining(&self, last_ms: i64, now_ms: i64) -> Option<Duration> {
        let window_ms = i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX);
        let elapsed_ms = now_ms.saturating_sub(last_ms).max(0);

        if elapsed_ms >= window_ms {
            return None;
        }

        let left_ms = window_ms - elapsed_ms;
        Some(Duration::from_millis(left_ms.unsigned_abs()))
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

/// "Please wait 3 hours before submitting again." Rounded up so the message
/// never promises a shorter wait than the real one.
pub fn wait_message(remaining: Duration) -> String {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);

    let (amount, unit) = if secs >= 3600 {
        (secs.div_ceil(3600), "hour")
    } else if secs >= 60 {
        (secs.div_ceil(60), "minute")
    } else {
        (secs.max(1), "second")
    };

    let plural = if amount == 1 { "" } else { "s" };
    format!("Please wait {amount} {unit}{plural} before submitting again.")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    #[test]
    fn test_remaining_inside_window() {
        let cooldown = Cooldown::new(Duration::from_secs(2 * 3600));

        assert_eq!(
            cooldown.remaining(0, HOUR_MS),
            Some(Duration::from_millis(HOUR_MS as u64))
        );
        assert_eq!(cooldown.remaining(0, 2 * HOUR_MS), None);
        assert_eq!(cooldown.remaining(0, 3 * HOUR_MS), None);
    }

    #[test]
    fn test_marker_from_the_future_blocks_a_full_window() {
        let cooldown = Cooldown::new(Duration::from_secs(60));

        assert_eq!(cooldown.remaining(10_000, 0), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_remaining_strictly_decreases() {
        let cooldown = Cooldown::new(Duration::from_secs(30));
        let remaining = (0..30)
            .map(|s| cooldown.remaining(0, s * 1000).unwrap())
            .collect::<Vec<_>>();

        assert!(remaining.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(cooldown.remaining(0, 30_000), None);
    }

    #[test]
    fn test_wait_message_units() {
        assert_eq!(
            wait_message(Duration::from_secs(5 * 3600)),
            "Please wait 5 hours before submitting again."
        );
        assert_eq!(
            wait_message(Duration::from_secs(3600 + 1)),
            "Please wait 2 hours before submitting again."
        );
        assert_eq!(
            wait_message(Duration::from_secs(90)),
            "Please wait 2 minutes before submitting again."
        );
        assert_eq!(
            wait_message(Duration::from_millis(500)),
            "Please wait 1 second before submitting again."
        );
        assert_eq!(
            wait_message(Duration::from_secs(42)),
            "Please wait 42 seconds before submitting again."
        );
    }

    #[test]
    fn test_record_replaces_corrupted_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("cooldown.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = FileCooldownStore::new(&path);
        assert!(matches!(
            store.last_submitted(SubmissionKind::Order),
            Err(StoreError::Corrupted(_))
        ));

        store.record(SubmissionKind::Order, 1_000).unwrap();

        assert_eq!(store.last_submitted(SubmissionKind::Order).unwrap(), Some(1_000));
        assert_eq!(store.last_submitted(SubmissionKind::Ticket).unwrap(), None);
    }

    #[test]
    fn test_memory_store_keeps_kinds_apart() {
        let store = MemoryCooldownStore::default();
        store.record(SubmissionKind::Ticket, 42).unwrap();

        assert_eq!(store.last_submitted(SubmissionKind::Ticket).unwrap(), Some(42));
        assert_eq!(store.last_submitted(SubmissionKind::Order).unwrap(), None);
    }
}
