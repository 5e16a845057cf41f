//! In-memory event map kept in sync with a single persisted JSON snapshot.
//!
//! The snapshot is read once when the store is built and rewritten in full
//! after every mutation that leaves the map non-empty.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::calendar::{DateKey, Event};
use crate::storage::port::{KeyValueStore, StorageError};

pub const EVENTS_STORAGE_KEY: &str = "calendarEvents";

pub type EventMap = BTreeMap<DateKey, Vec<Event>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Hydrated,
    Mutated(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrateOutcome {
    Absent,
    Loaded { dates: usize, events: usize },
    Discarded,
    Unreadable,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to encode events: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to write events: {0}")]
    Storage(#[from] StorageError),
    #[error("Saving disabled: stored events could not be read at startup")]
    Blocked,
}

pub struct EventStore {
    storage: Box<dyn KeyValueStore>,
    events: EventMap,
    state: StoreState,
    hydrate_outcome: HydrateOutcome,
    last_persist_error: Option<PersistError>,
}

impl EventStore {
    /// Loads the stored snapshot. Missing or unreadable storage yields an
    /// empty map; an undecodable snapshot is deleted and also yields an
    /// empty map.
    ///
    /// After an unreadable snapshot nothing is written for the rest of the
    /// session, so the events still in storage are never overwritten.
    pub fn hydrate(mut storage: Box<dyn KeyValueStore>) -> Self {
        let (events, hydrate_outcome) = match storage.get(EVENTS_STORAGE_KEY) {
            Ok(None) => {
                tracing::info!("No stored events found");
                (EventMap::new(), HydrateOutcome::Absent)
            }
            Ok(Some(raw)) => match serde_json::from_slice::<EventMap>(&raw) {
                Ok(events) => {
                    let dates = events.len();
                    let count = events.values().map(Vec::len).sum();
                    tracing::info!("Loaded {} events across {} dates", count, dates);
                    (events, HydrateOutcome::Loaded { dates, events: count })
                }
                Err(e) => {
                    tracing::error!("Stored events are corrupt, discarding: {}", e);
                    if let Err(e) = storage.remove(EVENTS_STORAGE_KEY) {
                        tracing::error!("Failed to delete corrupt events: {}", e);
                    }
                    (EventMap::new(), HydrateOutcome::Discarded)
                }
            },
            Err(e) => {
                tracing::error!("Failed to read stored events: {}", e);
                (EventMap::new(), HydrateOutcome::Unreadable)
            }
        };

        Self {
            storage,
            events,
            state: StoreState::Hydrated,
            hydrate_outcome,
            last_persist_error: None,
        }
    }

    /// Appends `event` under `key` and persists the whole map. Other dates'
    /// lists are left untouched. A failed write keeps the in-memory update.
    pub fn append_event(&mut self, key: DateKey, event: Event) -> &EventMap {
        if event.date_key() != key {
            tracing::warn!(
                "Event {} dated {} filed under {}",
                event.id,
                event.date_key(),
                key
            );
        }

        tracing::debug!("Appending event {} under {}", event.id, key);
        self.events.entry(key).or_default().push(event);
        self.state = match self.state {
            StoreState::Hydrated => StoreState::Mutated(1),
            StoreState::Mutated(n) => StoreState::Mutated(n + 1),
        };

        self.persist();
        &self.events
    }

    pub fn lookup(&self, key: &DateKey) -> &[Event] {
        self.events.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn events(&self) -> &EventMap {
        &self.events
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn hydrate_outcome(&self) -> &HydrateOutcome {
        &self.hydrate_outcome
    }

    pub fn last_persist_error(&self) -> Option<&PersistError> {
        self.last_persist_error.as_ref()
    }

    pub fn event_count(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn max_event_id(&self) -> u64 {
        self.events
            .values()
            .flatten()
            .map(|event| event.id)
            .max()
            .unwrap_or(0)
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    // An empty map is never written, so a previously stored snapshot
    // survives if the map is ever emptied.
    fn persist(&mut self) {
        if self.events.is_empty() {
            return;
        }

        if self.hydrate_outcome == HydrateOutcome::Unreadable {
            tracing::warn!("Not saving events: stored snapshot was never loaded");
            self.last_persist_error = Some(PersistError::Blocked);
            return;
        }

        match self.write_snapshot() {
            Ok(bytes) => {
                tracing::debug!("Saved {} bytes of events", bytes);
                self.last_persist_error = None;
            }
            Err(e) => {
                tracing::error!("Error saving events: {}", e);
                self.last_persist_error = Some(e);
            }
        }
    }

    fn write_snapshot(&mut self) -> Result<usize, PersistError> {
        let encoded = serde_json::to_vec(&self.events)?;
        self.storage.set(EVENTS_STORAGE_KEY, &encoded)?;
        Ok(encoded.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EventDraft;
    use crate::storage::port::MemoryStore;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::io;

    /// Wraps a `MemoryStore`, failing the first `fail_gets` reads and every
    /// `remove` when `fail_removes` is set.
    struct FlakyStore {
        inner: MemoryStore,
        fail_gets: Cell<u32>,
        fail_removes: bool,
    }

    impl FlakyStore {
        fn new(inner: MemoryStore) -> Self {
            Self { inner, fail_gets: Cell::new(0), fail_removes: false }
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            let remaining = self.fail_gets.get();
            if remaining > 0 {
                self.fail_gets.set(remaining - 1);
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read denied").into());
            }
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            if self.fail_removes {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "delete denied").into());
            }
            self.inner.remove(key)
        }
    }

    fn key(raw: &str) -> DateKey {
        DateKey::parse(raw).unwrap()
    }

    fn event_on(id: u64, raw_date: &str, title: &str) -> Event {
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").unwrap();
        EventDraft::new(title, "10:00", "").into_event(id, date)
    }

    fn stored_map(store: &EventStore) -> EventMap {
        let raw = store.storage().get(EVENTS_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_slice(&raw).unwrap()
    }

    #[test]
    fn absent_snapshot_hydrates_empty_without_writing() {
        let store = EventStore::hydrate(Box::new(MemoryStore::new()));

        assert!(store.events().is_empty());
        assert_eq!(store.state(), StoreState::Hydrated);
        assert_eq!(store.hydrate_outcome(), &HydrateOutcome::Absent);
        assert!(store.storage().get(EVENTS_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn corrupt_snapshot_is_discarded_and_deleted() {
        let storage = MemoryStore::new().with_entry(EVENTS_STORAGE_KEY, "{not json");

        let store = EventStore::hydrate(Box::new(storage));

        assert!(store.events().is_empty());
        assert_eq!(store.hydrate_outcome(), &HydrateOutcome::Discarded);
        assert!(store.storage().get(EVENTS_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn wrong_shape_counts_as_corrupt() {
        let storage = MemoryStore::new().with_entry(EVENTS_STORAGE_KEY, r#"{"2024-01-01": "oops"}"#);

        let store = EventStore::hydrate(Box::new(storage));

        assert_eq!(store.hydrate_outcome(), &HydrateOutcome::Discarded);
    }

    #[test]
    fn snapshot_from_browser_hydrates_as_is() {
        let raw = r#"{"2024-03-15":[{"id":1710460800000,"title":"Standup","time":"09:00","description":"","date":"2024-03-15T05:00:00.000Z"}]}"#;
        let storage = MemoryStore::new().with_entry(EVENTS_STORAGE_KEY, raw);

        let store = EventStore::hydrate(Box::new(storage));

        assert_eq!(store.hydrate_outcome(), &HydrateOutcome::Loaded { dates: 1, events: 1 });
        assert_eq!(store.lookup(&key("2024-03-15"))[0].title, "Standup");
        assert_eq!(store.max_event_id(), 1710460800000);
    }

    #[test]
    fn persisted_map_hydrates_back_identically() {
        let mut store = EventStore::hydrate(Box::new(MemoryStore::new()));
        store.append_event(key("2024-01-01"), event_on(1, "2024-01-01", "New year"));
        store.append_event(key("2024-01-01"), event_on(2, "2024-01-01", "Brunch"));
        store.append_event(key("2024-02-02"), event_on(3, "2024-02-02", "Groundhog"));
        let expected = store.events().clone();

        let raw = store.storage().get(EVENTS_STORAGE_KEY).unwrap().unwrap();
        let rehydrated = EventStore::hydrate(Box::new(
            MemoryStore::new().with_entry(EVENTS_STORAGE_KEY, raw),
        ));

        assert_eq!(rehydrated.events(), &expected);
    }

    #[test]
    fn append_preserves_other_dates() {
        let mut store = EventStore::hydrate(Box::new(MemoryStore::new()));
        let e1 = event_on(1, "2024-01-01", "First");
        let e2 = event_on(2, "2024-02-02", "Second");
        store.append_event(key("2024-01-01"), e1.clone());

        let updated = store.append_event(key("2024-02-02"), e2.clone());

        assert_eq!(updated.get(&key("2024-01-01")), Some(&vec![e1]));
        assert_eq!(updated.get(&key("2024-02-02")), Some(&vec![e2]));
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut store = EventStore::hydrate(Box::new(MemoryStore::new()));
        store.append_event(key("2024-03-15"), event_on(2, "2024-03-15", "Later"));
        store.append_event(key("2024-03-15"), event_on(1, "2024-03-15", "Earlier id"));

        let titles: Vec<&str> = store
            .lookup(&key("2024-03-15"))
            .iter()
            .map(|e| e.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Later", "Earlier id"]);
    }

    #[test]
    fn every_append_rewrites_full_snapshot() {
        let mut store = EventStore::hydrate(Box::new(MemoryStore::new()));
        store.append_event(key("2024-01-01"), event_on(1, "2024-01-01", "A"));
        store.append_event(key("2024-01-02"), event_on(2, "2024-01-02", "B"));

        assert_eq!(&stored_map(&store), store.events());
    }

    #[test]
    fn state_counts_mutations() {
        let mut store = EventStore::hydrate(Box::new(MemoryStore::new()));
        store.append_event(key("2024-01-01"), event_on(1, "2024-01-01", "A"));
        assert_eq!(store.state(), StoreState::Mutated(1));

        store.append_event(key("2024-01-01"), event_on(2, "2024-01-01", "B"));
        assert_eq!(store.state(), StoreState::Mutated(2));
    }

    #[test]
    fn lookup_is_read_only_and_repeatable() {
        let mut store = EventStore::hydrate(Box::new(MemoryStore::new()));
        store.append_event(key("2024-01-01"), event_on(1, "2024-01-01", "A"));

        let first = store.lookup(&key("2024-01-01")).to_vec();
        let second = store.lookup(&key("2024-01-01")).to_vec();

        assert_eq!(first, second);
        assert_eq!(store.state(), StoreState::Mutated(1));
        assert!(store.lookup(&key("2030-01-01")).is_empty());
    }

    #[test]
    fn failed_write_keeps_in_memory_event() {
        let mut store = EventStore::hydrate(Box::new(MemoryStore::with_quota(8)));

        store.append_event(key("2024-01-01"), event_on(1, "2024-01-01", "A"));

        assert_eq!(store.lookup(&key("2024-01-01")).len(), 1);
        assert!(matches!(
            store.last_persist_error(),
            Some(PersistError::Storage(StorageError::QuotaExceeded { .. }))
        ));
        assert!(store.storage().get(EVENTS_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn successful_write_records_no_diagnostic() {
        let mut store = EventStore::hydrate(Box::new(MemoryStore::new()));
        store.append_event(key("2024-01-01"), event_on(1, "2024-01-01", "A"));

        assert!(store.last_persist_error().is_none());
    }

    #[test]
    fn unreadable_snapshot_is_never_overwritten() {
        let old = r#"{"2024-01-01":[{"id":1,"title":"Old","time":"09:00","description":"","date":"2024-01-01T00:00:00Z"}]}"#;
        let storage = FlakyStore {
            fail_gets: Cell::new(1),
            ..FlakyStore::new(MemoryStore::new().with_entry(EVENTS_STORAGE_KEY, old))
        };
        let mut store = EventStore::hydrate(Box::new(storage));
        assert_eq!(store.hydrate_outcome(), &HydrateOutcome::Unreadable);
        assert!(store.events().is_empty());

        store.append_event(key("2024-03-15"), event_on(2, "2024-03-15", "New"));

        assert_eq!(store.lookup(&key("2024-03-15")).len(), 1);
        assert!(matches!(store.last_persist_error(), Some(PersistError::Blocked)));
        let raw = store.storage().get(EVENTS_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, old.as_bytes().to_vec());
    }

    #[test]
    fn corrupt_snapshot_that_cannot_be_deleted_still_hydrates_empty() {
        let storage = FlakyStore {
            fail_removes: true,
            ..FlakyStore::new(MemoryStore::new().with_entry(EVENTS_STORAGE_KEY, "{not json"))
        };

        let mut store = EventStore::hydrate(Box::new(storage));

        assert!(store.events().is_empty());
        assert_eq!(store.hydrate_outcome(), &HydrateOutcome::Discarded);

        store.append_event(key("2024-01-01"), event_on(1, "2024-01-01", "A"));
        assert!(store.last_persist_error().is_none());
        assert_eq!(&stored_map(&store), store.events());
    }
}
