pub mod config;
pub mod event_store;
pub mod port;

pub use event_store::{EventMap, EventStore, HydrateOutcome, PersistError, StoreState, EVENTS_STORAGE_KEY};
pub use port::{FileStore, KeyValueStore, MemoryStore, StorageError};
