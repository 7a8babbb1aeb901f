//! Persistence boundary for record collections.
//!
//! # Responsibility
//! - Define the blob-level `Store` contract keyed by `Collection`.
//! - Encode/decode whole collections as JSON arrays.
//!
//! # Invariants
//! - Every save overwrites the full collection; there is no delta write.
//! - Loading an absent collection yields an empty sequence, not an error.
//! - Stores never interpret payloads; only this module decodes them.

mod memory_store;
mod sqlite_store;

pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// The five independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Students,
    Attendance,
    Subjects,
    TimeSlots,
    Timetable,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Self::Students,
        Self::Attendance,
        Self::Subjects,
        Self::TimeSlots,
        Self::Timetable,
    ];

    /// Stable key the collection blob is stored under.
    pub fn key(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Attendance => "attendance",
            Self::Subjects => "subjects",
            Self::TimeSlots => "timeslots",
            Self::Timetable => "timetable",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Failure while reading or writing a collection blob.
#[derive(Debug)]
pub enum StoreError {
    /// Backend transport failure.
    Db(DbError),
    /// Blob could not be encoded or decoded.
    Codec {
        collection: Collection,
        source: serde_json::Error,
    },
    /// Backend rejected the write for a reason of its own.
    Unavailable {
        collection: Collection,
        reason: String,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Codec { collection, source } => {
                write!(f, "invalid `{collection}` payload: {source}")
            }
            Self::Unavailable { collection, reason } => {
                write!(f, "store unavailable for `{collection}`: {reason}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec { source, .. } => Some(source),
            Self::Unavailable { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque key-value blob storage for collections.
pub trait Store {
    /// Replaces the blob stored for `collection`.
    fn put(&mut self, collection: Collection, payload: &str) -> StoreResult<()>;
    /// Returns the blob stored for `collection`, if any.
    fn get(&self, collection: Collection) -> StoreResult<Option<String>>;
}

/// Serializes `items` and overwrites the stored collection.
pub fn save_collection<S, T>(store: &mut S, collection: Collection, items: &[T]) -> StoreResult<()>
where
    S: Store + ?Sized,
    T: Serialize,
{
    let payload = serde_json::to_string(items)
        .map_err(|source| StoreError::Codec { collection, source })?;
    store.put(collection, &payload)
}

/// Loads and decodes a stored collection; absent collections are empty.
pub fn load_collection<S, T>(store: &S, collection: Collection) -> StoreResult<Vec<T>>
where
    S: Store + ?Sized,
    T: DeserializeOwned,
{
    match store.get(collection)? {
        Some(payload) => serde_json::from_str(&payload)
            .map_err(|source| StoreError::Codec { collection, source }),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::{load_collection, save_collection, Collection, MemoryStore, Store, StoreError};
    use crate::model::subject::Subject;

    #[test]
    fn collection_keys_are_distinct() {
        let mut keys = Collection::ALL.map(Collection::key).to_vec();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Collection::ALL.len());
    }

    #[test]
    fn load_absent_collection_is_empty() {
        let store = MemoryStore::new();
        let subjects: Vec<Subject> = load_collection(&store, Collection::Subjects).unwrap();
        assert!(subjects.is_empty());
    }

    #[test]
    fn save_overwrites_whole_collection() {
        let mut store = MemoryStore::new();
        save_collection(
            &mut store,
            Collection::Subjects,
            &[Subject::new("CS101", "Core Java"), Subject::new("MAT101", "Calculus")],
        )
        .unwrap();
        save_collection(&mut store, Collection::Subjects, &[Subject::new("PHY101", "Physics")])
            .unwrap();

        let subjects: Vec<Subject> = load_collection(&store, Collection::Subjects).unwrap();
        assert_eq!(subjects, vec![Subject::new("PHY101", "Physics")]);
    }

    #[test]
    fn corrupt_payload_is_codec_error() {
        let mut store = MemoryStore::new();
        store.put(Collection::Students, "{not json").unwrap();

        let err = load_collection::<_, Subject>(&store, Collection::Students).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Codec {
                collection: Collection::Students,
                ..
            }
        ));
        assert!(err.to_string().contains("students"));
    }
}
