//! Board slot persistence contract and implementations.
//!
//! # Responsibility
//! - Define the `load`/`save` capability the project store writes through.
//! - Encode the ordered project sequence into one JSON slot payload.
//! - Provide SQLite-backed and in-memory slot stores.
//!
//! # Invariants
//! - A slot holds the full ordered sequence; saves replace it wholesale.
//! - Decoding rejects only payloads that are not a well-formed project list.
//!   Record-level repair (blank titles, duplicate ids) belongs to the store.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::project::Project;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot name used when no override is configured.
pub const DEFAULT_SLOT_KEY: &str = "mo_projects_v1";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer failures for board slots.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Sequence could not be serialized.
    Encode(serde_json::Error),
    /// Stored payload is not a well-formed project list.
    Decode(serde_json::Error),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Backend refused the operation (quota, read-only medium, test fault).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode project slot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode project slot: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::Unavailable(message) => write!(f, "slot storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save capability injected into the project store.
pub trait ProjectPersistence {
    /// Reads the stored sequence.
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    fn load(&self) -> RepoResult<Option<Vec<Project>>>;

    /// Replaces the stored sequence with `projects`, preserving order.
    fn save(&self, projects: &[Project]) -> RepoResult<()>;
}

impl<T: ProjectPersistence + ?Sized> ProjectPersistence for &T {
    fn load(&self) -> RepoResult<Option<Vec<Project>>> {
        (**self).load()
    }

    fn save(&self, projects: &[Project]) -> RepoResult<()> {
        (**self).save(projects)
    }
}

/// Serializes the ordered sequence into a slot payload.
pub fn encode_projects(projects: &[Project]) -> RepoResult<String> {
    serde_json::to_string(projects).map_err(RepoError::Encode)
}

/// Parses a slot payload.
///
/// Records are returned as stored; invariant checks happen when the store
/// adopts them.
///
/// # Errors
/// - `Decode` for malformed JSON, unknown enum labels or missing fields.
pub fn decode_projects(payload: &str) -> RepoResult<Vec<Project>> {
    serde_json::from_str(payload).map_err(RepoError::Decode)
}

/// SQLite-backed board slot.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
    slot_key: String,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Binds a repository to one slot of a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not the latest.
    pub fn try_new(conn: &'conn Connection, slot_key: impl Into<String>) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        Ok(Self {
            conn,
            slot_key: slot_key.into(),
        })
    }

    pub fn slot_key(&self) -> &str {
        self.slot_key.as_str()
    }

    /// Returns the raw stored payload, if any.
    pub fn raw_payload(&self) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM kv_slots WHERE slot_key = ?1;",
                [self.slot_key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    /// Removes the slot so the next load reports it as absent.
    pub fn clear(&self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM kv_slots WHERE slot_key = ?1;",
            [self.slot_key.as_str()],
        )?;
        Ok(())
    }
}

impl ProjectPersistence for SqliteProjectRepository<'_> {
    fn load(&self) -> RepoResult<Option<Vec<Project>>> {
        match self.raw_payload()? {
            Some(payload) => decode_projects(&payload).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, projects: &[Project]) -> RepoResult<()> {
        let payload = encode_projects(projects)?;
        self.conn.execute(
            "INSERT INTO kv_slots (slot_key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![self.slot_key.as_str(), payload],
        )?;
        Ok(())
    }
}

/// In-process board slot holding the encoded payload.
///
/// Goes through the same JSON codec as the SQLite slot. Saves can be forced
/// to fail to exercise degraded-persistence paths.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    payload: RefCell<Option<String>>,
    fail_saves: Cell<bool>,
    save_count: Cell<usize>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with a raw payload (valid or not).
    pub fn with_payload(payload: impl Into<String>) -> Self {
        let repo = Self::default();
        *repo.payload.borrow_mut() = Some(payload.into());
        repo
    }

    /// Makes subsequent saves fail with `RepoError::Unavailable`.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl ProjectPersistence for MemorySlotRepository {
    fn load(&self) -> RepoResult<Option<Vec<Project>>> {
        match self.payload.borrow().as_deref() {
            Some(payload) => decode_projects(payload).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, projects: &[Project]) -> RepoResult<()> {
        if self.fail_saves.get() {
            return Err(RepoError::Unavailable("memory slot rejects writes".to_string()));
        }
        let payload = encode_projects(projects)?;
        *self.payload.borrow_mut() = Some(payload);
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}
