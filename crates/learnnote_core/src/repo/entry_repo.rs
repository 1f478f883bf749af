//! Entry repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the ordered entry collection for one catalog.
//! - Assign ids and timestamps on write paths.
//!
//! # Invariants
//! - Enumeration order is insertion order; replacement keeps the slot.
//! - Every write either fully succeeds or leaves the collection unchanged.
//! - Id lookups act on the first match in store order.
//! - Reads return owned snapshots, never live views.

use crate::config::{CatalogConfig, IdPolicy};
use crate::model::entry::{Entry, EntryDraft, EntryId};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type RepoResult<T> = Result<T, RepoError>;

/// Time source returning Unix epoch milliseconds.
pub type Clock = Box<dyn Fn() -> i64 + Send>;

/// Repository error for id-based operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound(EntryId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for entry CRUD operations.
pub trait EntryRepository {
    /// Stores a new entry with a fresh id and `created_at == updated_at`.
    fn add_entry(&mut self, draft: EntryDraft) -> Entry;
    /// Gets one entry by id.
    fn get_entry(&self, id: EntryId) -> RepoResult<Entry>;
    /// Removes one entry and returns it.
    fn remove_entry(&mut self, id: EntryId) -> RepoResult<Entry>;
    /// Replaces every field except `id` and `created_at`.
    fn replace_entry(&mut self, id: EntryId, draft: EntryDraft) -> RepoResult<Entry>;
    /// Returns all entries in store order.
    fn list_entries(&self) -> Vec<Entry>;
    /// Calls `f` for each entry in store order without cloning.
    fn for_each_entry(&self, f: &mut dyn FnMut(&Entry));
}

/// Process-local entry store backed by a `Vec`.
pub struct InMemoryEntryStore {
    entries: Vec<Entry>,
    /// Highest id handed out so far.
    last_id: EntryId,
    id_policy: IdPolicy,
    clock: Clock,
}

impl InMemoryEntryStore {
    /// Creates an empty store using the system clock.
    pub fn new(config: CatalogConfig) -> Self {
        Self::with_clock(config, Box::new(system_now_ms))
    }

    /// Creates an empty store with a caller-provided clock.
    pub fn with_clock(config: CatalogConfig, clock: Clock) -> Self {
        Self {
            entries: Vec::new(),
            last_id: 0,
            id_policy: config.id_policy,
            clock,
        }
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_id(&mut self) -> EntryId {
        let id = match self.id_policy {
            IdPolicy::Monotonic => self.last_id + 1,
            IdPolicy::CountPlusOne => self.entries.len() as EntryId + 1,
        };
        self.last_id = self.last_id.max(id);
        id
    }

    fn position(&self, id: EntryId) -> RepoResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(RepoError::NotFound(id))
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

impl Debug for InMemoryEntryStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEntryStore")
            .field("entries", &self.entries)
            .field("last_id", &self.last_id)
            .field("id_policy", &self.id_policy)
            .finish_non_exhaustive()
    }
}

impl EntryRepository for InMemoryEntryStore {
    fn add_entry(&mut self, draft: EntryDraft) -> Entry {
        let id = self.next_id();
        let entry = Entry::from_draft(id, draft, (self.clock)());
        self.entries.push(entry.clone());
        entry
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Entry> {
        let index = self.position(id)?;
        Ok(self.entries[index].clone())
    }

    fn remove_entry(&mut self, id: EntryId) -> RepoResult<Entry> {
        let index = self.position(id)?;
        Ok(self.entries.remove(index))
    }

    fn replace_entry(&mut self, id: EntryId, draft: EntryDraft) -> RepoResult<Entry> {
        let index = self.position(id)?;
        let replaced = self.entries[index].replaced_with(draft, (self.clock)());
        self.entries[index] = replaced.clone();
        Ok(replaced)
    }

    fn list_entries(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    fn for_each_entry(&self, f: &mut dyn FnMut(&Entry)) {
        for entry in &self.entries {
            f(entry);
        }
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock reads before the epoch.
pub fn system_now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
