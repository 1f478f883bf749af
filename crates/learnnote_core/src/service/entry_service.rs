//! Entry use-case service.
//!
//! # Responsibility
//! - Provide create/get/delete/replace/list/search/tag-count APIs.
//! - Reject invalid drafts before the repository is touched.
//! - Emit metadata-only log events for write paths.
//!
//! # Invariants
//! - `replace_entry` uses full field replacement semantics.
//! - Validation failures take precedence over `NotFound`.
//! - Log lines never include entry text.

use crate::model::entry::{Entry, EntryDraft, EntryId, EntryValidationError};
use crate::repo::entry_repo::{EntryRepository, RepoError};
use crate::search::query::{filter_by_tag, search_entries, tag_frequency, SearchQuery, TagCount};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for entry use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Draft violates a field constraint.
    InvalidInput(EntryValidationError),
    /// Target entry does not exist.
    NotFound(EntryId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl From<EntryValidationError> for ServiceError {
    fn from(value: EntryValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Entry service facade over repository implementations.
#[derive(Debug)]
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validates and stores a new entry.
    pub fn create_entry(&mut self, draft: EntryDraft) -> ServiceResult<Entry> {
        if let Err(err) = draft.validate() {
            warn!("event=entry_create module=service status=error reason=invalid_input");
            return Err(err.into());
        }

        let entry = self.repo.add_entry(draft);
        info!(
            "event=entry_create module=service status=ok id={} tags={}",
            entry.id,
            entry.tags.len()
        );
        Ok(entry)
    }

    /// Gets one entry by id.
    pub fn get_entry(&self, id: EntryId) -> ServiceResult<Entry> {
        Ok(self.repo.get_entry(id)?)
    }

    /// Removes one entry and returns the removed record.
    pub fn delete_entry(&mut self, id: EntryId) -> ServiceResult<Entry> {
        match self.repo.remove_entry(id) {
            Ok(entry) => {
                info!("event=entry_delete module=service status=ok id={id}");
                Ok(entry)
            }
            Err(err) => {
                warn!("event=entry_delete module=service status=error reason=not_found id={id}");
                Err(err.into())
            }
        }
    }

    /// Replaces every field of an entry except `id` and `created_at`.
    pub fn replace_entry(&mut self, id: EntryId, draft: EntryDraft) -> ServiceResult<Entry> {
        if let Err(err) = draft.validate() {
            warn!("event=entry_replace module=service status=error reason=invalid_input id={id}");
            return Err(err.into());
        }

        match self.repo.replace_entry(id, draft) {
            Ok(entry) => {
                info!("event=entry_replace module=service status=ok id={id}");
                Ok(entry)
            }
            Err(err) => {
                warn!("event=entry_replace module=service status=error reason=not_found id={id}");
                Err(err.into())
            }
        }
    }

    /// Lists entries, optionally restricted to one tag.
    pub fn list_entries(&self, tag: Option<&str>) -> Vec<Entry> {
        let entries = filter_by_tag(&self.repo, tag);
        debug!(
            "event=entry_list module=service tag_filter={} results={}",
            tag.is_some(),
            entries.len()
        );
        entries
    }

    /// Searches entries by keyword and/or tag.
    pub fn search_entries(&self, keyword: Option<String>, tag: Option<String>) -> Vec<Entry> {
        let query = SearchQuery::new(keyword, tag);
        let entries = search_entries(&self.repo, &query);
        debug!(
            "event=entry_search module=service keyword={} tag={} results={}",
            query.keyword.is_some(),
            query.tag.is_some(),
            entries.len()
        );
        entries
    }

    /// Counts tag usage across all entries.
    pub fn tag_counts(&self) -> Vec<TagCount> {
        tag_frequency(&self.repo)
    }
}
