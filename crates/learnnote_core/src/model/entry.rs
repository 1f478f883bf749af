//! Learning entry domain model.
//!
//! # Responsibility
//! - Define the canonical record for one learned term.
//! - Validate caller-supplied field sets before they reach the store.
//!
//! # Invariants
//! - `id` is assigned by the store, never by callers.
//! - `created_at <= updated_at` for every stored entry.
//! - Replacement builds a new record; an existing snapshot is never mutated.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned entry identifier.
pub type EntryId = u64;

/// Minimum character count for `short_description`.
pub const SHORT_DESCRIPTION_MIN_CHARS: usize = 3;

/// One learning note as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned identifier.
    pub id: EntryId,
    /// Term or topic name.
    pub term: String,
    /// One-line explanation, at least three characters.
    pub short_description: String,
    /// Longer free-form notes.
    pub detail: Option<String>,
    /// Flat labels in caller order. Duplicates are kept as given.
    pub tags: Vec<String>,
    /// Citation or reference URL.
    pub source: Option<String>,
    /// Unix epoch milliseconds. Fixed at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed by every replacement.
    pub updated_at: i64,
}

/// Caller-supplied fields for creating or replacing an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub term: String,
    pub short_description: String,
    #[serde(default)]
    pub detail: Option<String>,
    /// Absent and `null` both mean no tags.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Field constraint violation detected before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// `term` has no characters.
    EmptyTerm,
    /// `short_description` is shorter than [`SHORT_DESCRIPTION_MIN_CHARS`].
    ShortDescriptionTooShort { length: usize, min: usize },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTerm => write!(f, "term must not be empty"),
            Self::ShortDescriptionTooShort { length, min } => write!(
                f,
                "short_description must have at least {min} characters, got {length}"
            ),
        }
    }
}

impl Error for EntryValidationError {}

impl EntryDraft {
    /// Creates a draft with the two required fields and empty optionals.
    pub fn new(term: impl Into<String>, short_description: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            short_description: short_description.into(),
            ..Self::default()
        }
    }

    /// Sets `detail`.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Replaces the tag list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets `source`.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Checks field constraints.
    ///
    /// Lengths are counted in characters, without trimming.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.term.is_empty() {
            return Err(EntryValidationError::EmptyTerm);
        }

        let length = self.short_description.chars().count();
        if length < SHORT_DESCRIPTION_MIN_CHARS {
            return Err(EntryValidationError::ShortDescriptionTooShort {
                length,
                min: SHORT_DESCRIPTION_MIN_CHARS,
            });
        }

        Ok(())
    }
}

impl Entry {
    /// Materializes a draft as a new record with store-assigned identity.
    pub fn from_draft(id: EntryId, draft: EntryDraft, now: i64) -> Self {
        Self {
            id,
            term: draft.term,
            short_description: draft.short_description,
            detail: draft.detail,
            tags: draft.tags,
            source: draft.source,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a new record carrying this entry's `id` and `created_at` with
    /// every other field taken from `draft`.
    ///
    /// `updated_at` never moves backwards, even if `now` does.
    pub fn replaced_with(&self, draft: EntryDraft, now: i64) -> Self {
        Self {
            id: self.id,
            term: draft.term,
            short_description: draft.short_description,
            detail: draft.detail,
            tags: draft.tags,
            source: draft.source,
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        }
    }

    /// Whether `tag` is one of this entry's labels (exact, case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|value| value == tag)
    }

    /// Whether `term`, `short_description` or `detail` contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn mentions_lowercase(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(self.term.as_str())
            || contains(self.short_description.as_str())
            || self.detail.as_deref().is_some_and(contains)
    }
}
