//! Read-only queries over an entry repository.
//!
//! # Responsibility
//! - Tag filter, keyword/tag search and tag-frequency aggregation.
//!
//! # Invariants
//! - Queries never mutate the repository.
//! - Results follow store order (tag counts follow count, then first sight).
//! - Tag matching is exact and case-sensitive; keyword matching ignores case.

use crate::model::entry::Entry;
use crate::repo::entry_repo::EntryRepository;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Criteria for [`search_entries`]. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive substring over `term`, `short_description`, `detail`.
    pub keyword: Option<String>,
    /// Exact tag membership.
    pub tag: Option<String>,
}

impl SearchQuery {
    pub fn new(keyword: Option<String>, tag: Option<String>) -> Self {
        Self { keyword, tag }
    }

    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            tag: None,
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            keyword: None,
            tag: Some(tag.into()),
        }
    }
}

/// One row of [`tag_frequency`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Lists entries carrying `tag`, or every entry when `tag` is unset.
pub fn filter_by_tag<R>(repo: &R, tag: Option<&str>) -> Vec<Entry>
where
    R: EntryRepository + ?Sized,
{
    let Some(tag) = non_empty(tag) else {
        return repo.list_entries();
    };
    collect_matching(repo, |entry| entry.has_tag(tag))
}

/// Searches by keyword and/or tag.
///
/// Returns an empty list when neither criterion is set, regardless of the
/// repository contents. Both criteria must hold when both are set.
pub fn search_entries<R>(repo: &R, query: &SearchQuery) -> Vec<Entry>
where
    R: EntryRepository + ?Sized,
{
    let keyword = non_empty(query.keyword.as_deref()).map(str::to_lowercase);
    let tag = non_empty(query.tag.as_deref());
    if keyword.is_none() && tag.is_none() {
        return Vec::new();
    }

    collect_matching(repo, |entry| {
        let keyword_ok = keyword
            .as_deref()
            .map_or(true, |needle| entry.mentions_lowercase(needle));
        let tag_ok = tag.map_or(true, |tag| entry.has_tag(tag));
        keyword_ok && tag_ok
    })
}

/// Counts tag occurrences across all entries.
///
/// A tag repeated within one entry counts once per occurrence. Sorted by
/// count descending; equal counts keep first-encountered order.
pub fn tag_frequency<R>(repo: &R) -> Vec<TagCount>
where
    R: EntryRepository + ?Sized,
{
    let mut counts: Vec<TagCount> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    repo.for_each_entry(&mut |entry: &Entry| {
        for tag in &entry.tags {
            match slots.get(tag) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    slots.insert(tag.clone(), counts.len());
                    counts.push(TagCount {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
        }
    });

    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|left, right| right.count.cmp(&left.count));
    counts
}

fn collect_matching<R>(repo: &R, mut predicate: impl FnMut(&Entry) -> bool) -> Vec<Entry>
where
    R: EntryRepository + ?Sized,
{
    let mut matched = Vec::new();
    repo.for_each_entry(&mut |entry: &Entry| {
        if predicate(entry) {
            matched.push(entry.clone());
        }
    });
    matched
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
