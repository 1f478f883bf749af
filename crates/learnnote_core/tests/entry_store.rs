use learnnote_core::{
    CatalogConfig, EntryDraft, EntryRepository, IdPolicy, InMemoryEntryStore, RepoError,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

fn manual_clock(start: i64) -> (Arc<AtomicI64>, InMemoryEntryStore) {
    manual_clock_with(start, CatalogConfig::default())
}

fn manual_clock_with(
    start: i64,
    config: CatalogConfig,
) -> (Arc<AtomicI64>, InMemoryEntryStore) {
    let now = Arc::new(AtomicI64::new(start));
    let reader = Arc::clone(&now);
    let store =
        InMemoryEntryStore::with_clock(config, Box::new(move || reader.load(Ordering::SeqCst)));
    (now, store)
}

fn draft(term: &str) -> EntryDraft {
    EntryDraft::new(term, format!("{term} description"))
}

#[test]
fn add_assigns_sequential_ids_starting_at_one() {
    let mut store = InMemoryEntryStore::default();
    let ids = (0..5)
        .map(|idx| store.add_entry(draft(&format!("term {idx}"))).id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(store.len(), 5);
}

#[test]
fn add_then_get_returns_equal_entry_with_matching_timestamps() {
    let (_, mut store) = manual_clock(1_000);
    let added = store.add_entry(draft("Rust").with_tags(["lang"]).with_source("book"));

    let loaded = store.get_entry(added.id).unwrap();
    assert_eq!(loaded, added);
    assert_eq!(loaded.created_at, 1_000);
    assert_eq!(loaded.created_at, loaded.updated_at);
    assert_eq!(loaded.source.as_deref(), Some("book"));
}

#[test]
fn get_missing_id_returns_not_found() {
    let store = InMemoryEntryStore::default();
    assert_eq!(store.get_entry(42).unwrap_err(), RepoError::NotFound(42));
}

#[test]
fn replace_preserves_id_and_created_at_and_refreshes_updated_at() {
    let (now, mut store) = manual_clock(1_000);
    let added = store.add_entry(draft("old").with_tags(["a", "b"]).with_detail("d"));

    now.store(2_500, Ordering::SeqCst);
    let replaced = store
        .replace_entry(added.id, EntryDraft::new("new", "new text").with_tags(["c"]))
        .unwrap();

    assert_eq!(replaced.id, added.id);
    assert_eq!(replaced.created_at, 1_000);
    assert_eq!(replaced.updated_at, 2_500);
    assert_eq!(replaced.term, "new");
    assert_eq!(replaced.short_description, "new text");
    assert_eq!(replaced.detail, None);
    assert_eq!(replaced.tags, vec!["c".to_string()]);
    assert_eq!(store.get_entry(added.id).unwrap(), replaced);
}

#[test]
fn replace_keeps_store_position() {
    let mut store = InMemoryEntryStore::default();
    store.add_entry(draft("first"));
    store.add_entry(draft("second"));
    store.add_entry(draft("third"));

    store.replace_entry(2, draft("middle")).unwrap();
    let terms = store
        .list_entries()
        .into_iter()
        .map(|entry| entry.term)
        .collect::<Vec<_>>();
    assert_eq!(terms, vec!["first", "middle", "third"]);
}

#[test]
fn replace_with_clock_going_backwards_keeps_updated_at() {
    let (now, mut store) = manual_clock(5_000);
    let added = store.add_entry(draft("t"));
    now.store(4_000, Ordering::SeqCst);
    let replaced = store.replace_entry(added.id, draft("t2")).unwrap();
    assert_eq!(replaced.updated_at, 5_000);
}

#[test]
fn replace_missing_id_leaves_store_unchanged() {
    let mut store = InMemoryEntryStore::default();
    store.add_entry(draft("only"));
    let before = store.list_entries();

    let err = store.replace_entry(9, draft("ghost")).unwrap_err();
    assert_eq!(err, RepoError::NotFound(9));
    assert_eq!(store.list_entries(), before);
}

#[test]
fn remove_returns_record_and_subsequent_get_is_not_found() {
    let mut store = InMemoryEntryStore::default();
    store.add_entry(draft("a"));
    let target = store.add_entry(draft("b"));
    store.add_entry(draft("c"));

    let removed = store.remove_entry(target.id).unwrap();
    assert_eq!(removed, target);
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.get_entry(target.id).unwrap_err(),
        RepoError::NotFound(target.id)
    );
    assert_eq!(
        store.remove_entry(target.id).unwrap_err(),
        RepoError::NotFound(target.id)
    );
}

#[test]
fn monotonic_policy_never_reuses_ids_after_removal() {
    let mut store = InMemoryEntryStore::default();
    for term in ["a", "b", "c"] {
        store.add_entry(draft(term));
    }
    store.remove_entry(2).unwrap();
    let next = store.add_entry(draft("d"));
    assert_eq!(next.id, 4);

    store.remove_entry(4).unwrap();
    let after_tail_removal = store.add_entry(draft("e"));
    assert_eq!(after_tail_removal.id, 5);
}

#[test]
fn count_plus_one_policy_reproduces_id_collision_after_removal() {
    let (_, mut store) = manual_clock_with(
        0,
        CatalogConfig {
            id_policy: IdPolicy::CountPlusOne,
        },
    );
    for term in ["a", "b", "c"] {
        store.add_entry(draft(term));
    }
    store.remove_entry(2).unwrap();

    let colliding = store.add_entry(draft("d"));
    assert_eq!(colliding.id, 3);
    let ids = store
        .list_entries()
        .iter()
        .map(|entry| entry.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 3, 3]);

    // Id lookups resolve to the first record in store order.
    assert_eq!(store.get_entry(3).unwrap().term, "c");
    assert_eq!(store.remove_entry(3).unwrap().term, "c");
    assert_eq!(store.get_entry(3).unwrap().term, "d");
}

#[test]
fn list_entries_returns_snapshot_not_live_view() {
    let mut store = InMemoryEntryStore::default();
    store.add_entry(draft("a"));
    let snapshot = store.list_entries();

    store.add_entry(draft("b"));
    store.remove_entry(1).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].term, "a");
    assert_eq!(store.list_entries().len(), 1);
    assert_eq!(store.list_entries()[0].term, "b");
}
