use shadowspeak_core::script::{InMemoryScriptRepository, MAX_SCRIPTS, SnapshotStore};
use shadowspeak_core::sentence::{merge, segment};

fn ids(store: &SnapshotStore<InMemoryScriptRepository>) -> Vec<String> {
    store.list().iter().map(|s| s.id.clone()).collect()
}

#[test]
fn test_ten_saves_fill_the_store_newest_first() {
    let mut store = SnapshotStore::open(InMemoryScriptRepository::new());
    let units = segment("One. Two.");

    for i in 0..MAX_SCRIPTS {
        let saved = store.save(&units, &format!("Script {i}")).unwrap();
        assert_eq!(store.list().len(), i + 1);
        assert_eq!(store.list()[0].id, saved.id);
    }

    // the caller's capacity gate
    if !store.is_full() {
        store.save(&units, "Script 10").unwrap();
    }
    assert_eq!(store.list().len(), MAX_SCRIPTS);
}

#[test]
fn test_unknown_ids_leave_the_list_unchanged() {
    let mut store = SnapshotStore::open(InMemoryScriptRepository::new());
    store.save(&segment("One."), "A").unwrap();
    store.save(&segment("Two."), "B").unwrap();
    let before = ids(&store);

    assert!(!store.update("script-unknown", &segment("Three.")).unwrap());
    assert!(!store.delete("script-unknown").unwrap());

    assert_eq!(ids(&store), before);
}

#[test]
fn test_loaded_units_are_isolated_from_the_store() {
    let mut store = SnapshotStore::open(InMemoryScriptRepository::new());
    let saved = store.save(&segment("One. Two. Three."), "Talk").unwrap();

    let mut loaded = store.load(&saved.id).unwrap();
    merge(&mut loaded, 0);
    loaded[0].text.push_str(" extra");

    let reloaded = store.load(&saved.id).unwrap();
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded[0].text, "One.");
}

#[test]
fn test_saved_units_are_isolated_from_the_caller() {
    let mut store = SnapshotStore::open(InMemoryScriptRepository::new());
    let mut units = segment("One. Two.");
    let saved = store.save(&units, "Talk").unwrap();

    merge(&mut units, 0);

    assert_eq!(store.load(&saved.id).unwrap().len(), 2);
}

#[test]
fn test_reopening_restores_the_collection() {
    let mut store = SnapshotStore::open(InMemoryScriptRepository::new());
    store.save(&segment("One."), "A").unwrap();
    store.save(&segment("Two."), "B").unwrap();
    let persisted = store.repository().clone();

    let reopened = SnapshotStore::open(persisted);
    assert_eq!(ids(&reopened), ids(&store));
}
