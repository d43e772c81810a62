use std::sync::Arc;
use std::thread;

use rstest::{fixture, rstest};
use torrust_transfer_manager_primitives::{EngineHandle, TransferId};
use torrust_transfer_manager_transfer_registry::entry::Entry as _;
use torrust_transfer_manager_transfer_registry::repository::Repository as _;
use torrust_transfer_manager_transfer_registry::Registry;

use crate::common::downloading;

#[fixture]
fn empty() -> Registry {
    Registry::default()
}

#[fixture]
fn three() -> (Registry, Vec<TransferId>) {
    let registry = Registry::default();
    let mut ids = vec![];

    for handle in 1..=3 {
        let id = TransferId::generate();
        registry.register(&id, EngineHandle(handle));
        ids.push(id);
    }

    (registry, ids)
}

#[rstest]
fn a_new_registry_should_be_empty(empty: Registry) {
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);
    assert!(empty.list().is_empty());
    assert_eq!(empty.live_rates(), (0, 0));
}

#[rstest]
fn it_should_register_a_transfer_without_a_snapshot(empty: Registry) {
    let id = TransferId::generate();

    assert!(empty.register(&id, EngineHandle(7)).is_none());

    let entry = empty.get(&id).expect("it should be registered");

    assert_eq!(entry.handle(), EngineHandle(7));
    assert!(entry.last_snapshot().is_none());
    assert_eq!(empty.handle(&id), Some(EngineHandle(7)));
}

#[rstest]
fn re_registering_a_transfer_should_reset_its_snapshot(empty: Registry) {
    let id = TransferId::generate();
    empty.register(&id, EngineHandle(1));
    empty.record(&id, EngineHandle(1), downloading(40.0, 10, 0));

    let replaced = empty.register(&id, EngineHandle(2)).expect("it should replace the old entry");

    assert_eq!(replaced.handle(), EngineHandle(1));
    assert!(empty.get(&id).unwrap().last_snapshot().is_none());
}

#[rstest]
fn it_should_unregister_a_transfer_and_return_the_removed_entry(three: (Registry, Vec<TransferId>)) {
    let (registry, ids) = three;

    let removed = registry.unregister(&ids[1]).expect("it should remove the entry");

    assert_eq!(removed.handle(), EngineHandle(2));
    assert!(registry.get(&ids[1]).is_none());
    assert_eq!(registry.len(), 2);
}

#[rstest]
fn unregistering_an_unknown_transfer_should_be_a_no_op(three: (Registry, Vec<TransferId>)) {
    let (registry, _ids) = three;

    assert!(registry.unregister(&TransferId::generate()).is_none());
    assert_eq!(registry.len(), 3);
}

#[rstest]
fn the_list_should_be_a_copy_that_is_not_affected_by_later_mutations(three: (Registry, Vec<TransferId>)) {
    let (registry, ids) = three;

    let listed = registry.list();

    registry.unregister(&ids[0]);

    assert_eq!(listed.len(), 3);
    assert_eq!(registry.list().len(), 2);
}

#[rstest]
fn it_should_only_record_a_snapshot_for_the_same_handle(empty: Registry) {
    let id = TransferId::generate();
    empty.register(&id, EngineHandle(1));

    assert!(!empty.record(&id, EngineHandle(99), downloading(10.0, 1, 1)));
    assert!(empty.get(&id).unwrap().last_snapshot().is_none());

    assert!(empty.record(&id, EngineHandle(1), downloading(10.0, 1, 1)));
    assert_eq!(empty.get(&id).unwrap().last_snapshot(), Some(&downloading(10.0, 1, 1)));
}

#[rstest]
fn it_should_not_record_a_snapshot_for_an_unregistered_transfer(empty: Registry) {
    assert!(!empty.record(&TransferId::generate(), EngineHandle(1), downloading(10.0, 1, 1)));
    assert!(empty.is_empty());
}

#[rstest]
fn live_rates_should_add_up_the_last_recorded_rates(three: (Registry, Vec<TransferId>)) {
    let (registry, ids) = three;

    registry.record(&ids[0], EngineHandle(1), downloading(10.0, 100, 10));
    registry.record(&ids[1], EngineHandle(2), downloading(10.0, 50, 5));

    assert_eq!(registry.live_rates(), (150, 15));
}

#[rstest]
fn it_should_allow_concurrent_readers_and_writers(empty: Registry) {
    let registry = Arc::new(empty);

    let writers: Vec<_> = (0..4u64)
        .map(|n| {
            let registry = registry.clone();
            thread::spawn(move || {
                for i in 0..25u64 {
                    let id = TransferId::generate();
                    registry.register(&id, EngineHandle(n * 100 + i));
                    let _ = registry.list();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(registry.len(), 100);
}
