use ctclient::prelude::*;
use ctclient::test_support::StubService;

fn connect(stub: &StubService) -> ReaderHandle {
    let registry = StubService::registry(&[2]);
    ReaderHandle::connect(0, &registry, stub).unwrap()
}

#[test]
fn exclusive_lock_then_unlock() {
    let stub = StubService::new();
    let mut h = connect(&stub);

    let lock = h.card_lock(0, LockType::Exclusive).unwrap();
    assert_eq!(stub.active_locks(), 1);
    assert_eq!(stub.requests()[0], vec![0x01, 0x00, 0x06, 0x01, 0x01]);

    h.card_unlock(0, lock).unwrap();
    assert_eq!(stub.active_locks(), 0);
}

#[test]
fn unknown_handle_is_rejected_by_service() {
    let stub = StubService::new();
    let mut h = connect(&stub);

    match h.card_unlock(0, LockHandle::new(0xBEEF)) {
        Err(e @ Error::Service(ServiceError::NotLocked)) => assert!(e.is_service()),
        other => panic!("expected NotLocked, got: {:?}", other),
    }
}

#[test]
fn unlock_on_other_slot_is_rejected() {
    let stub = StubService::new();
    let mut h = connect(&stub);

    let lock = h.card_lock(1, LockType::Shared).unwrap();
    assert!(matches!(
        h.card_unlock(0, lock),
        Err(Error::Service(ServiceError::NotLocked))
    ));
    h.card_unlock(1, lock).unwrap();
}

#[test]
fn conflicting_locks_across_handles() {
    let stub = StubService::new();
    let mut a = connect(&stub);
    let mut b = connect(&stub);

    let shared = a.card_lock(0, LockType::Shared).unwrap();
    let shared_b = b.card_lock(0, LockType::Shared).unwrap();
    assert_ne!(shared, shared_b);
    assert!(matches!(
        b.card_lock(0, LockType::Exclusive),
        Err(Error::Service(ServiceError::AlreadyLocked))
    ));

    // the other slot is independent
    b.card_lock(1, LockType::Exclusive).unwrap();
    assert_eq!(stub.active_locks(), 3);
}
