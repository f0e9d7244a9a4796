#[path = "../common/mod.rs"]
mod common;

use ctclient::prelude::*;
use ctclient::test_support::StubService;

#[test]
fn out_of_range_slot_never_reaches_service() {
    let stub = StubService::new().with_atr(0, &common::SAMPLE_ATR);
    let registry = StubService::registry(&[2]);
    let mut h = ReaderHandle::connect(0, &registry, &stub).unwrap();

    let mut atr = [0u8; 33];
    let mut resp = [0u8; 258];
    assert!(matches!(h.card_status(2), Err(Error::InvalidArgument(_))));
    assert!(matches!(h.card_reset(2, &mut atr), Err(Error::InvalidArgument(_))));
    assert!(matches!(
        h.card_request(9, None, Some("x"), &mut atr),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        h.card_transact(2, &common::select_apdu(), &mut resp),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        h.card_lock(2, LockType::Shared),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        h.card_unlock(2, LockHandle::new(1)),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(stub.calls(), 0);
}

#[test]
fn changed_is_reported_exactly_once() {
    let mut registry = StubService::registry(&[1]);
    registry.set_card_seq(0, 0, 7).unwrap();
    let stub = StubService::new();
    let mut h = ReaderHandle::connect(0, &registry, &stub).unwrap();

    let first = h.card_status(0).unwrap();
    assert!(first.is_present());
    assert!(first.is_changed());

    for _ in 0..3 {
        assert_eq!(h.card_status(0).unwrap(), CardStatus::PRESENT);
    }
    assert_eq!(stub.calls(), 0);
}

#[test]
fn empty_slots_are_stable() {
    let registry = StubService::registry(&[3]);
    let stub = StubService::new();
    let mut h = ReaderHandle::connect(0, &registry, &stub).unwrap();

    for slot in 0..3 {
        assert_eq!(h.card_status(slot).unwrap(), CardStatus::EMPTY);
        assert_eq!(h.card_status(slot).unwrap(), CardStatus::EMPTY);
    }
}

#[test]
fn status_reads_the_connect_time_snapshot() {
    let mut registry = StubService::registry(&[1]);
    let stub = StubService::new();
    let mut h = ReaderHandle::connect(0, &registry, &stub).unwrap();

    registry.insert_card(0, 0).unwrap();
    assert_eq!(h.card_status(0).unwrap(), CardStatus::EMPTY);
    assert_eq!(h.reader_status().card_seq(0), Some(0));
}

#[test]
fn reader_status_reports_descriptor() {
    let registry = StaticRegistry::new(vec![
        ReaderInfo::new("Desk Reader", vec![0, 4])
            .unwrap()
            .with_display(true)
            .with_pid(4242),
    ]);
    let stub = StubService::new();
    let h = ReaderHandle::connect(0, &registry, &stub).unwrap();

    let info = h.reader_status();
    assert_eq!(info.name, "Desk Reader");
    assert_eq!(info.slots(), 2);
    assert!(info.display);
    assert!(!info.keypad);
    assert_eq!(info.pid, 4242);
    assert_eq!(h.reader_index(), 0);
}
