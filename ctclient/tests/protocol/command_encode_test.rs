use ctclient::Error;
use ctclient::protocol::{Command, FrameBuffer, TlvBuilder};
use ctclient::types::{LockHandle, LockType, Opcode, Tag};

#[test]
fn reset_with_timeout_and_message() {
    let cmd = Command::Reset {
        slot: 0,
        timeout: Some(5),
        message: Some("Insert card"),
    };
    let frame = cmd.encode().unwrap();

    let mut expected = vec![0x10, 0x00, 0x80, 0x01, 0x05, 0x81, 11];
    expected.extend_from_slice(b"Insert card");
    assert_eq!(frame.as_slice(), expected.as_slice());
    assert_eq!(frame.capacity(), 256);
}

#[test]
fn reset_timeout_uses_minimal_big_endian() {
    let cmd = Command::Reset {
        slot: 2,
        timeout: Some(300),
        message: None,
    };
    assert_eq!(
        cmd.encode().unwrap().as_slice(),
        &[0x10, 0x02, 0x80, 0x02, 0x01, 0x2C]
    );
}

#[test]
fn long_value_switches_to_large_tag() {
    let msg = "x".repeat(300);
    let mut buf = FrameBuffer::with_capacity(512);
    TlvBuilder::new(&mut buf)
        .put_string(Tag::Message, &msg)
        .unwrap();
    assert_eq!(&buf.as_slice()[..3], &[0x81 | 0x40, 0x01, 0x2C]);
    assert_eq!(buf.len(), 3 + 300);
}

#[test]
fn longest_short_message_fits_reset_buffer() {
    let msg = "z".repeat(252);
    let cmd = Command::Reset {
        slot: 0,
        timeout: None,
        message: Some(&msg),
    };
    let frame = cmd.encode().unwrap();
    assert_eq!(frame.len(), 256);
    assert_eq!(&frame.as_slice()[..4], &[0x10, 0x00, 0x81, 252]);
}

#[test]
fn message_too_large_for_reset_buffer() {
    let msg = "y".repeat(260);
    let cmd = Command::Reset {
        slot: 0,
        timeout: Some(1),
        message: Some(&msg),
    };
    assert!(matches!(cmd.encode(), Err(Error::BufferOverflow { .. })));
}

#[test]
fn transact_appends_apdu_verbatim() {
    let apdu = [0x00, 0xB0, 0x00, 0x00, 0x10];
    let cmd = Command::Transact {
        slot: 1,
        apdu: &apdu,
    };
    assert_eq!(cmd.opcode(), Opcode::Transact);
    assert_eq!(
        cmd.encode().unwrap().as_slice(),
        &[0x21, 0x01, 0x00, 0xB0, 0x00, 0x00, 0x10]
    );
}

#[test]
fn transact_fills_its_larger_buffer() {
    let apdu = vec![0xAB; 510];
    let cmd = Command::Transact {
        slot: 0,
        apdu: &apdu,
    };
    assert_eq!(cmd.encode().unwrap().len(), 512);

    let apdu = vec![0xAB; 511];
    let cmd = Command::Transact {
        slot: 0,
        apdu: &apdu,
    };
    assert!(matches!(
        cmd.encode(),
        Err(Error::BufferOverflow {
            capacity: 512,
            required: 513
        })
    ));
}

#[test]
fn lock_and_unlock_frames() {
    let lock = Command::Lock {
        slot: 3,
        lock_type: LockType::Shared,
    };
    assert_eq!(lock.encode().unwrap().as_slice(), &[0x01, 0x03, 0x06, 0x01, 0x00]);

    let unlock = Command::Unlock {
        slot: 3,
        lock: LockHandle::new(0x0001_0203),
    };
    assert_eq!(
        unlock.encode().unwrap().as_slice(),
        &[0x02, 0x03, 0x05, 0x03, 0x01, 0x02, 0x03]
    );
}
