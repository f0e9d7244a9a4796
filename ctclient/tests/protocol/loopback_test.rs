// Requests sent through an echoing transport must parse back into the same
// arguments.

use ctclient::protocol::{Command, TlvParser};
use ctclient::transport::{LoopbackTransport, Transport};
use ctclient::types::{LockType, Opcode, Tag};

#[test]
fn reset_arguments_survive_round_trip() {
    let mut t = LoopbackTransport::new();
    let cmd = Command::Reset {
        slot: 0,
        timeout: Some(5),
        message: Some("Insert card"),
    };
    let frame = cmd.encode().unwrap();
    let echoed = t.call(frame.as_slice(), 256).unwrap();

    assert_eq!(Opcode::try_from(echoed[0]).unwrap(), Opcode::Reset);
    assert_eq!(echoed[1], 0);
    let args = TlvParser::parse(&echoed[2..]).unwrap();
    assert_eq!(args.get_int(Tag::Timeout).unwrap(), 5);
    assert_eq!(args.get_string(Tag::Message).unwrap(), "Insert card");
    assert_eq!(t.calls, 1);
}

#[test]
fn lock_type_survives_round_trip() {
    let mut t = LoopbackTransport::new();
    let cmd = Command::Lock {
        slot: 1,
        lock_type: LockType::Exclusive,
    };
    let echoed = t.call(cmd.encode().unwrap().as_slice(), 256).unwrap();
    let args = TlvParser::parse(&echoed[2..]).unwrap();
    assert_eq!(
        args.get_int(Tag::LockType).unwrap(),
        LockType::Exclusive.as_u32()
    );
    assert!(!args.contains(Tag::Timeout));
}
