#[path = "../common/mod.rs"]
mod common;

use std::os::unix::net::UnixListener;
use std::thread;
use std::time::Duration;

use ctclient::prelude::*;
use ctclient::registry::status_file::encode_record;
use ctclient::transport::PacketHeader;

/// Minimal reader manager: answers RESET with the sample ATR and anything
/// else with `NotSupported`, until the client hangs up.
fn serve(listener: UnixListener) -> thread::JoinHandle<Vec<Vec<u8>>> {
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut seen = Vec::new();
        while let Ok((hdr, payload)) = PacketHeader::read_packet(&mut stream) {
            let (error, reply) = match payload.first() {
                Some(0x10) => (0, common::atr_reply(&common::SAMPLE_ATR)),
                _ => (ServiceError::NotSupported.code(), Vec::new()),
            };
            seen.push(payload);
            PacketHeader {
                error,
                count: reply.len() as u16,
                ..hdr
            }
            .write_packet(&mut stream, &reply)
            .unwrap();
        }
        seen
    })
}

#[test]
fn builder_talks_to_socket_reader() {
    common::init_logging();
    let dir = common::scratch_dir("socket");
    let info = ReaderInfo::new("Socket Reader", vec![1]).unwrap();
    std::fs::write(dir.join("status"), encode_record(&info)).unwrap();
    let server = serve(UnixListener::bind(dir.join("0")).unwrap());

    let config = ClientConfig::new()
        .with_socket_dir(&dir)
        .with_call_timeout(Some(Duration::from_secs(5)));
    let builder = ReaderBuilder::new().with_config(config);
    assert_eq!(builder.readers().unwrap(), vec![info]);

    let mut h = builder.connect(0).unwrap();
    assert_eq!(
        h.card_status(0).unwrap(),
        CardStatus::PRESENT | CardStatus::CHANGED
    );

    let mut atr = [0u8; 33];
    let n = h.card_reset(0, &mut atr).unwrap();
    assert_eq!(&atr[..n], &common::SAMPLE_ATR);

    let mut resp = [0u8; 16];
    assert!(matches!(
        h.card_transact(0, &common::select_apdu(), &mut resp),
        Err(Error::Service(ServiceError::NotSupported))
    ));
    h.disconnect().unwrap();

    let seen = server.join().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], vec![0x10, 0x00]);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_socket_is_transport_failure() {
    let dir = common::scratch_dir("nosocket");
    let info = ReaderInfo::new("Ghost", vec![0]).unwrap();
    std::fs::write(dir.join("status"), encode_record(&info)).unwrap();

    let builder = ReaderBuilder::new().with_config(ClientConfig::new().with_socket_dir(&dir));
    assert!(matches!(
        builder.connect(0),
        Err(Error::TransportFailure(_))
    ));
    std::fs::remove_dir_all(&dir).unwrap();
}
