#[path = "../common/mod.rs"]
mod common;

use ctclient::Error;
use ctclient::registry::status_file::{encode_record, parse_status};
use ctclient::registry::{ReaderRegistry, StatusFileRegistry};
use ctclient::types::ReaderInfo;

#[test]
fn status_file_lists_readers_in_index_order() {
    let dir = common::scratch_dir("status");
    let path = dir.join("status");
    let readers = vec![
        ReaderInfo::new("Reader A", vec![0, 2]).unwrap().with_display(true),
        ReaderInfo::new("Reader B", vec![0; 8]).unwrap().with_keypad(true),
    ];
    let image: Vec<u8> = readers.iter().flat_map(encode_record).collect();
    std::fs::write(&path, &image).unwrap();

    let reg = StatusFileRegistry::new(&path);
    assert_eq!(reg.path(), path.as_path());
    assert_eq!(reg.readers().unwrap(), readers);

    // the file is re-read on every call
    std::fs::write(&path, &image[..108]).unwrap();
    assert_eq!(reg.readers().unwrap().len(), 1);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn long_names_are_cut() {
    let info = ReaderInfo::new("n".repeat(100), vec![1]).unwrap();
    let parsed = parse_status(&encode_record(&info)).unwrap();
    assert_eq!(parsed[0].name.len(), 63);
}

#[test]
fn garbage_length_is_malformed() {
    assert!(matches!(
        parse_status(&[0u8; 50]),
        Err(Error::MalformedResponse(_))
    ));
    assert!(parse_status(&[]).unwrap().is_empty());
}
