#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary artifacts must parse without panicking, and whatever was
    // recovered must survive a write/read cycle unchanged
    let snapshot = docdex::index::reader::read_snapshot(data);
    let mut buf = Vec::new();
    docdex::index::writer::write_snapshot(&snapshot, &mut buf).unwrap();

    let reloaded = docdex::index::reader::read_snapshot(buf.as_slice());
    assert_eq!(reloaded.index(), snapshot.index());
    assert_eq!(reloaded.documents(), snapshot.documents());
});
