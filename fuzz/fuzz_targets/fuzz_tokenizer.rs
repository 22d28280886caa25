#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    for term in docdex::utils::normalize_line(data) {
        assert!(!term.is_empty());
        assert!(!term.chars().any(|c| c.is_ascii_punctuation()));
    }

    let escaped = docdex::utils::escape_field(data);
    assert_eq!(docdex::utils::unescape_field(&escaped).as_deref(), Some(data));
});
