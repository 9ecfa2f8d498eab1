#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Discovery must reject bad input with an error, never panic.
        if let Ok(functions) = gentests_syntax::parse_functions(s) {
            for sig in &functions {
                let _ = sig.test_name();
            }
        }
        let _ = gentests_syntax::parse_test_names(s);
    }
});
