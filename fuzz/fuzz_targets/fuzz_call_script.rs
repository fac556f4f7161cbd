#![no_main]

use std::path::Path;

use fencecall::config::{ScriptLoader, check_script};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(loaded) = ScriptLoader::default().load_from_str(text, Path::new("fuzz.yaml")) {
            let _ = check_script(&loaded.script);
        }
    }
});
