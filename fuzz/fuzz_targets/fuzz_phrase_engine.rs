#![no_main]

use fencecall::protocol::{Choice, PhraseEngine};
use libfuzzer_sys::fuzz_target;

// Each byte picks a choice from the full table, legal or not. Rejected
// choices must leave the engine usable; malformed phrases are reset.
fuzz_target!(|data: &[u8]| {
    let mut engine = PhraseEngine::new();
    for &byte in data {
        let choice = Choice::ALL[usize::from(byte) % Choice::ALL.len()];
        let before = engine.state();
        match engine.apply(choice) {
            Ok(transition) => {
                assert_eq!(transition.from, before);
                if transition.done {
                    let call = engine.rendered_call();
                    assert!(
                        call.ends_with(". Touch left.")
                            || call.ends_with(". Touch right.")
                            || call.ends_with(". No touch.")
                    );
                    engine.reset();
                }
            }
            Err(_) if engine.is_malformed() => engine.reset(),
            Err(_) => assert_eq!(engine.state(), before),
        }
    }
});
