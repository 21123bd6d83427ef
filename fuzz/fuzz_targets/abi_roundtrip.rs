#![no_main]

use libfuzzer_sys::{fuzz_target, Corpus};

/// Round-trip every generated signature against the raw buffer.
///
/// The buffer is both the candidate payload for decoding and the entropy
/// for materialized values. A codec defect panics inside `run`, which
/// libFuzzer records as a crash. Buffers that produced no conclusive round
/// trip are kept out of the corpus.
fuzz_target!(|data: &[u8]| -> Corpus {
    match abi_sandbox::run(data) {
        1 => Corpus::Keep,
        _ => Corpus::Reject,
    }
});
