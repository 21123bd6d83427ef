//! ABI Sandbox
//!
//! Fuzz-engine boundary for the round-trip harness in [`abi_sandbox_core`].
//!
//! [`run`] is the only entry point a fuzz engine needs: it returns 1 when
//! at least one generated signature produced a conclusive round trip and
//! 0 otherwise, and it panics when the codec under test fails to invert
//! itself. The panic is the defect signal.

pub use abi_sandbox_core::{codec, fuzz, value};

use abi_sandbox_core::codec::EthAbiCodec;
use abi_sandbox_core::fuzz::FuzzRunner;

/// Run the round-trip harness over `input` against the `ethabi` codec.
pub fn run(input: &[u8]) -> i32 {
    FuzzRunner::new(&EthAbiCodec).fuzz(input)
}
