//! Round-trip fuzzing execution loop.
//!
//! One run walks every cell of the signature cross-product, compiles the
//! candidate, and checks both round-trip directions against the same raw
//! input buffer.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::codec::AbiCodec;

use super::materializer::ValueMaterializer;
use super::oracle::RoundTripOracle;
use super::report::{DiscoveredDefect, RunSummary};
use super::signature::SignatureStream;

/// Configuration for a fuzz run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Generator seed used when the input buffer is empty.
    pub fallback_seed: u64,
    /// Maximum number of arguments per signature.
    pub max_arguments: usize,
    /// A type gets a `[]` suffix with probability 1 / `dynamic_suffix_odds`; 0 never.
    pub dynamic_suffix_odds: u32,
    /// A type gets a `[k]` suffix with probability 1 / `fixed_suffix_odds`; 0 never.
    pub fixed_suffix_odds: u32,
    /// Upper bound (inclusive) for `k` in a `[k]` suffix.
    pub max_fixed_len: usize,
    /// Upper bound (inclusive) for materialized dynamic array lengths.
    pub max_dynamic_len: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            fallback_seed: 123_456,
            max_arguments: 4,
            dynamic_suffix_odds: 10,
            fixed_suffix_odds: 10,
            max_fixed_len: 29,
            max_dynamic_len: 16,
        }
    }
}

/// Runs the round-trip oracle over the signature cross-product.
pub struct FuzzRunner<'a, C: AbiCodec> {
    codec: &'a C,
    config: HarnessConfig,
}

impl<'a, C: AbiCodec> FuzzRunner<'a, C> {
    pub fn new(codec: &'a C) -> Self {
        Self::with_config(codec, HarnessConfig::default())
    }

    pub fn with_config(codec: &'a C, config: HarnessConfig) -> Self {
        Self { codec, config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Generator seed for `input`: its first byte, or the fallback seed.
    pub fn seed_for(&self, input: &[u8]) -> u64 {
        input
            .first()
            .map_or(self.config.fallback_seed, |b| u64::from(*b))
    }

    /// Check every cell against `input`.
    ///
    /// Returns the first defect found; cells after it are not visited.
    pub fn run(&self, input: &[u8]) -> Result<RunSummary, DiscoveredDefect> {
        let seed = self.seed_for(input);
        let materializer = ValueMaterializer::new(self.config.max_dynamic_len);
        let mut summary = RunSummary::new(seed);

        for signature in SignatureStream::new(seed, &self.config) {
            summary.cells += 1;
            let text = signature.render();

            // Most candidates fail here; that is the search space being pruned.
            let Ok(descriptor) = self.codec.parse(&text) else {
                summary.parse_failures += 1;
                continue;
            };
            let Ok(types) = self.codec.argument_types(&descriptor, &signature.name) else {
                summary.parse_failures += 1;
                continue;
            };

            let oracle = RoundTripOracle::new(self.codec, &descriptor, &signature.name, &text);

            if oracle.decode_then_encode(input)? {
                summary.decode_round_trips += 1;
                trace!(signature = %text, "decode-then-encode round trip");
            }

            let mut values = materializer.placeholders(types);
            materializer.fill(&mut values, types, input);
            if oracle.encode_then_decode(&values)? {
                summary.encode_round_trips += 1;
                trace!(signature = %text, "encode-then-decode round trip");
            }
        }

        debug!(
            seed = summary.seed,
            cells = summary.cells,
            parse_failures = summary.parse_failures,
            decode_round_trips = summary.decode_round_trips,
            encode_round_trips = summary.encode_round_trips,
            "round-trip run complete"
        );
        Ok(summary)
    }

    /// Fuzz-engine entry point: the coverage signal, or a panic on a defect.
    pub fn fuzz(&self, input: &[u8]) -> i32 {
        match self.run(input) {
            Ok(summary) => summary.coverage_signal(),
            Err(defect) => {
                error!(signature = defect.signature(), "round-trip defect");
                panic!("{defect}");
            }
        }
    }
}
