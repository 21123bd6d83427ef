//! Result types for round-trip fuzz runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A codec defect: one direction of the round trip is not an identity.
///
/// Each variant carries the interface description it was found under and
/// both sides of the failed comparison, byte buffers as hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveredDefect {
    /// A decoded payload could not be encoded again.
    #[error("decoded payload failed to re-encode under {signature}: {error}\ninput : {input}")]
    ReencodeFailed {
        signature: String,
        input: String,
        error: String,
    },
    /// decode-then-encode did not reproduce the payload.
    #[error("decode-then-encode is not an identity under {signature}\ninput : {input}\noutput: {output}")]
    ReencodeMismatch {
        signature: String,
        input: String,
        output: String,
    },
    /// Encoded values could not be decoded again.
    #[error("encoded values failed to re-decode under {signature}: {error}\nvalues : {values}\nencoded: {encoded}")]
    RedecodeFailed {
        signature: String,
        values: String,
        encoded: String,
        error: String,
    },
    /// encode-then-decode did not reproduce the values.
    #[error("encode-then-decode is not an identity under {signature}\ninput : {input}\noutput: {output}\nencoded: {encoded}")]
    RedecodeMismatch {
        signature: String,
        input: String,
        output: String,
        encoded: String,
    },
}

impl DiscoveredDefect {
    /// Interface description the defect was found under.
    pub fn signature(&self) -> &str {
        match self {
            DiscoveredDefect::ReencodeFailed { signature, .. }
            | DiscoveredDefect::ReencodeMismatch { signature, .. }
            | DiscoveredDefect::RedecodeFailed { signature, .. }
            | DiscoveredDefect::RedecodeMismatch { signature, .. } => signature,
        }
    }
}

/// Counters for one pass over the signature cross-product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed the signature generator started from.
    pub seed: u64,
    /// Cross-product cells visited.
    pub cells: u64,
    /// Candidates the codec refused to parse.
    pub parse_failures: u64,
    /// Candidates where decode-then-encode was conclusive.
    pub decode_round_trips: u64,
    /// Candidates where encode-then-decode was conclusive.
    pub encode_round_trips: u64,
}

impl RunSummary {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Whether any cell produced a conclusive round trip.
    pub fn is_good(&self) -> bool {
        self.decode_round_trips > 0 || self.encode_round_trips > 0
    }

    /// Coverage signal for the fuzz engine: 1 if good, else 0.
    pub fn coverage_signal(&self) -> i32 {
        i32::from(self.is_good())
    }
}
