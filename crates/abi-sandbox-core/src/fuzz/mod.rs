//! ABI round-trip fuzzing framework.
//!
//! Generates candidate function signatures from fixed catalogs, compiles
//! them with the codec under test, and checks that packing and unpacking
//! are inverses over both a raw input buffer and values materialized
//! from it.
//!
//! # Architecture
//!
//! - [`catalog`]: Name, mutability, payability and type alphabets
//! - [`signature`]: Seeded signature builder and the lazy cross-product stream
//! - [`materializer`]: Zero-value placeholders filled from raw input bytes
//! - [`oracle`]: Decode-then-encode and encode-then-decode checks
//! - [`runner`]: The per-input execution loop and its configuration
//! - [`report`]: Run summaries and discovered defects

pub mod catalog;
pub mod materializer;
pub mod oracle;
pub mod report;
pub mod runner;
pub mod signature;

pub use materializer::ValueMaterializer;
pub use oracle::RoundTripOracle;
pub use report::{DiscoveredDefect, RunSummary};
pub use runner::{FuzzRunner, HarnessConfig};
pub use signature::{Argument, FunctionSignature, SignatureBuilder, SignatureStream};
