//! ABI Sandbox Core
//!
//! Differential round-trip fuzzing for contract-call ABI codecs.
//!
//! The codec is a black box behind [`codec::AbiCodec`]. The harness feeds
//! it generated function signatures and a raw byte buffer, and reports a
//! [`fuzz::DiscoveredDefect`] whenever decode and encode fail to invert
//! each other.
//!
//! # Core Modules
//!
//! - [`value`]: Tagged-union ABI types and values
//! - [`codec`]: The codec boundary and its `ethabi` backend
//! - [`fuzz`]: Signature generation, value materialization, oracle and runner
//!
//! # Example
//!
//! ```
//! use abi_sandbox_core::codec::EthAbiCodec;
//! use abi_sandbox_core::fuzz::FuzzRunner;
//!
//! let codec = EthAbiCodec;
//! let runner = FuzzRunner::new(&codec);
//! match runner.run(&[]) {
//!     Ok(summary) => assert_eq!(summary.cells, 120),
//!     Err(defect) => eprintln!("{defect}"),
//! }
//! ```

pub mod codec;
pub mod fuzz;
pub mod value;
