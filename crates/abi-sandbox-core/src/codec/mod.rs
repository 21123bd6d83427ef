//! The codec collaborator boundary.
//!
//! The harness never encodes or decodes anything itself. It drives an
//! [`AbiCodec`] as a black box and judges whether its two directions are
//! inverses of each other.
//!
//! - [`ethereum`]: production backend over the `ethabi` crate

pub mod ethereum;

use thiserror::Error;

use crate::value::{AbiType, AbiValue};

pub use ethereum::{EthAbiCodec, EthDescriptor};

/// Failures a codec reports for inputs it will not handle.
///
/// Every variant is an expected outcome that prunes the search space;
/// none of them is a defect on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid interface description: {0}")]
    Parse(String),
    #[error("unsupported type `{0}`")]
    UnsupportedType(String),
    #[error("no function named `{0}` in descriptor")]
    UnknownFunction(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// An ABI codec: interface parser plus the pack/unpack pair under test.
pub trait AbiCodec {
    /// Compiled form of a parsed interface description.
    type Descriptor;

    /// Compile a textual interface description.
    fn parse(&self, text: &str) -> Result<Self::Descriptor, CodecError>;

    /// Compiled argument types of `function`, in declaration order.
    fn argument_types<'d>(
        &self,
        descriptor: &'d Self::Descriptor,
        function: &str,
    ) -> Result<&'d [AbiType], CodecError>;

    /// Unpack `data` into the argument values of `function`.
    fn decode(
        &self,
        descriptor: &Self::Descriptor,
        function: &str,
        data: &[u8],
    ) -> Result<Vec<AbiValue>, CodecError>;

    /// Pack `values` as the arguments of `function`.
    fn encode(
        &self,
        descriptor: &Self::Descriptor,
        function: &str,
        values: &[AbiValue],
    ) -> Result<Vec<u8>, CodecError>;
}
