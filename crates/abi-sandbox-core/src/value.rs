//! Tagged-union model of ABI types and values.
//!
//! [`AbiType`] is the compiled shape of one declared argument; [`AbiValue`]
//! is a native value of that shape. The materializer and the round-trip
//! oracle pattern-match on these directly, so no codec-specific token type
//! leaks past the [`crate::codec`] boundary.

use std::fmt;

use ethabi::ethereum_types::{H160, U256};

/// Compiled argument type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    Bool,
    /// Signed integer of the given bit width.
    Int(usize),
    /// Unsigned integer of the given bit width.
    Uint(usize),
    Address,
    /// `bytesN`, N in 1..=32.
    FixedBytes(usize),
    Bytes,
    String,
    /// `T[N]`
    FixedArray(Box<AbiType>, usize),
    /// `T[]`
    Array(Box<AbiType>),
}

impl AbiType {
    /// Whether `bits` is a legal integer width (a multiple of 8 in 8..=256).
    pub fn is_valid_int_width(bits: usize) -> bool {
        (8..=256).contains(&bits) && bits % 8 == 0
    }

    /// Whether `len` is a legal `bytesN` width.
    pub fn is_valid_fixed_bytes_len(len: usize) -> bool {
        (1..=32).contains(&len)
    }

    /// The zero-valued placeholder for this type.
    pub fn zero_value(&self) -> AbiValue {
        match self {
            AbiType::Bool => AbiValue::Bool(false),
            AbiType::Int(bits) => AbiValue::Int {
                bits: *bits,
                value: U256::zero(),
            },
            AbiType::Uint(bits) => AbiValue::Uint {
                bits: *bits,
                value: U256::zero(),
            },
            AbiType::Address => AbiValue::Address(H160::zero()),
            AbiType::FixedBytes(len) => AbiValue::FixedBytes(vec![0u8; *len]),
            AbiType::Bytes => AbiValue::Bytes(Vec::new()),
            AbiType::String => AbiValue::String(String::new()),
            AbiType::FixedArray(inner, len) => {
                AbiValue::FixedArray((0..*len).map(|_| inner.zero_value()).collect())
            }
            AbiType::Array(_) => AbiValue::Array(Vec::new()),
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Bool => write!(f, "bool"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Address => write!(f, "address"),
            AbiType::FixedBytes(len) => write!(f, "bytes{len}"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            AbiType::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}

/// Native value of an [`AbiType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Bool(bool),
    /// Signed integer held as its 256-bit two's-complement word.
    Int { bits: usize, value: U256 },
    Uint { bits: usize, value: U256 },
    Address(H160),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    FixedArray(Vec<AbiValue>),
    Array(Vec<AbiValue>),
}

impl AbiValue {
    /// Whether this value has the shape of `ty` and lies within its range.
    pub fn conforms_to(&self, ty: &AbiType) -> bool {
        match (self, ty) {
            (AbiValue::Bool(_), AbiType::Bool)
            | (AbiValue::Address(_), AbiType::Address)
            | (AbiValue::Bytes(_), AbiType::Bytes)
            | (AbiValue::String(_), AbiType::String) => true,
            (AbiValue::Int { bits, value }, AbiType::Int(width)) => {
                bits == width && int_fits(*value, *width)
            }
            (AbiValue::Uint { bits, value }, AbiType::Uint(width)) => {
                bits == width && value.bits() <= *width
            }
            (AbiValue::FixedBytes(bytes), AbiType::FixedBytes(len)) => bytes.len() == *len,
            (AbiValue::FixedArray(items), AbiType::FixedArray(inner, len)) => {
                items.len() == *len && items.iter().all(|item| item.conforms_to(inner))
            }
            (AbiValue::Array(items), AbiType::Array(inner)) => {
                items.iter().all(|item| item.conforms_to(inner))
            }
            _ => false,
        }
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Bool(b) => write!(f, "{b}"),
            AbiValue::Int { bits, value } => {
                if value.bit(255) {
                    // two's complement magnitude
                    write!(f, "int{bits}:-{}", (!*value) + U256::one())
                } else {
                    write!(f, "int{bits}:{value}")
                }
            }
            AbiValue::Uint { bits, value } => write!(f, "uint{bits}:{value}"),
            AbiValue::Address(addr) => write!(f, "0x{}", hex::encode(addr.as_bytes())),
            AbiValue::FixedBytes(bytes) | AbiValue::Bytes(bytes) => {
                write!(f, "0x{}", hex::encode(bytes))
            }
            AbiValue::String(s) => write!(f, "{s:?}"),
            AbiValue::FixedArray(items) | AbiValue::Array(items) => {
                write!(f, "[{}]", describe_values(items))
            }
        }
    }
}

/// Comma-separated rendering of a value set for diagnostics.
pub fn describe_values(values: &[AbiValue]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sign-extend the low `bits` of `word` to a full 256-bit word.
pub fn sign_extend(word: U256, bits: usize) -> U256 {
    if bits >= 256 {
        return word;
    }
    let high_mask = U256::max_value() << bits;
    if word.bit(bits - 1) {
        word | high_mask
    } else {
        word & !high_mask
    }
}

/// Whether a two's-complement word is representable in `bits` signed bits.
fn int_fits(word: U256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    sign_extend(word, bits) == word
}
