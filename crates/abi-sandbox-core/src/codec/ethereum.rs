//! [`AbiCodec`] backend over the `ethabi` crate.
//!
//! Interface descriptions are Solidity JSON ABI documents. Arguments are
//! unpacked against a function's `outputs` and packed against its `inputs`,
//! without the 4-byte selector, so both directions operate on the same
//! byte shape when the two lists agree.
//!
//! Argument lists made only of static types are decoded with
//! `ethabi::decode_whole`, which refuses bytes past the last head word.
//! `decode_whole` counts head words only, so it would refuse every payload
//! with a tail; lists holding a dynamic type go through the lenient
//! `ethabi::decode` and any slack it tolerates is left for the oracle.
//!
//! `ethabi` reads any type name it does not recognise as `uint8`. Each
//! declared type string is therefore read back from the JSON and must match
//! the canonical spelling of what `ethabi` made of it.

use std::collections::BTreeMap;

use ethabi::param_type::Reader;
use ethabi::{Contract, Param, ParamType, Token};
use serde::Deserialize;

use super::{AbiCodec, CodecError};
use crate::value::{AbiType, AbiValue};

/// Solidity JSON ABI codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthAbiCodec;

/// A loaded contract interface with its argument types compiled.
#[derive(Debug, Clone)]
pub struct EthDescriptor {
    contract: Contract,
    inputs: BTreeMap<String, Vec<AbiType>>,
    outputs: BTreeMap<String, Vec<AbiType>>,
}

impl EthDescriptor {
    fn output_kinds(&self, function: &str) -> Result<Vec<ParamType>, CodecError> {
        let function = self
            .contract
            .function(function)
            .map_err(|_| CodecError::UnknownFunction(function.to_string()))?;
        Ok(function.outputs.iter().map(|p| p.kind.clone()).collect())
    }
}

impl AbiCodec for EthAbiCodec {
    type Descriptor = EthDescriptor;

    fn parse(&self, text: &str) -> Result<EthDescriptor, CodecError> {
        let contract =
            Contract::load(text.as_bytes()).map_err(|e| CodecError::Parse(e.to_string()))?;

        let declared: Vec<DeclaredEntry> =
            serde_json::from_str(text).map_err(|e| CodecError::Parse(e.to_string()))?;
        for param in declared.iter().flat_map(|e| e.inputs.iter().chain(&e.outputs)) {
            check_spelling(&param.ty)?;
        }

        let mut inputs = BTreeMap::new();
        let mut outputs = BTreeMap::new();
        for function in contract.functions() {
            inputs.insert(function.name.clone(), compile_params(&function.inputs)?);
            outputs.insert(function.name.clone(), compile_params(&function.outputs)?);
        }

        Ok(EthDescriptor {
            contract,
            inputs,
            outputs,
        })
    }

    fn argument_types<'d>(
        &self,
        descriptor: &'d EthDescriptor,
        function: &str,
    ) -> Result<&'d [AbiType], CodecError> {
        descriptor
            .inputs
            .get(function)
            .map(Vec::as_slice)
            .ok_or_else(|| CodecError::UnknownFunction(function.to_string()))
    }

    fn decode(
        &self,
        descriptor: &EthDescriptor,
        function: &str,
        data: &[u8],
    ) -> Result<Vec<AbiValue>, CodecError> {
        let types = descriptor
            .outputs
            .get(function)
            .ok_or_else(|| CodecError::UnknownFunction(function.to_string()))?;
        let kinds = descriptor.output_kinds(function)?;

        let tokens = if kinds.iter().any(ParamType::is_dynamic) {
            ethabi::decode(&kinds, data)
        } else {
            ethabi::decode_whole(&kinds, data)
        }
        .map_err(|e| CodecError::Decode(e.to_string()))?;
        if tokens.len() != types.len() {
            return Err(CodecError::Decode(format!(
                "expected {} values, got {}",
                types.len(),
                tokens.len()
            )));
        }

        tokens
            .into_iter()
            .zip(types)
            .map(|(token, ty)| token_to_value(token, ty))
            .collect()
    }

    fn encode(
        &self,
        descriptor: &EthDescriptor,
        function: &str,
        values: &[AbiValue],
    ) -> Result<Vec<u8>, CodecError> {
        let types = self.argument_types(descriptor, function)?;
        if values.len() != types.len() {
            return Err(CodecError::Encode(format!(
                "expected {} values, got {}",
                types.len(),
                values.len()
            )));
        }
        if let Some((value, ty)) = values.iter().zip(types).find(|(v, t)| !v.conforms_to(t)) {
            return Err(CodecError::Encode(format!("{value} is not a valid `{ty}`")));
        }

        let tokens: Vec<Token> = values.iter().map(value_to_token).collect();
        Ok(ethabi::encode(&tokens))
    }
}

/// One ABI entry as written, before `ethabi` lowers its types.
#[derive(Deserialize)]
struct DeclaredEntry {
    #[serde(default)]
    inputs: Vec<DeclaredParam>,
    #[serde(default)]
    outputs: Vec<DeclaredParam>,
}

#[derive(Deserialize)]
struct DeclaredParam {
    #[serde(rename = "type")]
    ty: String,
}

/// Reject type strings that `ethabi` only accepts by rewriting them.
///
/// `uint` and `int` are the one allowed shorthand, for their 256-bit forms.
fn check_spelling(declared: &str) -> Result<(), CodecError> {
    let kind = Reader::read(declared).map_err(|e| CodecError::Parse(e.to_string()))?;
    let split = declared.find('[').unwrap_or(declared.len());
    let (base, suffix) = declared.split_at(split);
    let expected = match base {
        "uint" | "int" => format!("{base}256{suffix}"),
        _ => declared.to_string(),
    };
    if kind.to_string() != expected {
        return Err(CodecError::Parse(format!("`{declared}` reads as `{kind}`")));
    }
    Ok(())
}

fn compile_params(params: &[Param]) -> Result<Vec<AbiType>, CodecError> {
    params.iter().map(|p| compile_type(&p.kind)).collect()
}

/// Lower an `ethabi` parameter type, rejecting widths and lengths the
/// grammar does not allow.
fn compile_type(kind: &ParamType) -> Result<AbiType, CodecError> {
    match kind {
        ParamType::Bool => Ok(AbiType::Bool),
        ParamType::Address => Ok(AbiType::Address),
        ParamType::Bytes => Ok(AbiType::Bytes),
        ParamType::String => Ok(AbiType::String),
        ParamType::Int(bits) if AbiType::is_valid_int_width(*bits) => Ok(AbiType::Int(*bits)),
        ParamType::Uint(bits) if AbiType::is_valid_int_width(*bits) => Ok(AbiType::Uint(*bits)),
        ParamType::FixedBytes(len) if AbiType::is_valid_fixed_bytes_len(*len) => {
            Ok(AbiType::FixedBytes(*len))
        }
        ParamType::Array(inner) => Ok(AbiType::Array(Box::new(compile_type(inner)?))),
        ParamType::FixedArray(inner, len) => Ok(AbiType::FixedArray(
            Box::new(compile_type(inner)?),
            *len,
        )),
        other => Err(CodecError::UnsupportedType(other.to_string())),
    }
}

fn token_to_value(token: Token, ty: &AbiType) -> Result<AbiValue, CodecError> {
    let value = match (token, ty) {
        (Token::Bool(b), AbiType::Bool) => AbiValue::Bool(b),
        (Token::Int(word), AbiType::Int(bits)) => AbiValue::Int {
            bits: *bits,
            value: word,
        },
        (Token::Uint(word), AbiType::Uint(bits)) => AbiValue::Uint {
            bits: *bits,
            value: word,
        },
        (Token::Address(addr), AbiType::Address) => AbiValue::Address(addr),
        (Token::FixedBytes(bytes), AbiType::FixedBytes(_)) => AbiValue::FixedBytes(bytes),
        (Token::Bytes(bytes), AbiType::Bytes) => AbiValue::Bytes(bytes),
        (Token::String(s), AbiType::String) => AbiValue::String(s),
        (Token::FixedArray(items), AbiType::FixedArray(inner, _)) => AbiValue::FixedArray(
            items
                .into_iter()
                .map(|item| token_to_value(item, inner))
                .collect::<Result<_, _>>()?,
        ),
        (Token::Array(items), AbiType::Array(inner)) => AbiValue::Array(
            items
                .into_iter()
                .map(|item| token_to_value(item, inner))
                .collect::<Result<_, _>>()?,
        ),
        (token, ty) => {
            return Err(CodecError::Decode(format!(
                "token {token:?} does not match `{ty}`"
            )))
        }
    };

    if !value.conforms_to(ty) {
        return Err(CodecError::Decode(format!("{value} is out of range for `{ty}`")));
    }
    Ok(value)
}

fn value_to_token(value: &AbiValue) -> Token {
    match value {
        AbiValue::Bool(b) => Token::Bool(*b),
        AbiValue::Int { value, .. } => Token::Int(*value),
        AbiValue::Uint { value, .. } => Token::Uint(*value),
        AbiValue::Address(addr) => Token::Address(*addr),
        AbiValue::FixedBytes(bytes) => Token::FixedBytes(bytes.clone()),
        AbiValue::Bytes(bytes) => Token::Bytes(bytes.clone()),
        AbiValue::String(s) => Token::String(s.clone()),
        AbiValue::FixedArray(items) => Token::FixedArray(items.iter().map(value_to_token).collect()),
        AbiValue::Array(items) => Token::Array(items.iter().map(value_to_token).collect()),
    }
}
