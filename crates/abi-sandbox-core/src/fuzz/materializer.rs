//! Byte-driven value materialization.
//!
//! Placeholders start as zero values and are then overwritten field by
//! field from the raw fuzz input, read as an [`Unstructured`] entropy
//! stream. The same input always yields the same values.

use arbitrary::{Arbitrary, Unstructured};
use ethabi::ethereum_types::U256;

use crate::value::{sign_extend, AbiType, AbiValue};

/// Fills zero-valued placeholders from raw input bytes.
pub struct ValueMaterializer {
    max_dynamic_len: usize,
}

impl ValueMaterializer {
    /// Create a materializer drawing dynamic array lengths in `0..=max_dynamic_len`.
    pub fn new(max_dynamic_len: usize) -> Self {
        Self { max_dynamic_len }
    }

    /// One zero-valued placeholder per argument type.
    pub fn placeholders(&self, types: &[AbiType]) -> Vec<AbiValue> {
        types.iter().map(AbiType::zero_value).collect()
    }

    /// Overwrite `values` in place from `data`.
    ///
    /// Stops at the first argument that runs out of entropy; everything
    /// filled before that point is kept.
    pub fn fill(&self, values: &mut [AbiValue], types: &[AbiType], data: &[u8]) {
        if values.is_empty() || data.is_empty() {
            return;
        }
        let mut u = Unstructured::new(data);
        for (value, ty) in values.iter_mut().zip(types) {
            if self.fill_value(value, ty, &mut u).is_err() {
                break;
            }
        }
    }

    fn fill_value(
        &self,
        value: &mut AbiValue,
        ty: &AbiType,
        u: &mut Unstructured<'_>,
    ) -> arbitrary::Result<()> {
        match (value, ty) {
            (AbiValue::Bool(b), _) => *b = bool::arbitrary(u)?,
            (AbiValue::Uint { bits, value }, _) => *value = draw_word(u, *bits)?,
            (AbiValue::Int { bits, value }, _) => *value = sign_extend(draw_word(u, *bits)?, *bits),
            (AbiValue::Address(addr), _) => u.fill_buffer(addr.as_bytes_mut())?,
            (AbiValue::FixedBytes(bytes), _) => u.fill_buffer(bytes)?,
            (AbiValue::Bytes(bytes), _) => *bytes = Vec::<u8>::arbitrary(u)?,
            (AbiValue::String(s), _) => *s = String::arbitrary(u)?,
            (AbiValue::FixedArray(items), AbiType::FixedArray(inner, _)) => {
                for item in items.iter_mut() {
                    self.fill_value(item, inner, u)?;
                }
            }
            (AbiValue::Array(items), AbiType::Array(inner)) => {
                let len = u.int_in_range(0..=self.max_dynamic_len)?;
                *items = (0..len).map(|_| inner.zero_value()).collect();
                for item in items.iter_mut() {
                    self.fill_value(item, inner, u)?;
                }
            }
            // placeholder and type disagree; leave the placeholder alone
            _ => {}
        }
        Ok(())
    }
}

/// Read `bits / 8` bytes as a big-endian unsigned word.
fn draw_word(u: &mut Unstructured<'_>, bits: usize) -> arbitrary::Result<U256> {
    let mut word = [0u8; 32];
    let width = (bits / 8).min(32);
    u.fill_buffer(&mut word[32 - width..])?;
    Ok(U256::from_big_endian(&word))
}
