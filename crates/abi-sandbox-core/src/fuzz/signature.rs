//! Seeded function-signature generation.
//!
//! A [`SignatureBuilder`] assembles one candidate signature per
//! name/mutability/payable cell; [`SignatureStream`] walks the full
//! cross-product lazily so the runner is a plain loop over candidates.
//! The same seed always yields the same sequence of signatures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};

use super::catalog::{
    ARGUMENT_NAMES, ARGUMENT_TYPES, FUNCTION_NAMES, PAYABLES, STATE_MUTABILITIES,
};
use super::runner::HarnessConfig;

/// One declared argument. The type string may be malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ty: String,
}

/// A candidate function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub state_mutability: Option<String>,
    pub payable: Option<bool>,
    pub arguments: Vec<Argument>,
}

impl FunctionSignature {
    /// Render as a one-function JSON interface description.
    ///
    /// The argument list is emitted as both `inputs` and `outputs`, so
    /// unpacking and packing see the same types.
    pub fn render(&self) -> String {
        let mut entry = Map::new();
        entry.insert("type".into(), json!("function"));
        entry.insert("name".into(), json!(self.name));
        if let Some(mutability) = &self.state_mutability {
            entry.insert("stateMutability".into(), json!(mutability));
        }
        if let Some(payable) = self.payable {
            entry.insert("payable".into(), json!(payable));
        }

        let params: Vec<Value> = self
            .arguments
            .iter()
            .map(|arg| json!({ "name": arg.name, "type": arg.ty }))
            .collect();
        entry.insert("inputs".into(), Value::Array(params.clone()));
        entry.insert("outputs".into(), Value::Array(params));

        Value::Array(vec![Value::Object(entry)]).to_string()
    }
}

/// Builds signatures from a seeded RNG.
pub struct SignatureBuilder {
    rng: StdRng,
    max_arguments: usize,
    dynamic_suffix_odds: u32,
    fixed_suffix_odds: u32,
    max_fixed_len: usize,
}

impl SignatureBuilder {
    pub fn new(seed: u64, config: &HarnessConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_arguments: config.max_arguments,
            dynamic_suffix_odds: config.dynamic_suffix_odds,
            fixed_suffix_odds: config.fixed_suffix_odds,
            max_fixed_len: config.max_fixed_len,
        }
    }

    /// Build one signature for the given cell.
    pub fn build(
        &mut self,
        name: &str,
        state_mutability: Option<&str>,
        payable: Option<bool>,
    ) -> FunctionSignature {
        let count = self.rng.gen_range(0..=self.max_arguments);
        let arguments = (0..count).map(|_| self.gen_argument()).collect();

        FunctionSignature {
            name: name.to_string(),
            state_mutability: state_mutability.map(str::to_string),
            payable,
            arguments,
        }
    }

    fn gen_argument(&mut self) -> Argument {
        let name = ARGUMENT_NAMES[self.rng.gen_range(0..ARGUMENT_NAMES.len())];
        let mut ty = ARGUMENT_TYPES[self.rng.gen_range(0..ARGUMENT_TYPES.len())].to_string();

        // Independent rolls: a type can end up as `T[][k]`.
        if self.dynamic_suffix_odds > 0 && self.rng.gen_ratio(1, self.dynamic_suffix_odds) {
            ty.push_str("[]");
        }
        if self.fixed_suffix_odds > 0 && self.rng.gen_ratio(1, self.fixed_suffix_odds) {
            let len = self.rng.gen_range(0..=self.max_fixed_len);
            ty.push_str(&format!("[{len}]"));
        }

        Argument {
            name: name.to_string(),
            ty,
        }
    }
}

/// Lazy walk over the name × mutability × payable cross-product.
///
/// The builder's RNG state carries from one cell to the next.
pub struct SignatureStream {
    builder: SignatureBuilder,
    cell: usize,
}

impl SignatureStream {
    pub fn new(seed: u64, config: &HarnessConfig) -> Self {
        Self {
            builder: SignatureBuilder::new(seed, config),
            cell: 0,
        }
    }
}

impl Iterator for SignatureStream {
    type Item = FunctionSignature;

    fn next(&mut self) -> Option<FunctionSignature> {
        let per_name = STATE_MUTABILITIES.len() * PAYABLES.len();
        let name = *FUNCTION_NAMES.get(self.cell / per_name)?;
        let state_mutability =
            STATE_MUTABILITIES[(self.cell / PAYABLES.len()) % STATE_MUTABILITIES.len()];
        let payable = PAYABLES[self.cell % PAYABLES.len()];
        self.cell += 1;

        Some(self.builder.build(name, state_mutability, payable))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = super::catalog::cell_count().saturating_sub(self.cell);
        (remaining, Some(remaining))
    }
}
