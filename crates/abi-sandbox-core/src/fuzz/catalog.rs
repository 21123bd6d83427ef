//! Fixed alphabets the signature generator draws from.
//!
//! The tables are not all well-formed on purpose: `byte32` and `byte` are
//! not legal types and must be rejected by the codec's parser, and the
//! `uint8`/`int8` entries appear twice to weight the narrowest widths.

/// Function names, including empty and underscore-only forms.
pub static FUNCTION_NAMES: [&str; 8] = ["", "_name", "name", "NAME", "name_", "__", "_name_", "n"];

/// `stateMutability` options; `None` omits the field.
pub static STATE_MUTABILITIES: [Option<&str>; 5] = [
    None,
    Some(""),
    Some("pure"),
    Some("view"),
    Some("payable"),
];

/// `payable` options; `None` omits the field.
pub static PAYABLES: [Option<bool>; 3] = [None, Some(true), Some(false)];

/// Argument names: single letters followed by every function name.
pub static ARGUMENT_NAMES: [&str; 15] = [
    "a", "b", "c", "d", "e", "f", "g", "", "_name", "name", "NAME", "name_", "__", "_name_", "n",
];

/// Base argument types.
#[rustfmt::skip]
pub static ARGUMENT_TYPES: [&str; 105] = [
    "bool", "address", "bytes", "string",
    "uint", "int", "uint8", "int8", "uint8", "int8", "uint16", "int16",
    "uint24", "int24", "uint32", "int32", "uint40", "int40", "uint48", "int48", "uint56", "int56",
    "uint64", "int64", "uint72", "int72", "uint80", "int80", "uint88", "int88", "uint96", "int96",
    "uint104", "int104", "uint112", "int112", "uint120", "int120", "uint128", "int128", "uint136", "int136",
    "uint144", "int144", "uint152", "int152", "uint160", "int160", "uint168", "int168", "uint176", "int176",
    "uint184", "int184", "uint192", "int192", "uint200", "int200", "uint208", "int208", "uint216", "int216",
    "uint224", "int224", "uint232", "int232", "uint240", "int240", "uint248", "int248", "uint256", "int256",
    "bytes1", "bytes2", "bytes3", "bytes4", "bytes5", "bytes6", "bytes7", "bytes8", "bytes9", "bytes10", "bytes11",
    "bytes12", "bytes13", "bytes14", "bytes15", "bytes16", "bytes17", "bytes18", "bytes19", "bytes20", "bytes21",
    "bytes22", "bytes23", "bytes24", "bytes25", "bytes26", "bytes27", "bytes28", "bytes29", "bytes30", "bytes31",
    "byte32", "byte",
];

/// Number of cells in the name × mutability × payable cross-product.
pub fn cell_count() -> usize {
    FUNCTION_NAMES.len() * STATE_MUTABILITIES.len() * PAYABLES.len()
}
