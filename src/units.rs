//! Base-unit conversion for native asset amounts.
//!
//! Amounts cross this layer as decimal strings (UI input) and leave it as
//! the network's base unit, wei, at the fixed 10^18 scale. The conversion
//! itself is delegated to `alloy`'s fixed-point parser.

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;
use thiserror::Error;

/// Number of decimals between the display unit and the base unit.
pub const DECIMALS: u32 = 18;

/// A decimal amount string that could not be converted to base units.
#[derive(Debug, Error)]
#[error("invalid amount {input:?}")]
pub struct UnitsError {
    /// The offending input, as typed.
    pub input: String,
    #[source]
    source: alloy::primitives::utils::UnitsError,
}

/// Convert a decimal amount string into base units (wei).
///
/// `"0.00001"` converts to exactly `10^13`.
pub fn to_base_units(amount: &str) -> Result<U256, UnitsError> {
    parse_ether(amount.trim()).map_err(|source| UnitsError {
        input: amount.to_string(),
        source,
    })
}

/// Format a base-unit value back into a decimal string.
pub fn to_decimal(value: U256) -> String {
    format_ether(value)
}
