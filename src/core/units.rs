use crate::utils::error::{DeployError, Result};
use alloy_primitives::U256;

pub const ETHER_DECIMALS: u8 = 18;

/// Converts a decimal string such as `"0.01"` into base units.
///
/// The conversion is exact: fractional digits beyond `decimals` are an error,
/// never rounded.
pub fn parse_units(value: &str, decimals: u8) -> Result<U256> {
    let invalid = |reason: &str| DeployError::InvalidAmountError {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid("amount is empty"));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("amount has no digits"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("only unsigned decimal digits are allowed"));
    }
    if fraction.len() > decimals as usize {
        return Err(invalid(&format!(
            "more than {} fractional digits",
            decimals
        )));
    }

    let padded = format!("{}{:0<width$}", whole, fraction, width = decimals as usize);
    let digits = padded.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10).map_err(|_| invalid("amount does not fit in 256 bits"))
}

pub fn parse_ether(value: &str) -> Result<U256> {
    parse_units(value, ETHER_DECIMALS)
}

/// Renders base units as a decimal string with trailing zeros trimmed.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;

    let (whole, fraction) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    }
}

pub fn format_ether(value: U256) -> String {
    format_units(value, ETHER_DECIMALS)
}
