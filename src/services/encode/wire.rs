use std::str::FromStr;

use alloy_primitives::{hex, Address, Bytes, Sign, B256, I256, U256};
use num_bigint::{BigInt, BigUint};

use crate::services::error::SwapError;

/// Parses a base-unit decimal amount. A fractional part is tolerated only when it is all zeros.
pub(crate) fn parse_amount(value: &str) -> Result<BigUint, SwapError> {
    let trimmed = value.trim();
    let (integer, fraction) = match trimmed.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (trimmed, ""),
    };
    if !fraction.chars().all(|ch| ch == '0') {
        return Err(SwapError::invalid_route(format!(
            "Amount must be an integer in base units: {}",
            value
        )));
    }
    if integer.is_empty() || !integer.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(SwapError::invalid_route(format!("Invalid amount: {}", value)));
    }
    BigUint::from_str(integer)
        .map_err(|_| SwapError::invalid_route(format!("Invalid amount: {}", value)))
}

pub(crate) fn parse_address(value: &str) -> Result<Address, SwapError> {
    let trimmed = value.trim();
    let bytes = hex::decode(trimmed)
        .map_err(|err| SwapError::invalid_route(format!("Invalid address {}: {}", value, err)))?;
    if bytes.len() != 20 {
        return Err(SwapError::invalid_route(format!(
            "Invalid address length for {}",
            value
        )));
    }
    Ok(Address::from_slice(&bytes))
}

pub(crate) fn parse_pool_id(value: &str) -> Result<B256, SwapError> {
    let trimmed = value.trim();
    let bytes = hex::decode(trimmed)
        .map_err(|err| SwapError::invalid_route(format!("Invalid pool id {}: {}", value, err)))?;
    if bytes.len() != 32 {
        return Err(SwapError::invalid_route(format!(
            "Invalid pool id length for {}",
            value
        )));
    }
    Ok(B256::from_slice(&bytes))
}

pub(crate) fn parse_hex_bytes(value: &str) -> Result<Bytes, SwapError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(Bytes::new());
    }
    hex::decode(trimmed)
        .map(Bytes::from)
        .map_err(|err| SwapError::invalid_route(format!("Invalid hex data {}: {}", value, err)))
}

pub(crate) fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

pub(crate) fn format_calldata(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

pub(crate) fn biguint_to_u256_checked(value: &BigUint, label: &str) -> Result<U256, SwapError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(SwapError::encoding(format!("{} must fit uint256", label)));
    }

    Ok(U256::from_be_slice(&bytes))
}

pub(crate) fn bigint_to_i256_checked(value: &BigInt, label: &str) -> Result<I256, SwapError> {
    let (sign, magnitude) = value.clone().into_parts();
    let abs = biguint_to_u256_checked(&magnitude, label)
        .map_err(|_| SwapError::encoding(format!("{} must fit int256", label)))?;
    let sign = match sign {
        num_bigint::Sign::Minus => Sign::Negative,
        num_bigint::Sign::NoSign | num_bigint::Sign::Plus => Sign::Positive,
    };
    I256::checked_from_sign_and_abs(sign, abs)
        .ok_or_else(|| SwapError::encoding(format!("{} must fit int256", label)))
}

pub(crate) fn u256_to_biguint(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes::<32>())
}

pub(crate) fn i256_to_bigint(value: I256) -> BigInt {
    let (sign, abs) = value.into_sign_and_abs();
    let magnitude = u256_to_biguint(abs);
    match sign {
        Sign::Negative => -BigInt::from(magnitude),
        Sign::Positive => BigInt::from(magnitude),
    }
}
