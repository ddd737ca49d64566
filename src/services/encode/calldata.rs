use alloy_primitives::{keccak256, Address, U256};
use alloy_sol_types::{sol, sol_data, SolType};
use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::models::route::{Hop, SwapDirection};
use crate::services::error::{map_abi_error, SwapError};
use crate::services::limits::Limits;

use super::wire::{
    bigint_to_i256_checked, biguint_to_u256_checked, i256_to_bigint, u256_to_biguint,
};

sol! {
    /// Vault-side layout of a single hop.
    #[derive(Debug, PartialEq, Eq)]
    struct BatchSwapStep {
        bytes32 poolId;
        uint256 assetInIndex;
        uint256 assetOutIndex;
        uint256 amount;
        bytes userData;
    }
}

/// `(uint8, Hop[], address[], uint256, int256[], uint256)`
type SwapArgs = (
    sol_data::Uint<8>,
    sol_data::Array<BatchSwapStep>,
    sol_data::Array<sol_data::Address>,
    sol_data::Uint<256>,
    sol_data::Array<sol_data::Int<256>>,
    sol_data::Uint<256>,
);

/// Adapter action the encoded swap arguments are destined for.
pub const TAKE_ORDER_SIGNATURE: &str = "takeOrder(address,bytes,bytes)";

/// Decoded form of the swap call arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCallArgs {
    pub direction: SwapDirection,
    pub hops: Vec<Hop>,
    pub token_addresses: Vec<Address>,
    pub output_amount: BigUint,
    pub limits: Limits,
    pub deadline: BigUint,
}

/// Encodes `(uint8, Hop[], address[], uint256, int256[], uint256)` as a parameter list.
pub fn encode_swap_args(
    direction: SwapDirection,
    hops: &[Hop],
    token_addresses: &[Address],
    output_amount: &BigUint,
    limits: &Limits,
    deadline: &BigUint,
) -> Result<Vec<u8>, SwapError> {
    if limits.len() != token_addresses.len() {
        return Err(SwapError::encoding(format!(
            "limits length {} does not match {} token addresses",
            limits.len(),
            token_addresses.len()
        )));
    }

    let steps = hops
        .iter()
        .enumerate()
        .map(|(index, hop)| encode_hop(index, hop, token_addresses.len()))
        .collect::<Result<Vec<_>, _>>()?;

    let signed_limits = limits
        .values()
        .iter()
        .enumerate()
        .map(|(index, value)| bigint_to_i256_checked(value, &format!("limits[{}]", index)))
        .collect::<Result<Vec<_>, _>>()?;

    let args = (
        direction.as_u8(),
        steps,
        token_addresses.to_vec(),
        biguint_to_u256_checked(output_amount, "outputAmount")?,
        signed_limits,
        biguint_to_u256_checked(deadline, "deadline")?,
    );
    Ok(<SwapArgs as SolType>::abi_encode_params(&args))
}

fn encode_hop(index: usize, hop: &Hop, token_count: usize) -> Result<BatchSwapStep, SwapError> {
    for (label, asset_index) in [
        ("assetInIndex", hop.asset_in_index),
        ("assetOutIndex", hop.asset_out_index),
    ] {
        if asset_index >= token_count {
            return Err(SwapError::encoding(format!(
                "hops[{}].{} {} is out of range for {} token addresses",
                index, label, asset_index, token_count
            )));
        }
    }

    Ok(BatchSwapStep {
        poolId: hop.pool_id,
        assetInIndex: U256::from(hop.asset_in_index),
        assetOutIndex: U256::from(hop.asset_out_index),
        amount: biguint_to_u256_checked(&hop.amount, &format!("hops[{}].amount", index))?,
        userData: hop.user_data.clone(),
    })
}

pub fn decode_swap_args(data: &[u8]) -> Result<SwapCallArgs, SwapError> {
    let (direction, steps, token_addresses, output_amount, limits, deadline) =
        <SwapArgs as SolType>::abi_decode_params(data)
            .map_err(|err| map_abi_error("Failed to decode swap args", err))?;

    let direction = SwapDirection::from_u8(direction)
        .ok_or_else(|| SwapError::encoding(format!("Unknown swap direction {}", direction)))?;

    let hops = steps
        .into_iter()
        .map(decode_hop)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SwapCallArgs {
        direction,
        hops,
        token_addresses,
        output_amount: u256_to_biguint(output_amount),
        limits: Limits::from_values(limits.into_iter().map(i256_to_bigint).collect()),
        deadline: u256_to_biguint(deadline),
    })
}

fn decode_hop(step: BatchSwapStep) -> Result<Hop, SwapError> {
    let index = |value: U256| {
        u256_to_biguint(value)
            .to_usize()
            .ok_or_else(|| SwapError::encoding(format!("Asset index {} does not fit usize", value)))
    };
    Ok(Hop {
        pool_id: step.poolId,
        asset_in_index: index(step.assetInIndex)?,
        asset_out_index: index(step.assetOutIndex)?,
        amount: u256_to_biguint(step.amount),
        user_data: step.userData,
    })
}

pub fn take_order_selector() -> [u8; 4] {
    selector_of(TAKE_ORDER_SIGNATURE)
}

pub(crate) fn encode_function_call(
    signature: &str,
    encoded_args: Vec<u8>,
) -> Result<Vec<u8>, SwapError> {
    let selector = function_selector(signature)?;
    let mut call_data = Vec::with_capacity(4 + encoded_args.len());
    call_data.extend_from_slice(&selector);
    call_data.extend(encoded_args);
    Ok(call_data)
}

pub(crate) fn function_selector(signature: &str) -> Result<[u8; 4], SwapError> {
    let normalized = signature.trim();
    if !normalized.contains('(') {
        return Err(SwapError::encoding(format!(
            "Invalid function signature: {}",
            signature
        )));
    }
    Ok(selector_of(normalized))
}

fn selector_of(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}
