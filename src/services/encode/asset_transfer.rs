use alloy_primitives::{Address, U256};
use alloy_sol_types::SolValue;
use async_trait::async_trait;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::models::route::AdapterAssets;
use crate::services::error::{map_abi_error, SwapError};

use super::wire::{biguint_to_u256_checked, u256_to_biguint};

type AssetTransferTuple = (U256, Vec<Address>, Vec<U256>, Vec<Address>);

/// Read-only adapter call that classifies which assets an action spends and receives.
#[async_trait]
pub trait AdapterQuery: Send + Sync {
    async fn parse_assets_for_action(
        &self,
        selector: [u8; 4],
        encoded_call_args: &[u8],
    ) -> Result<AdapterAssets, SwapError>;
}

/// Queries the adapter and re-encodes its answer for the settlement layer.
///
/// The adapter result is passed through as-is; parallel array lengths are the
/// adapter's responsibility.
pub async fn derive_asset_transfer_args<A>(
    adapter: &A,
    selector: [u8; 4],
    encoded_call_args: &[u8],
) -> Result<Vec<u8>, SwapError>
where
    A: AdapterQuery + ?Sized,
{
    let assets = adapter
        .parse_assets_for_action(selector, encoded_call_args)
        .await?;
    debug!(
        handle_type = assets.spend_assets_handle_type,
        spend_assets = assets.spend_assets.len(),
        incoming_assets = assets.expected_incoming_assets.len(),
        "Adapter classified action assets"
    );
    encode_asset_transfer_args(&assets)
}

/// `(uint256, address[], uint256[], address[])` as a parameter list.
pub fn encode_asset_transfer_args(assets: &AdapterAssets) -> Result<Vec<u8>, SwapError> {
    let amounts = assets
        .spend_asset_amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| {
            biguint_to_u256_checked(amount, &format!("spendAssetAmounts[{}]", index))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let args: AssetTransferTuple = (
        U256::from(assets.spend_assets_handle_type),
        assets.spend_assets.clone(),
        amounts,
        assets.expected_incoming_assets.clone(),
    );
    Ok(args.abi_encode_params())
}

pub fn decode_asset_transfer_args(data: &[u8]) -> Result<AdapterAssets, SwapError> {
    let (handle_type, spend_assets, amounts, incoming) = AssetTransferTuple::abi_decode_params(data)
        .map_err(|err| map_abi_error("Failed to decode asset transfer args", err))?;

    let spend_assets_handle_type = u256_to_biguint(handle_type).to_u8().ok_or_else(|| {
        SwapError::encoding(format!("spendAssetsHandleType {} out of range", handle_type))
    })?;

    Ok(AdapterAssets {
        spend_assets_handle_type,
        spend_assets,
        spend_asset_amounts: amounts.into_iter().map(u256_to_biguint).collect(),
        expected_incoming_assets: incoming,
    })
}
