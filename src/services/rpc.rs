//! Minimal Ethereum JSON-RPC reads used by the auditor and the adapter query.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{hex, Address, Bytes, U256};
use alloy_sol_types::{sol_data, SolType, SolValue};
use async_trait::async_trait;
use num_bigint::BigUint;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::NetworkConfig;
use crate::models::route::AdapterAssets;
use crate::services::audit::BalanceReader;
use crate::services::encode::wire::{format_address, format_calldata, u256_to_biguint};
use crate::services::encode::{encode_function_call, AdapterQuery};
use crate::services::error::SwapError;

const BALANCE_OF_SIGNATURE: &str = "balanceOf(address)";
const PARSE_ASSETS_SIGNATURE: &str = "parseAssetsForAction(bytes4,bytes)";

/// `(uint8, address[], uint256[], address[])`
type ParseAssetsReturn = (
    sol_data::Uint<8>,
    sol_data::Array<sol_data::Address>,
    sol_data::Array<sol_data::Uint<256>>,
    sol_data::Array<sol_data::Address>,
);

pub struct RpcClient {
    client: Client,
    network: NetworkConfig,
    adapter: Option<Address>,
}

impl RpcClient {
    pub fn new(network: NetworkConfig, timeout: Duration) -> Result<Self, SwapError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SwapError::internal(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            network,
            adapter: None,
        })
    }

    /// Adapter contract answering `parseAssetsForAction`.
    pub fn with_adapter(mut self, adapter: Address) -> Self {
        self.adapter = Some(adapter);
        self
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, SwapError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.network.rpc_url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| SwapError::query(format!("{method} request failed: {err}")))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|err| SwapError::query(format!("{method} response decode failed: {err}")))?;

        if !status.is_success() {
            return Err(SwapError::query(format!(
                "{method} returned status {}",
                status
            )));
        }
        extract_result(method, body)
    }

    async fn eth_call(&self, to: &Address, calldata: &[u8]) -> Result<Bytes, SwapError> {
        let result = self
            .request(
                "eth_call",
                json!([
                    { "to": format_address(to), "data": format_calldata(calldata) },
                    "latest"
                ]),
            )
            .await?;
        let raw = result
            .as_str()
            .ok_or_else(|| SwapError::query("eth_call result is not a hex string"))?;
        hex::decode(raw)
            .map(Bytes::from)
            .map_err(|err| SwapError::query(format!("eth_call returned invalid hex: {err}")))
    }
}

fn extract_result(method: &str, body: Value) -> Result<Value, SwapError> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(SwapError::query(format!("{method} failed: {message}")));
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| SwapError::query(format!("{method} response has no result")))
}

fn parse_quantity(method: &str, value: &Value) -> Result<BigUint, SwapError> {
    let raw = value
        .as_str()
        .ok_or_else(|| SwapError::query(format!("{method} result is not a hex quantity")))?;
    U256::from_str(raw)
        .map(u256_to_biguint)
        .map_err(|err| SwapError::query(format!("{method} returned invalid quantity {raw}: {err}")))
}

#[async_trait]
impl BalanceReader for RpcClient {
    async fn native_balance(&self, account: Address) -> Result<BigUint, SwapError> {
        let result = self
            .request("eth_getBalance", json!([format_address(&account), "latest"]))
            .await?;
        parse_quantity("eth_getBalance", &result)
    }

    async fn token_balance(&self, account: Address, asset: Address) -> Result<BigUint, SwapError> {
        let calldata = encode_function_call(BALANCE_OF_SIGNATURE, account.abi_encode())?;
        let output = self.eth_call(&asset, &calldata).await?;
        let balance = U256::abi_decode(&output)
            .map_err(|err| SwapError::query(format!("balanceOf returned malformed data: {err}")))?;
        Ok(u256_to_biguint(balance))
    }
}

#[async_trait]
impl AdapterQuery for RpcClient {
    async fn parse_assets_for_action(
        &self,
        selector: [u8; 4],
        encoded_call_args: &[u8],
    ) -> Result<AdapterAssets, SwapError> {
        let adapter = self
            .adapter
            .ok_or_else(|| SwapError::internal("No adapter address configured"))?;

        let args = (
            alloy_primitives::FixedBytes::<4>::from(selector),
            Bytes::copy_from_slice(encoded_call_args),
        )
            .abi_encode_params();
        let calldata = encode_function_call(PARSE_ASSETS_SIGNATURE, args)?;
        let output = self.eth_call(&adapter, &calldata).await?;

        let assets = decode_parse_assets_output(&output)?;
        debug!(
            chain_id = self.network.chain_id,
            adapter = %format_address(&adapter),
            handle_type = assets.spend_assets_handle_type,
            "Adapter query answered"
        );
        Ok(assets)
    }
}

fn decode_parse_assets_output(output: &[u8]) -> Result<AdapterAssets, SwapError> {
    let (handle_type, spend_assets, amounts, incoming) =
        <ParseAssetsReturn as SolType>::abi_decode_params(output).map_err(|err| {
            SwapError::query(format!("parseAssetsForAction returned malformed data: {err}"))
        })?;
    Ok(AdapterAssets {
        spend_assets_handle_type: handle_type,
        spend_assets,
        spend_asset_amounts: amounts.into_iter().map(u256_to_biguint).collect(),
        expected_incoming_assets: incoming,
    })
}
