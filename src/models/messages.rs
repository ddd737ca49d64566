use serde::{Deserialize, Serialize};

use crate::models::route::SwapDirection;

/// Pool-selection knobs forwarded verbatim to the solver.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoolSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pools: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_gas: Option<String>,
    #[serde(default)]
    pub force_refresh: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolverQuery {
    pub token_in: String,
    pub token_out: String,
    pub swap_type: SwapDirection,
    pub amount: String,
    pub query_on_chain: bool,
    #[serde(default)]
    pub pool_selection: PoolSelection,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HopWire {
    pub pool_id: String,
    pub asset_in_index: u64,
    pub asset_out_index: u64,
    pub amount: String,
    #[serde(default)]
    pub user_data: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolverRouteResponse {
    pub swaps: Vec<HopWire>,
    pub token_addresses: Vec<String>,
    pub token_in: String,
    pub token_out: String,
    pub swap_amount: String,
    pub return_amount: String,
    /// Execution cost estimate in output-token units.
    #[serde(default)]
    pub cost: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

/// Structured summary of one swap attempt. Amounts are base-unit decimal strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapReport {
    pub direction: String,
    pub token_addresses: Vec<String>,
    pub limits: Vec<String>,
    pub token_in: String,
    pub token_out: String,
    pub swap_amount: String,
    /// Solver cost estimate priced in input-token units.
    pub cost_in_token_in: String,
    pub token_in_balance: BalanceReport,
    pub token_out_balance: BalanceReport,
}
