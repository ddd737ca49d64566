use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, Bytes, B256};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Which side of the trade is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapDirection {
    /// Fixed input amount, solving for output (vault `GIVEN_IN`).
    ExactIn,
    /// Fixed output amount, solving for required input (vault `GIVEN_OUT`).
    ExactOut,
}

impl SwapDirection {
    pub fn label(&self) -> &'static str {
        match self {
            SwapDirection::ExactIn => "ExactIn",
            SwapDirection::ExactOut => "ExactOut",
        }
    }

    /// Discriminant used by the vault's swap kind enum.
    pub fn as_u8(&self) -> u8 {
        match self {
            SwapDirection::ExactIn => 0,
            SwapDirection::ExactOut => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SwapDirection::ExactIn),
            1 => Some(SwapDirection::ExactOut),
            _ => None,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SwapDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "exactin" | "givenin" | "in" => Ok(SwapDirection::ExactIn),
            "exactout" | "givenout" | "out" => Ok(SwapDirection::ExactOut),
            _ => Err(format!("unknown swap direction: {value}")),
        }
    }
}

/// One pool-level exchange step. Indices point into the route's token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub pool_id: B256,
    pub asset_in_index: usize,
    pub asset_out_index: usize,
    pub amount: BigUint,
    pub user_data: Bytes,
}

/// A solved route as handed over by the solver. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub direction: SwapDirection,
    pub hops: Vec<Hop>,
    pub token_addresses: Vec<Address>,
    pub token_in: Address,
    pub token_out: Address,
    pub swap_amount: BigUint,
    pub return_amount: BigUint,
}

impl Route {
    /// Position of `token` in the token list.
    pub fn position_of(&self, token: &Address) -> Option<usize> {
        self.token_addresses
            .iter()
            .position(|candidate| candidate == token)
    }

    pub fn is_self_swap(&self) -> bool {
        self.token_in == self.token_out
    }
}

/// The four values an adapter reports for a pending action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterAssets {
    pub spend_assets_handle_type: u8,
    pub spend_assets: Vec<Address>,
    pub spend_asset_amounts: Vec<BigUint>,
    pub expected_incoming_assets: Vec<Address>,
}
