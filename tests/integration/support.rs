use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use num_bigint::BigUint;
use vault_swap_core::services::audit::BalanceReader;
use vault_swap_core::services::encode::AdapterQuery;
use vault_swap_core::services::settle::{FundManagement, VaultSubmitter};
use vault_swap_core::services::solver::{SolveRequest, SolvedRoute, Solver};
use vault_swap_core::{AdapterAssets, Hop, Route, SwapDirection, SwapError};

pub const ETH: &str = "0x0000000000000000000000000000000000000000";
pub const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
pub const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
pub const TRADER: &str = "0x00000000000000000000000000000000000000b0";

pub fn address(value: &str) -> Address {
    Address::from_str(value).unwrap()
}

pub fn amount(value: &str) -> BigUint {
    BigUint::from_str(value).unwrap()
}

/// ETH → WETH → USDC through two pools.
pub fn two_hop_route(direction: SwapDirection, swap_amount: &str, return_amount: &str) -> Route {
    Route {
        direction,
        hops: vec![
            Hop {
                pool_id: B256::repeat_byte(0x01),
                asset_in_index: 0,
                asset_out_index: 1,
                amount: amount(swap_amount),
                user_data: Bytes::new(),
            },
            Hop {
                pool_id: B256::repeat_byte(0x02),
                asset_in_index: 1,
                asset_out_index: 2,
                amount: BigUint::from(0u32),
                user_data: Bytes::from(vec![0x01]),
            },
        ],
        token_addresses: vec![address(ETH), address(WETH), address(USDC)],
        token_in: address(ETH),
        token_out: address(USDC),
        swap_amount: amount(swap_amount),
        return_amount: amount(return_amount),
    }
}

pub struct FixedSolver {
    pub route: Route,
    pub cost: BigUint,
}

#[async_trait]
impl Solver for FixedSolver {
    async fn solve(&self, request: &SolveRequest) -> Result<SolvedRoute, SwapError> {
        let mut route = self.route.clone();
        route.direction = request.direction;
        Ok(SolvedRoute {
            route,
            cost: self.cost.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    Native,
    Token(Address),
}

#[derive(Default)]
pub struct LedgerReader {
    pub balances: Mutex<HashMap<Address, BigUint>>,
    pub reads: Mutex<Vec<Read>>,
}

impl LedgerReader {
    pub fn set(&self, asset: &str, value: &str) {
        self.balances
            .lock()
            .unwrap()
            .insert(address(asset), amount(value));
    }

    fn get(&self, asset: Address) -> BigUint {
        self.balances
            .lock()
            .unwrap()
            .get(&asset)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl BalanceReader for LedgerReader {
    async fn native_balance(&self, _account: Address) -> Result<BigUint, SwapError> {
        self.reads.lock().unwrap().push(Read::Native);
        Ok(self.get(Address::ZERO))
    }

    async fn token_balance(&self, _account: Address, asset: Address) -> Result<BigUint, SwapError> {
        self.reads.lock().unwrap().push(Read::Token(asset));
        Ok(self.get(asset))
    }
}

pub struct EchoAdapter {
    pub assets: AdapterAssets,
}

#[async_trait]
impl AdapterQuery for EchoAdapter {
    async fn parse_assets_for_action(
        &self,
        _selector: [u8; 4],
        _encoded_call_args: &[u8],
    ) -> Result<AdapterAssets, SwapError> {
        Ok(self.assets.clone())
    }
}

/// Applies fixed post-trade balances when called.
pub struct LedgerSubmitter<'a> {
    pub ledger: &'a LedgerReader,
    pub after: Vec<(&'static str, &'static str)>,
    pub fail: bool,
}

#[async_trait]
impl VaultSubmitter for LedgerSubmitter<'_> {
    async fn submit(
        &self,
        _call_args: &[u8],
        _funds: &FundManagement,
        _deadline: &BigUint,
    ) -> Result<(), SwapError> {
        if self.fail {
            return Err(SwapError::query("transaction dropped"));
        }
        for (asset, value) in &self.after {
            self.ledger.set(asset, value);
        }
        Ok(())
    }
}
