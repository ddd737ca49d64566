use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use num_bigint::BigUint;

use crate::models::route::{AdapterAssets, Hop, Route, SwapDirection};
use crate::services::audit::BalanceReader;
use crate::services::encode::AdapterQuery;
use crate::services::error::SwapError;
use crate::services::settle::{FundManagement, VaultSubmitter};
use crate::services::solver::{SolveRequest, SolvedRoute, Solver};

pub(crate) const ETH: &str = "0x0000000000000000000000000000000000000000";
pub(crate) const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
pub(crate) const ACCOUNT: &str = "0x00000000000000000000000000000000000000a1";

pub(crate) fn address(value: &str) -> Address {
    Address::from_str(value).unwrap()
}

pub(crate) fn pool_id(tag: u8) -> B256 {
    B256::repeat_byte(tag)
}

/// Route whose hops walk the token list in order.
pub(crate) fn route_with(
    direction: SwapDirection,
    token_addresses: Vec<Address>,
    token_in: &str,
    token_out: &str,
    swap_amount: &str,
    return_amount: &str,
) -> Route {
    let swap_amount = BigUint::from_str(swap_amount).unwrap();
    let hops = (1..token_addresses.len())
        .map(|index| Hop {
            pool_id: pool_id(index as u8),
            asset_in_index: index - 1,
            asset_out_index: index,
            amount: if index == 1 {
                swap_amount.clone()
            } else {
                BigUint::from(0u32)
            },
            user_data: Bytes::new(),
        })
        .collect();

    Route {
        direction,
        hops,
        token_addresses,
        token_in: address(token_in),
        token_out: address(token_out),
        swap_amount,
        return_amount: BigUint::from_str(return_amount).unwrap(),
    }
}

pub(crate) fn eth_usdc_route() -> Route {
    route_with(
        SwapDirection::ExactIn,
        vec![address(ETH), address(USDC)],
        ETH,
        USDC,
        "1000000000000000000",
        "2000000000",
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BalanceCall {
    Native(Address),
    Token(Address, Address),
}

/// Balance reader backed by a map; records every call it receives.
#[derive(Default)]
pub(crate) struct MockBalanceReader {
    pub(crate) balances: Mutex<HashMap<Address, BigUint>>,
    pub(crate) calls: Mutex<Vec<BalanceCall>>,
    pub(crate) fail: bool,
}

impl MockBalanceReader {
    pub(crate) fn with_balances(entries: &[(Address, u64)]) -> Self {
        let balances = entries
            .iter()
            .map(|(asset, amount)| (*asset, BigUint::from(*amount)))
            .collect();
        Self {
            balances: Mutex::new(balances),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn set(&self, asset: Address, amount: u64) {
        self.balances
            .lock()
            .unwrap()
            .insert(asset, BigUint::from(amount));
    }

    pub(crate) fn calls(&self) -> Vec<BalanceCall> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, asset: Address) -> Result<BigUint, SwapError> {
        if self.fail {
            return Err(SwapError::query("balance read reverted"));
        }
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(&asset)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl BalanceReader for MockBalanceReader {
    async fn native_balance(&self, account: Address) -> Result<BigUint, SwapError> {
        self.calls.lock().unwrap().push(BalanceCall::Native(account));
        self.lookup(Address::ZERO)
    }

    async fn token_balance(&self, account: Address, asset: Address) -> Result<BigUint, SwapError> {
        self.calls
            .lock()
            .unwrap()
            .push(BalanceCall::Token(account, asset));
        self.lookup(asset)
    }
}

pub(crate) struct MockAdapter {
    pub(crate) assets: AdapterAssets,
    pub(crate) seen: Mutex<Vec<([u8; 4], Vec<u8>)>>,
}

impl MockAdapter {
    pub(crate) fn new(assets: AdapterAssets) -> Self {
        Self {
            assets,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AdapterQuery for MockAdapter {
    async fn parse_assets_for_action(
        &self,
        selector: [u8; 4],
        encoded_call_args: &[u8],
    ) -> Result<AdapterAssets, SwapError> {
        self.seen
            .lock()
            .unwrap()
            .push((selector, encoded_call_args.to_vec()));
        Ok(self.assets.clone())
    }
}

pub(crate) struct FailingAdapter;

#[async_trait]
impl AdapterQuery for FailingAdapter {
    async fn parse_assets_for_action(
        &self,
        _selector: [u8; 4],
        _encoded_call_args: &[u8],
    ) -> Result<AdapterAssets, SwapError> {
        Err(SwapError::query("adapter call reverted"))
    }
}

pub(crate) struct StaticSolver {
    pub(crate) solved: Result<SolvedRoute, SwapError>,
}

#[async_trait]
impl Solver for StaticSolver {
    async fn solve(&self, _request: &SolveRequest) -> Result<SolvedRoute, SwapError> {
        self.solved.clone()
    }
}

/// Submitter that moves balances in the mock reader as if the swap settled.
pub(crate) struct SettlingSubmitter<'a> {
    pub(crate) reader: &'a MockBalanceReader,
    pub(crate) settled: Vec<(Address, u64)>,
    pub(crate) payloads: Mutex<Vec<Vec<u8>>>,
}

#[async_trait]
impl VaultSubmitter for SettlingSubmitter<'_> {
    async fn submit(
        &self,
        call_args: &[u8],
        _funds: &FundManagement,
        _deadline: &BigUint,
    ) -> Result<(), SwapError> {
        self.payloads.lock().unwrap().push(call_args.to_vec());
        for (asset, amount) in &self.settled {
            self.reader.set(*asset, *amount);
        }
        Ok(())
    }
}
