mod logging;
pub use logging::init_logging;

use std::env;
use std::str::FromStr;

use alloy_chains::Chain;
use alloy_primitives::Address;
use num_bigint::BigUint;

use crate::models::route::SwapDirection;

/// The network every client of one invocation talks to. Passed explicitly, never global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub rpc_url: String,
}

impl NetworkConfig {
    pub fn chain(&self) -> Chain {
        Chain::from_id(self.chain_id)
    }
}

/// Inputs for one previewed swap.
#[derive(Debug, Clone)]
pub struct SwapInputs {
    pub account: Address,
    pub token_in: Address,
    pub token_out: Address,
    pub amount: BigUint,
    pub direction: SwapDirection,
    pub max_pools: u32,
    pub query_on_chain: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub solver_url: String,
    pub adapter_address: Option<Address>,
    pub deadline_secs: u64,
    pub rpc_timeout_ms: u64,
    pub swap: SwapInputs,
}

pub fn load_config() -> AppConfig {
    dotenv::dotenv().ok();

    let rpc_url = env::var("RPC_URL").expect("RPC_URL must be set");
    let solver_url = env::var("SOLVER_URL").expect("SOLVER_URL must be set");
    let chain_id = parse_env_u64("CHAIN_ID", 1);
    let deadline_secs = parse_env_u64("SWAP_DEADLINE_SECS", 300);
    let rpc_timeout_ms = parse_env_u64("RPC_TIMEOUT_MS", 10_000);

    assert!(chain_id > 0, "CHAIN_ID must be > 0");
    assert!(deadline_secs > 0, "SWAP_DEADLINE_SECS must be > 0");
    assert!(rpc_timeout_ms > 0, "RPC_TIMEOUT_MS must be > 0");

    let adapter_address = match env::var("ADAPTER_ADDRESS") {
        Ok(value) => Some(parse_required::<Address>("ADAPTER_ADDRESS", &value)),
        Err(env::VarError::NotPresent) => None,
        Err(err) => panic!("Failed reading ADAPTER_ADDRESS: {err}"),
    };

    let swap = SwapInputs {
        account: parse_env_required("ACCOUNT"),
        token_in: parse_env_required("TOKEN_IN"),
        token_out: parse_env_required("TOKEN_OUT"),
        amount: parse_env_required("SWAP_AMOUNT"),
        direction: env::var("SWAP_DIRECTION")
            .map(|value| parse_required::<SwapDirection>("SWAP_DIRECTION", &value))
            .unwrap_or(SwapDirection::ExactIn),
        max_pools: u32::try_from(parse_env_u64("MAX_POOLS", 4)).expect("Invalid MAX_POOLS"),
        query_on_chain: parse_env_bool("QUERY_ON_CHAIN", true),
    };

    AppConfig {
        network: NetworkConfig { chain_id, rpc_url },
        solver_url,
        adapter_address,
        deadline_secs,
        rpc_timeout_ms,
        swap,
    }
}

fn parse_env_required<T>(key: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = env::var(key).unwrap_or_else(|_| panic!("{key} must be set"));
    parse_required(key, &value)
}

fn parse_required<T>(key: &str, value: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .unwrap_or_else(|err| panic!("Invalid {key}: {err}"))
}

fn parse_env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| panic!("Invalid {key}")),
        Err(env::VarError::NotPresent) => default,
        Err(err) => panic!("Failed reading {key}: {err}"),
    }
}

fn parse_env_bool(key: &str, default: bool) -> bool {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return default,
        Err(err) => panic!("Failed reading {key}: {err}"),
    };

    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => true,
        "0" | "false" | "no" => false,
        _ => panic!("Invalid {key}: expected one of 1/0/true/false/yes/no, got {value}"),
    }
}
