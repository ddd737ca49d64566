use std::time::{Duration, SystemTime, UNIX_EPOCH};

use num_bigint::BigUint;
use serde_json::json;
use tracing::{info, warn};

use vault_swap_core::config::{init_logging, load_config};
use vault_swap_core::models::balances::SideBalances;
use vault_swap_core::models::messages::PoolSelection;
use vault_swap_core::services::audit::report;
use vault_swap_core::services::encode::AdapterQuery;
use vault_swap_core::services::rpc::RpcClient;
use vault_swap_core::services::settle::SwapAttempt;
use vault_swap_core::services::solver::{HttpSolver, SolveRequest};

/// Prepares a swap and prints what would be submitted. Never sends a transaction.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = load_config();
    let timeout = Duration::from_millis(config.rpc_timeout_ms);
    info!(
        chain = %config.network.chain(),
        rpc_url = %config.network.rpc_url,
        solver_url = %config.solver_url,
        adapter = config.adapter_address.is_some(),
        "Configuration loaded"
    );

    let solver = HttpSolver::new(config.solver_url.clone(), timeout)?;
    let mut rpc = RpcClient::new(config.network.clone(), timeout)?;
    if let Some(adapter) = config.adapter_address {
        rpc = rpc.with_adapter(adapter);
    }

    let swap = &config.swap;
    let request = SolveRequest {
        token_in: swap.token_in,
        token_out: swap.token_out,
        direction: swap.direction,
        amount: swap.amount.clone(),
        query_on_chain: swap.query_on_chain,
        pool_selection: PoolSelection {
            max_pools: Some(swap.max_pools),
            ..PoolSelection::default()
        },
    };

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let deadline = BigUint::from(now + config.deadline_secs);

    let adapter: Option<&dyn AdapterQuery> = if config.adapter_address.is_some() {
        Some(&rpc)
    } else {
        None
    };
    let mut attempt = SwapAttempt::new();
    let prepared = attempt.prepare(&solver, adapter, &request, deadline).await?;

    if !prepared.limits.is_complete() {
        warn!(
            gaps = prepared.limits.gaps.len(),
            "Limits are missing a bound; the payload has no slippage protection on that side"
        );
    }

    let mut balances = SideBalances::default();
    balances
        .capture_before(&rpc, swap.account, swap.token_in, swap.token_out)
        .await?;

    let summary = report(
        swap.direction,
        &prepared.route,
        &prepared.limits.limits,
        swap.token_in,
        swap.token_out,
        &prepared.route.swap_amount,
        &prepared.cost,
        &balances,
    );

    let output = json!({
        "report": summary,
        "stage": format!("{:?}", attempt.stage()),
        "callArgs": format!("0x{}", alloy_primitives::hex::encode(&prepared.call_args)),
        "assetTransferArgs": prepared
            .asset_transfer_args
            .as_ref()
            .map(|args| format!("0x{}", alloy_primitives::hex::encode(args))),
        "deadline": prepared.deadline.to_str_radix(10),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
