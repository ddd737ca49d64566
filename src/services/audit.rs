//! Balance capture around a swap submission and the summary built from it.

use alloy_primitives::Address;
use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::{debug, warn};

pub use crate::models::balances::compute_delta;
use crate::models::balances::{BalanceSnapshot, SideBalances};
use crate::models::messages::{BalanceReport, SwapReport};
use crate::models::route::{Route, SwapDirection};
use crate::services::encode::wire::format_address;
use crate::services::error::SwapError;
use crate::services::limits::Limits;

/// Source of account balances. Native and token balances come from different reads.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    async fn native_balance(&self, account: Address) -> Result<BigUint, SwapError>;

    async fn token_balance(&self, account: Address, asset: Address) -> Result<BigUint, SwapError>;
}

/// The zero address stands for the chain's native currency.
pub fn is_native(asset: &Address) -> bool {
    *asset == Address::ZERO
}

pub async fn capture_balance<R>(
    reader: &R,
    account: Address,
    asset: Address,
) -> Result<BigUint, SwapError>
where
    R: BalanceReader + ?Sized,
{
    let result = if is_native(&asset) {
        reader.native_balance(account).await
    } else {
        reader.token_balance(account, asset).await
    };

    match &result {
        Ok(balance) => debug!(
            account = %format_address(&account),
            asset = %format_address(&asset),
            balance = %balance,
            "Captured balance"
        ),
        Err(err) => warn!(
            account = %format_address(&account),
            asset = %format_address(&asset),
            error = err.message(),
            "Balance query failed"
        ),
    }
    result
}

impl SideBalances {
    /// Records the pre-submission balance of both sides.
    pub async fn capture_before<R>(
        &mut self,
        reader: &R,
        account: Address,
        token_in: Address,
        token_out: Address,
    ) -> Result<(), SwapError>
    where
        R: BalanceReader + ?Sized,
    {
        self.token_in.before = Some(capture_balance(reader, account, token_in).await?);
        self.token_out.before = Some(capture_balance(reader, account, token_out).await?);
        Ok(())
    }

    /// Records the post-confirmation balance of both sides.
    pub async fn capture_after<R>(
        &mut self,
        reader: &R,
        account: Address,
        token_in: Address,
        token_out: Address,
    ) -> Result<(), SwapError>
    where
        R: BalanceReader + ?Sized,
    {
        self.token_in.after = Some(capture_balance(reader, account, token_in).await?);
        self.token_out.after = Some(capture_balance(reader, account, token_out).await?);
        Ok(())
    }
}

/// Prices a cost quoted in output-token units in input-token units, at the route's own rate.
/// Truncates toward zero. A route with no output amount has no rate and yields zero.
pub fn cost_in_input_token(direction: SwapDirection, route: &Route, cost: &BigUint) -> BigUint {
    let (input, output) = match direction {
        SwapDirection::ExactIn => (&route.swap_amount, &route.return_amount),
        SwapDirection::ExactOut => (&route.return_amount, &route.swap_amount),
    };
    if output.is_zero() {
        return BigUint::zero();
    }
    cost * input / output
}

/// `cost` is the solver's estimate in output-token units; the report carries it in input-token units.
#[allow(clippy::too_many_arguments)]
pub fn report(
    direction: SwapDirection,
    route: &Route,
    limits: &Limits,
    token_in: Address,
    token_out: Address,
    swap_amount: &BigUint,
    cost: &BigUint,
    balances: &SideBalances,
) -> SwapReport {
    SwapReport {
        direction: direction.label().to_string(),
        token_addresses: route.token_addresses.iter().map(format_address).collect(),
        limits: limits.to_strings(),
        token_in: format_address(&token_in),
        token_out: format_address(&token_out),
        swap_amount: swap_amount.to_str_radix(10),
        cost_in_token_in: cost_in_input_token(direction, route, cost).to_str_radix(10),
        token_in_balance: balance_report(&token_in, &balances.token_in),
        token_out_balance: balance_report(&token_out, &balances.token_out),
    }
}

fn balance_report(token: &Address, snapshot: &BalanceSnapshot) -> BalanceReport {
    BalanceReport {
        token: format_address(token),
        before: snapshot.before.as_ref().map(|value| value.to_str_radix(10)),
        after: snapshot.after.as_ref().map(|value| value.to_str_radix(10)),
        delta: snapshot.delta().map(|value| value.to_str_radix(10)),
    }
}
