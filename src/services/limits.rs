//! Slippage bounds for a solved route.
//!
//! The vault takes one signed limit per asset: a positive value caps what the
//! caller sends, a negative value is the minimum the caller must receive.

use alloy_primitives::Address;
use num_bigint::{BigInt, BigUint};
use tracing::{debug, warn};

use crate::models::route::{Route, SwapDirection};
use crate::services::encode::wire::format_address;
use crate::services::error::SwapError;

/// Received amounts are floored at 99% of the estimate.
const SLIPPAGE_NUMERATOR: u32 = 99;
const SLIPPAGE_DENOMINATOR: u32 = 100;

/// Signed per-token bounds, positionally aligned with the route's token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits(Vec<BigInt>);

impl Limits {
    pub fn zeroed(len: usize) -> Self {
        Self(vec![BigInt::from(0); len])
    }

    pub fn from_values(values: Vec<BigInt>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[BigInt] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|value| value.to_str_radix(10)).collect()
    }
}

/// Which end of the route could not be bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    TokenIn,
    TokenOut,
}

/// An endpoint token missing from the token list. The matching bound stays zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundGap {
    pub side: BoundSide,
    pub token: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLimits {
    pub limits: Limits,
    pub gaps: Vec<BoundGap>,
}

impl RouteLimits {
    /// `false` means slippage protection is not in place for at least one side.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

pub fn compute_limits(direction: SwapDirection, route: &Route) -> Result<RouteLimits, SwapError> {
    if route.is_self_swap() {
        return Err(SwapError::invalid_route(format!(
            "tokenIn and tokenOut are both {}",
            format_address(&route.token_in)
        )));
    }

    let (send_bound, receive_base) = match direction {
        SwapDirection::ExactIn => (&route.swap_amount, &route.return_amount),
        SwapDirection::ExactOut => (&route.return_amount, &route.swap_amount),
    };

    let mut values = vec![BigInt::from(0); route.token_addresses.len()];
    let mut gaps = Vec::new();

    match route.position_of(&route.token_in) {
        Some(index) => values[index] = BigInt::from(send_bound.clone()),
        None => gaps.push(BoundGap {
            side: BoundSide::TokenIn,
            token: route.token_in,
        }),
    }

    match route.position_of(&route.token_out) {
        Some(index) => values[index] = -BigInt::from(apply_slippage(receive_base)),
        None => gaps.push(BoundGap {
            side: BoundSide::TokenOut,
            token: route.token_out,
        }),
    }

    for gap in &gaps {
        warn!(
            event = "bound_gap",
            side = ?gap.side,
            token = %format_address(&gap.token),
            "Route token list does not contain endpoint; bound left at zero"
        );
    }

    let limits = Limits(values);
    debug!(
        direction = %direction,
        tokens = route.token_addresses.len(),
        limits = ?limits.to_strings(),
        "Computed route limits"
    );

    Ok(RouteLimits { limits, gaps })
}

/// Integer division truncates, so the negated result rounds toward zero.
fn apply_slippage(amount: &BigUint) -> BigUint {
    (amount * BigUint::from(SLIPPAGE_NUMERATOR)) / BigUint::from(SLIPPAGE_DENOMINATOR)
}
