use num_bigint::{BigInt, BigUint};

/// Balance of one asset for one account around a single swap attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub before: Option<BigUint>,
    pub after: Option<BigUint>,
}

impl BalanceSnapshot {
    /// `after - before`, once both sides have been captured.
    pub fn delta(&self) -> Option<BigInt> {
        match (&self.before, &self.after) {
            (Some(before), Some(after)) => Some(compute_delta(before, after)),
            _ => None,
        }
    }
}

/// Exact signed change from `before` to `after`.
pub fn compute_delta(before: &BigUint, after: &BigUint) -> BigInt {
    BigInt::from(after.clone()) - BigInt::from(before.clone())
}

/// Snapshots for both ends of the trade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideBalances {
    pub token_in: BalanceSnapshot,
    pub token_out: BalanceSnapshot,
}
