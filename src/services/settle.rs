//! One swap attempt from solved route to audited report.
//!
//! Stages advance strictly in order:
//! `Planned → LimitsComputed → PayloadEncoded → Submitted → Audited → Reported`.
//! Any failing step moves the attempt to `Failed` and the error goes back to the
//! caller untouched. Nothing is retried.

use alloy_primitives::Address;
use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::{info, warn};

use crate::models::balances::SideBalances;
use crate::models::messages::SwapReport;
use crate::models::route::Route;
use crate::services::audit::{report, BalanceReader};
use crate::services::encode::{
    derive_asset_transfer_args, encode_swap_args, take_order_selector, AdapterQuery,
};
use crate::services::error::SwapError;
use crate::services::limits::{compute_limits, RouteLimits};
use crate::services::solver::{solve_viable, SolveRequest, Solver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapStage {
    Planned,
    LimitsComputed,
    PayloadEncoded,
    Submitted,
    Audited,
    Reported,
    Failed(String),
}

impl SwapStage {
    fn successor(&self) -> Option<SwapStage> {
        match self {
            SwapStage::Planned => Some(SwapStage::LimitsComputed),
            SwapStage::LimitsComputed => Some(SwapStage::PayloadEncoded),
            SwapStage::PayloadEncoded => Some(SwapStage::Submitted),
            SwapStage::Submitted => Some(SwapStage::Audited),
            SwapStage::Audited => Some(SwapStage::Reported),
            SwapStage::Reported | SwapStage::Failed(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapStage::Reported | SwapStage::Failed(_))
    }
}

/// Vault fund-management parameters, forwarded untouched to the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundManagement {
    pub sender: Address,
    pub recipient: Address,
    pub from_internal_balance: bool,
    pub to_internal_balance: bool,
}

impl FundManagement {
    /// Sender and recipient are the same account, no internal balances.
    pub fn external(account: Address) -> Self {
        Self {
            sender: account,
            recipient: account,
            from_internal_balance: false,
            to_internal_balance: false,
        }
    }
}

/// Whatever actually sends the transaction to the vault.
#[async_trait]
pub trait VaultSubmitter: Send + Sync {
    /// Returns once the submission is confirmed.
    async fn submit(
        &self,
        call_args: &[u8],
        funds: &FundManagement,
        deadline: &BigUint,
    ) -> Result<(), SwapError>;
}

/// Everything derived before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSwap {
    pub route: Route,
    pub cost: BigUint,
    pub limits: RouteLimits,
    pub output_amount_bound: BigUint,
    pub deadline: BigUint,
    pub call_args: Vec<u8>,
    pub asset_transfer_args: Option<Vec<u8>>,
}

#[derive(Debug)]
pub struct SwapAttempt {
    stage: SwapStage,
}

impl Default for SwapAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapAttempt {
    pub fn new() -> Self {
        Self {
            stage: SwapStage::Planned,
        }
    }

    pub fn stage(&self) -> &SwapStage {
        &self.stage
    }

    pub fn advance(&mut self, next: SwapStage) -> Result<(), SwapError> {
        if self.stage.successor().as_ref() != Some(&next) {
            return Err(SwapError::internal(format!(
                "Cannot move swap attempt from {:?} to {:?}",
                self.stage, next
            )));
        }
        info!(from = ?self.stage, to = ?next, "Swap attempt advanced");
        self.stage = next;
        Ok(())
    }

    pub fn fail(&mut self, err: &SwapError) {
        warn!(stage = ?self.stage, error = %err, "Swap attempt failed");
        self.stage = SwapStage::Failed(err.to_string());
    }

    fn guard<T>(&mut self, result: Result<T, SwapError>) -> Result<T, SwapError> {
        if let Err(err) = &result {
            self.fail(err);
        }
        result
    }

    /// Solves, bounds and encodes. Stops at `PayloadEncoded`.
    pub async fn prepare<S>(
        &mut self,
        solver: &S,
        adapter: Option<&dyn AdapterQuery>,
        request: &SolveRequest,
        deadline: BigUint,
    ) -> Result<PreparedSwap, SwapError>
    where
        S: Solver + ?Sized,
    {
        let result = self.prepare_inner(solver, adapter, request, deadline).await;
        self.guard(result)
    }

    async fn prepare_inner<S>(
        &mut self,
        solver: &S,
        adapter: Option<&dyn AdapterQuery>,
        request: &SolveRequest,
        deadline: BigUint,
    ) -> Result<PreparedSwap, SwapError>
    where
        S: Solver + ?Sized,
    {
        if self.stage != SwapStage::Planned {
            return Err(SwapError::internal(format!(
                "Swap attempt already at {:?}",
                self.stage
            )));
        }

        let solved = solve_viable(solver, request).await?;
        let route = solved.route;

        let limits = compute_limits(request.direction, &route)?;
        self.advance(SwapStage::LimitsComputed)?;

        let output_amount_bound = output_amount_bound(&route, &limits);
        let call_args = encode_swap_args(
            request.direction,
            &route.hops,
            &route.token_addresses,
            &output_amount_bound,
            &limits.limits,
            &deadline,
        )?;

        let asset_transfer_args = match adapter {
            Some(adapter) => {
                Some(derive_asset_transfer_args(adapter, take_order_selector(), &call_args).await?)
            }
            None => None,
        };
        self.advance(SwapStage::PayloadEncoded)?;

        Ok(PreparedSwap {
            route,
            cost: solved.cost,
            limits,
            output_amount_bound,
            deadline,
            call_args,
            asset_transfer_args,
        })
    }

    /// Captures balances around the submission and reports. Runs from `PayloadEncoded` to `Reported`.
    pub async fn execute<R, V>(
        &mut self,
        prepared: &PreparedSwap,
        reader: &R,
        submitter: &V,
        funds: &FundManagement,
    ) -> Result<SwapReport, SwapError>
    where
        R: BalanceReader + ?Sized,
        V: VaultSubmitter + ?Sized,
    {
        let result = self.execute_inner(prepared, reader, submitter, funds).await;
        self.guard(result)
    }

    async fn execute_inner<R, V>(
        &mut self,
        prepared: &PreparedSwap,
        reader: &R,
        submitter: &V,
        funds: &FundManagement,
    ) -> Result<SwapReport, SwapError>
    where
        R: BalanceReader + ?Sized,
        V: VaultSubmitter + ?Sized,
    {
        if self.stage != SwapStage::PayloadEncoded {
            return Err(SwapError::internal(format!(
                "Cannot execute swap attempt at {:?}",
                self.stage
            )));
        }

        let route = &prepared.route;
        let account = funds.sender;
        let mut balances = SideBalances::default();
        balances
            .capture_before(reader, account, route.token_in, route.token_out)
            .await?;

        submitter
            .submit(&prepared.call_args, funds, &prepared.deadline)
            .await?;
        self.advance(SwapStage::Submitted)?;

        balances
            .capture_after(reader, account, route.token_in, route.token_out)
            .await?;
        self.advance(SwapStage::Audited)?;

        let summary = report(
            route.direction,
            route,
            &prepared.limits.limits,
            route.token_in,
            route.token_out,
            &route.swap_amount,
            &prepared.cost,
            &balances,
        );
        self.advance(SwapStage::Reported)?;
        Ok(summary)
    }
}

/// Minimum output the payload commits to: the magnitude of the token-out bound.
fn output_amount_bound(route: &Route, limits: &RouteLimits) -> BigUint {
    route
        .position_of(&route.token_out)
        .and_then(|index| limits.limits.values().get(index))
        .map(|value| value.magnitude().clone())
        .unwrap_or_else(BigUint::zero)
}
