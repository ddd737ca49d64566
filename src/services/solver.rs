use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::Zero;
use reqwest::Client;
use tracing::{info, warn};

use crate::models::messages::{PoolSelection, SolverQuery, SolverRouteResponse};
use crate::models::route::{Hop, Route, SwapDirection};
use crate::services::encode::wire::{
    format_address, parse_address, parse_amount, parse_hex_bytes, parse_pool_id,
};
use crate::services::error::SwapError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
    pub token_in: Address,
    pub token_out: Address,
    pub direction: SwapDirection,
    pub amount: BigUint,
    pub query_on_chain: bool,
    pub pool_selection: PoolSelection,
}

/// A route plus the solver's execution cost estimate in output-token units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedRoute {
    pub route: Route,
    pub cost: BigUint,
}

/// External path solver. Route discovery happens entirely on the other side.
#[async_trait]
pub trait Solver: Send + Sync {
    async fn solve(&self, request: &SolveRequest) -> Result<SolvedRoute, SwapError>;
}

/// A zero return amount means no viable route; nothing should be encoded for it.
pub fn ensure_viable_route(route: &Route) -> Result<(), SwapError> {
    if route.return_amount.is_zero() {
        return Err(SwapError::solver(format!(
            "No viable route from {} to {}",
            format_address(&route.token_in),
            format_address(&route.token_out)
        )));
    }
    Ok(())
}

/// Solves and rejects routes without a positive return amount.
pub async fn solve_viable<S>(solver: &S, request: &SolveRequest) -> Result<SolvedRoute, SwapError>
where
    S: Solver + ?Sized,
{
    let solved = solver.solve(request).await?;
    ensure_viable_route(&solved.route)?;
    info!(
        direction = %request.direction,
        hops = solved.route.hops.len(),
        tokens = solved.route.token_addresses.len(),
        swap_amount = %solved.route.swap_amount,
        return_amount = %solved.route.return_amount,
        cost = %solved.cost,
        "Solver returned route"
    );
    Ok(solved)
}

pub fn query_from_request(request: &SolveRequest) -> SolverQuery {
    SolverQuery {
        token_in: format_address(&request.token_in),
        token_out: format_address(&request.token_out),
        swap_type: request.direction,
        amount: request.amount.to_str_radix(10),
        query_on_chain: request.query_on_chain,
        pool_selection: request.pool_selection.clone(),
    }
}

/// Converts the solver's JSON answer into a typed route.
pub fn route_from_response(
    direction: SwapDirection,
    response: &SolverRouteResponse,
) -> Result<SolvedRoute, SwapError> {
    let token_addresses = response
        .token_addresses
        .iter()
        .map(|value| parse_address(value))
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed_route)?;

    let hops = response
        .swaps
        .iter()
        .map(|hop| -> Result<Hop, SwapError> {
            Ok(Hop {
                pool_id: parse_pool_id(&hop.pool_id)?,
                asset_in_index: index_from_wire(hop.asset_in_index)?,
                asset_out_index: index_from_wire(hop.asset_out_index)?,
                amount: parse_amount(&hop.amount)?,
                user_data: parse_hex_bytes(&hop.user_data)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed_route)?;

    let route = Route {
        direction,
        hops,
        token_addresses,
        token_in: parse_address(&response.token_in).map_err(malformed_route)?,
        token_out: parse_address(&response.token_out).map_err(malformed_route)?,
        swap_amount: parse_amount(&response.swap_amount).map_err(malformed_route)?,
        return_amount: parse_amount(&response.return_amount).map_err(malformed_route)?,
    };
    let cost = match response.cost.as_deref() {
        Some(value) => parse_amount(value).map_err(malformed_route)?,
        None => BigUint::zero(),
    };

    Ok(SolvedRoute { route, cost })
}

fn malformed_route(err: SwapError) -> SwapError {
    SwapError::solver(format!("Malformed solver route: {}", err.message()))
}

fn index_from_wire(value: u64) -> Result<usize, SwapError> {
    usize::try_from(value)
        .map_err(|_| SwapError::invalid_route(format!("Asset index {} does not fit usize", value)))
}

/// Solver reached over HTTP: the query is POSTed as JSON and the route comes back as JSON.
pub struct HttpSolver {
    client: Client,
    url: String,
}

impl HttpSolver {
    pub fn new(url: String, timeout: Duration) -> Result<Self, SwapError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SwapError::internal(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl Solver for HttpSolver {
    async fn solve(&self, request: &SolveRequest) -> Result<SolvedRoute, SwapError> {
        let query = query_from_request(request);
        let response = self
            .client
            .post(&self.url)
            .json(&query)
            .send()
            .await
            .map_err(|err| SwapError::solver(format!("Solver request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %self.url, "Solver returned error status");
            return Err(SwapError::solver(format!(
                "Solver returned status {}",
                status
            )));
        }

        let body: SolverRouteResponse = response
            .json()
            .await
            .map_err(|err| SwapError::solver(format!("Solver response decode failed: {err}")))?;
        route_from_response(request.direction, &body)
    }
}
