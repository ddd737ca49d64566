use alloy_primitives::Address;
use num_bigint::{BigInt, BigUint};
use vault_swap_core::services::audit::{capture_balance, compute_delta};
use vault_swap_core::services::encode::{
    decode_asset_transfer_args, decode_swap_args, derive_asset_transfer_args, encode_swap_args,
    take_order_selector,
};
use vault_swap_core::services::limits::compute_limits;
use vault_swap_core::{AdapterAssets, Route, SwapDirection};

use crate::support::{
    address, amount, two_hop_route, EchoAdapter, LedgerReader, Read, ETH, TRADER, USDC, WETH,
};

#[test]
fn eth_to_usdc_limits_keep_ninety_nine_percent() {
    let mut route = two_hop_route(SwapDirection::ExactIn, "1000000000000000000", "2000000000");
    route.token_addresses = vec![address(ETH), address(USDC)];
    route.hops.truncate(1);

    let limits = compute_limits(SwapDirection::ExactIn, &route).unwrap();

    assert_eq!(
        limits.limits.to_strings(),
        vec!["1000000000000000000", "-1980000000"]
    );
}

#[test]
fn exact_in_limits_follow_floor_rule() {
    for (swap, ret) in [("1", "1"), ("250", "333"), ("7", "100000000000000000001")] {
        let route = two_hop_route(SwapDirection::ExactIn, swap, ret);
        let limits = compute_limits(SwapDirection::ExactIn, &route).unwrap().limits;

        let expected_out = -BigInt::from(amount(ret) * BigUint::from(99u32) / BigUint::from(100u32));
        assert_eq!(limits.len(), route.token_addresses.len());
        assert_eq!(limits.values()[0], BigInt::from(amount(swap)));
        assert_eq!(limits.values()[1], BigInt::from(0));
        assert_eq!(limits.values()[2], expected_out);
    }
}

#[test]
fn intermediate_token_is_unbounded() {
    for direction in [SwapDirection::ExactIn, SwapDirection::ExactOut] {
        let route = two_hop_route(direction, "5000", "9000");
        let limits = compute_limits(direction, &route).unwrap().limits;
        assert_eq!(limits.to_strings()[1], "0");
    }
}

#[test]
fn payload_round_trips_through_vault_layout() {
    let route: Route = two_hop_route(SwapDirection::ExactIn, "1000", "3000");
    let limits = compute_limits(route.direction, &route).unwrap().limits;
    let deadline = BigUint::from(1_800_000_000u64);

    let first = encode_swap_args(
        route.direction,
        &route.hops,
        &route.token_addresses,
        &BigUint::from(2970u32),
        &limits,
        &deadline,
    )
    .unwrap();
    let second = encode_swap_args(
        route.direction,
        &route.hops,
        &route.token_addresses,
        &BigUint::from(2970u32),
        &limits,
        &deadline,
    )
    .unwrap();
    assert_eq!(first, second);

    let decoded = decode_swap_args(&first).unwrap();
    assert_eq!(decoded.hops, route.hops);
    assert_eq!(
        decoded.token_addresses,
        vec![address(ETH), address(WETH), address(USDC)]
    );
    assert_eq!(decoded.limits.to_strings(), vec!["1000", "0", "-2970"]);
}

#[tokio::test]
async fn asset_transfer_args_reproduce_adapter_values() {
    let a = Address::repeat_byte(0x0a);
    let b = Address::repeat_byte(0x0b);
    let assets = AdapterAssets {
        spend_assets_handle_type: 0,
        spend_assets: vec![a],
        spend_asset_amounts: vec![BigUint::from(100u32)],
        expected_incoming_assets: vec![b],
    };
    let adapter = EchoAdapter {
        assets: assets.clone(),
    };

    let encoded = derive_asset_transfer_args(&adapter, take_order_selector(), &[0xff])
        .await
        .unwrap();

    assert_eq!(decode_asset_transfer_args(&encoded).unwrap(), assets);
}

#[tokio::test]
async fn native_sentinel_never_reads_balance_of() {
    let ledger = LedgerReader::default();
    ledger.set(ETH, "17");
    ledger.set(USDC, "23");

    let native = capture_balance(&ledger, address(TRADER), address(ETH))
        .await
        .unwrap();
    let token = capture_balance(&ledger, address(TRADER), address(USDC))
        .await
        .unwrap();

    assert_eq!(native, BigUint::from(17u32));
    assert_eq!(token, BigUint::from(23u32));
    assert_eq!(
        ledger.reads.lock().unwrap().as_slice(),
        &[Read::Native, Read::Token(address(USDC))]
    );
}

#[test]
fn delta_is_after_minus_before() {
    let before = amount("1000000000000000000000000");
    let after = amount("999999999999999999999999");
    assert_eq!(compute_delta(&before, &after), BigInt::from(-1));
}
