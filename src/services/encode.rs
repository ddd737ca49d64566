//! Vault payload encoding.
//!
//! `calldata` produces the batch-swap argument blob; `asset_transfer` turns an
//! adapter's asset classification into the settlement layer's argument blob.

mod asset_transfer;
mod calldata;
pub(crate) mod wire;

pub use asset_transfer::{
    decode_asset_transfer_args, derive_asset_transfer_args, encode_asset_transfer_args,
    AdapterQuery,
};
pub use calldata::{
    decode_swap_args, encode_swap_args, take_order_selector, BatchSwapStep, SwapCallArgs,
    TAKE_ORDER_SIGNATURE,
};
pub(crate) use calldata::encode_function_call;
