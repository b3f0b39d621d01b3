//! Wasm build entry for the StakingPool and LPEth contracts
//!
//! `cargo odra build` compiles this binary for wasm32 once per contract in
//! Odra.toml; the entry points come from the modules linked below.

#![cfg_attr(target_arch = "wasm32", no_std)]
#![cfg_attr(target_arch = "wasm32", no_main)]

#[cfg(target_arch = "wasm32")]
#[allow(unused_imports)]
use lpeth_staking::staking::{LpEth, StakingPool};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    panic!("lpeth_staking_build_contract is intended to be built for wasm32-unknown-unknown only");
}
