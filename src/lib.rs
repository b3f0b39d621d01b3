#![cfg_attr(target_arch = "wasm32", no_std)]
extern crate alloc;

// Staking pool and LPEth token
pub mod staking;

// Reward and unit arithmetic
pub mod math;

// Host-side deploy-then-wire bootstrap
#[cfg(not(target_arch = "wasm32"))]
pub mod deployer;
