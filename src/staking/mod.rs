//! Native CSPR staking pool and its LPEth liquidity token
//!
//! Users stake CSPR into the [`StakingPool`] and receive [`LpEth`] 1:1.
//! The two contracts are linked after deployment, see [`crate::deployer`].

pub mod staking_pool;
pub mod lp_eth;
pub mod errors;
pub mod events;

#[cfg(test)]
mod tests;

pub use staking_pool::{StakeInfo, Staker, StakingPool};
pub use lp_eth::LpEth;
pub use errors::{StakingError, TokenError};
pub use events::*;
