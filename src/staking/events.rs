//! Event definitions for the staking pool and its LPEth token
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when LPEth is linked to the staking pool
#[odra::event]
pub struct LpEthLinked {
    /// LPEth contract address
    pub lp_eth: Address,
    /// Linked by (owner address)
    pub linked_by: Address,
}

/// Event emitted when native currency is staked
#[odra::event]
pub struct Staked {
    /// Account that paid
    pub staker: Address,
    /// Account credited with the stake
    pub account: Address,
    /// Amount staked (wad)
    pub amount: U256,
    /// Staked balance after the deposit (wad)
    pub new_balance: U256,
    /// Timestamp of the stake
    pub timestamp: u64,
}

/// Event emitted when a staked balance is withdrawn
#[odra::event]
pub struct Withdrawn {
    /// Account withdrawn from
    pub account: Address,
    /// Amount withdrawn (wad)
    pub amount: U256,
    /// Timestamp of the withdrawal
    pub timestamp: u64,
}

/// Event emitted when rewards are claimed
#[odra::event]
pub struct RewardsClaimed {
    /// Claiming account
    pub account: Address,
    /// LPEth minted as reward (wad)
    pub reward_amount: U256,
    /// Timestamp of the claim
    pub timestamp: u64,
}

#[odra::event]
pub struct RewardRatioUpdated {
    pub old_numerator: U256,
    pub old_denominator: U256,
    pub new_numerator: U256,
    pub new_denominator: U256,
    pub updated_by: Address,
}

#[odra::event]
pub struct TimeUnitUpdated {
    pub old_time_unit: u64,
    pub new_time_unit: u64,
    pub updated_by: Address,
}

#[odra::event]
pub struct MinStakeAmountUpdated {
    pub old_minimum: U256,
    pub new_minimum: U256,
    pub updated_by: Address,
}

/// Event emitted when ownership changes hands
#[odra::event]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

/// Event emitted when the pool is paused
#[odra::event]
pub struct Paused {
    pub paused_by: Address,
    pub timestamp: u64,
}

/// Event emitted when the pool is unpaused
#[odra::event]
pub struct Unpaused {
    pub unpaused_by: Address,
    pub timestamp: u64,
}

/// Event emitted when LPEth is transferred, minted or burned
#[odra::event]
pub struct Transfer {
    /// From address
    pub from: Address,
    /// To address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when approval is granted
#[odra::event]
pub struct Approval {
    /// Owner address
    pub owner: Address,
    /// Spender address
    pub spender: Address,
    /// Amount approved
    pub value: U256,
}
