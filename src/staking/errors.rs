//! Error definitions for the staking pool and its LPEth token
use odra::prelude::*;

use crate::math::MathError;

/// Custom errors for the StakingPool contract
#[odra::odra_error]
pub enum StakingError {
    /// Caller is not allowed to perform the operation
    Unauthorized = 300,

    /// LPEth has not been linked yet
    NotInitialized = 301,

    /// A different LPEth address is already linked
    AlreadyInitialized = 302,

    /// Zero amount attached
    ZeroAmount = 303,

    /// Attached amount is below the configured minimum stake
    BelowMinimumStake = 304,

    /// Account has no staked balance
    NothingToWithdraw = 305,

    /// Account has no accrued rewards
    NoRewardsToClaim = 306,

    /// Reward ratio denominator is zero
    InvalidRewardRatio = 307,

    /// Time unit is zero
    InvalidTimeUnit = 308,

    /// Contract is paused
    ContractPaused = 309,

    /// Arithmetic overflow
    Overflow = 310,

    /// Arithmetic underflow
    Underflow = 311,

    /// Division by zero
    DivisionByZero = 312,
}

impl From<MathError> for StakingError {
    fn from(error: MathError) -> Self {
        match error {
            MathError::Overflow => StakingError::Overflow,
            MathError::Underflow => StakingError::Underflow,
            MathError::DivisionByZero => StakingError::DivisionByZero,
        }
    }
}

/// Custom errors for the LPEth token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 400,

    /// Insufficient balance for operation
    InsufficientBalance = 401,

    /// Only the linked staking pool may mint or burn
    Unauthorized = 402,

    /// Total supply overflow
    Overflow = 403,
}
