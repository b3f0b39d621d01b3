//! Fixed-point helpers for the staking pool
//! Unit conversion between native motes and 18-decimal wad amounts, plus
//! the reward index arithmetic.
use odra::casper_types::{U256, U512};

/// 1e18, the wad scale used for LPEth and the reward index
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Motes (1e9 per CSPR) to wad (1e18 per CSPR)
pub const MOTES_TO_WAD_FACTOR: u128 = 1_000_000_000;

/// Milliseconds per second, block time is reported in milliseconds
pub const MILLIS_PER_SECOND: u64 = 1_000;

/// Arithmetic failures surfaced by [`SafeMath`], [`Units`] and [`RewardMath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Overflow error
    Overflow,
    /// Underflow error
    Underflow,
    /// Division by zero
    DivisionByZero,
}

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_add(b).ok_or(MathError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_sub(b).ok_or(MathError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_mul(b).ok_or(MathError::Overflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, MathError> {
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(a / b)
    }
}

/// Native currency conversions
pub struct Units;

impl Units {
    /// Converts an attached mote amount into wad.
    pub fn motes_to_wad(motes: U512) -> Result<U256, MathError> {
        if motes > U512::from(u128::MAX) {
            return Err(MathError::Overflow);
        }
        SafeMath::mul(U256::from(motes.as_u128()), U256::from(MOTES_TO_WAD_FACTOR))
    }

    /// Converts a wad amount back into motes, truncating sub-mote dust.
    pub fn wad_to_motes(wad: U256) -> Result<U512, MathError> {
        let motes = SafeMath::div(wad, U256::from(MOTES_TO_WAD_FACTOR))?;
        if motes > U256::from(u128::MAX) {
            return Err(MathError::Overflow);
        }
        Ok(U512::from(motes.as_u128()))
    }
}

/// Reward index calculations
///
/// The pool keeps a cumulative index of reward per staked wad, scaled by
/// [`WAD`]. Accounts snapshot the index whenever their balance changes.
pub struct RewardMath;

impl RewardMath {
    /// Growth of the reward index over `elapsed_ms` milliseconds.
    ///
    /// index_delta = elapsed_secs * numerator * 1e18 / (denominator * time_unit)
    ///
    /// Intermediate products saturate at `U256::MAX`, so the result is
    /// clamped instead of failing for extreme ratios or time spans.
    pub fn index_delta(
        elapsed_ms: u64,
        numerator: U256,
        denominator: U256,
        time_unit: u64,
    ) -> Result<U256, MathError> {
        let elapsed_secs = U256::from(elapsed_ms / MILLIS_PER_SECOND);
        if elapsed_secs.is_zero() || numerator.is_zero() {
            return Ok(U256::zero());
        }

        let scaled = elapsed_secs
            .saturating_mul(numerator)
            .saturating_mul(U256::from(WAD));
        let divisor = denominator.saturating_mul(U256::from(time_unit));
        SafeMath::div(scaled, divisor)
    }

    /// Reward earned by `amount` since the account last snapshotted the index,
    /// clamped at `U256::MAX / 1e18`.
    pub fn pending(amount: U256, current_index: U256, account_index: U256) -> Result<U256, MathError> {
        let delta = SafeMath::sub(current_index, account_index)?;
        if delta.is_zero() || amount.is_zero() {
            return Ok(U256::zero());
        }
        SafeMath::div(amount.saturating_mul(delta), U256::from(WAD))
    }
}
