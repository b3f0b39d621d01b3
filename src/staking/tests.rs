//! Tests for the staking pool and LPEth

#[cfg(test)]
mod tests {
    use odra::host::{Deployer, HostEnv, HostRef, NoArgs};
    use odra::casper_types::{U256, U512};
    use crate::deployer::{self, Deployment};
    use crate::math::WAD;
    use crate::staking::staking_pool::{StakingPool, MAX_REWARD_RATIO};
    use crate::staking::{StakingError, TokenError};

    const MOTES_PER_CSPR: u64 = 1_000_000_000;

    fn cspr(amount: u64) -> U512 {
        U512::from(amount) * U512::from(MOTES_PER_CSPR)
    }

    fn wad(amount: u64) -> U256 {
        U256::from(amount) * U256::from(WAD)
    }

    fn setup() -> (HostEnv, Deployment) {
        let env = odra_test::env();
        let deployment = deployer::deploy(&env).unwrap();
        (env, deployment)
    }

    #[test]
    fn test_bootstrap_links_both_contracts() {
        let (env, Deployment { staking_pool, lp_eth }) = setup();

        assert_eq!(staking_pool.get_lp_eth(), Some(lp_eth.address()));
        assert_eq!(lp_eth.get_staking_pool(), staking_pool.address());
        assert_eq!(staking_pool.get_owner(), env.get_account(0));
        assert_eq!(staking_pool.get_reward_ratio(), (U256::from(1), U256::from(100)));
        assert_eq!(staking_pool.get_time_unit(), 3_600);
        assert_eq!(staking_pool.get_min_stake_amount(), U256::zero());
        assert!(!staking_pool.is_paused());
    }

    #[test]
    fn test_initialize_is_idempotent_for_same_token() {
        let (_, Deployment { mut staking_pool, lp_eth }) = setup();

        staking_pool.initialize(lp_eth.address());
        assert_eq!(staking_pool.get_lp_eth(), Some(lp_eth.address()));
    }

    #[test]
    fn test_initialize_with_other_token_reverts() {
        let (env, Deployment { mut staking_pool, .. }) = setup();

        assert_eq!(
            staking_pool.try_initialize(env.get_account(5)),
            Err(StakingError::AlreadyInitialized.into())
        );
    }

    #[test]
    fn test_stake_before_initialize_reverts() {
        let env = odra_test::env();
        let staking_pool = StakingPool::deploy(&env, NoArgs);
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            staking_pool.with_tokens(cspr(1)).try_stake(user),
            Err(StakingError::NotInitialized.into())
        );
    }

    #[test]
    fn test_stake_mints_lp_eth() {
        let (env, Deployment { staking_pool, lp_eth }) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(3)).stake(user);

        assert_eq!(staking_pool.staked_balance(user), wad(3));
        assert_eq!(staking_pool.total_staked(), wad(3));
        assert_eq!(lp_eth.balance_of(user), wad(3));
        assert_eq!(lp_eth.total_supply(), wad(3));
        assert_eq!(env.balance_of(&staking_pool.address()), cspr(3));
    }

    #[test]
    fn test_stake_on_behalf_of_other_account() {
        let (env, Deployment { staking_pool, lp_eth }) = setup();
        let payer = env.get_account(1);
        let beneficiary = env.get_account(2);

        env.set_caller(payer);
        staking_pool.with_tokens(cspr(2)).stake(beneficiary);

        assert_eq!(staking_pool.staked_balance(beneficiary), wad(2));
        assert_eq!(staking_pool.staked_balance(payer), U256::zero());
        assert_eq!(lp_eth.balance_of(beneficiary), wad(2));
    }

    #[test]
    fn test_stake_zero_reverts() {
        let (env, Deployment { staking_pool, .. }) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            staking_pool.with_tokens(U512::zero()).try_stake(user),
            Err(StakingError::ZeroAmount.into())
        );
    }

    #[test]
    fn test_minimum_stake_enforcement() {
        let (env, Deployment { mut staking_pool, .. }) = setup();
        let user = env.get_account(1);

        staking_pool.set_min_stake_amount(wad(5));

        env.set_caller(user);
        assert_eq!(
            staking_pool.with_tokens(cspr(4)).try_stake(user),
            Err(StakingError::BelowMinimumStake.into())
        );

        staking_pool.with_tokens(cspr(5)).stake(user);
        assert_eq!(staking_pool.staked_balance(user), wad(5));
    }

    #[test]
    fn test_withdraw_returns_cspr_and_burns_lp_eth() {
        let (env, Deployment { mut staking_pool, lp_eth }) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(2)).stake(user);
        staking_pool.with_tokens(cspr(1)).stake(user);
        staking_pool.withdraw(user);

        assert_eq!(staking_pool.staked_balance(user), U256::zero());
        assert_eq!(staking_pool.total_staked(), U256::zero());
        assert_eq!(lp_eth.balance_of(user), U256::zero());
        assert_eq!(lp_eth.total_supply(), U256::zero());
        assert_eq!(env.balance_of(&staking_pool.address()), U512::zero());
    }

    #[test]
    fn test_withdraw_for_other_account_reverts() {
        let (env, Deployment { mut staking_pool, .. }) = setup();
        let user = env.get_account(1);
        let other = env.get_account(2);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(1)).stake(user);

        env.set_caller(other);
        assert_eq!(
            staking_pool.try_withdraw(user),
            Err(StakingError::Unauthorized.into())
        );
    }

    #[test]
    fn test_withdraw_without_stake_reverts() {
        let (env, Deployment { mut staking_pool, .. }) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            staking_pool.try_withdraw(user),
            Err(StakingError::NothingToWithdraw.into())
        );
    }

    #[test]
    fn test_withdraw_after_transferring_lp_eth_reverts() {
        let (env, Deployment { mut staking_pool, mut lp_eth }) = setup();
        let user = env.get_account(1);
        let other = env.get_account(2);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(2)).stake(user);
        lp_eth.transfer(other, wad(1));

        assert_eq!(
            staking_pool.try_withdraw(user),
            Err(TokenError::InsufficientBalance.into())
        );
        assert_eq!(staking_pool.staked_balance(user), wad(2));
    }

    #[test]
    fn test_rewards_accrue_per_time_unit() {
        let (env, Deployment { mut staking_pool, .. }) = setup();
        let user = env.get_account(1);

        staking_pool.set_reward_ratio(U256::from(1), U256::from(20));
        staking_pool.set_time_unit(60);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(10)).stake(user);
        env.advance_block_time(60_000);

        let info = staking_pool.get_stake_info(user);
        assert_eq!(info.amount_staked, wad(10));
        assert_eq!(info.unclaimed_rewards, wad(10) / U256::from(20));
    }

    #[test]
    fn test_ratio_change_applies_from_now_on() {
        let (env, Deployment { mut staking_pool, .. }) = setup();
        let owner = env.get_account(0);
        let user = env.get_account(1);

        staking_pool.set_reward_ratio(U256::from(1), U256::from(20));
        staking_pool.set_time_unit(60);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(10)).stake(user);
        env.advance_block_time(60_000);

        env.set_caller(owner);
        staking_pool.set_reward_ratio(U256::from(1), U256::from(10));
        env.advance_block_time(60_000);

        // 10 * 1/20 + 10 * 1/10
        let info = staking_pool.get_stake_info(user);
        assert_eq!(info.unclaimed_rewards, wad(3) / U256::from(2));
    }

    #[test]
    fn test_partial_seconds_carry_over_ratio_change() {
        let (env, Deployment { mut staking_pool, .. }) = setup();
        let owner = env.get_account(0);
        let user = env.get_account(1);

        staking_pool.set_reward_ratio(U256::from(1), U256::from(20));
        staking_pool.set_time_unit(60);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(10)).stake(user);
        env.advance_block_time(1_500);

        // Settles one second at 1/20, the remaining 500 ms count under 1/10
        env.set_caller(owner);
        staking_pool.set_reward_ratio(U256::from(1), U256::from(10));
        env.advance_block_time(500);

        let index = U256::from(WAD / (20 * 60)) + U256::from(WAD / (10 * 60));
        let expected = wad(10) * index / U256::from(WAD);
        assert_eq!(staking_pool.get_stake_info(user).unclaimed_rewards, expected);

        // Still two whole seconds at 2.4 s
        env.advance_block_time(400);
        assert_eq!(staking_pool.get_stake_info(user).unclaimed_rewards, expected);

        env.set_caller(user);
        staking_pool.claim_rewards();
        assert_eq!(staking_pool.get_stake_info(user).unclaimed_rewards, U256::zero());
    }

    #[test]
    fn test_claim_rewards_mints_lp_eth() {
        let (env, Deployment { mut staking_pool, lp_eth }) = setup();
        let user = env.get_account(1);

        staking_pool.set_reward_ratio(U256::from(1), U256::from(20));
        staking_pool.set_time_unit(60);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(10)).stake(user);
        env.advance_block_time(60_000);
        staking_pool.claim_rewards();

        let reward = wad(10) / U256::from(20);
        assert_eq!(lp_eth.balance_of(user), wad(10) + reward);
        assert_eq!(staking_pool.get_stake_info(user).unclaimed_rewards, U256::zero());
        assert_eq!(
            staking_pool.try_claim_rewards(),
            Err(StakingError::NoRewardsToClaim.into())
        );
    }

    #[test]
    fn test_rewards_survive_withdraw() {
        let (env, Deployment { mut staking_pool, lp_eth }) = setup();
        let user = env.get_account(1);

        staking_pool.set_reward_ratio(U256::from(1), U256::from(20));
        staking_pool.set_time_unit(60);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(10)).stake(user);
        env.advance_block_time(60_000);
        staking_pool.withdraw(user);
        env.advance_block_time(60_000);

        let reward = wad(10) / U256::from(20);
        let info = staking_pool.get_stake_info(user);
        assert_eq!(info.amount_staked, U256::zero());
        assert_eq!(info.unclaimed_rewards, reward);

        staking_pool.claim_rewards();
        assert_eq!(lp_eth.balance_of(user), reward);
    }

    #[test]
    fn test_configuration_by_non_owner_reverts() {
        let (env, Deployment { mut staking_pool, lp_eth }) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            staking_pool.try_initialize(lp_eth.address()),
            Err(StakingError::Unauthorized.into())
        );
        assert_eq!(
            staking_pool.try_set_reward_ratio(U256::from(1), U256::from(1)),
            Err(StakingError::Unauthorized.into())
        );
        assert_eq!(
            staking_pool.try_set_time_unit(60),
            Err(StakingError::Unauthorized.into())
        );
        assert_eq!(
            staking_pool.try_set_min_stake_amount(U256::one()),
            Err(StakingError::Unauthorized.into())
        );
        assert_eq!(staking_pool.try_pause(), Err(StakingError::Unauthorized.into()));
    }

    #[test]
    fn test_invalid_configuration_reverts() {
        let (_, Deployment { mut staking_pool, .. }) = setup();

        assert_eq!(
            staking_pool.try_set_reward_ratio(U256::from(1), U256::zero()),
            Err(StakingError::InvalidRewardRatio.into())
        );
        assert_eq!(
            staking_pool.try_set_time_unit(0),
            Err(StakingError::InvalidTimeUnit.into())
        );
    }

    #[test]
    fn test_withdraw_after_long_accrual_at_max_ratio() {
        let (env, Deployment { mut staking_pool, lp_eth }) = setup();
        let owner = env.get_account(0);
        let user = env.get_account(1);

        let extreme = U256::from(10).pow(U256::from(60));
        assert_eq!(
            staking_pool.try_set_reward_ratio(extreme, U256::one()),
            Err(StakingError::InvalidRewardRatio.into())
        );
        let max = U256::from(MAX_REWARD_RATIO);
        assert_eq!(
            staking_pool.try_set_reward_ratio(max + U256::one(), U256::one()),
            Err(StakingError::InvalidRewardRatio.into())
        );
        staking_pool.set_reward_ratio(max, U256::one());
        staking_pool.set_time_unit(1);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(10)).stake(user);

        // A century
        let elapsed_secs: u64 = 100 * 365 * 24 * 3_600;
        env.advance_block_time(elapsed_secs * 1_000);

        let info = staking_pool.get_stake_info(user);
        assert_eq!(info.unclaimed_rewards, wad(10) * max * U256::from(elapsed_secs));
        let info = staking_pool.get_stake_info(env.get_account(3));
        assert_eq!(info.amount_staked, U256::zero());
        assert_eq!(info.unclaimed_rewards, U256::zero());

        staking_pool.withdraw(user);
        assert_eq!(staking_pool.staked_balance(user), U256::zero());
        assert_eq!(lp_eth.balance_of(user), U256::zero());
        assert_eq!(env.balance_of(&staking_pool.address()), U512::zero());

        env.set_caller(owner);
        staking_pool.set_reward_ratio(U256::from(1), U256::from(100));
        assert_eq!(staking_pool.get_reward_ratio(), (U256::from(1), U256::from(100)));
    }

    #[test]
    fn test_pause_blocks_stake_but_not_withdraw() {
        let (env, Deployment { mut staking_pool, .. }) = setup();
        let owner = env.get_account(0);
        let user = env.get_account(1);

        env.set_caller(user);
        staking_pool.with_tokens(cspr(1)).stake(user);

        env.set_caller(owner);
        staking_pool.pause();
        assert!(staking_pool.is_paused());

        env.set_caller(user);
        assert_eq!(
            staking_pool.with_tokens(cspr(1)).try_stake(user),
            Err(StakingError::ContractPaused.into())
        );
        staking_pool.withdraw(user);
        assert_eq!(staking_pool.staked_balance(user), U256::zero());

        env.set_caller(owner);
        staking_pool.unpause();
        assert!(!staking_pool.is_paused());
    }

    #[test]
    fn test_transfer_ownership() {
        let (env, Deployment { mut staking_pool, .. }) = setup();
        let old_owner = env.get_account(0);
        let new_owner = env.get_account(1);

        staking_pool.transfer_ownership(new_owner);
        assert_eq!(staking_pool.get_owner(), new_owner);

        env.set_caller(new_owner);
        staking_pool.set_time_unit(120);
        assert_eq!(staking_pool.get_time_unit(), 120);

        env.set_caller(old_owner);
        assert_eq!(
            staking_pool.try_set_time_unit(60),
            Err(StakingError::Unauthorized.into())
        );
    }
}
