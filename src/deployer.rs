//! Deploy-then-wire bootstrap of the staking pool and LPEth
//!
//! The pool needs the LPEth address and LPEth needs the pool address, so
//! the pair is brought up in three steps:
//! 1. deploy [`StakingPool`] without arguments,
//! 2. deploy [`LpEth`] with the pool address,
//! 3. call `initialize` on the pool with the LPEth address.
//!
//! Any failing step aborts the bootstrap and is returned to the caller.

use odra::host::{Deployer, HostEnv, HostRef, NoArgs};
use odra::{OdraError, OdraResult};

use crate::staking::lp_eth::{LpEth, LpEthHostRef, LpEthInitArgs};
use crate::staking::staking_pool::{StakingPool, StakingPoolHostRef};

/// Gas limit for a contract deployment (300 CSPR)
pub const DEPLOY_GAS: u64 = 300_000_000_000;

/// Gas limit for a contract call (50 CSPR)
pub const CALL_GAS: u64 = 50_000_000_000;

/// Host references to a freshly bootstrapped pair
pub struct Deployment {
    pub staking_pool: StakingPoolHostRef,
    pub lp_eth: LpEthHostRef,
}

/// Provides the two contracts for [`bootstrap`], either by deploying them
/// or by loading earlier deployments.
pub trait ContractSource {
    type Error: From<OdraError>;

    fn staking_pool(&mut self, env: &HostEnv) -> Result<StakingPoolHostRef, Self::Error>;

    fn lp_eth(
        &mut self,
        env: &HostEnv,
        init_args: LpEthInitArgs,
    ) -> Result<LpEthHostRef, Self::Error>;
}

/// Always deploys new contracts
pub struct FreshDeploy;

impl ContractSource for FreshDeploy {
    type Error = OdraError;

    fn staking_pool(&mut self, env: &HostEnv) -> OdraResult<StakingPoolHostRef> {
        env.set_gas(DEPLOY_GAS);
        StakingPool::try_deploy(env, NoArgs)
    }

    fn lp_eth(&mut self, env: &HostEnv, init_args: LpEthInitArgs) -> OdraResult<LpEthHostRef> {
        env.set_gas(DEPLOY_GAS);
        LpEth::try_deploy(env, init_args)
    }
}

/// Deploys and links a new staking pool and LPEth token.
pub fn deploy(env: &HostEnv) -> OdraResult<Deployment> {
    bootstrap(env, &mut FreshDeploy)
}

/// Runs the three bootstrap steps against `source`, printing progress.
pub fn bootstrap<S: ContractSource>(env: &HostEnv, source: &mut S) -> Result<Deployment, S::Error> {
    println!("start deploy stakingPool ...");
    let mut staking_pool = source.staking_pool(env)?;
    println!("stakingPool address is {:?}", staking_pool.address());

    println!("start deploy LPEth ...");
    let lp_eth = source.lp_eth(
        env,
        LpEthInitArgs {
            staking_pool: staking_pool.address(),
        },
    )?;
    println!("LPEth address is {:?}", lp_eth.address());

    // Re-linking the same LPEth is a no-op, so reruns are safe
    println!("init stakingPool ...");
    env.set_gas(CALL_GAS);
    staking_pool.try_initialize(lp_eth.address())?;

    println!("deploy success");
    Ok(Deployment {
        staking_pool,
        lp_eth,
    })
}
