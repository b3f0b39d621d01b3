//! CLI tool for deploying and interacting with the staking pool contracts.

use lpeth_staking::deployer::{self, ContractSource, CALL_GAS, DEPLOY_GAS};
use lpeth_staking::staking::lp_eth::{LpEth, LpEthHostRef, LpEthInitArgs};
use lpeth_staking::staking::staking_pool::{StakingPool, StakingPoolHostRef};
use odra::casper_types::{U256, U512};
use odra::host::{HostEnv, NoArgs};
use odra::prelude::Address;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Loads contracts recorded in the container, deploying the missing ones.
struct ContainerSource<'a> {
    container: &'a mut DeployedContractsContainer,
}

impl ContractSource for ContainerSource<'_> {
    type Error = odra_cli::deploy::Error;

    fn staking_pool(&mut self, env: &HostEnv) -> Result<StakingPoolHostRef, Self::Error> {
        let staking_pool = StakingPool::load_or_deploy(env, NoArgs, self.container, DEPLOY_GAS)?;
        Ok(staking_pool)
    }

    fn lp_eth(
        &mut self,
        env: &HostEnv,
        init_args: LpEthInitArgs,
    ) -> Result<LpEthHostRef, Self::Error> {
        let lp_eth = LpEth::load_or_deploy(env, init_args, self.container, DEPLOY_GAS)?;
        Ok(lp_eth)
    }
}

/// Deploys the StakingPool, then LPEth bound to it, then links LPEth back
/// into the pool.
pub struct StakingPoolDeployScript;

impl DeployScript for StakingPoolDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        deployer::bootstrap(env, &mut ContainerSource { container })?;
        Ok(())
    }
}

fn account_arg() -> CommandArg {
    CommandArg::new(
        "account",
        "Address of the staking account",
        NamedCLType::Key,
    )
}

/// Scenario to stake CSPR on behalf of an account.
pub struct StakeScenario;

impl Scenario for StakeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            account_arg(),
            CommandArg::new(
                "amount",
                "Amount of motes to stake",
                NamedCLType::U512,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let staking_pool = container.contract_ref::<StakingPool>(env)?;
        let account = args.get_single::<Address>("account")?;
        let amount = args.get_single::<U512>("amount")?;

        env.set_gas(CALL_GAS);
        staking_pool.with_tokens(amount).try_stake(account)?;

        println!("Staked! balance: {}", staking_pool.staked_balance(account));
        Ok(())
    }
}

impl ScenarioMetadata for StakeScenario {
    const NAME: &'static str = "stake";
    const DESCRIPTION: &'static str = "Stakes CSPR on behalf of an account and mints LPEth to it";
}

/// Scenario to withdraw the full staked balance; the account must be the caller.
pub struct WithdrawScenario;

impl Scenario for WithdrawScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![account_arg()]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut staking_pool = container.contract_ref::<StakingPool>(env)?;
        let account = args.get_single::<Address>("account")?;

        env.set_gas(CALL_GAS);
        staking_pool.try_withdraw(account)?;

        println!("Withdrawn! balance: {}", staking_pool.staked_balance(account));
        Ok(())
    }
}

impl ScenarioMetadata for WithdrawScenario {
    const NAME: &'static str = "withdraw";
    const DESCRIPTION: &'static str = "Withdraws the full staked balance and burns the matching LPEth";
}

/// Scenario to print the stake info of an account.
pub struct StakeInfoScenario;

impl Scenario for StakeInfoScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![account_arg()]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let staking_pool = container.contract_ref::<StakingPool>(env)?;
        let account = args.get_single::<Address>("account")?;

        let info = staking_pool.try_get_stake_info(account)?;
        println!("{:?}", info);
        Ok(())
    }
}

impl ScenarioMetadata for StakeInfoScenario {
    const NAME: &'static str = "stake-info";
    const DESCRIPTION: &'static str = "Prints staked amount, unclaimed rewards and last update of an account";
}

/// Scenario to set reward ratio, time unit and minimum stake in one go.
pub struct ConfigureScenario;

impl Scenario for ConfigureScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "reward_numerator",
                "Reward ratio numerator",
                NamedCLType::U256,
            ),
            CommandArg::new(
                "reward_denominator",
                "Reward ratio denominator",
                NamedCLType::U256,
            ),
            CommandArg::new(
                "time_unit",
                "Reward time unit in seconds",
                NamedCLType::U64,
            ),
            CommandArg::new(
                "min_stake_amount",
                "Minimum stake in wad (1e18 per CSPR)",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut staking_pool = container.contract_ref::<StakingPool>(env)?;
        let numerator = args.get_single::<U256>("reward_numerator")?;
        let denominator = args.get_single::<U256>("reward_denominator")?;
        let time_unit = args.get_single::<u64>("time_unit")?;
        let min_stake_amount = args.get_single::<U256>("min_stake_amount")?;

        env.set_gas(CALL_GAS);
        staking_pool.try_set_reward_ratio(numerator, denominator)?;
        env.set_gas(CALL_GAS);
        staking_pool.try_set_time_unit(time_unit)?;
        env.set_gas(CALL_GAS);
        staking_pool.try_set_min_stake_amount(min_stake_amount)?;

        println!("Staking pool configured!");
        Ok(())
    }
}

impl ScenarioMetadata for ConfigureScenario {
    const NAME: &'static str = "configure";
    const DESCRIPTION: &'static str = "Sets reward ratio, time unit and minimum stake amount";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the LPEth staking pool contracts")
        // Deploy scripts
        .deploy(StakingPoolDeployScript)
        // Contract references
        .contract::<StakingPool>()
        .contract::<LpEth>()
        // Scenarios
        .scenario(StakeScenario)
        .scenario(WithdrawScenario)
        .scenario(StakeInfoScenario)
        .scenario(ConfigureScenario)
        .build()
        .run();
}
