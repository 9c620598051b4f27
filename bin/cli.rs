//! CLI tool for deploying and interacting with the entry fee vault.

use entry_fee_vault::cep4626::EntryFeeVault;
use entry_fee_vault::token::AssetToken;
use odra::casper_types::U256;
use odra::prelude::Addressable;
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Entry fee charged by a freshly deployed vault (1%).
const DEFAULT_ENTRY_FEE_BASIS_POINTS: u32 = 100;

/// Deploys the base asset token.
pub struct AssetTokenDeployScript;

impl DeployScript for AssetTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use entry_fee_vault::token::AssetTokenInitArgs;

        let _token = AssetToken::load_or_deploy(
            &env,
            AssetTokenInitArgs {
                name: String::from("Vault Token"),
                symbol: String::from("VTK"),
                decimals: 18,
                initial_supply: U256::from(1_000_000u64) * U256::exp10(18),
            },
            container,
            300_000_000_000 // Gas limit for token deployment
        )?;

        Ok(())
    }
}

/// Deploys the vault over the asset token.
/// Requires the asset token to be deployed first.
pub struct VaultDeployScript;

impl DeployScript for VaultDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use entry_fee_vault::cep4626::vault::EntryFeeVaultInitArgs;

        let token = container.contract_ref::<AssetToken>(env)?;
        let asset = token.address().clone();

        let _vault = EntryFeeVault::load_or_deploy(
            &env,
            EntryFeeVaultInitArgs {
                asset,
                entry_fee_basis_points: DEFAULT_ENTRY_FEE_BASIS_POINTS,
            },
            container,
            500_000_000_000 // Gas limit for vault deployment
        )?;

        Ok(())
    }
}

/// Deploys the asset token and the vault.
pub struct FullDeployScript;

impl DeployScript for FullDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        AssetTokenDeployScript.deploy(env, container)?;
        VaultDeployScript.deploy(env, container)?;
        Ok(())
    }
}

/// Approves the vault and deposits assets for the caller.
pub struct DepositScenario;

impl Scenario for DepositScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "assets",
                "Gross amount of assets to deposit, fee included",
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
        let mut token = container.contract_ref::<AssetToken>(env)?;
        let mut vault = container.contract_ref::<EntryFeeVault>(env)?;
        let assets = args.get_single::<U256>("assets")?;
        let caller = env.caller();

        env.set_gas(50_000_000_000);
        token.try_approve(vault.address().clone(), assets)?;

        env.set_gas(300_000_000_000);
        let shares = vault.try_deposit(assets, caller)?;

        println!("Deposited {} assets, minted {} shares", assets, shares);
        Ok(())
    }
}

impl ScenarioMetadata for DepositScenario {
    const NAME: &'static str = "deposit";
    const DESCRIPTION: &'static str = "Approves the vault and deposits assets";
}

/// Redeems the caller's whole share balance.
pub struct RedeemAllScenario;

impl Scenario for RedeemAllScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut vault = container.contract_ref::<EntryFeeVault>(env)?;
        let caller = env.caller();
        let shares = vault.max_redeem(caller);

        env.set_gas(300_000_000_000);
        let assets = vault.try_redeem(shares, caller, caller)?;

        println!("Redeemed {} shares for {} assets", shares, assets);
        Ok(())
    }
}

impl ScenarioMetadata for RedeemAllScenario {
    const NAME: &'static str = "redeem-all";
    const DESCRIPTION: &'static str = "Redeems the caller's whole share balance";
}

/// Updates the entry fee rate.
pub struct SetEntryFeeScenario;

impl Scenario for SetEntryFeeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "basis_points",
                "New entry fee in basis points (10000 = 100%)",
                NamedCLType::U32,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut vault = container.contract_ref::<EntryFeeVault>(env)?;
        let basis_points = args.get_single::<u32>("basis_points")?;

        env.set_gas(50_000_000_000);
        vault.try_set_entry_fee_basis_points(basis_points)?;

        println!(
            "Entry fee is {} bps, paid to {:?}",
            vault.get_entry_fee_basis_points(),
            vault.get_entry_fee_recipient()
        );
        Ok(())
    }
}

impl ScenarioMetadata for SetEntryFeeScenario {
    const NAME: &'static str = "set-entry-fee";
    const DESCRIPTION: &'static str = "Updates the vault entry fee";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the entry fee vault")
        // Deploy scripts
        .deploy(AssetTokenDeployScript)
        .deploy(VaultDeployScript)
        .deploy(FullDeployScript)
        // Contract references
        .contract::<AssetToken>()
        .contract::<EntryFeeVault>()
        // Scenarios
        .scenario(DepositScenario)
        .scenario(RedeemAllScenario)
        .scenario(SetEntryFeeScenario)
        .build()
        .run();
}
