//! Identity Wallet CLI
//!
//! Runs account and profile flows and prints the actions they dispatch

use clap::Parser;
use identity_wallet::cli::args::{AccountCommand, Cli, Commands, ConfigAction, ProfilesCommand};
use identity_wallet::cli::commands;
use identity_wallet::config::{load_config, ConfigOverrides, DeploymentMode, NetworkType};
use std::path::Path;
use std::process;

fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let network = cli.network.as_ref().map(|n| match n.parse::<NetworkType>() {
        Ok(network) => network,
        Err(_) => {
            eprintln!(
                "Error: Invalid network '{}'. Use: regtest, signet, testnet, or mainnet",
                n
            );
            process::exit(1);
        }
    });

    let deployment = cli
        .deployment
        .as_ref()
        .map(|d| match d.parse::<DeploymentMode>() {
            Ok(deployment) => deployment,
            Err(_) => {
                eprintln!("Error: Invalid deployment '{}'. Use: full or webapp", d);
                process::exit(1);
            }
        });

    // Build config overrides from global arguments
    let overrides = ConfigOverrides {
        network,
        esplora_url: cli.esplora_url.clone(),
        registry_url: cli.registry_url.clone(),
        insight_url: cli.insight_url.clone(),
        core_api_url: cli.core_api_url.clone(),
        core_api_password: cli.core_api_password.clone(),
        deployment,
    };
    let config_path = cli.config.as_deref().map(Path::new);

    if let Commands::Config { action } = &cli.command {
        let result = match action {
            ConfigAction::Init { network } => commands::config::init(network.clone(), config_path),
        };
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    let config = match load_config(config_path, overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to create async runtime: {}", e);
            process::exit(1);
        }
    };

    let result: Result<(), Box<dyn std::error::Error>> = rt.block_on(async {
        match cli.command {
            Commands::Config { .. } => Ok(()),

            Commands::Account { action } => match action {
                AccountCommand::Create {
                    password,
                    backup_phrase,
                    identities,
                } => commands::account::create(
                    &config,
                    &password,
                    backup_phrase.as_deref(),
                    identities,
                )
                .await
                .map_err(Into::into),

                AccountCommand::Balances { addresses } => {
                    commands::account::balances(&config, &addresses)
                        .await
                        .map_err(Into::into)
                }

                AccountCommand::CoreBalance => commands::account::core_balance(&config)
                    .await
                    .map_err(Into::into),

                AccountCommand::CoreAddress => commands::account::core_address(&config)
                    .await
                    .map_err(Into::into),

                AccountCommand::Withdraw {
                    payment_key,
                    to,
                    amount,
                    fee_rate,
                } => commands::account::withdraw(&config, &payment_key, &to, amount, fee_rate)
                    .await
                    .map_err(Into::into),

                AccountCommand::WithdrawCore {
                    to,
                    amount,
                    payment_key,
                } => commands::account::withdraw_core(&config, &to, amount, payment_key.as_deref())
                    .await
                    .map_err(Into::into),

                AccountCommand::Email { email, opt_in } => {
                    commands::account::email(&config, &email, opt_in)
                        .await
                        .map_err(Into::into)
                }
            },

            Commands::Profiles { action } => match action {
                ProfilesCommand::CheckName { name } => {
                    commands::profiles::check_name(&config, &name)
                        .await
                        .map_err(Into::into)
                }

                ProfilesCommand::Search { query } => commands::profiles::search(&config, &query)
                    .await
                    .map_err(Into::into),
            },
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
