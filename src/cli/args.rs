//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "identity-wallet",
    version,
    about = "Identity wallet actions - account bootstrap, balances, withdrawals and name lookups",
    long_about = None
)]
pub struct Cli {
    /// Network to use: regtest, signet, testnet, mainnet (overrides config)
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// Esplora server URL used for client-side spends (overrides config)
    #[arg(long, global = true)]
    pub esplora_url: Option<String>,

    /// Naming registry base URL (overrides config)
    #[arg(long, global = true)]
    pub registry_url: Option<String>,

    /// Core API base URL (overrides config)
    #[arg(long, global = true)]
    pub core_api_url: Option<String>,

    /// Core API password (overrides config)
    #[arg(long, global = true)]
    pub core_api_password: Option<String>,

    /// Insight address URL template (overrides config)
    #[arg(long, global = true)]
    pub insight_url: Option<String>,

    /// Deployment mode: full or webapp (overrides config)
    #[arg(long, global = true)]
    pub deployment: Option<String>,

    /// Custom config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize or manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Account actions
    Account {
        #[command(subcommand)]
        action: AccountCommand,
    },

    /// Profile name lookups and search
    Profiles {
        #[command(subcommand)]
        action: ProfilesCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize configuration file with defaults
    Init {
        /// Network to initialize for (defaults to mainnet)
        #[arg(short, long)]
        network: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Create an account from a backup phrase, or a new one
    Create {
        /// Password to encrypt the backup phrase
        #[arg(short, long)]
        password: String,

        /// 12-word BIP39 backup phrase (a new one is generated if missing or invalid)
        #[arg(short, long)]
        backup_phrase: Option<String>,

        /// Number of identity keypairs to derive
        #[arg(short, long, default_value = "1")]
        identities: u32,
    },

    /// Refresh balances of one or more addresses
    Balances {
        /// Addresses to query
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Refresh the core wallet balance
    CoreBalance,

    /// Fetch the core wallet payment address
    CoreAddress,

    /// Spend from a payment key and broadcast the transaction
    Withdraw {
        /// Hex private key to spend from
        #[arg(short, long)]
        payment_key: String,

        /// Destination address
        #[arg(short, long)]
        to: String,

        /// Amount in BTC (sweeps everything if omitted)
        #[arg(short, long)]
        amount: Option<f64>,

        /// Fee rate in sat/vB (optional)
        #[arg(long)]
        fee_rate: Option<f64>,
    },

    /// Withdraw through the core wallet
    WithdrawCore {
        /// Destination address
        #[arg(short, long)]
        to: String,

        /// Amount in BTC (sweeps everything if omitted)
        #[arg(short, long)]
        amount: Option<f64>,

        /// Hex payment key to spend from instead of the core wallet key
        #[arg(short, long)]
        payment_key: Option<String>,
    },

    /// Register an email address for notifications
    Email {
        /// Email address
        email: String,

        /// Also join the mailing list
        #[arg(long)]
        opt_in: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfilesCommand {
    /// Check whether a name is available and what it costs
    CheckName {
        /// Fully qualified name, e.g. satoshi.id
        name: String,
    },

    /// Search profiles
    Search {
        /// Search query, or a fully qualified name
        query: String,
    },
}
