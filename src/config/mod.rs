pub mod toml_config;

use crate::core::units::parse_ether;
use crate::domain::model::{ConstructorArg, DeploymentPlan};
use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{parse_address, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use toml_config::{DeployConfig, NetworkConfig};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "project-deploy")]
#[command(about = "Deploy the Project contract and print its verification command")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "deploy.toml")]
    pub config: String,

    /// Network name from [networks] in the config file
    #[arg(short, long)]
    pub network: Option<String>,

    /// JSON-RPC endpoint, overrides the network url
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Contract name or fully qualified name (contracts/Project.sol:Project)
    #[arg(long)]
    pub contract: Option<String>,

    /// Minimum stake in ether passed to the constructor
    #[arg(long)]
    pub minimum_stake: Option<String>,

    /// Sender account, defaults to the node's first account
    #[arg(long)]
    pub from: Option<String>,

    /// Directory holding compiled artifacts
    #[arg(long)]
    pub artifacts: Option<String>,

    /// Do not write a deployment record
    #[arg(long)]
    pub no_save: bool,

    /// Resolve and encode everything without sending a transaction
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rpc_url: String,
    pub request_timeout: Duration,
    pub plan: DeploymentPlan,
}

impl CliConfig {
    /// 載入 TOML（若存在）並套用命令列覆蓋
    pub fn load(&self) -> Result<Settings> {
        let config = if Path::new(&self.config).exists() {
            tracing::debug!("Loading configuration from {}", self.config);
            DeployConfig::from_file(&self.config)?
        } else if self.rpc_url.is_some() {
            tracing::debug!("{} not found, using command line only", self.config);
            DeployConfig::default()
        } else {
            return Err(DeployError::ConfigError {
                message: format!(
                    "config file '{}' not found and no --rpc-url given",
                    self.config
                ),
            });
        };

        self.resolve(config)
    }

    pub fn resolve(&self, mut config: DeployConfig) -> Result<Settings> {
        let network_name = self
            .network
            .clone()
            .or_else(|| config.deploy.default_network.clone())
            .or_else(|| {
                (config.networks.len() == 1)
                    .then(|| config.networks.keys().next().cloned())
                    .flatten()
            })
            .or_else(|| self.rpc_url.as_ref().map(|_| "localhost".to_string()))
            .ok_or_else(|| DeployError::MissingConfigError {
                field: "network".to_string(),
            })?;

        let mut network = match config.networks.remove(&network_name) {
            Some(network) => network,
            None if self.rpc_url.is_some() => NetworkConfig::default(),
            None => {
                return Err(DeployError::InvalidConfigValueError {
                    field: "network".to_string(),
                    value: network_name,
                    reason: "no [networks] entry with this name".to_string(),
                })
            }
        };

        if let Some(url) = &self.rpc_url {
            network.url = url.clone();
        }
        if let Some(from) = &self.from {
            network.from = Some(from.clone());
        }
        if let Some(contract) = &self.contract {
            config.deploy.contract = Some(contract.clone());
        }
        if let Some(stake) = &self.minimum_stake {
            config.deploy.minimum_stake = Some(stake.clone());
        }
        if let Some(artifacts) = &self.artifacts {
            config.deploy.artifacts = Some(artifacts.clone());
        }
        if self.no_save {
            config.deploy.save_deployments = Some(false);
        }
        // only the selected network has to be usable
        config.networks.clear();
        config.deploy.default_network = None;

        config.validate()?;
        network.validate_named(&network_name)?;

        let minimum_stake = parse_ether(config.minimum_stake())?;
        let from = network
            .from
            .as_deref()
            .map(|from| parse_address("from", from))
            .transpose()?;

        let plan = DeploymentPlan {
            network: network_name,
            contract: config.contract().to_string(),
            description: config.description().to_string(),
            constructor_args: vec![ConstructorArg::Uint(minimum_stake)],
            artifacts_dir: config.artifacts_dir().to_string(),
            deployments_dir: config.deployments_dir().map(str::to_string),
            from,
            gas_limit: network.gas_limit,
            expected_chain_id: network.chain_id,
            confirmations: network.confirmations(),
            poll_interval: Duration::from_millis(network.poll_interval_ms()),
            timeout: Duration::from_secs(network.timeout_seconds()),
        };

        Ok(Settings {
            rpc_url: network.url.clone(),
            request_timeout: Duration::from_secs(network.request_timeout_seconds()),
            plan,
        })
    }
}
