use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{
    parse_address, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_CONTRACT: &str = "Project";
pub const DEFAULT_DESCRIPTION: &str = "Quantum-Resistant Genetic Algorithm Oracle Network";
pub const DEFAULT_MINIMUM_STAKE: &str = "0.01";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";
pub const DEFAULT_CONFIRMATIONS: u64 = 1;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default)]
    pub deploy: DeploySection,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploySection {
    pub contract: Option<String>,
    pub description: Option<String>,
    pub minimum_stake: Option<String>,
    pub artifacts: Option<String>,
    pub deployments: Option<String>,
    pub save_deployments: Option<bool>,
    pub default_network: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub url: String,
    pub chain_id: Option<u64>,
    pub from: Option<String>,
    pub gas_limit: Option<u64>,
    pub confirmations: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub request_timeout_seconds: Option<u64>,
}

impl DeployConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeployError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeployError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DeployError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn contract(&self) -> &str {
        self.deploy.contract.as_deref().unwrap_or(DEFAULT_CONTRACT)
    }

    pub fn description(&self) -> &str {
        self.deploy.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn minimum_stake(&self) -> &str {
        self.deploy
            .minimum_stake
            .as_deref()
            .unwrap_or(DEFAULT_MINIMUM_STAKE)
    }

    pub fn artifacts_dir(&self) -> &str {
        self.deploy.artifacts.as_deref().unwrap_or(DEFAULT_ARTIFACTS_DIR)
    }

    /// `None` when records are switched off.
    pub fn deployments_dir(&self) -> Option<&str> {
        if self.deploy.save_deployments.unwrap_or(true) {
            Some(
                self.deploy
                    .deployments
                    .as_deref()
                    .unwrap_or(DEFAULT_DEPLOYMENTS_DIR),
            )
        } else {
            None
        }
    }
}

impl NetworkConfig {
    pub fn confirmations(&self) -> u64 {
        self.confirmations.unwrap_or(DEFAULT_CONFIRMATIONS)
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS)
    }

    pub fn validate_named(&self, name: &str) -> Result<()> {
        validate_url(&format!("networks.{}.url", name), &self.url)?;
        if let Some(from) = &self.from {
            parse_address(&format!("networks.{}.from", name), from)?;
        }
        if let Some(gas_limit) = self.gas_limit {
            validate_positive_number(&format!("networks.{}.gas_limit", name), gas_limit, 21_000)?;
        }
        validate_positive_number(
            &format!("networks.{}.confirmations", name),
            self.confirmations(),
            1,
        )?;
        validate_positive_number(
            &format!("networks.{}.poll_interval_ms", name),
            self.poll_interval_ms(),
            1,
        )?;
        validate_positive_number(
            &format!("networks.{}.timeout_seconds", name),
            self.timeout_seconds(),
            1,
        )?;
        validate_positive_number(
            &format!("networks.{}.request_timeout_seconds", name),
            self.request_timeout_seconds(),
            1,
        )?;
        Ok(())
    }
}

impl Validate for DeployConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("deploy.contract", self.contract())?;
        validate_path("deploy.artifacts", self.artifacts_dir())?;
        if let Some(dir) = self.deployments_dir() {
            validate_path("deploy.deployments", dir)?;
        }
        if let Some(default) = &self.deploy.default_network {
            if !self.networks.contains_key(default) {
                return Err(DeployError::InvalidConfigValueError {
                    field: "deploy.default_network".to_string(),
                    value: default.clone(),
                    reason: "no [networks] entry with this name".to_string(),
                });
            }
        }
        for (name, network) in &self.networks {
            network.validate_named(name)?;
        }
        Ok(())
    }
}
