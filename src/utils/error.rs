use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("JSON-RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmountError { value: String, reason: String },

    #[error("Artifact for contract '{name}' not found under {dir}")]
    ArtifactNotFound { name: String, dir: String },

    #[error("Contract name '{name}' is ambiguous, use one of: {}", .candidates.join(", "))]
    AmbiguousArtifact {
        name: String,
        candidates: Vec<String>,
    },

    #[error("Invalid artifact {path}: {reason}")]
    ArtifactError { path: String, reason: String },

    #[error("ABI encoding error: {message}")]
    AbiError { message: String },

    #[error("Connected to chain id {actual}, but network '{network}' expects {expected}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },

    #[error("The node has no accounts to deploy from")]
    NoAccounts,

    #[error("Deployment transaction {tx_hash} failed: {reason}")]
    DeploymentFailed { tx_hash: String, reason: String },

    #[error("Deployment transaction {tx_hash} was not mined within {seconds}s")]
    DeploymentTimeout { tx_hash: String, seconds: u64 },

    #[error("No contract code found at {address}")]
    NoCodeAtAddress { address: String },
}

impl DeployError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            DeployError::HttpError(_) => {
                "Could not reach the network RPC endpoint".to_string()
            }
            DeployError::RpcError { message, .. } => {
                format!("The node rejected the request: {}", message)
            }
            DeployError::ChainIdMismatch { .. }
            | DeployError::ConfigError { .. }
            | DeployError::MissingConfigError { .. }
            | DeployError::InvalidConfigValueError { .. }
            | DeployError::InvalidAmountError { .. } => {
                format!("Configuration problem: {}", self)
            }
            DeployError::ArtifactNotFound { .. }
            | DeployError::AmbiguousArtifact { .. }
            | DeployError::ArtifactError { .. } => {
                format!("Compiled contract problem: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DeployError::HttpError(_) => "Check the network url and that the node is running",
            DeployError::RpcError { .. } => {
                "Check the sender balance and that the node manages the sender account"
            }
            DeployError::ConfigError { .. }
            | DeployError::MissingConfigError { .. }
            | DeployError::InvalidConfigValueError { .. } => {
                "Fix deploy.toml or the command line flags and try again"
            }
            DeployError::InvalidAmountError { .. } => {
                "Use a plain decimal ether amount such as 0.01"
            }
            DeployError::ArtifactNotFound { .. } | DeployError::ArtifactError { .. } => {
                "Compile the contracts first and check the artifacts directory"
            }
            DeployError::AmbiguousArtifact { .. } => {
                "Use the fully qualified name, e.g. contracts/Project.sol:Project"
            }
            DeployError::AbiError { .. } => {
                "Check the constructor arguments against the contract ABI"
            }
            DeployError::ChainIdMismatch { .. } => {
                "Point the network url at the right chain or fix chain_id"
            }
            DeployError::NoAccounts => "Set `from` to an account unlocked on the node",
            DeployError::DeploymentFailed { .. } => {
                "Inspect the transaction on the explorer; the constructor reverted"
            }
            DeployError::DeploymentTimeout { .. } => {
                "Raise timeout_seconds or check the transaction on the explorer"
            }
            DeployError::NoCodeAtAddress { .. } => "Check that the node is fully synced",
            DeployError::IoError(_) | DeployError::SerializationError(_) => {
                "Check file permissions and file contents"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_artifact_lists_candidates() {
        let err = DeployError::AmbiguousArtifact {
            name: "Project".to_string(),
            candidates: vec![
                "contracts/A.sol:Project".to_string(),
                "contracts/B.sol:Project".to_string(),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("contracts/A.sol:Project, contracts/B.sol:Project"));
    }

    #[test]
    fn test_config_errors_are_user_facing() {
        let err = DeployError::MissingConfigError {
            field: "network".to_string(),
        };
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
        assert!(err.recovery_suggestion().contains("deploy.toml"));
    }
}
