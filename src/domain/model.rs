use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A constructor argument for a contract creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructorArg {
    Uint(U256),
    Address(Address),
    Bool(bool),
    FixedBytes(B256),
    Text(String),
}

/// Transaction sent to a node with `eth_estimateGas` / `eth_sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<U64>,
    pub contract_address: Option<Address>,
    pub status: Option<U64>,
    pub gas_used: Option<U64>,
}

impl TransactionReceipt {
    /// Pre-Byzantium receipts carry no status and count as successful.
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s != U64::ZERO).unwrap_or(true)
    }
}

/// Everything needed to deploy one contract to one network.
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub network: String,
    pub contract: String,
    pub description: String,
    pub constructor_args: Vec<ConstructorArg>,
    pub artifacts_dir: String,
    pub deployments_dir: Option<String>,
    pub from: Option<Address>,
    pub gas_limit: Option<u64>,
    pub expected_chain_id: Option<u64>,
    pub confirmations: u64,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

/// Result of a mined, verified contract creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub network: String,
    pub contract: String,
    pub address: Address,
    pub transaction_hash: B256,
    pub block_number: u64,
    pub gas_used: Option<u64>,
    pub chain_id: u64,
    pub deployer: Address,
    pub constructor_args: Vec<ConstructorArg>,
}

/// What is written to `deployments/<network>/<Contract>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: Address,
    pub transaction_hash: B256,
    pub block_number: u64,
    pub gas_used: Option<u64>,
    pub chain_id: u64,
    pub deployer: Address,
    pub args: Vec<String>,
    pub abi: JsonAbi,
    pub deployed_at: chrono::DateTime<chrono::Utc>,
}
