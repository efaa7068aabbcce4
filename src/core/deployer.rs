use crate::core::abi::deployment_data;
use crate::core::artifact::ContractArtifact;
use crate::domain::model::{
    ConstructorArg, Deployment, DeploymentPlan, TransactionReceipt, TransactionRequest,
};
use crate::domain::ports::ChainClient;
use crate::utils::error::{DeployError, Result};
use alloy_primitives::{Address, Bytes, B256, U64};
use tokio::time::{sleep, Instant};

/// Builds creation transactions for one compiled contract.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    artifact: ContractArtifact,
    creation_code: Bytes,
}

impl ContractFactory {
    pub fn new(artifact: ContractArtifact) -> Result<Self> {
        let creation_code = artifact.creation_code()?;
        Ok(Self {
            artifact,
            creation_code,
        })
    }

    pub fn artifact(&self) -> &ContractArtifact {
        &self.artifact
    }

    pub fn deploy_data(&self, args: &[ConstructorArg]) -> Result<Bytes> {
        deployment_data(&self.creation_code, self.artifact.abi.constructor(), args)
    }

    pub fn deploy_transaction(
        &self,
        from: Address,
        args: &[ConstructorArg],
        gas: Option<u64>,
    ) -> Result<TransactionRequest> {
        Ok(TransactionRequest {
            from,
            data: self.deploy_data(args)?,
            gas: gas.map(U64::from),
        })
    }
}

/// Sends a creation transaction and follows it until the contract is live.
pub struct Deployer<'a, C: ChainClient> {
    client: &'a C,
    plan: &'a DeploymentPlan,
}

impl<'a, C: ChainClient> Deployer<'a, C> {
    pub fn new(client: &'a C, plan: &'a DeploymentPlan) -> Self {
        Self { client, plan }
    }

    pub async fn deploy(&self, factory: &ContractFactory) -> Result<Deployment> {
        let chain_id = self.check_chain_id().await?;
        let deployer = self.resolve_sender().await?;
        tracing::info!("Deploying {} from {}", self.plan.contract, deployer);

        let mut tx = factory.deploy_transaction(deployer, &self.plan.constructor_args, None)?;
        let gas = match self.plan.gas_limit {
            Some(limit) => limit,
            None => {
                let estimate = self.client.estimate_gas(&tx).await?;
                tracing::debug!("Estimated gas: {}", estimate);
                estimate
            }
        };
        tx.gas = Some(U64::from(gas));

        let tx_hash = self.client.send_transaction(&tx).await?;
        tracing::info!("Deployment transaction sent: {}", tx_hash);

        let receipt = self.wait_for_deployment(tx_hash).await?;
        let address = self.get_address(tx_hash, &receipt).await?;

        Ok(Deployment {
            network: self.plan.network.clone(),
            contract: self.plan.contract.clone(),
            address,
            transaction_hash: tx_hash,
            block_number: receipt.block_number.map(|b| b.to::<u64>()).unwrap_or_default(),
            gas_used: receipt.gas_used.map(|g| g.to::<u64>()),
            chain_id,
            deployer,
            constructor_args: self.plan.constructor_args.clone(),
        })
    }

    async fn check_chain_id(&self) -> Result<u64> {
        let actual = self.client.chain_id().await?;
        tracing::debug!("Connected to chain id {}", actual);

        match self.plan.expected_chain_id {
            Some(expected) if expected != actual => Err(DeployError::ChainIdMismatch {
                network: self.plan.network.clone(),
                expected,
                actual,
            }),
            _ => Ok(actual),
        }
    }

    async fn resolve_sender(&self) -> Result<Address> {
        if let Some(from) = self.plan.from {
            return Ok(from);
        }
        self.client
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(DeployError::NoAccounts)
    }

    /// Polls for the receipt, then for the configured confirmation depth.
    pub async fn wait_for_deployment(&self, tx_hash: B256) -> Result<TransactionReceipt> {
        let deadline = Instant::now().checked_add(self.plan.timeout).ok_or_else(|| {
            DeployError::InvalidConfigValueError {
                field: "timeout_seconds".to_string(),
                value: self.plan.timeout.as_secs().to_string(),
                reason: "Timeout is too large".to_string(),
            }
        })?;
        let timeout = || DeployError::DeploymentTimeout {
            tx_hash: tx_hash.to_string(),
            seconds: self.plan.timeout.as_secs(),
        };

        let receipt = loop {
            if let Some(receipt) = self.client.transaction_receipt(tx_hash).await? {
                if receipt.block_number.is_some() {
                    break receipt;
                }
            }
            if Instant::now() >= deadline {
                return Err(timeout());
            }
            tracing::debug!("Waiting for {} to be mined", tx_hash);
            sleep(self.plan.poll_interval).await;
        };

        if !receipt.succeeded() {
            return Err(DeployError::DeploymentFailed {
                tx_hash: tx_hash.to_string(),
                reason: "transaction reverted".to_string(),
            });
        }

        let mined_in = receipt.block_number.map(|b| b.to::<u64>()).unwrap_or_default();
        if self.plan.confirmations > 1 {
            let target = mined_in
                .checked_add(self.plan.confirmations - 1)
                .ok_or_else(|| DeployError::InvalidConfigValueError {
                    field: "confirmations".to_string(),
                    value: self.plan.confirmations.to_string(),
                    reason: format!("Confirmation target overflows after block {}", mined_in),
                })?;
            loop {
                let head = self.client.block_number().await?;
                if head >= target {
                    break;
                }
                if Instant::now() >= deadline {
                    return Err(timeout());
                }
                tracing::debug!(
                    "Block {} of {} for {} confirmations",
                    head,
                    target,
                    self.plan.confirmations
                );
                sleep(self.plan.poll_interval).await;
            }
        }

        Ok(receipt)
    }

    /// Address from the receipt, checked to hold code.
    pub async fn get_address(
        &self,
        tx_hash: B256,
        receipt: &TransactionReceipt,
    ) -> Result<Address> {
        let address = receipt
            .contract_address
            .ok_or_else(|| DeployError::DeploymentFailed {
                tx_hash: tx_hash.to_string(),
                reason: "receipt has no contract address".to_string(),
            })?;

        let code = self.client.code_at(address).await?;
        if code.is_empty() {
            return Err(DeployError::NoCodeAtAddress {
                address: address.to_string(),
            });
        }

        Ok(address)
    }
}
