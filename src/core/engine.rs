use crate::core::artifact::load_artifact;
use crate::core::deployer::{ContractFactory, Deployer};
use crate::core::units::format_ether;
use crate::domain::model::{ConstructorArg, Deployment, DeploymentPlan, DeploymentRecord};
use crate::domain::ports::{ChainClient, Storage};
use crate::utils::error::Result;

/// What a dry run resolved without touching the network.
#[derive(Debug, Clone)]
pub struct DryRunSummary {
    pub contract: String,
    pub deployment_data_len: usize,
    pub args: Vec<String>,
}

pub struct DeployEngine<C: ChainClient, S: Storage> {
    client: C,
    storage: S,
}

impl<C: ChainClient, S: Storage> DeployEngine<C, S> {
    pub fn new(client: C, storage: S) -> Self {
        Self { client, storage }
    }

    pub async fn run(&self, plan: &DeploymentPlan) -> Result<Deployment> {
        println!("Starting deployment process...");
        for arg in &plan.constructor_args {
            if let ConstructorArg::Uint(value) = arg {
                tracing::debug!(
                    "Constructor argument: {} wei ({} ether)",
                    value,
                    format_ether(*value)
                );
            }
        }

        let factory = self.load_factory(plan).await?;
        println!("Deploying {}...", plan.description);

        let deployment = Deployer::new(&self.client, plan).deploy(&factory).await?;
        tracing::info!(
            "{} deployed at {} in block {} (tx {})",
            deployment.contract,
            deployment.address,
            deployment.block_number,
            deployment.transaction_hash
        );

        if let Some(dir) = &plan.deployments_dir {
            // a live contract outranks its record
            if let Err(e) = self.save_record(dir, &factory, &deployment).await {
                tracing::warn!("Could not save deployment record: {}", e);
            }
        }

        Ok(deployment)
    }

    /// Resolves the artifact and encodes the constructor, sending nothing.
    pub async fn dry_run(&self, plan: &DeploymentPlan) -> Result<DryRunSummary> {
        let factory = self.load_factory(plan).await?;
        let data = factory.deploy_data(&plan.constructor_args)?;

        Ok(DryRunSummary {
            contract: factory.artifact().fully_qualified_name(),
            deployment_data_len: data.len(),
            args: plan
                .constructor_args
                .iter()
                .map(|arg| arg.to_cli_token())
                .collect(),
        })
    }

    async fn load_factory(&self, plan: &DeploymentPlan) -> Result<ContractFactory> {
        let artifact = load_artifact(&self.storage, &plan.artifacts_dir, &plan.contract).await?;
        ContractFactory::new(artifact)
    }

    async fn save_record(
        &self,
        dir: &str,
        factory: &ContractFactory,
        deployment: &Deployment,
    ) -> Result<String> {
        let record = DeploymentRecord {
            contract_name: factory.artifact().contract_name.clone(),
            address: deployment.address,
            transaction_hash: deployment.transaction_hash,
            block_number: deployment.block_number,
            gas_used: deployment.gas_used,
            chain_id: deployment.chain_id,
            deployer: deployment.deployer,
            args: deployment
                .constructor_args
                .iter()
                .map(|arg| arg.to_cli_token())
                .collect(),
            abi: factory.artifact().abi.clone(),
            deployed_at: chrono::Utc::now(),
        };

        let path = format!(
            "{}/{}/{}.json",
            dir.trim_end_matches('/'),
            deployment.network,
            record.contract_name
        );
        let json = serde_json::to_string_pretty(&record)?;
        self.storage.write_file(&path, json.as_bytes()).await?;

        tracing::info!("Deployment record saved to {}", path);
        Ok(path)
    }
}
