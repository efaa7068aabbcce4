use crate::domain::model::Deployment;
use alloy_primitives::Address;
use std::fmt;

/// Explorer verification command for a finished deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCommand {
    pub network: String,
    pub address: Address,
    pub args: Vec<String>,
}

impl VerificationCommand {
    pub fn for_deployment(deployment: &Deployment) -> Self {
        Self {
            network: deployment.network.clone(),
            address: deployment.address,
            args: deployment
                .constructor_args
                .iter()
                .map(|arg| arg.to_cli_token())
                .collect(),
        }
    }
}

impl fmt::Display for VerificationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "npx hardhat verify --network {} {}",
            self.network,
            self.address.to_checksum(None)
        )?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
