use crate::core::verify::VerificationCommand;
use crate::domain::model::Deployment;
use std::io::{self, Write};

pub fn write_summary<W: Write>(
    out: &mut W,
    deployment: &Deployment,
    command: &VerificationCommand,
) -> io::Result<()> {
    writeln!(out, "Contract deployed at: {}", deployment.address.to_checksum(None))?;
    writeln!(out, "Verifying contract on explorer...")?;
    writeln!(out, "Verification command:")?;
    writeln!(out, "{}", command)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ConstructorArg;
    use alloy_primitives::{address, B256, U256};

    #[test]
    fn test_summary_lines() {
        let deployment = Deployment {
            network: "coreTestnet".to_string(),
            contract: "Project".to_string(),
            address: address!("5fbdb2315678afecb367f032d93f642f64180aa3"),
            transaction_hash: B256::ZERO,
            block_number: 3,
            gas_used: Some(21_000),
            chain_id: 1115,
            deployer: address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            constructor_args: vec![ConstructorArg::Uint(U256::from(10_000_000_000_000_000u64))],
        };
        let command = VerificationCommand::for_deployment(&deployment);

        let mut out = Vec::new();
        write_summary(&mut out, &deployment, &command).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Contract deployed at: 0x5FbDB2315678afecb367f032d93F642f64180aa3",
                "Verifying contract on explorer...",
                "Verification command:",
                "npx hardhat verify --network coreTestnet 0x5FbDB2315678afecb367f032d93F642f64180aa3 10000000000000000",
            ]
        );
    }
}
