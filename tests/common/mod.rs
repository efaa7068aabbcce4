#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};
use std::path::Path;

pub const DEPLOYER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
pub const CONTRACT_CHECKSUMMED: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const TX_HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
pub const STAKE_WEI: &str = "10000000000000000";

/// Writes a Hardhat-style artifact for `Project` under `<root>/artifacts`.
pub fn write_project_artifact(root: &Path) {
    let dir = root.join("artifacts/contracts/Project.sol");
    std::fs::create_dir_all(&dir).unwrap();

    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": "Project",
        "sourceName": "contracts/Project.sol",
        "abi": [
            {
                "inputs": [{"internalType": "uint256", "name": "_minimumStake", "type": "uint256"}],
                "stateMutability": "nonpayable",
                "type": "constructor"
            },
            {
                "inputs": [],
                "name": "minimumStake",
                "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
                "stateMutability": "view",
                "type": "function"
            }
        ],
        "bytecode": "0x608060405234801561001057600080fd5b50",
        "deployedBytecode": "0x6080604052",
        "linkReferences": {},
        "deployedLinkReferences": {}
    });
    std::fs::write(
        dir.join("Project.json"),
        serde_json::to_vec_pretty(&artifact).unwrap(),
    )
    .unwrap();
    std::fs::write(dir.join("Project.dbg.json"), b"{\"_format\":\"hh-sol-dbg-1\"}").unwrap();
}

fn rpc_result(result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "result": result})
}

pub fn mock_method<'a>(server: &'a MockServer, method: &str, result: Value) -> Mock<'a> {
    let body = format!(r#"{{"method":"{}"}}"#, method);
    server.mock(|when, then| {
        when.method(POST).json_body_partial(body);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(rpc_result(result));
    })
}

pub fn mock_method_error<'a>(server: &'a MockServer, method: &str, message: &str) -> Mock<'a> {
    let body = format!(r#"{{"method":"{}"}}"#, method);
    server.mock(|when, then| {
        when.method(POST).json_body_partial(body);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32000, "message": message}
            }));
    })
}

/// A dev node on chain 31337 that mines the deployment immediately.
pub fn mock_node_until_send(server: &MockServer) {
    mock_method(server, "eth_chainId", json!("0x7a69"));
    mock_method(server, "eth_accounts", json!([DEPLOYER]));
    mock_method(server, "eth_estimateGas", json!("0x493e0"));
}

pub fn mock_mined_deployment(server: &MockServer, status: &str) {
    mock_method(server, "eth_sendTransaction", json!(TX_HASH));
    mock_method(
        server,
        "eth_getTransactionReceipt",
        json!({
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": "0x2222222222222222222222222222222222222222222222222222222222222222",
            "blockNumber": "0x1",
            "from": DEPLOYER,
            "to": null,
            "cumulativeGasUsed": "0x3d090",
            "gasUsed": "0x3d090",
            "contractAddress": CONTRACT,
            "logs": [],
            "status": status
        }),
    );
    mock_method(server, "eth_blockNumber", json!("0x1"));
    mock_method(server, "eth_getCode", json!("0x6080604052"));
}
