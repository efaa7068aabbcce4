use crate::domain::model::{TransactionReceipt, TransactionRequest};
use crate::domain::ports::ChainClient;
use crate::utils::error::{DeployError, Result};
use crate::utils::validation::endpoint_host;
use alloy_primitives::{Address, Bytes, B256, U64};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const NO_PARAMS: [u8; 0] = [];

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// `ChainClient` over JSON-RPC 2.0 on HTTP.
///
/// Transactions are signed by the node, so the sender must be an account the
/// node manages (a dev node's unlocked accounts or a signing proxy).
pub struct JsonRpcClient {
    client: Client,
    url: String,
    host: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let url = url.into();
        Ok(Self {
            client,
            host: endpoint_host(&url),
            url,
            next_id: AtomicU64::new(1),
        })
    }

    pub async fn request<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        // reqwest errors echo the full URL, which may hold an API key
        let http = |e: reqwest::Error| DeployError::HttpError(e.without_url());

        tracing::debug!("RPC {} -> {}", method, self.host);
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(http)?
            .error_for_status()
            .map_err(http)?;

        let body: RpcResponse = response.json().await.map_err(http)?;
        if let Some(error) = body.error {
            tracing::debug!("RPC {} failed: {} {}", method, error.code, error.message);
            return Err(DeployError::RpcError {
                code: error.code,
                message: error.message,
            });
        }

        let result = body.result.unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl ChainClient for JsonRpcClient {
    async fn chain_id(&self) -> Result<u64> {
        let id: U64 = self.request("eth_chainId", NO_PARAMS).await?;
        Ok(id.to::<u64>())
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_accounts", NO_PARAMS).await
    }

    async fn block_number(&self) -> Result<u64> {
        let number: U64 = self.request("eth_blockNumber", NO_PARAMS).await?;
        Ok(number.to::<u64>())
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        let gas: U64 = self.request("eth_estimateGas", (tx,)).await?;
        Ok(gas.to::<u64>())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256> {
        self.request("eth_sendTransaction", (tx,)).await
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        self.request("eth_getTransactionReceipt", (hash,)).await
    }

    async fn code_at(&self, address: Address) -> Result<Bytes> {
        self.request("eth_getCode", (address, "latest")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> JsonRpcClient {
        JsonRpcClient::new(server.url("/"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_chain_id_parses_hex_quantity() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/")
                .json_body_partial(r#"{"jsonrpc":"2.0","method":"eth_chainId"}"#);
            then.status(200)
                .json_body(serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": "0x45b"}));
        });

        assert_eq!(client(&server).chain_id().await.unwrap(), 1115);
        mock.assert();
    }

    #[tokio::test]
    async fn test_null_receipt_is_pending() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .json_body_partial(r#"{"method":"eth_getTransactionReceipt"}"#);
            then.status(200)
                .json_body(serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": null}));
        });

        let receipt = client(&server)
            .transaction_receipt(B256::repeat_byte(0x11))
            .await
            .unwrap();
        assert!(receipt.is_none());
    }

    #[tokio::test]
    async fn test_rpc_error_object() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).json_body_partial(r#"{"method":"eth_sendTransaction"}"#);
            then.status(200).json_body(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32000, "message": "insufficient funds for gas * price + value"}
            }));
        });

        let tx = TransactionRequest {
            from: Address::repeat_byte(0x01),
            data: Bytes::from(vec![0x60, 0x80]),
            gas: None,
        };
        let err = client(&server).send_transaction(&tx).await.unwrap_err();
        match err {
            DeployError::RpcError { code, message } => {
                assert_eq!(code, -32000);
                assert!(message.contains("insufficient funds"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(502);
        });

        let err = client(&server).block_number().await.unwrap_err();
        assert!(matches!(err, DeployError::HttpError(_)));
    }

    #[tokio::test]
    async fn test_http_errors_hide_the_endpoint_key() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(401);
        });

        let client =
            JsonRpcClient::new(server.url("/v2/secret-api-key"), Duration::from_secs(5)).unwrap();
        let err = client.chain_id().await.unwrap_err();
        assert!(matches!(err, DeployError::HttpError(_)));
        assert!(!err.to_string().contains("secret-api-key"));
        assert!(!format!("{err:?}").contains("secret-api-key"));
    }

    #[test]
    fn test_transaction_request_wire_format() {
        let tx = TransactionRequest {
            from: Address::repeat_byte(0x01),
            data: Bytes::from(vec![0x60, 0x80]),
            gas: Some(U64::from(300_000)),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["data"], "0x6080");
        assert_eq!(value["gas"], "0x493e0");
        assert_eq!(
            value["from"].as_str().unwrap().to_lowercase(),
            "0x0101010101010101010101010101010101010101"
        );

        let without_gas = TransactionRequest { gas: None, ..tx };
        assert!(serde_json::to_value(&without_gas).unwrap().get("gas").is_none());
    }
}
