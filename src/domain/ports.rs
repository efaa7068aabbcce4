use crate::domain::model::{TransactionReceipt, TransactionRequest};
use crate::utils::error::Result;
use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Relative paths of every file under `dir`, recursively, `/`-separated.
    fn list_files(&self, dir: &str)
        -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64>;
    async fn accounts(&self) -> Result<Vec<Address>>;
    async fn block_number(&self) -> Result<u64>;
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64>;
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256>;
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>>;
    async fn code_at(&self, address: Address) -> Result<Bytes>;
}
