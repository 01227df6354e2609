//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Define the [`ChainClient`] boundary the transfer flow talks to
//! - Connect to a JSON-RPC endpoint, optionally through an HTTP proxy
//! - Query chain state (chain id, nonce, fees, receipts) and run read-only calls
//! - Submit raw signed transactions
//! - Handle timeouts and network errors uniformly

use std::fmt::Display;
use std::future::IntoFuture;
use std::time::Duration;

use alloy::consensus::{Eip658Value, TxReceipt};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::Http;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, FeeEstimate, ReceiptInfo,
};

/// Everything the transfer flow needs from a chain node.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_chain_id(&self) -> BlockchainResult<ChainId>;

    /// Transaction count for `address` at the latest block.
    async fn get_nonce(&self, address: Address) -> BlockchainResult<u64>;

    /// Current base fee (`eth_gasPrice`) and suggested priority fee.
    async fn get_fee_estimate(&self) -> BlockchainResult<FeeEstimate>;

    /// Gas limit for a call from `from` to `to` with `calldata`.
    async fn estimate_gas(&self, from: Address, to: Address, calldata: Bytes)
        -> BlockchainResult<u64>;

    /// Read-only `eth_call` against a contract.
    async fn call_contract_read(&self, contract: Address, calldata: Bytes)
        -> BlockchainResult<Bytes>;

    /// Broadcast an EIP-2718 encoded signed transaction.
    async fn submit_signed_transaction(&self, raw: Bytes) -> BlockchainResult<TxHash>;

    /// `Ok(None)` while the node does not know the transaction yet.
    async fn get_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptInfo>>;
}

/// [`ChainClient`] over an alloy HTTP provider.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: DynProvider,
    rpc_url: String,
    proxied: bool,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl RpcChainClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `rpc_url` - JSON-RPC endpoint
    /// * `proxy` - Optional `host:port` of an HTTP proxy
    /// * `timeout_duration` - Deadline for every RPC request
    pub fn new(
        rpc_url: &str,
        proxy: Option<&str>,
        timeout_duration: Duration,
    ) -> BlockchainResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let mut http = reqwest::Client::builder();
        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(format!("http://{}", proxy))
                .map_err(|e| BlockchainError::Rpc(format!("Invalid proxy '{}': {}", proxy, e)))?;
            http = http.proxy(proxy);
        }
        let http = http
            .build()
            .map_err(|e| BlockchainError::Rpc(format!("Failed to build HTTP client: {}", e)))?;

        let transport = Http::with_client(http, url);
        let provider = ProviderBuilder::new()
            .connect_client(RpcClient::new(transport, false))
            .erased();

        tracing::debug!(
            rpc_url = %rpc_url,
            proxied = proxy.is_some(),
            timeout_secs = timeout_duration.as_secs(),
            "RPC client initialized"
        );

        Ok(Self {
            provider,
            rpc_url: rpc_url.to_string(),
            proxied: proxy.is_some(),
            timeout_duration,
        })
    }

    async fn request<T, E, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{}: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.request("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn get_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.request(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    async fn get_fee_estimate(&self) -> BlockchainResult<FeeEstimate> {
        let (base_fee, max_priority_fee) = tokio::try_join!(
            self.request("eth_gasPrice", self.provider.get_gas_price()),
            self.request(
                "eth_maxPriorityFeePerGas",
                self.provider.get_max_priority_fee_per_gas()
            ),
        )?;
        Ok(FeeEstimate {
            base_fee,
            max_priority_fee,
        })
    }

    async fn estimate_gas(
        &self,
        from: Address,
        to: Address,
        calldata: Bytes,
    ) -> BlockchainResult<u64> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(calldata);
        self.request("eth_estimateGas", self.provider.estimate_gas(tx))
            .await
    }

    async fn call_contract_read(
        &self,
        contract: Address,
        calldata: Bytes,
    ) -> BlockchainResult<Bytes> {
        let tx = TransactionRequest::default()
            .with_to(contract)
            .with_input(calldata);
        self.request("eth_call", self.provider.call(tx)).await
    }

    async fn submit_signed_transaction(&self, raw: Bytes) -> BlockchainResult<TxHash> {
        let fut = self.provider.send_raw_transaction(&raw);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(BlockchainError::Submission(e.to_string())),
            Err(_) => Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    async fn get_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptInfo>> {
        let receipt = self
            .request(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(tx_hash),
            )
            .await?;

        Ok(receipt.map(|r| ReceiptInfo {
            status: receipt_status(r.inner.status_or_post_state()),
            block_number: r.block_number,
        }))
    }
}

/// EIP-658 status code; pre-Byzantium receipts only carry a state root.
fn receipt_status(value: Eip658Value) -> Option<u64> {
    match value {
        Eip658Value::Eip658(success) => Some(u64::from(success)),
        Eip658Value::PostState(_) => None,
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("rpc_url", &self.rpc_url)
            .field("proxied", &self.proxied)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
