//! Shared fixtures for integration tests: an in-memory chain client with
//! scripted responses.

use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address, Bytes, TxHash, U256};
use async_trait::async_trait;

use token_sender::blockchain::{
    BlockchainError, BlockchainResult, ChainClient, ChainId, FeeEstimate, PollConfig,
    ReceiptInfo, TokenAbi, Wallet,
};
use token_sender::config::ChainDescriptor;
use token_sender::transfer::Sender;

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const USDC: &str = "0xaf88d065e77c8cC2239327C5EDb3A432268e5831";

const DECIMALS_SELECTOR: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];
const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// One scripted answer to `get_receipt`.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum ReceiptStep {
    NotFound,
    Found(ReceiptInfo),
    TransportError,
}

/// Chain client answering from fixed values and a receipt script.
/// Once the script is exhausted every receipt query is "not found".
pub struct ScriptedChainClient {
    pub decimals: u8,
    pub balance: U256,
    pub fail_fee_estimate: bool,
    receipts: Mutex<VecDeque<ReceiptStep>>,
    pub submitted: Mutex<Vec<Bytes>>,
    pub receipt_queries: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedChainClient {
    pub fn new(decimals: u8, balance: U256) -> Self {
        Self {
            decimals,
            balance,
            fail_fee_estimate: false,
            receipts: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            receipt_queries: AtomicUsize::new(0),
        }
    }

    pub fn with_receipts(self, steps: impl IntoIterator<Item = ReceiptStep>) -> Self {
        *self.receipts.lock().unwrap() = steps.into_iter().collect();
        self
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn receipt_query_count(&self) -> usize {
        self.receipt_queries.load(Ordering::SeqCst)
    }
}

fn word(value: U256) -> Bytes {
    Bytes::from(value.to_be_bytes::<32>().to_vec())
}

#[async_trait]
impl ChainClient for ScriptedChainClient {
    async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        Ok(ChainId(42161))
    }

    async fn get_nonce(&self, _address: Address) -> BlockchainResult<u64> {
        Ok(4)
    }

    async fn get_fee_estimate(&self) -> BlockchainResult<FeeEstimate> {
        if self.fail_fee_estimate {
            return Err(BlockchainError::Rpc("eth_gasPrice: connection reset".into()));
        }
        Ok(FeeEstimate {
            base_fee: 10_000_000,
            max_priority_fee: 1_000_000,
        })
    }

    async fn estimate_gas(&self, _from: Address, _to: Address, _calldata: Bytes) -> BlockchainResult<u64> {
        Ok(65_000)
    }

    async fn call_contract_read(&self, _contract: Address, calldata: Bytes) -> BlockchainResult<Bytes> {
        match calldata.get(..4) {
            Some(selector) if selector == DECIMALS_SELECTOR.as_slice() => Ok(word(U256::from(self.decimals))),
            Some(selector) if selector == BALANCE_OF_SELECTOR.as_slice() => Ok(word(self.balance)),
            _ => Err(BlockchainError::Rpc("execution reverted".into())),
        }
    }

    async fn submit_signed_transaction(&self, raw: Bytes) -> BlockchainResult<TxHash> {
        let hash = keccak256(&raw);
        self.submitted.lock().unwrap().push(raw);
        Ok(hash)
    }

    async fn get_receipt(&self, _tx_hash: TxHash) -> BlockchainResult<Option<ReceiptInfo>> {
        self.receipt_queries.fetch_add(1, Ordering::SeqCst);
        let step = self
            .receipts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ReceiptStep::NotFound);

        match step {
            ReceiptStep::NotFound => Ok(None),
            ReceiptStep::Found(receipt) => Ok(Some(receipt)),
            ReceiptStep::TransportError => Err(BlockchainError::Rpc("eth_getTransactionReceipt: 502".into())),
        }
    }
}

pub fn chain() -> ChainDescriptor {
    let mut tokens = BTreeMap::new();
    tokens.insert("usdc".to_string(), USDC.parse().unwrap());
    ChainDescriptor {
        name: "arbitrum".to_string(),
        rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
        explorer_url: "https://arbiscan.io/".to_string(),
        abi_path: abi_path(),
        tokens,
    }
}

pub fn abi_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("abi/erc20.json")
}

pub fn sender(client: Arc<ScriptedChainClient>) -> Sender {
    Sender::new(
        chain(),
        TokenAbi::load(&abi_path()).unwrap(),
        Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap(),
        client,
        PollConfig::default(),
    )
}
