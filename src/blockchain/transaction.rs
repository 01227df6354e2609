//! Transaction building, signing, and submission.
//!
//! # Responsibilities
//! - Gather fresh fee-market parameters for every transaction
//! - Build EIP-1559 token transfer transactions with gas estimation
//! - Sign and broadcast transactions

use std::sync::Arc;

use alloy::consensus::TxEip1559;
use alloy::primitives::{Address, Bytes, U256};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{BlockchainResult, FeeParameters, SubmittedTransaction};
use crate::blockchain::wallet::{SignedTransaction, Wallet};

/// Transaction builder for token transfers from one wallet.
pub struct TxBuilder {
    client: Arc<dyn ChainClient>,
    wallet: Wallet,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(client: Arc<dyn ChainClient>, wallet: Wallet) -> Self {
        Self { client, wallet }
    }

    /// Query base fee, priority fee, nonce and chain id.
    ///
    /// The reads are independent and run concurrently; all must succeed.
    pub async fn fee_parameters(&self) -> BlockchainResult<FeeParameters> {
        let (estimate, nonce, chain_id) = tokio::try_join!(
            self.client.get_fee_estimate(),
            self.client.get_nonce(self.wallet.address()),
            self.client.get_chain_id(),
        )?;

        let fees = FeeParameters::new(estimate, nonce, chain_id);
        tracing::debug!(
            base_fee = fees.base_fee,
            max_priority_fee = fees.max_priority_fee,
            max_fee = fees.max_fee,
            nonce = fees.nonce,
            chain_id = fees.chain_id.0,
            "Fee parameters"
        );
        Ok(fees)
    }

    /// Build an unsigned EIP-1559 call to `contract` carrying `calldata`.
    ///
    /// # Arguments
    /// * `contract` - Token contract address
    /// * `calldata` - Encoded `transfer(to, amount)` call
    pub async fn build(
        &self,
        contract: Address,
        calldata: Bytes,
    ) -> BlockchainResult<(TxEip1559, FeeParameters)> {
        let fees = self.fee_parameters().await?;
        let gas_limit = self
            .client
            .estimate_gas(self.wallet.address(), contract, calldata.clone())
            .await?;

        let tx = TxEip1559 {
            chain_id: fees.chain_id.0,
            nonce: fees.nonce,
            gas_limit,
            max_fee_per_gas: fees.max_fee,
            max_priority_fee_per_gas: fees.max_priority_fee,
            to: contract.into(),
            value: U256::ZERO,
            input: calldata,
            ..Default::default()
        };

        Ok((tx, fees))
    }

    /// Sign with the wallet key and broadcast. Returns the submitted transaction
    /// with the hash the node reported.
    pub async fn sign_and_submit(
        &self,
        tx: TxEip1559,
        fees: FeeParameters,
        amount: U256,
    ) -> BlockchainResult<SubmittedTransaction> {
        let SignedTransaction { raw, hash } = self.wallet.sign_eip1559(tx)?;

        let reported = self.client.submit_signed_transaction(raw.clone()).await?;
        if reported != hash {
            tracing::warn!(
                local = %hash,
                reported = %reported,
                "Node reported a different transaction hash"
            );
        }

        tracing::info!(tx_hash = %reported, nonce = fees.nonce, "Transaction submitted");

        Ok(SubmittedTransaction {
            raw_signed_bytes: raw,
            transaction_hash: reported,
            amount,
            fees,
        })
    }

    /// Build, sign and submit in one step.
    pub async fn send(
        &self,
        contract: Address,
        calldata: Bytes,
        amount: U256,
    ) -> BlockchainResult<SubmittedTransaction> {
        let (tx, fees) = self.build(contract, calldata).await?;
        self.sign_and_submit(tx, fees, amount).await
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}
