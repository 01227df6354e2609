//! Transfer orchestrator: balance query, send, and confirmation wait for one
//! wallet on one chain.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash};

use crate::blockchain::{
    BlockchainResult, ChainClient, ConfirmationPoller, ConfirmationResult, PollConfig,
    RpcChainClient, SubmittedTransaction, TokenAbi, TokenBalance, TokenUnit, TxBuilder, Wallet,
};
use crate::config::ChainDescriptor;
use crate::transfer::request::SendAmount;

/// Connection settings for [`Sender::connect`].
#[derive(Debug, Clone)]
pub struct SenderSettings {
    /// `host:port` of an HTTP proxy, if any.
    pub proxy: Option<String>,
    pub rpc_timeout: Duration,
    pub poll: PollConfig,
}

impl Default for SenderSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            rpc_timeout: Duration::from_secs(30),
            poll: PollConfig::default(),
        }
    }
}

pub struct Sender {
    chain: ChainDescriptor,
    abi: TokenAbi,
    client: Arc<dyn ChainClient>,
    tx_builder: TxBuilder,
    poll: PollConfig,
}

impl Sender {
    /// Load the chain's ABI, parse the key and connect to the chain's RPC.
    pub fn connect(
        private_key: &str,
        chain: ChainDescriptor,
        settings: &SenderSettings,
    ) -> BlockchainResult<Self> {
        let abi = TokenAbi::load(&chain.abi_path)?;
        let wallet = Wallet::from_private_key(private_key)?;
        let client = RpcChainClient::new(
            &chain.rpc_url,
            settings.proxy.as_deref(),
            settings.rpc_timeout,
        )?;

        Ok(Self::new(chain, abi, wallet, Arc::new(client), settings.poll))
    }

    pub fn new(
        chain: ChainDescriptor,
        abi: TokenAbi,
        wallet: Wallet,
        client: Arc<dyn ChainClient>,
        poll: PollConfig,
    ) -> Self {
        let tx_builder = TxBuilder::new(client.clone(), wallet);
        Self {
            chain,
            abi,
            client,
            tx_builder,
            poll,
        }
    }

    /// Sending address.
    pub fn address(&self) -> Address {
        self.tx_builder.address()
    }

    pub fn chain(&self) -> &ChainDescriptor {
        &self.chain
    }

    /// Balance of the sender for `token`, or zero when the chain does not list it.
    pub async fn get_token_balance(&self, token: &str) -> BlockchainResult<TokenBalance> {
        let token = token.trim().to_lowercase();
        println!("Checking {} balance...", token);

        let Some(contract) = self.chain.token_address(&token) else {
            println!("Sorry we don't support {}", token);
            return Ok(TokenBalance::zero());
        };

        let decimals = self.decimals(contract).await?;
        let output = self
            .client
            .call_contract_read(contract, self.abi.encode_balance_of(self.address())?)
            .await?;
        let raw = self.abi.decode_balance_of(&output)?;

        tracing::debug!(token = %token, %raw, decimals, "Balance queried");
        Ok(TokenBalance::new(raw, decimals))
    }

    /// Transfer `amount` of `token` to `to`.
    ///
    /// Returns `Ok(None)` without touching the chain when the token is not
    /// listed for this chain.
    pub async fn send(
        &self,
        amount: &SendAmount,
        to: Address,
        token: &str,
    ) -> BlockchainResult<Option<SubmittedTransaction>> {
        let token = token.trim().to_lowercase();

        let Some(contract) = self.chain.token_address(&token) else {
            println!("Sorry we don't support {}", token);
            return Ok(None);
        };

        println!("Sending {} {} to {} ...", amount, token.to_uppercase(), to);

        let decimals = self.decimals(contract).await?;
        let unit = TokenUnit::from_decimals(decimals)?;
        let raw_amount = amount.to_raw(unit)?;

        tracing::debug!(
            chain = %self.chain.name,
            token = %token,
            unit = unit.name(),
            %raw_amount,
            "Building transfer"
        );

        let calldata = self.abi.encode_transfer(to, raw_amount)?;
        let submitted = self.tx_builder.send(contract, calldata, raw_amount).await?;
        Ok(Some(submitted))
    }

    /// Poll for the receipt and report the outcome.
    pub async fn wait_tx(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationResult> {
        let poller = ConfirmationPoller::new(self.client.as_ref(), self.poll);
        let result = poller.wait(tx_hash).await?;

        match result {
            ConfirmationResult::Success => {
                println!("Transaction was successful: {}", self.chain.tx_url(&tx_hash));
            }
            ConfirmationResult::Failed => {
                println!("Transaction failed: {}", self.chain.tx_url(&tx_hash));
            }
            ConfirmationResult::NotFoundTimeout => {
                println!(
                    "Transaction isn't in the chain after {} seconds",
                    self.poll.timeout.as_secs()
                );
            }
        }

        Ok(result)
    }

    async fn decimals(&self, contract: Address) -> BlockchainResult<u8> {
        let output = self
            .client
            .call_contract_read(contract, self.abi.encode_decimals()?)
            .await?;
        self.abi.decode_decimals(&output)
    }
}
