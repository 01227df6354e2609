//! End-to-end transfer flow against a scripted chain client.

use std::sync::Arc;

use alloy::consensus::TxEnvelope;
use alloy::eips::Decodable2718;
use alloy::primitives::{Address, Bytes, U256};

use token_sender::blockchain::{BlockchainError, ConfirmationResult, ReceiptInfo, TokenBalance};
use token_sender::cli::{execute, CliError, TransferOutcome};
use token_sender::transfer::{SendAmount, TransferAmount, TransferRequest};

mod common;

use common::{ReceiptStep, ScriptedChainClient};

const DESTINATION: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

fn destination() -> Address {
    DESTINATION.parse().unwrap()
}

fn request(amount: TransferAmount, token: &str) -> TransferRequest {
    TransferRequest {
        amount,
        destination: destination(),
        token_symbol: token.to_string(),
    }
}

fn exact(amount: &str) -> TransferAmount {
    TransferAmount::Exact(amount.parse().unwrap())
}

/// Transfer recipient and amount from the calldata of a submitted transaction.
fn decode_transfer(raw: &Bytes) -> (Address, U256) {
    let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
    let input = &envelope.as_eip1559().unwrap().tx().input;
    assert_eq!(&input[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    (
        Address::from_slice(&input[16..36]),
        U256::from_be_slice(&input[36..68]),
    )
}

#[tokio::test]
async fn test_balance_query() {
    let client = Arc::new(ScriptedChainClient::new(6, U256::from(12_345_678u64)));
    let sender = common::sender(client.clone());

    let balance = sender.get_token_balance("USDC").await.unwrap();

    assert_eq!(balance, TokenBalance::new(U256::from(12_345_678u64), 6));
    assert_eq!(balance.to_string(), "12.346");
}

#[tokio::test]
async fn test_unsupported_token_balance_is_zero() {
    let client = Arc::new(ScriptedChainClient::new(6, U256::from(1u64)));
    let sender = common::sender(client);

    let balance = sender.get_token_balance("dai").await.unwrap();

    assert!(balance.is_zero());
    assert_eq!(balance.as_f64(), 0.0);
}

#[tokio::test]
async fn test_unsupported_token_send_returns_none() {
    let client = Arc::new(ScriptedChainClient::new(6, U256::from(1u64)));
    let sender = common::sender(client.clone());

    let amount = SendAmount::Exact("1".parse().unwrap());
    let sent = sender.send(&amount, destination(), "dai").await.unwrap();

    assert!(sent.is_none());
    assert_eq!(client.submitted_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_successful_transfer() {
    let client = Arc::new(
        ScriptedChainClient::new(6, U256::from(50_000_000u64)).with_receipts([
            ReceiptStep::NotFound,
            ReceiptStep::Found(ReceiptInfo::success(1)),
        ]),
    );
    let sender = common::sender(client.clone());

    let outcome = execute(&sender, &request(exact("12.5"), "usdc")).await.unwrap();

    let TransferOutcome::Completed { submitted, result } = outcome else {
        panic!("expected a submitted transfer");
    };
    assert_eq!(result, ConfirmationResult::Success);
    assert_eq!(submitted.amount, U256::from(12_500_000u64));
    assert_eq!(submitted.fees.max_fee, 11_000_000);
    assert_eq!(submitted.fees.nonce, 4);

    let (to, amount) = decode_transfer(&submitted.raw_signed_bytes);
    assert_eq!(to, destination());
    assert_eq!(amount, U256::from(12_500_000u64));
    assert_eq!(client.submitted_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_insufficient_balance_still_sends_requested_amount() {
    // Balance 5 USDC, request 10: warning only, transfer goes out for 10.
    let client = Arc::new(
        ScriptedChainClient::new(6, U256::from(5_000_000u64))
            .with_receipts([ReceiptStep::Found(ReceiptInfo::failed(1))]),
    );
    let sender = common::sender(client.clone());
    let request = request(exact("10"), "usdc");

    let balance = sender.get_token_balance("usdc").await.unwrap();
    assert!(request.exceeds(&balance));

    let outcome = execute(&sender, &request).await.unwrap();

    let TransferOutcome::Completed { submitted, result } = outcome else {
        panic!("expected a submitted transfer");
    };
    assert_eq!(submitted.amount, U256::from(10_000_000u64));
    assert_eq!(decode_transfer(&submitted.raw_signed_bytes).1, U256::from(10_000_000u64));
    assert_eq!(result, ConfirmationResult::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_send_all_transfers_exact_balance() {
    // 18 decimals, not representable exactly as f64.
    let raw_balance = U256::from(1_234_567_890_123_456_789_017u128);
    let client = Arc::new(
        ScriptedChainClient::new(18, raw_balance)
            .with_receipts([ReceiptStep::Found(ReceiptInfo::success(1))]),
    );
    let sender = common::sender(client.clone());

    let outcome = execute(&sender, &request(TransferAmount::All, "usdc")).await.unwrap();

    let TransferOutcome::Completed { submitted, .. } = outcome else {
        panic!("expected a submitted transfer");
    };
    assert_eq!(submitted.amount, raw_balance);
    assert_eq!(decode_transfer(&submitted.raw_signed_bytes).1, raw_balance);
}

#[tokio::test]
async fn test_unknown_decimals_is_fatal() {
    let client = Arc::new(ScriptedChainClient::new(8, U256::from(100_000_000u64)));
    let sender = common::sender(client.clone());

    let err = execute(&sender, &request(exact("1"), "usdc")).await.unwrap_err();

    assert!(matches!(
        err,
        CliError::Blockchain(BlockchainError::UnsupportedDecimals(8))
    ));
    assert_eq!(client.submitted_count(), 0);
}

#[tokio::test]
async fn test_unsupported_token_is_not_sent() {
    let client = Arc::new(ScriptedChainClient::new(6, U256::from(1u64)));
    let sender = common::sender(client.clone());

    let outcome = execute(&sender, &request(exact("1"), "dai")).await.unwrap();

    assert_eq!(outcome, TransferOutcome::NotSent);
    assert_eq!(client.submitted_count(), 0);
    assert_eq!(client.receipt_query_count(), 0);
}

#[tokio::test]
async fn test_rpc_failure_propagates() {
    let mut client = ScriptedChainClient::new(6, U256::from(5_000_000u64));
    client.fail_fee_estimate = true;
    let client = Arc::new(client);
    let sender = common::sender(client.clone());

    let err = execute(&sender, &request(exact("1"), "usdc")).await.unwrap_err();

    assert!(matches!(err, CliError::Blockchain(BlockchainError::Rpc(_))));
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(client.submitted_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_reported_distinctly() {
    let client = Arc::new(ScriptedChainClient::new(6, U256::from(5_000_000u64)));
    let sender = common::sender(client.clone());

    let outcome = execute(&sender, &request(exact("1"), "usdc")).await.unwrap();

    let TransferOutcome::Completed { result, .. } = outcome else {
        panic!("expected a submitted transfer");
    };
    assert_eq!(result, ConfirmationResult::NotFoundTimeout);
    assert_eq!(client.receipt_query_count(), 11);
}

#[tokio::test]
async fn test_amount_below_token_precision_is_not_sent() {
    let client = Arc::new(ScriptedChainClient::new(6, U256::from(5_000_000u64)));
    let sender = common::sender(client.clone());

    let err = execute(&sender, &request(exact("0.0000001"), "usdc")).await.unwrap_err();

    assert!(matches!(
        err,
        CliError::Blockchain(BlockchainError::InvalidAmount { .. })
    ));
    assert_eq!(client.submitted_count(), 0);
}
