//! Production ledger over the deployed transfers contract.
//!
//! Reads go through the chain client's failover provider list; the append
//! goes through a signing provider since it mutates contract state.

use alloy::primitives::Address;
use alloy::providers::DynProvider;
use alloy::sol;
use async_trait::async_trait;
use futures_util::FutureExt;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::client::ChainClient;
use crate::chain::signer::SessionSigner;
use crate::ledger::{AppendRequest, LedgerContract, LedgerError, PendingAppend, RawRecord};

sol! {
    #[sol(rpc)]
    contract TransferLedger {
        struct TransferStruct {
            address sender;
            address receiver;
            uint256 amount;
            string message;
            uint256 timestamp;
            string keyword;
        }

        function addToBlockchain(address payable receiver, uint256 amount, string memory message, string memory keyword) public;
        function getAllTransactions() public view returns (TransferStruct[] memory);
        function getTransactionCount() public view returns (uint256);
    }
}

impl From<TransferLedger::TransferStruct> for RawRecord {
    fn from(raw: TransferLedger::TransferStruct) -> Self {
        Self {
            sender: raw.sender,
            receiver: raw.receiver,
            amount: raw.amount,
            message: raw.message,
            keyword: raw.keyword,
            timestamp: u64::try_from(raw.timestamp).unwrap_or(u64::MAX),
        }
    }
}

/// [`LedgerContract`] backed by the on-chain transfers contract.
pub struct RpcLedger {
    read_providers: Vec<DynProvider>,
    write_provider: DynProvider,
    contract_address: Address,
    timeout_duration: Duration,
}

impl RpcLedger {
    /// Build a ledger from a chain client and the signer used for appends.
    /// The contract address comes from the chain configuration.
    pub fn new(client: &ChainClient, signer: &SessionSigner) -> Result<Self, LedgerError> {
        let contract_address: Address = client
            .config()
            .contract_address
            .parse()
            .map_err(|e| LedgerError::Rpc(format!("invalid contract address: {}", e)))?;

        let write_provider = client
            .with_signer(signer)
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        tracing::info!(contract = %contract_address, "Ledger contract bound");

        Ok(Self {
            read_providers: client.providers().to_vec(),
            write_provider,
            contract_address,
            timeout_duration: client.timeout(),
        })
    }
}

#[async_trait]
impl LedgerContract for RpcLedger {
    async fn list_all(&self) -> Result<Vec<RawRecord>, LedgerError> {
        for (i, provider) in self.read_providers.iter().enumerate() {
            let contract = TransferLedger::new(self.contract_address, provider.clone());
            match timeout(self.timeout_duration, contract.getAllTransactions().call()).await {
                Ok(Ok(raw)) => {
                    return Ok(raw.into_iter().map(RawRecord::from).collect());
                }
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "Ledger read failed, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "Ledger read timed out, trying next provider");
                }
            }
        }
        Err(LedgerError::Rpc("all RPC providers failed".to_string()))
    }

    async fn count(&self) -> Result<u64, LedgerError> {
        for (i, provider) in self.read_providers.iter().enumerate() {
            let contract = TransferLedger::new(self.contract_address, provider.clone());
            match timeout(self.timeout_duration, contract.getTransactionCount().call()).await {
                Ok(Ok(count)) => {
                    return u64::try_from(count).map_err(|_| {
                        LedgerError::Decode(format!("transaction count {} exceeds u64", count))
                    });
                }
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "Ledger count failed, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "Ledger count timed out, trying next provider");
                }
            }
        }
        Err(LedgerError::Rpc("all RPC providers failed".to_string()))
    }

    async fn append(&self, request: AppendRequest) -> Result<PendingAppend, LedgerError> {
        let contract = TransferLedger::new(self.contract_address, self.write_provider.clone());
        let call = contract.addToBlockchain(
            request.receiver,
            request.amount,
            request.message.clone(),
            request.keyword.clone(),
        );

        let pending = timeout(self.timeout_duration, call.send())
            .await
            .map_err(|_| LedgerError::Rpc("append broadcast timed out".to_string()))?
            .map_err(|e| LedgerError::Rpc(format!("append broadcast failed: {}", e)))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, receiver = %request.receiver, "Ledger append broadcast");

        let confirm = async move {
            let receipt = pending
                .get_receipt()
                .await
                .map_err(|e| LedgerError::ConfirmationTimeout(e.to_string()))?;
            if !receipt.status() {
                return Err(LedgerError::Reverted(format!(
                    "transaction {} reverted",
                    receipt.transaction_hash
                )));
            }
            Ok(())
        }
        .boxed();

        Ok(PendingAppend::new(tx_hash, confirm))
    }
}

impl std::fmt::Debug for RpcLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcLedger")
            .field("contract_address", &self.contract_address)
            .field("providers", &self.read_providers.len())
            .finish()
    }
}
