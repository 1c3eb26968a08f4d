use crate::models::ConfirmationStatus;
use anyhow::{anyhow, Result};
use solana_client::rpc_client::RpcClient;
use solana_sdk::signature::Signature;
use solana_transaction_status::TransactionConfirmationStatus;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

// Poll the network until the transaction finalizes, fails on-chain, or the
// timeout elapses. A single best-effort wait, no resubmission.
pub async fn wait_for_finalization(
    rpc_client: &RpcClient,
    signature: &Signature,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<ConfirmationStatus> {
    let start = Instant::now();
    info!("Waiting for confirmation of {}", signature);

    loop {
        let statuses = rpc_client
            .get_signature_statuses(&[*signature])
            .map_err(|e| anyhow!("Failed to query transaction status: {}", e))?;

        if let Some(Some(status)) = statuses.value.into_iter().next() {
            if let Some(err) = status.err {
                warn!("Transaction {} failed on-chain: {:?}", signature, err);
                return Ok(ConfirmationStatus::Failed);
            }

            match status.confirmation_status {
                Some(TransactionConfirmationStatus::Finalized) => {
                    info!("Transaction {} finalized", signature);
                    return Ok(ConfirmationStatus::Finalized);
                }
                other => {
                    info!("Transaction {} status: {:?}", signature, other);
                }
            }
        }

        if start.elapsed() >= timeout {
            warn!(
                "Timed out after {:?} waiting for {} to finalize",
                timeout, signature
            );
            return Ok(ConfirmationStatus::TimedOut);
        }

        tokio::time::sleep(poll_interval).await;
    }
}
