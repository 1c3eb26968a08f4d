use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
};
use std::fmt;

// Wallet structure (private key never exposed)
#[derive(Debug)]
pub struct Wallet {
    pub keypair: Keypair,
    pub pubkey: Pubkey,
}

// Parameters for a single buy, collected from the CLI
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub output_mint: String,
    pub sol_amount: f64,
    pub slippage_bps: u64,
}

// Terminal state of a submitted transaction
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum ConfirmationStatus {
    Finalized,
    Failed,
    TimedOut,
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmationStatus::Finalized => write!(f, "finalized"),
            ConfirmationStatus::Failed => write!(f, "failed"),
            ConfirmationStatus::TimedOut => write!(f, "timed out"),
        }
    }
}

// Swap outcome reported to the user
#[derive(Serialize, Debug)]
pub struct SwapOutcome {
    pub transaction_signature: String,
    pub in_amount_sol: f64,
    // Raw token units, as returned by the aggregator
    pub out_amount: String,
    pub price_impact_pct: Option<String>,
    pub status: ConfirmationStatus,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_status_displays_lowercase() {
        assert_eq!(ConfirmationStatus::Finalized.to_string(), "finalized");
        assert_eq!(ConfirmationStatus::Failed.to_string(), "failed");
        assert_eq!(ConfirmationStatus::TimedOut.to_string(), "timed out");
    }
}
