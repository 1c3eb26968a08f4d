use crate::confirm;
use crate::models::{SwapOutcome, SwapParams, Wallet};
use crate::utils;
use crate::wallet;
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use reqwest::Client;
use solana_client::{rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    signature::{Signature, Signer},
    transaction::VersionedTransaction,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

// Jupiter API URLs
const JUPITER_QUOTE_API_URL: &str = "https://quote-api.jup.ag/v6/quote";
const JUPITER_SWAP_API_URL: &str = "https://quote-api.jup.ag/v6/swap";

// Native SOL mint, the input side of every buy
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// Jupiter quote response
#[derive(Deserialize, Serialize, Debug)]
pub struct QuoteResponse {
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "otherAmountThreshold")]
    pub other_amount_threshold: String,
    #[serde(rename = "swapMode")]
    pub swap_mode: String,
    #[serde(rename = "slippageBps")]
    pub slippage_bps: u64,
    #[serde(rename = "platformFee", default)]
    pub platform_fee: Option<serde_json::Value>,
    #[serde(rename = "priceImpactPct", default)]
    pub price_impact_pct: Option<String>,
    #[serde(rename = "routePlan")]
    pub route_plan: Vec<RoutePlanStep>,
    #[serde(rename = "contextSlot", default)]
    pub context_slot: Option<u64>,
    #[serde(rename = "timeTaken", default)]
    pub time_taken: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RoutePlanStep {
    #[serde(rename = "swapInfo")]
    pub swap_info: RouteSwapInfo,
    pub percent: u8,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RouteSwapInfo {
    #[serde(rename = "ammKey")]
    pub amm_key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "feeAmount")]
    pub fee_amount: String,
    #[serde(rename = "feeMint")]
    pub fee_mint: String,
}

// Jupiter swap-build request
#[derive(Serialize, Debug)]
struct JupiterSwapRequest<'a> {
    #[serde(rename = "quoteResponse")]
    quote_response: &'a QuoteResponse,
    #[serde(rename = "userPublicKey")]
    user_public_key: String,
    #[serde(rename = "wrapAndUnwrapSol")]
    wrap_and_unwrap_sol: bool,
    #[serde(rename = "dynamicComputeUnitLimit")]
    dynamic_compute_unit_limit: bool,
    #[serde(rename = "prioritizationFeeLamports")]
    prioritization_fee_lamports: &'a str,
}

// Jupiter swap-build response
#[derive(Deserialize, Debug)]
pub struct JupiterSwapResponse {
    #[serde(rename = "swapTransaction")]
    pub swap_transaction: String,
    #[serde(rename = "lastValidBlockHeight", default)]
    pub last_valid_block_height: Option<u64>,
}

// Parse a quote body, rejecting quotes with no viable route
fn parse_quote(body: &str) -> Result<QuoteResponse> {
    let quote: QuoteResponse = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse Jupiter quote response: {}", e))?;

    if quote.route_plan.is_empty() {
        return Err(anyhow!(
            "Jupiter returned no viable route for {} -> {}",
            quote.input_mint,
            quote.output_mint
        ));
    }

    Ok(quote)
}

// Get a swap quote from Jupiter Aggregator
pub async fn get_quote(
    client: &Client,
    input_mint: &str,
    output_mint: &str,
    amount: u64,
    slippage_bps: u64,
) -> Result<QuoteResponse> {
    let url = format!(
        "{}?inputMint={}&outputMint={}&amount={}&slippageBps={}",
        JUPITER_QUOTE_API_URL, input_mint, output_mint, amount, slippage_bps
    );

    info!("Getting swap quote from Jupiter: {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to send request to Jupiter API: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to get error details".to_string());
        return Err(anyhow!(
            "Jupiter quote API returned error status {}: {}",
            status,
            error_text
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to read Jupiter quote response: {}", e))?;

    parse_quote(&body)
}

// Request the swap transaction built from a quote
pub async fn get_swap_transaction(
    client: &Client,
    quote: &QuoteResponse,
    user_public_key: &str,
) -> Result<JupiterSwapResponse> {
    let request = JupiterSwapRequest {
        quote_response: quote,
        user_public_key: user_public_key.to_string(),
        wrap_and_unwrap_sol: true,
        dynamic_compute_unit_limit: true,
        prioritization_fee_lamports: "auto",
    };

    info!("Requesting swap transaction from Jupiter");

    let response = client
        .post(JUPITER_SWAP_API_URL)
        .json(&request)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to request swap transaction: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to get error details".to_string());
        return Err(anyhow!(
            "Jupiter swap API returned error status {}: {}",
            status,
            error_text
        ));
    }

    response
        .json::<JupiterSwapResponse>()
        .await
        .map_err(|e| anyhow!("Failed to parse swap response: {}", e))
}

// Decode the base64 transaction blob and install the wallet's signature
pub fn sign_swap_transaction(
    swap_transaction_b64: &str,
    wallet: &Wallet,
) -> Result<VersionedTransaction> {
    let transaction_data = BASE64
        .decode(swap_transaction_b64)
        .map_err(|e| anyhow!("Failed to decode transaction: {}", e))?;

    let mut transaction: VersionedTransaction = bincode::deserialize(&transaction_data)
        .map_err(|e| anyhow!("Failed to deserialize transaction: {}", e))?;

    let message_bytes = transaction.message.serialize();
    let signature = wallet
        .keypair
        .try_sign_message(&message_bytes)
        .map_err(|e| anyhow!("Failed to sign transaction: {}", e))?;
    transaction.signatures = vec![signature];

    Ok(transaction)
}

// Submit the signed transaction with preflight at confirmed commitment
pub fn submit_transaction(
    rpc_client: &RpcClient,
    transaction: &VersionedTransaction,
) -> Result<Signature> {
    let config = RpcSendTransactionConfig {
        skip_preflight: false,
        preflight_commitment: Some(CommitmentLevel::Confirmed),
        max_retries: Some(3),
        ..RpcSendTransactionConfig::default()
    };

    rpc_client
        .send_transaction_with_config(transaction, config)
        .map_err(|e| anyhow!("Failed to send transaction: {}", e))
}

// Buy a token with SOL through the Jupiter aggregator: quote, build, sign,
// submit, then wait for finalization.
pub async fn buy_token_with_sol(wallet: &Wallet, params: &SwapParams) -> Result<SwapOutcome> {
    utils::validate_amount(params.sol_amount)?;
    let output_mint = wallet::parse_mint(&params.output_mint)?;
    let amount_lamports = utils::sol_to_lamports(params.sol_amount);

    info!(
        "Buying {} SOL worth of {} (slippage {} bps)",
        params.sol_amount, output_mint, params.slippage_bps
    );

    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

    let quote = get_quote(
        &client,
        SOL_MINT,
        &output_mint.to_string(),
        amount_lamports,
        params.slippage_bps,
    )
    .await?;

    info!(
        "Quote received: in {} SOL, out {} (raw units), price impact {}%",
        utils::lamports_to_sol(quote.in_amount.parse().unwrap_or(amount_lamports)),
        quote.out_amount,
        quote.price_impact_pct.as_deref().unwrap_or("N/A")
    );

    let swap_response = get_swap_transaction(&client, &quote, &wallet.pubkey.to_string()).await?;

    info!("Decoding and signing transaction");
    let transaction = sign_swap_transaction(&swap_response.swap_transaction, wallet)?;

    let rpc_client = RpcClient::new_with_commitment(
        wallet::get_rpc_url(),
        CommitmentConfig::confirmed(),
    );

    info!("Sending transaction to the network");
    let signature = submit_transaction(&rpc_client, &transaction)?;
    info!("Transaction sent with signature: {}", signature);

    let status = confirm::wait_for_finalization(
        &rpc_client,
        &signature,
        confirm::DEFAULT_CONFIRM_TIMEOUT,
        confirm::DEFAULT_POLL_INTERVAL,
    )
    .await?;

    Ok(SwapOutcome {
        transaction_signature: signature.to_string(),
        in_amount_sol: params.sol_amount,
        out_amount: quote.out_amount,
        price_impact_pct: quote.price_impact_pct,
        status,
        timestamp: Utc::now(),
    })
}
