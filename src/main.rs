use anyhow::{anyhow, Result};
use solana_swap_cli::models::{ConfirmationStatus, SwapParams};
use solana_swap_cli::{swap, utils, wallet};
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn run() -> Result<()> {
    // Load the wallet before prompting so a bad config fails fast
    let wallet = wallet::load_wallet(wallet::wallet_file_path())?;
    info!("Wallet loaded. Public key: {}", wallet.pubkey);

    let output_mint = prompt("Enter the mint address of the token you want to buy: ")?;
    wallet::parse_mint(&output_mint)?;

    let amount_input = prompt("Enter the amount of SOL to swap: ")?;
    let sol_amount = utils::parse_sol_amount(&amount_input)?;

    let slippage_input = prompt("Enter slippage tolerance in % (default 1%): ")?;
    let slippage_bps = utils::slippage_bps_from_input(&slippage_input);

    let params = SwapParams {
        output_mint,
        sol_amount,
        slippage_bps,
    };

    let outcome = swap::buy_token_with_sol(&wallet, &params).await?;

    println!("Signature: {}", outcome.transaction_signature);
    println!(
        "View on Solscan: https://solscan.io/tx/{}",
        outcome.transaction_signature
    );

    match outcome.status {
        ConfirmationStatus::Finalized => {
            println!("Token purchase completed successfully!");
            Ok(())
        }
        ConfirmationStatus::Failed => Err(anyhow!(
            "Transaction {} failed on-chain",
            outcome.transaction_signature
        )),
        ConfirmationStatus::TimedOut => Err(anyhow!(
            "Timed out waiting for transaction {} to finalize",
            outcome.transaction_signature
        )),
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        error!("Token purchase failed: {:#}", err);
        std::process::exit(1);
    }
}
