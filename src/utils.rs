use anyhow::{anyhow, Result};
use tracing::warn;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// Default slippage tolerance: 1% = 100 basis points
pub const DEFAULT_SLIPPAGE_BPS: u64 = 100;

// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

// Convert SOL to lamports
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64) as u64
}

// Validate amount is positive
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(anyhow!("Amount must be greater than zero"));
    }
    Ok(())
}

// Parse a SOL amount entered by the user
pub fn parse_sol_amount(input: &str) -> Result<f64> {
    let amount = input
        .trim()
        .parse::<f64>()
        .map_err(|_| anyhow!("Invalid amount: '{}'", input))?;
    validate_amount(amount)?;
    Ok(amount)
}

// Convert a slippage percentage to basis points (1% = 100 bps)
pub fn slippage_percent_to_bps(percent: f64) -> u64 {
    (percent * 100.0) as u64
}

// Parse the slippage prompt answer; blank or unparsable input falls back to the default
pub fn slippage_bps_from_input(input: &str) -> u64 {
    let input = input.trim();
    if input.is_empty() {
        return DEFAULT_SLIPPAGE_BPS;
    }
    match input.parse::<f64>() {
        Ok(percent) if percent.is_finite() && percent > 0.0 => slippage_percent_to_bps(percent),
        _ => {
            warn!("Invalid slippage '{}', using default 1%", input);
            DEFAULT_SLIPPAGE_BPS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sol_to_lamports_scales_by_1e9() {
        assert_eq!(sol_to_lamports(0.001), 1_000_000);
        assert_eq!(sol_to_lamports(1.0), LAMPORTS_PER_SOL);
        assert_eq!(sol_to_lamports(2.5), 2_500_000_000);
    }

    #[test]
    fn lamports_to_sol_inverts_scaling() {
        assert_eq!(lamports_to_sol(1_000_000), 0.001);
        assert_eq!(lamports_to_sol(LAMPORTS_PER_SOL), 1.0);
    }

    #[test]
    fn validate_amount_rejects_non_positive() {
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-0.5).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
        assert!(validate_amount(0.001).is_ok());
    }

    #[test]
    fn parse_sol_amount_rejects_garbage_and_non_positive() {
        assert!(parse_sol_amount("abc").is_err());
        assert!(parse_sol_amount("").is_err());
        assert!(parse_sol_amount("0").is_err());
        assert!(parse_sol_amount("-1").is_err());
        assert_eq!(parse_sol_amount(" 0.001 ").unwrap(), 0.001);
    }

    #[test]
    fn slippage_percent_converts_to_bps() {
        assert_eq!(slippage_percent_to_bps(1.0), 100);
        assert_eq!(slippage_percent_to_bps(0.5), 50);
        assert_eq!(slippage_percent_to_bps(2.0), 200);
    }

    #[test]
    fn blank_slippage_uses_default() {
        assert_eq!(slippage_bps_from_input(""), DEFAULT_SLIPPAGE_BPS);
        assert_eq!(slippage_bps_from_input("   "), DEFAULT_SLIPPAGE_BPS);
    }

    #[test]
    fn invalid_slippage_falls_back_to_default() {
        assert_eq!(slippage_bps_from_input("lots"), DEFAULT_SLIPPAGE_BPS);
        assert_eq!(slippage_bps_from_input("-1"), DEFAULT_SLIPPAGE_BPS);
        assert_eq!(slippage_bps_from_input("0.5"), 50);
    }
}
