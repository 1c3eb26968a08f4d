use crate::models::Wallet;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::fs;
use std::path::Path;
use std::str::FromStr;

// Constants
const SOLANA_MAINNET_URL: &str = "https://api.mainnet-beta.solana.com";
const DEFAULT_WALLET_FILE: &str = "wallet.json";

// Expected wallet.json shape:
// { "secretKey": "<base58 string>" } or { "secretKey": [byte, byte, ...] }
#[derive(Deserialize, Debug)]
struct WalletFile {
    #[serde(rename = "secretKey")]
    secret_key: SecretKey,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum SecretKey {
    Base58(String),
    Bytes(Vec<u8>),
}

// Helper function to get RPC URL based on environment
pub fn get_rpc_url() -> String {
    std::env::var("SOLANA_RPC_URL").unwrap_or_else(|_| SOLANA_MAINNET_URL.to_string())
}

// Wallet file path, overridable via WALLET_FILE
pub fn wallet_file_path() -> String {
    std::env::var("WALLET_FILE").unwrap_or_else(|_| DEFAULT_WALLET_FILE.to_string())
}

// Load the signing keypair from a local wallet file
pub fn load_wallet(path: impl AsRef<Path>) -> Result<Wallet> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read wallet file {}: {}", path.display(), e))?;

    let wallet_file: WalletFile = serde_json::from_str(&contents).map_err(|e| {
        anyhow!(
            "Wallet file {} is not valid JSON with a 'secretKey' field: {}",
            path.display(),
            e
        )
    })?;

    let secret_bytes = match wallet_file.secret_key {
        SecretKey::Base58(encoded) => bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|e| anyhow!("'secretKey' is not valid base58: {}", e))?,
        SecretKey::Bytes(bytes) => bytes,
    };

    let keypair = Keypair::from_bytes(&secret_bytes)
        .map_err(|e| anyhow!("'secretKey' does not decode to a valid keypair: {}", e))?;
    let pubkey = keypair.pubkey();

    Ok(Wallet { keypair, pubkey })
}

// Validate a mint address before any network call is made
pub fn parse_mint(mint: &str) -> Result<Pubkey> {
    Pubkey::from_str(mint.trim()).map_err(|e| anyhow!("Invalid mint address '{}': {}", mint, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct TempWalletFile {
        path: PathBuf,
    }

    impl TempWalletFile {
        fn new(name: &str, contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "swap-cli-wallet-{}-{}.json",
                name,
                std::process::id()
            ));
            fs::write(&path, contents).unwrap();
            Self { path }
        }
    }

    impl Drop for TempWalletFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }

    #[test]
    fn loads_base58_secret_key() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let file = TempWalletFile::new("b58", &format!(r#"{{"secretKey": "{}"}}"#, encoded));

        let wallet = load_wallet(&file.path).unwrap();
        assert_eq!(wallet.pubkey, keypair.pubkey());
    }

    #[test]
    fn loads_byte_array_secret_key() {
        let keypair = Keypair::new();
        let bytes = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();
        let file = TempWalletFile::new("bytes", &format!(r#"{{"secretKey": {}}}"#, bytes));

        let wallet = load_wallet(&file.path).unwrap();
        assert_eq!(wallet.pubkey, keypair.pubkey());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_wallet("/definitely/not/here/wallet.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read wallet file"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let file = TempWalletFile::new("badjson", "{ not json");
        assert!(load_wallet(&file.path).is_err());
    }

    #[test]
    fn missing_secret_key_field_is_an_error() {
        let file = TempWalletFile::new("nokey", r#"{"publicKey": "abc"}"#);
        assert!(load_wallet(&file.path).is_err());
    }

    #[test]
    fn invalid_base58_is_an_error() {
        let file = TempWalletFile::new("notb58", r#"{"secretKey": "0OIl not base58"}"#);
        let err = load_wallet(&file.path).unwrap_err();
        assert!(err.to_string().contains("base58"));
    }

    #[test]
    fn wrong_length_key_is_an_error() {
        let file = TempWalletFile::new("short", r#"{"secretKey": [1, 2, 3]}"#);
        let err = load_wallet(&file.path).unwrap_err();
        assert!(err.to_string().contains("valid keypair"));
    }

    #[test]
    fn parse_mint_accepts_valid_addresses() {
        assert!(parse_mint("So11111111111111111111111111111111111111112").is_ok());
        assert!(parse_mint(" EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v ").is_ok());
    }

    #[test]
    fn parse_mint_rejects_invalid_addresses() {
        assert!(parse_mint("").is_err());
        assert!(parse_mint("not-a-mint").is_err());
    }
}
