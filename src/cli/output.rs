use crate::application::WalletAccounts;
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Address report for display. The mnemonic never appears here; the snap
/// seed is included only when explicitly requested.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddressReport {
    pub ethereum_address: String,
    pub matrixchain_address: String,
    pub matrixchain_public_key: String,
    pub snap_address: String,
    pub snap_public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_private_key: Option<String>,
}

impl AddressReport {
    pub fn new(accounts: &WalletAccounts, show_secret: bool) -> Self {
        Self {
            ethereum_address: accounts.ethereum.address.clone(),
            matrixchain_address: accounts.matrixchain.ss58_address.clone(),
            matrixchain_public_key: format!("0x{}", hex::encode(accounts.matrixchain.public_key)),
            snap_address: accounts.snap.ss58_address.clone(),
            snap_public_key: format!("0x{}", hex::encode(accounts.snap.public_key)),
            snap_private_key: show_secret
                .then(|| format!("0x{}", hex::encode(accounts.snap.seed_bytes()))),
        }
    }
}

pub fn print_address_report(report: &AddressReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report).unwrap());
        }
        OutputFormat::Text => {
            println!("Ethereum (m/44'/60'/0'/0/0):\n  {}", report.ethereum_address);
            println!(
                "Matrixchain sr25519 (blank derivation):\n  {}",
                report.matrixchain_address
            );
            println!("  Public key: {}", report.matrixchain_public_key);
            println!(
                "Snap ed25519 (m/44'/1155' seed logic):\n  {}",
                report.snap_address
            );
            println!("  Public key: {}", report.snap_public_key);
            if let Some(secret) = &report.snap_private_key {
                println!("  Private key (hex seed): {}", secret);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::KeyDerivation;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_secret_hidden_by_default() {
        let accounts = KeyDerivation::derive_all(TEST_MNEMONIC).unwrap();
        let report = AddressReport::new(&accounts, false);

        assert!(report.snap_private_key.is_none());
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("snap_private_key"));
    }

    #[test]
    fn test_secret_shown_on_request() {
        let accounts = KeyDerivation::derive_all(TEST_MNEMONIC).unwrap();
        let report = AddressReport::new(&accounts, true);

        let secret = report.snap_private_key.as_deref().unwrap();
        assert!(secret.starts_with("0x"));
        // 32 seed bytes render as 64 hex digits
        assert_eq!(secret.len(), 66);
    }
}
