use crate::domain::{DomainError, DomainResult};
use bip39::{Language, Mnemonic};

/// Parse and checksum-validate a BIP-39 phrase
pub fn parse_mnemonic(phrase: &str) -> DomainResult<Mnemonic> {
    Mnemonic::parse_in(Language::English, phrase)
        .map_err(|e| DomainError::InvalidMnemonic(format!("Invalid mnemonic: {}", e)))
}

/// Validate a mnemonic phrase
pub fn validate_mnemonic(phrase: &str) -> DomainResult<()> {
    parse_mnemonic(phrase)?;
    Ok(())
}

/// Normalize a mnemonic phrase (trim whitespace, lowercase, etc.)
pub fn normalize_mnemonic(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str =
        "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

    #[test]
    fn test_validate_mnemonic() {
        assert!(validate_mnemonic(TEST_MNEMONIC).is_ok());
        assert!(validate_mnemonic("invalid mnemonic phrase").is_err());
        assert!(validate_mnemonic("").is_err());
    }

    #[test]
    fn test_checksum_failure() {
        // Same words, last one swapped so the checksum bits no longer match
        let bad = "bottom drive obey lake curtain smoke basket hold race lonely fit zoo";
        assert!(validate_mnemonic(bad).is_err());
    }

    #[test]
    fn test_normalize_mnemonic() {
        let messy = "  bottom   drive  obey\nlake  curtain   smoke  ";
        let normalized = normalize_mnemonic(messy);
        assert_eq!(normalized, "bottom drive obey lake curtain smoke");

        let with_caps = "Bottom DRIVE Obey";
        let normalized = normalize_mnemonic(with_caps);
        assert_eq!(normalized, "bottom drive obey");
    }

    #[test]
    fn test_seed_is_deterministic() {
        let seed1 = parse_mnemonic(TEST_MNEMONIC).unwrap().to_seed("");
        let seed2 = parse_mnemonic(TEST_MNEMONIC).unwrap().to_seed("");
        assert_eq!(seed1, seed2);
        assert_eq!(seed1.len(), 64);
    }
}
