//! ed25519 derivation replicating the snap wallet extension's account logic
//!
//! The extension builds its ed25519 seed in an unusual way:
//!
//!   BIP-39 seed → SLIP-10 secp256k1 at m/44'/1155' → 0x-prefixed hex →
//!   first 32 characters → ASCII bytes → ed25519 seed
//!
//! The 32-*character* slice (rather than 32 bytes) keeps only "0x" plus 30
//! hex digits and throws away most of the derived entropy. That behavior is
//! inherited from the extension and must be reproduced byte-for-byte so that
//! exported keys import into the same wallet. Do not "fix" it here.

use crate::crypto::ethereum::Ethereum;
use crate::domain::{Bip44Path, DomainError, DomainResult, SnapAccount, MATRIXCHAIN_SS58_FORMAT};
use sp_core::{
    crypto::{Pair as PairTrait, Ss58AddressFormat, Ss58Codec},
    ed25519::Pair,
};
use zeroize::Zeroize;

/// Snap ed25519 key operations
pub struct SnapEd25519;

impl SnapEd25519 {
    /// Derive the snap account from a mnemonic
    pub fn derive(mnemonic: &str) -> DomainResult<SnapAccount> {
        let seed_bytes = Self::truncated_seed(mnemonic)?;

        let pair = Pair::from_seed(&seed_bytes);
        let public = pair.public();

        let public_ref: &[u8] = public.as_ref();
        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(public_ref);

        let ss58_address =
            public.to_ss58check_with_version(Ss58AddressFormat::custom(MATRIXCHAIN_SS58_FORMAT));

        Ok(SnapAccount::new(ss58_address, public_key, seed_bytes))
    }

    /// Build the 32-byte ed25519 seed the way the extension does.
    ///
    /// Steps 3-5 operate on the *text* of the private key, not its bytes:
    /// the seed is the ASCII string `"0x" + first 30 hex digits`, exactly
    /// 32 bytes long.
    pub fn truncated_seed(mnemonic: &str) -> DomainResult<[u8; 32]> {
        // Steps 1-2: BIP-39 seed, then SLIP-10 secp256k1 at m/44'/1155'
        let mut scalar = Ethereum::derive_private_key(mnemonic, &Bip44Path::snap())?;

        // Step 3: 0x-prefixed lowercase hex, 66 characters
        let mut private_key_hex = format!("0x{}", hex::encode(scalar));
        scalar.zeroize();

        // Steps 4-5: first 32 characters, reinterpreted as ASCII bytes
        let seed_slice = private_key_hex[..32].as_bytes();
        let seed_len = seed_slice.len();
        if seed_len != 32 {
            private_key_hex.zeroize();
            return Err(DomainError::Derivation(format!(
                "Truncated seed is {} bytes (expected 32)",
                seed_len
            )));
        }

        let mut seed_bytes = [0u8; 32];
        seed_bytes.copy_from_slice(seed_slice);
        private_key_hex.zeroize();

        Ok(seed_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_deterministic_derivation() {
        let account1 = SnapEd25519::derive(TEST_MNEMONIC).unwrap();
        let account2 = SnapEd25519::derive(TEST_MNEMONIC).unwrap();

        assert_eq!(account1.ss58_address, account2.ss58_address);
        assert_eq!(account1.public_key, account2.public_key);
        assert_eq!(account1.seed_bytes(), account2.seed_bytes());
    }

    #[test]
    fn test_seed_is_truncated_hex_text() {
        // Regression-pins the inherited truncation: the seed must be the
        // ASCII rendering of "0x" plus the first 30 hex digits of the
        // m/44'/1155' scalar, not the scalar itself.
        let seed = SnapEd25519::truncated_seed(TEST_MNEMONIC).unwrap();

        let scalar =
            Ethereum::derive_private_key(TEST_MNEMONIC, &Bip44Path::snap()).unwrap();
        let expected = format!("0x{}", hex::encode(scalar));
        assert_eq!(&seed[..], &expected.as_bytes()[..32]);

        assert_eq!(&seed[..2], &b"0x"[..]);
        assert!(seed[2..]
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b)));
    }

    #[test]
    fn test_address_decodes_under_matrixchain_format() {
        use sp_core::ed25519::Public;

        let account = SnapEd25519::derive(TEST_MNEMONIC).unwrap();

        let (decoded, format) =
            Public::from_ss58check_with_version(&account.ss58_address).unwrap();
        assert_eq!(format, Ss58AddressFormat::custom(MATRIXCHAIN_SS58_FORMAT));

        let decoded_ref: &[u8] = decoded.as_ref();
        assert_eq!(decoded_ref, account.public_key);
    }

    #[test]
    fn test_public_key_matches_seed() {
        let account = SnapEd25519::derive(TEST_MNEMONIC).unwrap();
        let pair = Pair::from_seed(account.seed_bytes());

        let public = pair.public();
        let public_ref: &[u8] = public.as_ref();
        assert_eq!(public_ref, account.public_key);
    }

    #[test]
    fn test_invalid_mnemonic_rejected() {
        let result = SnapEd25519::derive("not a valid phrase at all");
        assert!(matches!(
            result,
            Err(crate::domain::DomainError::InvalidMnemonic(_))
        ));
    }
}
