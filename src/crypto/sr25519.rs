use crate::crypto::mnemonic::validate_mnemonic;
use crate::domain::{DomainError, DomainResult, MatrixchainAccount, MATRIXCHAIN_SS58_FORMAT};
use sp_core::{
    crypto::{Pair as PairTrait, Ss58AddressFormat, Ss58Codec},
    sr25519::{Pair, Public},
};

/// Sr25519 key operations
pub struct Sr25519;

impl Sr25519 {
    /// Derive the Matrixchain sr25519 account. The mnemonic is used as the
    /// seed source directly, with a blank derivation path.
    pub fn derive(mnemonic: &str) -> DomainResult<MatrixchainAccount> {
        validate_mnemonic(mnemonic)?;

        let pair = Self::from_phrase(mnemonic)?;
        let public = Self::public_key(&pair);

        let public_ref: &[u8] = public.as_ref();
        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(public_ref);

        Ok(MatrixchainAccount {
            ss58_address: Self::to_ss58_address(&public),
            public_key,
        })
    }

    /// Generate a keypair from a mnemonic phrase (no child derivation)
    pub fn from_phrase(phrase: &str) -> DomainResult<Pair> {
        Pair::from_string(phrase, None)
            .map_err(|e| DomainError::Derivation(format!("sr25519 from mnemonic failed: {:?}", e)))
    }

    /// Get public key from pair
    pub fn public_key(pair: &Pair) -> Public {
        pair.public()
    }

    /// Convert public key to SS58 address under the Matrixchain format
    pub fn to_ss58_address(public: &Public) -> String {
        public.to_ss58check_with_version(Ss58AddressFormat::custom(MATRIXCHAIN_SS58_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str =
        "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

    #[test]
    fn test_deterministic_derivation() {
        let account1 = Sr25519::derive(TEST_MNEMONIC).unwrap();
        let account2 = Sr25519::derive(TEST_MNEMONIC).unwrap();

        assert_eq!(account1.ss58_address, account2.ss58_address);
        assert_eq!(account1.public_key, account2.public_key);
    }

    #[test]
    fn test_address_decodes_under_matrixchain_format() {
        let account = Sr25519::derive(TEST_MNEMONIC).unwrap();

        let (decoded, format) =
            Public::from_ss58check_with_version(&account.ss58_address).unwrap();
        assert_eq!(format, Ss58AddressFormat::custom(MATRIXCHAIN_SS58_FORMAT));

        let decoded_ref: &[u8] = decoded.as_ref();
        assert_eq!(decoded_ref, account.public_key);
    }

    #[test]
    fn test_invalid_mnemonic_rejected() {
        let result = Sr25519::derive("invalid mnemonic phrase");
        assert!(matches!(
            result,
            Err(crate::domain::DomainError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_blank_path_differs_from_derived() {
        // A hard-derived child must not collide with the blank-path key
        let root = Sr25519::from_phrase(TEST_MNEMONIC).unwrap();
        let child = Sr25519::from_phrase(&format!("{}//0", TEST_MNEMONIC)).unwrap();
        assert_ne!(root.public(), child.public());
    }
}
