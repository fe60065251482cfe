//! secp256k1 crypto operations for the Ethereum account
//!
//! Implements BIP-32/BIP-44 hierarchical deterministic key derivation at the
//! standard Ethereum path m/44'/60'/0'/0/0 and EIP-55 checksum address
//! formatting.

use crate::crypto::mnemonic::parse_mnemonic;
use crate::domain::{Bip44Path, DomainError, DomainResult, EthereumAccount};
use bip32::XPrv;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};
use zeroize::Zeroize;

/// Ethereum key operations
pub struct Ethereum;

impl Ethereum {
    /// Derive the Ethereum account at m/44'/60'/0'/0/0
    pub fn derive(mnemonic: &str) -> DomainResult<EthereumAccount> {
        let private_key = Self::derive_private_key(mnemonic, &Bip44Path::ethereum())?;
        let address_bytes = Self::raw_address(&private_key)?;
        let address = Self::checksum_address(&address_bytes);

        Ok(EthereumAccount::new(address, private_key))
    }

    /// Derive the raw 32-byte private scalar for a BIP-32 path
    pub fn derive_private_key(mnemonic: &str, path: &Bip44Path) -> DomainResult<[u8; 32]> {
        let mnemonic = parse_mnemonic(mnemonic)?;
        let mut seed = mnemonic.to_seed("");

        let derivation_path = path
            .to_string_path()
            .parse()
            .map_err(|e| DomainError::Derivation(format!("Invalid derivation path: {:?}", e)))?;

        let child_xprv = XPrv::derive_from_path(&seed, &derivation_path)
            .map_err(|e| DomainError::Derivation(format!("BIP-32 derivation failed: {}", e)))?;
        seed.zeroize();

        let private_key_bytes = child_xprv.private_key().to_bytes();
        if private_key_bytes.len() != 32 {
            return Err(DomainError::Derivation(format!(
                "Invalid private key length: {} (expected 32)",
                private_key_bytes.len()
            )));
        }

        let mut key_bytes = [0u8; 32];
        key_bytes.copy_from_slice(&private_key_bytes);
        Ok(key_bytes)
    }

    /// Raw 20-byte Ethereum address: last 20 bytes of keccak-256 over the
    /// uncompressed public key without the 0x04 prefix
    pub fn raw_address(private_key: &[u8; 32]) -> DomainResult<[u8; 20]> {
        let secp = Secp256k1::new();
        let secret_key = SecretKey::from_byte_array(*private_key)
            .map_err(|e| DomainError::Derivation(format!("Invalid secp256k1 key: {}", e)))?;
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);

        let uncompressed = public_key.serialize_uncompressed();

        let mut hasher = Keccak256::new();
        hasher.update(&uncompressed[1..]);
        let hash = hasher.finalize();

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        Ok(address)
    }

    /// EIP-55 checksum casing: a hex letter is uppercased when the
    /// corresponding nibble of keccak-256 over the lowercase address is >= 8
    pub fn checksum_address(address: &[u8; 20]) -> String {
        let lower = hex::encode(address);

        let mut hasher = Keccak256::new();
        hasher.update(lower.as_bytes());
        let hash = hasher.finalize();

        let mut checksummed = String::with_capacity(42);
        checksummed.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                checksummed.push(c.to_ascii_uppercase());
            } else {
                checksummed.push(c);
            }
        }
        checksummed
    }
}
