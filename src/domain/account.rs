use std::fmt;

use zeroize::Zeroize;

/// Ethereum account derived at the standard BIP-44 path
#[derive(Clone)]
pub struct EthereumAccount {
    /// EIP-55 checksum-cased address (0x-prefixed)
    pub address: String,
    private_key: [u8; 32],
}

impl EthereumAccount {
    pub fn new(address: String, private_key: [u8; 32]) -> Self {
        Self {
            address,
            private_key,
        }
    }

    /// Raw secp256k1 private key bytes
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }
}

impl Drop for EthereumAccount {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl fmt::Debug for EthereumAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthereumAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Matrixchain sr25519 account (blank derivation path)
#[derive(Debug, Clone)]
pub struct MatrixchainAccount {
    /// SS58 address under network format 1110
    pub ss58_address: String,
    /// sr25519 public key
    pub public_key: [u8; 32],
}

/// Snap ed25519 account, derived with the wallet extension's
/// non-standard seed construction
#[derive(Clone)]
pub struct SnapAccount {
    /// SS58 address under network format 1110
    pub ss58_address: String,
    /// ed25519 public key
    pub public_key: [u8; 32],
    seed_bytes: [u8; 32],
}

impl SnapAccount {
    pub fn new(ss58_address: String, public_key: [u8; 32], seed_bytes: [u8; 32]) -> Self {
        Self {
            ss58_address,
            public_key,
            seed_bytes,
        }
    }

    /// The 32-byte ed25519 seed. These bytes are the ASCII rendering of a
    /// truncated hex string, not a raw scalar (see `crypto::snap_ed25519`).
    pub fn seed_bytes(&self) -> &[u8; 32] {
        &self.seed_bytes
    }
}

impl Drop for SnapAccount {
    fn drop(&mut self) {
        self.seed_bytes.zeroize();
    }
}

impl fmt::Debug for SnapAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapAccount")
            .field("ss58_address", &self.ss58_address)
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let account = EthereumAccount::new("0xabc".to_string(), [7u8; 32]);
        let rendered = format!("{:?}", account);
        assert!(rendered.contains("0xabc"));
        assert!(!rendered.contains("private_key"));

        let snap = SnapAccount::new("efT...".to_string(), [1u8; 32], [2u8; 32]);
        let rendered = format!("{:?}", snap);
        assert!(!rendered.contains("seed_bytes"));
    }

    #[test]
    fn test_accessors() {
        let account = EthereumAccount::new("0xabc".to_string(), [7u8; 32]);
        assert_eq!(account.private_key(), &[7u8; 32]);

        let snap = SnapAccount::new("efT...".to_string(), [1u8; 32], [2u8; 32]);
        assert_eq!(snap.seed_bytes(), &[2u8; 32]);
        assert_eq!(snap.public_key, [1u8; 32]);
    }
}
