use crate::crypto::SnapEd25519;
use crate::domain::{DomainError, DomainResult};
use crate::storage::{KeystoreWriter, SubstrateKeystore, Web3Keystore};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Keystore file format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystoreFormat {
    /// scrypt + xsalsa20-poly1305 over a PKCS8 envelope
    Substrate,
    /// Web3 Secret Storage Definition v3
    Web3,
}

impl KeystoreFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substrate => "substrate",
            Self::Web3 => "web3",
        }
    }
}

impl FromStr for KeystoreFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substrate" | "polkadot" => Ok(Self::Substrate),
            "web3" | "ethereum" => Ok(Self::Web3),
            _ => Err(DomainError::Encoding(format!(
                "Unknown keystore format: {} (expected substrate or web3)",
                s
            ))),
        }
    }
}

/// Keystore export use case: derive the snap account and write an encrypted
/// keystore file for it
pub struct KeystoreExport;

impl KeystoreExport {
    /// Export the snap account keystore in the chosen format.
    /// Returns the path of the written file.
    pub fn export(
        mnemonic: &str,
        format: KeystoreFormat,
        password: &str,
        output_dir: &Path,
        name: &str,
    ) -> DomainResult<PathBuf> {
        if password.is_empty() {
            return Err(DomainError::EmptyPassword);
        }

        let snap = SnapEd25519::derive(mnemonic)?;

        match format {
            KeystoreFormat::Substrate => {
                let record = SubstrateKeystore::encrypt(
                    snap.seed_bytes(),
                    &snap.public_key,
                    &snap.ss58_address,
                    name,
                    password,
                )?;
                KeystoreWriter::write_substrate(&record, output_dir)
            }
            KeystoreFormat::Web3 => {
                let record = Web3Keystore::encrypt(snap.seed_bytes(), password)?;
                KeystoreWriter::write_web3(&record, output_dir)
            }
        }
    }
}
