//! Keystore file writing utilities

use crate::domain::DomainResult;
use crate::storage::substrate_format::SubstrateKeystore;
use crate::storage::web3_format::Web3Keystore;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Write keystore records to disk
pub struct KeystoreWriter;

impl KeystoreWriter {
    /// Write a Substrate-style keystore as
    /// `matrixchain-snap-keystore-<addr8>-<ts>.json`
    pub fn write_substrate(
        record: &SubstrateKeystore,
        output_dir: &Path,
    ) -> DomainResult<PathBuf> {
        let filename = Self::filename("matrixchain-snap-keystore", &record.address);
        Self::write_json(&record.to_json()?, output_dir, &filename)
    }

    /// Write a Web3-style keystore as
    /// `matrixchain-snap-keystore-web3-<addr8>-<ts>.json`
    pub fn write_web3(record: &Web3Keystore, output_dir: &Path) -> DomainResult<PathBuf> {
        let filename = Self::filename("matrixchain-snap-keystore-web3", &record.address);
        Self::write_json(&record.to_json()?, output_dir, &filename)
    }

    fn filename(prefix: &str, address: &str) -> String {
        let addr8: String = address.chars().take(8).collect();
        format!("{}-{}-{}.json", prefix, addr8, Utc::now().timestamp())
    }

    fn write_json(json: &str, output_dir: &Path, filename: &str) -> DomainResult<PathBuf> {
        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir)?;
        }

        let path = output_dir.join(filename);
        std::fs::write(&path, json)?;

        // Restrictive permissions: the file holds encrypted key material
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
