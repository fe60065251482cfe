use crate::crypto::{Ethereum, SnapEd25519, Sr25519};
use crate::domain::{DomainResult, EthereumAccount, MatrixchainAccount, SnapAccount};

/// All accounts derivable from a single recovery phrase
#[derive(Debug, Clone)]
pub struct WalletAccounts {
    pub ethereum: EthereumAccount,
    pub matrixchain: MatrixchainAccount,
    pub snap: SnapAccount,
}

/// On-demand account derivation (no file output)
pub struct KeyDerivation;

impl KeyDerivation {
    /// Derive all three accounts from a mnemonic
    pub fn derive_all(mnemonic: &str) -> DomainResult<WalletAccounts> {
        Ok(WalletAccounts {
            ethereum: Ethereum::derive(mnemonic)?,
            matrixchain: Sr25519::derive(mnemonic)?,
            snap: SnapEd25519::derive(mnemonic)?,
        })
    }
}
