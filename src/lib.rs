// Library exports for testing and external integration

pub mod application;
pub mod cli;
pub mod crypto;
pub mod domain;
pub mod storage;

// Re-export commonly used items
pub use application::{KeyDerivation, KeystoreExport, KeystoreFormat, WalletAccounts};
pub use domain::{
    Bip44Path, DomainError, DomainResult, EthereumAccount, MatrixchainAccount, SnapAccount,
    MATRIXCHAIN_SS58_FORMAT,
};
pub use storage::{KeystoreWriter, MnemonicReader, SubstrateKeystore, Web3Keystore};
