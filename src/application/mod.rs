pub mod key_derivation;
pub mod keystore_export;

// Re-export commonly used items
pub use key_derivation::{KeyDerivation, WalletAccounts};
pub use keystore_export::{KeystoreExport, KeystoreFormat};
