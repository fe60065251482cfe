pub mod account;
pub mod derivation;
pub mod error;

/// SS58 network format for Matrixchain addresses. Both the sr25519 and the
/// snap ed25519 address use this registry value; changing it breaks wallet
/// compatibility.
pub const MATRIXCHAIN_SS58_FORMAT: u16 = 1110;

// Re-export commonly used types
pub use account::{EthereumAccount, MatrixchainAccount, SnapAccount};
pub use derivation::{Bip44Path, PathComponent};
pub use error::{DomainError, DomainResult};
