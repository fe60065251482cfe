use std::path::PathBuf;
use thiserror::Error;

/// Domain-level errors for matrixchain-cli operations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Keystore encoding failed: {0}")]
    Encoding(String),

    #[error("Invalid keystore: {reason}")]
    InvalidKeystore {
        reason: String,
    },

    #[error("Incorrect password or corrupted keystore")]
    IncorrectPassword,

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Mnemonic file not found: {}", .path.display())]
    MnemonicFileNotFound {
        path: PathBuf,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

pub type DomainResult<T> = Result<T, DomainError>;
