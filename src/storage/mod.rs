pub mod keystore_writer;
pub mod mnemonic_reader;
pub mod substrate_format;
pub mod web3_format;

// Re-export commonly used items
pub use keystore_writer::KeystoreWriter;
pub use mnemonic_reader::MnemonicReader;
pub use substrate_format::SubstrateKeystore;
pub use web3_format::{KdfConfig, Web3Keystore};
