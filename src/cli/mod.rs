pub mod commands;
pub mod output;

pub use commands::{handle_derive_command, handle_keystore_command, DeriveArgs, KeystoreCommands};
