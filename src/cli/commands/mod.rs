pub mod derive;
pub mod keystore;

pub use derive::{handle_derive_command, DeriveArgs};
pub use keystore::{handle_keystore_command, KeystoreCommands};
