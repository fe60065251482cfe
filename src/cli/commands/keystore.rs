use crate::application::{KeystoreExport, KeystoreFormat};
use crate::domain::DomainError;
use crate::storage::MnemonicReader;
use anyhow::Result;
use clap::{Args, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum KeystoreCommands {
    /// Export the snap account as an encrypted keystore file
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    /// Mnemonic file path (falls back to the MNEMONIC environment variable)
    #[arg(long)]
    pub mnemonic_file: Option<PathBuf>,

    /// Keystore format (substrate, web3)
    #[arg(long, default_value = "web3")]
    pub format: String,

    /// Read the password from a file instead of prompting
    #[arg(long)]
    pub password_file: Option<PathBuf>,

    /// Output directory for the keystore file
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Label stored in the keystore metadata (substrate format only)
    #[arg(long, default_value = "Matrixchain Snap")]
    pub name: String,
}

pub fn handle_keystore_command(cmd: KeystoreCommands) -> Result<()> {
    match cmd {
        KeystoreCommands::Export(args) => handle_keystore_export(args),
    }
}

fn handle_keystore_export(args: ExportArgs) -> Result<()> {
    let format: KeystoreFormat = args.format.parse()?;
    let mnemonic = MnemonicReader::resolve(args.mnemonic_file.as_deref())?;
    let password = read_password(args.password_file.as_deref())?;

    let path = KeystoreExport::export(
        mnemonic.expose_secret(),
        format,
        password.expose_secret(),
        &args.output_dir,
        &args.name,
    )?;

    eprintln!("Keystore saved to: {}", path.display());
    eprintln!("Format: {}", format.as_str());

    Ok(())
}

/// Read the keystore password from a file, or from the terminal with echo
/// disabled. Empty passwords are rejected before any encryption runs.
fn read_password(password_file: Option<&std::path::Path>) -> Result<SecretString> {
    let password = match password_file {
        Some(path) => std::fs::read_to_string(path)?.trim_end().to_string(),
        None => rpassword::prompt_password("Password for keystore: ")?,
    };

    if password.is_empty() {
        return Err(DomainError::EmptyPassword.into());
    }

    Ok(SecretString::new(password))
}
