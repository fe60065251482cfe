use crate::application::KeyDerivation;
use crate::cli::output::{print_address_report, AddressReport, OutputFormat};
use crate::storage::MnemonicReader;
use anyhow::Result;
use clap::Args;
use secrecy::ExposeSecret;
use std::path::PathBuf;

#[derive(Args)]
pub struct DeriveArgs {
    /// Mnemonic file path (falls back to the MNEMONIC environment variable)
    #[arg(long)]
    pub mnemonic_file: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(long, default_value = "json")]
    pub format: String,

    /// Include the snap private key (hex seed) in the report
    #[arg(long)]
    pub show_secret: bool,
}

pub fn handle_derive_command(args: DeriveArgs) -> Result<()> {
    let format = OutputFormat::from_str(&args.format).map_err(anyhow::Error::msg)?;

    let mnemonic = MnemonicReader::resolve(args.mnemonic_file.as_deref())?;
    let accounts = KeyDerivation::derive_all(mnemonic.expose_secret())?;

    let report = AddressReport::new(&accounts, args.show_secret);
    print_address_report(&report, format);

    Ok(())
}
