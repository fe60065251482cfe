use anyhow::Result;
use clap::{Parser, Subcommand};

use matrixchain_cli::cli::{
    handle_derive_command, handle_keystore_command, DeriveArgs, KeystoreCommands,
};

#[derive(Parser)]
#[command(name = "matrixchain-cli")]
#[command(about = "Matrixchain address derivation and wallet keystore export tooling", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the Ethereum, Matrixchain and snap accounts from a mnemonic
    Derive(DeriveArgs),

    /// Keystore file operations
    #[command(subcommand)]
    Keystore(KeystoreCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Derive(args) => handle_derive_command(args),
        Commands::Keystore(keystore_cmd) => handle_keystore_command(keystore_cmd),
    }
}
