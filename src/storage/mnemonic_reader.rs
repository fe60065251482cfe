use crate::crypto::{normalize_mnemonic, validate_mnemonic};
use crate::domain::{DomainError, DomainResult};
use secrecy::SecretString;
use std::path::Path;

/// Environment variable consulted when no mnemonic file is given
pub const MNEMONIC_ENV_VAR: &str = "MNEMONIC";

/// Read mnemonics from files or the environment
pub struct MnemonicReader;

impl MnemonicReader {
    /// Read a mnemonic from a file, normalize and checksum-validate it
    pub fn from_file(path: &Path) -> DomainResult<SecretString> {
        let contents =
            std::fs::read_to_string(path).map_err(|_| DomainError::MnemonicFileNotFound {
                path: path.to_path_buf(),
            })?;

        Self::normalize_and_validate(&contents)
    }

    /// Read a mnemonic from the MNEMONIC environment variable
    pub fn from_env() -> DomainResult<SecretString> {
        let contents = std::env::var(MNEMONIC_ENV_VAR).map_err(|_| {
            DomainError::InvalidMnemonic(format!(
                "{} environment variable is not set",
                MNEMONIC_ENV_VAR
            ))
        })?;

        Self::normalize_and_validate(&contents)
    }

    /// Resolve the phrase from an optional file path, falling back to the
    /// environment
    pub fn resolve(mnemonic_file: Option<&Path>) -> DomainResult<SecretString> {
        match mnemonic_file {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    fn normalize_and_validate(contents: &str) -> DomainResult<SecretString> {
        let normalized = normalize_mnemonic(contents);
        validate_mnemonic(&normalized)?;
        Ok(SecretString::new(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TEST_MNEMONIC: &str =
        "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

    #[test]
    fn test_read_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "  {}  ", TEST_MNEMONIC).unwrap();

        let mnemonic = MnemonicReader::from_file(temp_file.path()).unwrap();
        assert_eq!(mnemonic.expose_secret(), TEST_MNEMONIC);
    }

    #[test]
    fn test_missing_file() {
        let result = MnemonicReader::from_file(Path::new("/nonexistent/mnemonic.txt"));
        assert!(matches!(
            result,
            Err(DomainError::MnemonicFileNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_phrase_in_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "definitely not a mnemonic").unwrap();

        let result = MnemonicReader::from_file(temp_file.path());
        assert!(matches!(result, Err(DomainError::InvalidMnemonic(_))));
    }
}
