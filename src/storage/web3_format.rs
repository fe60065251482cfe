//! Web3 Secret Storage Definition v3 keystore
//!
//! Standards-conformant Ethereum keystore JSON: scrypt (or PBKDF2 on read)
//! key derivation, AES-128-CTR encryption, keccak-256 MAC over
//! `derived_key[16..32] | ciphertext`. Any compliant reader with the same
//! password round-trips the private key.

use crate::domain::{DomainError, DomainResult};
use aes::cipher::{KeyIvInit, StreamCipher};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use scrypt::{scrypt, Params as ScryptParams};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Keccak256};
use subtle::ConstantTimeEq;
use uuid::Uuid;
use zeroize::Zeroize;

type Aes128Ctr = ctr::Ctr64BE<aes::Aes128>;

/// Keystore format version (Web3 Secret Storage Definition)
pub const WEB3_VERSION: u32 = 3;

const CIPHER_NAME: &str = "aes-128-ctr";
const SUPPORTED_PRF: &str = "hmac-sha256";

const SALT_LEN: usize = 32;
const IV_LEN: usize = 16;
const DERIVED_KEY_LEN: u32 = 32;
const ENCRYPTION_KEY_LEN: usize = 16;

/// KDF work parameters for encryption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfConfig {
    /// log2 of the scrypt cost parameter N
    pub log_n: u8,
    /// Block size parameter
    pub r: u32,
    /// Parallelization parameter
    pub p: u32,
}

impl KdfConfig {
    /// Conventional cold-storage profile (N=262144, r=8, p=1)
    pub fn scrypt_default() -> Self {
        Self {
            log_n: 18,
            r: 8,
            p: 1,
        }
    }

    /// Lighter profile for interactive use and tests (N=16384)
    pub fn scrypt_interactive() -> Self {
        Self {
            log_n: 14,
            r: 8,
            p: 1,
        }
    }

    /// Custom scrypt parameters
    pub fn custom_scrypt(log_n: u8, r: u32, p: u32) -> Self {
        Self { log_n, r, p }
    }
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self::scrypt_default()
    }
}

/// Web3 Secret Storage v3 record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Web3Keystore {
    /// Lowercase unprefixed hex of the Ethereum address
    pub address: String,
    pub crypto: CryptoJson,
    /// Random UUID v4
    pub id: String,
    pub version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoJson {
    pub cipher: String,
    pub cipherparams: CipherparamsJson,
    pub ciphertext: String,
    pub kdf: String,
    pub kdfparams: KdfparamsType,
    pub mac: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherparamsJson {
    pub iv: String,
}

/// KDF parameter blocks; the two variants carry disjoint field sets, so the
/// record disambiguates without an internal tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KdfparamsType {
    Pbkdf2 {
        dklen: u32,
        c: u32,
        prf: String,
        salt: String,
    },
    Scrypt {
        dklen: u32,
        n: u32,
        p: u32,
        r: u32,
        salt: String,
    },
}

impl Web3Keystore {
    /// Encrypt a 32-byte private key under a password with the default
    /// scrypt profile.
    ///
    /// Salt and IV are drawn fresh from the thread CSPRNG on every call;
    /// they are deliberately not parameters.
    pub fn encrypt(private_key: &[u8; 32], password: &str) -> DomainResult<Self> {
        Self::encrypt_with_config(private_key, password, KdfConfig::default())
    }

    /// Encrypt with explicit KDF work parameters
    pub fn encrypt_with_config(
        private_key: &[u8; 32],
        password: &str,
        config: KdfConfig,
    ) -> DomainResult<Self> {
        let mut rng = rand::thread_rng();
        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);
        let mut iv = [0u8; IV_LEN];
        rng.fill_bytes(&mut iv);

        let params = ScryptParams::new(config.log_n, config.r, config.p, DERIVED_KEY_LEN as usize)
            .map_err(|e| DomainError::Encoding(format!("Invalid scrypt params: {}", e)))?;
        let mut derived_key = [0u8; DERIVED_KEY_LEN as usize];
        scrypt(password.as_bytes(), &salt, &params, &mut derived_key)
            .map_err(|e| DomainError::Encoding(format!("Scrypt derivation failed: {}", e)))?;

        let encryption_key = &derived_key[..ENCRYPTION_KEY_LEN];
        let mut ciphertext = private_key.to_vec();
        let mut cipher = Aes128Ctr::new(encryption_key.into(), iv.as_slice().into());
        cipher.apply_keystream(&mut ciphertext);

        let mac = compute_mac(&derived_key[ENCRYPTION_KEY_LEN..], &ciphertext);
        derived_key.zeroize();

        let address = crate::crypto::Ethereum::raw_address(private_key)
            .map_err(|e| DomainError::Encoding(format!("Invalid private key: {}", e)))?;

        Ok(Self {
            address: hex::encode(address),
            crypto: CryptoJson {
                cipher: CIPHER_NAME.to_string(),
                cipherparams: CipherparamsJson {
                    iv: hex::encode(iv),
                },
                ciphertext: hex::encode(&ciphertext),
                kdf: "scrypt".to_string(),
                kdfparams: KdfparamsType::Scrypt {
                    dklen: DERIVED_KEY_LEN,
                    n: 1u32 << config.log_n,
                    p: config.p,
                    r: config.r,
                    salt: hex::encode(salt),
                },
                mac: hex::encode(mac),
            },
            id: Uuid::new_v4().to_string(),
            version: WEB3_VERSION,
        })
    }

    /// Decrypt the record and recover the private key.
    ///
    /// The MAC is checked in constant time before any decryption; a wrong
    /// password never yields plaintext.
    pub fn decrypt(&self, password: &str) -> DomainResult<[u8; 32]> {
        if self.version != WEB3_VERSION {
            return Err(DomainError::InvalidKeystore {
                reason: format!("Unsupported keystore version: {}", self.version),
            });
        }
        if self.crypto.cipher != CIPHER_NAME {
            return Err(DomainError::InvalidKeystore {
                reason: format!("Unsupported cipher: {}", self.crypto.cipher),
            });
        }

        let mut derived_key = derive_key(password, &self.crypto.kdfparams)?;

        let ciphertext = hex::decode(&self.crypto.ciphertext)?;
        let expected_mac = hex::decode(&self.crypto.mac)?;

        let computed_mac = compute_mac(&derived_key[ENCRYPTION_KEY_LEN..], &ciphertext);
        if computed_mac.len() != expected_mac.len()
            || !bool::from(computed_mac.ct_eq(&expected_mac))
        {
            derived_key.zeroize();
            return Err(DomainError::IncorrectPassword);
        }

        let iv = hex::decode(&self.crypto.cipherparams.iv)?;
        if iv.len() != IV_LEN {
            derived_key.zeroize();
            return Err(DomainError::InvalidKeystore {
                reason: format!("IV is {} bytes (expected {})", iv.len(), IV_LEN),
            });
        }

        let encryption_key = &derived_key[..ENCRYPTION_KEY_LEN];
        let mut plaintext = ciphertext;
        let mut cipher = Aes128Ctr::new(encryption_key.into(), iv.as_slice().into());
        cipher.apply_keystream(&mut plaintext);
        derived_key.zeroize();

        if plaintext.len() != 32 {
            plaintext.zeroize();
            return Err(DomainError::InvalidKeystore {
                reason: format!("Key payload is {} bytes (expected 32)", plaintext.len()),
            });
        }

        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&plaintext);
        plaintext.zeroize();
        Ok(private_key)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }
}

/// Derive the 32-byte key from password and recorded KDF parameters.
/// Readers accept both scrypt and pbkdf2 records.
fn derive_key(password: &str, kdfparams: &KdfparamsType) -> DomainResult<[u8; 32]> {
    let mut derived_key = [0u8; DERIVED_KEY_LEN as usize];
    match kdfparams {
        KdfparamsType::Pbkdf2 {
            dklen,
            c,
            prf,
            salt,
        } => {
            if *dklen != DERIVED_KEY_LEN {
                return Err(DomainError::InvalidKeystore {
                    reason: format!("Unsupported dklen: {}", dklen),
                });
            }
            if prf != SUPPORTED_PRF {
                return Err(DomainError::InvalidKeystore {
                    reason: format!("Unsupported PRF: {} (expected {})", prf, SUPPORTED_PRF),
                });
            }
            let salt_bytes = hex::decode(salt)?;
            pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt_bytes, *c, &mut derived_key);
        }
        KdfparamsType::Scrypt {
            dklen,
            n,
            r,
            p,
            salt,
        } => {
            if *dklen != DERIVED_KEY_LEN {
                return Err(DomainError::InvalidKeystore {
                    reason: format!("Unsupported dklen: {}", dklen),
                });
            }
            if !n.is_power_of_two() {
                return Err(DomainError::InvalidKeystore {
                    reason: format!("Scrypt N must be a power of 2, got {}", n),
                });
            }
            let log_n = n.trailing_zeros() as u8;
            let params = ScryptParams::new(log_n, *r, *p, *dklen as usize).map_err(|e| {
                DomainError::InvalidKeystore {
                    reason: format!("Invalid scrypt params: {}", e),
                }
            })?;
            let salt_bytes = hex::decode(salt)?;
            scrypt(password.as_bytes(), &salt_bytes, &params, &mut derived_key)
                .map_err(|e| DomainError::Encoding(format!("Scrypt derivation failed: {}", e)))?;
        }
    }
    Ok(derived_key)
}

/// MAC = keccak256(mac_key | ciphertext), per the v3 definition
fn compute_mac(mac_key: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let mut hasher = Keccak256::new();
    hasher.update(mac_key);
    hasher.update(ciphertext);
    hasher.finalize().to_vec()
}
