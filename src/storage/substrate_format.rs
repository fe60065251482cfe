//! Substrate-style encrypted keystore (scrypt + xsalsa20-poly1305)
//!
//! Produces the JSON record the Matrixchain wallet import parser expects:
//! a PKCS8 ed25519 envelope encrypted with an scrypt-derived key under
//! NaCl secretbox, packed as
//!
//!   salt(32) | N(u32 LE) | p(u32 LE) | r(u32 LE) | nonce(24) | tag(16) | ciphertext
//!
//! and base64-encoded into the `encoded` field. Every constant below is part
//! of the wire format; changing any of them breaks wallet compatibility.

use crate::domain::{DomainError, DomainResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use crypto_secretbox::{
    aead::{AeadInPlace, KeyInit},
    Key, Nonce, Tag, XSalsa20Poly1305,
};
use rand::RngCore;
use scrypt::{scrypt, Params as ScryptParams};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// PKCS8 prefix for an ed25519 private key:
/// SEQUENCE (0x30, length 0x53), INTEGER version = 1, AlgorithmIdentifier
/// SEQUENCE carrying the ed25519 OID 1.3.101.112, then an OCTET STRING
/// (0x04 0x22) wrapping the inner OCTET STRING (0x04 0x20) that holds the
/// 32-byte seed.
pub const PKCS8_ED25519_HEADER: [u8; 16] = [
    0x30, 0x53, 0x02, 0x01, 0x01, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04,
    0x20,
];

/// Context-specific [1] tag and BIT STRING header (0x03, length 0x21,
/// zero unused bits) introducing the 32-byte public key half.
pub const PKCS8_DIVIDER: [u8; 5] = [0xa1, 0x23, 0x03, 0x21, 0x00];

/// Scrypt cost parameter N = 32768, stored in the blob as little-endian u32
pub const SCRYPT_N: u32 = 1 << SCRYPT_LOG_N;
/// log2(N) form the scrypt crate works with
pub const SCRYPT_LOG_N: u8 = 15;
/// Scrypt parallelization parameter
pub const SCRYPT_P: u32 = 1;
/// Scrypt block size parameter
pub const SCRYPT_R: u32 = 8;

const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;
const DERIVED_KEY_LEN: usize = 32;
const SEED_LEN: usize = 32;
const PUBLIC_KEY_LEN: usize = 32;

/// Full PKCS8 envelope: header | seed | divider | public key
const PLAINTEXT_LEN: usize = 16 + SEED_LEN + 5 + PUBLIC_KEY_LEN;

/// Offset of the secretbox output within the decoded blob
const BOX_OFFSET: usize = SALT_LEN + 12 + NONCE_LEN;

/// Substrate-style keystore record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstrateKeystore {
    /// base64 of the encrypted blob
    pub encoded: String,
    pub encoding: EncodingMeta,
    /// SS58 address of the stored key
    pub address: String,
    pub meta: KeystoreMeta,
}

/// Describes how `encoded` was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingMeta {
    pub content: Vec<String>,
    #[serde(rename = "type")]
    pub encoding_type: Vec<String>,
    pub version: String,
}

impl EncodingMeta {
    fn scrypt_secretbox() -> Self {
        Self {
            content: vec!["pkcs8".to_string(), "ed25519".to_string()],
            encoding_type: vec!["scrypt".to_string(), "xsalsa20-poly1305".to_string()],
            version: "3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystoreMeta {
    pub name: String,
    /// Milliseconds since epoch
    #[serde(rename = "whenCreated")]
    pub when_created: i64,
}

impl SubstrateKeystore {
    /// Encrypt an ed25519 seed and public key under a password.
    ///
    /// Salt and nonce are drawn fresh from the thread CSPRNG on every call;
    /// they are deliberately not parameters, so a nonce can never be reused
    /// across invocations.
    pub fn encrypt(
        seed: &[u8; 32],
        public_key: &[u8; 32],
        address: &str,
        name: &str,
        password: &str,
    ) -> DomainResult<Self> {
        // PKCS8 envelope: header | seed | divider | public key
        let mut buffer = Vec::with_capacity(PLAINTEXT_LEN);
        buffer.extend_from_slice(&PKCS8_ED25519_HEADER);
        buffer.extend_from_slice(seed);
        buffer.extend_from_slice(&PKCS8_DIVIDER);
        buffer.extend_from_slice(public_key);

        let mut rng = rand::thread_rng();
        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut nonce);

        let mut derived_key = [0u8; DERIVED_KEY_LEN];
        let params = ScryptParams::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, DERIVED_KEY_LEN)
            .map_err(|e| DomainError::Encoding(format!("Invalid scrypt params: {}", e)))?;
        scrypt(password.as_bytes(), &salt, &params, &mut derived_key)
            .map_err(|e| DomainError::Encoding(format!("Scrypt derivation failed: {}", e)))?;

        // NaCl secretbox layout: 16-byte Poly1305 tag first, then ciphertext
        let cipher = XSalsa20Poly1305::new(Key::from_slice(&derived_key));
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
            .map_err(|_| DomainError::Encoding("secretbox encryption failed".to_string()))?;
        derived_key.zeroize();

        let mut blob = Vec::with_capacity(BOX_OFFSET + TAG_LEN + PLAINTEXT_LEN);
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&SCRYPT_N.to_le_bytes());
        blob.extend_from_slice(&SCRYPT_P.to_le_bytes());
        blob.extend_from_slice(&SCRYPT_R.to_le_bytes());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&tag);
        blob.extend_from_slice(&buffer);

        Ok(Self {
            encoded: BASE64.encode(&blob),
            encoding: EncodingMeta::scrypt_secretbox(),
            address: address.to_string(),
            meta: KeystoreMeta {
                name: name.to_string(),
                when_created: Utc::now().timestamp_millis(),
            },
        })
    }

    /// Decrypt the record and recover (seed, public key).
    ///
    /// A wrong password fails the Poly1305 tag check; unauthenticated
    /// plaintext is never returned.
    pub fn decrypt(&self, password: &str) -> DomainResult<([u8; 32], [u8; 32])> {
        let blob = BASE64
            .decode(&self.encoded)
            .map_err(|e| DomainError::InvalidKeystore {
                reason: format!("Invalid base64: {}", e),
            })?;

        if blob.len() < BOX_OFFSET + TAG_LEN {
            return Err(DomainError::InvalidKeystore {
                reason: format!("Encoded blob too short: {} bytes", blob.len()),
            });
        }

        let salt = &blob[..SALT_LEN];
        let n = read_u32_le(&blob, SALT_LEN);
        let p = read_u32_le(&blob, SALT_LEN + 4);
        let r = read_u32_le(&blob, SALT_LEN + 8);
        let nonce = &blob[SALT_LEN + 12..BOX_OFFSET];
        let tag = &blob[BOX_OFFSET..BOX_OFFSET + TAG_LEN];
        let mut buffer = blob[BOX_OFFSET + TAG_LEN..].to_vec();

        if !n.is_power_of_two() {
            return Err(DomainError::InvalidKeystore {
                reason: format!("Scrypt N must be a power of 2, got {}", n),
            });
        }
        let log_n = n.trailing_zeros() as u8;
        let params = ScryptParams::new(log_n, r, p, DERIVED_KEY_LEN).map_err(|e| {
            DomainError::InvalidKeystore {
                reason: format!("Invalid scrypt params: {}", e),
            }
        })?;

        let mut derived_key = [0u8; DERIVED_KEY_LEN];
        scrypt(password.as_bytes(), salt, &params, &mut derived_key)
            .map_err(|e| DomainError::Encoding(format!("Scrypt derivation failed: {}", e)))?;

        let cipher = XSalsa20Poly1305::new(Key::from_slice(&derived_key));
        let result = cipher.decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut buffer,
            Tag::from_slice(tag),
        );
        derived_key.zeroize();
        if result.is_err() {
            buffer.zeroize();
            return Err(DomainError::IncorrectPassword);
        }

        let parsed = Self::parse_pkcs8(&buffer);
        buffer.zeroize();
        parsed
    }

    /// Split the decrypted PKCS8 envelope into (seed, public key)
    fn parse_pkcs8(plaintext: &[u8]) -> DomainResult<([u8; 32], [u8; 32])> {
        if plaintext.len() != PLAINTEXT_LEN {
            return Err(DomainError::InvalidKeystore {
                reason: format!("PKCS8 payload is {} bytes (expected {})", plaintext.len(), PLAINTEXT_LEN),
            });
        }
        if plaintext[..16] != PKCS8_ED25519_HEADER {
            return Err(DomainError::InvalidKeystore {
                reason: "PKCS8 header mismatch".to_string(),
            });
        }
        if plaintext[16 + SEED_LEN..16 + SEED_LEN + 5] != PKCS8_DIVIDER {
            return Err(DomainError::InvalidKeystore {
                reason: "PKCS8 divider mismatch".to_string(),
            });
        }

        let mut seed = [0u8; SEED_LEN];
        seed.copy_from_slice(&plaintext[16..16 + SEED_LEN]);
        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(&plaintext[16 + SEED_LEN + 5..]);

        Ok((seed, public_key))
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

fn read_u32_le(blob: &[u8], offset: usize) -> u32 {
    let mut quad = [0u8; 4];
    quad.copy_from_slice(&blob[offset..offset + 4]);
    u32::from_le_bytes(quad)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; 32] = *b"0x0123456789abcdef0123456789abcd";
    const PUBLIC: [u8; 32] = [0xee; 32];
    const ADDRESS: &str = "efTESTADDRESS";
    const PASSWORD: &str = "correct horse battery staple";

    #[test]
    fn test_round_trip() {
        let record =
            SubstrateKeystore::encrypt(&SEED, &PUBLIC, ADDRESS, "snap", PASSWORD).unwrap();
        let (seed, public_key) = record.decrypt(PASSWORD).unwrap();

        assert_eq!(seed, SEED);
        assert_eq!(public_key, PUBLIC);
    }

    #[test]
    fn test_wrong_password_fails_authentication() {
        let record =
            SubstrateKeystore::encrypt(&SEED, &PUBLIC, ADDRESS, "snap", PASSWORD).unwrap();
        let result = record.decrypt("wrong password");

        assert!(matches!(result, Err(DomainError::IncorrectPassword)));
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_encode() {
        let record1 =
            SubstrateKeystore::encrypt(&SEED, &PUBLIC, ADDRESS, "snap", PASSWORD).unwrap();
        let record2 =
            SubstrateKeystore::encrypt(&SEED, &PUBLIC, ADDRESS, "snap", PASSWORD).unwrap();

        // Distinct salts/nonces must produce distinct blobs
        assert_ne!(record1.encoded, record2.encoded);

        // Both still round-trip independently
        assert_eq!(record1.decrypt(PASSWORD).unwrap().0, SEED);
        assert_eq!(record2.decrypt(PASSWORD).unwrap().0, SEED);
    }

    #[test]
    fn test_blob_layout() {
        let record =
            SubstrateKeystore::encrypt(&SEED, &PUBLIC, ADDRESS, "snap", PASSWORD).unwrap();
        let blob = BASE64.decode(&record.encoded).unwrap();

        // salt(32) | N | p | r | nonce(24) | tag(16) | ciphertext(85)
        assert_eq!(blob.len(), 32 + 12 + 24 + 16 + 85);
        assert_eq!(read_u32_le(&blob, 32), 32768);
        assert_eq!(read_u32_le(&blob, 36), 1);
        assert_eq!(read_u32_le(&blob, 40), 8);
    }

    #[test]
    fn test_tampered_blob_rejected() {
        let record =
            SubstrateKeystore::encrypt(&SEED, &PUBLIC, ADDRESS, "snap", PASSWORD).unwrap();
        let mut blob = BASE64.decode(&record.encoded).unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0xff;

        let tampered = SubstrateKeystore {
            encoded: BASE64.encode(&blob),
            ..record
        };
        assert!(matches!(
            tampered.decrypt(PASSWORD),
            Err(DomainError::IncorrectPassword)
        ));
    }

    #[test]
    fn test_json_field_names() {
        let record =
            SubstrateKeystore::encrypt(&SEED, &PUBLIC, ADDRESS, "snap", PASSWORD).unwrap();
        let json = record.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["encoding"]["content"][0], "pkcs8");
        assert_eq!(value["encoding"]["content"][1], "ed25519");
        assert_eq!(value["encoding"]["type"][0], "scrypt");
        assert_eq!(value["encoding"]["type"][1], "xsalsa20-poly1305");
        assert_eq!(value["encoding"]["version"], "3");
        assert_eq!(value["address"], ADDRESS);
        assert_eq!(value["meta"]["name"], "snap");
        assert!(value["meta"]["whenCreated"].is_i64());

        let reparsed = SubstrateKeystore::from_json(&json).unwrap();
        assert_eq!(reparsed.decrypt(PASSWORD).unwrap().0, SEED);
    }
}
