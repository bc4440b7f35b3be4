//! Cryptographic primitives.
//!
//! [`SecretCipher`] encrypts per-user Steam API keys at rest using AES-256-GCM.
//! The [`password`] module hashes and verifies login passwords.

use std::fmt;
use std::sync::Arc;

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub mod password;

/// Length of the random IV in bytes.
const IV_LEN: usize = 12;

/// Length of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Errors produced by the functions in this module.
#[derive(Debug, Error)]
pub enum CryptoError
{
	/// The stored ciphertext, IV or tag was not valid base64 or had the wrong
	/// length.
	#[error("encrypted value is malformed")]
	MalformedCiphertext,

	/// Decryption failed, either because the data was tampered with or because
	/// it was encrypted with a different key.
	#[error("failed to decrypt value")]
	Decrypt,

	/// Encryption failed.
	#[error("failed to encrypt value")]
	Encrypt,

	/// The decrypted value was not valid UTF-8.
	#[error("decrypted value is not valid UTF-8")]
	NotUtf8,

	/// A stored password hash or salt was not valid hex or had the wrong
	/// length.
	#[error("stored password hash is malformed")]
	MalformedHash,

	/// scrypt rejected its parameters.
	#[error("failed to derive key")]
	Kdf,
}

/// An encrypted secret, as stored on disk.
///
/// All fields are standard base64 with padding.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret
{
	/// The ciphertext, without the tag.
	pub data: String,

	/// The 12-byte IV used for this value.
	pub iv: String,

	/// The 16-byte GCM authentication tag.
	pub tag: String,
}

impl fmt::Debug for EncryptedSecret
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("EncryptedSecret").finish_non_exhaustive()
	}
}

/// Symmetric cipher for secrets stored at rest.
///
/// The key is the SHA-256 digest of the configured server secret.
#[derive(Clone)]
pub struct SecretCipher
{
	#[allow(clippy::missing_docs_in_private_items)]
	cipher: Arc<Aes256Gcm>,
}

impl fmt::Debug for SecretCipher
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("SecretCipher").finish_non_exhaustive()
	}
}

impl SecretCipher
{
	/// Creates a new [`SecretCipher`] from the server secret.
	pub fn new(secret: &str) -> Self
	{
		let key = Sha256::digest(secret.as_bytes());

		Self { cipher: Arc::new(Aes256Gcm::new(&key)) }
	}

	/// Encrypts `plaintext` with a fresh random IV.
	pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedSecret, CryptoError>
	{
		let iv = rand::random::<[u8; IV_LEN]>();
		let mut buffer = plaintext.as_bytes().to_vec();
		let tag = self
			.cipher
			.encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut buffer)
			.map_err(|_| CryptoError::Encrypt)?;

		Ok(EncryptedSecret {
			data: BASE64.encode(&buffer),
			iv: BASE64.encode(iv),
			tag: BASE64.encode(tag),
		})
	}

	/// Decrypts a value previously produced by [`SecretCipher::encrypt()`].
	pub fn decrypt(&self, secret: &EncryptedSecret) -> Result<String, CryptoError>
	{
		let decode = |value: &str| BASE64.decode(value).map_err(|_| CryptoError::MalformedCiphertext);
		let mut buffer = decode(&secret.data)?;
		let iv = decode(&secret.iv)?;
		let tag = decode(&secret.tag)?;

		if iv.len() != IV_LEN || tag.len() != TAG_LEN {
			return Err(CryptoError::MalformedCiphertext);
		}

		self.cipher
			.decrypt_in_place_detached(
				Nonce::from_slice(&iv),
				b"",
				&mut buffer,
				Tag::from_slice(&tag),
			)
			.map_err(|_| CryptoError::Decrypt)?;

		String::from_utf8(buffer).map_err(|_| CryptoError::NotUtf8)
	}
}
