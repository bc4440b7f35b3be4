//! Password hashing with scrypt.
//!
//! Hashes and salts are stored hex-encoded next to each user record.

use subtle::ConstantTimeEq;

use super::CryptoError;

/// scrypt cost parameter, as log₂(N).
const LOG_N: u8 = 10;

/// scrypt block size.
const R: u32 = 8;

/// scrypt parallelization.
const P: u32 = 1;

/// Length of the derived key in bytes.
const KEY_LEN: usize = 64;

/// Length of the random salt in bytes.
const SALT_LEN: usize = 16;

/// A salted password hash, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash
{
	/// Hex-encoded derived key.
	pub hash: String,

	/// Hex-encoded salt.
	pub salt: String,
}

/// Hashes `password` with a fresh random salt.
pub fn hash(password: &str) -> Result<PasswordHash, CryptoError>
{
	let salt = rand::random::<[u8; SALT_LEN]>();
	let key = derive(password, &salt)?;

	Ok(PasswordHash { hash: hex::encode(key), salt: hex::encode(salt) })
}

/// Checks `password` against a stored hash.
///
/// The comparison runs in constant time with respect to the hash contents.
pub fn verify(password: &str, stored: &PasswordHash) -> Result<bool, CryptoError>
{
	let salt = hex::decode(&stored.salt).map_err(|_| CryptoError::MalformedHash)?;
	let expected = hex::decode(&stored.hash).map_err(|_| CryptoError::MalformedHash)?;

	if expected.len() != KEY_LEN {
		return Err(CryptoError::MalformedHash);
	}

	let actual = derive(password, &salt)?;

	Ok(bool::from(actual.ct_eq(&expected[..])))
}

/// Runs scrypt over `password` and `salt`.
fn derive(password: &str, salt: &[u8]) -> Result<[u8; KEY_LEN], CryptoError>
{
	let params = scrypt::Params::new(LOG_N, R, P, KEY_LEN).map_err(|_| CryptoError::Kdf)?;
	let mut output = [0_u8; KEY_LEN];

	scrypt::scrypt(password.as_bytes(), salt, &params, &mut output)
		.map_err(|_| CryptoError::Kdf)?;

	Ok(output)
}
