//! Request / Response types for this service.

use std::fmt;
use std::str::FromStr;

use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::crypto::password::PasswordHash;
use crate::crypto::EncryptedSecret;
use crate::http::extract::Json;
use crate::services::steam::{InvalidSteamID, SteamID};

/// A user ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserID(Uuid);

impl UserID
{
	/// Generates a new random ID.
	pub fn new() -> Self
	{
		Self(Uuid::new_v4())
	}
}

impl fmt::Display for UserID
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Display::fmt(self.0.as_hyphenated(), f)
	}
}

impl fmt::Debug for UserID
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_tuple("UserID")
			.field(self.0.as_hyphenated())
			.finish()
	}
}

impl FromStr for UserID
{
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		s.parse::<Uuid>().map(Self)
	}
}

/// A registered user, as stored in `users.json`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User
{
	/// The user's ID.
	pub id: UserID,

	/// The name the user logs in with.
	pub username: String,

	/// Hex-encoded scrypt hash of the user's password.
	pub hashed_password: String,

	/// Hex-encoded salt for `hashed_password`.
	pub salt: String,

	/// The user's SteamID64, exactly as stored.
	///
	/// This is only validated when it is used (see [`User::steam_id()`]), so
	/// one bad record does not make every other account unreadable.
	#[serde(deserialize_with = "string_or_number")]
	pub steam_id64: String,

	/// The user's own Steam Web API key, encrypted.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub encrypted_api_key: Option<EncryptedSecret>,
}

impl User
{
	/// Returns the stored password hash.
	pub fn password_hash(&self) -> PasswordHash
	{
		PasswordHash { hash: self.hashed_password.clone(), salt: self.salt.clone() }
	}

	/// Parses the stored SteamID64.
	pub fn steam_id(&self) -> Result<SteamID, InvalidSteamID>
	{
		self.steam_id64.parse::<SteamID>()
	}
}

/// Accepts SteamIDs written as either strings or plain numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	#[allow(clippy::missing_docs_in_private_items)]
	enum Helper
	{
		U64(u64),
		Str(String),
	}

	Ok(match Helper::deserialize(deserializer)? {
		Helper::U64(value) => value.to_string(),
		Helper::Str(value) => value,
	})
}

impl fmt::Debug for User
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("User")
			.field("id", &self.id)
			.field("username", &self.username)
			.field("steam_id64", &self.steam_id64)
			.field("has_api_key", &self.encrypted_api_key.is_some())
			.finish_non_exhaustive()
	}
}

/// Data required to create a new user.
pub struct NewUser
{
	/// The name the user will log in with.
	pub username: String,

	/// The user's plaintext password.
	pub password: String,

	/// The user's Steam account.
	pub steam_id: SteamID,
}

impl fmt::Debug for NewUser
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("NewUser")
			.field("username", &self.username)
			.field("steam_id", &self.steam_id)
			.finish_non_exhaustive()
	}
}

/// Request payload for storing a Steam Web API key.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveApiKeyRequest
{
	/// The user's Steam Web API key.
	#[serde(default)]
	pub api_key: Option<String>,
}

impl fmt::Debug for SaveApiKeyRequest
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("SaveApiKeyRequest")
			.field("api_key", &self.api_key.as_ref().map(|_| "*****"))
			.finish()
	}
}

/// Response payload for storing a Steam Web API key.
#[derive(Debug, Serialize)]
pub struct SaveApiKeyResponse
{
	/// Always `true`.
	pub ok: bool,

	/// Human-readable confirmation.
	pub message: &'static str,
}

impl SaveApiKeyResponse
{
	/// The response for a successfully stored key.
	pub fn saved() -> Self
	{
		Self { ok: true, message: "API Key saved successfully" }
	}
}

impl IntoResponse for SaveApiKeyResponse
{
	fn into_response(self) -> Response
	{
		Json(self).into_response()
	}
}
