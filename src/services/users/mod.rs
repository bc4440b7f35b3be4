//! The [`UserService`] owns `users.json`.
//!
//! It creates accounts, checks passwords, and keeps each user's own Steam Web
//! API key encrypted at rest.

use std::fmt;

use axum::extract::FromRef;

use crate::crypto::{password, SecretCipher};
use crate::services::auth::SessionStore;
use crate::store::JsonFile;

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::{NewUser, SaveApiKeyRequest, SaveApiKeyResponse, User, UserID};

/// A service for managing user accounts.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct UserService
{
	users: JsonFile<User>,
	cipher: SecretCipher,
	sessions: SessionStore,
}

impl fmt::Debug for UserService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("UserService")
			.field("users", &self.users.path())
			.finish_non_exhaustive()
	}
}

impl UserService
{
	/// Create a new [`UserService`].
	#[tracing::instrument(skip(cipher, sessions))]
	pub fn new(users: JsonFile<User>, cipher: SecretCipher, sessions: SessionStore) -> Self
	{
		Self { users, cipher, sessions }
	}

	/// Looks up a user by name.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn find_by_username(&self, username: &str) -> Result<Option<User>>
	{
		let user = self
			.users
			.read_all()
			.await?
			.into_iter()
			.find(|user| user.username == username);

		Ok(user)
	}

	/// Looks up a user by ID.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn find_by_id(&self, user_id: UserID) -> Result<Option<User>>
	{
		let user = self
			.users
			.read_all()
			.await?
			.into_iter()
			.find(|user| user.id == user_id);

		Ok(user)
	}

	/// Creates a new user.
	///
	/// Usernames are unique; the check and the insertion happen atomically.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn create_user(&self, new_user: NewUser) -> Result<User>
	{
		let NewUser { username, password, steam_id } = new_user;
		let stored = password::hash(&password).map_err(Error::HashPassword)?;

		let user = self
			.users
			.update(|users| {
				if users.iter().any(|user| user.username == username) {
					return Err(Error::UserAlreadyExists { username });
				}

				let user = User {
					id: UserID::new(),
					username,
					hashed_password: stored.hash,
					salt: stored.salt,
					steam_id64: steam_id.to_string(),
					encrypted_api_key: None,
				};

				users.push(user.clone());

				Ok(user)
			})
			.await?;

		tracing::info! {
			target: "backlog_api::audit_log",
			{ user.id = %user.id, user.name = %user.username, user.steam_id = %user.steam_id64 },
			"registered new user",
		};

		Ok(user)
	}

	/// Checks a username / password combination.
	#[tracing::instrument(level = "debug", skip(password), err(Debug, level = "debug"))]
	pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<User>
	{
		let Some(user) = self.find_by_username(username).await? else {
			tracing::debug!("unknown user");
			return Err(Error::InvalidCredentials);
		};

		match password::verify(password, &user.password_hash()) {
			Ok(true) => Ok(user),
			Ok(false) => {
				tracing::debug!(user.id = %user.id, "wrong password");
				Err(Error::InvalidCredentials)
			}
			Err(error) => {
				tracing::warn!(user.id = %user.id, %error, "stored password hash is unusable");
				Err(Error::InvalidCredentials)
			}
		}
	}

	/// Encrypts and stores a user's own Steam Web API key, replacing any
	/// previous one.
	#[tracing::instrument(level = "debug", skip(api_key), err(Debug, level = "debug"))]
	pub async fn save_api_key(&self, user_id: UserID, api_key: &str) -> Result<()>
	{
		let api_key = api_key.trim();

		if api_key.is_empty() {
			return Err(Error::MissingField { field: "apiKey" });
		}

		let encrypted = self.cipher.encrypt(api_key).map_err(Error::EncryptApiKey)?;

		self.users
			.update(|users| {
				let user = users
					.iter_mut()
					.find(|user| user.id == user_id)
					.ok_or(Error::UserDoesNotExist { user_id })?;

				user.encrypted_api_key = Some(encrypted);

				Ok::<_, Error>(())
			})
			.await?;

		tracing::info!(target: "backlog_api::audit_log", { user.id = %user_id }, "stored steam api key");

		Ok(())
	}

	/// Decrypts the user's own Steam Web API key, if they stored one.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub fn decrypt_api_key(&self, user: &User) -> Result<Option<String>>
	{
		user.encrypted_api_key
			.as_ref()
			.map(|secret| self.cipher.decrypt(secret))
			.transpose()
			.map_err(Error::DecryptApiKey)
	}
}
