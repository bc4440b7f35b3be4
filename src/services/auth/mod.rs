//! The [`AuthService`] is responsible for user authentication.
//!
//! Users register with a username, password and SteamID64, and log in with
//! their username and password. Both hand out a [`Session`], which is stored in
//! memory by the [`SessionStore`] and sent to the browser as a cookie. The
//! [`Session`] extractor authenticates subsequent requests.

use std::fmt;

use axum::extract::FromRef;

use crate::services::steam::SteamID;
use crate::services::users::{NewUser, User, UserService};

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::{LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse};

pub mod session;
pub use session::{Session, SessionID, SessionStore, MAX_SESSION_TTL};

/// Passwords shorter than this are rejected at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A service for managing user authentication.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct AuthService
{
	user_svc: UserService,
	sessions: SessionStore,
}

impl fmt::Debug for AuthService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("AuthService")
			.field("sessions", &self.sessions)
			.finish_non_exhaustive()
	}
}

impl AuthService
{
	/// Create a new [`AuthService`].
	#[tracing::instrument]
	pub fn new(user_svc: UserService, sessions: SessionStore) -> Self
	{
		Self { user_svc, sessions }
	}

	/// Creates a new account and logs it in.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn register(&self, req: RegisterRequest) -> Result<(User, Session)>
	{
		let username = required(req.username, "username")?;
		let password = required(req.password, "password")?;
		let steam_id = required(req.steam_id64, "steamId64")?.parse::<SteamID>()?;

		if password.chars().count() < MIN_PASSWORD_LEN {
			return Err(Error::PasswordTooShort { min: MIN_PASSWORD_LEN });
		}

		let user = self
			.user_svc
			.create_user(NewUser { username, password, steam_id })
			.await?;

		let session = self.start_session(&user);

		Ok((user, session))
	}

	/// Checks a user's credentials and starts a new session.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn login(&self, req: LoginRequest) -> Result<(User, Session)>
	{
		let username = required(req.username, "username")?;
		let password = required(req.password, "password")?;

		let user = self
			.user_svc
			.verify_credentials(&username, &password)
			.await
			.inspect_err(|error| {
				if matches!(error, crate::services::users::Error::InvalidCredentials) {
					tracing::info! {
						target: "backlog_api::audit_log",
						{ user.name = %username },
						"failed login attempt",
					};
				}
			})?;

		let session = self.start_session(&user);

		tracing::info! {
			target: "backlog_api::audit_log",
			{ user.id = %user.id, session.id = %session.id() },
			"user logged in",
		};

		Ok((user, session))
	}

	/// Ends a session, if it exists.
	#[tracing::instrument(level = "debug")]
	pub fn logout(&self, session_id: SessionID)
	{
		if self.sessions.destroy(session_id) {
			tracing::info!(target: "backlog_api::audit_log", { session.id = %session_id }, "user logged out");
		}
	}

	/// Returns how long new sessions stay valid.
	pub fn session_ttl(&self) -> std::time::Duration
	{
		self.sessions.ttl()
	}

	/// Creates a session for `user`.
	fn start_session(&self, user: &User) -> Session
	{
		Session::new(self.sessions.create(user.id), user.id)
	}
}

/// Unwraps a required request field, treating blank strings as missing.
fn required(value: Option<String>, field: &'static str) -> Result<String>
{
	value
		.filter(|value| !value.trim().is_empty())
		.ok_or(Error::MissingField { field })
}
