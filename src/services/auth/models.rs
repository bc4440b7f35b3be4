//! Request / Response types for this service.

use std::fmt;

use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::http::extract::Json;
use crate::services::users::UserID;

/// Request payload for creating an account.
///
/// All fields are optional at the type level so that missing ones can be
/// reported by name.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest
{
	/// The name to log in with.
	#[serde(default)]
	pub username: Option<String>,

	/// The password to log in with.
	#[serde(default)]
	pub password: Option<String>,

	/// The user's SteamID64, as a decimal string.
	#[serde(default)]
	pub steam_id64: Option<String>,
}

impl fmt::Debug for RegisterRequest
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("RegisterRequest")
			.field("username", &self.username)
			.field("steam_id64", &self.steam_id64)
			.finish_non_exhaustive()
	}
}

/// Request payload for logging in.
#[derive(Default, Deserialize)]
pub struct LoginRequest
{
	/// The name to log in with.
	#[serde(default)]
	pub username: Option<String>,

	/// The password to log in with.
	#[serde(default)]
	pub password: Option<String>,
}

impl fmt::Debug for LoginRequest
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("LoginRequest")
			.field("username", &self.username)
			.finish_non_exhaustive()
	}
}

/// JSON body shared by the auth responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthBody
{
	/// Human-readable status message.
	message: &'static str,

	/// The authenticated user, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	user_id: Option<UserID>,
}

/// Response for `/auth/register`.
#[derive(Debug)]
pub struct RegisterResponse
{
	/// The newly created user.
	pub user_id: UserID,

	/// The cookie jar that contains the new session cookie.
	pub(super) cookies: CookieJar,
}

impl IntoResponse for RegisterResponse
{
	fn into_response(self) -> Response
	{
		let body = AuthBody { message: "User created successfully.", user_id: Some(self.user_id) };

		(http::StatusCode::CREATED, self.cookies, Json(body)).into_response()
	}
}

/// Response for `/auth/login`.
#[derive(Debug)]
pub struct LoginResponse
{
	/// The authenticated user.
	pub user_id: UserID,

	/// The cookie jar that contains the new session cookie.
	pub(super) cookies: CookieJar,
}

impl IntoResponse for LoginResponse
{
	fn into_response(self) -> Response
	{
		let body = AuthBody { message: "Login successful.", user_id: Some(self.user_id) };

		(self.cookies, Json(body)).into_response()
	}
}

/// Response for `/auth/logout`.
#[derive(Debug)]
pub struct LogoutResponse
{
	/// The cookie jar that contains the cleared session cookie.
	pub(super) cookies: CookieJar,
}

impl IntoResponse for LogoutResponse
{
	fn into_response(self) -> Response
	{
		let body = AuthBody { message: "Logged out successfully.", user_id: None };

		(self.cookies, Json(body)).into_response()
	}
}
