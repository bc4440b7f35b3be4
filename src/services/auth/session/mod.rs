//! Session authentication.
//!
//! After registering or logging in, users receive a `sessionId` cookie. Every
//! handler that takes a [`Session`] argument rejects requests without a valid
//! one.

use std::time::Duration;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::{Cookie, SameSite};
use http::{header, request};

use crate::services::users::UserID;

mod id;
pub use id::SessionID;

mod store;
pub use store::{SessionStore, MAX_SESSION_TTL};

mod rejection;
pub use rejection::SessionRejection;

/// The name of the HTTP cookie that will store the user's [session ID].
///
/// [session ID]: SessionID
pub const COOKIE_NAME: &str = "sessionId";

/// An authenticated session.
///
/// This struct represents a session that has either just been created, or
/// extracted from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session
{
	/// The session's ID.
	id: SessionID,

	/// The user associated with this session.
	user_id: UserID,
}

impl Session
{
	/// Creates a new [`Session`].
	pub(super) fn new(id: SessionID, user_id: UserID) -> Self
	{
		Self { id, user_id }
	}

	/// Returns this session's ID.
	pub fn id(&self) -> SessionID
	{
		self.id
	}

	/// Returns the ID of the user associated with this session.
	pub fn user_id(&self) -> UserID
	{
		self.user_id
	}

	/// Creates an HTTP cookie from this session.
	pub fn into_cookie(self, ttl: Duration) -> Cookie<'static>
	{
		Cookie::build((COOKIE_NAME, self.id().to_string()))
			.path("/")
			.secure(cfg!(feature = "production"))
			.same_site(SameSite::Lax)
			.http_only(true)
			.max_age(time::Duration::try_from(ttl).unwrap_or(time::Duration::MAX))
			.build()
	}
}

/// Creates a cookie that makes the browser forget its session ID.
pub fn removal_cookie() -> Cookie<'static>
{
	Cookie::build((COOKIE_NAME, ""))
		.path("/")
		.secure(cfg!(feature = "production"))
		.same_site(SameSite::Lax)
		.http_only(true)
		.max_age(time::Duration::ZERO)
		.build()
}

/// Extracts the raw session ID cookie from request headers.
pub(super) fn session_cookie(headers: &http::HeaderMap) -> Option<Cookie<'static>>
{
	headers
		.get_all(header::COOKIE)
		.into_iter()
		.flat_map(|value| value.to_str())
		.flat_map(|value| Cookie::split_parse_encoded(value.trim().to_owned()))
		.flatten()
		.find(|cookie| cookie.name() == COOKIE_NAME)
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
	S: Send + Sync + 'static,
	SessionStore: FromRef<S>,
{
	type Rejection = SessionRejection;

	#[tracing::instrument(
		name = "Session::from_request_parts",
		skip_all,
		fields(session.id = tracing::field::Empty),
		err(Debug, level = "debug")
	)]
	async fn from_request_parts(
		req: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection>
	{
		if let Some(session) = req.extensions.get::<Self>() {
			tracing::Span::current().record("session.id", format_args!("{}", session.id()));

			return Ok(*session);
		}

		let session_id = session_cookie(&req.headers)
			.map(|cookie| cookie.value().parse::<SessionID>())
			.ok_or(SessionRejection::MissingCookie)?
			.map_err(|source| SessionRejection::ParseSessionID { source })?;

		tracing::Span::current().record("session.id", format_args!("{session_id}"));

		let user_id = SessionStore::from_ref(state)
			.lookup(session_id)
			.ok_or(SessionRejection::InvalidSessionID)?;

		let session = Session::new(session_id, user_id);

		tracing::trace! {
			session.id = %session.id(),
			user.id = %session.user_id(),
			"authenticated session",
		};

		req.extensions.insert(session);

		Ok(session)
	}
}
