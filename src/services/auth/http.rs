//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};
use axum_extra::extract::CookieJar;

use super::{
	session,
	AuthService,
	LoginRequest,
	LoginResponse,
	LogoutResponse,
	RegisterRequest,
	RegisterResponse,
	SessionID,
};
use crate::http::extract::Json;
use crate::http::ProblemDetails;

impl From<AuthService> for Router
{
	fn from(svc: AuthService) -> Self
	{
		Router::new()
			.route("/register", routing::post(register))
			.route("/login", routing::post(login))
			.route("/logout", routing::post(logout))
			.with_state(svc)
	}
}

/// Create an account.
#[tracing::instrument(skip(cookies), err(Debug, level = "debug"))]
async fn register(
	State(svc): State<AuthService>,
	cookies: CookieJar,
	Json(req): Json<RegisterRequest>,
) -> Result<RegisterResponse, ProblemDetails>
{
	let (user, session) = svc.register(req).await?;
	let cookies = cookies.add(session.into_cookie(svc.session_ttl()));

	Ok(RegisterResponse { user_id: user.id, cookies })
}

/// Log in with username and password.
#[tracing::instrument(skip(cookies), err(Debug, level = "debug"))]
async fn login(
	State(svc): State<AuthService>,
	cookies: CookieJar,
	Json(req): Json<LoginRequest>,
) -> Result<LoginResponse, ProblemDetails>
{
	let (user, session) = svc.login(req).await?;
	let cookies = cookies.add(session.into_cookie(svc.session_ttl()));

	Ok(LoginResponse { user_id: user.id, cookies })
}

/// End your current session.
///
/// This never fails; requests without a (valid) session simply get their
/// cookie cleared.
#[tracing::instrument(skip(cookies))]
async fn logout(State(svc): State<AuthService>, cookies: CookieJar) -> LogoutResponse
{
	let session_id = cookies
		.get(session::COOKIE_NAME)
		.and_then(|cookie| cookie.value().parse::<SessionID>().ok());

	if let Some(session_id) = session_id {
		svc.logout(session_id);
	}

	LogoutResponse { cookies: cookies.add(session::removal_cookie()) }
}
