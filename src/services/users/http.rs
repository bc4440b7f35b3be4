//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};

use super::{Error, SaveApiKeyRequest, SaveApiKeyResponse, UserID, UserService};
use crate::http::extract::{Json, Path};
use crate::http::ProblemDetails;
use crate::services::auth::Session;

impl From<UserService> for Router
{
	fn from(svc: UserService) -> Self
	{
		Router::new()
			.route("/:id/apikey", routing::post(save_api_key))
			.with_state(svc)
	}
}

/// Store your own Steam Web API key.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn save_api_key(
	session: Session,
	State(svc): State<UserService>,
	Path(requested): Path<String>,
	Json(req): Json<SaveApiKeyRequest>,
) -> Result<SaveApiKeyResponse, ProblemDetails>
{
	let user_id = session.user_id();

	if requested.parse::<UserID>().ok() != Some(user_id) {
		tracing::warn! {
			target: "backlog_api::audit_log",
			{ session.user.id = %user_id, requested.user.id = %requested },
			"refused to store api key for another user",
		};

		return Err(Error::NotYourAccount.into());
	}

	let api_key = req.api_key.unwrap_or_default();

	svc.save_api_key(user_id, &api_key).await?;

	Ok(SaveApiKeyResponse::saved())
}
