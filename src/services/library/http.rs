//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};

use super::models::Library;
use super::LibraryService;
use crate::http::ProblemDetails;
use crate::services::auth::Session;

impl From<LibraryService> for Router
{
	fn from(svc: LibraryService) -> Self
	{
		Router::new()
			.route("/sync", routing::get(sync))
			.with_state(svc)
	}
}

/// Fetch your Steam library, merged with your backlog.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn sync(session: Session, State(svc): State<LibraryService>) -> Result<Library, ProblemDetails>
{
	let entries = svc.sync(session.user_id()).await?;

	Ok(Library(entries))
}
