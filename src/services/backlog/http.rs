//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};
use http::StatusCode;

use super::models::{BacklogItems, CreatedBacklogItem, UpdatedBacklogItem};
use super::{BacklogID, BacklogItemUpdate, BacklogService, Error, NewBacklogItem};
use crate::http::extract::{Json, Path};
use crate::http::ProblemDetails;
use crate::services::auth::Session;

impl From<BacklogService> for Router
{
	fn from(svc: BacklogService) -> Self
	{
		Router::new()
			.route("/", routing::get(get_many).post(create))
			.route("/:id", routing::put(update).delete(delete))
			.with_state(svc)
	}
}

/// Fetch your backlog.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_many(
	session: Session,
	State(svc): State<BacklogService>,
) -> Result<BacklogItems, ProblemDetails>
{
	let items = svc.list(session.user_id()).await?;

	Ok(BacklogItems(items))
}

/// Add a game to your backlog.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn create(
	session: Session,
	State(svc): State<BacklogService>,
	Json(req): Json<NewBacklogItem>,
) -> Result<CreatedBacklogItem, ProblemDetails>
{
	let item = svc.create(session.user_id(), req).await?;

	Ok(CreatedBacklogItem(item))
}

/// Update a backlog item.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn update(
	session: Session,
	State(svc): State<BacklogService>,
	Path(backlog_id): Path<String>,
	Json(req): Json<BacklogItemUpdate>,
) -> Result<UpdatedBacklogItem, ProblemDetails>
{
	let backlog_id = parse_backlog_id(backlog_id)?;
	let item = svc.update(session.user_id(), backlog_id, req).await?;

	Ok(UpdatedBacklogItem(item))
}

/// Remove a game from your backlog.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn delete(
	session: Session,
	State(svc): State<BacklogService>,
	Path(backlog_id): Path<String>,
) -> Result<StatusCode, ProblemDetails>
{
	let backlog_id = parse_backlog_id(backlog_id)?;

	svc.delete(session.user_id(), backlog_id).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Item IDs that are not UUIDs cannot belong to any item.
fn parse_backlog_id(raw: String) -> Result<BacklogID, Error>
{
	raw.parse::<BacklogID>()
		.map_err(|_| Error::UnknownItemID { raw })
}
