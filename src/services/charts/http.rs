//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};

use super::{ChartData, ChartService};
use crate::http::ProblemDetails;
use crate::services::auth::Session;

impl From<ChartService> for Router
{
	fn from(svc: ChartService) -> Self
	{
		Router::new()
			.route("/playtime", routing::get(playtime))
			.with_state(svc)
	}
}

/// Total playtime of your library, per backlog status.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn playtime(
	session: Session,
	State(svc): State<ChartService>,
) -> Result<ChartData, ProblemDetails>
{
	let chart = svc.playtime_by_status(session.user_id()).await?;

	Ok(chart)
}
