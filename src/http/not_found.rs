//! Fallback for API paths that do not exist.

use axum::extract::OriginalUri;
use thiserror::Error;

use super::problem_details::{IntoProblemDetails, ProblemType};
use super::ProblemDetails;

/// No API route matched the request.
#[derive(Debug, Error)]
#[error("no API route for `{method} {path}`")]
struct RouteNotFound
{
	/// The request method.
	method: http::Method,

	/// The request path.
	path: String,
}

impl IntoProblemDetails for RouteNotFound
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::ResourceNotFound
	}
}

/// Answers requests to unknown API paths with a 404 problem response.
#[tracing::instrument(level = "debug")]
pub(crate) async fn api_not_found(method: http::Method, OriginalUri(uri): OriginalUri) -> ProblemDetails
{
	ProblemDetails::from(RouteNotFound { method, path: uri.path().to_owned() })
}
