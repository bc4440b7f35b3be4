//! HTTP Problem Details [RFC 9457].
//!
//! The [`ProblemDetails`] can be used for HTTP responses, as it implements
//! [`IntoResponse`]. It can be created from any error type that implements
//! [`IntoProblemDetails`].
//!
//! [RFC 9457]: https://www.rfc-editor.org/rfc/rfc9457.html

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tap::Tap;

pub(crate) mod problem_type;
pub use problem_type::ProblemType;

mod extension_members;
pub use extension_members::ExtensionMembers;

mod into_problem_details;
pub use into_problem_details::IntoProblemDetails;

/// HTTP Problem Details, as described in [RFC 9457].
///
/// [RFC 9457]: https://www.rfc-editor.org/rfc/rfc9457.html
#[derive(Debug, Serialize)]
pub struct ProblemDetails
{
	/// The problem type.
	#[serde(rename = "type")]
	problem_type: ProblemType,

	/// The HTTP status code the response should have.
	#[serde(skip_serializing)]
	status: http::StatusCode,

	/// Short, human-readable, description of the problem type.
	title: &'static str,

	/// Short, human-readable, error message describing this particular problem.
	detail: String,

	/// Any extra details that will be included in the response body.
	#[serde(flatten)]
	extra: ExtensionMembers,
}

impl ProblemDetails
{
	/// Returns the problem type of this response.
	pub fn problem_type(&self) -> ProblemType
	{
		self.problem_type
	}

	/// Returns the HTTP status code this response will have.
	pub fn status(&self) -> http::StatusCode
	{
		self.status
	}
}

impl<E> From<E> for ProblemDetails
where
	E: IntoProblemDetails,
{
	#[track_caller]
	fn from(error: E) -> Self
	{
		tracing::debug!(loc = %Location::caller(), ?error, "creating error response");

		let problem_type = error.problem_type();
		let status = problem_type.status();
		let title = problem_type.title();
		let detail = error.to_string();
		let extra = ExtensionMembers::new().tap_mut(|ext| {
			error.add_extension_members(ext);
		});

		Self { problem_type, status, title, detail, extra }
	}
}

impl IntoResponse for ProblemDetails
{
	fn into_response(self) -> Response
	{
		let status = self.status;
		let content_type = "application/problem+json";
		let headers = [(http::header::CONTENT_TYPE, content_type)];
		let body = crate::http::extract::Json(self);

		(status, headers, body).into_response()
	}
}

#[cfg(test)]
mod tests
{
	use thiserror::Error;

	use super::*;
	use crate::testing;

	#[derive(Debug, Error)]
	#[error("app `{app_id}` is already tracked")]
	struct AlreadyTracked
	{
		app_id: u32,
	}

	impl IntoProblemDetails for AlreadyTracked
	{
		fn problem_type(&self) -> ProblemType
		{
			ProblemType::ResourceAlreadyExists
		}

		fn add_extension_members(&self, ext: &mut ExtensionMembers)
		{
			ext.add("appId", &self.app_id);
		}
	}

	#[tokio::test]
	async fn response_has_problem_json_body() -> color_eyre::Result<()>
	{
		let res = ProblemDetails::from(AlreadyTracked { app_id: 620 }).into_response();

		testing::assert_eq!(res.status(), http::StatusCode::CONFLICT);
		testing::assert_eq!(
			res.headers()
				.get(http::header::CONTENT_TYPE)
				.map(|value| value.as_bytes()),
			Some(&b"application/problem+json"[..])
		);

		let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
		let json = serde_json::from_slice::<serde_json::Value>(&body)?;

		testing::assert_eq!(json["title"], "Resource already exists");
		testing::assert_eq!(json["detail"], "app `620` is already tracked");
		testing::assert_eq!(json["appId"], 620);
		testing::assert!(json["type"]
			.as_str()
			.is_some_and(|url| url.ends_with("/docs/problem-types#resource-already-exists")));
		testing::assert!(json.get("status").is_none());

		Ok(())
	}
}
