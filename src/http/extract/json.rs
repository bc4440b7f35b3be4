//! This module contains the [`Json`] extractor, a wrapper around [`axum::Json`]
//! with a custom error response.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::http::problem_details::{self, IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

#[allow(clippy::missing_docs_in_private_items)]
mod base
{
	pub use axum::extract::rejection::JsonRejection;
	pub use axum::Json;
}

/// An extractor for JSON request bodies.
///
/// This wraps [`axum::Json`], but produces problem details on rejection and
/// reports where in the body deserialization failed.
#[derive(Debug)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = JsonRejection;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection>
	{
		if !has_json_content_type(req.headers()) {
			return Err(JsonRejection::MissingContentType);
		}

		let bytes = Bytes::from_request(req, state)
			.await
			.map_err(base::JsonRejection::BytesRejection)?;

		serde_json::from_slice(&bytes).map(Self).map_err(Into::into)
	}
}

impl<T> IntoResponse for Json<T>
where
	base::Json<T>: IntoResponse,
{
	fn into_response(self) -> Response
	{
		base::Json(self.0).into_response()
	}
}

/// Rejection for the [`Json`] extractor.
#[derive(Debug, Error)]
pub enum JsonRejection
{
	/// The request did not declare a JSON body.
	#[error("expected request with `Content-Type: application/json`")]
	MissingContentType,

	/// The body could not be buffered.
	#[error(transparent)]
	Base(#[from] base::JsonRejection),

	/// The body was not valid JSON, or not valid for the expected type.
	#[error(transparent)]
	Deserialize(#[from] serde_json::Error),
}

impl IntoResponse for JsonRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}

impl IntoProblemDetails for JsonRejection
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::MissingContentType
			| Self::Base(base::JsonRejection::MissingJsonContentType(_)) => ProblemType::MissingHeader,
			Self::Deserialize(source) if !source.is_data() => ProblemType::MalformedRequestBody,
			Self::Base(_) | Self::Deserialize(_) => ProblemType::InvalidRequestBody,
		}
	}

	fn add_extension_members(&self, ext: &mut problem_details::ExtensionMembers)
	{
		if let Self::Deserialize(source) = self {
			ext.add("line", &source.line());
			ext.add("column", &source.column());
		}
	}
}

/// Checks if the given `headers` contain a JSON-like Content-Type.
fn has_json_content_type(headers: &http::HeaderMap) -> bool
{
	let Some(content_type) = headers.get(http::header::CONTENT_TYPE) else {
		return false;
	};

	let Ok(content_type) = content_type.to_str() else {
		return false;
	};

	let Ok(mime) = content_type.parse::<mime::Mime>() else {
		return false;
	};

	mime.type_() == "application"
		&& (mime.subtype() == "json" || mime.suffix().is_some_and(|name| name == "json"))
}

#[cfg(test)]
mod tests
{
	use serde::Deserialize;

	use super::*;
	use crate::testing;

	#[derive(Debug, Deserialize)]
	#[allow(dead_code)]
	struct Payload
	{
		username: String,
	}

	fn request(content_type: Option<&str>, body: &'static str) -> color_eyre::Result<Request>
	{
		let mut req = Request::builder().method(http::Method::POST).uri("/");

		if let Some(content_type) = content_type {
			req = req.header(http::header::CONTENT_TYPE, content_type);
		}

		Ok(req.body(axum::body::Body::from(body))?)
	}

	#[tokio::test]
	async fn accepts_json_suffix() -> color_eyre::Result<()>
	{
		let req = request(Some("application/vnd.backlog+json"), r#"{"username":"ada"}"#)?;
		let Json(payload) = Json::<Payload>::from_request(req, &()).await?;

		testing::assert_eq!(payload.username, "ada");

		Ok(())
	}

	#[tokio::test]
	async fn rejects_missing_content_type() -> color_eyre::Result<()>
	{
		let req = request(None, r#"{"username":"ada"}"#)?;
		let rejection = Json::<Payload>::from_request(req, &())
			.await
			.err()
			.ok_or_else(|| color_eyre::eyre::eyre!("request without content type was accepted"))?;

		testing::assert_eq!(rejection.problem_type(), ProblemType::MissingHeader);

		Ok(())
	}

	#[tokio::test]
	async fn reports_error_location() -> color_eyre::Result<()>
	{
		let req = request(Some("application/json"), "{\n  \"username\": 42\n}")?;
		let rejection = Json::<Payload>::from_request(req, &())
			.await
			.err()
			.ok_or_else(|| color_eyre::eyre::eyre!("invalid body was accepted"))?;

		testing::assert_eq!(rejection.problem_type(), ProblemType::InvalidRequestBody);
		testing::assert_matches!(&rejection, JsonRejection::Deserialize(source) if source.line() == 2);

		Ok(())
	}

	#[tokio::test]
	async fn syntax_errors_are_malformed() -> color_eyre::Result<()>
	{
		for body in ["{not json", r#"{"username": "ada""#, ""] {
			let req = request(Some("application/json"), body)?;
			let rejection = Json::<Payload>::from_request(req, &())
				.await
				.err()
				.ok_or_else(|| color_eyre::eyre::eyre!("{body:?} was accepted"))?;

			testing::assert_eq!(rejection.problem_type(), ProblemType::MalformedRequestBody);
			testing::assert_eq!(rejection.problem_type().status(), http::StatusCode::BAD_REQUEST);
		}

		Ok(())
	}
}
