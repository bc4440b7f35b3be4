//! This module contains the [`ProblemType`] enum.
//!
//! It represents an exhaustive list of all the possible error conditions the
//! API might return.

use std::sync::OnceLock;

use serde::{Serialize, Serializer};
use url::Url;

/// The base URL for the problem type documentation.
static BASE_URL: OnceLock<Url> = OnceLock::new();

/// Fallback for [`BASE_URL`] if it was never set.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Sets `BASE_URL`.
///
/// Only the first call has any effect.
#[doc(hidden)]
pub(crate) fn set_base_url(url: Url)
{
	if let Err(url) = BASE_URL.set(url) {
		tracing::debug!(%url, "problem type base url was already set");
	}
}

/// A problem type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType
{
	/// The request was well-formed, but some of its values did not make sense,
	/// e.g. a password that is too short or a required field that was left
	/// empty.
	InvalidInput,

	/// You failed to provide a required request header.
	MissingHeader,

	/// You did not provide the necessary authentication information to perform
	/// your request, or the credentials you provided were wrong.
	Unauthorized,

	/// You are authenticated, but not allowed to act on the resource you
	/// requested.
	Forbidden,

	/// Neither you nor the server have configured a Steam Web API key, so your
	/// library cannot be fetched.
	///
	/// Store a key via `POST /api/user/{id}/apikey` and try again.
	MissingSteamApiKey,

	/// Steam refused to hand out your library, usually because your profile
	/// or game details are private.
	SteamProfileInaccessible,

	/// A requested resource could not be found.
	ResourceNotFound,

	/// A request for creating a resource was made, but rejected because the
	/// resource already exists.
	ResourceAlreadyExists,

	/// You provided path parameters which could not be deserialized.
	InvalidPathParameters,

	/// You provided a request body which was valid JSON, but did not have the
	/// expected shape.
	InvalidRequestBody,

	/// You provided a request body which was not valid JSON at all.
	MalformedRequestBody,

	/// An internal failure occurred.
	///
	/// Any occurrence of this problem type is considered a bug!
	Internal,

	/// We failed to communicate with an external service, such as Steam.
	ExternalService,
}

impl ProblemType
{
	/// Returns the HTTP status code for this problem type.
	pub fn status(&self) -> http::StatusCode
	{
		use http::StatusCode as S;

		match self {
			Self::InvalidInput | Self::MissingHeader | Self::MalformedRequestBody => S::BAD_REQUEST,
			Self::Unauthorized => S::UNAUTHORIZED,
			Self::Forbidden | Self::MissingSteamApiKey | Self::SteamProfileInaccessible => {
				S::FORBIDDEN
			}
			Self::ResourceNotFound => S::NOT_FOUND,
			Self::ResourceAlreadyExists => S::CONFLICT,
			Self::InvalidPathParameters | Self::InvalidRequestBody => S::UNPROCESSABLE_ENTITY,
			Self::Internal => S::INTERNAL_SERVER_ERROR,
			Self::ExternalService => S::BAD_GATEWAY,
		}
	}

	/// Returns a short, human-readable, description of this problem type.
	pub fn title(&self) -> &'static str
	{
		match self {
			Self::InvalidInput => "Invalid input",
			Self::MissingHeader => "Missing header",
			Self::Unauthorized => "Unauthorized",
			Self::Forbidden => "Forbidden",
			Self::MissingSteamApiKey => "Missing Steam API key",
			Self::SteamProfileInaccessible => "Steam profile inaccessible",
			Self::ResourceNotFound => "Resource not found",
			Self::ResourceAlreadyExists => "Resource already exists",
			Self::InvalidPathParameters => "Invalid path parameters",
			Self::InvalidRequestBody => "Invalid request body",
			Self::MalformedRequestBody => "Malformed request body",
			Self::Internal => "Internal",
			Self::ExternalService => "External service",
		}
	}

	/// Returns the URI fragment identifying this problem type.
	pub fn slug(&self) -> &'static str
	{
		match self {
			Self::InvalidInput => "invalid-input",
			Self::MissingHeader => "missing-header",
			Self::Unauthorized => "unauthorized",
			Self::Forbidden => "forbidden",
			Self::MissingSteamApiKey => "missing-steam-api-key",
			Self::SteamProfileInaccessible => "steam-profile-inaccessible",
			Self::ResourceNotFound => "resource-not-found",
			Self::ResourceAlreadyExists => "resource-already-exists",
			Self::InvalidPathParameters => "invalid-path-parameters",
			Self::InvalidRequestBody => "invalid-request-body",
			Self::MalformedRequestBody => "malformed-request-body",
			Self::Internal => "internal",
			Self::ExternalService => "external-service",
		}
	}
}

impl Serialize for ProblemType
{
	// Serialize as a URI as specified by the RFC.
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let base_url = BASE_URL.get().map(Url::as_str).unwrap_or(DEFAULT_BASE_URL);
		let url = format!(
			"{}/docs/problem-types#{}",
			base_url.trim_end_matches('/'),
			self.slug()
		);

		url.serialize(serializer)
	}
}
