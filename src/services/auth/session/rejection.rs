//! Rejection types for [`Session`].
//!
//! [`Session`]: super::Session

use std::str::FromStr;

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::SessionID;
use crate::http::problem_details::{IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

/// Error that can occur while authenticating a session.
#[derive(Debug, Error)]
pub enum SessionRejection
{
	/// The cookie holding the session ID is missing.
	#[error("Authentication required.")]
	MissingCookie,

	/// The session ID could not be parsed.
	#[error("Invalid session.")]
	ParseSessionID
	{
		/// The original error we got from `value.parse()`.
		source: <SessionID as FromStr>::Err,
	},

	/// The session ID was invalid.
	///
	/// This happens either because we never issued the ID, or the session
	/// associated with that ID already expired.
	#[error("Session expired or invalid.")]
	InvalidSessionID,
}

impl IntoProblemDetails for SessionRejection
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::Unauthorized
	}
}

impl IntoResponse for SessionRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}
