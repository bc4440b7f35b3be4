//! The errors that can occur when reading or writing data files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::http::problem_details::{IntoProblemDetails, ProblemType};

/// Type alias with a default `Err` type of [`StoreError`].
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// The errors that can occur when interacting with a [`JsonFile`].
///
/// [`JsonFile`]: super::JsonFile
#[derive(Debug, Error)]
pub enum StoreError
{
	/// Reading or writing the file failed.
	#[error("failed to access data file")]
	Io
	{
		/// The file we tried to access.
		path: PathBuf,

		/// The original error.
		source: io::Error,
	},

	/// The file exists, but does not contain a valid JSON array of records.
	#[error("data file contains malformed JSON")]
	Malformed
	{
		/// The file we tried to parse.
		path: PathBuf,

		/// The original error.
		source: serde_json::Error,
	},

	/// The records could not be encoded as JSON.
	#[error("failed to encode records")]
	Encode(#[source] serde_json::Error),
}

impl IntoProblemDetails for StoreError
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::Internal
	}
}
