//! Request / Response types for this service.

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::extract::Json;

/// Label of the only dataset in the playtime chart.
pub const PLAYTIME_DATASET_LABEL: &str = "Total playtime (hours)";

/// Data for a labelled chart, in the shape the dashboard feeds its chart
/// library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData
{
	/// One label per data point.
	pub labels: Vec<String>,

	/// The series to plot.
	pub datasets: Vec<Dataset>,
}

/// A single series of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset
{
	/// What the series measures.
	pub label: String,

	/// One value per chart label.
	pub data: Vec<u64>,
}

impl IntoResponse for ChartData
{
	fn into_response(self) -> Response
	{
		Json(self).into_response()
	}
}
