//! CORS middleware.

use axum::http::{header, request, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use url::Url;

/// Creates a CORS layer that allows the dashboard to make authenticated
/// requests while it is served from a local dev server.
pub fn layer() -> CorsLayer
{
	CorsLayer::new()
		.allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
		.allow_credentials(true)
		.allow_headers([header::CONTENT_TYPE])
		.allow_origin(AllowOrigin::predicate(is_localhost))
}

/// Checks if an incoming request came from localhost, ignoring the port.
fn is_localhost(origin: &HeaderValue, _request: &request::Parts) -> bool
{
	let Ok(origin) = origin.to_str() else {
		return false;
	};

	let Ok(origin) = Url::parse(origin) else {
		return false;
	};

	if !matches!(origin.scheme(), "http" | "https") {
		return false;
	}

	matches!(origin.host_str(), Some("127.0.0.1" | "localhost"))
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use axum::Router;
	use tower::ServiceExt;

	use super::*;
	use crate::testing;

	async fn preflight(origin: &str) -> color_eyre::Result<Option<HeaderValue>>
	{
		let req = http::Request::builder()
			.method(Method::OPTIONS)
			.uri("/")
			.header(header::ORIGIN, origin)
			.header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
			.body(Body::empty())?;

		let res = Router::new()
			.route("/", axum::routing::put(|| async {}))
			.layer(layer())
			.oneshot(req)
			.await?;

		Ok(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).cloned())
	}

	#[tokio::test]
	async fn allows_localhost_on_any_port() -> color_eyre::Result<()>
	{
		testing::assert_eq!(
			preflight("http://localhost:5173").await?,
			Some(HeaderValue::from_static("http://localhost:5173"))
		);
		testing::assert_eq!(
			preflight("http://127.0.0.1:8080").await?,
			Some(HeaderValue::from_static("http://127.0.0.1:8080"))
		);

		Ok(())
	}

	#[tokio::test]
	async fn rejects_other_origins() -> color_eyre::Result<()>
	{
		testing::assert_eq!(preflight("https://example.org").await?, None);
		testing::assert_eq!(preflight("file://localhost").await?, None);

		Ok(())
	}
}
