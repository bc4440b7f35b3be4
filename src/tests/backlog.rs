use axum::body::Body;
use http::{header, Method, Request, StatusCode};
use serde_json::json;

use super::Context;
use crate::testing;

#[tokio::test]
async fn requires_a_session() -> color_eyre::Result<()>
{
	let cx = Context::offline()?;
	let missing = cx.request(Method::GET, "/api/backlog", None, None).await?;
	let garbage = cx
		.request(Method::GET, "/api/backlog", Some("sessionId=garbage"), None)
		.await?;

	testing::assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
	testing::assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

	Ok(())
}

#[tokio::test]
async fn crud() -> color_eyre::Result<()>
{
	let cx = Context::offline()?;
	let (user_id, cookie) = cx.register("ada").await?;

	let created = cx
		.request(
			Method::POST,
			"/api/backlog",
			Some(&cookie),
			Some(json!({ "appId": 620, "status": "NotStarted", "userRating": 8 })),
		)
		.await?;

	testing::assert_eq!(created.status, StatusCode::CREATED);
	testing::assert_eq!(created.body["appId"], "620");
	testing::assert_eq!(created.body["userId"], user_id.as_str());
	testing::assert_eq!(created.body["status"], "Not Started");
	testing::assert_eq!(created.body["userRating"], 8);
	testing::assert!(created.body["targetFinishDate"].is_null());

	let id = created.body["id"]
		.as_str()
		.ok_or_else(|| color_eyre::eyre::eyre!("missing id"))?
		.to_owned();

	let updated = cx
		.request(
			Method::PUT,
			&format!("/api/backlog/{id}"),
			Some(&cookie),
			Some(json!({ "status": "Playing", "userRating": null, "targetFinishDate": "2025-06-30" })),
		)
		.await?;

	testing::assert_eq!(updated.status, StatusCode::OK);
	testing::assert_eq!(updated.body["status"], "Playing");
	testing::assert!(updated.body["userRating"].is_null());
	testing::assert_eq!(updated.body["targetFinishDate"], "2025-06-30");

	let listed = cx.request(Method::GET, "/api/backlog", Some(&cookie), None).await?;

	testing::assert_eq!(listed.body, json!([updated.body]));

	let deleted = cx
		.request(Method::DELETE, &format!("/api/backlog/{id}"), Some(&cookie), None)
		.await?;

	testing::assert_eq!(deleted.status, StatusCode::NO_CONTENT);

	let listed = cx.request(Method::GET, "/api/backlog", Some(&cookie), None).await?;

	testing::assert_eq!(listed.body, json!([]));

	Ok(())
}

#[tokio::test]
async fn validation() -> color_eyre::Result<()>
{
	let cx = Context::offline()?;
	let (_, cookie) = cx.register("ada").await?;

	let missing_status = cx
		.request(Method::POST, "/api/backlog", Some(&cookie), Some(json!({ "appId": "620" })))
		.await?;

	let bad_rating = cx
		.request(
			Method::POST,
			"/api/backlog",
			Some(&cookie),
			Some(json!({ "appId": "620", "status": "Planning", "userRating": 11 })),
		)
		.await?;

	let bad_status = cx
		.request(
			Method::POST,
			"/api/backlog",
			Some(&cookie),
			Some(json!({ "appId": "620", "status": "Abandoned" })),
		)
		.await?;

	testing::assert_eq!(missing_status.status, StatusCode::BAD_REQUEST);
	testing::assert_eq!(missing_status.body["field"], "status");
	testing::assert_eq!(bad_rating.status, StatusCode::UNPROCESSABLE_ENTITY);
	testing::assert_eq!(bad_status.status, StatusCode::UNPROCESSABLE_ENTITY);

	let first = cx
		.request(
			Method::POST,
			"/api/backlog",
			Some(&cookie),
			Some(json!({ "appId": "620", "status": "Planning" })),
		)
		.await?;

	let duplicate = cx
		.request(
			Method::POST,
			"/api/backlog",
			Some(&cookie),
			Some(json!({ "appId": 620, "status": "Completed" })),
		)
		.await?;

	testing::assert_eq!(first.status, StatusCode::CREATED);
	testing::assert_eq!(duplicate.status, StatusCode::CONFLICT);

	let id = first.body["id"].as_str().unwrap_or_default().to_owned();
	let empty_update = cx
		.request(
			Method::PUT,
			&format!("/api/backlog/{id}"),
			Some(&cookie),
			Some(json!({ "appId": "440" })),
		)
		.await?;

	testing::assert_eq!(empty_update.status, StatusCode::BAD_REQUEST);

	Ok(())
}

#[tokio::test]
async fn ids_that_are_not_uuids_do_not_exist() -> color_eyre::Result<()>
{
	let cx = Context::offline()?;
	let (_, cookie) = cx.register("ada").await?;

	let delete = cx
		.request(Method::DELETE, "/api/backlog/not-a-uuid", Some(&cookie), None)
		.await?;

	let update = cx
		.request(
			Method::PUT,
			"/api/backlog/legacy-id-123",
			Some(&cookie),
			Some(json!({ "status": "Completed" })),
		)
		.await?;

	testing::assert_eq!(delete.status, StatusCode::NOT_FOUND);
	testing::assert_eq!(delete.body["id"], "not-a-uuid");
	testing::assert_eq!(update.status, StatusCode::NOT_FOUND);
	testing::assert_eq!(update.body["id"], "legacy-id-123");

	Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> color_eyre::Result<()>
{
	let cx = Context::offline()?;
	let (_, cookie) = cx.register("ada").await?;

	let req = Request::builder()
		.method(Method::POST)
		.uri("/api/backlog")
		.header(header::COOKIE, &cookie)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from("{not json"))?;

	let res = cx.send(req).await?;

	testing::assert_eq!(res.status, StatusCode::BAD_REQUEST);
	testing::assert_eq!(res.body["line"], 1);

	let truncated = Request::builder()
		.method(Method::POST)
		.uri("/api/backlog")
		.header(header::COOKIE, &cookie)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(r#"{"appId": "620""#))?;

	let res = cx.send(truncated).await?;

	testing::assert_eq!(res.status, StatusCode::BAD_REQUEST);

	Ok(())
}

#[tokio::test]
async fn items_of_other_users_are_invisible() -> color_eyre::Result<()>
{
	let cx = Context::offline()?;
	let (_, ada) = cx.register("ada").await?;
	let (_, bob) = cx.register("bob").await?;

	let created = cx
		.request(
			Method::POST,
			"/api/backlog",
			Some(&ada),
			Some(json!({ "appId": "620", "status": "Planning" })),
		)
		.await?;

	let id = created.body["id"].as_str().unwrap_or_default().to_owned();

	let update = cx
		.request(
			Method::PUT,
			&format!("/api/backlog/{id}"),
			Some(&bob),
			Some(json!({ "status": "Completed" })),
		)
		.await?;

	let delete = cx
		.request(Method::DELETE, &format!("/api/backlog/{id}"), Some(&bob), None)
		.await?;

	let listed = cx.request(Method::GET, "/api/backlog", Some(&bob), None).await?;

	testing::assert_eq!(update.status, StatusCode::NOT_FOUND);
	testing::assert_eq!(delete.status, StatusCode::NOT_FOUND);
	testing::assert_eq!(listed.body, json!([]));

	Ok(())
}
