//! Talk endpoints nested under a camp.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{create_camp, create_talk, send, talk_body, test_app};
use serde_json::json;

#[tokio::test]
async fn create_talk_sets_location_and_speaker() -> Result<(), String> {
    let app = test_app();
    create_camp(&app.router, "ATL2018").await?;

    let res = send(&app.router, Method::POST, "/api/camps/ATL2018/talks", Some(talk_body(Some(1)))).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let talk_id = res.body["talkId"].as_i64().ok_or("missing talkId")?;
    assert_eq!(
        res.headers.get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some(format!("/api/camps/ATL2018/talks/{talk_id}").as_str())
    );
    assert_eq!(res.body["speaker"]["firstName"], "Shawn");

    let fetched = send(&app.router, Method::GET, &format!("/api/camps/ATL2018/talks/{talk_id}"), None).await?;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["title"], "Entity Framework From Scratch");
    assert_eq!(fetched.body["level"], 100);
    Ok(())
}

#[tokio::test]
async fn create_talk_reference_checks() -> Result<(), String> {
    let app = test_app();

    let res = send(&app.router, Method::POST, "/api/camps/NOPE/talks", Some(talk_body(Some(1)))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), Some("Camp does not exist."));

    create_camp(&app.router, "ATL2018").await?;
    let res = send(&app.router, Method::POST, "/api/camps/ATL2018/talks", Some(talk_body(None))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), Some("Speaker ID is required."));

    let res = send(&app.router, Method::POST, "/api/camps/ATL2018/talks", Some(talk_body(Some(99)))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), Some("Speaker could not be found."));

    let listed = send(&app.router, Method::GET, "/api/camps/ATL2018/talks", None).await?;
    assert_eq!(listed.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn talk_validation_rejects_short_abstract_and_bad_level() -> Result<(), String> {
    let app = test_app();
    create_camp(&app.router, "ATL2018").await?;

    let mut body = talk_body(Some(1));
    body["abstract"] = json!("too short");
    let res = send(&app.router, Method::POST, "/api/camps/ATL2018/talks", Some(body)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "validation_error");

    let mut body = talk_body(Some(1));
    body["level"] = json!(500);
    let res = send(&app.router, Method::POST, "/api/camps/ATL2018/talks", Some(body)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn listing_talks_includes_speakers() -> Result<(), String> {
    let app = test_app();
    create_camp(&app.router, "ATL2018").await?;
    create_talk(&app.router, "ATL2018", 1).await?;
    create_talk(&app.router, "ATL2018", 2).await?;

    let res = send(&app.router, Method::GET, "/api/camps/ATL2018/talks", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    let talks = res.body.as_array().ok_or("expected an array")?;
    assert_eq!(talks.len(), 2);
    assert!(talks.iter().all(|t| t["speaker"]["lastName"] == "Wildermuth"));
    Ok(())
}

#[tokio::test]
async fn talk_lookup_is_scoped_to_the_camp() -> Result<(), String> {
    let app = test_app();
    create_camp(&app.router, "ATL2018").await?;
    create_camp(&app.router, "SEA2019").await?;
    let talk_id = create_talk(&app.router, "ATL2018", 1).await?;

    let res = send(&app.router, Method::GET, &format!("/api/camps/SEA2019/talks/{talk_id}"), None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), Some("No talk found with that moniker and Id combination."));

    let res = send(&app.router, Method::GET, "/api/camps/ATL2018/talks/abc", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_with_unknown_speaker_keeps_current_speaker() -> Result<(), String> {
    let app = test_app();
    create_camp(&app.router, "ATL2018").await?;
    let talk_id = create_talk(&app.router, "ATL2018", 1).await?;
    let uri = format!("/api/camps/ATL2018/talks/{talk_id}");

    let mut body = talk_body(Some(99));
    body["title"] = json!("Entity Framework Revisited");
    let res = send(&app.router, Method::PUT, &uri, Some(body)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["title"], "Entity Framework Revisited");
    assert_eq!(res.body["speaker"]["speakerId"], 1);

    let res = send(&app.router, Method::PUT, &uri, Some(talk_body(Some(2)))).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["speaker"]["speakerId"], 2);

    let fetched = send(&app.router, Method::GET, &uri, None).await?;
    assert_eq!(fetched.body["speaker"]["firstName"], "Resa");
    assert_eq!(fetched.body["title"], "Entity Framework From Scratch");
    Ok(())
}

#[tokio::test]
async fn update_unknown_talk_is_not_found() -> Result<(), String> {
    let app = test_app();
    create_camp(&app.router, "ATL2018").await?;
    let res = send(&app.router, Method::PUT, "/api/camps/ATL2018/talks/42", Some(talk_body(Some(1)))).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), Some("Talk not found."));
    Ok(())
}

#[tokio::test]
async fn delete_talk() -> Result<(), String> {
    let app = test_app();
    create_camp(&app.router, "ATL2018").await?;
    let talk_id = create_talk(&app.router, "ATL2018", 1).await?;
    let uri = format!("/api/camps/ATL2018/talks/{talk_id}");

    let res = send(&app.router, Method::DELETE, "/api/camps/ATL2018/talks/999", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), Some("Talk not found."));

    app.repo.set_decline_writes(true);
    let res = send(&app.router, Method::DELETE, &uri, None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), Some("Failed to delete talk."));
    app.repo.set_decline_writes(false);

    let res = send(&app.router, Method::DELETE, &uri, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    let res = send(&app.router, Method::GET, &uri, None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn declined_talk_save_and_store_failure() -> Result<(), String> {
    let app = test_app();
    create_camp(&app.router, "ATL2018").await?;

    app.repo.set_decline_writes(true);
    let res = send(&app.router, Method::POST, "/api/camps/ATL2018/talks", Some(talk_body(Some(1)))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), Some("Failed to save new talk."));
    app.repo.set_decline_writes(false);

    let talk_id = create_talk(&app.router, "ATL2018", 1).await?;
    let uri = format!("/api/camps/ATL2018/talks/{talk_id}");
    app.repo.set_decline_writes(true);
    let mut body = talk_body(Some(2));
    body["title"] = json!("Never Saved");
    let res = send(&app.router, Method::PUT, &uri, Some(body)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "save_failed");
    assert_eq!(res.message(), Some("Bad Request"));
    app.repo.set_decline_writes(false);

    let unchanged = send(&app.router, Method::GET, &uri, None).await?;
    assert_eq!(unchanged.body["title"], "Entity Framework From Scratch");
    assert_eq!(unchanged.body["speaker"]["speakerId"], 1);

    app.repo.set_fail_requests(true);
    let res = send(&app.router, Method::GET, "/api/camps/ATL2018/talks", None).await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.message(), Some("Failed to retrieve resource."));

    let res = send(&app.router, Method::POST, "/api/camps/ATL2018/talks", Some(talk_body(Some(1)))).await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.message(), Some("Failed to retrieve resource."));
    Ok(())
}
