#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use camp_api::model::Speaker;
use camp_api::{app_router, AppState, MemoryCampRepository, Settings, SettingsHandle};
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryCampRepository>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> Option<&str> {
        self.body.get("error")?.get("message")?.as_str()
    }
}

pub fn speaker(speaker_id: i32, first: &str, last: &str) -> Speaker {
    Speaker {
        speaker_id,
        first_name: first.into(),
        last_name: last.into(),
        ..Speaker::default()
    }
}

/// Router over an empty memory store with speakers 1 and 2 registered.
pub fn test_app() -> TestApp {
    test_app_with_settings(SettingsHandle::fixed(Settings::default()))
}

pub fn test_app_with_settings(settings: SettingsHandle) -> TestApp {
    let repo = Arc::new(MemoryCampRepository::new());
    repo.insert_speaker(speaker(1, "Shawn", "Wildermuth")).unwrap();
    repo.insert_speaker(speaker(2, "Resa", "Wildermuth")).unwrap();
    let state = AppState::new(repo.clone(), settings);
    TestApp {
        router: app_router(state, 1024 * 1024),
        repo,
    }
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse, String> {
    send_with_headers(router, method, uri, &[], body).await
}

pub async fn send_with_headers(
    router: &Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> Result<TestResponse, String> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let req = if let Some(payload) = body {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        let bytes = serde_json::to_vec(&payload).map_err(|err| format!("serialize request body: {err}"))?;
        builder
            .body(Body::from(bytes))
            .map_err(|err| format!("build request: {err}"))?
    } else {
        builder
            .body(Body::empty())
            .map_err(|err| format!("build request: {err}"))?
    };

    let response = router
        .clone()
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .map_err(|err| format!("read response body: {err}"))?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Ok(TestResponse { status, headers, body })
}

pub fn camp_body(moniker: &str) -> Value {
    json!({
        "name": "Atlanta Code Camp",
        "moniker": moniker,
        "eventDate": "2018-10-18",
        "length": 1,
        "venue": "Atlanta Convention Center",
        "address1": "123 Main Street",
        "cityTown": "Atlanta",
        "stateProvince": "GA",
        "postalCode": "12345",
        "country": "USA"
    })
}

pub fn talk_body(speaker_id: Option<i32>) -> Value {
    let mut body = json!({
        "title": "Entity Framework From Scratch",
        "abstract": "Working with Entity Framework from the ground up",
        "level": 100
    });
    if let Some(id) = speaker_id {
        body["speaker"] = json!({ "speakerId": id });
    }
    body
}

pub async fn create_camp(router: &Router, moniker: &str) -> Result<TestResponse, String> {
    send(router, Method::POST, "/api/camps", Some(camp_body(moniker))).await
}

pub async fn create_talk(router: &Router, moniker: &str, speaker_id: i32) -> Result<i64, String> {
    let res = send(
        router,
        Method::POST,
        &format!("/api/camps/{moniker}/talks"),
        Some(talk_body(Some(speaker_id))),
    )
    .await?;
    if res.status != StatusCode::CREATED {
        return Err(format!("talk create returned {}: {}", res.status, res.body));
    }
    res.body
        .get("talkId")
        .and_then(Value::as_i64)
        .ok_or_else(|| "created talk has no talkId".to_string())
}
