use anyhow::{Result, anyhow};
use gnocchi_client::{
    ArchivePolicyApi, Auth, ClientConfig, ClientError, GnocchiClient, HEADER_AUTH_TOKEN,
    HEADER_REQUEST_ID, StatusApi,
};
use httpmock::Method::PATCH;
use httpmock::prelude::*;
use serde_json::{Map, Value, json};

fn client_for(server: &MockServer, auth: Option<Auth>) -> Result<GnocchiClient> {
    let endpoint = server
        .base_url()
        .parse()
        .map_err(|_| anyhow!("invalid URL"))?;
    let mut config = ClientConfig::new(endpoint);
    config.auth = auth;
    config.request_id = Some("req-42".into());
    Ok(GnocchiClient::new(config)?)
}

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[tokio::test]
async fn list_decodes_policies_and_sends_token() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/archive_policy")
            .header(HEADER_AUTH_TOKEN, "secret-token")
            .header(HEADER_REQUEST_ID, "req-42");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([
                {
                    "name": "low",
                    "back_window": 0,
                    "definition": [{"granularity": "0:05:00", "points": 12, "timespan": "1:00:00"}],
                    "aggregation_methods": ["mean"]
                },
                {"name": "high", "definition": []}
            ]));
    });

    let client = client_for(&server, Some(Auth::Token("secret-token".into())))?;
    let policies = client.archive_policy().list().await?;

    mock.assert();
    assert_eq!(policies.len(), 2);
    assert_eq!(policies[0].name, "low");
    assert!(policies[1].back_window.is_none());
    Ok(())
}

#[tokio::test]
async fn basic_auth_uses_empty_password() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/archive_policy/low")
            .header("authorization", "Basic YWRtaW46");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"name": "low", "definition": []}));
    });

    let client = client_for(
        &server,
        Some(Auth::Basic {
            user: "admin".into(),
        }),
    )?;
    let policy = client.archive_policy().get("low").await?;

    mock.assert();
    assert_eq!(policy.name, "low");
    Ok(())
}

#[tokio::test]
async fn create_posts_payload_verbatim() -> Result<()> {
    let server = MockServer::start_async().await;
    let body = json!({
        "name": "high-res",
        "definition": [{"granularity": "60", "points": "20"}]
    });
    let expected = body.clone();
    let mock = server.mock(move |when, then| {
        when.method(POST)
            .path("/v1/archive_policy")
            .json_body(expected.clone());
        then.status(201)
            .header("content-type", "application/json")
            .json_body(json!({
                "name": "high-res",
                "back_window": 0,
                "definition": [{"granularity": "0:01:00", "points": 20, "timespan": "0:20:00"}],
                "aggregation_methods": ["mean", "max"]
            }));
    });

    let client = client_for(&server, None)?;
    let created = client.archive_policy().create(&as_map(body)).await?;

    mock.assert();
    assert_eq!(created.name, "high-res");
    assert_eq!(created.definition[0]["points"], json!(20));
    Ok(())
}

#[tokio::test]
async fn update_patches_named_policy() -> Result<()> {
    let server = MockServer::start_async().await;
    let body = json!({"definition": [{"granularity": "1", "timespan": "1 hour"}]});
    let expected = body.clone();
    let mock = server.mock(move |when, then| {
        when.method(PATCH)
            .path("/v1/archive_policy/low")
            .json_body(expected.clone());
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"name": "low", "definition": []}));
    });

    let client = client_for(&server, None)?;
    client.archive_policy().update("low", &as_map(body)).await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn delete_relays_not_found() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/v1/archive_policy/missing-policy");
        then.status(404)
            .header("content-type", "application/json")
            .json_body(json!({
                "code": 404,
                "title": "Not Found",
                "description": "Archive policy missing-policy does not exist"
            }));
    });

    let client = client_for(&server, None)?;
    let err = client
        .archive_policy()
        .delete("missing-policy")
        .await
        .expect_err("404 must fail");

    mock.assert_hits(1);
    assert!(
        matches!(err, ClientError::NotFound { ref message } if message.contains("missing-policy"))
    );
    Ok(())
}

#[tokio::test]
async fn delete_accepts_no_content() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/v1/archive_policy/low");
        then.status(204);
    });

    let client = client_for(&server, None)?;
    client.archive_policy().delete("low").await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn conflict_is_classified() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/v1/archive_policy");
        then.status(409)
            .header("content-type", "application/json")
            .json_body(json!({
                "code": 409,
                "title": "Conflict",
                "description": "Archive policy low already exists"
            }));
    });

    let client = client_for(&server, None)?;
    let err = client
        .archive_policy()
        .create(&as_map(json!({"name": "low"})))
        .await
        .expect_err("409 must fail");

    assert_eq!(err.to_string(), "Archive policy low already exists (HTTP 409)");
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/v1/archive_policy");
        then.status(200)
            .header("content-type", "application/json")
            .body("{\"not\": \"a list\"}");
    });

    let client = client_for(&server, None)?;
    let err = client
        .archive_policy()
        .list()
        .await
        .expect_err("decode must fail");

    assert!(matches!(err, ClientError::Decode { .. }));
    Ok(())
}

#[tokio::test]
async fn status_reads_backlog() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/status");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "storage": {"summary": {"metrics": 2, "measures": 9}},
                "metricd": {"processors": ["node-1"]}
            }));
    });

    let client = client_for(&server, None)?;
    let status = client.status().get().await?;

    mock.assert();
    assert_eq!(status.storage.summary.measures, 9);
    Ok(())
}
