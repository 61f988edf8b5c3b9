//! CCU v3 (Fast Purge) client against a mock server.

use crate::helpers::{TEST_ACCESS_TOKEN, TEST_CLIENT_TOKEN, edgerc_contents, v3_client};

use ccu_client::context::RequestContext;
use ccu_client::error::CcuClientError;
use ccu_client::v3::{CcuV3Client, Network, PurgeAction, PurgeRequest, PurgeType};

use std::io::Write;

use serde_json::json;
use serial_test::serial;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "httpStatus": 201,
        "estimatedSeconds": 5,
        "purgeId": "e535071c-26b2-11e7-94d7-276f2f54d938",
        "supportId": "17PY1492793544958045-219026624",
        "detail": "Request accepted"
    }))
}

/// **VALUE**: The request lands on the classification path with a signed header.
///
/// **WHY THIS MATTERS**: Fast Purge routes purely on the path; the body only
/// carries objects. An unsigned request is rejected outright.
///
/// **BUG THIS CATCHES**: Would catch if classification fields leaked into the body,
/// if defaults were applied to the wrong segment, or if signing was skipped.
#[tokio::test]
async fn given_default_request_when_purge_called_then_signed_post_to_invalidate_url_production() {
    // GIVEN: A server accepting invalidations
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v3/invalidate/url/production"))
        .and(header_exists("authorization"))
        .and(body_json(json!({ "objects": ["https://www.example.com/index.html"] })))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Submitting a request with nothing classified
    let reply = v3_client(&server)
        .purge(
            &PurgeRequest::new(["https://www.example.com/index.html"]),
            None,
        )
        .await
        .expect("Purge should be accepted");

    // THEN: The reply is decoded and the header names the EdgeGrid scheme
    assert_eq!(reply.purge_id, "e535071c-26b2-11e7-94d7-276f2f54d938");
    assert_eq!(reply.estimated_seconds, 5);

    let requests = server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    let authorization = requests[0]
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .expect("Authorization header should be ASCII");
    assert!(authorization.starts_with("EG1-HMAC-SHA256 "));
    assert!(authorization.contains(&format!("client_token={TEST_CLIENT_TOKEN};")));
    assert!(authorization.contains(&format!("access_token={TEST_ACCESS_TOKEN};")));
    assert!(authorization.contains(";signature="));
}

#[tokio::test]
async fn given_tag_delete_on_staging_when_purge_called_then_path_and_hostname_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v3/delete/tag/staging"))
        .and(body_json(json!({
            "hostname": "www.example.com",
            "objects": ["homepage"]
        })))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let request = PurgeRequest::new(["homepage"])
        .with_type(PurgeType::Tag)
        .with_action(PurgeAction::Delete)
        .with_network(Network::Staging)
        .with_hostname("www.example.com");

    v3_client(&server)
        .purge(&request, Some(&RequestContext::background()))
        .await
        .expect("Purge should be accepted");
}

#[tokio::test]
async fn given_bad_request_reply_when_purge_called_then_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "httpStatus": 400,
            "title": "Bad Request",
            "detail": "Invalid JSON body",
            "supportId": "17PY1499201244404195-3206397856"
        })))
        .mount(&server)
        .await;

    let err = v3_client(&server)
        .purge(&PurgeRequest::new(["x"]), None)
        .await
        .expect_err("Purge should be rejected");

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.phase(), "classify");
    assert!(err.to_string().contains("Bad Request: Invalid JSON body"));
}

/// **VALUE**: v3 keeps the partial reply when the body is not JSON.
///
/// **WHY THIS MATTERS**: Gateways answer with HTML on outages; the status and
/// body are the only clues a caller has.
///
/// **BUG THIS CATCHES**: Would catch if the raw reply was discarded on decode failure.
#[tokio::test]
async fn given_html_gateway_error_when_purge_called_then_decode_error_keeps_partial_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(502).set_body_raw("<html>Bad Gateway</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = v3_client(&server)
        .purge(&PurgeRequest::new(["x"]), None)
        .await
        .expect_err("Malformed body should fail");

    assert_eq!(err.status_code(), Some(502));
    match err {
        CcuClientError::Decode {
            response: Some(partial),
            ..
        } => {
            assert_eq!(partial.status.0, 502);
            assert_eq!(partial.body, "<html>Bad Gateway</html>");
            assert_eq!(
                partial
                    .headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok()),
                Some("text/html")
            );
        }
        other => panic!("Expected Decode with partial reply, got {other:?}"),
    }
}

#[tokio::test]
async fn given_cancelled_context_when_purge_called_then_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(accepted())
        .expect(0)
        .mount(&server)
        .await;

    let (context, handle) = RequestContext::cancellable();
    handle.cancel();

    let err = v3_client(&server)
        .purge(&PurgeRequest::new(["x"]), Some(&context))
        .await
        .expect_err("Cancelled context should fail");

    assert!(matches!(
        err,
        CcuClientError::Transport {
            is_cancelled: true,
            ..
        }
    ));
}

/// **VALUE**: A client built without configuration reads `.edgerc` on first use.
///
/// **BUG THIS CATCHES**: Would catch if the lazy load ignored the configured path or
/// section, or if clones loaded separately instead of sharing one result.
#[tokio::test]
#[serial]
async fn given_edgerc_file_when_first_purge_called_then_config_loaded_lazily() {
    // GIVEN: An edgerc with a dedicated section and a client that has not loaded it
    let mut edgerc = NamedTempFile::new().expect("Failed to create temp edgerc");
    edgerc
        .write_all(edgerc_contents("ccu_integration").as_bytes())
        .expect("Failed to write temp edgerc");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v3/invalidate/url/production"))
        .and(header_exists("authorization"))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let client = CcuV3Client::new()
        .expect("Failed to build v3 client")
        .with_edgerc(edgerc.path())
        .with_section("ccu_integration")
        .with_base_url(&server.uri())
        .expect("Mock server URI should parse");
    let clone = client.clone();

    // WHEN: Purging through the original
    client
        .purge(&PurgeRequest::new(["https://www.example.com/"]), None)
        .await
        .expect("Purge should be accepted");

    // THEN: The clone sees the very same loaded configuration
    let loaded = client.config().expect("Config should be cached");
    assert_eq!(loaded.host, "akab-host.luna.akamaiapis.net");
    assert!(std::ptr::eq(
        loaded,
        clone.config().expect("Clone should share the cache")
    ));
}

#[tokio::test]
#[serial]
async fn given_missing_edgerc_when_purge_called_then_config_error_and_nothing_sent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(accepted())
        .expect(0)
        .mount(&server)
        .await;

    let client = CcuV3Client::new()
        .expect("Failed to build v3 client")
        .with_edgerc(dir.path().join("absent.edgerc"))
        .with_section("ccu_integration_missing")
        .with_base_url(&server.uri())
        .expect("Mock server URI should parse");

    let err = client
        .purge(&PurgeRequest::new(["x"]), None)
        .await
        .expect_err("Missing config should fail");

    assert_eq!(err.phase(), "configure");
}
