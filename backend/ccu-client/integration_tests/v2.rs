//! CCU v2 client against a mock server.

use crate::helpers::{TEST_PASSWORD, TEST_USERNAME, v2_client};

use ccu_client::context::RequestContext;
use ccu_client::error::CcuClientError;
use ccu_client::v2::{Domain, PurgeAction, PurgeRequest, PurgeType};

use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_queue_reply_when_queue_length_called_then_returns_length() {
    // GIVEN: A default queue holding 42 purges
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ccu/v2/queues/default"))
        .and(basic_auth(TEST_USERNAME, TEST_PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "httpStatus": 200,
            "queueLength": 42,
            "detail": "The queue may take a minute to reflect new or removed requests.",
            "supportId": "17QY1405953107052757-292938848"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Asking for the queue length
    let reply = v2_client(&server)
        .queue_length(&RequestContext::background())
        .await
        .expect("Queue length should succeed");

    // THEN: The decoded length and envelope are returned
    assert_eq!(reply.queue_length, 42);
    assert_eq!(reply.response.support_id, "17QY1405953107052757-292938848");
}

/// **VALUE**: A request without a payload goes out with no body and no content type.
///
/// **BUG THIS CATCHES**: Would catch a JSON content type being set unconditionally,
/// or an empty `null`/`{}` body being attached to GETs.
#[tokio::test]
async fn given_queue_length_when_sent_then_no_body_and_no_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ccu/v2/queues/default"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "httpStatus": 200, "queueLength": 0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    v2_client(&server)
        .queue_length(&RequestContext::background())
        .await
        .expect("Queue length should succeed");

    let requests = server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("content-type").is_none());
    assert!(requests[0].headers.get("authorization").is_some());
}

/// **VALUE**: Purge ids and queue names stay a single path segment.
///
/// **WHY THIS MATTERS**: Both come from callers. Unescaped `/`, `?` or `#` would
/// send the request to a different endpoint.
///
/// **BUG THIS CATCHES**: Would catch ids being formatted into the path instead of
/// being percent-encoded as one segment.
#[tokio::test]
async fn given_reserved_characters_in_id_when_purge_status_called_then_encoded_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ccu/v2/purges/a%2Fb%3Fc%23d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "httpStatus": 200,
            "purgeId": "a/b?c#d",
            "purgeStatus": "In-Progress"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = v2_client(&server)
        .purge_status("a/b?c#d", &RequestContext::background())
        .await
        .expect("Status should succeed");

    assert_eq!(status.purge_id, "a/b?c#d");
    let requests = server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn given_queue_name_with_slash_when_purge_called_then_encoded_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v2/queues/..%2Fpurges"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "httpStatus": 201,
            "purgeId": "q2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PurgeRequest::new(["12345"]).with_queue("../purges");

    let reply = v2_client(&server)
        .purge(&request, &RequestContext::background())
        .await
        .expect("Purge should be accepted");

    assert_eq!(reply.purge_id, "q2");
}

/// **VALUE**: A submitted purge carries defaults on the wire and a computed ETA.
///
/// **WHY THIS MATTERS**: Callers schedule status polling off the ETA. A missing
/// submission stamp makes the ETA meaningless.
///
/// **BUG THIS CATCHES**: Would catch if defaults were not applied before encoding,
/// if the queue name leaked into the body, or if `submitted_at` was not stamped.
#[tokio::test]
async fn given_accepted_purge_when_purge_called_then_eta_is_submission_plus_estimate() {
    // GIVEN: A server accepting a purge with a 300s estimate
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v2/queues/default"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "type": "arl",
            "action": "remove",
            "domain": "production",
            "objects": ["https://www.example.com/index.html"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "httpStatus": 201,
            "estimatedSeconds": 300,
            "purgeId": "abc",
            "progressUri": "/ccu/v2/purges/abc",
            "pingAfterSeconds": 300,
            "detail": "Request accepted."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PurgeRequest {
        objects: vec![String::from("https://www.example.com/index.html")],
        ..PurgeRequest::default()
    };

    // WHEN: Submitting a request with every classification field unset
    let before = Utc::now();
    let reply = v2_client(&server)
        .purge(&request, &RequestContext::background())
        .await
        .expect("Purge should be accepted");
    let after = Utc::now();

    // THEN: The id and ETA are populated
    assert_eq!(reply.purge_id, "abc");
    assert_eq!(reply.progress_uri, "/ccu/v2/purges/abc");
    let eta = reply.eta().expect("Accepted purge should have an ETA");
    assert!(eta >= before + chrono::Duration::seconds(300));
    assert!(eta <= after + chrono::Duration::seconds(300));
}

#[tokio::test]
async fn given_named_queue_when_purge_called_then_posts_to_that_queue() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v2/queues/emergency"))
        .and(body_json(json!({
            "type": "cpcode",
            "action": "invalidate",
            "domain": "staging",
            "objects": ["12345"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "httpStatus": 201,
            "purgeId": "q1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PurgeRequest::new(["12345"])
        .with_queue("emergency")
        .with_type(PurgeType::Cpcode)
        .with_action(PurgeAction::Invalidate)
        .with_domain(Domain::Staging);

    let reply = v2_client(&server)
        .purge(&request, &RequestContext::background())
        .await
        .expect("Purge should be accepted");

    assert_eq!(reply.purge_id, "q1");
}

#[tokio::test]
async fn given_bad_request_reply_when_purge_called_then_api_error_carries_envelope() {
    // GIVEN: The server rejects the payload
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v2/queues/default"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "httpStatus": 400,
            "title": "Bad Request",
            "detail": "missing objects",
            "supportId": "17PY1321286429616716-211907680",
            "describedBy": "https://api.ccu.akamai.com/ccu/v2/errors/bad-request"
        })))
        .mount(&server)
        .await;

    // WHEN: Submitting an empty purge
    let err = v2_client(&server)
        .purge(&PurgeRequest::new(Vec::<String>::new()), &RequestContext::background())
        .await
        .expect_err("Purge should be rejected");

    // THEN: The full reply is available on the error
    let response = err.api_response().expect("Should be an Api error");
    assert_eq!(response.status_code, 400);
    assert_eq!(response.support_id, "17PY1321286429616716-211907680");
    assert!(err.to_string().contains("Bad Request: missing objects"));
    assert!(!err.is_retryable());
}

/// **VALUE**: A raw 401 is reported as `Unauthorized`, not as a decode failure.
///
/// **WHY THIS MATTERS**: The v2 endpoint answers bad credentials with an HTML page.
/// Without the early check callers would see a confusing JSON error.
///
/// **BUG THIS CATCHES**: Would catch if the 401 check ran after decoding.
#[tokio::test]
async fn given_raw_401_when_queue_length_called_then_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><body>401 Unauthorized</body></html>"),
        )
        .mount(&server)
        .await;

    let err = v2_client(&server)
        .queue_length(&RequestContext::background())
        .await
        .expect_err("Should be rejected");

    assert!(matches!(err, CcuClientError::Unauthorized { .. }));
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn given_done_status_when_purge_status_called_then_is_done() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ccu/v2/purges/abc"))
        .and(basic_auth(TEST_USERNAME, TEST_PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "httpStatus": 200,
            "purgeId": "abc",
            "purgeStatus": "Done",
            "originalEstimatedSeconds": 480,
            "originalQueueLength": 6,
            "submittedBy": "purger",
            "submissionTime": "2014-07-21T14:36:03Z",
            "completionTime": "2014-07-21T14:42:45Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = v2_client(&server)
        .purge_status("abc", &RequestContext::background())
        .await
        .expect("Status should succeed");

    assert!(status.is_done());
    assert_eq!(status.original_queue_length, 6);
    assert_eq!(status.submitted_by, "purger");
}

#[tokio::test]
async fn given_unknown_purge_id_when_purge_status_called_then_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ccu/v2/purges/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "httpStatus": 404,
            "title": "Not Found",
            "detail": "The requested purge id was not found."
        })))
        .mount(&server)
        .await;

    let err = v2_client(&server)
        .purge_status("missing", &RequestContext::background())
        .await
        .expect_err("Unknown id should fail");

    assert!(err.is_not_found());
    assert_eq!(err.phase(), "classify");
}

/// **VALUE**: v2 decode failures drop the reply.
///
/// **BUG THIS CATCHES**: Would catch if v2 started attaching partial responses,
/// diverging from its documented behavior.
#[tokio::test]
async fn given_malformed_body_when_queue_length_called_then_decode_error_without_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = v2_client(&server)
        .queue_length(&RequestContext::background())
        .await
        .expect_err("Malformed body should fail");

    match err {
        CcuClientError::Decode { response, .. } => assert!(response.is_none()),
        other => panic!("Expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn given_cancelled_context_when_purge_called_then_nothing_is_sent() {
    // GIVEN: A context cancelled before the call
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (context, handle) = RequestContext::cancellable();
    handle.cancel();

    // WHEN: Submitting a purge
    let err = v2_client(&server)
        .purge(&PurgeRequest::new(["https://www.example.com/"]), &context)
        .await
        .expect_err("Cancelled context should fail");

    // THEN: A cancelled transport error, never retryable
    match &err {
        CcuClientError::Transport { is_cancelled, .. } => assert!(*is_cancelled),
        other => panic!("Expected Transport, got {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn given_slow_server_when_deadline_passes_then_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "httpStatus": 200, "queueLength": 1 }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let context = RequestContext::with_timeout(Duration::from_millis(100));

    let err = v2_client(&server)
        .queue_length(&context)
        .await
        .expect_err("Deadline should expire first");

    match &err {
        CcuClientError::Transport { is_timeout, .. } => assert!(*is_timeout),
        other => panic!("Expected Transport, got {other:?}"),
    }
    assert!(err.is_retryable());
}
