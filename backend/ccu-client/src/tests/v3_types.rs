// Unit tests for v3 request/response bodies

use crate::v3::{Network, PurgeAction, PurgeRequest, PurgeResponse, PurgeType};

use serde_json::json;

#[test]
fn given_explicit_url_invalidate_production_when_path_called_then_matches() {
    let request = PurgeRequest::new(["https://www.example.com/"])
        .with_type(PurgeType::Url)
        .with_action(PurgeAction::Invalidate)
        .with_network(Network::Production);

    assert_eq!(request.path(), "/ccu/v3/invalidate/url/production");
}

#[test]
fn given_cpcode_type_when_path_called_then_type_segment_changes() {
    let request = PurgeRequest::new(["123456"])
        .with_type(PurgeType::Cpcode)
        .with_action(PurgeAction::Invalidate)
        .with_network(Network::Production);

    assert_eq!(request.path(), "/ccu/v3/invalidate/cpcode/production");
}

#[test]
fn given_delete_tag_staging_when_path_called_then_all_segments_used() {
    let request = PurgeRequest::new(["homepage"])
        .with_type(PurgeType::Tag)
        .with_action(PurgeAction::Delete)
        .with_network(Network::Staging);

    assert_eq!(request.path(), "/ccu/v3/delete/tag/staging");
}

/// **VALUE**: Unset fields default lazily; set fields survive.
///
/// **BUG THIS CATCHES**: Would catch if defaults overwrote a caller's `delete` or
/// `staging` choice.
#[test]
fn given_unset_fields_when_with_defaults_called_then_filled_without_overwriting() {
    let request = PurgeRequest::new(["a"]).with_network(Network::Staging);

    let resolved = request.with_defaults();

    assert_eq!(resolved.purge_type, Some(PurgeType::Url));
    assert_eq!(resolved.action, Some(PurgeAction::Invalidate));
    assert_eq!(resolved.network, Some(Network::Staging));
    assert_eq!(resolved.with_defaults(), resolved);
    assert_eq!(request.purge_type, None);
    assert_eq!(request.path(), "/ccu/v3/invalidate/url/staging");
}

#[test]
fn given_request_when_serialized_then_only_hostname_and_objects_sent() {
    let request = PurgeRequest::new(["/index.html", "/styles.css"])
        .with_type(PurgeType::Url)
        .with_hostname("www.example.com");

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(
        value,
        json!({
            "hostname": "www.example.com",
            "objects": ["/index.html", "/styles.css"]
        })
    );
}

#[test]
fn given_no_hostname_when_serialized_then_hostname_omitted() {
    let value = serde_json::to_value(PurgeRequest::new(["123456"])).unwrap();

    assert_eq!(value, json!({ "objects": ["123456"] }));
}

#[test]
fn given_purge_reply_when_decoded_then_fields_mapped() {
    let json = r#"{
        "httpStatus": 201,
        "estimatedSeconds": 5,
        "purgeId": "e535071c-26b2-11e7-94d7-276f2f54d938",
        "supportId": "17PY1492793544958045-219026624",
        "detail": "Request accepted"
    }"#;

    let response: PurgeResponse = serde_json::from_str(json).unwrap();

    assert_eq!(response.estimated_seconds, 5);
    assert_eq!(response.purge_id, "e535071c-26b2-11e7-94d7-276f2f54d938");
    assert_eq!(response.response.support_id, "17PY1492793544958045-219026624");
    assert!(response.response.is_success());
}
