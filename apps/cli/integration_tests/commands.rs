use ccu::cli::{Cli, Commands};
use ccu::commands::{request_context, v2, v3};
use ccu::error::CliError;

use ccu_client::config::EdgeGridConfig;
use ccu_client::credentials::BasicCredentials;
use ccu_client::v2::CcuV2Client;
use ccu_client::v3::CcuV3Client;

use clap::Parser;
use reqwest::Client;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn v2_client(server: &MockServer) -> CcuV2Client {
    CcuV2Client::new(BasicCredentials::new("purger", "hunter2"))
        .expect("Failed to build v2 client")
        .with_base_url(&server.uri())
        .expect("Mock server URI should parse")
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("Should parse")
}

/// **VALUE**: The printed purge output includes the reply fields and the ETA.
///
/// **WHY THIS MATTERS**: Scripts poll `ccu status` after the ETA; the JSON printed by
/// `ccu purge` is their only source for it.
#[tokio::test]
async fn given_accepted_purge_when_command_run_then_prints_reply_with_eta() {
    // GIVEN: A server accepting the purge
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v2/queues/default"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "httpStatus": 201,
            "estimatedSeconds": 300,
            "purgeId": "abc",
            "progressUri": "/ccu/v2/purges/abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse(&["ccu", "purge", "https://www.example.com/"]);
    let Commands::Purge(args) = cli.command else {
        panic!("Expected purge command");
    };

    // WHEN: Running the command
    let output = v2::purge(&v2_client(&server), &args, &request_context(Some(10)))
        .await
        .expect("Purge should succeed");

    // THEN: The JSON carries the id and a non-null ETA
    let value: Value = serde_json::from_str(&output).expect("Output should be JSON");
    assert_eq!(value["purgeId"], "abc");
    assert_eq!(value["httpStatus"], 201);
    assert!(value["eta"].is_string());
}

#[tokio::test]
async fn given_queue_reply_when_queue_length_run_then_prints_length() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ccu/v2/queues/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "httpStatus": 200,
            "queueLength": 7
        })))
        .mount(&server)
        .await;

    let output = v2::queue_length(&v2_client(&server), &request_context(None))
        .await
        .expect("Queue length should succeed");

    let value: Value = serde_json::from_str(&output).expect("Output should be JSON");
    assert_eq!(value["queueLength"], 7);
}

#[tokio::test]
async fn given_unknown_purge_when_status_run_then_client_error_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "httpStatus": 404,
            "title": "Not Found"
        })))
        .mount(&server)
        .await;

    let err = v2::status(&v2_client(&server), "missing", &request_context(None))
        .await
        .expect_err("Unknown id should fail");

    match err {
        CliError::Client(inner) => assert!(inner.is_not_found()),
        other => panic!("Expected client error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_fast_purge_when_command_run_then_prints_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ccu/v3/invalidate/cpcode/production"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "httpStatus": 201,
            "estimatedSeconds": 5,
            "purgeId": "fast-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = EdgeGridConfig::new(
        "akab-host.luna.akamaiapis.net",
        "akab-client-token",
        "SOMESECRET",
        "akab-access-token",
    );
    let client = CcuV3Client::with_config(Client::new(), config)
        .expect("Config should validate")
        .with_base_url(&server.uri())
        .expect("Mock server URI should parse");

    let cli = parse(&["ccu", "purge-v3", "--type", "cpcode", "123456"]);
    let Commands::PurgeV3(args) = cli.command else {
        panic!("Expected purge-v3 command");
    };

    let output = v3::purge(&client, &args, &request_context(Some(10)))
        .await
        .expect("Fast purge should succeed");

    let value: Value = serde_json::from_str(&output).expect("Output should be JSON");
    assert_eq!(value["purgeId"], "fast-1");
    assert_eq!(value["estimatedSeconds"], 5);
}
