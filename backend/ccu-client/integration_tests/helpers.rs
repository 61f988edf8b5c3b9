//! Shared fixtures for the purge client integration tests.
//!
//! Every test gets its own wiremock server; clients are pointed at it with
//! `with_base_url` so nothing leaves the machine.

use ccu_client::config::EdgeGridConfig;
use ccu_client::credentials::BasicCredentials;
use ccu_client::v2::CcuV2Client;
use ccu_client::v3::CcuV3Client;

use reqwest::Client;
use wiremock::MockServer;

pub const TEST_USERNAME: &str = "purger";
pub const TEST_PASSWORD: &str = "hunter2";

pub const TEST_HOST: &str = "akab-host.luna.akamaiapis.net";
pub const TEST_CLIENT_TOKEN: &str = "akab-client-token-xxx-xxxxxxxxxxxxxxxx";
pub const TEST_CLIENT_SECRET: &str = "SOMESECRET";
pub const TEST_ACCESS_TOKEN: &str = "akab-access-token-xxx-xxxxxxxxxxxxxxxx";

/// v2 client with known Basic credentials, talking to `server`.
pub fn v2_client(server: &MockServer) -> CcuV2Client {
    CcuV2Client::new(BasicCredentials::new(TEST_USERNAME, TEST_PASSWORD))
        .expect("Failed to build v2 client")
        .with_base_url(&server.uri())
        .expect("Mock server URI should parse")
}

pub fn edgegrid_config() -> EdgeGridConfig {
    EdgeGridConfig::new(
        TEST_HOST,
        TEST_CLIENT_TOKEN,
        TEST_CLIENT_SECRET,
        TEST_ACCESS_TOKEN,
    )
}

/// v3 client with an eagerly supplied configuration, talking to `server`.
pub fn v3_client(server: &MockServer) -> CcuV3Client {
    CcuV3Client::with_config(Client::new(), edgegrid_config())
        .expect("Test config should validate")
        .with_base_url(&server.uri())
        .expect("Mock server URI should parse")
}

/// `.edgerc` body with a single `[section]` holding the test credentials.
pub fn edgerc_contents(section: &str) -> String {
    format!(
        "[{section}]\n\
         host = https://{TEST_HOST}/\n\
         client_token = {TEST_CLIENT_TOKEN}\n\
         client_secret = {TEST_CLIENT_SECRET}\n\
         access_token = {TEST_ACCESS_TOKEN}\n"
    )
}
