//! Proxy settings taken from the environment
//!
//! Kept in its own test binary: reqwest reads the proxy variables once per
//! process, and changing them would leak into every other test.

use ludus_core::{ClientOptions, RestClient};
use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "JD.proxy-test-key";

#[tokio::test]
async fn test_http_proxy_variable_is_honoured() {
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "via proxy"})))
        .expect(1)
        .mount(&proxy)
        .await;

    // SAFETY: this binary runs a single test, so no other thread reads the
    // environment concurrently.
    unsafe {
        std::env::set_var("HTTP_PROXY", proxy.uri());
        std::env::set_var("http_proxy", proxy.uri());
        std::env::remove_var("NO_PROXY");
        std::env::remove_var("no_proxy");
    }

    let options = ClientOptions::new("http://ludus.invalid:8080", API_KEY).with_spinner(false);
    let client = RestClient::new(options).unwrap();
    let body = client.get("/").await.unwrap();

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["result"], "via proxy");
    assert_eq!(proxy.received_requests().await.unwrap().len(), 1);
}
