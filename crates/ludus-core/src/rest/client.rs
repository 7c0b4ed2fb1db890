//! REST client and request helpers

use std::path::Path;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use tracing::{debug, info};

use super::classify::classify;
use super::redact::{redact_api_key, user_from_api_key};
use super::spinner::WaitSpinner;
use crate::CLIENT_VERSION;
use crate::error::{LudusError, LudusResult};

/// Header carrying the API key (`X-API-KEY`; header names are case-insensitive)
pub const API_KEY_HEADER: &str = "x-api-key";

/// Options used to build a [`RestClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Server base URL, e.g. `https://198.51.100.1:8080`
    pub url: String,
    /// API key sent with every request
    pub api_key: String,
    /// HTTP(S) proxy for all traffic
    pub proxy: Option<String>,
    /// Verify the server's TLS certificate
    pub verify: bool,
    /// Show the waiting spinner
    pub spinner: bool,
    /// Version reported in the user agent
    pub version: String,
}

impl ClientOptions {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            proxy: None,
            verify: false,
            spinner: true,
            version: CLIENT_VERSION.to_string(),
        }
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.is_empty());
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_spinner(mut self, spinner: bool) -> Self {
        self.spinner = spinner;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// User agent string sent to the server
    pub fn user_agent(&self) -> String {
        format!("ludus-client/v{} ", self.version)
    }
}

/// Client for the Ludus REST API
///
/// Every helper issues exactly one request and runs the response through
/// [`classify`].
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    user: String,
    spinner: bool,
}

impl RestClient {
    /// Build a client; fails if no API key is given
    pub fn new(options: ClientOptions) -> LudusResult<Self> {
        if options.api_key.is_empty() {
            return Err(LudusError::config("No API key provided to the REST client"));
        }

        let mut key = HeaderValue::from_str(&options.api_key).map_err(|_| {
            LudusError::config("API key contains characters that cannot be sent in a header")
        })?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(options.user_agent());

        if !options.url.is_empty() {
            debug!("Endpoint URL: {}", options.url);
        }

        // Without an explicit proxy reqwest falls back to HTTP(S)_PROXY
        if let Some(proxy) = &options.proxy {
            let parsed = reqwest::Proxy::all(proxy.as_str()).map_err(|e| {
                LudusError::config_with_context(format!("Invalid proxy URL: {e}"), proxy.clone())
            })?;
            builder = builder.proxy(parsed);
            debug!("Endpoint Proxy: {}", proxy);
        }

        if !options.verify {
            builder = builder.danger_accept_invalid_certs(true);
            debug!("Endpoint SSL Verify: {}", options.verify);
        }

        let http = builder
            .build()
            .map_err(|e| LudusError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: options.url.trim_end_matches('/').to_string(),
            user: user_from_api_key(&options.api_key).to_string(),
            api_key: options.api_key,
            spinner: options.spinner,
        })
    }

    /// User ID taken from the API key, used in authorization errors
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        if self.base_url.is_empty() {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(
            method = %method,
            url = %url,
            api_key = %redact_api_key(&self.api_key),
            "Sending request"
        );
        self.http.request(method, url)
    }

    /// Send with the spinner running, returning status and full body
    async fn send(&self, request: RequestBuilder) -> LudusResult<(u16, Vec<u8>)> {
        let spinner = WaitSpinner::start(self.spinner);
        let outcome = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body.to_vec()))
        }
        .await;
        spinner.stop();

        let (status, body) = outcome?;
        debug!(status, "Received response");
        Ok((status, body))
    }

    async fn execute(&self, request: RequestBuilder) -> LudusResult<Vec<u8>> {
        let (status, body) = self.send(request).await?;
        classify(status, body, &self.user)
    }

    /// GET `path`
    pub async fn get(&self, path: &str) -> LudusResult<Vec<u8>> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// POST a JSON document to `path`
    pub async fn post_json(&self, path: &str, body: &str) -> LudusResult<Vec<u8>> {
        let request = self
            .request(Method::POST, path)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        self.execute(request).await
    }

    /// PUT a JSON document to `path`
    pub async fn put_json(&self, path: &str, body: &str) -> LudusResult<Vec<u8>> {
        let request = self
            .request(Method::PUT, path)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        self.execute(request).await
    }

    /// Serialize `value` and POST it to `path`
    pub async fn post_serialized<T: Serialize>(&self, path: &str, value: &T) -> LudusResult<Vec<u8>> {
        let body = serde_json::to_string(value)?;
        self.post_json(path, &body).await
    }

    /// Serialize `value` and PUT it to `path`
    pub async fn put_serialized<T: Serialize>(&self, path: &str, value: &T) -> LudusResult<Vec<u8>> {
        let body = serde_json::to_string(value)?;
        self.put_json(path, &body).await
    }

    /// DELETE `path`
    pub async fn delete(&self, path: &str) -> LudusResult<Vec<u8>> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    /// PUT `data` as the multipart part `file`
    pub async fn put_file(&self, path: &str, data: Vec<u8>) -> LudusResult<Vec<u8>> {
        let form = Form::new().part("file", Part::bytes(data).file_name("file"));
        self.execute(self.request(Method::PUT, path).multipart(form))
            .await
    }

    /// PUT `data` as the multipart part `file` along with a `force` field
    pub async fn put_file_with_force(
        &self,
        path: &str,
        data: Vec<u8>,
        filename: &str,
        force: bool,
    ) -> LudusResult<Vec<u8>> {
        let form = Form::new()
            .part("file", Part::bytes(data).file_name(filename.to_string()))
            .text("force", force.to_string());
        self.execute(self.request(Method::PUT, path).multipart(form))
            .await
    }

    /// GET `path` and save the body to `output`
    ///
    /// Only a 200 writes the file; any other status is returned as
    /// [`LudusError::UnexpectedStatus`].
    pub async fn download_to_file(&self, path: &str, output: &Path) -> LudusResult<()> {
        let (status, body) = self.send(self.request(Method::GET, path)).await?;
        if status != 200 {
            return Err(LudusError::UnexpectedStatus { status });
        }

        tokio::fs::write(output, &body).await.map_err(|e| {
            LudusError::io_with_path(e.to_string(), output.display().to_string())
        })?;
        info!("File downloaded and saved as {}", output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_missing_api_key_is_rejected() {
        let err = RestClient::new(ClientOptions::new("https://localhost:8080", "")).unwrap_err();
        assert_eq!(err.error_code(), "LUDUS_CONFIG");
    }

    #[test]
    fn test_user_label_from_key() {
        let client = RestClient::new(ClientOptions::new("https://localhost:8080", "JD.secret"))
            .unwrap();
        assert_eq!(client.user(), "JD");
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = RestClient::new(ClientOptions::new("https://localhost:8080/", "JD.secret"))
            .unwrap();
        assert_eq!(client.endpoint("/range"), "https://localhost:8080/range");
        assert_eq!(client.endpoint("range/all"), "https://localhost:8080/range/all");
        assert_eq!(client.endpoint("/"), "https://localhost:8080/");
    }

    #[test]
    fn test_user_agent() {
        let options = ClientOptions::new("https://x", "JD.k").with_version("1.2.3");
        assert_eq!(options.user_agent(), "ludus-client/v1.2.3 ");
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let options = ClientOptions::new("https://x", "JD.k").with_proxy(Some("http://[invalid".into()));
        let err = RestClient::new(options).unwrap_err();
        assert_eq!(err.error_code(), "LUDUS_CONFIG");
    }

    #[test]
    fn test_verified_client_builds() {
        let options = ClientOptions::new("https://localhost:8080", "JD.secret").with_verify(true);
        assert!(options.verify);
        let client = RestClient::new(options).unwrap();
        assert_eq!(client.user(), "JD");
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_request_log_redacts_api_key() {
        let captured = CapturedLog::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let client = RestClient::new(
            ClientOptions::new("https://localhost:8080", "JD.s3cr3t-value").with_spinner(false),
        )
        .unwrap();
        tracing::subscriber::with_default(subscriber, || {
            let _ = client.request(Method::GET, "/range");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("https://localhost:8080/range"));
        assert!(output.contains("JD.***REDACTED***"));
        assert!(!output.contains("s3cr3t-value"));
    }

    #[test]
    fn test_empty_proxy_is_ignored() {
        let options = ClientOptions::new("https://x", "JD.k").with_proxy(Some(String::new()));
        assert!(options.proxy.is_none());
    }
}
