use crate::client::{create_rest_client, Config};
use crate::credentials::Credentials;
use crate::error::{Result, ZaimError};
use crate::oauth::{self, OAuthParams};
use crate::params::{encode_form, to_params, Params};
use crate::response::Response;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// Signed client for the Zaim REST API.
///
/// Holds no per-call state: every request gets its own nonce and timestamp,
/// so a single client can be shared across threads.
#[derive(Clone)]
pub struct ZaimClient {
    /// Transport used to send signed requests
    transport: Arc<dyn Transport>,
    /// Configuration
    config: Config,
    /// OAuth credentials
    credentials: Credentials,
}

impl ZaimClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, Config::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: Config) -> Result<Self> {
        let client = create_rest_client(&config)?;

        Ok(ZaimClient {
            transport: Arc::new(ReqwestTransport::new(client)),
            config,
            credentials,
        })
    }

    /// Create a client from the four raw credential strings.
    ///
    /// Fails with `ZaimError::MissingField` before any network activity
    /// if one of them is empty.
    pub fn from_keys(
        consumer_key: &str,
        consumer_secret: &str,
        access_token: &str,
        access_token_secret: &str,
    ) -> Result<Self> {
        let credentials =
            Credentials::new(consumer_key, consumer_secret, access_token, access_token_secret)?;
        Self::new(credentials)
    }

    /// Create a client from `ZAIM_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(Credentials::from_env()?, Config::from_env()?)
    }

    /// Replace the transport
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET `path` with optional query parameters (pass `()` for none)
    pub fn get<Q: Serialize>(&self, path: &str, query: Q) -> Result<Response> {
        self.do_request(Method::GET, path, to_params(query)?, Params::new())
    }

    /// POST a form-encoded body to `path`
    pub fn post<B: Serialize>(&self, path: &str, body: B) -> Result<Response> {
        self.do_request(Method::POST, path, Params::new(), to_params(body)?)
    }

    /// PUT a form-encoded body to `path`
    pub fn put<B: Serialize>(&self, path: &str, body: B) -> Result<Response> {
        self.do_request(Method::PUT, path, Params::new(), to_params(body)?)
    }

    /// DELETE `path`
    pub fn delete(&self, path: &str) -> Result<Response> {
        self.do_request(Method::DELETE, path, Params::new(), Params::new())
    }

    /// Sign and execute one request, returning the parsed body
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Endpoint path below the configured base URL
    /// * `query` - Query string parameters
    /// * `body` - Form parameters, only sent for POST and PUT
    pub fn do_request(
        &self,
        method: Method,
        path: &str,
        query: Params,
        body: Params,
    ) -> Result<Response> {
        let url = self.build_url(path, &query)?;
        let body = if carries_body(&method) { Some(body) } else { None };

        let oauth_params = OAuthParams::generate(&self.credentials);
        let request = self.build_request(method.clone(), url, body, &oauth_params);

        let start = Instant::now();
        let response = self.transport.execute(request).map_err(|e| {
            warn!(%method, path, error = %e, "request failed without a response");
            e
        })?;

        debug!(
            %method,
            path,
            status = response.status,
            elapsed = ?start.elapsed(),
            "request completed"
        );

        self.normalize_response(response)
    }

    /// Join the base URL and `path`, appending `query` as a form-encoded
    /// query string
    fn build_url(&self, path: &str, query: &Params) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.config.base_url(),
            path.trim_start_matches('/')
        ))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        Ok(url)
    }

    /// Sign a request and attach the Authorization header and body
    fn build_request(
        &self,
        method: Method,
        url: Url,
        body: Option<Params>,
        oauth_params: &OAuthParams,
    ) -> HttpRequest {
        // Sign exactly the query that is sent: read it back from the URL.
        let mut request_params: Params = url.query_pairs().into_owned().collect();
        if let Some(ref body) = body {
            request_params.extend(body.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let mut signing_url = url.clone();
        signing_url.set_query(None);
        signing_url.set_fragment(None);

        let signature = oauth::sign(
            method.as_str(),
            signing_url.as_str(),
            &oauth_params.signing_set(&request_params),
            self.credentials.consumer_secret(),
            Some(self.credentials.access_token_secret()),
        );

        let mut headers = vec![(
            "Authorization".to_string(),
            oauth_params.authorization_header(&signature),
        )];
        if body.is_some() {
            headers.push((
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ));
        }

        HttpRequest {
            method,
            url,
            headers,
            body: body.map(|b| encode_form(&b)),
        }
    }

    /// Parse the body and classify non-2xx statuses as API errors.
    ///
    /// An unparseable body is treated as an empty object.
    fn normalize_response(&self, response: HttpResponse) -> Result<Response> {
        let body: Value = serde_json::from_str(&response.body)
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        if !response.is_success() {
            let error = ZaimError::from_status(&self.config.service_name, response.status, body);
            warn!(status = response.status, error = %error, "API returned an error");
            return Err(error);
        }

        Ok(Response::new(body))
    }
}

fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT
}

impl std::fmt::Debug for ZaimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZaimClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Transport that records requests and replays one canned response
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
        status: u16,
        body: String,
    }

    impl RecordingTransport {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(RecordingTransport {
                requests: Mutex::new(Vec::new()),
                status,
                body: body.to_string(),
            })
        }

        fn last(&self) -> HttpRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn client() -> ZaimClient {
        let credentials =
            Credentials::new("test_key", "consumer_secret", "test_token", "token_secret").unwrap();
        ZaimClient::new(credentials).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_with_query() {
        let url = client()
            .build_url("/home/money", &query(&[("mapping", "1"), ("comment", "lunch & coffee")]))
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.zaim.net/v2/home/money?comment=lunch+%26+coffee&mapping=1"
        );
    }

    #[test]
    fn test_build_url_without_leading_slash() {
        let url = client().build_url("currency", &Params::new()).unwrap();
        assert_eq!(url.as_str(), "https://api.zaim.net/v2/currency");
    }

    #[test]
    fn test_get_request_signature() {
        let client = client();
        let url = client
            .build_url("/home/money", &query(&[("mapping", "1"), ("comment", "lunch & coffee")]))
            .unwrap();
        let oauth_params = OAuthParams::with(&client.credentials, "abc123", "1700000000");

        let request = client.build_request(Method::GET, url, None, &oauth_params);
        let header = request.header("Authorization").unwrap();

        assert!(header.contains("oauth_signature=\"tQ7A7GUa1UJZ9Oi5rxq50cLzGZY%3D\""));
        assert!(request.body.is_none());
        assert!(request.header("Content-Type").is_none());
    }

    #[test]
    fn test_post_request_body_is_signed() {
        let client = client();
        let url = client.build_url("/home/money/payment", &Params::new()).unwrap();
        let body = query(&[("amount", "1200"), ("comment", "a b")]);
        let oauth_params = OAuthParams::with(&client.credentials, "abc123", "1700000000");

        let request = client.build_request(Method::POST, url, Some(body.clone()), &oauth_params);

        let expected = oauth::sign(
            "POST",
            "https://api.zaim.net/v2/home/money/payment",
            &oauth_params.signing_set(&body),
            "consumer_secret",
            Some("token_secret"),
        );
        assert_eq!(
            request.header("Authorization").unwrap(),
            oauth_params.authorization_header(&expected)
        );
        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.body.as_deref(), Some("amount=1200&comment=a%20b"));
    }

    #[test]
    fn test_delete_sends_no_body() {
        let transport = RecordingTransport::new(200, r#"{"money":{"id":1}}"#);
        let client = client().with_transport(transport.clone());

        client.delete("/home/money/payment/1").unwrap();
        let request = transport.last();

        assert_eq!(request.method, Method::DELETE);
        assert!(request.body.is_none());
        assert!(request.header("Authorization").unwrap().starts_with("OAuth "));
    }

    #[test]
    fn test_get_ignores_body_and_sends_query() {
        let transport = RecordingTransport::new(200, r#"{"money":[]}"#);
        let client = client().with_transport(transport.clone());

        let response = client.get("/home/money", json!({"mapping": 1, "limit": 20})).unwrap();
        let request = transport.last();

        assert_eq!(request.url.query(), Some("limit=20&mapping=1"));
        assert!(request.body.is_none());
        assert_eq!(response.raw(), &json!({"money": []}));
    }

    #[test]
    fn test_error_status_with_empty_body() {
        let transport = RecordingTransport::new(503, "");
        let client = client().with_transport(transport);

        let err = client.get("/home/user/verify", ()).unwrap_err();
        assert_eq!(err.to_string(), "Zaim API Error: 503 - Unknown error");
    }

    #[test]
    fn test_success_with_unparseable_body() {
        let transport = RecordingTransport::new(200, "<html>ok</html>");
        let client = client().with_transport(transport);

        let response = client.put("/home/money/payment/1", json!({"amount": 1})).unwrap();
        assert!(response.is_empty());
    }
}
