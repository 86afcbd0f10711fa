//! OAuth 1.0a (RFC 5849) HMAC-SHA1 request signing.
//!
//! The signing functions are pure: the same method, URL, parameters and
//! secrets always produce the same signature. Everything that varies per
//! request (nonce, timestamp) lives in [`OAuthParams`], which is generated
//! fresh for every call.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::params::Params;

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Percent-encode a string using the RFC 3986 unreserved set.
///
/// Letters, digits, `-`, `.`, `_` and `~` pass through; every other byte
/// is escaped, so a space becomes `%20` and never `+`.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the normalized parameter string.
///
/// Keys and values are percent-encoded, pairs are sorted by encoded key
/// (then encoded value) and joined as `key=value` with `&`.
pub fn normalize_parameters<'a, I>(parameters: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut pairs: Vec<(String, String)> = parameters
        .into_iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the signature base string: `METHOD&encoded-url&encoded-params`.
///
/// `url` must not carry a query string; query parameters belong in the
/// normalized parameter string.
pub fn build_base_string(method: &str, url: &str, normalized_params: &str) -> String {
    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(normalized_params)
    )
}

/// Build the HMAC key. The `&` separator is kept even without a token secret.
pub fn build_signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or(""))
    )
}

/// Compute the base64 HMAC-SHA1 signature of a request.
pub fn sign<'a, I>(
    method: &str,
    url: &str,
    parameters: I,
    consumer_secret: &str,
    token_secret: Option<&str>,
) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let normalized = normalize_parameters(parameters);
    let base_string = build_base_string(method, url, &normalized);
    let signing_key = build_signing_key(consumer_secret, token_secret);

    hmac_sha1_base64(&signing_key, &base_string)
}

fn hmac_sha1_base64(key: &str, message: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// The fixed `oauth_*` protocol parameters of one request, minus the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParams {
    params: BTreeMap<String, String>,
}

impl OAuthParams {
    /// Generate parameters for a new request with a fresh nonce and the
    /// current Unix time in seconds
    pub fn generate(credentials: &Credentials) -> Self {
        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = Utc::now().timestamp().to_string();
        Self::with(credentials, nonce, timestamp)
    }

    /// Build parameters from an explicit nonce and timestamp
    pub fn with(
        credentials: &Credentials,
        nonce: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let mut params = BTreeMap::new();
        params.insert("oauth_consumer_key".to_string(), credentials.consumer_key().to_string());
        params.insert("oauth_nonce".to_string(), nonce.into());
        params.insert("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string());
        params.insert("oauth_timestamp".to_string(), timestamp.into());
        params.insert("oauth_token".to_string(), credentials.access_token().to_string());
        params.insert("oauth_version".to_string(), OAUTH_VERSION.to_string());

        OAuthParams { params }
    }

    pub fn nonce(&self) -> &str {
        self.params.get("oauth_nonce").map(String::as_str).unwrap_or_default()
    }

    pub fn timestamp(&self) -> &str {
        self.params.get("oauth_timestamp").map(String::as_str).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    /// Merge these protocol parameters with request parameters into the
    /// set that gets signed. Request parameters never override `oauth_*` ones.
    pub fn signing_set(&self, request_params: &Params) -> Params {
        let mut merged = request_params.clone();
        merged.extend(self.params.clone());
        merged
    }

    /// Build the `Authorization` header value carrying these parameters
    /// and the computed signature
    pub fn authorization_header(&self, signature: &str) -> String {
        let mut fields = self.params.clone();
        fields.insert("oauth_signature".to_string(), signature.to_string());

        let pairs = fields
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        format!("OAuth {}", pairs)
    }
}
