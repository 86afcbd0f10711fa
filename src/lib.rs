//! # zaim - Zaim household ledger API client
//!
//! A blocking Rust client for the Zaim personal finance API. Every request
//! is authenticated with OAuth 1.0a (RFC 5849) HMAC-SHA1 signatures built
//! from a pre-obtained access token pair.
//!
//! ## Features
//!
//! - Stateless OAuth 1.0a signer exposing every intermediate artifact
//!   (normalized parameters, base string, signing key)
//! - `get`/`post`/`put`/`delete` with a single signed request path
//! - Distinct error kinds for configuration, network and API failures
//! - Typed ledger call sites (payments, incomes, transfers, categories,
//!   genres, accounts, currencies)
//!
//! ## Basic Usage
//!
//! ```no_run
//! use zaim::{Credentials, MoneyQuery, ZaimClient};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new(
//!         "consumer_key",
//!         "consumer_secret",
//!         "access_token",
//!         "access_token_secret",
//!     )?;
//!     let client = ZaimClient::new(credentials)?;
//!
//!     let me = client.verify_user()?;
//!     println!("Logged in as {}", me.name);
//!
//!     let records = client.list_money(&MoneyQuery {
//!         limit: Some(10),
//!         ..MoneyQuery::default()
//!     })?;
//!     println!("{} records", records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Raw requests
//!
//! ```no_run
//! use zaim::{json, ZaimClient};
//!
//! let client = ZaimClient::from_env()?;
//! let response = client.get("/home/money", json!({"mapping": 1, "limit": 5}))?;
//! println!("{}", response.raw());
//! # Ok::<(), zaim::ZaimError>(())
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod ledger;
pub mod models;
pub mod oauth;
pub mod params;
pub mod response;
pub mod rest;
pub mod time;
pub mod transport;

// Re-export main types for convenience
pub use client::Config;
pub use credentials::Credentials;
pub use error::{Result, ZaimError};
pub use models::{
    Account, Category, Currency, Genre, IncomeInput, MoneyChange, MoneyQuery, MoneyRecord,
    MoneyUpdate, PaymentInput, RecordKind, TransferInput, User,
};
pub use oauth::OAuthParams;
pub use params::Params;
pub use response::Response;
pub use rest::ZaimClient;
pub use time::Timestamp;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

// Re-export serde_json for convenience
pub use serde_json::json;
