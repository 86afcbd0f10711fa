use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::Timestamp;

/// Kind of ledger record. Doubles as the path segment under `/home/money`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Payment,
    Income,
    Transfer,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Payment => "payment",
            RecordKind::Income => "income",
            RecordKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user, returned under `me` by `/home/user/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub input_count: i64,
    #[serde(default)]
    pub day_count: i64,
    #[serde(default)]
    pub repeat_count: i64,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// One payment, income or transfer entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyRecord {
    pub id: i64,
    pub mode: RecordKind,
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default)]
    pub genre_id: i64,
    #[serde(default)]
    pub from_account_id: i64,
    #[serde(default)]
    pub to_account_id: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub created: Option<Timestamp>,
}

/// Acknowledgement of a create, update or delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyChange {
    pub id: i64,
    #[serde(default)]
    pub modified: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub mode: RecordKind,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub parent_category_id: Option<i64>,
    #[serde(default)]
    pub active: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub parent_genre_id: Option<i64>,
    #[serde(default)]
    pub active: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub parent_account_id: Option<i64>,
    #[serde(default)]
    pub active: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub currency_code: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    /// Number of decimal places
    #[serde(default)]
    pub point: i64,
}

/// Filters for listing ledger records
#[derive(Debug, Clone, Default, Serialize)]
pub struct MoneyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<RecordKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentInput {
    pub category_id: i64,
    pub genre_id: i64,
    pub amount: i64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeInput {
    pub category_id: i64,
    pub amount: i64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferInput {
    pub amount: i64,
    pub date: NaiveDate,
    pub from_account_id: i64,
    pub to_account_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Fields to change on an existing record; `None` leaves a field alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct MoneyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}
