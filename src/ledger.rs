//! Typed call sites for the Zaim household ledger endpoints.
//!
//! Each method builds a path and parameters, forwards to [`ZaimClient`],
//! and narrows the response to the shape the endpoint documents.

use serde::Serialize;

use crate::error::Result;
use crate::models::{
    Account, Category, Currency, Genre, IncomeInput, MoneyChange, MoneyQuery, MoneyRecord,
    MoneyUpdate, PaymentInput, RecordKind, TransferInput, User,
};
use crate::rest::ZaimClient;

/// Adds `mapping=1`, which Zaim requires on every `/home` call
#[derive(Serialize)]
struct Mapped<'a, T: Serialize> {
    mapping: u8,
    #[serde(flatten)]
    inner: &'a T,
}

fn mapped<T: Serialize>(inner: &T) -> Mapped<'_, T> {
    Mapped { mapping: 1, inner }
}

#[derive(Serialize)]
struct NoParams {}

fn money_path(kind: RecordKind, id: i64) -> String {
    format!("/home/money/{}/{}", kind, id)
}

impl ZaimClient {
    /// Verify the credentials and fetch the authenticated user
    pub fn verify_user(&self) -> Result<User> {
        self.get("/home/user/verify", ())?.record("me")
    }

    /// List ledger records matching `query`
    pub fn list_money(&self, query: &MoneyQuery) -> Result<Vec<MoneyRecord>> {
        self.get("/home/money", mapped(query))?.list("money")
    }

    pub fn create_payment(&self, input: &PaymentInput) -> Result<MoneyChange> {
        self.create_money(RecordKind::Payment, input)
    }

    pub fn create_income(&self, input: &IncomeInput) -> Result<MoneyChange> {
        self.create_money(RecordKind::Income, input)
    }

    pub fn create_transfer(&self, input: &TransferInput) -> Result<MoneyChange> {
        self.create_money(RecordKind::Transfer, input)
    }

    fn create_money<T: Serialize>(&self, kind: RecordKind, input: &T) -> Result<MoneyChange> {
        self.post(&format!("/home/money/{}", kind), mapped(input))?
            .record("money")
    }

    /// Update an existing record of the given kind
    pub fn update_money(&self, kind: RecordKind, id: i64, update: &MoneyUpdate) -> Result<MoneyChange> {
        self.put(&money_path(kind, id), mapped(update))?.record("money")
    }

    /// Delete a record of the given kind
    pub fn delete_money(&self, kind: RecordKind, id: i64) -> Result<MoneyChange> {
        self.delete(&money_path(kind, id))?.record("money")
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.get("/home/category", mapped(&NoParams {}))?.list("categories")
    }

    pub fn list_genres(&self) -> Result<Vec<Genre>> {
        self.get("/home/genre", mapped(&NoParams {}))?.list("genres")
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        self.get("/home/account", mapped(&NoParams {}))?.list("accounts")
    }

    pub fn list_currencies(&self) -> Result<Vec<Currency>> {
        self.get("/currency", ())?.list("currencies")
    }
}
