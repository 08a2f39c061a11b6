use model::entities::{account, client, user};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::error::StoreError;
use crate::stores::UpdateOutcome;

/// Application state shared across CLI commands.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// The boundary contract for every operation: exactly one of `result`
/// and `error` is populated. A visibility miss, a genuine not-found and
/// a no-op update all serialize to `{"result": null, "error": null}` —
/// the caller learns nothing about which it was.
#[derive(Debug, Serialize, PartialEq)]
pub struct Envelope<T: Serialize> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            result: None,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        let error: String = error.into();
        // Empty error payloads normalize to a null error.
        Self {
            result: None,
            error: (!error.is_empty()).then_some(error),
        }
    }
}

impl<T: Serialize> From<Result<Option<T>, StoreError>> for Envelope<T> {
    fn from(outcome: Result<Option<T>, StoreError>) -> Self {
        match outcome {
            Ok(Some(result)) => Envelope::ok(result),
            Ok(None) => Envelope::empty(),
            Err(err) => Envelope::fail(err.to_string()),
        }
    }
}

impl<T: Serialize> From<Result<UpdateOutcome<T>, StoreError>> for Envelope<T> {
    fn from(outcome: Result<UpdateOutcome<T>, StoreError>) -> Self {
        match outcome {
            Ok(UpdateOutcome::Updated(result)) => Envelope::ok(result),
            // "Nothing changed" and "nothing visible" look the same on
            // the wire.
            Ok(UpdateOutcome::NoChange) | Ok(UpdateOutcome::NotFound) => Envelope::empty(),
            Err(err) => Envelope::fail(err.to_string()),
        }
    }
}

/// User as exposed at the boundary. The password hash never leaves the
/// store layer.
#[derive(Debug, Serialize, PartialEq)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub role: String,
}

impl From<user::Model> for UserView {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ClientView {
    pub id: i32,
    pub email: String,
    pub manager_id: i32,
}

impl From<client::Model> for ClientView {
    fn from(model: client::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            manager_id: model.manager_id,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AccountView {
    pub id: i32,
    pub client_id: i32,
    pub currency: String,
    pub amount: i64,
}

impl From<account::Model> for AccountView {
    fn from(model: account::Model) -> Self {
        Self {
            id: model.id,
            client_id: model.client_id,
            currency: model.currency.as_str().to_owned(),
            amount: model.amount,
        }
    }
}
