use chrono::Utc;
use model::entities::account::{self, Currency};
use model::entities::client;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use tracing::{debug, instrument};

use super::{clients, UpdateOutcome};
use crate::error::{Result, StoreError};
use crate::scope::Scope;

/// Fields an account update may carry. Absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountChanges {
    pub currency: Option<Currency>,
    pub amount: Option<i64>,
}

/// Accounts carry no manager id of their own; a restricted scope filters
/// through the owning client.
fn scoped(query: Select<account::Entity>, scope: Scope) -> Select<account::Entity> {
    match scope.manager_id() {
        None => query,
        Some(manager_id) => query
            .join(JoinType::InnerJoin, account::Relation::Client.def())
            .filter(client::Column::ManagerId.eq(manager_id)),
    }
}

#[instrument(skip(db))]
pub async fn get_account_by_id(
    db: &DatabaseConnection,
    id: i32,
    scope: Scope,
) -> Result<Option<account::Model>> {
    Ok(scoped(account::Entity::find_by_id(id), scope).one(db).await?)
}

/// Deterministic listing order: id descending, ties broken by owning
/// client descending, so snapshots stay stable.
#[instrument(skip(db))]
pub async fn list_accounts(db: &DatabaseConnection, scope: Scope) -> Result<Vec<account::Model>> {
    let accounts = scoped(account::Entity::find(), scope)
        .order_by_desc(account::Column::Id)
        .order_by_desc(account::Column::ClientId)
        .all(db)
        .await?;

    Ok(accounts)
}

/// Creates an account for a client visible under `scope`. A cross-tenant
/// attempt is an empty result; a second account in the same currency for
/// the client is a distinguishable conflict.
#[instrument(skip(db))]
pub async fn create_account(
    db: &DatabaseConnection,
    client_id: i32,
    currency: Currency,
    amount: i64,
    scope: Scope,
) -> Result<Option<account::Model>> {
    let Some(owner) = clients::get_client_by_id(db, client_id, scope).await? else {
        return Ok(None);
    };

    if find_by_client_and_currency(db, owner.id, currency)
        .await?
        .is_some()
    {
        return Err(StoreError::Conflict(format!(
            "client {client_id} already holds a {} account",
            currency.as_str()
        )));
    }

    let now = Utc::now();
    let new_account = account::ActiveModel {
        client_id: Set(owner.id),
        currency: Set(currency),
        amount: Set(amount),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_account.insert(db).await?;
    debug!(account_id = created.id, client_id, "account created");

    Ok(Some(created))
}

/// Applies only the provided-and-different fields; `NoChange` when
/// nothing differs. A currency change must not collide with another
/// account of the same client.
#[instrument(skip(db))]
pub async fn update_account(
    db: &DatabaseConnection,
    id: i32,
    changes: AccountChanges,
    scope: Scope,
) -> Result<UpdateOutcome<account::Model>> {
    let Some(current) = get_account_by_id(db, id, scope).await? else {
        return Ok(UpdateOutcome::NotFound);
    };

    let mut active = current.clone().into_active_model();
    let mut changed = false;

    if let Some(currency) = changes.currency {
        if currency != current.currency {
            if find_by_client_and_currency(db, current.client_id, currency)
                .await?
                .is_some()
            {
                return Err(StoreError::Conflict(format!(
                    "client {} already holds a {} account",
                    current.client_id,
                    currency.as_str()
                )));
            }
            active.currency = Set(currency);
            changed = true;
        }
    }

    if let Some(amount) = changes.amount {
        if amount != current.amount {
            active.amount = Set(amount);
            changed = true;
        }
    }

    if !changed {
        return Ok(UpdateOutcome::NoChange);
    }

    active.updated_at = Set(Utc::now());
    Ok(UpdateOutcome::Updated(active.update(db).await?))
}

#[instrument(skip(db))]
pub async fn delete_account(db: &DatabaseConnection, id: i32, scope: Scope) -> Result<bool> {
    let Some(target) = get_account_by_id(db, id, scope).await? else {
        return Ok(false);
    };

    account::Entity::delete_by_id(target.id).exec(db).await?;

    Ok(true)
}

/// Unscoped lookup used by the currency converter, which has already
/// resolved the client under the caller's scope.
#[instrument(skip(db))]
pub async fn find_by_client_and_currency(
    db: &DatabaseConnection,
    client_id: i32,
    currency: Currency,
) -> Result<Option<account::Model>> {
    let account = account::Entity::find()
        .filter(account::Column::ClientId.eq(client_id))
        .filter(account::Column::Currency.eq(currency))
        .one(db)
        .await?;

    Ok(account)
}
