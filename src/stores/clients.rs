use chrono::Utc;
use model::entities::{account, client, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, instrument};

use super::UpdateOutcome;
use crate::error::{Result, StoreError};
use crate::scope::Scope;

/// Fields a client update may carry. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub email: Option<String>,
    pub manager_id: Option<i32>,
}

/// Fetches one client, restricted to the caller's scope. A client owned
/// by a different manager and a nonexistent id both come back `None`.
#[instrument(skip(db))]
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    id: i32,
    scope: Scope,
) -> Result<Option<client::Model>> {
    let mut query = client::Entity::find_by_id(id);

    if let Some(manager_id) = scope.manager_id() {
        query = query.filter(client::Column::ManagerId.eq(manager_id));
    }

    Ok(query.one(db).await?)
}

/// Unrestricted scope lists every client (id ascending); a manager sees
/// only their own, newest first.
#[instrument(skip(db))]
pub async fn list_clients(db: &DatabaseConnection, scope: Scope) -> Result<Vec<client::Model>> {
    let clients = match scope.manager_id() {
        None => {
            client::Entity::find()
                .order_by_asc(client::Column::Id)
                .all(db)
                .await?
        }
        Some(manager_id) => {
            client::Entity::find()
                .filter(client::Column::ManagerId.eq(manager_id))
                .order_by_desc(client::Column::Id)
                .all(db)
                .await?
        }
    };

    Ok(clients)
}

/// Creates a client owned by `manager_id`. There is no scope check here:
/// the caller layer decides the owner (an administrator may pick any
/// manager, a manager is always assigned as their own).
#[instrument(skip(db))]
pub async fn create_client(
    db: &DatabaseConnection,
    email: &str,
    manager_id: i32,
) -> Result<client::Model> {
    if user::Entity::find_by_id(manager_id).one(db).await?.is_none() {
        return Err(StoreError::Conflict(format!(
            "no user with id {manager_id} to own the client"
        )));
    }

    let now = Utc::now();
    let new_client = client::ActiveModel {
        email: Set(email.to_owned()),
        manager_id: Set(manager_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_client.insert(db).await?;
    debug!(client_id = created.id, manager_id, "client created");

    Ok(created)
}

/// Applies only the provided-and-different fields. If nothing differs,
/// no write is issued and the outcome is `NoChange`. A restricted scope
/// can never reassign the owning manager: the field is dropped before it
/// reaches the write.
#[instrument(skip(db))]
pub async fn update_client(
    db: &DatabaseConnection,
    id: i32,
    changes: ClientChanges,
    scope: Scope,
) -> Result<UpdateOutcome<client::Model>> {
    let Some(current) = get_client_by_id(db, id, scope).await? else {
        return Ok(UpdateOutcome::NotFound);
    };

    let manager_id = if scope.is_unrestricted() {
        changes.manager_id
    } else {
        None
    };

    let mut active = current.clone().into_active_model();
    let mut changed = false;

    if let Some(email) = changes.email {
        if email != current.email {
            active.email = Set(email);
            changed = true;
        }
    }

    if let Some(manager_id) = manager_id {
        if manager_id != current.manager_id {
            active.manager_id = Set(manager_id);
            changed = true;
        }
    }

    if !changed {
        return Ok(UpdateOutcome::NoChange);
    }

    active.updated_at = Set(Utc::now());
    Ok(UpdateOutcome::Updated(active.update(db).await?))
}

/// Deletes a client and, as an explicit first step, every account it
/// holds. `false` when the client is missing or scoped out.
#[instrument(skip(db))]
pub async fn delete_client(db: &DatabaseConnection, id: i32, scope: Scope) -> Result<bool> {
    let Some(target) = get_client_by_id(db, id, scope).await? else {
        return Ok(false);
    };

    let removed = account::Entity::delete_many()
        .filter(account::Column::ClientId.eq(target.id))
        .exec(db)
        .await?;
    debug!(
        client_id = target.id,
        accounts = removed.rows_affected,
        "cascaded account deletion"
    );

    client::Entity::delete_by_id(target.id).exec(db).await?;

    Ok(true)
}
