use chrono::Utc;
use model::entities::user::{self, Role};
use model::entities::client;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, instrument};

use super::UpdateOutcome;
use crate::error::{Result, StoreError};
use crate::scope::Scope;

/// Fields a user update may carry. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
}

/// Administrator readers see any user; manager readers see only
/// manager-role users, so administrators stay invisible to them.
#[instrument(skip(db))]
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: i32,
    scope: Scope,
) -> Result<Option<user::Model>> {
    let mut query = user::Entity::find_by_id(id);

    if !scope.is_unrestricted() {
        query = query.filter(user::Column::Role.eq(Role::Manager));
    }

    Ok(query.one(db).await?)
}

/// Administrators list everyone newest-first; managers get the
/// manager-role users in id order.
#[instrument(skip(db))]
pub async fn list_users(db: &DatabaseConnection, scope: Scope) -> Result<Vec<user::Model>> {
    let users = if scope.is_unrestricted() {
        user::Entity::find()
            .order_by_desc(user::Column::Id)
            .all(db)
            .await?
    } else {
        user::Entity::find()
            .filter(user::Column::Role.eq(Role::Manager))
            .order_by_asc(user::Column::Id)
            .all(db)
            .await?
    };

    Ok(users)
}

/// Administrator-gated by the caller layer. Email uniqueness is enforced
/// by the database.
#[instrument(skip(db, password_hash))]
pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    role: Role,
    password_hash: &str,
) -> Result<user::Model> {
    let now = Utc::now();
    let new_user = user::ActiveModel {
        email: Set(email.to_owned()),
        role: Set(role),
        password_hash: Set(password_hash.to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_user.insert(db).await?;
    debug!(user_id = created.id, role = role.as_str(), "user created");

    Ok(created)
}

/// Applies only the provided-and-different fields; `NoChange` when
/// nothing differs. The password hash participates in change detection
/// as an opaque string.
#[instrument(skip(db, changes))]
pub async fn update_user(
    db: &DatabaseConnection,
    id: i32,
    changes: UserChanges,
) -> Result<UpdateOutcome<user::Model>> {
    let Some(current) = get_user_by_id(db, id, Scope::Unrestricted).await? else {
        return Ok(UpdateOutcome::NotFound);
    };

    let mut active = current.clone().into_active_model();
    let mut changed = false;

    if let Some(email) = changes.email {
        if email != current.email {
            active.email = Set(email);
            changed = true;
        }
    }

    if let Some(role) = changes.role {
        if role != current.role {
            active.role = Set(role);
            changed = true;
        }
    }

    if let Some(password_hash) = changes.password_hash {
        if password_hash != current.password_hash {
            active.password_hash = Set(password_hash);
            changed = true;
        }
    }

    if !changed {
        return Ok(UpdateOutcome::NoChange);
    }

    active.updated_at = Set(Utc::now());
    Ok(UpdateOutcome::Updated(active.update(db).await?))
}

/// Deletes a user. Self-deletion and a missing target both yield `None`
/// (no error, no result). A user who still owns clients is a descriptive
/// conflict, never a silent cascade.
#[instrument(skip(db))]
pub async fn delete_user(
    db: &DatabaseConnection,
    caller_id: i32,
    id: i32,
) -> Result<Option<bool>> {
    if caller_id == id {
        return Ok(None);
    }

    let Some(target) = get_user_by_id(db, id, Scope::Unrestricted).await? else {
        return Ok(None);
    };

    let owned_clients = client::Entity::find()
        .filter(client::Column::ManagerId.eq(target.id))
        .count(db)
        .await?;

    if owned_clients > 0 {
        return Err(StoreError::Conflict(format!(
            "user {id} still manages {owned_clients} client(s)"
        )));
    }

    user::Entity::delete_by_id(target.id).exec(db).await?;
    debug!(user_id = id, "user deleted");

    Ok(Some(true))
}
