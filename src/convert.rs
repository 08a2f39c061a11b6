//! Currency conversion between two accounts of one client.
//!
//! The debit/credit pair is the only multi-statement transaction in the
//! system. Lookups run outside the transaction; only the two balance
//! writes are wrapped, and a failure rolls both back.
//!
//! Known limitation: balances are read before the transaction and
//! written without row locking or versioning, so concurrent conversions
//! over the same account pair can race.

use chrono::Utc;
use model::entities::account::{self, Currency};
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use tracing::{debug, instrument, warn};

use crate::error::{Result, StoreError};
use crate::rates;
use crate::scope::Scope;
use crate::stores::{accounts, clients};

/// Moves value from the client's `currency_from` account into its
/// `currency_to` account, all or nothing.
///
/// `amount` of zero or `None` converts the entire source balance. Every
/// reason the operation cannot proceed — invisible client, missing
/// source or destination account, empty source, insufficient funds —
/// surfaces as `Ok(None)`, indistinguishable from one another. Only the
/// same-currency request is rejected with an error, before any lookup.
#[instrument(skip(db))]
pub async fn convert_client_currency(
    db: &DatabaseConnection,
    client_id: i32,
    currency_from: Currency,
    currency_to: Currency,
    amount: Option<i64>,
    scope: Scope,
) -> Result<Option<(account::Model, account::Model)>> {
    if currency_from == currency_to {
        return Err(StoreError::InvalidConversion(
            "source and destination currency must differ".to_owned(),
        ));
    }

    let Some(owner) = clients::get_client_by_id(db, client_id, scope).await? else {
        return Ok(None);
    };

    let Some(source) = accounts::find_by_client_and_currency(db, owner.id, currency_from).await?
    else {
        return Ok(None);
    };
    if source.amount <= 0 {
        return Ok(None);
    }

    let (amount_to_convert, amount_left) = match amount {
        Some(requested) if requested > 0 => {
            if source.amount - requested < 0 {
                return Ok(None);
            }
            (requested, source.amount - requested)
        }
        _ => (source.amount, 0),
    };

    let Some(destination) =
        accounts::find_by_client_and_currency(db, owner.id, currency_to).await?
    else {
        return Ok(None);
    };

    let converted = rates::convert_amount(currency_from, currency_to, amount_to_convert)
        .ok_or_else(|| {
            StoreError::InvalidConversion(format!(
                "no rate from {} to {}",
                currency_from.as_str(),
                currency_to.as_str()
            ))
        })?;
    let credited_total = destination.amount + converted;

    debug!(
        client_id,
        amount_to_convert, converted, "converting between client accounts"
    );

    let txn = db.begin().await.map_err(StoreError::TransactionFailed)?;

    let writes = async {
        let now = Utc::now();

        let mut debit = source.into_active_model();
        debit.amount = Set(amount_left);
        debit.updated_at = Set(now);
        let debited = debit.update(&txn).await?;

        let mut credit = destination.into_active_model();
        credit.amount = Set(credited_total);
        credit.updated_at = Set(now);
        let credited = credit.update(&txn).await?;

        Ok::<_, sea_orm::DbErr>((debited, credited))
    }
    .await;

    match writes {
        Ok(pair) => {
            txn.commit().await.map_err(StoreError::TransactionFailed)?;
            Ok(Some(pair))
        }
        Err(cause) => {
            warn!(client_id, %cause, "conversion rolled back");
            if let Err(rollback_err) = txn.rollback().await {
                warn!(%rollback_err, "rollback itself failed");
            }
            Err(StoreError::TransactionFailed(cause))
        }
    }
}
