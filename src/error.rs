use thiserror::Error;

/// Error types for the store layer.
///
/// Visibility misses are deliberately NOT errors: a resource outside the
/// caller's scope and a resource that does not exist both surface as an
/// empty result, so callers cannot enumerate other tenants' data.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A genuine constraint conflict, e.g. a second account in the same
    /// currency for one client, or deleting a user who still owns clients.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Conversion request rejected before any account was touched.
    #[error("Invalid conversion: {0}")]
    InvalidConversion(String),

    /// The debit/credit pair could not be committed; everything was
    /// rolled back.
    #[error("Convert transaction failed: {0}")]
    TransactionFailed(#[source] sea_orm::DbErr),
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
