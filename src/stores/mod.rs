//! Store layer: scoped CRUD over users, clients and accounts.
//!
//! Every operation that could expose or mutate client data takes a
//! [`crate::scope::Scope`] and applies it inside the query itself.

pub mod accounts;
pub mod clients;
pub mod users;

/// Three-way outcome of an update: a real write, a request whose fields
/// all matched current state (no write issued), or a target outside the
/// caller's view. Only `Updated` carries data; the other two collapse to
/// an empty result at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome<T> {
    Updated(T),
    NoChange,
    NotFound,
}
