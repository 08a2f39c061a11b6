//! Scoped client-account management with atomic currency conversion.
//!
//! Three-tier ownership: platform users (administrators and managers),
//! the clients each manager serves, and the currency accounts each
//! client holds. Every store operation takes an explicit [`scope::Scope`]
//! and applies it inside the query, so a caller can never observe or
//! mutate another manager's data — and can never tell whether a miss was
//! "not there" or "not yours".

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod rates;
pub mod schemas;
pub mod scope;
pub mod stores;

mod test_utils;
