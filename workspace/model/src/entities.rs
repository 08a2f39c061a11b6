//! Root for all SeaORM entity modules.
//!
//! Three tables form the ownership chain: a user (administrator or
//! manager), the clients a manager serves, and the currency accounts
//! each client holds.

pub mod account;
pub mod client;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Entity as Account;
    pub use super::client::Entity as Client;
    pub use super::user::Entity as User;
}
