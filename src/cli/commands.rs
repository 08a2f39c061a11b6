mod initdb;
mod status;

pub use initdb::init_database;
pub use status::status;
