#[cfg(test)]
pub mod test_utils {
    use migration::{Migrator, MigratorTrait};
    use model::entities::account::Currency;
    use model::entities::user::Role;
    use model::entities::{account, client, user};
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::scope::Scope;
    use crate::stores::{accounts, clients, users};

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        db.execute_unprepared("PRAGMA foreign_keys = ON;")
            .await
            .expect("Failed to enable foreign keys");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    pub async fn seed_user(db: &DatabaseConnection, email: &str, role: Role) -> user::Model {
        users::create_user(db, email, role, "test-hash")
            .await
            .expect("Failed to seed user")
    }

    pub async fn seed_client(
        db: &DatabaseConnection,
        email: &str,
        manager_id: i32,
    ) -> client::Model {
        clients::create_client(db, email, manager_id)
            .await
            .expect("Failed to seed client")
    }

    pub async fn seed_account(
        db: &DatabaseConnection,
        client_id: i32,
        currency: Currency,
        amount: i64,
    ) -> account::Model {
        accounts::create_account(db, client_id, currency, amount, Scope::Unrestricted)
            .await
            .expect("Failed to seed account")
            .expect("Seeded client must be visible to an unrestricted scope")
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Captured by the test harness
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}
