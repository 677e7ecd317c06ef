/// Failure raised by a [`ContactStore`](crate::ContactStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database could not be reached. Nothing was memoised; the next
    /// call tries again.
    #[error("Database unavailable: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A statement failed on an established connection.
    #[error(transparent)]
    Query(#[from] sqlx::Error),
}
