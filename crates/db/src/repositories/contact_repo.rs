//! Repository for the `contacts` table.

use async_trait::async_trait;
use cybermind_core::types::ContactId;
use sqlx::PgPool;

use crate::connection::LazyPool;
use crate::error::StoreError;
use crate::models::contact::{Contact, ContactChanges, NewContact};
use crate::store::ContactStore;
use crate::{health_check, DbConfig, DbPool};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, message, project_type, priority, created_at";

/// Provides CRUD operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact, returning the created row.
    ///
    /// The identifier is minted here; `created_at` comes from the database.
    pub async fn create(pool: &PgPool, input: &NewContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (id, name, email, phone, message, project_type, priority)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(ContactId::generate().as_uuid())
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.message)
            .bind(input.project_type.as_str())
            .bind(input.priority.as_str())
            .fetch_one(pool)
            .await
    }

    /// List all contacts ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Contact>(&query).fetch_all(pool).await
    }

    /// Find a contact by its identifier.
    pub async fn find_by_id(pool: &PgPool, id: ContactId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id.as_uuid())
            .fetch_optional(pool)
            .await
    }

    /// Update a contact. Only fields present in `changes` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: ContactId,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = CASE WHEN $4 THEN $5 ELSE phone END,
                message = COALESCE($6, message),
                project_type = COALESCE($7, project_type),
                priority = COALESCE($8, priority)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id.as_uuid())
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(changes.phone.is_some())
            .bind(changes.phone.clone().flatten())
            .bind(&changes.message)
            .bind(changes.project_type.map(|p| p.as_str()))
            .bind(changes.priority.map(|p| p.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a contact by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: ContactId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`ContactStore`] backed by PostgreSQL through a [`LazyPool`].
///
/// Every operation first ensures the shared pool is open, so the server can
/// start while the database is still unreachable.
#[derive(Debug)]
pub struct PgContactStore {
    pool: LazyPool,
}

impl PgContactStore {
    pub fn new(config: DbConfig) -> Self {
        Self {
            pool: LazyPool::new(config),
        }
    }

    /// Build a store over an already migrated pool.
    pub fn from_pool(config: DbConfig, pool: DbPool) -> Self {
        Self {
            pool: LazyPool::from_pool(config, pool),
        }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        let pool = self.pool.connect().await?;
        Ok(ContactRepo::list(pool).await?)
    }

    async fn create(&self, input: &NewContact) -> Result<Contact, StoreError> {
        let pool = self.pool.connect().await?;
        Ok(ContactRepo::create(pool, input).await?)
    }

    async fn update(
        &self,
        id: ContactId,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, StoreError> {
        let pool = self.pool.connect().await?;
        Ok(ContactRepo::update(pool, id, changes).await?)
    }

    async fn delete(&self, id: ContactId) -> Result<bool, StoreError> {
        let pool = self.pool.connect().await?;
        Ok(ContactRepo::delete(pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let pool = self.pool.connect().await?;
        Ok(health_check(pool).await?)
    }
}
