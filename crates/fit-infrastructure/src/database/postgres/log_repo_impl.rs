//! PostgreSQL log repositories

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use fit_core::domain::{BurnLog, IntakeLog, WeightLog, WeightUnit};
use fit_core::error::DomainError;
use fit_core::repositories::LogStore;
use fit_shared::types::EntityId;

/// One adapter serves all three log tables; the row type selects the table.
pub struct PgLogRepository {
    pool: PgPool,
}

impl PgLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

// Internal row types for SQLx mapping

#[derive(Debug, FromRow)]
struct WeightLogRow {
    id: Uuid,
    user_id: Uuid,
    log_date: NaiveDate,
    weight_kg: f64,
    unit: String,
    created_at: DateTime<Utc>,
}

impl From<WeightLogRow> for WeightLog {
    fn from(row: WeightLogRow) -> Self {
        WeightLog {
            id: row.id,
            user_id: row.user_id,
            log_date: row.log_date,
            weight_kg: row.weight_kg,
            unit: WeightUnit::from_str(&row.unit).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl LogStore<WeightLog> for PgLogRepository {
    async fn list_for_user(&self, user_id: &EntityId) -> Result<Vec<WeightLog>, DomainError> {
        let rows: Vec<WeightLogRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, log_date, weight_kg, unit, created_at
            FROM weight_logs
            WHERE user_id = $1
            ORDER BY log_date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("listing weight logs", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, row: &WeightLog) -> Result<WeightLog, DomainError> {
        let created: WeightLogRow = sqlx::query_as(
            r#"
            INSERT INTO weight_logs (id, user_id, log_date, weight_kg, unit, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, log_date, weight_kg, unit, created_at
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.log_date)
        .bind(row.weight_kg)
        .bind(row.unit.as_str())
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("inserting weight log", e))?;

        Ok(created.into())
    }

    async fn update(&self, row: &WeightLog) -> Result<WeightLog, DomainError> {
        let updated: Option<WeightLogRow> = sqlx::query_as(
            r#"
            UPDATE weight_logs
            SET log_date = $3, weight_kg = $4, unit = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, log_date, weight_kg, unit, created_at
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.log_date)
        .bind(row.weight_kg)
        .bind(row.unit.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("updating weight log", e))?;

        updated.map(Into::into).ok_or(DomainError::LogNotFound)
    }

    async fn delete(&self, id: &EntityId, user_id: &EntityId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM weight_logs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting weight log", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LogNotFound);
        }
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct IntakeLogRow {
    id: Uuid,
    user_id: Uuid,
    log_date: NaiveDate,
    calories: f64,
    created_at: DateTime<Utc>,
}

impl From<IntakeLogRow> for IntakeLog {
    fn from(row: IntakeLogRow) -> Self {
        IntakeLog {
            id: row.id,
            user_id: row.user_id,
            log_date: row.log_date,
            calories: row.calories,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl LogStore<IntakeLog> for PgLogRepository {
    async fn list_for_user(&self, user_id: &EntityId) -> Result<Vec<IntakeLog>, DomainError> {
        let rows: Vec<IntakeLogRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, log_date, calories, created_at
            FROM intake_logs
            WHERE user_id = $1
            ORDER BY log_date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("listing intake logs", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, row: &IntakeLog) -> Result<IntakeLog, DomainError> {
        let created: IntakeLogRow = sqlx::query_as(
            r#"
            INSERT INTO intake_logs (id, user_id, log_date, calories, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, log_date, calories, created_at
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.log_date)
        .bind(row.calories)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("inserting intake log", e))?;

        Ok(created.into())
    }

    async fn update(&self, row: &IntakeLog) -> Result<IntakeLog, DomainError> {
        let updated: Option<IntakeLogRow> = sqlx::query_as(
            r#"
            UPDATE intake_logs
            SET log_date = $3, calories = $4
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, log_date, calories, created_at
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.log_date)
        .bind(row.calories)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("updating intake log", e))?;

        updated.map(Into::into).ok_or(DomainError::LogNotFound)
    }

    async fn delete(&self, id: &EntityId, user_id: &EntityId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM intake_logs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting intake log", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LogNotFound);
        }
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct BurnLogRow {
    id: Uuid,
    user_id: Uuid,
    log_date: NaiveDate,
    calories: f64,
    source: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BurnLogRow> for BurnLog {
    fn from(row: BurnLogRow) -> Self {
        BurnLog {
            id: row.id,
            user_id: row.user_id,
            log_date: row.log_date,
            calories: row.calories,
            source: row.source,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl LogStore<BurnLog> for PgLogRepository {
    async fn list_for_user(&self, user_id: &EntityId) -> Result<Vec<BurnLog>, DomainError> {
        let rows: Vec<BurnLogRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, log_date, calories, source, created_at
            FROM burn_logs
            WHERE user_id = $1
            ORDER BY log_date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("listing burn logs", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, row: &BurnLog) -> Result<BurnLog, DomainError> {
        let created: BurnLogRow = sqlx::query_as(
            r#"
            INSERT INTO burn_logs (id, user_id, log_date, calories, source, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, log_date, calories, source, created_at
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.log_date)
        .bind(row.calories)
        .bind(row.source.as_deref())
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("inserting burn log", e))?;

        Ok(created.into())
    }

    async fn update(&self, row: &BurnLog) -> Result<BurnLog, DomainError> {
        let updated: Option<BurnLogRow> = sqlx::query_as(
            r#"
            UPDATE burn_logs
            SET log_date = $3, calories = $4, source = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, log_date, calories, source, created_at
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.log_date)
        .bind(row.calories)
        .bind(row.source.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("updating burn log", e))?;

        updated.map(Into::into).ok_or(DomainError::LogNotFound)
    }

    async fn delete(&self, id: &EntityId, user_id: &EntityId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM burn_logs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting burn log", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LogNotFound);
        }
        Ok(())
    }
}
