//! PostgreSQL profile repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use fit_core::domain::{ActivityLevel, Profile, Sex};
use fit_core::error::DomainError;
use fit_core::repositories::ProfileRepository;
use fit_shared::types::EntityId;

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    user_id: Uuid,
    sex: String,
    weight_kg: f64,
    height_cm: f64,
    birth_date: Option<String>,
    activity_level: String,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: row.user_id,
            sex: Sex::from_str(&row.sex).unwrap_or(Sex::Male),
            weight_kg: row.weight_kg,
            height_cm: row.height_cm,
            birth_date: row.birth_date,
            activity_level: ActivityLevel::from_str(&row.activity_level)
                .unwrap_or(ActivityLevel::Sedentary),
        }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user(&self, user_id: &EntityId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT user_id, sex, weight_kg, height_cm, birth_date, activity_level
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding profile: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Into::into))
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile, DomainError> {
        let row: ProfileRow = sqlx::query_as(
            r#"
            INSERT INTO profiles (user_id, sex, weight_kg, height_cm, birth_date, activity_level)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                sex = EXCLUDED.sex,
                weight_kg = EXCLUDED.weight_kg,
                height_cm = EXCLUDED.height_cm,
                birth_date = EXCLUDED.birth_date,
                activity_level = EXCLUDED.activity_level
            RETURNING user_id, sex, weight_kg, height_cm, birth_date, activity_level
            "#,
        )
        .bind(profile.user_id)
        .bind(profile.sex.as_str())
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(profile.birth_date.as_deref())
        .bind(profile.activity_level.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error upserting profile: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
