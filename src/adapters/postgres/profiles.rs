//! PostgreSQL implementations of the profile ports.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::UserId;
use crate::ports::{Profile, ProfileError, ProfileReader, ProfileRepository};

/// PostgreSQL implementation of ProfileReader.
#[derive(Clone)]
pub struct PostgresProfileReader {
    pool: PgPool,
}

impl PostgresProfileReader {
    /// Creates a new PostgresProfileReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileReader for PostgresProfileReader {
    async fn get(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, display_name FROM profiles WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileError::Infrastructure(e.to_string()))?;

        row.map(|row| {
            let id: String = row.get("user_id");
            Ok(Profile {
                user_id: UserId::new(id)
                    .map_err(|e| ProfileError::Infrastructure(e.to_string()))?,
                display_name: row.get("display_name"),
            })
        })
        .transpose()
    }
}

/// PostgreSQL implementation of ProfileRepository.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a new PostgresProfileRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn upsert(&self, profile: &Profile) -> Result<(), ProfileError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, display_name)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET display_name = EXCLUDED.display_name
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.display_name)
        .execute(&self.pool)
        .await
        .map_err(|e| ProfileError::Infrastructure(e.to_string()))?;

        Ok(())
    }
}
