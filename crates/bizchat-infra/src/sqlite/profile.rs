//! SQLite business profile repository implementation.

use bizchat_core::repository::profile::ProfileRepository;
use bizchat_types::error::RepositoryError;
use bizchat_types::identity::BusinessProfile;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProfileRepository`.
pub struct SqliteProfileRepository {
    pool: DatabasePool,
}

impl SqliteProfileRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain BusinessProfile.
struct BusinessProfileRow {
    id: String,
    user_id: String,
    industry: String,
    company_size: String,
    goals: String,
    created_at: String,
    updated_at: String,
}

impl BusinessProfileRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            industry: row.try_get("industry")?,
            company_size: row.try_get("company_size")?,
            goals: row.try_get("goals")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_profile(self) -> Result<BusinessProfile, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid profile id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(BusinessProfile {
            id,
            user_id,
            industry: self.industry,
            company_size: self.company_size,
            goals: self.goals,
            created_at,
            updated_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ProfileRepository for SqliteProfileRepository {
    async fn get_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<BusinessProfile>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM business_profiles WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let profile_row = BusinessProfileRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(profile_row.into_profile()?))
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, profile: &BusinessProfile) -> Result<(), RepositoryError> {
        // One profile per user: the unique user_id constraint turns the
        // insert into an update on conflict.
        sqlx::query(
            r#"INSERT INTO business_profiles
                   (id, user_id, industry, company_size, goals, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT (user_id) DO UPDATE SET
                   industry = excluded.industry,
                   company_size = excluded.company_size,
                   goals = excluded.goals,
                   updated_at = excluded.updated_at"#,
        )
        .bind(profile.id.to_string())
        .bind(profile.user_id.to_string())
        .bind(&profile.industry)
        .bind(&profile.company_size)
        .bind(&profile.goals)
        .bind(format_datetime(&profile.created_at))
        .bind(format_datetime(&profile.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::account::SqliteAccountRepository;
    use bizchat_core::repository::account::AccountRepository;
    use bizchat_types::identity::User;

    async fn setup() -> (tempfile::TempDir, SqliteProfileRepository, Uuid) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();

        let accounts = SqliteAccountRepository::new(pool.clone());
        let user = User {
            id: Uuid::now_v7(),
            email: "owner@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            telegram_id: None,
            created_at: Utc::now(),
        };
        accounts.create_user(&user).await.unwrap();

        (dir, SqliteProfileRepository::new(pool), user.id)
    }

    fn sample_profile(user_id: Uuid, industry: &str) -> BusinessProfile {
        BusinessProfile {
            id: Uuid::now_v7(),
            user_id,
            industry: industry.to_string(),
            company_size: "1-10 employees".to_string(),
            goals: "grow online sales".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_profile() {
        let (_dir, repo, user_id) = setup().await;
        assert!(repo.get_by_user(&user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_insert_then_update() {
        let (_dir, repo, user_id) = setup().await;

        let first = sample_profile(user_id, "retail");
        repo.upsert(&first).await.unwrap();

        let stored = repo.get_by_user(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.industry, "retail");

        let mut second = first.clone();
        second.industry = "cafe".to_string();
        second.updated_at = Utc::now();
        repo.upsert(&second).await.unwrap();

        let stored = repo.get_by_user(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.industry, "cafe");
        // Update keeps the original row id.
        assert_eq!(stored.id, first.id);
    }
}
