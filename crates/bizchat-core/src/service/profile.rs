//! Business profile service.

use bizchat_types::error::ProfileError;
use bizchat_types::identity::BusinessProfile;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::repository::profile::ProfileRepository;

/// Fields a user submits when creating or updating their profile.
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub industry: String,
    pub company_size: String,
    pub goals: String,
}

/// Manages the one-per-user business profile the prompt builder reads.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Get a user's profile.
    pub async fn get(&self, user_id: &Uuid) -> Result<BusinessProfile, ProfileError> {
        self.repo
            .get_by_user(user_id)
            .await?
            .ok_or(ProfileError::NotFound)
    }

    /// Create or replace a user's profile; last write wins.
    ///
    /// Returns the stored profile and whether it was newly created. An
    /// update keeps the original `id` and `created_at`.
    pub async fn upsert(
        &self,
        user_id: &Uuid,
        input: ProfileInput,
    ) -> Result<(BusinessProfile, bool), ProfileError> {
        let industry = input.industry.trim();
        let company_size = input.company_size.trim();
        let goals = input.goals.trim();
        if industry.is_empty() {
            return Err(ProfileError::Validation {
                field: "industry",
                reason: "must not be empty".to_string(),
            });
        }
        if company_size.is_empty() {
            return Err(ProfileError::Validation {
                field: "company_size",
                reason: "must not be empty".to_string(),
            });
        }
        if goals.is_empty() {
            return Err(ProfileError::Validation {
                field: "goals",
                reason: "must not be empty".to_string(),
            });
        }

        let existing = self.repo.get_by_user(user_id).await?;
        let created = existing.is_none();
        let now = Utc::now();
        let profile = match existing {
            Some(prev) => BusinessProfile {
                industry: industry.to_string(),
                company_size: company_size.to_string(),
                goals: goals.to_string(),
                updated_at: now,
                ..prev
            },
            None => BusinessProfile {
                id: Uuid::now_v7(),
                user_id: *user_id,
                industry: industry.to_string(),
                company_size: company_size.to_string(),
                goals: goals.to_string(),
                created_at: now,
                updated_at: now,
            },
        };
        self.repo.upsert(&profile).await?;

        info!(user_id = %user_id, created, "business profile saved");
        Ok((profile, created))
    }
}
