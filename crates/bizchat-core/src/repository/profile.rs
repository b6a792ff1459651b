//! ProfileRepository trait definition.

use bizchat_types::error::RepositoryError;
use bizchat_types::identity::BusinessProfile;
use uuid::Uuid;

/// Repository trait for business profile persistence.
///
/// One profile per user; `upsert` is last-write-wins.
pub trait ProfileRepository: Send + Sync {
    /// Get the profile belonging to a user.
    fn get_by_user(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<BusinessProfile>, RepositoryError>> + Send;

    /// Insert or replace the profile for `profile.user_id`.
    fn upsert(
        &self,
        profile: &BusinessProfile,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
