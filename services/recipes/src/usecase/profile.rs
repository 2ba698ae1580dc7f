use uuid::Uuid;

use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::types::UserProfile;
use crate::error::RecipesServiceError;

/// Profile enriched with the requester-relative subscription flag.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub profile: UserProfile,
    pub is_subscribed: bool,
}

pub struct GetProfileUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> GetProfileUseCase<U, F> {
    pub async fn execute(
        &self,
        requester: Option<Uuid>,
        user_id: Uuid,
    ) -> Result<ProfileView, RecipesServiceError> {
        let profile = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let is_subscribed = match requester {
            Some(follower) => self.follows.contains(follower, user_id).await?,
            None => false,
        };
        Ok(ProfileView {
            profile,
            is_subscribed,
        })
    }
}
