use uuid::Uuid;

use ladle_domain::pagination::PageRequest;

use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::{RecipeSummary, UserProfile};
use crate::error::RecipesServiceError;

/// A followed author with their recipes embedded, as rendered in the
/// subscriptions listing. `recipes` may be capped by the query; the count is
/// the uncapped total.
#[derive(Debug, Clone)]
pub struct FollowedAuthorView {
    pub profile: UserProfile,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}

// ── FollowUser ───────────────────────────────────────────────────────────────

pub struct FollowUserUseCase<F, U, R>
where
    F: FollowRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    pub follows: F,
    pub users: U,
    pub recipes: R,
}

impl<F, U, R> FollowUserUseCase<F, U, R>
where
    F: FollowRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    pub async fn execute(
        &self,
        follower: Uuid,
        target: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<FollowedAuthorView, RecipesServiceError> {
        let profile = self
            .users
            .find_by_id(target)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        if follower == target {
            return Err(RecipesServiceError::Validation(vec![
                "followed: cannot subscribe to yourself".to_owned(),
            ]));
        }
        let inserted = self.follows.insert(follower, target).await?;
        if !inserted {
            return Err(RecipesServiceError::Validation(vec![
                "followed: already subscribed".to_owned(),
            ]));
        }
        let recipes = self.recipes.list_by_author(target, recipes_limit).await?;
        let recipes_count = self.recipes.count_by_author(target).await?;
        Ok(FollowedAuthorView {
            profile,
            recipes,
            recipes_count,
        })
    }
}

// ── UnfollowUser ─────────────────────────────────────────────────────────────

pub struct UnfollowUserUseCase<F: FollowRepository, U: UserRepository> {
    pub follows: F,
    pub users: U,
}

impl<F: FollowRepository, U: UserRepository> UnfollowUserUseCase<F, U> {
    pub async fn execute(&self, follower: Uuid, target: Uuid) -> Result<(), RecipesServiceError> {
        let exists = self.users.find_by_id(target).await?.is_some();
        if !exists {
            return Err(RecipesServiceError::UserNotFound);
        }
        let deleted = self.follows.delete(follower, target).await?;
        if !deleted {
            return Err(RecipesServiceError::FollowNotFound);
        }
        Ok(())
    }
}

// ── ListFollowing ────────────────────────────────────────────────────────────

pub struct ListFollowingUseCase<F, U, R>
where
    F: FollowRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    pub follows: F,
    pub users: U,
    pub recipes: R,
}

impl<F, U, R> ListFollowingUseCase<F, U, R>
where
    F: FollowRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    /// Every author the user follows, enriched with their recipes (capped at
    /// `recipes_limit` when supplied, uncapped by default) and the total
    /// recipe count, which the cap does not affect.
    pub async fn execute(
        &self,
        user_id: Uuid,
        recipes_limit: Option<u64>,
        page: PageRequest,
    ) -> Result<Vec<FollowedAuthorView>, RecipesServiceError> {
        let followed = self.follows.followed_ids(user_id, page).await?;
        let profiles = self.users.find_by_ids(&followed).await?;

        let mut views = Vec::with_capacity(followed.len());
        for author_id in followed {
            let Some(profile) = profiles.iter().find(|p| p.id == author_id).cloned() else {
                // Author row deleted between queries; skip rather than fail
                // the whole listing.
                continue;
            };
            let recipes = self.recipes.list_by_author(author_id, recipes_limit).await?;
            let recipes_count = self.recipes.count_by_author(author_id).await?;
            views.push(FollowedAuthorView {
                profile,
                recipes,
                recipes_count,
            });
        }
        Ok(views)
    }
}
