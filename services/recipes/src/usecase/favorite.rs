use uuid::Uuid;

use crate::domain::repository::{FavoriteRepository, RecipeRepository};
use crate::domain::types::RecipeSummary;
use crate::error::RecipesServiceError;

// ── AddFavorite ──────────────────────────────────────────────────────────────

pub struct AddFavoriteUseCase<F: FavoriteRepository, R: RecipeRepository> {
    pub favorites: F,
    pub recipes: R,
}

impl<F: FavoriteRepository, R: RecipeRepository> AddFavoriteUseCase<F, R> {
    /// Add a recipe to the user's favorites. Adding a recipe that is already
    /// present is a client error, not an idempotent no-op.
    pub async fn execute(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<RecipeSummary, RecipesServiceError> {
        let summary = self
            .recipes
            .summary(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        let inserted = self.favorites.insert(user_id, recipe_id).await?;
        if !inserted {
            return Err(RecipesServiceError::AlreadyFavorited);
        }
        Ok(summary)
    }
}

// ── RemoveFavorite ───────────────────────────────────────────────────────────

pub struct RemoveFavoriteUseCase<F: FavoriteRepository, R: RecipeRepository> {
    pub favorites: F,
    pub recipes: R,
}

impl<F: FavoriteRepository, R: RecipeRepository> RemoveFavoriteUseCase<F, R> {
    /// Remove a recipe from the user's favorites. Removing an absent entry is
    /// a client error, mirroring the add contract.
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        let exists = self
            .recipes
            .summary(recipe_id)
            .await?
            .is_some();
        if !exists {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        let deleted = self.favorites.delete(user_id, recipe_id).await?;
        if !deleted {
            return Err(RecipesServiceError::FavoriteNotFound);
        }
        Ok(())
    }
}
