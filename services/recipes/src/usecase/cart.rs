use uuid::Uuid;

use crate::domain::repository::{CartRepository, RecipeRepository};
use crate::domain::types::RecipeSummary;
use crate::error::RecipesServiceError;

// ── AddCartEntry ─────────────────────────────────────────────────────────────

pub struct AddCartEntryUseCase<C: CartRepository, R: RecipeRepository> {
    pub cart: C,
    pub recipes: R,
}

impl<C: CartRepository, R: RecipeRepository> AddCartEntryUseCase<C, R> {
    /// Add a recipe to the user's shopping cart. Same asymmetric contract as
    /// favorites: add-when-present is a conflict.
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
        let inserted = self.cart.insert(user_id, recipe_id).await?;
        if !inserted {
            return Err(RecipesServiceError::AlreadyInCart);
        }
        Ok(summary)
    }
}

// ── RemoveCartEntry ──────────────────────────────────────────────────────────

pub struct RemoveCartEntryUseCase<C: CartRepository, R: RecipeRepository> {
    pub cart: C,
    pub recipes: R,
}

impl<C: CartRepository, R: RecipeRepository> RemoveCartEntryUseCase<C, R> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        let exists = self.recipes.summary(recipe_id).await?.is_some();
        if !exists {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        let deleted = self.cart.delete(user_id, recipe_id).await?;
        if !deleted {
            return Err(RecipesServiceError::CartEntryNotFound);
        }
        Ok(())
    }
}
