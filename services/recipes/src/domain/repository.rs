#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use uuid::Uuid;

use ladle_domain::pagination::PageRequest;

use crate::domain::types::{
    CartLine, Ingredient, Recipe, RecipeDraft, RecipeFilter, RecipeSummary, Tag, UserProfile,
};
use crate::error::RecipesServiceError;

/// Repository for user profiles (mirror of the external identity provider).
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, RecipesServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserProfile>, RecipesServiceError>;
}

/// Repository for the tag catalog.
pub trait TagRepository: Send + Sync {
    /// All tags in name order.
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError>;
}

/// Repository for the ingredient catalog.
pub trait IngredientRepository: Send + Sync {
    /// List ingredients in name order, optionally narrowed to a
    /// case-insensitive name prefix.
    async fn list(&self, name_prefix: Option<&str>)
    -> Result<Vec<Ingredient>, RecipesServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError>;
}

/// Repository for the recipe aggregate. Create and update are atomic over the
/// recipe row, its tag set and its ingredient lines.
pub trait RecipeRepository: Send + Sync {
    /// Insert the recipe row, tag associations and ingredient lines in one
    /// transaction. Returns the new recipe id.
    async fn create(&self, draft: &RecipeDraft) -> Result<i32, RecipesServiceError>;

    /// Full-replace update: scalar fields are overwritten, tag associations
    /// and ingredient lines are cleared and re-inserted, all in one
    /// transaction.
    async fn update(&self, recipe_id: i32, draft: &RecipeDraft)
    -> Result<(), RecipesServiceError>;

    /// Delete a recipe. Returns `true` if a row was deleted. Lines, favorites
    /// and cart entries cascade at the storage layer.
    async fn delete(&self, recipe_id: i32) -> Result<bool, RecipesServiceError>;

    /// Fetch the hydrated aggregate (tags + ingredient lines).
    async fn find_by_id(&self, recipe_id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    async fn summary(&self, recipe_id: i32)
    -> Result<Option<RecipeSummary>, RecipesServiceError>;

    /// List hydrated recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError>;

    /// An author's recipes in publication order, newest first, optionally
    /// capped.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, RecipesServiceError>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError>;

    /// Every ingredient line of every listed recipe, unaggregated.
    async fn ingredient_lines_for(
        &self,
        recipe_ids: &[i32],
    ) -> Result<Vec<CartLine>, RecipesServiceError>;
}

/// Repository for favorite join rows. Uniqueness of (user, recipe) is
/// enforced by the storage layer, not by check-then-insert.
pub trait FavoriteRepository: Send + Sync {
    /// Insert a favorite. Returns `false` when the pair already exists.
    async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;

    /// Delete a favorite. Returns `true` if a row was deleted.
    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;

    async fn contains(&self, user_id: Uuid, recipe_id: i32)
    -> Result<bool, RecipesServiceError>;

    /// Which of `recipe_ids` the user has favorited.
    async fn filter_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError>;
}

/// Repository for shopping-cart join rows. Same uniqueness contract as
/// favorites.
pub trait CartRepository: Send + Sync {
    async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;
    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;
    async fn contains(&self, user_id: Uuid, recipe_id: i32)
    -> Result<bool, RecipesServiceError>;

    async fn filter_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError>;

    /// Every recipe currently in the user's cart.
    async fn recipe_ids(&self, user_id: Uuid) -> Result<Vec<i32>, RecipesServiceError>;
}

/// Repository for follow join rows.
pub trait FollowRepository: Send + Sync {
    /// Insert a follow. Returns `false` when the pair already exists.
    async fn insert(&self, follower: Uuid, followed: Uuid) -> Result<bool, RecipesServiceError>;

    /// Delete a follow. Returns `true` if a row was deleted.
    async fn delete(&self, follower: Uuid, followed: Uuid) -> Result<bool, RecipesServiceError>;

    async fn contains(&self, follower: Uuid, followed: Uuid)
    -> Result<bool, RecipesServiceError>;

    /// Ids of authors the user follows, paginated.
    async fn followed_ids(
        &self,
        follower: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Uuid>, RecipesServiceError>;

    /// Which of `candidates` the user follows.
    async fn filter_followed(
        &self,
        follower: Uuid,
        candidates: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError>;
}

/// Port for the binary asset store. The service keeps only the returned
/// reference; image bytes never cross the domain boundary.
pub trait ImageStorePort: Send + Sync {
    /// Persist a base64 data-URI payload and return its reference. A payload
    /// that is already a reference is passed through unchanged.
    async fn store(&self, payload: &str) -> Result<String, RecipesServiceError>;
}
