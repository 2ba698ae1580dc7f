use std::collections::HashSet;

use uuid::Uuid;

use ladle_domain::pagination::PageRequest;

use crate::domain::repository::{
    CartRepository, FavoriteRepository, FollowRepository, ImageStorePort, IngredientRepository,
    RecipeRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    Recipe, RecipeDraft, RecipeFilter, RecipeLineInput, RecipeView, validate_recipe_input,
};
use crate::error::RecipesServiceError;

/// Complete recipe payload for create and full-replace update. Partial
/// payloads are rejected at deserialization — both collections are required
/// on every write.
pub struct RecipeWriteInput {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<RecipeLineInput>,
}

/// Collaborators needed to render requester-relative read views.
pub struct RecipeViewAssembler<U, FA, C, FO>
where
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub users: U,
    pub favorites: FA,
    pub cart: C,
    pub follows: FO,
}

impl<U, FA, C, FO> RecipeViewAssembler<U, FA, C, FO>
where
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    /// Attach author profiles and requester-relative flags to hydrated
    /// recipes. Anonymous requesters get all flags false.
    pub async fn assemble(
        &self,
        requester: Option<Uuid>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<Uuid> = recipes.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors = self.users.find_by_ids(&author_ids).await?;

        let (favorited, in_cart, followed) = match requester {
            Some(user_id) => (
                self.favorites.filter_recipe_ids(user_id, &recipe_ids).await?,
                self.cart.filter_recipe_ids(user_id, &recipe_ids).await?,
                self.follows.filter_followed(user_id, &author_ids).await?,
            ),
            None => (HashSet::new(), HashSet::new(), HashSet::new()),
        };

        recipes
            .into_iter()
            .map(|recipe| {
                let author = authors
                    .iter()
                    .find(|a| a.id == recipe.author_id)
                    .cloned()
                    .ok_or_else(|| {
                        anyhow::anyhow!("author {} missing for recipe {}", recipe.author_id, recipe.id)
                    })?;
                Ok(RecipeView {
                    author_is_subscribed: followed.contains(&author.id),
                    is_favorited: favorited.contains(&recipe.id),
                    is_in_shopping_cart: in_cart.contains(&recipe.id),
                    author,
                    recipe,
                })
            })
            .collect()
    }

    async fn assemble_one(
        &self,
        requester: Option<Uuid>,
        recipe: Recipe,
    ) -> Result<RecipeView, RecipesServiceError> {
        let mut views = self.assemble(requester, vec![recipe]).await?;
        views
            .pop()
            .ok_or_else(|| anyhow::anyhow!("assemble returned no view").into())
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R, T, I, S, U, FA, C, FO>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStorePort,
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub repo: R,
    pub tags: T,
    pub ingredients: I,
    pub images: S,
    pub views: RecipeViewAssembler<U, FA, C, FO>,
}

impl<R, T, I, S, U, FA, C, FO> CreateRecipeUseCase<R, T, I, S, U, FA, C, FO>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStorePort,
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub async fn execute(
        &self,
        author_id: Uuid,
        input: RecipeWriteInput,
    ) -> Result<RecipeView, RecipesServiceError> {
        let draft =
            validate_to_draft(author_id, input, &self.tags, &self.ingredients, &self.images)
                .await?;
        let recipe_id = self.repo.create(&draft).await?;
        let recipe = self
            .repo
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("recipe {recipe_id} vanished after create"))?;
        self.views.assemble_one(Some(author_id), recipe).await
    }
}

/// Shared validation path for create and update: field-level checks, catalog
/// existence checks, then image persistence.
async fn validate_to_draft<T, I, S>(
    author_id: Uuid,
    input: RecipeWriteInput,
    tags: &T,
    ingredients: &I,
    images: &S,
) -> Result<RecipeDraft, RecipesServiceError>
where
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStorePort,
{
    validate_recipe_input(&input.tag_ids, &input.ingredients, input.cooking_time)
        .map_err(RecipesServiceError::Validation)?;

    let known_tags = tags.find_by_ids(&input.tag_ids).await?;
    if known_tags.len() != input.tag_ids.len() {
        return Err(RecipesServiceError::TagNotFound);
    }

    let ingredient_ids: Vec<i32> = input.ingredients.iter().map(|l| l.ingredient_id).collect();
    let known_ingredients = ingredients.find_by_ids(&ingredient_ids).await?;
    if known_ingredients.len() != ingredient_ids.len() {
        return Err(RecipesServiceError::IngredientNotFound);
    }

    let image = images.store(&input.image).await?;

    Ok(RecipeDraft {
        author_id,
        name: input.name,
        image,
        text: input.text,
        cooking_time: input.cooking_time,
        tag_ids: input.tag_ids,
        lines: input.ingredients,
    })
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R, T, I, S, U, FA, C, FO>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStorePort,
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub repo: R,
    pub tags: T,
    pub ingredients: I,
    pub images: S,
    pub views: RecipeViewAssembler<U, FA, C, FO>,
}

impl<R, T, I, S, U, FA, C, FO> UpdateRecipeUseCase<R, T, I, S, U, FA, C, FO>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStorePort,
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub async fn execute(
        &self,
        requester: Uuid,
        recipe_id: i32,
        input: RecipeWriteInput,
    ) -> Result<RecipeView, RecipesServiceError> {
        let existing = self
            .repo
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if existing.author_id != requester {
            return Err(RecipesServiceError::Forbidden);
        }

        let draft =
            validate_to_draft(requester, input, &self.tags, &self.ingredients, &self.images)
                .await?;
        self.repo.update(recipe_id, &draft).await?;

        let recipe = self
            .repo
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("recipe {recipe_id} vanished after update"))?;
        self.views.assemble_one(Some(requester), recipe).await
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(
        &self,
        requester: Uuid,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        let existing = self
            .repo
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if existing.author_id != requester {
            return Err(RecipesServiceError::Forbidden);
        }
        self.repo.delete(recipe_id).await?;
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R, U, FA, C, FO>
where
    R: RecipeRepository,
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub repo: R,
    pub views: RecipeViewAssembler<U, FA, C, FO>,
}

impl<R, U, FA, C, FO> GetRecipeUseCase<R, U, FA, C, FO>
where
    R: RecipeRepository,
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub async fn execute(
        &self,
        requester: Option<Uuid>,
        recipe_id: i32,
    ) -> Result<RecipeView, RecipesServiceError> {
        let recipe = self
            .repo
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        self.views.assemble_one(requester, recipe).await
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

/// Raw listing filters as they arrive from the query string.
#[derive(Debug, Clone, Default)]
pub struct RecipeListQueryInput {
    pub tag_slugs: Vec<String>,
    pub author_id: Option<Uuid>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

/// Resolve query filters against the requester. The favorited/cart filters
/// only apply when requested as `true` by an authenticated user; otherwise
/// they are deliberate no-ops, not errors.
pub fn resolve_filter(requester: Option<Uuid>, query: &RecipeListQueryInput) -> RecipeFilter {
    let gated = |flag: Option<bool>| match (flag, requester) {
        (Some(true), Some(user_id)) => Some(user_id),
        _ => None,
    };
    RecipeFilter {
        tag_slugs: query.tag_slugs.clone(),
        author_id: query.author_id,
        favorited_by: gated(query.is_favorited),
        in_cart_of: gated(query.is_in_shopping_cart),
    }
}

pub struct ListRecipesUseCase<R, U, FA, C, FO>
where
    R: RecipeRepository,
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub repo: R,
    pub views: RecipeViewAssembler<U, FA, C, FO>,
}

impl<R, U, FA, C, FO> ListRecipesUseCase<R, U, FA, C, FO>
where
    R: RecipeRepository,
    U: UserRepository,
    FA: FavoriteRepository,
    C: CartRepository,
    FO: FollowRepository,
{
    pub async fn execute(
        &self,
        requester: Option<Uuid>,
        query: RecipeListQueryInput,
        page: PageRequest,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let filter = resolve_filter(requester, &query);
        let recipes = self.repo.list(&filter, page).await?;
        self.views.assemble(requester, recipes).await
    }
}
