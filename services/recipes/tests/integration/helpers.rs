use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use ladle_domain::pagination::PageRequest;
use ladle_recipes::domain::repository::{
    CartRepository, FavoriteRepository, FollowRepository, ImageStorePort, IngredientRepository,
    RecipeRepository, TagRepository, UserRepository,
};
use ladle_recipes::domain::types::{
    CartLine, Ingredient, IngredientLine, Recipe, RecipeDraft, RecipeFilter, RecipeSummary, Tag,
    UserProfile,
};
use ladle_recipes::error::RecipesServiceError;
use ladle_recipes::usecase::recipe::RecipeViewAssembler;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_profile(username: &str) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
    }
}

pub fn test_tag(id: i32, slug: &str) -> Tag {
    Tag {
        id,
        name: slug.to_owned(),
        color: "#49B64E".to_owned(),
        slug: slug.to_owned(),
    }
}

pub fn test_ingredient(id: i32, name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id,
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Vec<UserProfile>,
}

impl MockUserRepo {
    pub fn new(users: Vec<UserProfile>) -> Self {
        Self { users }
    }

    pub fn empty() -> Self {
        Self { users: vec![] }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, RecipesServiceError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserProfile>, RecipesServiceError> {
        Ok(self
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

// ── MockTagRepo ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockTagRepo {
    pub tags: Vec<Tag>,
}

impl MockTagRepo {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }
}

impl TagRepository for MockTagRepo {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let mut tags = self.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        Ok(self.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        Ok(self
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }
}

// ── MockIngredientRepo ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockIngredientRepo {
    pub ingredients: Vec<Ingredient>,
}

impl MockIngredientRepo {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        Self { ingredients }
    }
}

impl IngredientRepository for MockIngredientRepo {
    async fn list(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut items: Vec<Ingredient> = self
            .ingredients
            .iter()
            .filter(|i| match name_prefix {
                Some(prefix) => i.name.to_lowercase().starts_with(&prefix.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        Ok(self.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        Ok(self
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }
}

// ── MockRecipeRepo ───────────────────────────────────────────────────────────

/// In-memory recipe store. Drafts are hydrated against the tag/ingredient
/// catalogs the mock was constructed with.
#[derive(Clone)]
pub struct MockRecipeRepo {
    pub recipes: Arc<Mutex<Vec<Recipe>>>,
    pub tag_catalog: Vec<Tag>,
    pub ingredient_catalog: Vec<Ingredient>,
}

impl MockRecipeRepo {
    pub fn new(tag_catalog: Vec<Tag>, ingredient_catalog: Vec<Ingredient>) -> Self {
        Self {
            recipes: Arc::new(Mutex::new(vec![])),
            tag_catalog,
            ingredient_catalog,
        }
    }

    pub fn recipes_handle(&self) -> Arc<Mutex<Vec<Recipe>>> {
        Arc::clone(&self.recipes)
    }

    fn hydrate(&self, id: i32, draft: &RecipeDraft) -> Recipe {
        let tags = self
            .tag_catalog
            .iter()
            .filter(|t| draft.tag_ids.contains(&t.id))
            .cloned()
            .collect();
        let ingredient_lines = draft
            .lines
            .iter()
            .filter_map(|line| {
                self.ingredient_catalog
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .map(|i| IngredientLine {
                        ingredient_id: i.id,
                        name: i.name.clone(),
                        measurement_unit: i.measurement_unit.clone(),
                        amount: line.amount,
                    })
            })
            .collect();
        Recipe {
            id,
            author_id: draft.author_id,
            name: draft.name.clone(),
            image: draft.image.clone(),
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            created_at: Utc::now(),
            tags,
            ingredient_lines,
        }
    }
}

impl RecipeRepository for MockRecipeRepo {
    async fn create(&self, draft: &RecipeDraft) -> Result<i32, RecipesServiceError> {
        let mut recipes = self.recipes.lock().unwrap();
        let id = recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let recipe = self.hydrate(id, draft);
        recipes.push(recipe);
        Ok(id)
    }

    async fn update(
        &self,
        recipe_id: i32,
        draft: &RecipeDraft,
    ) -> Result<(), RecipesServiceError> {
        let hydrated = self.hydrate(recipe_id, draft);
        let mut recipes = self.recipes.lock().unwrap();
        if let Some(existing) = recipes.iter_mut().find(|r| r.id == recipe_id) {
            // Author and created_at survive the full replace.
            let author_id = existing.author_id;
            let created_at = existing.created_at;
            *existing = Recipe {
                author_id,
                created_at,
                ..hydrated
            };
        }
        Ok(())
    }

    async fn delete(&self, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let mut recipes = self.recipes.lock().unwrap();
        let before = recipes.len();
        recipes.retain(|r| r.id != recipe_id);
        Ok(recipes.len() < before)
    }

    async fn find_by_id(&self, recipe_id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == recipe_id)
            .cloned())
    }

    async fn summary(
        &self,
        recipe_id: i32,
    ) -> Result<Option<RecipeSummary>, RecipesServiceError> {
        Ok(self.find_by_id(recipe_id).await?.map(|r| RecipeSummary {
            id: r.id,
            name: r.name,
            image: r.image,
            cooking_time: r.cooking_time,
        }))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut matched: Vec<Recipe> = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || r.tags.iter().any(|t| filter.tag_slugs.contains(&t.slug))
            })
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched
            .into_iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .collect())
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, RecipesServiceError> {
        let mut matched: Vec<Recipe> = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.author_id == author_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            matched.truncate(limit as usize);
        }
        Ok(matched
            .into_iter()
            .map(|r| RecipeSummary {
                id: r.id,
                name: r.name,
                image: r.image,
                cooking_time: r.cooking_time,
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.author_id == author_id)
            .count() as u64)
    }

    async fn ingredient_lines_for(
        &self,
        recipe_ids: &[i32],
    ) -> Result<Vec<CartLine>, RecipesServiceError> {
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| recipe_ids.contains(&r.id))
            .flat_map(|r| {
                r.ingredient_lines.iter().map(|line| CartLine {
                    name: line.name.clone(),
                    measurement_unit: line.measurement_unit.clone(),
                    amount: line.amount as i64,
                })
            })
            .collect())
    }
}

// ── MockFavoriteRepo / MockCartRepo ──────────────────────────────────────────

#[derive(Clone)]
pub struct MockFavoriteRepo {
    pub pairs: Arc<Mutex<HashSet<(Uuid, i32)>>>,
}

impl MockFavoriteRepo {
    pub fn empty() -> Self {
        Self {
            pairs: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl FavoriteRepository for MockFavoriteRepo {
    async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().insert((user_id, recipe_id)))
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().remove(&(user_id, recipe_id)))
    }

    async fn contains(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().contains(&(user_id, recipe_id)))
    }

    async fn filter_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        let pairs = self.pairs.lock().unwrap();
        Ok(recipe_ids
            .iter()
            .copied()
            .filter(|id| pairs.contains(&(user_id, *id)))
            .collect())
    }
}

#[derive(Clone)]
pub struct MockCartRepo {
    pub pairs: Arc<Mutex<HashSet<(Uuid, i32)>>>,
}

impl MockCartRepo {
    pub fn empty() -> Self {
        Self {
            pairs: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl CartRepository for MockCartRepo {
    async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().insert((user_id, recipe_id)))
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().remove(&(user_id, recipe_id)))
    }

    async fn contains(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().contains(&(user_id, recipe_id)))
    }

    async fn filter_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        let pairs = self.pairs.lock().unwrap();
        Ok(recipe_ids
            .iter()
            .copied()
            .filter(|id| pairs.contains(&(user_id, *id)))
            .collect())
    }

    async fn recipe_ids(&self, user_id: Uuid) -> Result<Vec<i32>, RecipesServiceError> {
        let mut ids: Vec<i32> = self
            .pairs
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, r)| *r)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

// ── MockFollowRepo ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockFollowRepo {
    pub pairs: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
}

impl MockFollowRepo {
    pub fn empty() -> Self {
        Self {
            pairs: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn with(pairs: Vec<(Uuid, Uuid)>) -> Self {
        Self {
            pairs: Arc::new(Mutex::new(pairs.into_iter().collect())),
        }
    }
}

impl FollowRepository for MockFollowRepo {
    async fn insert(&self, follower: Uuid, followed: Uuid) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().insert((follower, followed)))
    }

    async fn delete(&self, follower: Uuid, followed: Uuid) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().remove(&(follower, followed)))
    }

    async fn contains(
        &self,
        follower: Uuid,
        followed: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        Ok(self.pairs.lock().unwrap().contains(&(follower, followed)))
    }

    async fn followed_ids(
        &self,
        follower: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Uuid>, RecipesServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut ids: Vec<Uuid> = self
            .pairs
            .lock()
            .unwrap()
            .iter()
            .filter(|(f, _)| *f == follower)
            .map(|(_, t)| *t)
            .collect();
        ids.sort_unstable();
        Ok(ids
            .into_iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .collect())
    }

    async fn filter_followed(
        &self,
        follower: Uuid,
        candidates: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        let pairs = self.pairs.lock().unwrap();
        Ok(candidates
            .iter()
            .copied()
            .filter(|c| pairs.contains(&(follower, *c)))
            .collect())
    }
}

// ── MockImageStore ───────────────────────────────────────────────────────────

/// Pass-through image store; keeps the payload as the stored reference.
#[derive(Clone)]
pub struct MockImageStore;

impl ImageStorePort for MockImageStore {
    async fn store(&self, payload: &str) -> Result<String, RecipesServiceError> {
        Ok(payload.to_owned())
    }
}

// ── View assembler wiring ────────────────────────────────────────────────────

pub fn assembler(
    users: MockUserRepo,
    favorites: MockFavoriteRepo,
    cart: MockCartRepo,
    follows: MockFollowRepo,
) -> RecipeViewAssembler<MockUserRepo, MockFavoriteRepo, MockCartRepo, MockFollowRepo> {
    RecipeViewAssembler {
        users,
        favorites,
        cart,
        follows,
    }
}
