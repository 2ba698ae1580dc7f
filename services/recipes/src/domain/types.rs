use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Reference tag (name, hex color, slug). Immutable catalog data.
#[derive(Debug, Clone)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Reference ingredient with its measurement unit.
#[derive(Debug, Clone)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Hydrated ingredient line of a recipe.
#[derive(Debug, Clone)]
pub struct IngredientLine {
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Fully hydrated recipe aggregate: the row plus its tag set and lines.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredient_lines: Vec<IngredientLine>,
}

/// Short recipe view returned by the favorite/cart toggles and embedded in
/// follow listings.
#[derive(Debug, Clone)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// User profile fields rendered in responses.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// One ingredient line in the write request.
#[derive(Debug, Clone, Copy)]
pub struct RecipeLineInput {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Complete recipe state for a create or full-replace update.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i32>,
    pub lines: Vec<RecipeLineInput>,
}

/// Predicate set for recipe listings. Filters compose with AND; the
/// favorited/cart members are already resolved against the requester
/// (None when the filter is absent or the requester is anonymous).
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub tag_slugs: Vec<String>,
    pub author_id: Option<Uuid>,
    pub favorited_by: Option<Uuid>,
    pub in_cart_of: Option<Uuid>,
}

/// Recipe read view: the aggregate plus requester-relative flags and the
/// author profile.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: UserProfile,
    pub author_is_subscribed: bool,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Raw (unaggregated) ingredient line pulled from carted recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Validate the collection fields and scalar bounds of a recipe write.
///
/// Returns every violation at once so the caller can surface the full
/// field-level message list.
pub fn validate_recipe_input(
    tag_ids: &[i32],
    lines: &[RecipeLineInput],
    cooking_time: i32,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if tag_ids.is_empty() {
        errors.push("tags: at least one tag is required".to_owned());
    }
    let mut seen_tags = std::collections::HashSet::new();
    if !tag_ids.iter().all(|id| seen_tags.insert(*id)) {
        errors.push("tags: tags must not repeat".to_owned());
    }

    if lines.is_empty() {
        errors.push("ingredients: at least one ingredient is required".to_owned());
    }
    let mut seen_ingredients = std::collections::HashSet::new();
    if !lines
        .iter()
        .all(|line| seen_ingredients.insert(line.ingredient_id))
    {
        errors.push("ingredients: duplicate ingredients are not allowed".to_owned());
    }
    if lines.iter().any(|line| line.amount < 1) {
        errors.push("ingredients: amount must be at least 1".to_owned());
    }

    if cooking_time < 1 {
        errors.push("cooking_time: must be at least 1".to_owned());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
