use std::collections::HashSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set}, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, OnConflict, Query, extension::postgres::PgExpr},
};
use uuid::Uuid;

use ladle_domain::pagination::PageRequest;
use ladle_recipes_schema::{
    cart_entries, favorites, follows, ingredients, recipe_ingredients, recipe_tags, recipes, tags,
    users,
};

use crate::domain::repository::{
    CartRepository, FavoriteRepository, FollowRepository, IngredientRepository, RecipeRepository,
    TagRepository, UserRepository,
};
use crate::domain::types::{
    CartLine, Ingredient, IngredientLine, Recipe, RecipeDraft, RecipeFilter, RecipeSummary, Tag,
    UserProfile,
};
use crate::error::RecipesServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserProfile>, RecipesServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(profile_from_model).collect())
    }
}

fn profile_from_model(model: users::Model) -> UserProfile {
    UserProfile {
        id: model.id,
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

/// Escape LIKE metacharacters so a user-supplied prefix matches literally.
fn escape_like(prefix: &str) -> String {
    prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            // Case-insensitive starts-with.
            query = query.filter(
                Expr::col((ingredients::Entity, ingredients::Column::Name))
                    .ilike(format!("{}%", escape_like(prefix))),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl DbRecipeRepository {
    async fn load_tags(&self, recipe_id: i32) -> Result<Vec<Tag>, RecipesServiceError> {
        let rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
            .find_also_related(tags::Entity)
            .all(&self.db)
            .await
            .context("load recipe tags")?;
        let mut result: Vec<Tag> = rows
            .into_iter()
            .filter_map(|(_, tag)| tag.map(tag_from_model))
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn load_lines(&self, recipe_id: i32) -> Result<Vec<IngredientLine>, RecipesServiceError> {
        let rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .order_by_asc(recipe_ingredients::Column::IngredientId)
            .find_also_related(ingredients::Entity)
            .all(&self.db)
            .await
            .context("load recipe ingredient lines")?;
        Ok(rows
            .into_iter()
            .filter_map(|(line, ingredient)| {
                ingredient.map(|i| IngredientLine {
                    ingredient_id: i.id,
                    name: i.name,
                    measurement_unit: i.measurement_unit,
                    amount: line.amount,
                })
            })
            .collect())
    }

    async fn hydrate(&self, model: recipes::Model) -> Result<Recipe, RecipesServiceError> {
        let tags = self.load_tags(model.id).await?;
        let ingredient_lines = self.load_lines(model.id).await?;
        Ok(Recipe {
            id: model.id,
            author_id: model.author_id,
            name: model.name,
            image: model.image,
            text: model.text,
            cooking_time: model.cooking_time,
            created_at: model.created_at,
            tags,
            ingredient_lines,
        })
    }
}

/// Insert tag associations and ingredient lines for a recipe inside `txn`.
async fn insert_associations(
    txn: &sea_orm::DatabaseTransaction,
    recipe_id: i32,
    draft: &RecipeDraft,
) -> Result<(), sea_orm::DbErr> {
    for tag_id in &draft.tag_ids {
        recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(*tag_id),
        }
        .insert(txn)
        .await?;
    }
    for line in &draft.lines {
        recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(line.ingredient_id),
            amount: Set(line.amount),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

impl RecipeRepository for DbRecipeRepository {
    async fn create(&self, draft: &RecipeDraft) -> Result<i32, RecipesServiceError> {
        let draft = draft.clone();
        let recipe_id = self
            .db
            .transaction::<_, i32, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        id: NotSet,
                        author_id: Set(draft.author_id),
                        name: Set(draft.name.clone()),
                        image: Set(draft.image.clone()),
                        text: Set(draft.text.clone()),
                        cooking_time: Set(draft.cooking_time),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    insert_associations(txn, model.id, &draft).await?;
                    Ok(model.id)
                })
            })
            .await
            .context("create recipe aggregate")?;
        Ok(recipe_id)
    }

    async fn update(
        &self,
        recipe_id: i32,
        draft: &RecipeDraft,
    ) -> Result<(), RecipesServiceError> {
        let draft = draft.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    recipes::ActiveModel {
                        id: Set(recipe_id),
                        author_id: NotSet,
                        name: Set(draft.name.clone()),
                        image: Set(draft.image.clone()),
                        text: Set(draft.text.clone()),
                        cooking_time: Set(draft.cooking_time),
                        created_at: NotSet,
                    }
                    .update(txn)
                    .await?;

                    // Full replace: clear both collections, then re-insert.
                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
                        .exec(txn)
                        .await?;
                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
                        .exec(txn)
                        .await?;
                    insert_associations(txn, recipe_id, &draft).await?;
                    Ok(())
                })
            })
            .await
            .context("update recipe aggregate")?;
        Ok(())
    }

    async fn delete(&self, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = recipes::Entity::delete_by_id(recipe_id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_id(&self, recipe_id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(recipe_id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        match model {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn summary(
        &self,
        recipe_id: i32,
    ) -> Result<Option<RecipeSummary>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(recipe_id)
            .one(&self.db)
            .await
            .context("find recipe summary")?;
        Ok(model.map(summary_from_model))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = recipes::Entity::find();

        if !filter.tag_slugs.is_empty() {
            let tag_ids = Query::select()
                .column(tags::Column::Id)
                .from(tags::Entity)
                .and_where(Expr::col(tags::Column::Slug).is_in(filter.tag_slugs.clone()))
                .to_owned();
            let tagged_recipe_ids = Query::select()
                .column(recipe_tags::Column::RecipeId)
                .from(recipe_tags::Entity)
                .and_where(Expr::col(recipe_tags::Column::TagId).in_subquery(tag_ids))
                .to_owned();
            query = query.filter(recipes::Column::Id.in_subquery(tagged_recipe_ids));
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if let Some(user_id) = filter.favorited_by {
            let favorited_ids = Query::select()
                .column(favorites::Column::RecipeId)
                .from(favorites::Entity)
                .and_where(Expr::col(favorites::Column::UserId).eq(user_id))
                .to_owned();
            query = query.filter(recipes::Column::Id.in_subquery(favorited_ids));
        }
        if let Some(user_id) = filter.in_cart_of {
            let carted_ids = Query::select()
                .column(cart_entries::Column::RecipeId)
                .from(cart_entries::Entity)
                .and_where(Expr::col(cart_entries::Column::UserId).eq(user_id))
                .to_owned();
            query = query.filter(recipes::Column::Id.in_subquery(carted_ids));
        }

        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list recipes")?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            result.push(self.hydrate(model).await?);
        }
        Ok(result)
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, RecipesServiceError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::CreatedAt);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query.all(&self.db).await.context("list recipes by author")?;
        Ok(models.into_iter().map(summary_from_model).collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }

    async fn ingredient_lines_for(
        &self,
        recipe_ids: &[i32],
    ) -> Result<Vec<CartLine>, RecipesServiceError> {
        let rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .find_also_related(ingredients::Entity)
            .all(&self.db)
            .await
            .context("load cart ingredient lines")?;
        Ok(rows
            .into_iter()
            .filter_map(|(line, ingredient)| {
                ingredient.map(|i| CartLine {
                    name: i.name,
                    measurement_unit: i.measurement_unit,
                    amount: line.amount as i64,
                })
            })
            .collect())
    }
}

fn summary_from_model(model: recipes::Model) -> RecipeSummary {
    RecipeSummary {
        id: model.id,
        name: model.name,
        image: model.image,
        cooking_time: model.cooking_time,
    }
}

// ── Favorite repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl FavoriteRepository for DbFavoriteRepository {
    async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        // Uniqueness is enforced by the composite PK; a concurrent duplicate
        // add resolves to zero affected rows, not an error.
        let rows = favorites::Entity::insert(favorites::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert favorite")?;
        Ok(rows > 0)
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await
            .context("delete favorite")?;
        Ok(result.rows_affected > 0)
    }

    async fn contains(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let model = favorites::Entity::find_by_id((user_id, recipe_id))
            .one(&self.db)
            .await
            .context("find favorite")?;
        Ok(model.is_some())
    }

    async fn filter_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        let models = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("filter favorited recipe ids")?;
        Ok(models.into_iter().map(|m| m.recipe_id).collect())
    }
}

// ── Cart repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCartRepository {
    pub db: DatabaseConnection,
}

impl CartRepository for DbCartRepository {
    async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let rows = cart_entries::Entity::insert(cart_entries::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
        })
        .on_conflict(
            OnConflict::columns([cart_entries::Column::UserId, cart_entries::Column::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert cart entry")?;
        Ok(rows > 0)
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = cart_entries::Entity::delete_many()
            .filter(cart_entries::Column::UserId.eq(user_id))
            .filter(cart_entries::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await
            .context("delete cart entry")?;
        Ok(result.rows_affected > 0)
    }

    async fn contains(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let model = cart_entries::Entity::find_by_id((user_id, recipe_id))
            .one(&self.db)
            .await
            .context("find cart entry")?;
        Ok(model.is_some())
    }

    async fn filter_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        let models = cart_entries::Entity::find()
            .filter(cart_entries::Column::UserId.eq(user_id))
            .filter(cart_entries::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("filter carted recipe ids")?;
        Ok(models.into_iter().map(|m| m.recipe_id).collect())
    }

    async fn recipe_ids(&self, user_id: Uuid) -> Result<Vec<i32>, RecipesServiceError> {
        let models = cart_entries::Entity::find()
            .filter(cart_entries::Column::UserId.eq(user_id))
            .order_by_asc(cart_entries::Column::RecipeId)
            .all(&self.db)
            .await
            .context("list cart recipe ids")?;
        Ok(models.into_iter().map(|m| m.recipe_id).collect())
    }
}

// ── Follow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn insert(&self, follower: Uuid, followed: Uuid) -> Result<bool, RecipesServiceError> {
        let rows = follows::Entity::insert(follows::ActiveModel {
            follower_id: Set(follower),
            followed_id: Set(followed),
        })
        .on_conflict(
            OnConflict::columns([follows::Column::FollowerId, follows::Column::FollowedId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert follow")?;
        Ok(rows > 0)
    }

    async fn delete(&self, follower: Uuid, followed: Uuid) -> Result<bool, RecipesServiceError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::FollowerId.eq(follower))
            .filter(follows::Column::FollowedId.eq(followed))
            .exec(&self.db)
            .await
            .context("delete follow")?;
        Ok(result.rows_affected > 0)
    }

    async fn contains(
        &self,
        follower: Uuid,
        followed: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let model = follows::Entity::find_by_id((follower, followed))
            .one(&self.db)
            .await
            .context("find follow")?;
        Ok(model.is_some())
    }

    async fn followed_ids(
        &self,
        follower: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Uuid>, RecipesServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower))
            .order_by_asc(follows::Column::FollowedId)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list followed ids")?;
        Ok(models.into_iter().map(|m| m.followed_id).collect())
    }

    async fn filter_followed(
        &self,
        follower: Uuid,
        candidates: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        let models = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower))
            .filter(follows::Column::FollowedId.is_in(candidates.iter().copied()))
            .all(&self.db)
            .await
            .context("filter followed ids")?;
        Ok(models.into_iter().map(|m| m.followed_id).collect())
    }
}
