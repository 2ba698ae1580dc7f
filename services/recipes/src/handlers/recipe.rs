use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ladle_core::identity::{Identity, MaybeIdentity};
use ladle_domain::pagination::PageRequest;

use crate::domain::types::{RecipeLineInput, RecipeView};
use crate::error::RecipesServiceError;
use crate::handlers::tag::TagResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    RecipeListQueryInput, RecipeViewAssembler, RecipeWriteInput, UpdateRecipeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecipeLineResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeLineResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        RecipeResponse {
            id: view.recipe.id,
            tags: view.recipe.tags.into_iter().map(TagResponse::from).collect(),
            author: UserResponse::from_profile(view.author, view.author_is_subscribed),
            ingredients: view
                .recipe
                .ingredient_lines
                .into_iter()
                .map(|line| RecipeLineResponse {
                    id: line.ingredient_id,
                    name: line.name,
                    measurement_unit: line.measurement_unit,
                    amount: line.amount,
                })
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: view.recipe.name,
            image: view.recipe.image,
            text: view.recipe.text,
            cooking_time: view.recipe.cooking_time,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecipeLineRequest {
    pub id: i32,
    pub amount: i32,
}

/// Complete payload for create and full-replace update. All fields are
/// required; there is no partial update.
#[derive(Deserialize)]
pub struct WriteRecipeRequest {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<i32>,
    pub ingredients: Vec<RecipeLineRequest>,
}

impl From<WriteRecipeRequest> for RecipeWriteInput {
    fn from(body: WriteRecipeRequest) -> Self {
        RecipeWriteInput {
            name: body.name,
            image: body.image,
            text: body.text,
            cooking_time: body.cooking_time,
            tag_ids: body.tags,
            ingredients: body
                .ingredients
                .into_iter()
                .map(|line| RecipeLineInput {
                    ingredient_id: line.id,
                    amount: line.amount,
                })
                .collect(),
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RecipeListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    /// Tag slugs, any-of. Query form: `tags[]=breakfast&tags[]=vegan`.
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<Uuid>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

/// Interpret a truthy query flag. Accepts `1`/`true`; everything else is
/// treated as false rather than rejected.
fn parse_flag(value: Option<&str>) -> Option<bool> {
    value.map(|v| v == "1" || v == "true")
}

fn view_assembler(
    state: &AppState,
) -> RecipeViewAssembler<
    crate::infra::db::DbUserRepository,
    crate::infra::db::DbFavoriteRepository,
    crate::infra::db::DbCartRepository,
    crate::infra::db::DbFollowRepository,
> {
    RecipeViewAssembler {
        users: state.user_repo(),
        favorites: state.favorite_repo(),
        cart: state.cart_repo(),
        follows: state.follow_repo(),
    }
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn get_recipes(
    MaybeIdentity(requester): MaybeIdentity,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let query: RecipeListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| {
            RecipesServiceError::Validation(vec!["query: malformed query string".to_owned()])
        })?
        .unwrap_or_default();

    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let input = RecipeListQueryInput {
        tag_slugs: query.tags,
        author_id: query.author,
        is_favorited: parse_flag(query.is_favorited.as_deref()),
        is_in_shopping_cart: parse_flag(query.is_in_shopping_cart.as_deref()),
    };

    let uc = ListRecipesUseCase {
        repo: state.recipe_repo(),
        views: view_assembler(&state),
    };
    let views = uc.execute(requester, input, page).await?;
    Ok(Json(views.into_iter().map(RecipeResponse::from).collect()))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    MaybeIdentity(requester): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let uc = GetRecipeUseCase {
        repo: state.recipe_repo(),
        views: view_assembler(&state),
    };
    let view = uc.execute(requester, id).await?;
    Ok(Json(view.into()))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<WriteRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let uc = CreateRecipeUseCase {
        repo: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.image_store(),
        views: view_assembler(&state),
    };
    let view = uc.execute(identity.user_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<WriteRecipeRequest>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let uc = UpdateRecipeUseCase {
        repo: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.image_store(),
        views: view_assembler(&state),
    };
    let view = uc.execute(identity.user_id, id, body.into()).await?;
    Ok(Json(view.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = DeleteRecipeUseCase {
        repo: state.recipe_repo(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
