use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use ladle_core::identity::Identity;

use crate::domain::types::RecipeSummary;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::cart::{AddCartEntryUseCase, RemoveCartEntryUseCase};
use crate::usecase::favorite::{AddFavoriteUseCase, RemoveFavoriteUseCase};
use crate::usecase::shopping_list::BuildShoppingListUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        RecipeSummaryResponse {
            id: summary.id,
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

// ── POST /recipes/{id}/favorite ──────────────────────────────────────────────

pub async fn add_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let uc = AddFavoriteUseCase {
        favorites: state.favorite_repo(),
        recipes: state.recipe_repo(),
    };
    let summary = uc.execute(identity.user_id, id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

// ── DELETE /recipes/{id}/favorite ────────────────────────────────────────────

pub async fn remove_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = RemoveFavoriteUseCase {
        favorites: state.favorite_repo(),
        recipes: state.recipe_repo(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /recipes/{id}/shopping-cart ─────────────────────────────────────────

pub async fn add_cart_entry(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let uc = AddCartEntryUseCase {
        cart: state.cart_repo(),
        recipes: state.recipe_repo(),
    };
    let summary = uc.execute(identity.user_id, id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

// ── DELETE /recipes/{id}/shopping-cart ───────────────────────────────────────

pub async fn remove_cart_entry(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = RemoveCartEntryUseCase {
        cart: state.cart_repo(),
        recipes: state.recipe_repo(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /recipes/download-shopping-cart ──────────────────────────────────────

pub async fn download_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Response, RecipesServiceError> {
    let uc = BuildShoppingListUseCase {
        cart: state.cart_repo(),
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let document = uc.execute(identity.user_id).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.filename),
        ),
    ];
    Ok((headers, document.content).into_response())
}
