use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ladle_core::identity::{Identity, MaybeIdentity};
use ladle_domain::pagination::PageRequest;

use crate::domain::types::UserProfile;
use crate::error::RecipesServiceError;
use crate::handlers::interaction::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::follow::{
    FollowUserUseCase, FollowedAuthorView, ListFollowingUseCase, UnfollowUserUseCase,
};
use crate::usecase::profile::GetProfileUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl UserResponse {
    pub fn from_profile(profile: UserProfile, is_subscribed: bool) -> Self {
        UserResponse {
            id: profile.id,
            email: profile.email,
            username: profile.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
            is_subscribed,
        }
    }
}

#[derive(Serialize)]
pub struct FollowedAuthorResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl From<FollowedAuthorView> for FollowedAuthorResponse {
    fn from(view: FollowedAuthorView) -> Self {
        FollowedAuthorResponse {
            // Rows in this listing are followed by construction.
            user: UserResponse::from_profile(view.profile, true),
            recipes: view
                .recipes
                .into_iter()
                .map(RecipeSummaryResponse::from)
                .collect(),
            recipes_count: view.recipes_count,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SubscriptionQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    /// Cap on embedded recipes per author. Uncapped when absent.
    pub recipes_limit: Option<u64>,
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    MaybeIdentity(requester): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let uc = GetProfileUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    let view = uc.execute(requester, id).await?;
    Ok(Json(UserResponse::from_profile(
        view.profile,
        view.is_subscribed,
    )))
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

pub async fn get_subscriptions(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<Json<Vec<FollowedAuthorResponse>>, RecipesServiceError> {
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let uc = ListFollowingUseCase {
        follows: state.follow_repo(),
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let views = uc
        .execute(identity.user_id, query.recipes_limit, page)
        .await?;
    Ok(Json(
        views.into_iter().map(FollowedAuthorResponse::from).collect(),
    ))
}

// ── POST /users/{id}/subscribe ───────────────────────────────────────────────

pub async fn subscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<(StatusCode, Json<FollowedAuthorResponse>), RecipesServiceError> {
    let uc = FollowUserUseCase {
        follows: state.follow_repo(),
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let view = uc
        .execute(identity.user_id, id, query.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── DELETE /users/{id}/subscribe ─────────────────────────────────────────────

pub async fn unsubscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = UnfollowUserUseCase {
        follows: state.follow_repo(),
        users: state.user_repo(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
