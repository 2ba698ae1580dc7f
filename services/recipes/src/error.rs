use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("recipe is not in favorites")]
    FavoriteNotFound,
    #[error("recipe is not in shopping cart")]
    CartEntryNotFound,
    #[error("subscription not found")]
    FollowNotFound,
    #[error("recipe is already in favorites")]
    AlreadyFavorited,
    #[error("recipe is already in shopping cart")]
    AlreadyInCart,
    #[error("forbidden")]
    Forbidden,
    #[error("shopping cart is empty")]
    EmptyCart,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::FavoriteNotFound => "FAVORITE_NOT_FOUND",
            Self::CartEntryNotFound => "CART_ENTRY_NOT_FOUND",
            Self::FollowNotFound => "FOLLOW_NOT_FOUND",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::AlreadyInCart => "ALREADY_IN_CART",
            Self::Forbidden => "FORBIDDEN",
            Self::EmptyCart => "EMPTY_CART",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::EmptyCart => StatusCode::BAD_REQUEST,
            Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::UserNotFound
            | Self::FavoriteNotFound
            | Self::CartEntryNotFound
            | Self::FollowNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyFavorited | Self::AlreadyInCart => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = match &self {
            Self::Validation(errors) => serde_json::json!({
                "kind": self.kind(),
                "message": self.to_string(),
                "errors": errors,
            }),
            _ => serde_json::json!({
                "kind": self.kind(),
                "message": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
