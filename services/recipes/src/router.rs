use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use ladle_core::health::{healthz, readyz};
use ladle_core::middleware::request_id_layer;

use crate::handlers::{
    ingredient::{get_ingredient, get_ingredients},
    interaction::{
        add_cart_entry, add_favorite, download_shopping_cart, remove_cart_entry, remove_favorite,
    },
    recipe::{create_recipe, delete_recipe, get_recipe, get_recipes, update_recipe},
    tag::{get_tag, get_tags},
    user::{get_subscriptions, get_user, subscribe, unsubscribe},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Catalog
        .route("/tags", get(get_tags))
        .route("/tags/{id}", get(get_tag))
        .route("/ingredients", get(get_ingredients))
        .route("/ingredients/{id}", get(get_ingredient))
        // Recipes
        .route("/recipes", get(get_recipes))
        .route("/recipes", post(create_recipe))
        .route("/recipes/download-shopping-cart", get(download_shopping_cart))
        .route("/recipes/{id}", get(get_recipe))
        .route("/recipes/{id}", patch(update_recipe))
        .route("/recipes/{id}", delete(delete_recipe))
        // Favorites / cart
        .route("/recipes/{id}/favorite", post(add_favorite))
        .route("/recipes/{id}/favorite", delete(remove_favorite))
        .route("/recipes/{id}/shopping-cart", post(add_cart_entry))
        .route("/recipes/{id}/shopping-cart", delete(remove_cart_entry))
        // Users / follows
        .route("/users/subscriptions", get(get_subscriptions))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/subscribe", post(subscribe))
        .route("/users/{id}/subscribe", delete(unsubscribe))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
