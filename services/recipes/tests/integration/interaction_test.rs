use uuid::Uuid;

use ladle_recipes::domain::types::{RecipeDraft, RecipeLineInput};
use ladle_recipes::error::RecipesServiceError;
use ladle_recipes::usecase::cart::{AddCartEntryUseCase, RemoveCartEntryUseCase};
use ladle_recipes::usecase::favorite::{AddFavoriteUseCase, RemoveFavoriteUseCase};

use crate::helpers::{
    MockCartRepo, MockFavoriteRepo, MockIngredientRepo, MockRecipeRepo, MockTagRepo,
    test_ingredient, test_tag,
};

async fn seeded_repo(author: Uuid) -> (MockRecipeRepo, i32) {
    use ladle_recipes::domain::repository::RecipeRepository;

    let tags = MockTagRepo::new(vec![test_tag(1, "breakfast")]);
    let ingredients = MockIngredientRepo::new(vec![test_ingredient(10, "Flour", "g")]);
    let repo = MockRecipeRepo::new(tags.tags, ingredients.ingredients);
    let id = repo
        .create(&RecipeDraft {
            author_id: author,
            name: "Pancakes".to_owned(),
            image: "recipes/pancakes.png".to_owned(),
            text: "Mix and fry.".to_owned(),
            cooking_time: 20,
            tag_ids: vec![1],
            lines: vec![RecipeLineInput {
                ingredient_id: 10,
                amount: 200,
            }],
        })
        .await
        .unwrap();
    (repo, id)
}

#[tokio::test]
async fn should_round_trip_favorite() {
    let user = Uuid::new_v4();
    let (repo, recipe_id) = seeded_repo(Uuid::new_v4()).await;
    let favorites = MockFavoriteRepo::empty();

    let add = AddFavoriteUseCase {
        favorites: favorites.clone(),
        recipes: repo.clone(),
    };
    let summary = add.execute(user, recipe_id).await.unwrap();
    assert_eq!(summary.id, recipe_id);
    assert_eq!(summary.name, "Pancakes");

    let remove = RemoveFavoriteUseCase {
        favorites: favorites.clone(),
        recipes: repo,
    };
    remove.execute(user, recipe_id).await.unwrap();
    assert!(favorites.pairs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_double_favorite() {
    let user = Uuid::new_v4();
    let (repo, recipe_id) = seeded_repo(Uuid::new_v4()).await;
    let favorites = MockFavoriteRepo::empty();

    let add = AddFavoriteUseCase {
        favorites,
        recipes: repo,
    };
    add.execute(user, recipe_id).await.unwrap();
    let result = add.execute(user, recipe_id).await;
    assert!(matches!(result, Err(RecipesServiceError::AlreadyFavorited)));
}

#[tokio::test]
async fn should_reject_removing_absent_favorite() {
    let user = Uuid::new_v4();
    let (repo, recipe_id) = seeded_repo(Uuid::new_v4()).await;

    let remove = RemoveFavoriteUseCase {
        favorites: MockFavoriteRepo::empty(),
        recipes: repo,
    };
    let result = remove.execute(user, recipe_id).await;
    assert!(matches!(result, Err(RecipesServiceError::FavoriteNotFound)));
}

#[tokio::test]
async fn should_reject_favoriting_missing_recipe() {
    let (repo, _) = seeded_repo(Uuid::new_v4()).await;

    let add = AddFavoriteUseCase {
        favorites: MockFavoriteRepo::empty(),
        recipes: repo,
    };
    let result = add.execute(Uuid::new_v4(), 404).await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_reject_double_cart_add() {
    let user = Uuid::new_v4();
    let (repo, recipe_id) = seeded_repo(Uuid::new_v4()).await;

    let add = AddCartEntryUseCase {
        cart: MockCartRepo::empty(),
        recipes: repo,
    };
    add.execute(user, recipe_id).await.unwrap();
    let result = add.execute(user, recipe_id).await;
    assert!(matches!(result, Err(RecipesServiceError::AlreadyInCart)));
}

#[tokio::test]
async fn should_reject_removing_absent_cart_entry() {
    let user = Uuid::new_v4();
    let (repo, recipe_id) = seeded_repo(Uuid::new_v4()).await;

    let remove = RemoveCartEntryUseCase {
        cart: MockCartRepo::empty(),
        recipes: repo,
    };
    let result = remove.execute(user, recipe_id).await;
    assert!(matches!(
        result,
        Err(RecipesServiceError::CartEntryNotFound)
    ));
}
