use uuid::Uuid;

use ladle_recipes::domain::repository::{CartRepository, RecipeRepository};
use ladle_recipes::domain::types::{RecipeDraft, RecipeLineInput};
use ladle_recipes::error::RecipesServiceError;
use ladle_recipes::usecase::shopping_list::BuildShoppingListUseCase;

use crate::helpers::{
    MockCartRepo, MockIngredientRepo, MockRecipeRepo, MockTagRepo, MockUserRepo, test_ingredient,
    test_profile, test_tag,
};

fn recipe_repo() -> MockRecipeRepo {
    let tags = MockTagRepo::new(vec![test_tag(1, "breakfast")]);
    let ingredients = MockIngredientRepo::new(vec![
        test_ingredient(10, "Flour", "g"),
        test_ingredient(11, "Egg", "pc"),
    ]);
    MockRecipeRepo::new(tags.tags, ingredients.ingredients)
}

async fn seed_recipe(repo: &MockRecipeRepo, author: Uuid, lines: Vec<(i32, i32)>) -> i32 {
    repo.create(&RecipeDraft {
        author_id: author,
        name: "Recipe".to_owned(),
        image: "recipes/r.png".to_owned(),
        text: "Cook.".to_owned(),
        cooking_time: 10,
        tag_ids: vec![1],
        lines: lines
            .into_iter()
            .map(|(ingredient_id, amount)| RecipeLineInput {
                ingredient_id,
                amount,
            })
            .collect(),
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn should_aggregate_lines_across_carted_recipes() {
    let user = test_profile("shopper");
    let recipes = recipe_repo();
    let cart = MockCartRepo::empty();

    let pancakes = seed_recipe(&recipes, user.id, vec![(10, 200), (11, 2)]).await;
    let bread = seed_recipe(&recipes, user.id, vec![(10, 100)]).await;
    cart.insert(user.id, pancakes).await.unwrap();
    cart.insert(user.id, bread).await.unwrap();

    let uc = BuildShoppingListUseCase {
        cart,
        recipes,
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let document = uc.execute(user.id).await.unwrap();

    assert_eq!(document.filename, "shopper_shopping_list.txt");
    // Grouped by (name, unit), summed, sorted by name.
    assert_eq!(document.content, "- Egg (pc) - 2\n- Flour (g) - 300");
}

#[tokio::test]
async fn should_reject_empty_cart() {
    let user = test_profile("shopper");

    let uc = BuildShoppingListUseCase {
        cart: MockCartRepo::empty(),
        recipes: recipe_repo(),
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let result = uc.execute(user.id).await;
    assert!(matches!(result, Err(RecipesServiceError::EmptyCart)));
}

#[tokio::test]
async fn should_only_include_own_cart() {
    let shopper = test_profile("shopper");
    let other = test_profile("other");
    let recipes = recipe_repo();
    let cart = MockCartRepo::empty();

    let own = seed_recipe(&recipes, shopper.id, vec![(10, 100)]).await;
    let foreign = seed_recipe(&recipes, other.id, vec![(11, 4)]).await;
    cart.insert(shopper.id, own).await.unwrap();
    cart.insert(other.id, foreign).await.unwrap();

    let uc = BuildShoppingListUseCase {
        cart,
        recipes,
        users: MockUserRepo::new(vec![shopper.clone(), other]),
    };
    let document = uc.execute(shopper.id).await.unwrap();
    assert_eq!(document.content, "- Flour (g) - 100");
}
