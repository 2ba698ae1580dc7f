use std::collections::BTreeMap;

use uuid::Uuid;

use crate::domain::repository::{CartRepository, RecipeRepository, UserRepository};
use crate::domain::types::CartLine;
use crate::error::RecipesServiceError;

/// Rendered shopping list, ready to be attached as a downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListDocument {
    pub filename: String,
    pub content: String,
}

/// Collapse raw cart lines into one line per (name, unit) group, summing
/// amounts. Output is sorted by ingredient name ascending so rendering is
/// deterministic.
pub fn aggregate_cart_lines(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut groups: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *groups
            .entry((line.name, line.measurement_unit))
            .or_default() += line.amount;
    }
    groups
        .into_iter()
        .map(|((name, measurement_unit), amount)| CartLine {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

/// Render aggregated lines as the plain-text document body.
pub fn render_shopping_list(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|line| format!("- {} ({}) - {}", line.name, line.measurement_unit, line.amount))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── BuildShoppingList ────────────────────────────────────────────────────────

pub struct BuildShoppingListUseCase<C, R, U>
where
    C: CartRepository,
    R: RecipeRepository,
    U: UserRepository,
{
    pub cart: C,
    pub recipes: R,
    pub users: U,
}

impl<C, R, U> BuildShoppingListUseCase<C, R, U>
where
    C: CartRepository,
    R: RecipeRepository,
    U: UserRepository,
{
    /// Pure aggregation over the user's cart; the only side effect is reading
    /// the storage layer.
    pub async fn execute(&self, user_id: Uuid) -> Result<ShoppingListDocument, RecipesServiceError> {
        let recipe_ids = self.cart.recipe_ids(user_id).await?;
        if recipe_ids.is_empty() {
            return Err(RecipesServiceError::EmptyCart);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;

        let lines = self.recipes.ingredient_lines_for(&recipe_ids).await?;
        let aggregated = aggregate_cart_lines(lines);
        Ok(ShoppingListDocument {
            filename: format!("{}_shopping_list.txt", user.username),
            content: render_shopping_list(&aggregated),
        })
    }
}
