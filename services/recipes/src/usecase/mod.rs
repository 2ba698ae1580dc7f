pub mod catalog;
pub mod cart;
pub mod favorite;
pub mod follow;
pub mod profile;
pub mod recipe;
pub mod shopping_list;
