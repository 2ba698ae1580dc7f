pub mod ingredient;
pub mod interaction;
pub mod recipe;
pub mod tag;
pub mod user;
