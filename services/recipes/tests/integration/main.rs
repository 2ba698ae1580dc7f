mod helpers;

mod interaction_test;
mod shopping_list_test;
