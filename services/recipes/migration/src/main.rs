use sea_orm_migration::prelude::*;

use ladle_recipes_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
