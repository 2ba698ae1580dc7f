/// Recipes service configuration loaded from environment variables.
#[derive(Debug)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `RECIPES_PORT`.
    pub recipes_port: u16,
    /// Root directory for stored recipe images (default "media").
    /// Env var: `MEDIA_DIR`.
    pub media_dir: String,
}

impl RecipesConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            recipes_port: std::env::var("RECIPES_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            media_dir: std::env::var("MEDIA_DIR").unwrap_or_else(|_| "media".to_owned()),
        }
    }
}
