use std::path::PathBuf;

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use crate::domain::repository::ImageStorePort;
use crate::error::RecipesServiceError;

/// Image store backed by a directory on the local filesystem.
///
/// Data-URI payloads (`data:image/png;base64,...`) are decoded and written
/// under `media_dir/recipes/`, and the relative reference is returned. Any
/// other payload is treated as an existing reference and passed through, so a
/// full-replace update can resubmit the stored reference unchanged.
#[derive(Clone)]
pub struct LocalImageStore {
    pub media_dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
        }
    }
}

/// Split a data URI into (extension, base64 body).
fn parse_data_uri(payload: &str) -> Option<(&str, &str)> {
    let rest = payload.strip_prefix("data:image/")?;
    let (subtype, rest) = rest.split_once(";base64,")?;
    let extension = match subtype {
        "jpeg" => "jpg",
        other => other,
    };
    Some((extension, rest))
}

impl ImageStorePort for LocalImageStore {
    async fn store(&self, payload: &str) -> Result<String, RecipesServiceError> {
        let Some((extension, body)) = parse_data_uri(payload) else {
            return Ok(payload.to_owned());
        };
        let bytes = STANDARD.decode(body).map_err(|_| {
            RecipesServiceError::Validation(vec!["image: invalid base64 payload".to_owned()])
        })?;

        let reference = format!("recipes/{}.{extension}", Uuid::new_v4());
        let path = self.media_dir.join(&reference);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("create media directory")?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .context("write image file")?;
        Ok(reference)
    }
}
