use serde::{Deserialize, Serialize};

pub const DEFAULT_ASSETS_BINDING: &str = "ASSETS";
pub const DEFAULT_UPLOAD_FIELD: &str = "file";
pub const STATIC_PREFIX: &str = "/static/";
pub const INDEX_ASSET_PATH: &str = "/index.html";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
