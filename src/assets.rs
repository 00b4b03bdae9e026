use worker::{Env, Response, Result};

use crate::models::INDEX_ASSET_PATH;

pub const FALLBACK_LANDING_HTML: &str =
    "<h1>PDF Table Extractor</h1><p>Frontend asset missing.</p>";

/// Outcome of looking up a file in the static-assets binding.
pub enum AssetStatus {
    Present(Response),
    Missing,
}

/// Assets bindings route on path only; the host is a placeholder.
pub fn asset_url(path: &str) -> String {
    let path = path.trim_start_matches('/');
    format!("https://assets.local/{path}")
}

pub async fn fetch_asset(env: &Env, binding: &str, path: &str) -> AssetStatus {
    let fetcher = match env.assets(binding) {
        Ok(fetcher) => fetcher,
        Err(error) => {
            worker::console_error!("assets binding '{binding}' unavailable: {error}");
            return AssetStatus::Missing;
        }
    };

    match fetcher.fetch(asset_url(path), None).await {
        Ok(response) if response.status_code() < 400 => AssetStatus::Present(response),
        Ok(_) => AssetStatus::Missing,
        Err(error) => {
            worker::console_error!("failed to fetch asset '{path}': {error}");
            AssetStatus::Missing
        }
    }
}

/// Serves the front-end entry point, or a 500 placeholder when the bundle is missing.
pub async fn landing_page(env: &Env, binding: &str) -> Result<Response> {
    match fetch_asset(env, binding, INDEX_ASSET_PATH).await {
        AssetStatus::Present(response) => Ok(response),
        AssetStatus::Missing => Ok(Response::from_html(FALLBACK_LANDING_HTML)?.with_status(500)),
    }
}
