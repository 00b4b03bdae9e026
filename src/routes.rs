use pdf_table_extract::{ExtractionReport, Upload, extract_document};
use serde::Serialize;
use worker::{Context, Env, FormEntry, Method, Request, Response, Result, RouteContext, Router};

use crate::assets::{self, AssetStatus};
use crate::config::WorkerConfig;
use crate::error::ApiError;
use crate::models::STATIC_PREFIX;

pub async fn handle(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let config = match WorkerConfig::from_env(&env) {
        Ok(config) => config,
        Err(error) => return error.into_response(),
    };

    if req.method() == Method::Get && req.path().starts_with(STATIC_PREFIX) {
        return static_asset(&req, &env, &config).await;
    }

    Router::with_data(config)
        .get_async("/", landing_route)
        .get_async("/index.html", landing_route)
        .post_async("/api/extract", extract_route)
        .run(req, env)
        .await
}

async fn landing_route(_req: Request, ctx: RouteContext<WorkerConfig>) -> Result<Response> {
    assets::landing_page(&ctx.env, &ctx.data.assets_binding).await
}

async fn static_asset(req: &Request, env: &Env, config: &WorkerConfig) -> Result<Response> {
    let path = req.path();
    let asset_path = path.strip_prefix(STATIC_PREFIX).unwrap_or(&path);
    match assets::fetch_asset(env, &config.assets_binding, asset_path).await {
        AssetStatus::Present(response) => Ok(response),
        AssetStatus::Missing => {
            ApiError::NotFound(format!("static asset '{path}' not found")).into_response()
        }
    }
}

async fn extract_route(mut req: Request, ctx: RouteContext<WorkerConfig>) -> Result<Response> {
    match extract_response(&mut req, &ctx.data).await {
        Ok(report) => json_response(&report),
        Err(error) => error.into_response(),
    }
}

async fn extract_response(
    req: &mut Request,
    config: &WorkerConfig,
) -> Result<ExtractionReport, ApiError> {
    let form = req
        .form_data()
        .await
        .map_err(|error| ApiError::Validation(format!("expected a multipart upload: {error}")))?;
    let Some(FormEntry::File(file)) = form.get(&config.upload_field) else {
        return Err(ApiError::Validation(format!(
            "missing file field '{}'",
            config.upload_field
        )));
    };

    let media_type = file.type_();
    let file_name = file.name();
    let bytes = file.bytes().await?;

    let upload = Upload {
        bytes: &bytes,
        media_type: &media_type,
        file_name: Some(file_name.as_str()).filter(|name| !name.is_empty()),
    };
    let report = extract_document(&config.engine, upload).inspect_err(|error| {
        worker::console_error!("extraction rejected for '{file_name}': {error}");
    })?;

    worker::console_log!(
        "extraction completed: file={file_name}, pages={}, tables={}, type={}",
        report.page_count,
        report.table_count,
        report.document_type
    );

    Ok(report)
}

fn json_response<T>(payload: &T) -> Result<Response>
where
    T: Serialize,
{
    let mut response = Response::from_json(payload)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}
