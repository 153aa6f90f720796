use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::settings::dtos::{PublicSettingsDto, UpdateSettingsDto};
use crate::features::settings::models::{SiteSettings, SizeChart};
use crate::features::settings::services::SettingsService;
use crate::shared::types::ApiResponse;

/// Storefront settings
///
/// Never fails: when the settings backend is down the defaults are served.
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Resolved site settings", body = ApiResponse<PublicSettingsDto>),
    ),
    tag = "settings"
)]
pub async fn get_public_settings(
    State(service): State<Arc<SettingsService>>,
) -> Json<ApiResponse<PublicSettingsDto>> {
    let settings = service.load().await;
    Json(ApiResponse::success(Some(settings.into()), None, None))
}

/// Full settings including inactive categories
#[utoipa::path(
    get,
    path = "/api/admin/settings",
    responses(
        (status = 200, description = "Resolved site settings", body = ApiResponse<SiteSettings>),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Settings backend unavailable")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn get_admin_settings(
    State(service): State<Arc<SettingsService>>,
) -> Result<Json<ApiResponse<SiteSettings>>> {
    let settings = service.load_strict().await?;
    Ok(Json(ApiResponse::success(Some(settings), None, None)))
}

/// Update scalar settings
#[utoipa::path(
    put,
    path = "/api/admin/settings",
    request_body = UpdateSettingsDto,
    responses(
        (status = 200, description = "Settings updated", body = ApiResponse<SiteSettings>),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Settings backend unavailable")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn update_settings(
    State(service): State<Arc<SettingsService>>,
    AppJson(dto): AppJson<UpdateSettingsDto>,
) -> Result<Json<ApiResponse<SiteSettings>>> {
    dto.validate()?;

    let settings = service.update(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(settings),
        Some("Settings saved".to_string()),
        None,
    )))
}

/// Replace the size chart
#[utoipa::path(
    put,
    path = "/api/admin/settings/size-chart",
    request_body = SizeChart,
    responses(
        (status = 200, description = "Size chart saved", body = ApiResponse<SizeChart>),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn update_size_chart(
    State(service): State<Arc<SettingsService>>,
    AppJson(chart): AppJson<SizeChart>,
) -> Result<Json<ApiResponse<SizeChart>>> {
    let chart = service.update_size_chart(chart).await?;
    Ok(Json(ApiResponse::success(Some(chart), None, None)))
}
