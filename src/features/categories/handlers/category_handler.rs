use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, MoveCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// List active categories in display order
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Active categories with product counts", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_active().await?;
    let meta = Meta::total(categories.len());
    Ok(Json(ApiResponse::success(Some(categories), None, Some(meta))))
}

/// Get an active category by slug
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_active(&slug).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// List every category, active or not, with reference counts
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Backend unavailable")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn admin_list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_all().await?;
    let meta = Meta::total(categories.len());
    Ok(Json(ApiResponse::success(Some(categories), None, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category added", body = ApiResponse<Category>),
        (status = 400, description = "Invalid category"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>)> {
    dto.validate()?;

    let category = service.add(dto.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Category added".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Category>),
        (status = 400, description = "Invalid change"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug taken or locked by product references")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<Category>>> {
    dto.validate()?;

    let category = service.update(&slug, dto.into()).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category removed", body = ApiResponse<Category>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is used by products; meta.total holds the product count")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Category>>> {
    let removed = service.remove(&slug).await?;
    Ok(Json(ApiResponse::success(
        Some(removed),
        Some("Category removed".to_string()),
        None,
    )))
}

/// Move a category one position up or down
#[utoipa::path(
    post,
    path = "/api/admin/categories/{slug}/move",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    request_body = MoveCategoryDto,
    responses(
        (status = 200, description = "Categories in their new order", body = ApiResponse<Vec<Category>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn move_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
    AppJson(dto): AppJson<MoveCategoryDto>,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let categories = service.reorder(&slug, dto.direction).await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}
