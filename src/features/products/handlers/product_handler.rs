use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::products::dtos::{
    AddImageDto, AdminProductQuery, CreateProductDto, ProductFormDto, ProductListQuery,
    SetActiveDto,
};
use crate::features::products::inquiry::WhatsAppInquiry;
use crate::features::products::models::{CatalogStats, Product, ProductImage, ProductWithImages};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, Meta};

// ==================== Storefront ====================

/// List active products, newest first
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Active products", body = ApiResponse<Vec<ProductWithImages>>),
        (status = 503, description = "Backend unavailable")
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ApiResponse<Vec<ProductWithImages>>>> {
    let products = service
        .list_storefront(query.category, query.q.as_deref())
        .await?;
    let meta = Meta::total(products.len());
    Ok(Json(ApiResponse::success(Some(products), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with images", body = ApiResponse<ProductWithImages>),
        (status = 404, description = "Product not found or hidden")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductWithImages>>> {
    let product = service.get_storefront(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// WhatsApp enquiry link for a product
#[utoipa::path(
    get,
    path = "/api/products/{id}/inquiry",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Pre-filled WhatsApp message", body = ApiResponse<WhatsAppInquiry>),
        (status = 404, description = "Product not found or hidden")
    ),
    tag = "products"
)]
pub async fn get_inquiry(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WhatsAppInquiry>>> {
    let inquiry = service.inquiry(id).await?;
    Ok(Json(ApiResponse::success(Some(inquiry), None, None)))
}

// ==================== Admin ====================

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Catalog counters", body = ApiResponse<CatalogStats>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn get_stats(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<ApiResponse<CatalogStats>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// List every product, including hidden ones
#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(AdminProductQuery),
    responses(
        (status = 200, description = "All products", body = ApiResponse<Vec<ProductWithImages>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn admin_list_products(
    State(service): State<Arc<ProductService>>,
    Query(query): Query<AdminProductQuery>,
) -> Result<Json<ApiResponse<Vec<ProductWithImages>>>> {
    let products = service.list_admin(query.q.as_deref()).await?;
    let meta = Meta::total(products.len());
    Ok(Json(ApiResponse::success(Some(products), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with images", body = ApiResponse<ProductWithImages>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn admin_get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductWithImages>>> {
    let product = service.get_admin(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductWithImages>),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductWithImages>>)> {
    dto.validate()?;

    let product = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ProductFormDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductWithImages>),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ProductFormDto>,
) -> Result<Json<ApiResponse<ProductWithImages>>> {
    dto.validate()?;

    let product = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Product deleted".to_string()),
        None,
    )))
}

/// Show or hide a product on the storefront
#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}/active",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = SetActiveDto,
    responses(
        (status = 200, description = "Visibility changed", body = ApiResponse<Product>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn set_product_active(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SetActiveDto>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = service.set_active(id, dto.is_active).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/products/{id}/images",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = AddImageDto,
    responses(
        (status = 201, description = "Image attached", body = ApiResponse<ProductImage>),
        (status = 400, description = "Invalid image URL"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn add_product_image(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AddImageDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductImage>>)> {
    dto.validate()?;

    let image = service.add_image(id, &dto.image_url).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(image), None, None)),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}/images/{image_id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("image_id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Image not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn delete_product_image(
    State(service): State<Arc<ProductService>>,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_image(id, image_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Image removed".to_string()),
        None,
    )))
}
