use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryPatch, MoveDirection, NewCategory};

/// Category with the number of products that reference it.
///
/// Public listings count active products only; admin listings count all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,
    /// Generated from the name when omitted
    #[validate(length(max = 100))]
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

impl From<CreateCategoryDto> for NewCategory {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            icon: dto.icon,
            order: dto.order,
            active: dto.active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    /// Only accepted while no product references the category
    #[validate(length(min = 1, max = 100))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

impl From<UpdateCategoryDto> for CategoryPatch {
    fn from(dto: UpdateCategoryDto) -> Self {
        Self {
            slug: dto.slug,
            name: dto.name,
            description: dto.description,
            icon: dto.icon,
            order: dto.order,
            active: dto.active,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct MoveCategoryDto {
    pub direction: MoveDirection,
}
