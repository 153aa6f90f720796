mod product_dto;

pub use product_dto::{
    AddImageDto, AdminProductQuery, CreateProductDto, ProductFormDto, ProductListQuery,
    SetActiveDto,
};
