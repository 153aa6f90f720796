mod product;

pub use product::{
    CatalogStats, NewProduct, Product, ProductFilter, ProductImage, ProductTag, ProductWithImages,
};
