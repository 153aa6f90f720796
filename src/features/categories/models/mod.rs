mod category;

pub use category::{default_categories, Category, CategoryPatch, MoveDirection, NewCategory};
