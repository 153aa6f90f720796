use thiserror::Error;

use crate::features::categories::models::{Category, CategoryPatch, MoveDirection, NewCategory};
use crate::shared::constants::{DEFAULT_ICON, MAX_GENERATED_SLUG_LEN};
use crate::shared::validation::SLUG_REGEX;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("{0}")]
    Validation(String),

    #[error("A category with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Category '{0}' not found")]
    NotFound(String),

    #[error("Cannot delete: {count} product(s) use category '{slug}'")]
    InUse { slug: String, count: i64 },

    #[error("Cannot change {field} of category '{slug}' while products reference it")]
    ImmutableField { field: &'static str, slug: String },
}

/// Derive a slug from a display name: lowercase, strip everything outside
/// `[a-z0-9]`, cut to 20 characters.
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(MAX_GENERATED_SLUG_LEN)
        .collect()
}

fn validate_slug(slug: &str) -> Result<(), CategoryError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        Err(CategoryError::Validation(format!(
            "Slug '{}' must be lowercase letters, digits and single hyphens",
            slug
        )))
    }
}

fn validate_name(name: &str) -> Result<String, CategoryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryError::Validation(
            "Category name is required".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// In-memory, uniquely keyed set of categories.
///
/// All mutations are pure transformations of the list. Persisting the result
/// is up to the caller, which writes the whole serialized set at once.
/// Reference counts come from the product store and are passed in, so the
/// registry never holds product state of its own.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// All categories, ascending by `order`; ties keep insertion order
    pub fn list_all(&self) -> Vec<Category> {
        let mut sorted = self.categories.clone();
        sorted.sort_by_key(|c| c.order);
        sorted
    }

    /// Categories visible on the public storefront
    pub fn list_active(&self) -> Vec<Category> {
        self.list_all().into_iter().filter(|c| c.active).collect()
    }

    /// Sorted list, consuming the registry (used for persistence)
    pub fn into_sorted(self) -> Vec<Category> {
        let mut categories = self.categories;
        categories.sort_by_key(|c| c.order);
        categories
    }

    pub fn add(&mut self, candidate: NewCategory) -> Result<Category, CategoryError> {
        let name = validate_name(&candidate.name)?;

        let slug = match candidate.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => {
                validate_slug(slug)?;
                slug.to_string()
            }
            _ => {
                let generated = generate_slug(&name);
                if generated.is_empty() {
                    return Err(CategoryError::Validation(format!(
                        "Cannot derive a slug from '{}', please supply one",
                        name
                    )));
                }
                generated
            }
        };

        if self.contains(&slug) {
            return Err(CategoryError::DuplicateSlug(slug));
        }

        let order = match candidate.order {
            Some(order) => order,
            None => self
                .categories
                .iter()
                .map(|c| c.order)
                .max()
                .unwrap_or(0)
                .saturating_add(1),
        };

        let category = Category {
            slug,
            name,
            description: candidate.description.unwrap_or_default(),
            icon: candidate
                .icon
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            order,
            active: candidate.active.unwrap_or(true),
        };

        self.categories.push(category.clone());
        Ok(category)
    }

    /// Apply a partial change. Everything is validated before anything is
    /// written, so a rejected patch leaves the registry untouched.
    pub fn update(
        &mut self,
        slug: &str,
        patch: CategoryPatch,
        reference_count: i64,
    ) -> Result<Category, CategoryError> {
        let index = self
            .categories
            .iter()
            .position(|c| c.slug == slug)
            .ok_or_else(|| CategoryError::NotFound(slug.to_string()))?;

        let new_slug = match patch.slug.as_deref().map(str::trim) {
            Some(new_slug) if new_slug != slug => {
                if reference_count > 0 {
                    return Err(CategoryError::ImmutableField {
                        field: "slug",
                        slug: slug.to_string(),
                    });
                }
                validate_slug(new_slug)?;
                if self.contains(new_slug) {
                    return Err(CategoryError::DuplicateSlug(new_slug.to_string()));
                }
                Some(new_slug.to_string())
            }
            _ => None,
        };

        let name = patch.name.as_deref().map(validate_name).transpose()?;

        let category = &mut self.categories[index];
        if let Some(new_slug) = new_slug {
            category.slug = new_slug;
        }
        if let Some(name) = name {
            category.name = name;
        }
        if let Some(description) = patch.description {
            category.description = description;
        }
        if let Some(icon) = patch.icon.filter(|i| !i.trim().is_empty()) {
            category.icon = icon;
        }
        if let Some(order) = patch.order {
            category.order = order;
        }
        if let Some(active) = patch.active {
            category.active = active;
        }

        Ok(category.clone())
    }

    pub fn remove(&mut self, slug: &str, reference_count: i64) -> Result<Category, CategoryError> {
        let index = self
            .categories
            .iter()
            .position(|c| c.slug == slug)
            .ok_or_else(|| CategoryError::NotFound(slug.to_string()))?;

        if reference_count > 0 {
            return Err(CategoryError::InUse {
                slug: slug.to_string(),
                count: reference_count,
            });
        }

        Ok(self.categories.remove(index))
    }

    /// Swap `order` with the neighbour in sorted sequence.
    ///
    /// Returns `Ok(false)` when the category already sits at the boundary in
    /// the requested direction.
    pub fn reorder(&mut self, slug: &str, direction: MoveDirection) -> Result<bool, CategoryError> {
        let mut sorted = self.list_all();
        let index = sorted
            .iter()
            .position(|c| c.slug == slug)
            .ok_or_else(|| CategoryError::NotFound(slug.to_string()))?;

        let swap_index = match direction {
            MoveDirection::Up if index == 0 => return Ok(false),
            MoveDirection::Up => index - 1,
            MoveDirection::Down if index + 1 == sorted.len() => return Ok(false),
            MoveDirection::Down => index + 1,
        };

        let order = sorted[index].order;
        sorted[index].order = sorted[swap_index].order;
        sorted[swap_index].order = order;
        // Equal orders fall back to list position, so keep the list sorted too.
        sorted.swap(index, swap_index);

        self.categories = sorted;
        Ok(true)
    }
}
