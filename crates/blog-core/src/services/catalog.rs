//! Back-office administration of categories and locations. There is no
//! HTTP surface for these flows.

use uuid::Uuid;

use super::vanished;
use crate::domain::{Category, Location, NewCategory, NewLocation};
use crate::error::{DomainError, RepoError, ValidationErrors};
use crate::ports::{BaseRepository, CategoryRepository, LocationRepository, Repositories};

#[derive(Clone)]
pub struct CatalogService {
    repos: Repositories,
}

impl CatalogService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        input.validate()?;
        self.ensure_slug_free(&input.slug, None).await?;

        let category = self
            .repos
            .categories
            .insert(Category::from_input(input))
            .await
            .map_err(slug_conflict)?;
        tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");

        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        input: NewCategory,
    ) -> Result<Category, DomainError> {
        let mut category = self
            .repos
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("category", id))?;

        input.validate()?;
        self.ensure_slug_free(&input.slug, Some(id)).await?;

        category.apply(input);
        let category = self
            .repos
            .categories
            .update(category)
            .await
            .map_err(|err| match err {
                RepoError::Constraint(_) => DomainError::Validation(slug_taken()),
                other => vanished("category", id)(other),
            })?;
        tracing::info!(category_id = %id, "Category updated");

        Ok(category)
    }

    /// Delete a category. Its posts stay, detached from any category.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), DomainError> {
        self.repos
            .categories
            .delete(id)
            .await
            .map_err(vanished("category", id))?;
        tracing::info!(category_id = %id, "Category deleted, posts detached");
        Ok(())
    }

    pub async fn create_location(&self, input: NewLocation) -> Result<Location, DomainError> {
        input.validate()?;
        let location = self
            .repos
            .locations
            .insert(Location::from_input(input))
            .await?;
        tracing::info!(location_id = %location.id, "Location created");

        Ok(location)
    }

    pub async fn update_location(
        &self,
        id: Uuid,
        input: NewLocation,
    ) -> Result<Location, DomainError> {
        let mut location = self
            .repos
            .locations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("location", id))?;

        input.validate()?;
        location.apply(input);
        let location = self
            .repos
            .locations
            .update(location)
            .await
            .map_err(vanished("location", id))?;
        tracing::info!(location_id = %id, "Location updated");

        Ok(location)
    }

    /// Delete a location. Its posts stay, detached from any location.
    pub async fn delete_location(&self, id: Uuid) -> Result<(), DomainError> {
        self.repos
            .locations
            .delete(id)
            .await
            .map_err(vanished("location", id))?;
        tracing::info!(location_id = %id, "Location deleted, posts detached");
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str, own_id: Option<Uuid>) -> Result<(), DomainError> {
        let existing = self.repos.categories.find_by_slug(slug).await?;
        match existing {
            Some(other) if Some(other.id) != own_id => Err(slug_taken().into()),
            _ => Ok(()),
        }
    }
}

fn slug_taken() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("slug", "Category with this Slug already exists.");
    errors
}

fn slug_conflict(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(_) => DomainError::Validation(slug_taken()),
        other => DomainError::Repo(other),
    }
}
