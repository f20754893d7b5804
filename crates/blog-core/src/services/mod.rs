//! Use cases composed from the ports and the policy predicates.

mod catalog;
mod listing;
mod mutation;

pub use catalog::CatalogService;
pub use listing::{CategoryFeed, ListingService, PostDetail, ProfileFeed, QueryOptions};
pub use mutation::MutationService;

use uuid::Uuid;

use crate::error::{DomainError, RepoError};

/// Map a store miss on a known identifier to the caller-facing not-found.
fn vanished(entity_type: &'static str, id: Uuid) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => DomainError::Repo(other),
    }
}
