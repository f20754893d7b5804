//! # Blog Core
//!
//! The domain layer of the blogicum publishing platform.
//! This crate holds the visibility and ownership rules, the listing
//! pipeline and the mutation flows, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError, ValidationErrors};
