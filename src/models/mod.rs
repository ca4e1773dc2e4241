//! Core data models for query filters.

mod principal;

pub use principal::{EmailPrincipal, RELATION_COLLABORATOR, RELATION_READER};
