//! # Blog Core
//!
//! The domain layer of the Quill blog.
//! This crate contains the entities, the ports infrastructure must implement,
//! and the services enforcing identity, authorization and referential rules.
//! It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
